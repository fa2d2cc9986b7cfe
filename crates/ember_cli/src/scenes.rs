//! Built-in demo scenes.

use ember_renderer::{
    make_box, Bvh, Camera, Checker, Color, Dielectric, DiffuseLight, ImageTexture, Lambertian,
    Material, Metal, Object, Quad, RotateY, Sphere, Translate, Vec3,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Everything the driver needs to render a scene.
pub struct SceneDescription {
    pub world: Object,
    pub camera: Camera,
    pub background: Color,
}

fn image_height(width: u32, aspect_ratio: f32) -> u32 {
    ((width as f32 / aspect_ratio) as u32).max(1)
}

/// A field of small random spheres around three large ones, seen through a
/// defocused lens. Diffuse spheres bounce upward over the shutter interval.
pub fn bouncing_spheres(width: u32) -> SceneDescription {
    let mut objects: Vec<Object> = Vec::new();

    let checker = Checker::new(0.32, Color::new(0.2, 0.3, 0.1), Color::new(0.9, 0.9, 0.9));
    let ground: Arc<dyn Material> = Arc::new(Lambertian::textured(Arc::new(checker)));
    objects.push(Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0, ground).into());

    // Fixed layout seed so the scene is the same on every run
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat: f32 = rng.gen();
            let center = Vec3::new(
                a as f32 + 0.9 * rng.gen::<f32>(),
                0.2,
                b as f32 + 0.9 * rng.gen::<f32>(),
            );

            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            if choose_mat < 0.8 {
                // Diffuse, drifting upward over the shutter interval
                let albedo = Color::new(
                    rng.gen::<f32>() * rng.gen::<f32>(),
                    rng.gen::<f32>() * rng.gen::<f32>(),
                    rng.gen::<f32>() * rng.gen::<f32>(),
                );
                let material: Arc<dyn Material> = Arc::new(Lambertian::new(albedo));
                let center1 = center + Vec3::new(0.0, rng.gen_range(0.0..0.5), 0.0);
                objects.push(Sphere::moving(center, center1, 0.2, material).into());
            } else if choose_mat < 0.95 {
                // Metal
                let albedo = Color::new(
                    0.5 + 0.5 * rng.gen::<f32>(),
                    0.5 + 0.5 * rng.gen::<f32>(),
                    0.5 + 0.5 * rng.gen::<f32>(),
                );
                let fuzz = 0.5 * rng.gen::<f32>();
                let material: Arc<dyn Material> = Arc::new(Metal::new(albedo, fuzz));
                objects.push(Sphere::new(center, 0.2, material).into());
            } else {
                // Glass
                let material: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
                objects.push(Sphere::new(center, 0.2, material).into());
            }
        }
    }

    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
    objects.push(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, glass).into());

    let brown: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1)));
    objects.push(Sphere::new(Vec3::new(-4.0, 1.0, 0.0), 1.0, brown).into());

    let steel: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0));
    objects.push(Sphere::new(Vec3::new(4.0, 1.0, 0.0), 1.0, steel).into());

    log::info!("Scene 'spheres': {} objects", objects.len());

    let mut camera = Camera::new()
        .with_resolution(width, image_height(width, 16.0 / 9.0))
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.6, 10.0);
    camera.initialize();

    SceneDescription {
        world: Bvh::new(objects).into(),
        camera,
        background: Color::new(0.70, 0.80, 1.00),
    }
}

/// A single globe wrapped in an image texture. A missing texture file
/// renders as the loader's magenta sentinel instead of failing.
pub fn earth(width: u32) -> SceneDescription {
    let earth_texture = Arc::new(ImageTexture::load("earthmap.jpg"));
    let surface: Arc<dyn Material> = Arc::new(Lambertian::textured(earth_texture));
    let globe = Sphere::new(Vec3::ZERO, 2.0, surface);

    let mut camera = Camera::new()
        .with_resolution(width, image_height(width, 16.0 / 9.0))
        .with_position(Vec3::new(0.0, 0.0, 12.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.0, 12.0);
    camera.initialize();

    SceneDescription {
        world: Bvh::new(vec![globe.into()]).into(),
        camera,
        background: Color::new(0.70, 0.80, 1.00),
    }
}

/// The classic Cornell box: an emissive ceiling panel lighting two boxes,
/// each rotated about Y and translated into place.
pub fn cornell_box(width: u32) -> SceneDescription {
    let red: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.65, 0.05, 0.05)));
    let white: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.73, 0.73, 0.73)));
    let green: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.12, 0.45, 0.15)));
    let light: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::new(15.0, 15.0, 15.0)));

    let mut objects: Vec<Object> = vec![
        Quad::new(
            Vec3::new(555.0, 0.0, 0.0),
            Vec3::new(0.0, 555.0, 0.0),
            Vec3::new(0.0, 0.0, 555.0),
            green,
        )
        .into(),
        Quad::new(
            Vec3::ZERO,
            Vec3::new(0.0, 555.0, 0.0),
            Vec3::new(0.0, 0.0, 555.0),
            red,
        )
        .into(),
        Quad::new(
            Vec3::new(343.0, 554.0, 332.0),
            Vec3::new(-130.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -105.0),
            light,
        )
        .into(),
        Quad::new(
            Vec3::ZERO,
            Vec3::new(555.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 555.0),
            Arc::clone(&white),
        )
        .into(),
        Quad::new(
            Vec3::new(555.0, 555.0, 555.0),
            Vec3::new(-555.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -555.0),
            Arc::clone(&white),
        )
        .into(),
        Quad::new(
            Vec3::new(0.0, 0.0, 555.0),
            Vec3::new(555.0, 0.0, 0.0),
            Vec3::new(0.0, 555.0, 0.0),
            Arc::clone(&white),
        )
        .into(),
    ];

    // Tall box
    let box1: Object = Bvh::new(make_box(
        Vec3::ZERO,
        Vec3::new(165.0, 330.0, 165.0),
        Arc::clone(&white),
    ))
    .into();
    let box1 = Translate::new(RotateY::new(box1, 15.0).into(), Vec3::new(265.0, 0.0, 295.0));
    objects.push(box1.into());

    // Short box
    let box2: Object = Bvh::new(make_box(Vec3::ZERO, Vec3::splat(165.0), white)).into();
    let box2 = Translate::new(RotateY::new(box2, -18.0).into(), Vec3::new(130.0, 0.0, 65.0));
    objects.push(box2.into());

    let mut camera = Camera::new()
        .with_resolution(width, image_height(width, 1.0))
        .with_position(
            Vec3::new(278.0, 278.0, -800.0),
            Vec3::new(278.0, 278.0, 0.0),
            Vec3::Y,
        )
        .with_lens(40.0, 0.0, 10.0);
    camera.initialize();

    SceneDescription {
        world: Bvh::new(objects).into(),
        camera,
        background: Color::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenes_build_with_nonempty_bounds() {
        for scene in [bouncing_spheres(64), earth(64), cornell_box(64)] {
            let bbox = scene.world.bounding_box();
            assert!(bbox.x.size() > 0.0);
            assert!(bbox.y.size() > 0.0);
            assert!(bbox.z.size() > 0.0);
        }
    }

    #[test]
    fn test_scene_layout_is_stable_across_builds() {
        let a = bouncing_spheres(64);
        let b = bouncing_spheres(64);
        assert_eq!(a.world.bounding_box(), b.world.bounding_box());
    }
}
