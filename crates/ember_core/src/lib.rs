//! ember core - asset loading shared by the renderer and tools.
//!
//! Currently this is texture pixel data: decoding image files into raw RGB
//! bytes with a forgiving search-path lookup, so that a missing texture
//! degrades to a visible sentinel color instead of aborting a render.

pub mod texture;

pub use texture::{Image, TextureError};
