//! Image decoding, resizing, and texture encoding.
//!
//! This module turns an arbitrary source image into the fixed set of
//! textures an avatar bundle carries.
//!
//! ## Architecture
//!
//! - [`pipeline`]: decode, square-resize, PNG master, per-size variants
//! - [`dds`]: DXT5 block compression and DDS container serialization

mod dds;
mod pipeline;

pub use dds::DdsHeader;
pub use pipeline::{AvatarTextures, MASTER_SIZE, TextureVariant, VARIANT_SIZES, render};
