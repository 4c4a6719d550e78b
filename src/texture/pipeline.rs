//! Avatar rendering pipeline.
//!
//! Takes the raw bytes of a source image in any supported format and
//! produces the textures an avatar bundle ships: a 440x440 PNG master
//! and a DXT5 DDS thumbnail at each of the fixed variant sizes.

use image::{ImageFormat, imageops::FilterType};
use std::io::Cursor;

use anyhow::Result;

use super::dds;

/// Edge length of the master avatar image in pixels.
pub const MASTER_SIZE: u32 = 440;

/// Edge lengths of the DDS thumbnail variants rendered for every avatar.
pub const VARIANT_SIZES: [u32; 4] = [440, 260, 128, 64];

/// A DXT5-compressed thumbnail at one of the fixed variant sizes.
pub struct TextureVariant {
    pub size: u32,
    pub dds: Vec<u8>,
}

/// Fully rendered avatar textures, ready for packaging.
pub struct AvatarTextures {
    /// The 440x440 master image, PNG encoded
    pub png: Vec<u8>,
    /// One DDS thumbnail per entry in [`VARIANT_SIZES`]
    pub variants: Vec<TextureVariant>,
}

/// Render all avatar textures from a raw image payload.
///
/// The source is decoded, forced square to the master size with Lanczos3
/// resampling, and encoded as PNG; each variant is then resized from the
/// master (the variant matching the master size reuses it directly) and
/// compressed to DXT5.
///
/// # Errors
///
/// Returns an error if the payload cannot be decoded as an image or if
/// PNG encoding fails.
pub fn render(payload: &[u8]) -> Result<AvatarTextures> {
    let decoded = image::load_from_memory(payload)?;
    let master = decoded.resize_exact(MASTER_SIZE, MASTER_SIZE, FilterType::Lanczos3);

    let mut png = Vec::new();
    master.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    let mut variants = Vec::with_capacity(VARIANT_SIZES.len());
    for size in VARIANT_SIZES {
        let rgba = if size == MASTER_SIZE {
            master.to_rgba8()
        } else {
            master
                .resize_exact(size, size, FilterType::Lanczos3)
                .to_rgba8()
        };

        variants.push(TextureVariant {
            size,
            dds: dds::encode(&rgba)?,
        });
    }

    Ok(AvatarTextures { png, variants })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgba, RgbaImage};

    /// PNG-encode a small solid-color test image.
    fn test_png(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 255]));
        let mut png = Vec::new();
        DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .unwrap();
        png
    }

    #[test]
    fn renders_master_and_all_variants() {
        let textures = render(&test_png(16, 16)).unwrap();

        let master = image::load_from_memory(&textures.png).unwrap();
        assert_eq!(master.width(), MASTER_SIZE);
        assert_eq!(master.height(), MASTER_SIZE);

        let sizes: Vec<u32> = textures.variants.iter().map(|v| v.size).collect();
        assert_eq!(sizes, VARIANT_SIZES);
    }

    #[test]
    fn non_square_input_is_forced_square() {
        let textures = render(&test_png(64, 16)).unwrap();

        let master = image::load_from_memory(&textures.png).unwrap();
        assert_eq!((master.width(), master.height()), (MASTER_SIZE, MASTER_SIZE));
    }

    #[test]
    fn variant_payloads_match_their_dimensions() {
        let textures = render(&test_png(32, 32)).unwrap();

        for variant in &textures.variants {
            let blocks = (variant.size as usize / 4) * (variant.size as usize / 4);
            assert_eq!(variant.dds.len(), 128 + blocks * 16);
        }
    }

    #[test]
    fn rejects_undecodable_payload() {
        assert!(render(b"definitely not an image").is_err());
    }
}
