//! DDS texture container writer.
//!
//! Serializes a BC3 (DXT5) compressed image into a DirectDraw Surface
//! file: a 4-byte magic, a 124-byte little-endian header, then the block
//! payload. Only the subset of the header used by flat, mipmap-free
//! DXT5 textures is populated.

use byteorder::{LittleEndian, WriteBytesExt};
use image::RgbaImage;
use texpresso::{Format, Params};

use anyhow::Result;

// DDS_HEADER.dwFlags bits
const DDSD_CAPS: u32 = 0x1;
const DDSD_HEIGHT: u32 = 0x2;
const DDSD_WIDTH: u32 = 0x4;
const DDSD_PIXELFORMAT: u32 = 0x1000;
const DDSD_LINEARSIZE: u32 = 0x80000;

// DDS_PIXELFORMAT.dwFlags bits
const DDPF_FOURCC: u32 = 0x4;

// DDS_HEADER.dwCaps bits
const DDSCAPS_TEXTURE: u32 = 0x1000;

/// DDS file header for a single flat DXT5 surface.
pub struct DdsHeader {
    pub width: u32,
    pub height: u32,
    /// Size in bytes of the compressed top-level surface
    pub linear_size: u32,
}

impl DdsHeader {
    pub const MAGIC: &'static [u8] = b"DDS ";
    pub const SIZE: usize = 124;
    pub const FOURCC: &'static [u8] = b"DXT5";

    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        out.extend_from_slice(Self::MAGIC);
        out.write_u32::<LittleEndian>(Self::SIZE as u32)?;
        out.write_u32::<LittleEndian>(
            DDSD_CAPS | DDSD_HEIGHT | DDSD_WIDTH | DDSD_PIXELFORMAT | DDSD_LINEARSIZE,
        )?;
        out.write_u32::<LittleEndian>(self.height)?;
        out.write_u32::<LittleEndian>(self.width)?;
        out.write_u32::<LittleEndian>(self.linear_size)?;
        out.write_u32::<LittleEndian>(0)?; // depth
        out.write_u32::<LittleEndian>(0)?; // mipmap count
        for _ in 0..11 {
            out.write_u32::<LittleEndian>(0)?; // reserved1
        }

        // DDS_PIXELFORMAT - 32 bytes
        out.write_u32::<LittleEndian>(32)?;
        out.write_u32::<LittleEndian>(DDPF_FOURCC)?;
        out.extend_from_slice(Self::FOURCC);
        out.write_u32::<LittleEndian>(0)?; // RGB bit count
        out.write_u32::<LittleEndian>(0)?; // R mask
        out.write_u32::<LittleEndian>(0)?; // G mask
        out.write_u32::<LittleEndian>(0)?; // B mask
        out.write_u32::<LittleEndian>(0)?; // A mask

        out.write_u32::<LittleEndian>(DDSCAPS_TEXTURE)?;
        out.write_u32::<LittleEndian>(0)?; // caps2
        out.write_u32::<LittleEndian>(0)?; // caps3
        out.write_u32::<LittleEndian>(0)?; // caps4
        out.write_u32::<LittleEndian>(0)?; // reserved2
        Ok(())
    }
}

/// Compress an RGBA image into a complete DXT5 DDS file.
pub fn encode(image: &RgbaImage) -> Result<Vec<u8>> {
    let width = image.width() as usize;
    let height = image.height() as usize;

    let payload_size = Format::Bc3.compressed_size(width, height);
    let mut payload = vec![0u8; payload_size];
    Format::Bc3.compress(
        image.as_raw(),
        width,
        height,
        Params::default(),
        &mut payload,
    );

    let mut out = Vec::with_capacity(4 + DdsHeader::SIZE + payload_size);
    let header = DdsHeader {
        width: image.width(),
        height: image.height(),
        linear_size: payload_size as u32,
    };
    header.write_to(&mut out)?;
    out.extend_from_slice(&payload);

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn dword(data: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ])
    }

    #[test]
    fn header_encodes_dimensions_and_fourcc() {
        let image = RgbaImage::from_pixel(8, 12, Rgba([255, 0, 0, 255]));
        let dds = encode(&image).unwrap();

        assert_eq!(&dds[0..4], DdsHeader::MAGIC);
        assert_eq!(dword(&dds, 4), 124);
        assert_eq!(dword(&dds, 12), 12); // height
        assert_eq!(dword(&dds, 16), 8); // width
        assert_eq!(&dds[84..88], DdsHeader::FOURCC);
    }

    #[test]
    fn payload_length_matches_block_count() {
        let image = RgbaImage::from_pixel(64, 64, Rgba([0, 128, 255, 255]));
        let dds = encode(&image).unwrap();

        // 16x16 blocks of 16 bytes each, after the 128-byte preamble
        let blocks = (64 / 4) * (64 / 4);
        assert_eq!(dds.len(), 4 + DdsHeader::SIZE + blocks * 16);
        assert_eq!(dword(&dds, 20), (blocks * 16) as u32); // linear size
    }

    #[test]
    fn non_multiple_of_four_rounds_up() {
        let image = RgbaImage::from_pixel(6, 6, Rgba([1, 2, 3, 255]));
        let dds = encode(&image).unwrap();

        // 6x6 needs 2x2 blocks
        assert_eq!(dds.len(), 4 + DdsHeader::SIZE + 4 * 16);
    }
}
