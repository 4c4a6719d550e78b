use byteorder::{LittleEndian, WriteBytesExt};
use chrono::{Datelike, Local, Timelike};

use anyhow::Result;

/// Minimum ZIP version needed to extract DEFLATE entries (2.0)
const VERSION_DEFLATE: u16 = 20;

/// ZIP compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMethod {
    Stored,
    Deflate,
}

impl CompressionMethod {
    pub fn as_u16(&self) -> u16 {
        match self {
            CompressionMethod::Stored => 0,
            CompressionMethod::Deflate => 8,
        }
    }
}

/// MS-DOS date/time pair as stored in ZIP headers.
///
/// Layout: date is `(year - 1980) << 9 | month << 5 | day`,
/// time is `hour << 11 | minute << 5 | second / 2`.
#[derive(Debug, Clone, Copy)]
pub struct DosDateTime {
    pub date: u16,
    pub time: u16,
}

impl DosDateTime {
    /// Capture the current local time.
    pub fn now() -> Self {
        let now = Local::now();
        Self::from_parts(
            now.year(),
            now.month(),
            now.day(),
            now.hour(),
            now.minute(),
            now.second(),
        )
    }

    /// Pack calendar fields into the DOS bitfields.
    ///
    /// Years outside the representable 1980..=2107 range clamp to the
    /// nearest bound.
    pub fn from_parts(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        let year = year.clamp(1980, 2107) as u16;
        let date = ((year - 1980) << 9) | ((month as u16) << 5) | (day as u16);
        let time = ((hour as u16) << 11) | ((minute as u16) << 5) | ((second as u16) / 2);
        Self { date, time }
    }
}

/// Local File Header (LFH) - 30 bytes plus the file name
pub struct LocalFileHeader<'a> {
    pub method: CompressionMethod,
    pub timestamp: DosDateTime,
    pub crc32: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub file_name: &'a str,
}

impl LocalFileHeader<'_> {
    pub const SIGNATURE: &'static [u8] = b"PK\x03\x04";

    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        out.extend_from_slice(Self::SIGNATURE);
        out.write_u16::<LittleEndian>(VERSION_DEFLATE)?;
        out.write_u16::<LittleEndian>(0)?; // general purpose bit flags
        out.write_u16::<LittleEndian>(self.method.as_u16())?;
        out.write_u16::<LittleEndian>(self.timestamp.time)?;
        out.write_u16::<LittleEndian>(self.timestamp.date)?;
        out.write_u32::<LittleEndian>(self.crc32)?;
        out.write_u32::<LittleEndian>(self.compressed_size)?;
        out.write_u32::<LittleEndian>(self.uncompressed_size)?;
        out.write_u16::<LittleEndian>(self.file_name.len() as u16)?;
        out.write_u16::<LittleEndian>(0)?; // extra field length
        out.extend_from_slice(self.file_name.as_bytes());
        Ok(())
    }
}

/// Central Directory File Header (CDFH) - 46 bytes plus the file name
pub struct CentralDirectoryHeader<'a> {
    pub method: CompressionMethod,
    pub timestamp: DosDateTime,
    pub crc32: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub lfh_offset: u32,
    pub file_name: &'a str,
}

impl CentralDirectoryHeader<'_> {
    pub const SIGNATURE: &'static [u8] = b"PK\x01\x02";

    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        out.extend_from_slice(Self::SIGNATURE);
        out.write_u16::<LittleEndian>(VERSION_DEFLATE)?; // version made by
        out.write_u16::<LittleEndian>(VERSION_DEFLATE)?; // version needed
        out.write_u16::<LittleEndian>(0)?; // general purpose bit flags
        out.write_u16::<LittleEndian>(self.method.as_u16())?;
        out.write_u16::<LittleEndian>(self.timestamp.time)?;
        out.write_u16::<LittleEndian>(self.timestamp.date)?;
        out.write_u32::<LittleEndian>(self.crc32)?;
        out.write_u32::<LittleEndian>(self.compressed_size)?;
        out.write_u32::<LittleEndian>(self.uncompressed_size)?;
        out.write_u16::<LittleEndian>(self.file_name.len() as u16)?;
        out.write_u16::<LittleEndian>(0)?; // extra field length
        out.write_u16::<LittleEndian>(0)?; // file comment length
        out.write_u16::<LittleEndian>(0)?; // disk number start
        out.write_u16::<LittleEndian>(0)?; // internal file attributes
        out.write_u32::<LittleEndian>(0)?; // external file attributes
        out.write_u32::<LittleEndian>(self.lfh_offset)?;
        out.extend_from_slice(self.file_name.as_bytes());
        Ok(())
    }
}

/// End of Central Directory (EOCD) - 22 bytes, empty comment
pub struct EndOfCentralDirectory {
    pub total_entries: u16,
    pub cd_size: u32,
    pub cd_offset: u32,
}

impl EndOfCentralDirectory {
    pub const SIGNATURE: &'static [u8] = b"PK\x05\x06";

    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        out.extend_from_slice(Self::SIGNATURE);
        out.write_u16::<LittleEndian>(0)?; // disk number
        out.write_u16::<LittleEndian>(0)?; // disk with central directory
        out.write_u16::<LittleEndian>(self.total_entries)?;
        out.write_u16::<LittleEndian>(self.total_entries)?;
        out.write_u32::<LittleEndian>(self.cd_size)?;
        out.write_u32::<LittleEndian>(self.cd_offset)?;
        out.write_u16::<LittleEndian>(0)?; // comment length
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dos_datetime_packs_bitfields() {
        let ts = DosDateTime::from_parts(2025, 8, 6, 14, 30, 58);
        assert_eq!(ts.date >> 9, 2025 - 1980);
        assert_eq!((ts.date >> 5) & 0x0F, 8);
        assert_eq!(ts.date & 0x1F, 6);
        assert_eq!(ts.time >> 11, 14);
        assert_eq!((ts.time >> 5) & 0x3F, 30);
        assert_eq!((ts.time & 0x1F) * 2, 58);
    }

    #[test]
    fn dos_datetime_clamps_to_epoch() {
        let ts = DosDateTime::from_parts(1975, 1, 1, 0, 0, 0);
        assert_eq!(ts.date >> 9, 0);
    }

    #[test]
    fn local_file_header_layout() {
        let header = LocalFileHeader {
            method: CompressionMethod::Deflate,
            timestamp: DosDateTime::from_parts(2025, 1, 2, 3, 4, 6),
            crc32: 0xDEADBEEF,
            compressed_size: 10,
            uncompressed_size: 20,
            file_name: "avatar.png",
        };

        let mut out = Vec::new();
        header.write_to(&mut out).unwrap();

        assert_eq!(&out[0..4], LocalFileHeader::SIGNATURE);
        assert_eq!(out.len(), 30 + "avatar.png".len());
        // method at offset 8, crc at 14, name length at 26
        assert_eq!(u16::from_le_bytes([out[8], out[9]]), 8);
        assert_eq!(
            u32::from_le_bytes([out[14], out[15], out[16], out[17]]),
            0xDEADBEEF
        );
        assert_eq!(u16::from_le_bytes([out[26], out[27]]), 10);
        assert_eq!(&out[30..], b"avatar.png");
    }

    #[test]
    fn eocd_is_twenty_two_bytes() {
        let eocd = EndOfCentralDirectory {
            total_entries: 3,
            cd_size: 138,
            cd_offset: 4096,
        };

        let mut out = Vec::new();
        eocd.write_to(&mut out).unwrap();

        assert_eq!(out.len(), 22);
        assert_eq!(&out[0..4], EndOfCentralDirectory::SIGNATURE);
        assert_eq!(u16::from_le_bytes([out[10], out[11]]), 3);
    }
}
