//! The 14-byte image header: magic, width, height, channels, colorspace.

use byteorder::{BigEndian, ByteOrder};
use snafu::ensure;

use crate::error::{
    BadChannelsSnafu, BadColorspaceSnafu, BadDimensionsSnafu, BadMagicSnafu, DecodeError,
    EncodeError, TooManyPixelsSnafu,
};

pub const MAGIC: [u8; 4] = *b"slof";
pub const HEADER_SIZE: usize = 14;
pub const END_MARKER: [u8; 8] = [0, 0, 0, 0, 0, 0, 0, 1];

/// 5 bytes per pixel is the worst case (RGBA chunk); guard so that can
/// never exceed ~2 GiB.
pub const MAX_PIXELS: u64 = 400_000_000;

/// Image geometry and colorspace, read from or written to the header.
///
/// `colorspace` is informational only (0 = sRGB with linear alpha, 1 = all
/// linear); it never changes how chunks are encoded or decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDescriptor {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub colorspace: u8,
}

impl ImageDescriptor {
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    fn validate_common(width: u32, height: u32, channels: u8, colorspace: u8) -> bool {
        width != 0
            && height != 0
            && matches!(channels, 3 | 4)
            && matches!(colorspace, 0 | 1)
            && width as u64 * height as u64 <= MAX_PIXELS
    }
}

/// Serializes a descriptor to the 14-byte header, rejecting invalid fields.
pub(crate) fn write(desc: &ImageDescriptor) -> Result<[u8; HEADER_SIZE], EncodeError> {
    let ImageDescriptor {
        width,
        height,
        channels,
        colorspace,
    } = *desc;

    ensure!(width != 0 && height != 0, BadDimensionsSnafu { width, height });
    ensure!(matches!(channels, 3 | 4), BadChannelsSnafu { channels });
    ensure!(matches!(colorspace, 0 | 1), BadColorspaceSnafu { colorspace });
    ensure!(
        width as u64 * height as u64 <= MAX_PIXELS,
        TooManyPixelsSnafu { width, height }
    );

    let mut bytes = [0u8; HEADER_SIZE];
    bytes[0..4].copy_from_slice(&MAGIC);
    BigEndian::write_u32(&mut bytes[4..8], width);
    BigEndian::write_u32(&mut bytes[8..12], height);
    bytes[12] = channels;
    bytes[13] = colorspace;
    Ok(bytes)
}

/// Parses the 14-byte header, recovering the descriptor.
pub(crate) fn parse(bytes: &[u8]) -> Result<ImageDescriptor, DecodeError> {
    debug_assert!(bytes.len() >= HEADER_SIZE);

    ensure!(bytes[0..4] == MAGIC, BadMagicSnafu);

    let width = BigEndian::read_u32(&bytes[4..8]);
    let height = BigEndian::read_u32(&bytes[8..12]);
    let channels = bytes[12];
    let colorspace = bytes[13];

    ensure!(
        ImageDescriptor::validate_common(width, height, channels, colorspace),
        BadDimensionsSnafu { width, height }
    );

    Ok(ImageDescriptor {
        width,
        height,
        channels,
        colorspace,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desc() -> ImageDescriptor {
        ImageDescriptor {
            width: 4,
            height: 3,
            channels: 4,
            colorspace: 0,
        }
    }

    #[test]
    fn round_trip() {
        let d = desc();
        let bytes = write(&d).unwrap();
        assert_eq!(parse(&bytes).unwrap(), d);
    }

    #[test]
    fn magic_and_layout() {
        let bytes = write(&desc()).unwrap();
        assert_eq!(&bytes[0..4], b"slof");
        assert_eq!(bytes.len(), HEADER_SIZE);
    }

    #[test]
    fn rejects_zero_dimensions() {
        let mut d = desc();
        d.width = 0;
        assert!(write(&d).is_err());
    }

    #[test]
    fn rejects_bad_channels() {
        let mut d = desc();
        d.channels = 2;
        assert!(write(&d).is_err());
    }

    #[test]
    fn rejects_bad_colorspace() {
        let mut d = desc();
        d.colorspace = 2;
        assert!(write(&d).is_err());
    }

    #[test]
    fn parse_rejects_bad_magic() {
        let mut bytes = write(&desc()).unwrap();
        bytes[0] = b'x';
        assert!(parse(&bytes).is_err());
    }

    #[test]
    fn rejects_guard_overflow() {
        let d = ImageDescriptor {
            width: 30_000,
            height: 30_000,
            channels: 3,
            colorspace: 0,
        };
        assert!(write(&d).is_err());
    }
}
