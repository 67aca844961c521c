//! Error taxonomy (spec §7), expressed with `snafu` in the same style the
//! teacher crate's `encode/std_api.rs` and `decode/alloc_api.rs` use.

use snafu::Snafu;

/// Everything that can go wrong encoding a pixel buffer.
#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(visibility(pub(crate)))]
pub enum EncodeError {
    #[snafu(display("width and height must both be non-zero, got {width}x{height}"))]
    BadDimensions { width: u32, height: u32 },

    #[snafu(display("channels must be 3 or 4, got {channels}"))]
    BadChannels { channels: u8 },

    #[snafu(display("colorspace must be 0 or 1, got {colorspace}"))]
    BadColorspace { colorspace: u8 },

    #[snafu(display(
        "width * height ({}) exceeds the {} pixel guard",
        width as u64 * height as u64,
        crate::header::MAX_PIXELS
    ))]
    TooManyPixels { width: u32, height: u32 },

    #[snafu(display(
        "pixel buffer length {actual} does not match width * height * channels ({expected})"
    ))]
    BufferLengthMismatch { expected: usize, actual: usize },
}

/// Everything that can go wrong decoding a chunk stream.
#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(visibility(pub(crate)))]
pub enum DecodeError {
    #[snafu(display("input is {len} bytes, shorter than the 14-byte header + 8-byte end marker"))]
    InputTooShort { len: usize },

    #[snafu(display("header magic does not match \"slof\""))]
    BadMagic,

    #[snafu(display("header describes an invalid image (bad dimensions, channels, or colorspace, or the pixel guard is exceeded)"))]
    BadDimensions { width: u32, height: u32 },

    #[snafu(display("requested output channels must be 0, 3, or 4, got {channels}"))]
    BadRequestedChannels { channels: u8 },
}
