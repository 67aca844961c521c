//! SLOF: a byte-aligned, QOI-family lossy image codec.
//!
//! Pixels are predicted from their left/top neighbor using a running
//! previous-pixel value and a 64-slot recently-seen cache, the same way QOI
//! and its variants do; the difference that makes this format lossy is that
//! every red/green/blue channel is quantized to 7 bits (the low bit is
//! dropped on encode and re-synthesized as 0 on decode) before prediction.
//! Alpha is carried at full 8-bit precision.
//!
//! # Header
//!
//! A 14-byte, big-endian header precedes the chunk stream:
//!
//! ```plain
//! .- Header ------------------------------------------------------.
//! | Bytes 0-3 |  Bytes 4-7  |  Bytes 8-11  | Byte 12  |  Byte 13   |
//! |  "slof"   | width (u32) | height (u32) | channels | colorspace |
//! `------------------------------------------------------------------`
//! ```
//!
//! `channels` is 3 (RGB) or 4 (RGBA); `colorspace` is 0 (sRGB, linear alpha)
//! or 1 (all linear) and is informational only — it never changes chunk
//! encoding.
//!
//! # Chunk stream
//!
//! ```plain
//! .- INDEX -----------------.
//! |         Byte[0]         |
//! |  7  6  5  4  3  2  1  0 |
//! |-------+-----------------|
//! |  0  0 |      index      |
//! `-------------------------`
//! ```
//! 2-bit tag `00`, 6-bit index into the 64-slot cache.
//!
//! ```plain
//! .- DIFF ------------------.
//! |         Byte[0]         |
//! |  7  6  5  4  3  2  1  0 |
//! |-------+-----+-----+-----|
//! |  0  1 |  dr |  dg |  db |
//! `-------------------------`
//! ```
//! 2-bit tag `01`; each of `dr`/`dg`/`db` is a 2-bit channel delta from the
//! previous pixel, biased by +2, covering -2..1.
//!
//! ```plain
//! .- LUMA ------------------------------------------------.
//! |         Byte[0]         |         Byte[1]             |
//! |  7  6  5  4  3  2  1  0 |  7  6  5  4  3  2  1  0     |
//! |-------+-----------------+-------------+---------------|
//! |  1  0 |       dg        |   dr - dg   |    db - dg    |
//! `---------------------------------------------------------`
//! ```
//! 2-bit tag `10`; 6-bit `dg` biased by +32 (-32..31), two 4-bit residuals
//! biased by +8 (-8..7) each.
//!
//! ```plain
//! .- RUN -------------------.
//! |         Byte[0]         |
//! |  7  6  5  4  3  2  1  0 |
//! |-------+-----------------|
//! |  1  1 |       run       |
//! `-------------------------`
//! ```
//! 2-bit tag `11`; 6-bit run length biased by -1, covering 1..62 repeats of
//! the previous pixel. Values `0x3E`/`0x3F` are reserved for the two 8-bit
//! tags below and never appear as run lengths.
//!
//! ```plain
//! .- RGB -------------------------------------------.
//! |  Byte[0] | Byte[1] | Byte[2] | Byte[3]           |
//! | 11111110 |    r    |    g    |    b              |
//! `----------------------------------------------------`
//! ```
//! 8-bit tag `0xFE`, full replacement of r/g/b; alpha is unchanged.
//!
//! ```plain
//! .- RGBA ------------------------------------------------------.
//! |  Byte[0] | Byte[1] | Byte[2] | Byte[3] | Byte[4]             |
//! | 11111111 |    r    |    g    |    b    |    a                |
//! `------------------------------------------------------------------`
//! ```
//! 8-bit tag `0xFF`, full replacement of r/g/b/a.
//!
//! The chunk stream is followed by an 8-byte end marker,
//! `00 00 00 00 00 00 00 01`.
//!
//! # Features
//!
//! `std` (default) pulls in `alloc` and enables `snafu`'s
//! `std::error::Error` impls on [`error::EncodeError`]/[`error::DecodeError`].
//! `alloc` alone is enough to build and run the codec itself.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

mod error;
mod header;
mod pixel;
mod predictor;

#[cfg(feature = "alloc")]
mod decode;
#[cfg(feature = "alloc")]
mod encode;

pub use error::{DecodeError, EncodeError};
pub use header::ImageDescriptor;
pub use pixel::Pixel;

#[cfg(feature = "alloc")]
pub use decode::decode;
#[cfg(feature = "alloc")]
pub use encode::encode;
