//! The decoder: chunk stream in, pixel buffer out.
//!
//! Unlike the teacher's `_unchecked` fast paths, every read here is bounds
//! checked. A chunk stream that runs out of bytes mid-payload is not an
//! error: decoding falls back to repeating the last decoded pixel for the
//! remaining output, matching how a reference SLOF decoder with no
//! end-of-buffer checks would behave when it silently reads stale/zeroed
//! trailing bytes.

use alloc::{vec, vec::Vec};
use snafu::ensure;

use crate::error::{BadRequestedChannelsSnafu, DecodeError, InputTooShortSnafu};
use crate::header::{self, ImageDescriptor, END_MARKER, HEADER_SIZE};
use crate::pixel::Pixel;
use crate::predictor::PredictorState;

const OP_RGB: u8 = 0xFE;
const OP_RGBA: u8 = 0xFF;
const OP_INDEX: u8 = 0x00;
const OP_DIFF: u8 = 0x40;
const OP_LUMA: u8 = 0x80;
const TAG_MASK: u8 = 0xC0;

#[inline]
fn apply_diff(prev: Pixel, dr: i8, dg: i8, db: i8) -> Pixel {
    Pixel::new(
        prev.r.wrapping_add(dr as u8),
        prev.g.wrapping_add(dg as u8),
        prev.b.wrapping_add(db as u8),
        prev.a,
    )
}

/// Decodes a `header ∥ chunks ∥ end marker` byte buffer.
///
/// `requested_channels` must be `0` (use the header's own channel count),
/// `3`, or `4`; it controls only the shape of the *output* buffer, never
/// how the chunk stream itself is interpreted.
pub fn decode(
    data: &[u8],
    requested_channels: u8,
) -> Result<(Vec<u8>, ImageDescriptor), DecodeError> {
    ensure!(
        matches!(requested_channels, 0 | 3 | 4),
        BadRequestedChannelsSnafu {
            channels: requested_channels,
        }
    );
    ensure!(
        data.len() >= HEADER_SIZE + END_MARKER.len(),
        InputTooShortSnafu { len: data.len() }
    );

    let desc = header::parse(&data[..HEADER_SIZE])?;
    log::debug!(
        "decode: {}x{} channels={} colorspace={}",
        desc.width,
        desc.height,
        desc.channels,
        desc.colorspace
    );

    let out_channels = if requested_channels == 0 {
        desc.channels
    } else {
        requested_channels
    } as usize;

    let pixel_count = desc.pixel_count() as usize;
    let mut out = vec![0u8; pixel_count * out_channels];

    let chunks = &data[HEADER_SIZE..];
    let chunks_len = chunks.len().saturating_sub(END_MARKER.len());

    let mut state = PredictorState::new();
    let mut run: u32 = 0;
    let mut p = 0usize;

    for i in 0..pixel_count {
        if run > 0 {
            run -= 1;
        } else if p < chunks_len {
            let tag = chunks[p];
            p += 1;

            match tag {
                OP_RGBA => match chunks.get(p..p + 4) {
                    Some(bytes) => {
                        state.prev = Pixel::new(bytes[0], bytes[1], bytes[2], bytes[3]);
                        p += 4;
                    }
                    None => {
                        log::warn!("decode: truncated RGBA chunk at pixel {i}, repeating last pixel");
                        p = chunks_len;
                    }
                },
                OP_RGB => match chunks.get(p..p + 3) {
                    Some(bytes) => {
                        state.prev = Pixel::new(bytes[0], bytes[1], bytes[2], state.prev.a);
                        p += 3;
                    }
                    None => {
                        log::warn!("decode: truncated RGB chunk at pixel {i}, repeating last pixel");
                        p = chunks_len;
                    }
                },
                _ if tag & TAG_MASK == OP_INDEX => {
                    state.prev = state.index[tag as usize];
                }
                _ if tag & TAG_MASK == OP_DIFF => {
                    let dr = ((tag >> 4) & 0x3) as i8 - 2;
                    let dg = ((tag >> 2) & 0x3) as i8 - 2;
                    let db = (tag & 0x3) as i8 - 2;
                    state.prev = apply_diff(state.prev, dr, dg, db);
                }
                _ if tag & TAG_MASK == OP_LUMA => match chunks.get(p) {
                    Some(&second) => {
                        p += 1;
                        let vg = (tag & 0x3F) as i8 - 32;
                        let dr_dg = ((second >> 4) & 0xF) as i8 - 8;
                        let db_dg = (second & 0xF) as i8 - 8;
                        let dr = vg.wrapping_add(dr_dg);
                        let db = vg.wrapping_add(db_dg);
                        state.prev = apply_diff(state.prev, dr, vg, db);
                    }
                    None => {
                        log::warn!("decode: truncated LUMA chunk at pixel {i}, repeating last pixel");
                        p = chunks_len;
                    }
                },
                _ => {
                    // Top bits 11, neither 0xFE nor 0xFF: a run length.
                    run = (tag & 0x3F) as u32;
                }
            }

            // Unconditional, including for a RUN tag: a no-op rewrite of
            // the slot the current pixel already occupies.
            state.remember(state.prev);
        }

        let o = i * out_channels;
        out[o] = state.prev.r << 1;
        out[o + 1] = state.prev.g << 1;
        out[o + 2] = state.prev.b << 1;
        if out_channels == 4 {
            out[o + 3] = state.prev.a;
        }
    }

    Ok((out, desc))
}
