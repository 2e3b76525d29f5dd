//! Tiered run length encoding of one bitmap plane
//!
//! # Encoding
//!
//! The plane is consumed left to right. At each position the run of equal
//! pixels starting there is counted (capped at 65535) and one of four forms
//! is written:
//!
//! ```text
//! run < 7         1PPP PPPP                   7 raw pixels, MSB first
//! 7 ..= 31        0VLL LLLL                   run in the low 6 bits
//! 32 ..= 255      0V00 0001 LLLL LLLL         one byte run
//! 256 ..= 65535   0V00 0000 LLLL LLLL x2      two byte run, little endian
//! ```
//!
//! `V` is the pixel value, 1 for inked. A pattern byte always advances seven
//! pixels (fewer at the end of the plane), reading past the short run into
//! whatever follows. Runs of 2 to 6 never appear in the low bits because
//! those lengths go through a pattern byte instead.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use tracing::debug;

use crate::constants::rle::{LONG_RUN_MAX, MEDIUM_RUN_MAX, PATTERN_PIXELS, SHORT_RUN_MAX};
use crate::error::{Error, Result};

/// Top bit marks a raw pixel pattern
const PATTERN_FLAG: u8 = 0x80;

/// Pixel value of a run
const VALUE_BIT: u8 = 0x40;

/// Low six bits of a run header
const LENGTH_MASK: u8 = 0x3F;

/// Run header followed by a two byte length
const LONG_MARKER: u8 = 0x00;

/// Run header followed by a one byte length
const MEDIUM_MARKER: u8 = 0x01;

/// Count equal pixels starting at `start`, capped at 65535
fn run_length(pixels: &[bool], start: usize) -> usize {
    let value = pixels[start];
    pixels[start..]
        .iter()
        .take(LONG_RUN_MAX)
        .take_while(|&&p| p == value)
        .count()
}

fn run_header(value: bool) -> u8 {
    if value { VALUE_BIT } else { 0 }
}

/// Compress one plane
///
/// # Examples
///
/// ```
/// use esl_core::rle;
///
/// // Seven inked pixels fit a single short run byte
/// assert_eq!(rle::compress(&[true; 7]).as_ref(), &[0x47]);
///
/// // One inked pixel followed by white is packed as a pattern
/// let mut plane = vec![false; 20];
/// plane[0] = true;
/// assert_eq!(rle::compress(&plane).as_ref(), &[0xC0, 0x0D]);
/// ```
pub fn compress(pixels: &[bool]) -> Bytes {
    let mut buf = BytesMut::with_capacity(pixels.len() / 8 + 3);
    let mut pos = 0;

    while pos < pixels.len() {
        let value = pixels[pos];
        let run = run_length(pixels, pos);

        if run < PATTERN_PIXELS {
            let take = PATTERN_PIXELS.min(pixels.len() - pos);
            let byte = pixels[pos..pos + take]
                .iter()
                .enumerate()
                .filter(|&(_, &p)| p)
                .fold(PATTERN_FLAG, |byte, (k, _)| byte | (VALUE_BIT >> k));
            buf.put_u8(byte);
            pos += take;
            continue;
        }

        if run <= SHORT_RUN_MAX {
            buf.put_u8(run_header(value) | run as u8);
        } else if run <= MEDIUM_RUN_MAX {
            buf.put_u8(run_header(value) | MEDIUM_MARKER);
            buf.put_u8(run as u8);
        } else {
            buf.put_u8(run_header(value) | LONG_MARKER);
            buf.put_u16_le(run as u16);
        }
        pos += run;
    }

    debug!(
        pixels = pixels.len(),
        compressed = buf.len(),
        "Compressed bitmap plane"
    );

    buf.freeze()
}

/// Expand a compressed plane back to `pixel_count` pixels
///
/// Pattern bytes contribute seven pixels, or only what is left of the plane
/// when fewer remain. The data must cover the plane exactly.
pub fn decompress(data: &[u8], pixel_count: usize) -> Result<Vec<bool>> {
    let mut pixels = Vec::with_capacity(pixel_count);
    let mut buf = data;

    while buf.has_remaining() {
        let offset = data.len() - buf.remaining();
        if pixels.len() >= pixel_count {
            return Err(Error::MalformedRle {
                offset,
                reason: "data continues past the last pixel",
            });
        }

        let byte = buf.get_u8();
        if byte & PATTERN_FLAG != 0 {
            let take = PATTERN_PIXELS.min(pixel_count - pixels.len());
            pixels.extend((0..take).map(|k| byte & (VALUE_BIT >> k) != 0));
            continue;
        }

        let value = byte & VALUE_BIT != 0;
        let run = match byte & LENGTH_MASK {
            LONG_MARKER => {
                if buf.remaining() < 2 {
                    return Err(Error::MalformedRle {
                        offset,
                        reason: "truncated two byte run length",
                    });
                }
                buf.get_u16_le() as usize
            }
            MEDIUM_MARKER => {
                if buf.remaining() < 1 {
                    return Err(Error::MalformedRle {
                        offset,
                        reason: "truncated one byte run length",
                    });
                }
                buf.get_u8() as usize
            }
            short => short as usize,
        };

        if run == 0 {
            return Err(Error::MalformedRle {
                offset,
                reason: "zero length run",
            });
        }
        if pixels.len() + run > pixel_count {
            return Err(Error::MalformedRle {
                offset,
                reason: "run overflows the plane",
            });
        }
        pixels.resize(pixels.len() + run, value);
    }

    if pixels.len() != pixel_count {
        return Err(Error::MalformedRle {
            offset: data.len(),
            reason: "data ends before the last pixel",
        });
    }

    Ok(pixels)
}
