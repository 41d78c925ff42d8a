//! # zenanymap
//!
//! PGM and PPM (Portable Anymap) decoder and encoder.
//!
//! Samples are kept as a flat `i32` buffer, so the same [`Image`] type
//! carries 8-bit, 16-bit and wider data.
//!
//! ## Supported Formats
//!
//! - **P2** / **P3** — ASCII grayscale / RGB
//! - **P5** / **P6** — binary grayscale / RGB, 1 byte per sample when the
//!   max value is below 256, otherwise 2 bytes big-endian
//! - **Wide16** / **Wide32** — non-standard P5/P6 payloads with a fixed
//!   2-byte (big-endian) or 4-byte (native order) sample width, selected
//!   explicitly with [`SampleWidth`]
//!
//! ## Non-Goals
//!
//! - PBM (P1, P4) and PAM (P7)
//! - Samples wider than 32 bits
//! - Streaming decode
//!
//! ## Diagnostics
//!
//! Suspicious but readable input (a header max that disagrees with the data,
//! negative samples on encode) produces an [`IntegrityWarning`]. Warnings are
//! logged through the [`log`] facade and returned with the result;
//! [`DecodeRequest::strict`] turns the max mismatch into an error.
//!
//! ## Usage
//!
//! ```no_run
//! use zenanymap::{Channels, EncodeRequest, Image, Unstoppable};
//!
//! let image = Image::from_samples(2, 1, Channels::Gray, vec![10, 300])?;
//! let encoded = EncodeRequest::binary().encode(&image, Unstoppable)?;
//! assert_eq!(encoded.header_max, 300);
//! assert_eq!(encoded.sample_bytes, 2);
//!
//! let decoded = zenanymap::decode(&encoded.bytes, Unstoppable)?;
//! assert_eq!(decoded.image.samples(), &[10, 300]);
//! # Ok::<(), zenanymap::AnymapError>(())
//! ```

#![forbid(unsafe_code)]

extern crate alloc;

mod diagnostics;
mod error;
mod image;
mod info;
mod limits;
mod pixel;

pub mod pnm;

mod decode;
mod encode;

mod fs;

use alloc::vec::Vec;

// Re-exports
pub use decode::{DecodeOutput, DecodeRequest};
pub use diagnostics::IntegrityWarning;
pub use encode::{EncodeOutput, EncodeRequest};
pub use enough::{Stop, Unstoppable};
pub use error::{AnymapError, FormatError, IoOperation};
pub use fs::{decode_file, decode_wide_file, encode_ascii_file, encode_binary_file};
pub use image::Image;
pub use info::ImageInfo;
pub use limits::Limits;
pub use pixel::{Channels, Encoding, SampleWidth};
pub use pnm::Magic;

/// Decode P2, P3, P5 or P6 bytes.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<DecodeOutput, AnymapError> {
    DecodeRequest::new(data).decode(stop)
}

/// Decode with resource limits checked before allocation.
pub fn decode_with_limits(
    data: &[u8],
    limits: &Limits,
    stop: impl Stop,
) -> Result<DecodeOutput, AnymapError> {
    DecodeRequest::new(data).with_limits(limits).decode(stop)
}

/// Decode a binary file that uses a fixed non-standard sample width.
pub fn decode_wide(
    data: &[u8],
    sample_width: SampleWidth,
    stop: impl Stop,
) -> Result<DecodeOutput, AnymapError> {
    DecodeRequest::new(data)
        .with_sample_width(sample_width)
        .decode(stop)
}

/// Encode as P2 (gray) or P3 (color).
pub fn encode_ascii(image: &Image, stop: impl Stop) -> Result<Vec<u8>, AnymapError> {
    Ok(EncodeRequest::ascii().encode(image, stop)?.bytes)
}

/// Encode as P5 (gray) or P6 (color) with the given sample width.
pub fn encode_binary(
    image: &Image,
    sample_width: SampleWidth,
    stop: impl Stop,
) -> Result<Vec<u8>, AnymapError> {
    Ok(EncodeRequest::binary_with_width(sample_width)
        .encode(image, stop)?
        .bytes)
}
