//! PNM family: P2/P5 (PGM) and P3/P6 (PPM), ASCII and binary.
//!
//! Files are a short line-oriented text header followed by the payload:
//!
//! ```text
//! P5
//! # comments may precede any of the header lines
//! 640 480
//! 255
//! <payload>
//! ```
//!
//! Binary samples are 1 byte when the max value is below 256 and 2 bytes
//! big-endian otherwise. Two non-standard binary extensions reuse P5/P6 with
//! fixed 2-byte or 4-byte samples; they are only read when the caller asks
//! for them through [`SampleWidth`](crate::SampleWidth).

mod decode;
mod encode;
pub(crate) mod header;

use alloc::vec::Vec;
use core::fmt;

use crate::decode::DecodeOutput;
use crate::diagnostics::{Diagnostics, IntegrityWarning};
use crate::encode::EncodeOutput;
use crate::error::AnymapError;
use crate::image::Image;
use crate::limits::Limits;
use crate::pixel::{Channels, Encoding, SampleWidth};
use enough::Stop;

/// The four supported magic numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Magic {
    /// ASCII grayscale.
    P2,
    /// ASCII RGB.
    P3,
    /// Binary grayscale.
    P5,
    /// Binary RGB.
    P6,
}

impl Magic {
    pub fn channels(self) -> Channels {
        match self {
            Magic::P2 | Magic::P5 => Channels::Gray,
            Magic::P3 | Magic::P6 => Channels::Rgb,
        }
    }

    pub fn encoding(self) -> Encoding {
        match self {
            Magic::P2 | Magic::P3 => Encoding::Ascii,
            Magic::P5 | Magic::P6 => Encoding::Binary,
        }
    }

    pub fn from_parts(channels: Channels, encoding: Encoding) -> Self {
        match (channels, encoding) {
            (Channels::Gray, Encoding::Ascii) => Magic::P2,
            (Channels::Rgb, Encoding::Ascii) => Magic::P3,
            (Channels::Gray, Encoding::Binary) => Magic::P5,
            (Channels::Rgb, Encoding::Binary) => Magic::P6,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Magic::P2 => "P2",
            Magic::P3 => "P3",
            Magic::P5 => "P5",
            Magic::P6 => "P6",
        }
    }

    pub(crate) fn parse(token: &[u8]) -> Option<Self> {
        match token {
            b"P2" => Some(Magic::P2),
            b"P3" => Some(Magic::P3),
            b"P5" => Some(Magic::P5),
            b"P6" => Some(Magic::P6),
            _ => None,
        }
    }
}

impl fmt::Display for Magic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed PNM header (internal).
pub(crate) struct PnmHeader {
    pub magic: Magic,
    pub width: u32,
    pub height: u32,
    pub declared_max: i64,
    /// Byte offset just past the max-value line.
    pub data_offset: usize,
}

/// Decode options collected by [`DecodeRequest`](crate::DecodeRequest).
pub(crate) struct DecodeOptions<'a> {
    pub limits: Option<&'a Limits>,
    pub sample_width: SampleWidth,
    pub strict: bool,
}

/// Decode PNM data (called from DecodeRequest).
pub(crate) fn decode(
    data: &[u8],
    options: &DecodeOptions<'_>,
    stop: &dyn Stop,
) -> Result<DecodeOutput, AnymapError> {
    let header = header::parse_header(data)?;

    let unlimited = Limits::default();
    let limits = options.limits.unwrap_or(&unlimited);
    let channels = header.magic.channels();
    let count = limits.check(header.width, header.height, channels)?;

    stop.check()?;

    let samples = match header.magic.encoding() {
        Encoding::Ascii => decode::decode_ascii(data, &header, count, stop)?,
        Encoding::Binary => {
            let bytes = options.sample_width.bytes_for(header.declared_max);
            decode::decode_binary(data, &header, count, bytes, stop)?
        }
    };

    let mut diagnostics = Diagnostics::default();
    if i64::from(samples.max) != header.declared_max {
        let warning = IntegrityWarning::DeclaredMaxMismatch {
            declared: header.declared_max,
            observed: samples.max,
        };
        if options.strict {
            return Err(AnymapError::Integrity(warning));
        }
        diagnostics.warn("decode", warning);
    }

    log::debug!(
        "decoded {} {}x{}: {} samples in {}..={}",
        header.magic,
        header.width,
        header.height,
        count,
        samples.min,
        samples.max
    );

    Ok(DecodeOutput {
        image: Image::from_decoded(
            header.width,
            header.height,
            channels,
            samples.values,
            samples.min,
            samples.max,
        ),
        magic: header.magic,
        declared_max: header.declared_max,
        warnings: diagnostics.into_vec(),
    })
}

/// Encode an image to PNM (called from EncodeRequest).
pub(crate) fn encode(
    image: &Image,
    encoding: Encoding,
    sample_width: SampleWidth,
    comment: Option<&str>,
    stop: &dyn Stop,
) -> Result<EncodeOutput, AnymapError> {
    let mut diagnostics = Diagnostics::default();
    let (bytes, header_max, sample_bytes) =
        encode::encode_pnm(image, encoding, sample_width, comment, &mut diagnostics, stop)?;
    Ok(EncodeOutput {
        bytes,
        magic: Magic::from_parts(image.channels(), encoding),
        header_max,
        sample_bytes,
        warnings: diagnostics.into_vec(),
    })
}

/// Decoded samples with their observed range.
#[derive(Debug)]
pub(crate) struct Samples {
    pub values: Vec<i32>,
    pub min: i32,
    pub max: i32,
}
