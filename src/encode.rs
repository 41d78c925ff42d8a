use alloc::string::String;
use alloc::vec::Vec;
use enough::Stop;

use crate::diagnostics::IntegrityWarning;
use crate::error::AnymapError;
use crate::image::Image;
use crate::pixel::{Encoding, SampleWidth};
use crate::pnm::{self, Magic};

/// Encoded file bytes plus the header values that were chosen.
#[derive(Clone, Debug)]
pub struct EncodeOutput {
    pub bytes: Vec<u8>,
    pub magic: Magic,
    /// Max value written to the header, recomputed from the samples.
    pub header_max: i32,
    /// Bytes per binary sample; 0 for ASCII.
    pub sample_bytes: usize,
    /// Non-fatal problems found while encoding. Each was also logged.
    pub warnings: Vec<IntegrityWarning>,
}

/// Encode request builder.
#[derive(Clone, Debug)]
pub struct EncodeRequest {
    encoding: Encoding,
    sample_width: SampleWidth,
    comment: Option<String>,
}

impl EncodeRequest {
    /// P2 (gray) or P3 (color) decimal text.
    pub fn ascii() -> Self {
        Self {
            encoding: Encoding::Ascii,
            sample_width: SampleWidth::Standard,
            comment: None,
        }
    }

    /// P5 (gray) or P6 (color) raw samples, 1 or 2 bytes by max value.
    pub fn binary() -> Self {
        Self {
            encoding: Encoding::Binary,
            sample_width: SampleWidth::Standard,
            comment: None,
        }
    }

    /// Binary output with an explicit sample width.
    ///
    /// Files written with [`SampleWidth::Wide16`] or [`SampleWidth::Wide32`]
    /// must be read back with the same width.
    pub fn binary_with_width(sample_width: SampleWidth) -> Self {
        Self {
            sample_width,
            ..Self::binary()
        }
    }

    /// Replace the default `# created by ...` comment line.
    ///
    /// Line breaks inside the comment are turned into spaces.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn encode(&self, image: &Image, stop: impl Stop) -> Result<EncodeOutput, AnymapError> {
        pnm::encode(
            image,
            self.encoding,
            self.sample_width,
            self.comment.as_deref(),
            &stop,
        )
    }
}
