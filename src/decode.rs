use alloc::vec::Vec;
use enough::Stop;

use crate::diagnostics::IntegrityWarning;
use crate::error::AnymapError;
use crate::image::Image;
use crate::limits::Limits;
use crate::pixel::SampleWidth;
use crate::pnm::{self, DecodeOptions, Magic};

/// Decoded image plus what the header said about it.
#[derive(Clone, Debug)]
pub struct DecodeOutput {
    pub image: Image,
    /// Magic number the file was read as.
    pub magic: Magic,
    /// Max value from the header (may differ from `image.max()`).
    pub declared_max: i64,
    /// Non-fatal problems found while decoding. Each was also logged.
    pub warnings: Vec<IntegrityWarning>,
}

impl DecodeOutput {
    /// Take the image, discarding header metadata and warnings.
    pub fn into_image(self) -> Image {
        self.image
    }
}

/// Decode request builder.
///
/// ```no_run
/// use zenanymap::{DecodeRequest, Limits, Unstoppable};
///
/// let data: &[u8] = &[]; // your PGM/PPM bytes
/// let limits = Limits { max_pixels: Some(1 << 24), ..Default::default() };
/// let decoded = DecodeRequest::new(data)
///     .with_limits(&limits)
///     .strict(true)
///     .decode(Unstoppable)?;
/// println!("{}x{}", decoded.image.width(), decoded.image.height());
/// # Ok::<(), zenanymap::AnymapError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    sample_width: SampleWidth,
    strict: bool,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            sample_width: SampleWidth::Standard,
            strict: false,
        }
    }

    /// Reject images exceeding these limits before allocating.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Read binary payloads with a fixed sample width.
    ///
    /// [`SampleWidth::Wide16`] and [`SampleWidth::Wide32`] read the
    /// non-standard extensions; the magic number cannot tell them apart from
    /// ordinary P5/P6 files. ASCII files ignore this setting.
    pub fn with_sample_width(mut self, sample_width: SampleWidth) -> Self {
        self.sample_width = sample_width;
        self
    }

    /// Fail with [`AnymapError::Integrity`] when the decoded max differs
    /// from the header's max value instead of only warning.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn decode(self, stop: impl Stop) -> Result<DecodeOutput, AnymapError> {
        let options = DecodeOptions {
            limits: self.limits,
            sample_width: self.sample_width,
            strict: self.strict,
        };
        pnm::decode(self.data, &options, &stop)
    }
}
