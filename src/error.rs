use alloc::string::String;
use enough::StopReason;

use crate::diagnostics::IntegrityWarning;

/// Header or payload defects found while decoding.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum FormatError {
    #[error("no magic number before end of input")]
    MissingMagic,

    #[error("unsupported magic number {0:?} (expected P2, P3, P5 or P6)")]
    UnsupportedMagic(String),

    #[error("malformed dimension line: {0}")]
    MalformedDimensions(String),

    #[error("malformed max value line: {0}")]
    MalformedMaxValue(String),

    #[error("truncated sample data: need {expected} samples, found {found}")]
    TruncatedData { expected: usize, found: usize },

    #[error("sample {index} does not fit in a 32-bit signed integer")]
    SampleOutOfRange { index: usize },
}

/// Which filesystem step failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IoOperation {
    Open,
    Read,
    Write,
}

impl core::fmt::Display for IoOperation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            IoOperation::Open => "open",
            IoOperation::Read => "read",
            IoOperation::Write => "write",
        })
    }
}

/// Errors from PNM decoding and encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AnymapError {
    #[error("invalid PNM data: {0}")]
    Format(#[from] FormatError),

    #[error("failed to {op} {}: {source}", .path.display())]
    Io {
        op: IoOperation,
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid image: {0}")]
    InvalidImage(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("integrity check failed: {0}")]
    Integrity(IntegrityWarning),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl AnymapError {
    /// The format defect, if this error came from malformed input.
    pub fn format_error(&self) -> Option<&FormatError> {
        match self {
            AnymapError::Format(e) => Some(e),
            _ => None,
        }
    }

    pub(crate) fn truncated(expected: usize, found: usize) -> Self {
        AnymapError::Format(FormatError::TruncatedData { expected, found })
    }
}

impl From<StopReason> for AnymapError {
    fn from(r: StopReason) -> Self {
        AnymapError::Cancelled(r)
    }
}
