//! Non-fatal integrity diagnostics.
//!
//! PNM has no signed samples and no place to record a minimum, and older
//! writers are loose about the declared max value. These conditions are
//! reported instead of rejected: every warning is logged at `warn` level and
//! also handed back to the caller alongside the result.

use alloc::vec::Vec;
use core::fmt;

/// A suspicious but recoverable condition found during decode or encode.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntegrityWarning {
    /// The largest decoded sample differs from the header's max value.
    DeclaredMaxMismatch { declared: i64, observed: i32 },
    /// A sample below zero was encoded; PNM cannot represent it.
    NegativeMinimum { min: i32 },
    /// Every sample has the same value, so the header max was forced.
    FlatMaxForced { value: i32, forced: i32 },
    /// The max value does not fit the selected binary sample width.
    MaxExceedsSampleWidth { max: i32, bytes: usize },
    /// A standard 2-byte max above 32767; readers that take samples as
    /// signed 16-bit values will misread the upper half of the range.
    MaxAboveSigned16 { max: i32 },
}

impl fmt::Display for IntegrityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            IntegrityWarning::DeclaredMaxMismatch { declared, observed } => write!(
                f,
                "header declares max {declared} but largest sample is {observed}"
            ),
            IntegrityWarning::NegativeMinimum { min } => {
                write!(f, "minimum sample {min} is below zero")
            }
            IntegrityWarning::FlatMaxForced { value, forced } => write!(
                f,
                "all samples equal {value}; header max set to {forced}"
            ),
            IntegrityWarning::MaxExceedsSampleWidth { max, bytes } => write!(
                f,
                "max value {max} does not fit in {bytes}-byte samples and will be truncated"
            ),
            IntegrityWarning::MaxAboveSigned16 { max } => {
                write!(f, "max value {max} is outside the signed 16-bit range")
            }
        }
    }
}

/// Collects warnings for one decode or encode call.
#[derive(Debug, Default)]
pub(crate) struct Diagnostics {
    warnings: Vec<IntegrityWarning>,
}

impl Diagnostics {
    pub(crate) fn warn(&mut self, context: &str, warning: IntegrityWarning) {
        log::warn!("{context}: {warning}");
        self.warnings.push(warning);
    }

    pub(crate) fn into_vec(self) -> Vec<IntegrityWarning> {
        self.warnings
    }
}
