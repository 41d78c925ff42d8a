use alloc::format;

use crate::error::AnymapError;
use crate::image::sample_count;
use crate::pixel::Channels;

/// Caps applied to a decoded header before its sample buffer is allocated.
///
/// Every field defaults to `None`. Sample and memory caps count the decoded
/// `i32` buffer, so a color image costs three samples (12 bytes) per pixel
/// whatever the file's sample width.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    /// Maximum `width * height`.
    pub max_pixels: Option<u64>,
    /// Maximum `width * height * channels`.
    pub max_samples: Option<u64>,
    /// Maximum size of the decoded sample buffer in bytes.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Validate a header's geometry and return the number of samples to
    /// allocate.
    pub(crate) fn check(
        &self,
        width: u32,
        height: u32,
        channels: Channels,
    ) -> Result<usize, AnymapError> {
        if let Some(max) = self.max_width.filter(|&max| width > max) {
            return Err(exceeded("width", u64::from(width), max.into()));
        }
        if let Some(max) = self.max_height.filter(|&max| height > max) {
            return Err(exceeded("height", u64::from(height), max.into()));
        }
        let pixels = u64::from(width) * u64::from(height);
        if let Some(max) = self.max_pixels.filter(|&max| pixels > max) {
            return Err(exceeded("pixel count", pixels, max));
        }

        let count = sample_count(width, height, channels)?;
        if let Some(max) = self.max_samples.filter(|&max| count as u64 > max) {
            return Err(exceeded("sample count", count as u64, max));
        }
        let bytes = count
            .checked_mul(core::mem::size_of::<i32>())
            .ok_or(AnymapError::DimensionsTooLarge { width, height })?;
        if let Some(max) = self.max_memory_bytes.filter(|&max| bytes as u64 > max) {
            return Err(exceeded("sample buffer bytes", bytes as u64, max));
        }
        Ok(count)
    }
}

fn exceeded(what: &str, value: u64, max: u64) -> AnymapError {
    AnymapError::LimitExceeded(format!("{what} {value} exceeds limit {max}"))
}
