use alloc::vec;
use alloc::vec::Vec;

use crate::error::AnymapError;
use crate::pixel::Channels;

/// An in-memory PGM/PPM image: dimensions, channel count, and a flat
/// row-major sample buffer (R, G, B interleaved for color).
///
/// `min` and `max` are derived from the samples. Decoding fills them in;
/// after mutating samples call [`Image::recompute_range`]. Encoders always
/// recompute their own range and never trust these fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    channels: Channels,
    min: i32,
    max: i32,
    samples: Vec<i32>,
}

impl Image {
    /// Allocate a zero-filled image.
    pub fn new(width: u32, height: u32, channels: Channels) -> Result<Self, AnymapError> {
        let len = sample_count(width, height, channels)?;
        Ok(Self {
            width,
            height,
            channels,
            min: 0,
            max: 0,
            samples: vec![0; len],
        })
    }

    /// Wrap an existing sample buffer. The range is computed immediately.
    pub fn from_samples(
        width: u32,
        height: u32,
        channels: Channels,
        samples: Vec<i32>,
    ) -> Result<Self, AnymapError> {
        let len = sample_count(width, height, channels)?;
        if samples.len() != len {
            return Err(AnymapError::InvalidImage(alloc::format!(
                "{width}x{height} {channels:?} needs {len} samples, got {}",
                samples.len()
            )));
        }
        let (min, max) = sample_range(&samples);
        Ok(Self {
            width,
            height,
            channels,
            min,
            max,
            samples,
        })
    }

    /// Decoder-side constructor; the caller already tracked the range.
    pub(crate) fn from_decoded(
        width: u32,
        height: u32,
        channels: Channels,
        samples: Vec<i32>,
        min: i32,
        max: i32,
    ) -> Self {
        debug_assert_eq!(samples.len(), width as usize * height as usize * channels.count());
        Self {
            width,
            height,
            channels,
            min,
            max,
            samples,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Smallest sample as of the last decode or [`Image::recompute_range`].
    pub fn min(&self) -> i32 {
        self.min
    }

    /// Largest sample as of the last decode or [`Image::recompute_range`].
    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn samples(&self) -> &[i32] {
        &self.samples
    }

    /// Mutable access to the samples. The buffer length cannot change.
    pub fn samples_mut(&mut self) -> &mut [i32] {
        &mut self.samples
    }

    pub fn into_samples(self) -> Vec<i32> {
        self.samples
    }

    /// Samples of the pixel at (x, y), or `None` if out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[i32]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let n = self.channels.count();
        let off = (y as usize * self.width as usize + x as usize) * n;
        self.samples.get(off..off + n)
    }

    /// Recompute `min` and `max` from the current samples.
    pub fn recompute_range(&mut self) {
        let (min, max) = sample_range(&self.samples);
        self.min = min;
        self.max = max;
    }

    /// View a color image as typed RGB pixels.
    #[cfg(feature = "rgb")]
    pub fn as_rgb(&self) -> Option<&[rgb::RGB<i32>]> {
        use rgb::FromSlice as _;
        (self.channels == Channels::Rgb).then(|| self.samples.as_rgb())
    }

    /// Rows of samples as a 2-D view (`width * channels` samples per row).
    #[cfg(feature = "imgref")]
    pub fn sample_rows(&self) -> imgref::ImgRef<'_, i32> {
        imgref::ImgRef::new(
            &self.samples,
            self.width as usize * self.channels.count(),
            self.height as usize,
        )
    }

    /// A color image as a 2-D view of typed RGB pixels.
    #[cfg(feature = "imgref")]
    pub fn as_rgb_imgref(&self) -> Option<imgref::ImgRef<'_, rgb::RGB<i32>>> {
        let pixels = self.as_rgb()?;
        Some(imgref::ImgRef::new(
            pixels,
            self.width as usize,
            self.height as usize,
        ))
    }
}

/// `width * height * channels`, rejecting zero dimensions and overflow.
pub(crate) fn sample_count(width: u32, height: u32, channels: Channels) -> Result<usize, AnymapError> {
    if width == 0 || height == 0 {
        return Err(AnymapError::InvalidImage(alloc::format!(
            "dimensions must be non-zero, got {width}x{height}"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|wh| wh.checked_mul(channels.count()))
        .ok_or(AnymapError::DimensionsTooLarge { width, height })
}

/// (min, max) of a non-empty slice; (0, 0) when empty.
pub(crate) fn sample_range(samples: &[i32]) -> (i32, i32) {
    let Some(&first) = samples.first() else {
        return (0, 0);
    };
    samples
        .iter()
        .fold((first, first), |(lo, hi), &s| (lo.min(s), hi.max(s)))
}
