/// Samples per pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channels {
    /// One gray sample per pixel (PGM).
    Gray = 1,
    /// Interleaved R, G, B samples per pixel (PPM).
    Rgb = 3,
}

impl Channels {
    /// Number of samples per pixel.
    pub fn count(self) -> usize {
        self as usize
    }

    /// Map a raw samples-per-pixel count; only 1 and 3 are valid.
    pub fn from_count(count: usize) -> Option<Self> {
        match count {
            1 => Some(Self::Gray),
            3 => Some(Self::Rgb),
            _ => None,
        }
    }
}

/// How samples are stored in the payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Decimal text tokens (P2, P3).
    Ascii,
    /// Raw fixed-width samples (P5, P6).
    Binary,
}

/// Byte width of binary samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SampleWidth {
    /// 1 byte when the max value is below 256, otherwise 2 bytes big-endian.
    #[default]
    Standard,
    /// Always 2 bytes big-endian, whatever the max value (non-standard).
    Wide16,
    /// Always 4 bytes in native byte order (non-standard).
    ///
    /// Only files written by this crate on a machine with the same byte
    /// order can be read back.
    Wide32,
}

impl SampleWidth {
    /// Bytes per sample for a given max value.
    pub fn bytes_for(self, max: i64) -> usize {
        match self {
            SampleWidth::Standard if max < 256 => 1,
            SampleWidth::Standard | SampleWidth::Wide16 => 2,
            SampleWidth::Wide32 => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_at_256() {
        assert_eq!(SampleWidth::Standard.bytes_for(0), 1);
        assert_eq!(SampleWidth::Standard.bytes_for(255), 1);
        assert_eq!(SampleWidth::Standard.bytes_for(256), 2);
        assert_eq!(SampleWidth::Standard.bytes_for(32767), 2);
        assert_eq!(SampleWidth::Wide16.bytes_for(10), 2);
        assert_eq!(SampleWidth::Wide32.bytes_for(10), 4);
    }

    #[test]
    fn channel_counts() {
        assert_eq!(Channels::from_count(1), Some(Channels::Gray));
        assert_eq!(Channels::from_count(3), Some(Channels::Rgb));
        assert_eq!(Channels::from_count(4), None);
        assert_eq!(Channels::Rgb.count(), 3);
    }
}
