//! Sample decoding for ASCII (P2/P3) and binary (P5/P6) payloads.

use alloc::vec::Vec;
use enough::Stop;

use super::{PnmHeader, Samples};
use crate::error::{AnymapError, FormatError};

/// Running min/max over decoded samples.
struct Range {
    min: i32,
    max: i32,
}

impl Range {
    fn new() -> Self {
        Self {
            min: i32::MAX,
            max: i32::MIN,
        }
    }

    fn push(&mut self, value: i32) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    fn finish(self, values: Vec<i32>) -> Samples {
        Samples {
            values,
            min: self.min,
            max: self.max,
        }
    }
}

/// Samples per row, for periodic stop checks.
fn row_len(header: &PnmHeader) -> usize {
    (header.width as usize * header.magic.channels().count()).max(1)
}

/// Read `count` decimal tokens starting right after the header.
///
/// A token is a maximal run of ASCII digits. Anything else between tokens
/// (whitespace, stray punctuation) is skipped.
pub(crate) fn decode_ascii(
    data: &[u8],
    header: &PnmHeader,
    count: usize,
    stop: &dyn Stop,
) -> Result<Samples, AnymapError> {
    let body = data.get(header.data_offset..).unwrap_or_default();
    // Every token is at least one byte, so the body bounds the allocation.
    let mut values = Vec::with_capacity(count.min(body.len()));
    let mut range = Range::new();
    let check_every = row_len(header).saturating_mul(16);
    let mut pos = 0;

    for index in 0..count {
        if index % check_every == 0 {
            stop.check()?;
        }
        while body.get(pos).is_some_and(|b| !b.is_ascii_digit()) {
            pos += 1;
        }
        if pos >= body.len() {
            return Err(AnymapError::truncated(count, index));
        }
        let mut value: i32 = 0;
        while let Some(&b) = body.get(pos).filter(|b| b.is_ascii_digit()) {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(i32::from(b - b'0')))
                .ok_or(FormatError::SampleOutOfRange { index })?;
            pos += 1;
        }
        range.push(value);
        values.push(value);
    }

    Ok(range.finish(values))
}

/// Read `count` fixed-width samples from the end of the file.
///
/// The payload offset is inferred as `len - count * sample_bytes` rather
/// than taken from the header cursor, so any amount of padding after the
/// max-value line is tolerated. The cursor is still used as a lower bound:
/// a payload that would overlap the header means the file is short.
pub(crate) fn decode_binary(
    data: &[u8],
    header: &PnmHeader,
    count: usize,
    sample_bytes: usize,
    stop: &dyn Stop,
) -> Result<Samples, AnymapError> {
    let payload_len = count
        .checked_mul(sample_bytes)
        .ok_or(AnymapError::DimensionsTooLarge {
            width: header.width,
            height: header.height,
        })?;
    let offset = data
        .len()
        .checked_sub(payload_len)
        .filter(|&off| off >= header.data_offset)
        .ok_or_else(|| {
            let available = data.len().saturating_sub(header.data_offset) / sample_bytes;
            AnymapError::truncated(count, available)
        })?;
    let payload = &data[offset..];

    let mut values = Vec::with_capacity(count);
    let mut range = Range::new();
    let row_bytes = row_len(header) * sample_bytes;

    for (row_idx, row) in payload.chunks(row_bytes).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        for chunk in row.chunks_exact(sample_bytes) {
            let value = match *chunk {
                [b] => i32::from(b),
                [hi, lo] => i32::from(u16::from_be_bytes([hi, lo])),
                [a, b, c, d] => i32::from_ne_bytes([a, b, c, d]),
                _ => unreachable!("sample width is 1, 2 or 4 bytes"),
            };
            range.push(value);
            values.push(value);
        }
    }

    if values.len() != count {
        return Err(AnymapError::truncated(count, values.len()));
    }

    Ok(range.finish(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pnm::header::parse_header;
    use enough::Unstoppable;

    fn ascii(data: &[u8]) -> Result<Samples, AnymapError> {
        let header = parse_header(data).unwrap();
        let count = header.width as usize
            * header.height as usize
            * header.magic.channels().count();
        decode_ascii(data, &header, count, &Unstoppable)
    }

    fn binary(data: &[u8], sample_bytes: usize) -> Result<Samples, AnymapError> {
        let header = parse_header(data).unwrap();
        let count = header.width as usize
            * header.height as usize
            * header.magic.channels().count();
        decode_binary(data, &header, count, sample_bytes, &Unstoppable)
    }

    #[test]
    fn ascii_tokens_across_lines() {
        let s = ascii(b"P2\n3 2\n90\n0 1\n  2\n\n3\t4 90\n").unwrap();
        assert_eq!(s.values, [0, 1, 2, 3, 4, 90]);
        assert_eq!((s.min, s.max), (0, 90));
    }

    #[test]
    fn ascii_skips_non_digits() {
        let s = ascii(b"P3\n1 1\n255\n255,0;128").unwrap();
        assert_eq!(s.values, [255, 0, 128]);
    }

    #[test]
    fn ascii_truncated() {
        let err = ascii(b"P2\n2 2\n9\n1 2 3\n").unwrap_err();
        assert!(matches!(
            err,
            AnymapError::Format(FormatError::TruncatedData {
                expected: 4,
                found: 3
            })
        ));
    }

    #[test]
    fn ascii_overflow() {
        let err = ascii(b"P2\n2 1\n9\n1 99999999999\n").unwrap_err();
        assert!(matches!(
            err,
            AnymapError::Format(FormatError::SampleOutOfRange { index: 1 })
        ));
    }

    #[test]
    fn binary_one_byte() {
        let s = binary(b"P5\n3 1\n200\n\x00\x64\xc8", 1).unwrap();
        assert_eq!(s.values, [0, 100, 200]);
        assert_eq!((s.min, s.max), (0, 200));
    }

    #[test]
    fn binary_two_bytes_big_endian() {
        let s = binary(b"P5\n2 1\n300\n\x00\x0a\x01\x2c", 2).unwrap();
        assert_eq!(s.values, [10, 300]);
        assert_eq!((s.min, s.max), (10, 300));
    }

    #[test]
    fn binary_four_bytes_native() {
        let mut data = b"P5\n2 1\n70000\n".to_vec();
        data.extend_from_slice(&5i32.to_ne_bytes());
        data.extend_from_slice(&70000i32.to_ne_bytes());
        let s = binary(&data, 4).unwrap();
        assert_eq!(s.values, [5, 70000]);
    }

    #[test]
    fn binary_offset_inferred_from_length() {
        // Two stray bytes after the max line are skipped as header.
        let s = binary(b"P5\n2 1\n255\n\r\n\x07\x09", 1).unwrap();
        assert_eq!(s.values, [7, 9]);
    }

    #[test]
    fn binary_short_file() {
        let err = binary(b"P6\n2 2\n255\n\x01\x02\x03", 1).unwrap_err();
        assert!(matches!(
            err,
            AnymapError::Format(FormatError::TruncatedData {
                expected: 12,
                found: 3
            })
        ));
    }

    #[test]
    fn binary_payload_may_not_overlap_header() {
        // Long enough overall, but the data region would start inside "255\n".
        let err = binary(b"P5\n4 1\n255\n\x01\x02", 1).unwrap_err();
        assert!(matches!(
            err,
            AnymapError::Format(FormatError::TruncatedData { .. })
        ));
    }
}
