//! PNM encoder: P2, P3, P5, P6 and the wide binary extensions.

use alloc::vec::Vec;
use std::io::Write as _;

use enough::Stop;

use super::Magic;
use crate::diagnostics::{Diagnostics, IntegrityWarning};
use crate::error::AnymapError;
use crate::image::{Image, sample_range};
use crate::pixel::{Channels, Encoding, SampleWidth};

/// Header max used for images whose samples are all equal.
const FLAT_MAX: i32 = 255;

/// Encode an image, returning `(bytes, header max, bytes per sample)`.
///
/// `bytes per sample` is 0 for ASCII output.
pub(crate) fn encode_pnm(
    image: &Image,
    encoding: Encoding,
    sample_width: SampleWidth,
    comment: Option<&str>,
    diagnostics: &mut Diagnostics,
    stop: &dyn Stop,
) -> Result<(Vec<u8>, i32, usize), AnymapError> {
    let samples = image.samples();
    let context = match encoding {
        Encoding::Ascii => "encode ascii",
        Encoding::Binary => "encode binary",
    };
    let max = header_max(samples, context, diagnostics);

    let magic = Magic::from_parts(image.channels(), encoding);
    let header = header_text(image, magic, max, comment);
    let row_len = image.width() as usize * image.channels().count();

    stop.check()?;

    let (out, sample_bytes) = match encoding {
        Encoding::Ascii => {
            // Sized for samples of up to three digits; grows past that.
            let mut out = Vec::with_capacity(header.len() + samples.len().saturating_mul(4));
            out.extend_from_slice(header.as_bytes());
            write_ascii(&mut out, samples, row_len, stop)?;
            (out, 0)
        }
        Encoding::Binary => {
            let bytes = sample_width.bytes_for(i64::from(max));
            if bytes == 2 && max > i32::from(u16::MAX) {
                diagnostics.warn(context, IntegrityWarning::MaxExceedsSampleWidth { max, bytes });
            } else if sample_width == SampleWidth::Standard && max > i32::from(i16::MAX) {
                diagnostics.warn(context, IntegrityWarning::MaxAboveSigned16 { max });
            }
            let payload = samples
                .len()
                .checked_mul(bytes)
                .ok_or(AnymapError::DimensionsTooLarge {
                    width: image.width(),
                    height: image.height(),
                })?;
            let mut out = Vec::with_capacity(header.len().saturating_add(payload));
            out.extend_from_slice(header.as_bytes());
            write_binary(&mut out, samples, row_len, bytes, stop)?;
            (out, bytes)
        }
    };

    log::debug!(
        "encoded {magic} {}x{}: header max {max}, {} bytes",
        image.width(),
        image.height(),
        out.len()
    );

    Ok((out, max, sample_bytes))
}

/// Recompute the max value for the header from the samples themselves.
///
/// Negative samples are reported but still written. A flat image whose
/// value fits in one byte gets max 255 so the header never claims a
/// degenerate range like `0`.
fn header_max(samples: &[i32], context: &str, diagnostics: &mut Diagnostics) -> i32 {
    let (min, max) = sample_range(samples);
    if min < 0 {
        diagnostics.warn(context, IntegrityWarning::NegativeMinimum { min });
    }
    if max == min && max < FLAT_MAX {
        diagnostics.warn(
            context,
            IntegrityWarning::FlatMaxForced {
                value: max,
                forced: FLAT_MAX,
            },
        );
        return FLAT_MAX;
    }
    // Negative samples were reported above; the header itself must stay valid.
    max.max(0)
}

fn header_text(image: &Image, magic: Magic, max: i32, comment: Option<&str>) -> alloc::string::String {
    let comment = match comment {
        Some(text) => text.replace(['\r', '\n'], " "),
        None => default_comment(image.channels(), magic.encoding()).into(),
    };
    alloc::format!(
        "{magic}\n# {comment}\n{} {}\n{max}\n",
        image.width(),
        image.height()
    )
}

fn default_comment(channels: Channels, encoding: Encoding) -> &'static str {
    match (channels, encoding) {
        (Channels::Gray, Encoding::Ascii) => "created by zenanymap (gray ASCII)",
        (Channels::Rgb, Encoding::Ascii) => "created by zenanymap (color ASCII)",
        (Channels::Gray, Encoding::Binary) => "created by zenanymap (gray binary)",
        (Channels::Rgb, Encoding::Binary) => "created by zenanymap (color binary)",
    }
}

/// Space-separated decimal samples, one image row per line.
fn write_ascii(
    out: &mut Vec<u8>,
    samples: &[i32],
    row_len: usize,
    stop: &dyn Stop,
) -> Result<(), AnymapError> {
    for (row_idx, row) in samples.chunks(row_len.max(1)).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        for (i, &s) in row.iter().enumerate() {
            if i > 0 {
                out.push(b' ');
            }
            // Writing into a Vec cannot fail.
            let _ = write!(out, "{s}");
        }
        out.push(b'\n');
    }
    Ok(())
}

/// Fixed-width samples: 1 byte (low 8 bits), 2 bytes big-endian (low 16
/// bits), or 4 bytes native order.
fn write_binary(
    out: &mut Vec<u8>,
    samples: &[i32],
    row_len: usize,
    bytes: usize,
    stop: &dyn Stop,
) -> Result<(), AnymapError> {
    for (row_idx, row) in samples.chunks(row_len.max(1)).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        match bytes {
            1 => out.extend(row.iter().map(|&s| s as u8)),
            2 => {
                for &s in row {
                    out.extend_from_slice(&(s as u16).to_be_bytes());
                }
            }
            _ => {
                for &s in row {
                    out.extend_from_slice(&s.to_ne_bytes());
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use enough::Unstoppable;

    fn encode(image: &Image, encoding: Encoding, width: SampleWidth) -> (Vec<u8>, i32, Vec<IntegrityWarning>) {
        let mut diagnostics = Diagnostics::default();
        let (bytes, max, _) =
            encode_pnm(image, encoding, width, None, &mut diagnostics, &Unstoppable).unwrap();
        (bytes, max, diagnostics.into_vec())
    }

    fn gray(width: u32, height: u32, samples: Vec<i32>) -> Image {
        Image::from_samples(width, height, Channels::Gray, samples).unwrap()
    }

    /// Same per-sample formatting as `write_ascii`.
    fn push_decimal(out: &mut Vec<u8>, v: i32) {
        let _ = write!(out, "{v}");
    }

    #[test]
    fn two_byte_threshold_scenario() {
        let (bytes, max, warnings) =
            encode(&gray(2, 1, vec![10, 300]), Encoding::Binary, SampleWidth::Standard);
        assert_eq!(max, 300);
        assert!(warnings.is_empty());
        let expected_header = b"P5\n# created by zenanymap (gray binary)\n2 1\n300\n";
        assert_eq!(&bytes[..expected_header.len()], expected_header);
        assert_eq!(&bytes[expected_header.len()..], &[0x00, 0x0A, 0x01, 0x2C]);
    }

    #[test]
    fn one_byte_up_to_255() {
        let (bytes, max, _) =
            encode(&gray(3, 1, vec![0, 128, 255]), Encoding::Binary, SampleWidth::Standard);
        assert_eq!(max, 255);
        assert!(bytes.ends_with(b"255\n\x00\x80\xff"));
    }

    #[test]
    fn flat_image_forced_to_255() {
        let (bytes, max, warnings) =
            encode(&gray(2, 2, vec![0; 4]), Encoding::Binary, SampleWidth::Standard);
        assert_eq!(max, 255);
        assert!(bytes.ends_with(b"\n255\n\x00\x00\x00\x00"));
        assert_eq!(
            warnings,
            [IntegrityWarning::FlatMaxForced {
                value: 0,
                forced: 255
            }]
        );
    }

    #[test]
    fn flat_image_above_one_byte_keeps_its_value() {
        let (_, max, warnings) =
            encode(&gray(2, 1, vec![300, 300]), Encoding::Binary, SampleWidth::Standard);
        assert_eq!(max, 300);
        assert!(warnings.is_empty());
    }

    #[test]
    fn negative_minimum_warns_and_truncates() {
        let (bytes, max, warnings) =
            encode(&gray(2, 1, vec![-1, 100]), Encoding::Binary, SampleWidth::Standard);
        assert_eq!(max, 100);
        assert_eq!(warnings, [IntegrityWarning::NegativeMinimum { min: -1 }]);
        assert!(bytes.ends_with(b"\xff\x64"));
    }

    #[test]
    fn wide16_ignores_threshold() {
        let (bytes, _, _) = encode(&gray(2, 1, vec![1, 2]), Encoding::Binary, SampleWidth::Wide16);
        assert!(bytes.ends_with(b"\n2\n\x00\x01\x00\x02"));
    }

    #[test]
    fn wide16_overflow_warns() {
        let (_, _, warnings) =
            encode(&gray(1, 1, vec![70000]), Encoding::Binary, SampleWidth::Wide16);
        assert!(warnings.contains(&IntegrityWarning::MaxExceedsSampleWidth {
            max: 70000,
            bytes: 2
        }));
    }

    #[test]
    fn standard_max_above_signed_16_warns() {
        let (bytes, max, warnings) =
            encode(&gray(2, 1, vec![1, 40000]), Encoding::Binary, SampleWidth::Standard);
        assert_eq!(max, 40000);
        assert_eq!(warnings, [IntegrityWarning::MaxAboveSigned16 { max: 40000 }]);
        assert!(bytes.ends_with(b"\x00\x01\x9c\x40"));

        let (_, _, warnings) =
            encode(&gray(1, 1, vec![32767]), Encoding::Binary, SampleWidth::Standard);
        assert!(warnings.is_empty());
    }

    #[test]
    fn wide16_accepts_unsigned_range() {
        let (_, _, warnings) =
            encode(&gray(1, 1, vec![40000]), Encoding::Binary, SampleWidth::Wide16);
        assert!(warnings.is_empty());
    }

    #[test]
    fn standard_max_above_u16_truncates() {
        let (bytes, _, warnings) =
            encode(&gray(1, 1, vec![70000]), Encoding::Binary, SampleWidth::Standard);
        assert_eq!(
            warnings,
            [IntegrityWarning::MaxExceedsSampleWidth {
                max: 70000,
                bytes: 2
            }]
        );
        assert!(bytes.ends_with(b"\x11\x70"));
    }

    #[test]
    fn ascii_writes_negative_and_wide_values() {
        let (bytes, _, _) = encode(
            &gray(3, 1, vec![-7, 0, 2_000_000]),
            Encoding::Ascii,
            SampleWidth::Standard,
        );
        assert!(bytes.ends_with(b"\n-7 0 2000000\n"));
    }

    #[test]
    fn wide32_native_order() {
        let (bytes, _, _) =
            encode(&gray(2, 1, vec![5, 100_000]), Encoding::Binary, SampleWidth::Wide32);
        let mut tail = 5i32.to_ne_bytes().to_vec();
        tail.extend_from_slice(&100_000i32.to_ne_bytes());
        assert!(bytes.ends_with(&tail));
    }

    #[test]
    fn ascii_rows_on_lines() {
        let img = Image::from_samples(2, 2, Channels::Gray, vec![1, 22, 333, 4]).unwrap();
        let (bytes, max, _) = encode(&img, Encoding::Ascii, SampleWidth::Standard);
        assert_eq!(max, 333);
        assert_eq!(
            bytes,
            b"P2\n# created by zenanymap (gray ASCII)\n2 2\n333\n1 22\n333 4\n"
        );
    }

    #[test]
    fn ascii_color_header() {
        let img = Image::from_samples(1, 1, Channels::Rgb, vec![255, 0, 128]).unwrap();
        let (bytes, _, _) = encode(&img, Encoding::Ascii, SampleWidth::Standard);
        assert!(bytes.starts_with(b"P3\n# created by zenanymap (color ASCII)\n1 1\n255\n"));
        assert!(bytes.ends_with(b"255 0 128\n"));
    }

    #[test]
    fn custom_comment_stays_on_one_line() {
        let img = gray(1, 1, vec![9]);
        let mut diagnostics = Diagnostics::default();
        let (bytes, _, _) = encode_pnm(
            &img,
            Encoding::Ascii,
            SampleWidth::Standard,
            Some("two\nlines"),
            &mut diagnostics,
            &Unstoppable,
        )
        .unwrap();
        assert!(bytes.starts_with(b"P2\n# two lines\n1 1\n"));
    }

    #[test]
    fn decimal_formatting() {
        let mut out = Vec::new();
        for v in [0, 7, 10, -42, i32::MAX, i32::MIN] {
            push_decimal(&mut out, v);
            out.push(b',');
        }
        assert_eq!(out, b"0,7,10,-42,2147483647,-2147483648,");
    }
}
