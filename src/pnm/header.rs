//! Header scanner: magic line, dimension line, max-value line.
//!
//! Each of the three lines may be preceded by any number of `#` comment
//! lines. Only lines whose first byte is `#` count as comments.

use alloc::string::String;

use super::{Magic, PnmHeader};
use crate::error::{AnymapError, FormatError};

/// Line reader over the raw file bytes that remembers its offset.
struct Lines<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Lines<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Next line without its `\n` terminator.
    fn next_line(&mut self) -> Option<&'a [u8]> {
        let rest = self.data.get(self.pos..).filter(|r| !r.is_empty())?;
        match rest.iter().position(|&b| b == b'\n') {
            Some(end) => {
                self.pos += end + 1;
                Some(&rest[..end])
            }
            None => {
                self.pos = self.data.len();
                Some(rest)
            }
        }
    }

    /// Next line that is not a comment.
    fn next_content_line(&mut self) -> Option<&'a [u8]> {
        loop {
            let line = self.next_line()?;
            if line.first() != Some(&b'#') {
                return Some(line);
            }
        }
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn parse_u32(token: &[u8]) -> Option<u32> {
    core::str::from_utf8(token).ok()?.parse().ok()
}

/// Parse the header, leaving `data_offset` just past the max-value line.
pub(crate) fn parse_header(data: &[u8]) -> Result<PnmHeader, AnymapError> {
    let mut lines = Lines::new(data);

    let magic_line = lines
        .next_content_line()
        .ok_or(FormatError::MissingMagic)?
        .trim_ascii();
    let magic = Magic::parse(magic_line)
        .ok_or_else(|| FormatError::UnsupportedMagic(lossy(magic_line)))?;

    let dims_line = lines.next_content_line().ok_or_else(|| {
        FormatError::MalformedDimensions("end of input before width and height".into())
    })?;
    let (width, height) = parse_dimensions(dims_line)?;

    let max_line = lines.next_content_line().ok_or_else(|| {
        FormatError::MalformedMaxValue("end of input before max value".into())
    })?;
    let declared_max = parse_max(max_line)?;

    Ok(PnmHeader {
        magic,
        width,
        height,
        declared_max,
        data_offset: lines.pos,
    })
}

fn parse_dimensions(line: &[u8]) -> Result<(u32, u32), FormatError> {
    let mut tokens = line
        .split(|b| b.is_ascii_whitespace())
        .filter(|t| !t.is_empty());
    let (Some(w), Some(h)) = (tokens.next(), tokens.next()) else {
        return Err(FormatError::MalformedDimensions(alloc::format!(
            "expected width and height, got {:?}",
            lossy(line)
        )));
    };
    let (Some(width), Some(height)) = (parse_u32(w), parse_u32(h)) else {
        return Err(FormatError::MalformedDimensions(alloc::format!(
            "width and height must be unsigned integers, got {:?}",
            lossy(line)
        )));
    };
    if width == 0 || height == 0 {
        return Err(FormatError::MalformedDimensions(alloc::format!(
            "dimensions must be non-zero, got {width}x{height}"
        )));
    }
    Ok((width, height))
}

fn parse_max(line: &[u8]) -> Result<i64, FormatError> {
    let text = line.trim_ascii();
    let max: i64 = core::str::from_utf8(text)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| {
            FormatError::MalformedMaxValue(alloc::format!("not an integer: {:?}", lossy(text)))
        })?;
    if !(0..=i64::from(u32::MAX)).contains(&max) {
        return Err(FormatError::MalformedMaxValue(alloc::format!(
            "{max} is outside 0..={}",
            u32::MAX
        )));
    }
    Ok(max)
}
