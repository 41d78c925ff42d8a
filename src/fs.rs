//! File entry points.
//!
//! Each call opens the file, reads or writes it in full, and closes it
//! before returning, on success and on every error path.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use enough::Unstoppable;

use crate::decode::{DecodeOutput, DecodeRequest};
use crate::encode::EncodeRequest;
use crate::error::{AnymapError, IoOperation};
use crate::image::Image;
use crate::pixel::SampleWidth;

fn io_error(op: IoOperation, path: &Path, source: std::io::Error) -> AnymapError {
    AnymapError::Io {
        op,
        path: path.to_path_buf(),
        source,
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, AnymapError> {
    let mut file = File::open(path).map_err(|e| io_error(IoOperation::Open, path, e))?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)
        .map_err(|e| io_error(IoOperation::Read, path, e))?;
    Ok(data)
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), AnymapError> {
    let mut file = File::create(path).map_err(|e| io_error(IoOperation::Open, path, e))?;
    file.write_all(bytes)
        .map_err(|e| io_error(IoOperation::Write, path, e))
}

/// Decode a P2, P3, P5 or P6 file.
pub fn decode_file(path: impl AsRef<Path>) -> Result<DecodeOutput, AnymapError> {
    decode_wide_file(path, SampleWidth::Standard)
}

/// Decode a binary file written with a fixed non-standard sample width.
pub fn decode_wide_file(
    path: impl AsRef<Path>,
    sample_width: SampleWidth,
) -> Result<DecodeOutput, AnymapError> {
    let path = path.as_ref();
    let data = read_file(path)?;
    log::debug!(
        "decoding {} ({} bytes, {sample_width:?} samples)",
        path.display(),
        data.len()
    );
    DecodeRequest::new(&data)
        .with_sample_width(sample_width)
        .decode(Unstoppable)
}

/// Write `image` as P2 (gray) or P3 (color).
pub fn encode_ascii_file(image: &Image, path: impl AsRef<Path>) -> Result<(), AnymapError> {
    let encoded = EncodeRequest::ascii().encode(image, Unstoppable)?;
    write_file(path.as_ref(), &encoded.bytes)
}

/// Write `image` as P5 (gray) or P6 (color) with the given sample width.
pub fn encode_binary_file(
    image: &Image,
    path: impl AsRef<Path>,
    sample_width: SampleWidth,
) -> Result<(), AnymapError> {
    let encoded = EncodeRequest::binary_with_width(sample_width).encode(image, Unstoppable)?;
    write_file(path.as_ref(), &encoded.bytes)
}
