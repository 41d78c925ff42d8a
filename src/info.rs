use crate::error::AnymapError;
use crate::pixel::Channels;
use crate::pnm::{Magic, header};

/// Header metadata, available without decoding samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub magic: Magic,
    pub declared_max: i64,
}

impl ImageInfo {
    /// Parse only the header.
    pub fn from_bytes(data: &[u8]) -> Result<Self, AnymapError> {
        let header = header::parse_header(data)?;
        Ok(Self {
            width: header.width,
            height: header.height,
            magic: header.magic,
            declared_max: header.declared_max,
        })
    }

    pub fn channels(&self) -> Channels {
        self.magic.channels()
    }
}
