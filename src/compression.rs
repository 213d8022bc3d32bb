//! Negotiated traffic compression.
//!
//! Client and server must agree on a compression algorithm before it is used,
//! which is done in the STARTUP message. This crate only negotiates the
//! algorithm name; the codecs themselves live with the connection layer.
use derive_more::Display;
#[cfg(test)]
use mockall::automock;

pub const LZ4: &str = "lz4";
pub const SNAPPY: &str = "snappy";

/// A collaborator reporting the name of the wire-compression algorithm
/// negotiated for a connection, if any.
#[cfg_attr(test, automock)]
pub trait Compressor {
    /// Name of the negotiated algorithm, or `None` when the connection is not
    /// compressed.
    fn algorithm(&self) -> Option<String>;
}

/// Enum which represents a type of compression known to the driver.
#[derive(Debug, PartialEq, Clone, Copy, Eq, Ord, PartialOrd, Hash, Display)]
pub enum Compression {
    /// [lz4](https://code.google.com/p/lz4/) compression
    Lz4,
    /// [snappy](https://code.google.com/p/snappy/) compression
    Snappy,
    /// Non compression
    None,
}

impl Compression {
    /// It transforms compression method into a `&str`.
    pub fn as_str(&self) -> Option<&'static str> {
        match *self {
            Compression::Lz4 => Some(LZ4),
            Compression::Snappy => Some(SNAPPY),
            Compression::None => None,
        }
    }
}

impl Compressor for Compression {
    fn algorithm(&self) -> Option<String> {
        self.as_str().map(Into::into)
    }
}

impl From<String> for Compression {
    /// It converts `String` into `Compression`. If string is neither `lz4` nor
    /// `snappy` then `Compression::None` will be returned.
    fn from(compression_string: String) -> Compression {
        Compression::from(compression_string.as_str())
    }
}

impl<'a> From<&'a str> for Compression {
    /// It converts `str` into `Compression`. If string is neither `lz4` nor
    /// `snappy` then `Compression::None` will be returned.
    fn from(compression_str: &'a str) -> Compression {
        match compression_str {
            LZ4 => Compression::Lz4,
            SNAPPY => Compression::Snappy,
            _ => Compression::None,
        }
    }
}
