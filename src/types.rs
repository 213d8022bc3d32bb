//! Protocol primitive types shared by the statement and frame modules.
use std::io::{Cursor, Write};

use crate::frame::Serialize;

/// Cassandra protocol `[int]`.
pub type CInt = i32;
/// Cassandra protocol `[long]`.
pub type CLong = i64;
/// Cassandra protocol `[short]`.
pub type CIntShort = i16;

pub const SHORT_LEN: usize = 2;
pub const INT_LEN: usize = 4;

impl Serialize for CIntShort {
    fn serialize(&self, cursor: &mut Cursor<&mut Vec<u8>>) {
        let _ = cursor.write(&self.to_be_bytes());
    }
}

/// Serializes a protocol `[string]` - short length followed by UTF-8 bytes.
pub fn serialize_str(cursor: &mut Cursor<&mut Vec<u8>>, value: &str) {
    let len = value.len() as CIntShort;
    len.serialize(cursor);
    let _ = cursor.write(value.as_bytes());
}

/// The structure that represents Cassandra byte type - a length-prefixed,
/// possibly null sequence of bytes.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Ord, PartialOrd)]
pub struct CBytes {
    bytes: Option<Vec<u8>>,
}

impl CBytes {
    #[inline]
    pub fn new(bytes: Vec<u8>) -> CBytes {
        CBytes { bytes: Some(bytes) }
    }

    /// Creates Cassandra bytes that represent empty or null value.
    #[inline]
    pub fn new_empty() -> CBytes {
        CBytes { bytes: None }
    }

    #[inline]
    pub fn as_slice(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        match &self.bytes {
            None => true,
            Some(bytes) => bytes.is_empty(),
        }
    }

    /// Converts `CBytes` into a plain array of bytes.
    #[inline]
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        self.bytes
    }

    /// Number of bytes the value occupies on the wire, including the length
    /// prefix.
    #[inline]
    pub fn serialized_len(&self) -> usize {
        INT_LEN + self.bytes.as_ref().map(Vec::len).unwrap_or(0)
    }
}

/// Cassandra value which could be an array of bytes, null or a non-set value.
#[derive(Debug, Clone, PartialEq, Ord, PartialOrd, Eq, Hash)]
pub enum Value {
    Some(Vec<u8>),
    Null,
    NotSet,
}

impl Value {
    pub fn new<B: Into<Vec<u8>>>(bytes: B) -> Value {
        Value::Some(bytes.into())
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Value {
        Value::Some(bytes)
    }
}

impl From<&[u8]> for Value {
    fn from(bytes: &[u8]) -> Value {
        Value::Some(bytes.into())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Value {
        Value::Some(value.as_bytes().into())
    }
}
