//! Value encoding collaborator used when computing routing keys and request
//! sizes.
use crate::error::{Error, Result};
use crate::frame::Version;
use crate::types::{CBytes, Value};

/// Converts statement values into their wire representation for a given
/// protocol version. Concrete drivers plug their full codec machinery in here;
/// this crate only needs the value -> bytes direction.
pub trait CodecRegistry: Send + Sync {
    /// Encodes a single value into its wire form.
    fn encode(&self, value: &Value, version: Version) -> Result<CBytes>;
}

/// Registry for values that are already in wire form, which is how statement
/// values are represented in this crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultCodecRegistry;

impl CodecRegistry for DefaultCodecRegistry {
    fn encode(&self, value: &Value, _version: Version) -> Result<CBytes> {
        match value {
            Value::Some(bytes) => Ok(CBytes::new(bytes.clone())),
            Value::Null => Ok(CBytes::new_empty()),
            Value::NotSet => Err(Error::InvalidArgument(
                "cannot encode a not-set value".into(),
            )),
        }
    }
}
