//! Native protocol version and the Startup message body.
use std::collections::HashMap;
use std::convert::TryFrom;
use std::io::Cursor;

use crate::error;
use crate::startup::{StartupOptions, CQL_VERSION_KEY, CQL_VERSION_VAL};
use crate::types::{serialize_str, CIntShort};

/// Trait that should be implemented by all types that wish to be serialized to
/// a buffer.
pub trait Serialize {
    /// Serializes given value using the cursor.
    fn serialize(&self, cursor: &mut Cursor<&mut Vec<u8>>);

    /// Wrapper for easily starting hierarchical serialization.
    fn serialize_to_vec(&self) -> Vec<u8> {
        let mut buf = vec![];
        self.serialize(&mut Cursor::new(&mut buf));
        buf
    }
}

/// Native protocol version.
#[derive(Debug, PartialEq, Eq, Ord, PartialOrd, Hash, Copy, Clone)]
pub enum Version {
    V3,
    V4,
}

impl From<Version> for u8 {
    fn from(value: Version) -> Self {
        match value {
            Version::V3 => 3,
            Version::V4 => 4,
        }
    }
}

impl TryFrom<u8> for Version {
    type Error = error::Error;

    fn try_from(version: u8) -> Result<Self, Self::Error> {
        match version & 0x7F {
            3 => Ok(Version::V3),
            4 => Ok(Version::V4),
            v => Err(error::Error::General(format!(
                "Unknown cassandra version: {}",
                v
            ))),
        }
    }
}

/// Startup message body - the option map negotiated for the connection,
/// serialized as a `[string map]`.
///
/// The builder in [`crate::startup`] deliberately does not set `CQL_VERSION`;
/// it is this message layer that guarantees the key is present, without ever
/// overwriting a caller-supplied value.
#[derive(Debug)]
pub struct BodyReqStartup {
    pub map: HashMap<String, String>,
}

impl BodyReqStartup {
    pub fn new(options: StartupOptions) -> BodyReqStartup {
        let mut map = options.into_options();
        map.entry(CQL_VERSION_KEY.to_string())
            .or_insert_with(|| CQL_VERSION_VAL.to_string());
        BodyReqStartup { map }
    }
}

impl Serialize for BodyReqStartup {
    fn serialize(&self, cursor: &mut Cursor<&mut Vec<u8>>) {
        let num = self.map.len() as CIntShort;
        num.serialize(cursor);

        for (key, val) in &self.map {
            serialize_str(cursor, key);
            serialize_str(cursor, val);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::startup::{StartupOptionsBuilder, DRIVER_NAME_KEY, DRIVER_VERSION_KEY};
    use maplit::hashmap;

    #[test]
    fn new_body_req_startup_adds_cql_version() {
        let body = BodyReqStartup::new(StartupOptionsBuilder::new().build());
        assert_eq!(
            body.map.get(CQL_VERSION_KEY).map(String::as_str),
            Some("3.0.0")
        );
        assert!(body.map.contains_key(DRIVER_NAME_KEY));
        assert!(body.map.contains_key(DRIVER_VERSION_KEY));
        assert_eq!(body.map.len(), 3);
    }

    #[test]
    fn new_body_req_startup_keeps_supplied_cql_version() {
        let options = StartupOptionsBuilder::new()
            .with_custom_options(hashmap! {
                CQL_VERSION_KEY.to_string() => "3.4.5".to_string(),
            })
            .build();

        let body = BodyReqStartup::new(options);
        assert_eq!(
            body.map.get(CQL_VERSION_KEY).map(String::as_str),
            Some("3.4.5")
        );
    }

    #[test]
    fn body_req_startup_serializes_string_map() {
        let body = BodyReqStartup::new(StartupOptionsBuilder::new().build());
        let bytes = body.serialize_to_vec();

        // short entry count followed by length-prefixed key/value strings
        assert_eq!(bytes[..2], (body.map.len() as i16).to_be_bytes());
        let expected_len: usize = 2 + body
            .map
            .iter()
            .map(|(key, val)| 2 + key.len() + 2 + val.len())
            .sum::<usize>();
        assert_eq!(bytes.len(), expected_len);
    }

    #[test]
    fn version_from_byte_ignores_direction_bit() {
        assert_eq!(Version::try_from(0x84).unwrap(), Version::V4);
        assert_eq!(Version::try_from(3).unwrap(), Version::V3);
        assert!(Version::try_from(9).is_err());
    }
}
