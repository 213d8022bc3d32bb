//! The module contains Rust representation of Cassandra consistency levels.
use derive_more::Display;
use std::str::FromStr;

use crate::error;

/// `Consistency` is an enum which represents Cassandra's consistency levels.
/// To find more details about each consistency level please refer to the
/// [documentation](https://docs.datastax.com/en/cql-oss/3.x/cql/cql_reference/cqlshConsistency.html).
#[derive(Debug, PartialEq, Clone, Copy, Display, Ord, PartialOrd, Eq, Hash, Default)]
#[non_exhaustive]
pub enum Consistency {
    /// A write succeeds on the closest replica, or after a hinted handoff.
    /// Writes only.
    Any,
    /// At least one replica node.
    #[default]
    One,
    /// At least two replica nodes.
    Two,
    /// At least three replica nodes.
    Three,
    /// A quorum of replica nodes.
    Quorum,
    /// All replica nodes for the partition key.
    All,
    /// A quorum of replica nodes in the same data center as the coordinator.
    LocalQuorum,
    /// A quorum of replica nodes in each data center.
    EachQuorum,
    /// Linearizable consistency for lightweight transactions. Used as a serial
    /// consistency level only.
    Serial,
    /// Same as `Serial`, but confined to the data center.
    LocalSerial,
    /// At least one replica node in the local data center.
    LocalOne,
}

impl FromStr for Consistency {
    type Err = error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let consistency = match s {
            "Any" => Consistency::Any,
            "One" => Consistency::One,
            "Two" => Consistency::Two,
            "Three" => Consistency::Three,
            "Quorum" => Consistency::Quorum,
            "All" => Consistency::All,
            "LocalQuorum" => Consistency::LocalQuorum,
            "EachQuorum" => Consistency::EachQuorum,
            "Serial" => Consistency::Serial,
            "LocalSerial" => Consistency::LocalSerial,
            "LocalOne" => Consistency::LocalOne,
            _ => {
                return Err(error::Error::General(format!(
                    "Invalid consistency provided: {}",
                    s
                )))
            }
        };

        Ok(consistency)
    }
}
