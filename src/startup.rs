//! Options negotiated in the connection Startup message.
//!
//! The builder merges three sources with later-wins precedence: the negotiated
//! compression algorithm, the driver identity read from build metadata, and
//! caller-supplied overrides. `CQL_VERSION` is left to the message layer
//! ([`crate::frame::BodyReqStartup`]), which adds it when absent.
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::debug;

use crate::compression::Compressor;

pub const CQL_VERSION_KEY: &str = "CQL_VERSION";
pub const CQL_VERSION_VAL: &str = "3.0.0";
pub const COMPRESSION_KEY: &str = "COMPRESSION";
pub const DRIVER_NAME_KEY: &str = "DRIVER_NAME";
pub const DRIVER_VERSION_KEY: &str = "DRIVER_VERSION";

/// Driver identity announced to the server on connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// Returns the driver identity, resolved once per process from the package
/// build metadata and shared for the lifetime of the driver.
pub fn driver_info() -> &'static DriverInfo {
    static DRIVER_INFO: OnceLock<DriverInfo> = OnceLock::new();
    DRIVER_INFO.get_or_init(|| DriverInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// The finished, immutable option map for one connection attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupOptions {
    options: HashMap<String, String>,
}

impl StartupOptions {
    #[inline]
    pub fn options(&self) -> &HashMap<String, String> {
        &self.options
    }

    #[inline]
    pub fn into_options(self) -> HashMap<String, String> {
        self.options
    }
}

/// Builds the option map sent in a Startup message.
///
/// Custom options are inserted after the built-in defaults, so a colliding
/// custom key (including [`COMPRESSION_KEY`]) overrides the default - this is
/// how a caller can force compression on or off, or override the driver
/// identity for testing.
///
/// ```
/// use cql_core::compression::Compression;
/// use cql_core::startup::{StartupOptionsBuilder, COMPRESSION_KEY};
///
/// let options = StartupOptionsBuilder::new()
///     .with_compressor(&Compression::Lz4)
///     .build();
/// assert_eq!(
///     options.options().get(COMPRESSION_KEY).map(String::as_str),
///     Some("lz4"),
/// );
/// ```
#[derive(Debug, Default)]
pub struct StartupOptionsBuilder {
    compression: Option<String>,
    custom_options: HashMap<String, String>,
}

impl StartupOptionsBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Captures the compression algorithm negotiated for the connection. A
    /// blank algorithm name is treated as no compression.
    #[must_use]
    pub fn with_compressor(mut self, compressor: &dyn Compressor) -> Self {
        self.compression = compressor.algorithm();
        self
    }

    /// Sets caller-supplied options, merged in last.
    #[must_use]
    pub fn with_custom_options(mut self, options: HashMap<String, String>) -> Self {
        self.custom_options = options;
        self
    }

    pub fn build(self) -> StartupOptions {
        let mut options = HashMap::with_capacity(3);

        if let Some(algorithm) = self.compression.as_deref().map(str::trim) {
            if !algorithm.is_empty() {
                options.insert(COMPRESSION_KEY.to_string(), algorithm.to_string());
            }
        }

        let info = driver_info();
        options.insert(DRIVER_NAME_KEY.to_string(), info.name.to_string());
        options.insert(DRIVER_VERSION_KEY.to_string(), info.version.to_string());

        // later insertion wins, so custom entries override the defaults
        options.extend(self.custom_options);

        debug!(
            compression = options.get(COMPRESSION_KEY).map(String::as_str),
            "built startup options"
        );

        StartupOptions { options }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compression::{Compression, MockCompressor};
    use maplit::hashmap;

    #[test]
    fn build_without_compressor_yields_driver_identity_only() {
        let options = StartupOptionsBuilder::new().build();
        let options = options.options();

        assert_eq!(
            options.get(DRIVER_NAME_KEY).map(String::as_str),
            Some(env!("CARGO_PKG_NAME"))
        );
        assert_eq!(
            options.get(DRIVER_VERSION_KEY).map(String::as_str),
            Some(env!("CARGO_PKG_VERSION"))
        );
        assert!(!options.contains_key(COMPRESSION_KEY));
        assert_eq!(options.len(), 2);
    }

    #[test]
    fn build_keeps_custom_options_alongside_defaults() {
        let options = StartupOptionsBuilder::new()
            .with_custom_options(hashmap! {
                "K1".to_string() => "V1".to_string(),
                "K2".to_string() => "V2".to_string(),
            })
            .build();
        let options = options.options();

        assert_eq!(options.get("K1").map(String::as_str), Some("V1"));
        assert_eq!(options.get("K2").map(String::as_str), Some("V2"));
        assert!(options.contains_key(DRIVER_NAME_KEY));
        assert!(options.contains_key(DRIVER_VERSION_KEY));
        assert!(!options.contains_key(COMPRESSION_KEY));
        assert_eq!(options.len(), 4);
    }

    #[test]
    fn custom_compression_applies_without_compressor() {
        let options = StartupOptionsBuilder::new()
            .with_custom_options(hashmap! {
                COMPRESSION_KEY.to_string() => "lz4".to_string(),
            })
            .build();
        let options = options.options();

        assert_eq!(options.get(COMPRESSION_KEY).map(String::as_str), Some("lz4"));
        assert!(options.contains_key(DRIVER_NAME_KEY));
        assert!(options.contains_key(DRIVER_VERSION_KEY));
    }

    #[test]
    fn custom_compression_overrides_negotiated_algorithm() {
        let options = StartupOptionsBuilder::new()
            .with_compressor(&Compression::Snappy)
            .with_custom_options(hashmap! {
                COMPRESSION_KEY.to_string() => "lz4".to_string(),
            })
            .build();

        assert_eq!(
            options.options().get(COMPRESSION_KEY).map(String::as_str),
            Some("lz4")
        );
    }

    #[test]
    fn custom_options_override_driver_identity() {
        let options = StartupOptionsBuilder::new()
            .with_custom_options(hashmap! {
                DRIVER_NAME_KEY.to_string() => "custom driver".to_string(),
            })
            .build();

        assert_eq!(
            options.options().get(DRIVER_NAME_KEY).map(String::as_str),
            Some("custom driver")
        );
    }

    #[test]
    fn negotiated_algorithm_is_trimmed() {
        let mut compressor = MockCompressor::new();
        compressor
            .expect_algorithm()
            .return_const(Some("  LZ4  ".to_string()));

        let options = StartupOptionsBuilder::new()
            .with_compressor(&compressor)
            .build();

        assert_eq!(
            options.options().get(COMPRESSION_KEY).map(String::as_str),
            Some("LZ4")
        );
    }

    #[test]
    fn blank_algorithm_means_no_compression() {
        let mut compressor = MockCompressor::new();
        compressor
            .expect_algorithm()
            .return_const(Some("   ".to_string()));

        let options = StartupOptionsBuilder::new()
            .with_compressor(&compressor)
            .build();
        assert!(!options.options().contains_key(COMPRESSION_KEY));

        let options = StartupOptionsBuilder::new()
            .with_compressor(&Compression::None)
            .build();
        assert!(!options.options().contains_key(COMPRESSION_KEY));
    }

    #[test]
    fn driver_info_is_cached() {
        assert!(std::ptr::eq(driver_info(), driver_info()));
        assert_eq!(driver_info().name, env!("CARGO_PKG_NAME"));
    }
}
