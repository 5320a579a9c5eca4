//! # Configuration Management
//!
//! Protocol constants and codec configuration.
//!
//! This module carries the fixed protocol parameters every IPBus peer must
//! agree on, and the small amount of tunable policy the codec exposes: how
//! strictly incoming header words are validated.
//!
//! ## Configuration Sources
//! - TOML files via `from_file()`
//! - Direct instantiation with defaults
//! - Environment-specific overrides via `from_env()`
//!
//! ## Validation Policy
//! - `Lenient` (the default) ignores reserved header bits and preserves
//!   unrecognized packet/transaction codes as explicit reserved variants, so
//!   a conforming receiver never rejects valid-but-newer wire data.
//! - `Strict` rejects reserved bits and unrecognized codes outright; useful
//!   when talking to known-fixed firmware and any deviation means corruption.

use crate::error::{IpbusError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Current supported IPBus protocol version
pub const PROTOCOL_VERSION: u8 = 2;

/// Canonical byte-order qualifier nibble; any other value means the word was
/// received with swapped endianness relative to this codec
pub const BYTE_ORDER_QUALIFIER: u8 = 0xF;

/// Max allowed UDP datagram payload in bytes, enforced by the transport
pub const MAX_PACKET_SIZE: usize = 1500;

/// Size of a packet or transaction header on the wire, in bytes
pub const HEADER_SIZE: usize = 4;

/// How strictly decode treats reserved bits and unrecognized codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Ignore reserved bits, preserve unrecognized codes (default)
    #[default]
    Lenient,
    /// Reject reserved bits and unrecognized codes
    Strict,
}

/// Codec configuration an embedding transport can load alongside its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Validation policy applied to every header decode
    #[serde(default)]
    pub validation: ValidationMode,
}

impl CodecConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| IpbusError::ConfigError(format!("Failed to read config file: {e}")))?;

        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content)
            .map_err(|e| IpbusError::ConfigError(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(mode) = std::env::var("IPBUS_VALIDATION_MODE") {
            config.validation = match mode.to_ascii_lowercase().as_str() {
                "lenient" => ValidationMode::Lenient,
                "strict" => ValidationMode::Strict,
                other => {
                    return Err(IpbusError::ConfigError(format!(
                        "Invalid IPBUS_VALIDATION_MODE: '{other}' (expected 'lenient' or 'strict')"
                    )))
                }
            };
        }

        Ok(config)
    }

    /// Validate the configuration for common issues and misconfigurations
    ///
    /// Returns a list of validation errors. Empty list means configuration is valid.
    pub fn validate(&self) -> Vec<String> {
        // Both validation modes are always usable; nothing to flag today.
        Vec::new()
    }

    /// Validate and return Result - convenience method
    pub fn validate_strict(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(IpbusError::ConfigError(format!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )))
        }
    }
}
