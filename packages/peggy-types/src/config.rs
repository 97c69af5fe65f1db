//! Peggy denom naming convention
//!
//! Every asset minted by the peggy module is named `PREFIX || SEPARATOR ||
//! <contract>`. The standard convention is fixed at compile time; an alternate
//! one can be loaded into a [`DenomConfig`] and handed to a
//! [`DenomCodec`](crate::address_codec::DenomCodec).

use eyre::{eyre, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::env;

use crate::coin::MAX_DENOM_LEN;

/// Prefix for all assets minted by the peggy module (the module name)
pub const PEGGY_DENOM_PREFIX: &str = "peggy";

/// Separator between the prefix and the contract address
pub const PEGGY_DENOM_SEPARATOR: &str = "";

/// Length of an Ethereum contract address in bytes
pub const ETH_CONTRACT_ADDRESS_LEN: usize = 20;

/// Length of the byte form of a standard peggy denom
pub const PEGGY_DENOM_LEN: usize =
    PEGGY_DENOM_PREFIX.len() + PEGGY_DENOM_SEPARATOR.len() + ETH_CONTRACT_ADDRESS_LEN;

/// Environment variable overriding the denom prefix
pub const ENV_DENOM_PREFIX: &str = "PEGGY_DENOM_PREFIX";

/// Environment variable overriding the denom separator
pub const ENV_DENOM_SEPARATOR: &str = "PEGGY_DENOM_SEPARATOR";

/// Denom naming convention: prefix and separator
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DenomConfig {
    pub prefix: Cow<'static, str>,
    #[serde(default)]
    pub separator: Cow<'static, str>,
}

impl DenomConfig {
    /// The standard peggy convention (`peggy` with no separator)
    pub const STANDARD: DenomConfig = DenomConfig {
        prefix: Cow::Borrowed(PEGGY_DENOM_PREFIX),
        separator: Cow::Borrowed(PEGGY_DENOM_SEPARATOR),
    };

    /// Create a validated config
    pub fn new(prefix: impl Into<String>, separator: impl Into<String>) -> Result<Self> {
        let config = Self {
            prefix: Cow::Owned(prefix.into()),
            separator: Cow::Owned(separator.into()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Load from `PEGGY_DENOM_PREFIX` / `PEGGY_DENOM_SEPARATOR`.
    ///
    /// Unset variables fall back to the standard convention.
    pub fn load_from_env() -> Result<Self> {
        let prefix = env::var(ENV_DENOM_PREFIX).unwrap_or_else(|_| PEGGY_DENOM_PREFIX.to_string());
        let separator =
            env::var(ENV_DENOM_SEPARATOR).unwrap_or_else(|_| PEGGY_DENOM_SEPARATOR.to_string());

        let config = Self::new(prefix, separator)
            .wrap_err("Invalid peggy denom configuration in environment")?;

        tracing::debug!(
            prefix = %config.prefix,
            separator = %config.separator,
            "Loaded peggy denom config from environment"
        );

        Ok(config)
    }

    /// Validate the convention against the native denom grammar.
    ///
    /// The prefix must open a valid denom (leading ASCII letter) and both parts
    /// may only contain characters the grammar allows after it.
    pub fn validate(&self) -> Result<()> {
        let mut chars = self.prefix.chars();
        match chars.next() {
            None => return Err(eyre!("denom prefix cannot be empty")),
            Some(first) if !first.is_ascii_alphabetic() => {
                return Err(eyre!(
                    "denom prefix must start with an ASCII letter, got '{}'",
                    first
                ));
            }
            Some(_) => {}
        }

        if let Some(bad) = chars
            .chain(self.separator.chars())
            .find(|c| !crate::coin::is_denom_char(*c))
        {
            return Err(eyre!("invalid character '{}' in denom prefix or separator", bad));
        }

        // string form appends "0x" and 40 hex digits
        let denom_string_len = self.full_prefix().len() + 2 + 2 * ETH_CONTRACT_ADDRESS_LEN;
        if denom_string_len > MAX_DENOM_LEN {
            return Err(eyre!(
                "denom prefix and separator too long: denoms would be {} chars, max {}",
                denom_string_len,
                MAX_DENOM_LEN
            ));
        }

        Ok(())
    }

    /// `prefix || separator`
    pub fn full_prefix(&self) -> String {
        format!("{}{}", self.prefix, self.separator)
    }

    /// Length of the byte form of a denom under this convention
    pub fn denom_len(&self) -> usize {
        self.prefix.len() + self.separator.len() + ETH_CONTRACT_ADDRESS_LEN
    }
}

impl Default for DenomConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}
