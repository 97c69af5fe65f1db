//! Peggy Denom Encoding
//!
//! Translates ERC20 contract addresses into native denoms and back.
//!
//! ## Denom Format
//!
//! The byte form (used in storage) embeds the raw contract bytes:
//! ```text
//! | Prefix ("peggy") | Separator ("") | Contract Address (20 bytes) |
//! ```
//!
//! The string form (used for coins and display) embeds the checksummed hex:
//! ```text
//! peggy0xdAC17F958D2ee523a2206206994597C13D831ec7
//! ```
//!
//! Both forms decode to the same contract address.

use alloy::primitives::Address;
use std::cmp::Ordering;
use std::fmt;

use crate::config::{DenomConfig, ETH_CONTRACT_ADDRESS_LEN};
use crate::error::AddressError;

// ============================================================================
// Ethereum Address Syntax
// ============================================================================

/// Validate an Ethereum hex address string.
///
/// Accepts 40 hex characters with an optional `0x`/`0X` prefix, in any case.
pub fn validate_eth_address(address: &str) -> Result<(), AddressError> {
    if address.is_empty() {
        return Err(AddressError::EmptyAddress);
    }

    if !is_hex_address(address) {
        return Err(AddressError::MalformedAddress {
            address: address.to_string(),
        });
    }

    Ok(())
}

/// Check whether a string is a syntactically valid hex address
pub fn is_hex_address(address: &str) -> bool {
    let hex_str = strip_hex_prefix(address);
    hex_str.len() == 2 * ETH_CONTRACT_ADDRESS_LEN && hex_str.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Parse a validated hex address into 20 bytes
pub fn parse_eth_address(address: &str) -> Result<Address, AddressError> {
    validate_eth_address(address)?;

    let bytes = hex::decode(strip_hex_prefix(address)).map_err(|_| {
        AddressError::MalformedAddress {
            address: address.to_string(),
        }
    })?;

    Ok(Address::from_slice(&bytes))
}

/// Render an address in its canonical (EIP-55 checksummed) hex form
pub fn to_checksum_hex(address: &Address) -> String {
    address.to_checksum(None)
}

fn strip_hex_prefix(address: &str) -> &str {
    address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .unwrap_or(address)
}

// ============================================================================
// Ordering
// ============================================================================

/// Byte-lexicographic comparison of raw address byte strings.
///
/// Used for deterministic ordering of contracts and denoms; the first differing
/// byte decides, and a strict prefix sorts first.
pub fn compare_address_bytes(a: &[u8], b: &[u8]) -> Ordering {
    a.cmp(b)
}

/// Whether `e` sorts strictly before `o` by their raw string bytes
pub fn eth_addr_less_than(e: &str, o: &str) -> bool {
    compare_address_bytes(e.as_bytes(), o.as_bytes()) == Ordering::Less
}

// ============================================================================
// Peggy Denom (byte form)
// ============================================================================

/// Byte form of a peggy denom: `prefix || separator || 20 address bytes`.
///
/// Carries the codec that produced it, so decoding and display use the same
/// convention. Ordering is by raw bytes first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PeggyDenom {
    bytes: Vec<u8>,
    codec: DenomCodec,
}

impl PeggyDenom {
    /// Denom for a contract under the standard convention
    pub fn new(token_contract: &Address) -> Self {
        DenomCodec::STANDARD.encode_denom(token_contract)
    }

    /// Parse the string form under the standard convention
    pub fn from_denom_string(denom: &str) -> Result<Self, AddressError> {
        DenomCodec::STANDARD.decode_denom_string(denom)
    }

    /// Decode the contract address under this denom's convention
    pub fn token_contract(&self) -> Result<Address, AddressError> {
        self.codec.decode_denom_bytes(&self.bytes)
    }

    pub fn codec(&self) -> &DenomCodec {
        &self.codec
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Raw bytes under the standard convention
impl From<Vec<u8>> for PeggyDenom {
    fn from(bytes: Vec<u8>) -> Self {
        DenomCodec::STANDARD.denom_from_bytes(bytes)
    }
}

impl AsRef<[u8]> for PeggyDenom {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Best-effort rendering: an undecodable denom prints as
/// `<hex bytes>(error: <reason>)` instead of failing.
impl fmt::Display for PeggyDenom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.codec.display_denom(&self.bytes))
    }
}

// ============================================================================
// Denom Codec
// ============================================================================

/// Encoder/decoder for one denom naming convention
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct DenomCodec {
    config: DenomConfig,
}

impl DenomCodec {
    /// Codec for the standard peggy convention
    pub const STANDARD: DenomCodec = DenomCodec {
        config: DenomConfig::STANDARD,
    };

    /// Create a codec for a validated convention
    pub fn new(config: DenomConfig) -> eyre::Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DenomConfig {
        &self.config
    }

    /// Encode a contract address into the byte form of its denom
    pub fn encode_denom(&self, token_contract: &Address) -> PeggyDenom {
        let mut buf = Vec::with_capacity(self.config.denom_len());
        buf.extend_from_slice(self.config.prefix.as_bytes());
        buf.extend_from_slice(self.config.separator.as_bytes());
        buf.extend_from_slice(token_contract.as_slice());
        self.denom_from_bytes(buf)
    }

    /// Wrap stored bytes as a denom of this convention. Nothing is checked;
    /// decoding reports any problem.
    pub fn denom_from_bytes(&self, bytes: Vec<u8>) -> PeggyDenom {
        PeggyDenom {
            bytes,
            codec: self.clone(),
        }
    }

    /// Decode the byte form of a denom back into its contract address
    pub fn decode_denom_bytes(&self, denom: &[u8]) -> Result<Address, AddressError> {
        let full_prefix = self.config.full_prefix();

        let address_bytes = denom.strip_prefix(full_prefix.as_bytes()).ok_or_else(|| {
            AddressError::PrefixMismatch {
                denom: hex::encode(denom),
                expected: hex::encode(full_prefix.as_bytes()),
            }
        })?;

        if address_bytes.len() != ETH_CONTRACT_ADDRESS_LEN {
            return Err(AddressError::BadAddressLength {
                expected: ETH_CONTRACT_ADDRESS_LEN,
                got: address_bytes.len(),
            });
        }

        Ok(Address::from_slice(address_bytes))
    }

    /// Parse the string form of a denom (`prefix || separator || 0x<hex>`).
    ///
    /// Returns the canonical byte form, so differently-cased inputs for the
    /// same contract produce identical denoms.
    pub fn decode_denom_string(&self, denom: &str) -> Result<PeggyDenom, AddressError> {
        let full_prefix = self.config.full_prefix();

        let address_hex = denom.strip_prefix(full_prefix.as_str()).ok_or_else(|| {
            AddressError::PrefixMismatch {
                denom: denom.to_string(),
                expected: full_prefix.clone(),
            }
        })?;

        let token_contract = parse_eth_address(address_hex)?;
        Ok(self.encode_denom(&token_contract))
    }

    /// String form of a contract's denom, with checksummed hex
    pub fn denom_string(&self, token_contract: &Address) -> String {
        format!(
            "{}{}{}",
            self.config.prefix,
            self.config.separator,
            to_checksum_hex(token_contract)
        )
    }

    /// Display form of a byte denom; never fails.
    ///
    /// Only meant for logs and messages. Anything that needs the contract must
    /// go through [`DenomCodec::decode_denom_bytes`].
    pub fn display_denom(&self, denom: &[u8]) -> String {
        match self.decode_denom_bytes(denom) {
            Ok(token_contract) => self.denom_string(&token_contract),
            Err(e) => {
                tracing::warn!(denom = %hex::encode(denom), error = %e, "Unparseable peggy denom");
                format!("{}(error: {})", hex::encode(denom), e)
            }
        }
    }

    /// Whether a string is a well-formed denom under this convention
    pub fn is_peggy_denom(&self, denom: &str) -> bool {
        self.decode_denom_string(denom).is_ok()
    }
}

// ============================================================================
// Standard Convention Helpers
// ============================================================================

/// [`DenomCodec::encode_denom`] under the standard convention
pub fn encode_denom(token_contract: &Address) -> PeggyDenom {
    DenomCodec::STANDARD.encode_denom(token_contract)
}

/// [`DenomCodec::decode_denom_bytes`] under the standard convention
pub fn decode_denom_bytes(denom: &[u8]) -> Result<Address, AddressError> {
    DenomCodec::STANDARD.decode_denom_bytes(denom)
}

/// [`DenomCodec::decode_denom_string`] under the standard convention
pub fn decode_denom_string(denom: &str) -> Result<PeggyDenom, AddressError> {
    DenomCodec::STANDARD.decode_denom_string(denom)
}

/// [`DenomCodec::denom_string`] under the standard convention
pub fn denom_string(token_contract: &Address) -> String {
    DenomCodec::STANDARD.denom_string(token_contract)
}
