//! Peggy Types: ERC20 Denoms and Amounts for the Ethereum Bridge
//!
//! This crate is the address-translation and amount layer of the peggy bridge
//! module:
//!
//! - **Denom Codec** - Reversible mapping between ERC20 contract addresses and
//!   native denoms (`peggy0x...`), in byte and string form
//! - **ERC20 Tokens** - Amount + contract value type with validation and
//!   overflow-checked addition
//! - **Native Coins** - Denom grammar and the coin handed to the native bank
//! - **Config** - The denom naming convention (prefix and separator)
//!
//! ## Usage
//!
//! ```ignore
//! use peggy_types::{denom_string, Erc20Token};
//!
//! let token = Erc20Token::new(100, contract);
//! token.validate_basic()?;
//! let coin = token.peggy_coin(); // 100peggy0x...
//! ```
//!
//! Everything here is pure and synchronous; no I/O, no shared state.

pub mod address_codec;
pub mod coin;
pub mod config;
pub mod erc20;
pub mod error;

pub use address_codec::{
    compare_address_bytes, decode_denom_bytes, decode_denom_string, denom_string, encode_denom,
    eth_addr_less_than, parse_eth_address, validate_eth_address, DenomCodec, PeggyDenom,
};
pub use coin::{validate_denom, NativeCoin};
pub use config::{
    DenomConfig, ETH_CONTRACT_ADDRESS_LEN, PEGGY_DENOM_LEN, PEGGY_DENOM_PREFIX,
    PEGGY_DENOM_SEPARATOR,
};
pub use erc20::Erc20Token;
pub use error::{AddressError, ArithmeticError, PeggyError, ValidationError};
