//! Error types for peggy denoms and ERC20 amounts

use cosmwasm_std::Uint256;
use thiserror::Error;

/// Address syntax and denom decoding failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("empty Ethereum address")]
    EmptyAddress,

    #[error("{address} is not a valid Ethereum address")]
    MalformedAddress { address: String },

    #[error("denom '{denom}' prefix not equal to expected '{expected}'")]
    PrefixMismatch { denom: String, expected: String },

    #[error("failed to validate Ethereum address bytes: expected {expected} bytes, got {got}")]
    BadAddressLength { expected: usize, got: usize },
}

/// Failures of the stateless validation gate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("ethereum address: {0}")]
    InvalidAddress(#[source] AddressError),

    #[error("invalid coins: {coin}")]
    InvalidAmount { coin: String },

    #[error("invalid denom '{denom}': {reason}")]
    InvalidDenom { denom: String, reason: &'static str },
}

/// Failures when combining two ERC20 amounts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArithmeticError {
    #[error("invalid contract address: {left} != {right}")]
    MismatchedContract { left: String, right: String },

    #[error("invalid amount: {left} + {right} exceeds the 64-bit range")]
    AmountOverflow { left: Uint256, right: Uint256 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeggyError {
    #[error(transparent)]
    Address(#[from] AddressError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
}
