//! Native chain coins
//!
//! A [`NativeCoin`] is a denom paired with a 256-bit amount, wide enough to
//! hold intermediate sums before they are narrowed at the bridge boundary.

use cosmwasm_std::{Coin, Uint128, Uint256};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// Minimum denom length accepted by the native chain
pub const MIN_DENOM_LEN: usize = 3;

/// Maximum denom length accepted by the native chain
pub const MAX_DENOM_LEN: usize = 128;

/// Characters allowed after the leading letter of a denom
pub fn is_denom_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '/' | ':' | '.' | '_' | '-')
}

/// Validate a denom against `[a-zA-Z][a-zA-Z0-9/:._-]{2,127}`
pub fn validate_denom(denom: &str) -> Result<(), ValidationError> {
    let invalid = |reason| ValidationError::InvalidDenom {
        denom: denom.to_string(),
        reason,
    };

    if !(MIN_DENOM_LEN..=MAX_DENOM_LEN).contains(&denom.len()) {
        return Err(invalid("too short or too long"));
    }

    let mut chars = denom.chars();
    if !chars.next().is_some_and(|c| c.is_ascii_alphabetic()) {
        return Err(invalid("must start with an ASCII letter"));
    }

    if !chars.all(is_denom_char) {
        return Err(invalid("invalid character"));
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCoin {
    pub denom: String,
    pub amount: Uint256,
}

impl NativeCoin {
    pub fn new(denom: impl Into<String>, amount: impl Into<Uint256>) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.into(),
        }
    }

    /// Well-formed denom. Amounts are unsigned, so never negative.
    pub fn is_valid(&self) -> bool {
        validate_denom(&self.denom).is_ok()
    }

    pub fn is_positive(&self) -> bool {
        !self.amount.is_zero()
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

impl fmt::Display for NativeCoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Narrow to a bank coin; fails when the amount does not fit in 128 bits
impl TryFrom<NativeCoin> for Coin {
    type Error = ValidationError;

    fn try_from(coin: NativeCoin) -> Result<Self, Self::Error> {
        let amount = Uint128::try_from(coin.amount).map_err(|_| ValidationError::InvalidAmount {
            coin: coin.to_string(),
        })?;

        Ok(Coin {
            denom: coin.denom,
            amount,
        })
    }
}

impl From<Coin> for NativeCoin {
    fn from(coin: Coin) -> Self {
        Self {
            denom: coin.denom,
            amount: coin.amount.into(),
        }
    }
}
