//! ERC20 token amounts
//!
//! An [`Erc20Token`] is an amount of a specific ERC20 contract. It is the value
//! carried across the bridge; on the native side it becomes a peggy coin.

use alloy::primitives::Address;
use cosmwasm_std::Uint256;
use serde::{Deserialize, Serialize};

use crate::address_codec::{
    decode_denom_string, denom_string, parse_eth_address, to_checksum_hex, validate_eth_address,
};
use crate::coin::NativeCoin;
use crate::config::DenomConfig;
use crate::error::{AddressError, ArithmeticError, ValidationError};

/// Amount of an ERC20 token, identified by its contract's hex address.
///
/// The contract is kept in checksummed form whenever it parses, including
/// after deserialization, so equality matches [`Erc20Token::add`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Erc20TokenRaw")]
pub struct Erc20Token {
    amount: Uint256,
    contract: String,
}

/// Wire shape before the contract is canonicalized
#[derive(Deserialize)]
struct Erc20TokenRaw {
    amount: Uint256,
    contract: String,
}

/// Malformed contracts are kept as-is for `validate_basic` to report
impl From<Erc20TokenRaw> for Erc20Token {
    fn from(raw: Erc20TokenRaw) -> Self {
        let contract = match parse_eth_address(&raw.contract) {
            Ok(address) => to_checksum_hex(&address),
            Err(_) => raw.contract,
        };

        Self {
            amount: raw.amount,
            contract,
        }
    }
}

impl Erc20Token {
    pub fn new(amount: u64, contract: Address) -> Self {
        Self::from_uint256(Uint256::from(amount), contract)
    }

    /// Construct from a wide amount, e.g. the result of arithmetic.
    ///
    /// No range check; run [`Erc20Token::validate_basic`] before trusting it.
    pub fn from_uint256(amount: Uint256, contract: Address) -> Self {
        Self {
            amount,
            contract: to_checksum_hex(&contract),
        }
    }

    /// Recover the token from a peggy coin (`peggy0x<contract>`)
    pub fn from_native_coin(coin: &NativeCoin) -> Result<Self, AddressError> {
        let contract = decode_denom_string(&coin.denom)?.token_contract()?;
        Ok(Self::from_uint256(coin.amount, contract))
    }

    pub fn amount(&self) -> Uint256 {
        self.amount
    }

    pub fn contract(&self) -> &str {
        &self.contract
    }

    pub fn contract_address(&self) -> Result<Address, AddressError> {
        parse_eth_address(&self.contract)
    }

    /// The peggy coin representing this token on the native chain
    pub fn peggy_coin(&self) -> NativeCoin {
        let denom = match self.contract_address() {
            Ok(contract) => denom_string(&contract),
            // left unparsed so validation reports the original contract
            Err(_) => format!("{}{}", DenomConfig::STANDARD.full_prefix(), self.contract),
        };

        NativeCoin::new(denom, self.amount)
    }

    /// Stateless validation
    pub fn validate_basic(&self) -> Result<(), ValidationError> {
        validate_eth_address(&self.contract).map_err(ValidationError::InvalidAddress)?;

        let coin = self.peggy_coin();
        if !coin.is_valid() || !coin.is_positive() {
            return Err(ValidationError::InvalidAmount {
                coin: coin.to_string(),
            });
        }

        Ok(())
    }

    /// Add two amounts of the same contract.
    ///
    /// The sum is computed at 256 bits and must fit in a u64.
    pub fn add(&self, other: &Erc20Token) -> Result<Erc20Token, ArithmeticError> {
        let contract = self.shared_contract(other).ok_or_else(|| {
            tracing::debug!(
                left = %self.contract,
                right = %other.contract,
                "Rejected ERC20 sum of different contracts"
            );
            ArithmeticError::MismatchedContract {
                left: self.contract.clone(),
                right: other.contract.clone(),
            }
        })?;

        let overflow = || {
            tracing::debug!(
                contract = %self.contract,
                left = %self.amount,
                right = %other.amount,
                "Rejected ERC20 sum outside the 64-bit range"
            );
            ArithmeticError::AmountOverflow {
                left: self.amount,
                right: other.amount,
            }
        };

        let sum = self.amount.checked_add(other.amount).map_err(|_| overflow())?;
        if sum > Uint256::from(u64::MAX) {
            return Err(overflow());
        }

        Ok(Erc20Token {
            amount: sum,
            contract,
        })
    }

    /// Canonical contract shared by both tokens, if any.
    ///
    /// Parsed addresses are compared as bytes; contracts that do not parse
    /// only match by exact string.
    fn shared_contract(&self, other: &Erc20Token) -> Option<String> {
        match (self.contract_address(), other.contract_address()) {
            (Ok(a), Ok(b)) if a == b => Some(to_checksum_hex(&a)),
            (Ok(_), Ok(_)) => None,
            _ if self.contract == other.contract => Some(self.contract.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USDT: &str = "0xdAC17F958D2ee523a2206206994597C13D831ec7";
    const USDC: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";

    fn usdt() -> Address {
        parse_eth_address(USDT).unwrap()
    }

    fn usdc() -> Address {
        parse_eth_address(USDC).unwrap()
    }

    #[test]
    fn test_new_canonicalizes_contract() {
        let token = Erc20Token::new(100, parse_eth_address(&USDT.to_lowercase()).unwrap());
        assert_eq!(token.contract(), USDT);
        assert_eq!(token.amount(), Uint256::from(100u64));
        assert_eq!(token.contract_address().unwrap(), usdt());
    }

    #[test]
    fn test_peggy_coin() {
        let coin = Erc20Token::new(100, usdt()).peggy_coin();
        assert_eq!(coin.denom, format!("peggy{}", USDT));
        assert_eq!(coin.amount, Uint256::from(100u64));
        assert!(coin.is_valid());
        assert!(coin.is_positive());
    }

    #[test]
    fn test_validate_basic() {
        assert!(Erc20Token::new(1, usdt()).validate_basic().is_ok());
        assert!(Erc20Token::from_uint256(Uint256::MAX, usdt())
            .validate_basic()
            .is_ok());
    }

    #[test]
    fn test_validate_basic_zero_amount() {
        let err = Erc20Token::new(0, usdt()).validate_basic().unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidAmount {
                coin: format!("0peggy{}", USDT)
            }
        );
    }

    #[test]
    fn test_validate_basic_bad_contract() {
        let token: Erc20Token =
            serde_json::from_str(r#"{"amount":"5","contract":"not-an-address"}"#).unwrap();
        assert_eq!(
            token.validate_basic(),
            Err(ValidationError::InvalidAddress(
                AddressError::MalformedAddress {
                    address: "not-an-address".to_string()
                }
            ))
        );

        let token: Erc20Token = serde_json::from_str(r#"{"amount":"5","contract":""}"#).unwrap();
        assert_eq!(
            token.validate_basic(),
            Err(ValidationError::InvalidAddress(AddressError::EmptyAddress))
        );
    }

    #[test]
    fn test_add() {
        let a = Erc20Token::new(5, usdt());
        let b = Erc20Token::new(7, usdt());

        let sum = a.add(&b).unwrap();
        assert_eq!(sum, Erc20Token::new(12, usdt()));

        // operands untouched
        assert_eq!(a.amount(), Uint256::from(5u64));
        assert_eq!(b.amount(), Uint256::from(7u64));
    }

    #[test]
    fn test_add_mismatched_contract() {
        let err = Erc20Token::new(5, usdt())
            .add(&Erc20Token::new(7, usdc()))
            .unwrap_err();
        assert_eq!(
            err,
            ArithmeticError::MismatchedContract {
                left: USDT.to_string(),
                right: USDC.to_string(),
            }
        );
    }

    #[test]
    fn test_add_matches_differently_cased_contracts() {
        let lower: Erc20Token = serde_json::from_str(&format!(
            r#"{{"amount":"1","contract":"{}"}}"#,
            USDT.to_lowercase()
        ))
        .unwrap();

        let sum = lower.add(&Erc20Token::new(2, usdt())).unwrap();
        assert_eq!(sum.contract(), USDT);
        assert_eq!(sum.amount(), Uint256::from(3u64));
    }

    #[test]
    fn test_deserialize_canonicalizes_contract() {
        let lower: Erc20Token = serde_json::from_str(&format!(
            r#"{{"amount":"1","contract":"{}"}}"#,
            USDT.to_lowercase()
        ))
        .unwrap();
        assert_eq!(lower.contract(), USDT);
        assert_eq!(lower, Erc20Token::new(1, usdt()));

        let unprefixed: Erc20Token = serde_json::from_str(&format!(
            r#"{{"amount":"1","contract":"{}"}}"#,
            &USDT[2..]
        ))
        .unwrap();
        assert_eq!(unprefixed, lower);

        // malformed contracts survive untouched
        let bad: Erc20Token =
            serde_json::from_str(r#"{"amount":"1","contract":"0x1234"}"#).unwrap();
        assert_eq!(bad.contract(), "0x1234");
    }

    #[test]
    fn test_peggy_coin_malformed_contract() {
        let bad: Erc20Token =
            serde_json::from_str(r#"{"amount":"1","contract":"0x1234"}"#).unwrap();
        let coin = bad.peggy_coin();
        assert_eq!(
            coin.denom,
            format!("{}0x1234", DenomConfig::STANDARD.full_prefix())
        );
        assert_eq!(coin.amount, Uint256::from(1u64));
    }

    #[test]
    fn test_add_overflow() {
        let max = Erc20Token::new(u64::MAX, usdt());
        let one = Erc20Token::new(1, usdt());
        assert_eq!(
            max.add(&one),
            Err(ArithmeticError::AmountOverflow {
                left: Uint256::from(u64::MAX),
                right: Uint256::from(1u64),
            })
        );

        // exactly u64::MAX is fine
        let sum = Erc20Token::new(u64::MAX - 1, usdt()).add(&one).unwrap();
        assert_eq!(sum.amount(), Uint256::from(u64::MAX));

        // wide operands overflowing 256 bits
        let huge = Erc20Token::from_uint256(Uint256::MAX, usdt());
        assert!(matches!(
            huge.add(&one),
            Err(ArithmeticError::AmountOverflow { .. })
        ));
    }

    #[test]
    fn test_from_native_coin() {
        let token = Erc20Token::new(42, usdt());
        let back = Erc20Token::from_native_coin(&token.peggy_coin()).unwrap();
        assert_eq!(back, token);

        let err = Erc20Token::from_native_coin(&NativeCoin::new("uluna", 1u64)).unwrap_err();
        assert!(matches!(err, AddressError::PrefixMismatch { .. }));
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_value(Erc20Token::new(12, usdt())).unwrap();
        assert_eq!(json, serde_json::json!({ "amount": "12", "contract": USDT }));
    }
}
