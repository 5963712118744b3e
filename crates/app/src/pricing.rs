// Path: crates/app/src/pricing.rs

//! Course price to payment amount.
//!
//! Prices are catalog units, not a currency: a price `P` is charged as `P / 1000` ether.

use learnchain_types::chain::{Address, Wei};
use learnchain_types::error::{ContractError, ValidationError};
use learnchain_types::Organization;

/// Charged for free courses, so that every enrollment still carries an on-chain payment.
pub const MIN_PAYMENT_WEI: Wei = Wei(1_000_000_000);
pub const PRICE_SCALE_DIVISOR: f64 = 1000.0;

/// Converts a catalog price to wei, exactly in decimal.
pub fn payment_amount(price: f64) -> Result<Wei, ValidationError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError::InvalidPrice(price.to_string()));
    }
    if price == 0.0 {
        return Ok(MIN_PAYMENT_WEI);
    }
    // Shortest round-trip rendering, so 49.99 becomes "0.04999" and not a binary
    // approximation of it.
    let ether = (price / PRICE_SCALE_DIVISOR).to_string();
    Wei::from_ether_str(&ether).map_err(|_| ValidationError::InvalidPrice(price.to_string()))
}

/// The organization's own wallet, or `fallback` when it has none.
pub fn payment_recipient(
    organization: Option<&Organization>,
    fallback: Address,
) -> Result<Address, ContractError> {
    match organization.and_then(Organization::payment_address) {
        Some(address) => address.parse(),
        None => Ok(fallback),
    }
}
