//! Rate-type price resolution.
//!
//! The single place the B2B-to-B2C fallback lives. Every cost computation
//! in both engines goes through `resolve_price`, so the fallback law
//! (B2B absent/zero => B2C value) holds uniformly.

use rust_decimal::Decimal;

use crate::catalog::TierPrice;
use crate::session::RateType;

/// Resolve a unit price from a B2C/B2B field pair.
///
/// B2B resolves to the B2B field when it is present and non-zero, otherwise
/// to the B2C field. A missing B2C field resolves to zero - incomplete
/// catalog data never errors.
pub fn resolve_price(b2c: Option<Decimal>, b2b: Option<Decimal>, rate_type: RateType) -> Decimal {
    match rate_type {
        RateType::B2b => match b2b {
            Some(amount) if !amount.is_zero() => amount,
            _ => b2c.unwrap_or(Decimal::ZERO),
        },
        RateType::B2c => b2c.unwrap_or(Decimal::ZERO),
    }
}

/// Resolve the per-day rate for a vehicle tier.
pub fn resolve_tier_price(price: TierPrice, rate_type: RateType) -> Decimal {
    resolve_price(price.b2c, price.b2b, rate_type)
}
