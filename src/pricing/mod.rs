//! Pricing engine.
//!
//! Pure, side-effect-free computation of category subtotals and the grand
//! total for a quotation, plus rate-type resolution and display currency
//! formatting. Deterministic given its inputs; no I/O.

pub mod calculators;
pub mod currency;
pub mod resolve;

// Re-export commonly used items
pub use calculators::{
    apply_totals, category_total, compute_totals, price_activity_entry, price_hotel_entry,
    price_per_head, price_transport_entry, round_money, FIXED_CHARGES,
};
pub use currency::{format_amount, format_amount_symbol, Currency};
pub use resolve::{resolve_price, resolve_tier_price};
