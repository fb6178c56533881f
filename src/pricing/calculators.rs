//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no database access, no I/O. Missing or
//! unpriced catalog fields degrade to zero; nothing in here returns an error.

use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

use crate::pricing::resolve::resolve_price;
use crate::quote::models::{
    ActivityEntry, HotelEntry, PerHeadPrices, Quotation, QuoteTotals, SicEntry, TransportEntry,
    VisaEntry,
};
use crate::session::RateType;

/// Flat charge added to the grand total when the quotation's toggle is on.
pub const FIXED_CHARGES: Decimal = dec!(50);

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Price one hotel stay: nights x rooms x per-night rate, plus
/// nights x rooms x extra beds x extra-bed rate. Unit prices resolve by
/// rate type with the standard B2C fallback.
pub fn price_hotel_entry(entry: &HotelEntry, rate_type: RateType) -> Decimal {
    let per_night = resolve_price(entry.price_per_night, entry.b2b_price_per_night, rate_type);
    let extra_bed = resolve_price(entry.extra_bed_price, entry.b2b_extra_bed_price, rate_type);

    let nights = Decimal::from(entry.nights.max(1));
    let rooms = Decimal::from(entry.rooms.max(0));
    let beds = Decimal::from(entry.extra_beds.max(0));

    (nights * rooms * per_night + nights * rooms * beds * extra_bed).max(Decimal::ZERO)
}

/// Price a per-head entry (activity, visa, SIC transfer):
/// adults x adult rate + children x child rate.
///
/// `adults`/`children` are the counts already resolved by the caller
/// (entry-level overrides for activities, global counts otherwise).
pub fn price_per_head(
    prices: &PerHeadPrices,
    adults: i64,
    children: i64,
    rate_type: RateType,
) -> Decimal {
    let adult_rate = resolve_price(prices.adult, prices.b2b_adult, rate_type);
    let child_rate = resolve_price(prices.child, prices.b2b_child, rate_type);

    let amount =
        Decimal::from(adults.max(0)) * adult_rate + Decimal::from(children.max(0)) * child_rate;
    amount.max(Decimal::ZERO)
}

/// Price an activity entry, honoring its per-entry traveler overrides.
pub fn price_activity_entry(
    entry: &ActivityEntry,
    global_adults: i64,
    global_children: i64,
    rate_type: RateType,
) -> Decimal {
    let adults = entry.custom_adults.unwrap_or(global_adults);
    let children = entry.custom_children.unwrap_or(global_children);
    price_per_head(&entry.prices, adults, children, rate_type)
}

/// Price a transport entry. The per-day rate and day count were locked in
/// at add time; catalog price changes after that never alter the total.
pub fn price_transport_entry(entry: &TransportEntry) -> Decimal {
    (entry.price * Decimal::from(entry.days.max(0))).max(Decimal::ZERO)
}

/// Sum a pricer over a collection; an empty collection yields zero.
pub fn category_total<T>(entries: &[T], pricer: impl Fn(&T) -> Decimal) -> Decimal {
    entries.iter().map(pricer).sum()
}

/// Compute all five category subtotals and the grand total from a
/// quotation's current in-memory state.
pub fn compute_totals(quote: &Quotation) -> QuoteTotals {
    let rate_type = quote.rate_type;

    let hotels = category_total(&quote.hotels, |e| price_hotel_entry(e, rate_type));
    let activities = category_total(&quote.activities, |e: &ActivityEntry| {
        price_activity_entry(e, quote.adults, quote.children, rate_type)
    });
    let transport = category_total(&quote.transports, price_transport_entry);
    let visas = category_total(&quote.visas, |e: &VisaEntry| {
        price_per_head(&e.prices, quote.adults, quote.children, rate_type)
    });
    let sic = category_total(&quote.sic_transports, |e: &SicEntry| {
        price_per_head(&e.prices, quote.adults, quote.children, rate_type)
    });

    let fixed = if quote.apply_fixed_charges {
        FIXED_CHARGES
    } else {
        Decimal::ZERO
    };

    let grand_total = (hotels + activities + transport + visas + sic
        + quote.commission
        + fixed
        + quote.additional_amount)
        .max(Decimal::ZERO);

    QuoteTotals {
        hotels,
        activities,
        transport,
        visas,
        sic,
        grand_total,
    }
}

/// Recompute and store totals on the quotation. Call before persisting or
/// exporting; the store never recomputes them.
pub fn apply_totals(quote: &mut Quotation) {
    quote.totals = compute_totals(quote);
}
