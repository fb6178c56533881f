//! Selection entry builder.
//!
//! Validates user-chosen booking parameters against a catalog item and
//! materializes a selection entry with its derived fields frozen (nights,
//! sorted date set, locked per-day price, total). Rejections are
//! `AppError::Validation`; no partial entry is ever produced.

use std::collections::BTreeSet;

use chrono::{NaiveDate, Utc};
use tracing::warn;

use crate::catalog::{Activity, Hotel, SicTransport, Transport, TransportTier, Visa};
use crate::error::{AppError, Result};
use crate::pricing::{price_hotel_entry, price_per_head, resolve_tier_price};
use crate::quote::models::{
    ActivityEntry, HotelEntry, PerHeadPrices, SicEntry, TimeSlot, TransportEntry, VisaEntry,
};
use crate::session::RateType;

/// User-chosen parameters for a hotel stay
#[derive(Debug, Clone, Default)]
pub struct HotelBooking {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub rooms: i64,
    pub extra_beds: i64,
}

/// User-chosen parameters for an activity
#[derive(Debug, Clone, Default)]
pub struct ActivityBooking {
    pub date: Option<NaiveDate>,
    pub time_slot: TimeSlot,
    pub custom_adults: Option<i64>,
    pub custom_children: Option<i64>,
}

fn next_entry_id() -> i64 {
    // Creation timestamp; only used for UI removal, no pricing meaning.
    Utc::now().timestamp_millis()
}

/// Build a hotel entry. Requires both dates with check-out at least one day
/// after check-in; nights are clamped to a minimum of one.
pub fn build_hotel_entry(
    hotel: &Hotel,
    booking: &HotelBooking,
    rate_type: RateType,
) -> Result<HotelEntry> {
    let check_in = booking
        .check_in
        .ok_or_else(|| AppError::Validation("Check-in date is required".to_string()))?;
    let check_out = booking
        .check_out
        .ok_or_else(|| AppError::Validation("Check-out date is required".to_string()))?;

    if check_out <= check_in {
        return Err(AppError::Validation(
            "Check-out must be at least one day after check-in".to_string(),
        ));
    }

    let nights = (check_out - check_in).num_days().max(1);

    if hotel.price_per_night.is_none() && hotel.b2b_price_per_night.is_none() {
        warn!("Hotel '{}' has no nightly price; entry totals zero", hotel.name);
    }

    let mut entry = HotelEntry {
        entry_id: next_entry_id(),
        hotel_id: hotel.id,
        name: hotel.name.clone(),
        place: hotel.place.clone(),
        rating: hotel.rating,
        image_url: hotel.image_url.clone(),
        check_in,
        check_out,
        nights,
        rooms: booking.rooms.max(0),
        extra_beds: booking.extra_beds.max(0),
        price_per_night: hotel.price_per_night,
        extra_bed_price: hotel.extra_bed_price,
        b2b_price_per_night: hotel.b2b_price_per_night,
        b2b_extra_bed_price: hotel.b2b_extra_bed_price,
        total_price: Default::default(),
    };
    entry.total_price = price_hotel_entry(&entry, rate_type);
    Ok(entry)
}

/// Build an activity entry. Requires a date; traveler overrides default to
/// the quotation's global counts.
pub fn build_activity_entry(
    activity: &Activity,
    booking: &ActivityBooking,
    global_adults: i64,
    global_children: i64,
    rate_type: RateType,
) -> Result<ActivityEntry> {
    let date = booking
        .date
        .ok_or_else(|| AppError::Validation("Activity date is required".to_string()))?;

    let prices = PerHeadPrices {
        adult: activity.adult_price,
        child: activity.child_price,
        b2b_adult: activity.b2b_adult_price,
        b2b_child: activity.b2b_child_price,
    };
    let adults = booking.custom_adults.unwrap_or(global_adults);
    let children = booking.custom_children.unwrap_or(global_children);

    Ok(ActivityEntry {
        entry_id: next_entry_id(),
        activity_id: activity.id,
        name: activity.name.clone(),
        place: activity.place.clone(),
        image_url: activity.image_url.clone(),
        date: Some(date),
        time_slot: booking.time_slot,
        custom_adults: booking.custom_adults,
        custom_children: booking.custom_children,
        total_price: price_per_head(&prices, adults, children, rate_type),
        prices,
    })
}

/// Build a transport entry. Requires at least one date; duplicate calendar
/// days are silently deduplicated and the set stored ascending. The per-day
/// rate for the chosen tier is locked in here.
pub fn build_transport_entry(
    transport: &Transport,
    tier: TransportTier,
    dates: &[NaiveDate],
    rate_type: RateType,
) -> Result<TransportEntry> {
    if dates.is_empty() {
        return Err(AppError::Validation(
            "At least one transport date is required".to_string(),
        ));
    }

    let unique: BTreeSet<NaiveDate> = dates.iter().copied().collect();
    let dates: Vec<NaiveDate> = unique.into_iter().collect();
    let days = dates.len() as i64;
    let price = resolve_tier_price(transport.tier_price(tier), rate_type);

    if price.is_zero() {
        warn!(
            "Transport '{}' has no price for the {}; entry totals zero",
            transport.name,
            tier.label()
        );
    }

    Ok(TransportEntry {
        entry_id: next_entry_id(),
        transport_id: transport.id,
        name: transport.name.clone(),
        image_url: transport.image_url.clone(),
        tier,
        dates,
        days,
        price,
        total_price: price * rust_decimal::Decimal::from(days),
    })
}

/// Build a visa entry priced against the quotation's global counts.
pub fn build_visa_entry(
    visa: &Visa,
    global_adults: i64,
    global_children: i64,
    rate_type: RateType,
) -> Result<VisaEntry> {
    let prices = PerHeadPrices {
        adult: visa.adult_price,
        child: visa.child_price,
        b2b_adult: visa.b2b_adult_price,
        b2b_child: visa.b2b_child_price,
    };
    Ok(VisaEntry {
        entry_id: next_entry_id(),
        visa_id: visa.id,
        name: visa.name.clone(),
        image_url: visa.image_url.clone(),
        total_price: price_per_head(&prices, global_adults, global_children, rate_type),
        prices,
    })
}

/// Build a seat-in-coach entry priced against the quotation's global counts.
pub fn build_sic_entry(
    sic: &SicTransport,
    global_adults: i64,
    global_children: i64,
    rate_type: RateType,
) -> Result<SicEntry> {
    let prices = PerHeadPrices {
        adult: sic.adult_price,
        child: sic.child_price,
        b2b_adult: sic.b2b_adult_price,
        b2b_child: sic.b2b_child_price,
    };
    Ok(SicEntry {
        entry_id: next_entry_id(),
        sic_id: sic.id,
        name: sic.name.clone(),
        image_url: sic.image_url.clone(),
        total_price: price_per_head(&prices, global_adults, global_children, rate_type),
        prices,
    })
}
