//! Quotation and selection entry models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::TransportTier;
use crate::session::RateType;

/// Activity scheduling slot within one itinerary day.
///
/// The declaration order is the display order; anything that does not parse
/// as a known slot lands in `Unspecified` and sorts last.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum TimeSlot {
    Arrival,
    #[default]
    Morning,
    Afternoon,
    Evening,
    Night,
    Departure,
    #[serde(other)]
    Unspecified,
}

impl TimeSlot {
    pub fn label(&self) -> &'static str {
        match self {
            TimeSlot::Arrival => "Arrival",
            TimeSlot::Morning => "Morning",
            TimeSlot::Afternoon => "Afternoon",
            TimeSlot::Evening => "Evening",
            TimeSlot::Night => "Night",
            TimeSlot::Departure => "Departure",
            TimeSlot::Unspecified => "Flexible",
        }
    }
}

/// Quotation lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    #[default]
    Draft,
    Confirmed,
    Completed,
}

impl QuoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteStatus::Draft => "draft",
            QuoteStatus::Confirmed => "confirmed",
            QuoteStatus::Completed => "completed",
        }
    }
}

/// Per-head price fields copied from an activity-like catalog item
/// (Activity, Visa, SIC transfer) at selection time.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PerHeadPrices {
    pub adult: Option<Decimal>,
    pub child: Option<Decimal>,
    pub b2b_adult: Option<Decimal>,
    pub b2b_child: Option<Decimal>,
}

/// A hotel stay attached to a quotation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelEntry {
    /// Locally unique, UI-removal only; no pricing meaning
    pub entry_id: i64,
    pub hotel_id: Uuid,
    pub name: String,
    pub place: String,
    pub rating: i16,
    pub image_url: Option<String>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    /// ceil(days between check-in and check-out), minimum 1
    pub nights: i64,
    pub rooms: i64,
    /// Extra beds per room
    pub extra_beds: i64,
    pub price_per_night: Option<Decimal>,
    pub extra_bed_price: Option<Decimal>,
    pub b2b_price_per_night: Option<Decimal>,
    pub b2b_extra_bed_price: Option<Decimal>,
    /// Frozen at add time
    pub total_price: Decimal,
}

/// An activity attached to a quotation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub entry_id: i64,
    pub activity_id: Uuid,
    pub name: String,
    pub place: String,
    pub image_url: Option<String>,
    pub date: Option<NaiveDate>,
    pub time_slot: TimeSlot,
    /// Per-entry traveler overrides; global counts apply when unset
    pub custom_adults: Option<i64>,
    pub custom_children: Option<i64>,
    pub prices: PerHeadPrices,
    pub total_price: Decimal,
}

/// A private-vehicle booking attached to a quotation.
///
/// The per-day price is locked in by the builder; catalog price changes
/// after that point do not alter the entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportEntry {
    pub entry_id: i64,
    pub transport_id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
    pub tier: TransportTier,
    /// Deduplicated, ascending
    pub dates: Vec<NaiveDate>,
    pub days: i64,
    /// Locked per-day rate
    pub price: Decimal,
    pub total_price: Decimal,
}

/// A visa service attached to a quotation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisaEntry {
    pub entry_id: i64,
    pub visa_id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
    pub prices: PerHeadPrices,
    pub total_price: Decimal,
}

/// A seat-in-coach transfer attached to a quotation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SicEntry {
    pub entry_id: i64,
    pub sic_id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
    pub prices: PerHeadPrices,
    pub total_price: Decimal,
}

/// Per-category subtotals plus the grand total
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteTotals {
    pub hotels: Decimal,
    pub activities: Decimal,
    pub transport: Decimal,
    pub visas: Decimal,
    pub sic: Decimal,
    pub grand_total: Decimal,
}

/// The aggregate root: one client's priced, itemized trip proposal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quotation {
    pub id: Uuid,
    pub traveler_name: String,
    pub phone: String,
    pub country_code: String,
    pub destination: String,
    pub arrival_date: Option<NaiveDate>,
    pub departure_date: Option<NaiveDate>,
    pub adults: i64,
    pub children: i64,
    /// Free-form service tags; no pricing effect
    pub inclusions: Vec<String>,
    pub branch: String,
    pub status: QuoteStatus,
    pub rate_type: RateType,
    pub currency: crate::pricing::Currency,
    pub hotels: Vec<HotelEntry>,
    pub activities: Vec<ActivityEntry>,
    pub transports: Vec<TransportEntry>,
    pub visas: Vec<VisaEntry>,
    pub sic_transports: Vec<SicEntry>,
    pub commission: Decimal,
    pub additional_amount: Decimal,
    /// Toggles the flat fixed-charges amount in the grand total
    pub apply_fixed_charges: bool,
    pub totals: QuoteTotals,
    pub created_by: String,
}

impl Quotation {
    /// Empty draft for a session.
    pub fn draft(session: &crate::session::SessionContext) -> Self {
        Self {
            id: Uuid::new_v4(),
            traveler_name: String::new(),
            phone: String::new(),
            country_code: String::new(),
            destination: String::new(),
            arrival_date: None,
            departure_date: None,
            adults: 1,
            children: 0,
            inclusions: Vec::new(),
            branch: session.branch.clone(),
            status: QuoteStatus::Draft,
            rate_type: session.rate_type,
            currency: crate::pricing::Currency::Aed,
            hotels: Vec::new(),
            activities: Vec::new(),
            transports: Vec::new(),
            visas: Vec::new(),
            sic_transports: Vec::new(),
            commission: Decimal::ZERO,
            additional_amount: Decimal::ZERO,
            apply_fixed_charges: false,
            totals: QuoteTotals::default(),
            created_by: session.username.clone(),
        }
    }

    /// Copy without identity: a fresh draft owned by `session`, carrying
    /// all selections and adjustments but a new id.
    pub fn duplicate(&self, session: &crate::session::SessionContext) -> Self {
        let mut copy = self.clone();
        copy.id = Uuid::new_v4();
        copy.status = QuoteStatus::Draft;
        copy.created_by = session.username.clone();
        copy.branch = session.branch.clone();
        copy
    }

    /// Total traveler count, never below 1 (used for price-per-person).
    pub fn traveler_count(&self) -> i64 {
        (self.adults + self.children).max(1)
    }

    /// Hotel entries in document order: check-in date ascending.
    pub fn hotels_by_check_in(&self) -> Vec<&HotelEntry> {
        let mut hotels: Vec<&HotelEntry> = self.hotels.iter().collect();
        hotels.sort_by_key(|h| (h.check_in, h.entry_id));
        hotels
    }

    /// Activities grouped by calendar date for the itinerary: dated groups
    /// ascending, the undated/flexible bucket last, and each group sorted
    /// by time slot (unrecognized slots last).
    pub fn itinerary_groups(&self) -> Vec<(Option<NaiveDate>, Vec<&ActivityEntry>)> {
        use std::collections::BTreeMap;

        let mut dated: BTreeMap<NaiveDate, Vec<&ActivityEntry>> = BTreeMap::new();
        let mut undated: Vec<&ActivityEntry> = Vec::new();

        for entry in &self.activities {
            match entry.date {
                Some(date) => dated.entry(date).or_default().push(entry),
                None => undated.push(entry),
            }
        }

        let mut groups: Vec<(Option<NaiveDate>, Vec<&ActivityEntry>)> = dated
            .into_iter()
            .map(|(date, mut entries)| {
                entries.sort_by_key(|e| (e.time_slot, e.entry_id));
                (Some(date), entries)
            })
            .collect();

        if !undated.is_empty() {
            undated.sort_by_key(|e| (e.time_slot, e.entry_id));
            groups.push((None, undated));
        }
        groups
    }
}
