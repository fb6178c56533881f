//! Quotation aggregate and selection entries.
//!
//! A selection entry is a catalog item copied into a quotation together
//! with its booking parameters. Derived fields (nights, sorted date set,
//! locked totals) are computed once at add time by the builder; later
//! catalog edits never retroactively change a saved quotation.

pub mod builder;
pub mod models;

pub use builder::{
    build_activity_entry, build_hotel_entry, build_sic_entry, build_transport_entry,
    build_visa_entry,
};
pub use models::{
    ActivityEntry, HotelEntry, PerHeadPrices, Quotation, QuoteStatus, SicEntry, TimeSlot,
    TransportEntry, VisaEntry,
};
