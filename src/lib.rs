//! Quotation pricing and itinerary document engine for a travel agency.
//!
//! Two engines share one domain model:
//!
//! * [`pricing`] aggregates a quotation's selected services into category
//!   subtotals and a grand total under a B2C or B2B rate schedule, with
//!   display-currency conversion.
//! * [`document`] renders the priced quotation into a deterministic
//!   multi-page PDF itinerary.
//!
//! Catalog CRUD, authentication and UI live elsewhere; this crate exposes
//! the calculators, the entry builders, the composition pipeline and the
//! persistence queries they rest on.

pub mod catalog;
pub mod config;
pub mod db;
pub mod document;
pub mod error;
pub mod pricing;
pub mod quote;
pub mod session;

pub use config::Config;
pub use document::{compose, ComposeOptions, DocumentArtifact};
pub use error::{AppError, Result};
pub use pricing::{apply_totals, compute_totals, format_amount, Currency};
pub use quote::Quotation;
pub use session::{RateType, SessionContext};

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. The consuming binary calls this
/// once at startup; `RUST_LOG` overrides the default `info` level. Repeat
/// calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
