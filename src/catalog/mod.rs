//! Catalog items: reusable priced service definitions.
//!
//! Managed by CRUD screens outside this crate; the engines only ever read
//! them. Every price field is optional - incomplete catalog data degrades
//! to zero at pricing time rather than failing.

pub mod models;

pub use models::{Activity, Hotel, SicTransport, TierPrice, Transport, TransportTier, Visa};
