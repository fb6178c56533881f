//! Catalog item models
//!
//! Each kind carries a B2C and a B2B price schedule. B2B fields fall back
//! to their B2C counterpart when absent or zero (see `pricing::resolve`).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Hotel from the hotel management screen
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Hotel {
    pub id: Uuid,
    pub name: String,
    pub place: String,
    /// 1-5 stars
    pub rating: i16,
    pub image_url: Option<String>,
    pub price_per_night: Option<Decimal>,
    pub extra_bed_price: Option<Decimal>,
    pub b2b_price_per_night: Option<Decimal>,
    pub b2b_extra_bed_price: Option<Decimal>,
}

/// Activity (tour / experience) priced per traveler
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Activity {
    pub id: Uuid,
    pub name: String,
    pub place: String,
    pub image_url: Option<String>,
    pub adult_price: Option<Decimal>,
    pub child_price: Option<Decimal>,
    pub b2b_adult_price: Option<Decimal>,
    pub b2b_child_price: Option<Decimal>,
}

/// Visa service priced per traveler
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Visa {
    pub id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
    pub adult_price: Option<Decimal>,
    pub child_price: Option<Decimal>,
    pub b2b_adult_price: Option<Decimal>,
    pub b2b_child_price: Option<Decimal>,
}

/// Seat-in-coach (shared) transfer priced per traveler
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SicTransport {
    pub id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
    pub adult_price: Option<Decimal>,
    pub child_price: Option<Decimal>,
    pub b2b_adult_price: Option<Decimal>,
    pub b2b_child_price: Option<Decimal>,
}

/// Vehicle capacity tier for private ground transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportTier {
    Seats7,
    Seats14,
    Seats22,
    Seats35,
    Seats50,
}

impl TransportTier {
    pub const ALL: [TransportTier; 5] = [
        TransportTier::Seats7,
        TransportTier::Seats14,
        TransportTier::Seats22,
        TransportTier::Seats35,
        TransportTier::Seats50,
    ];

    pub fn seats(&self) -> u32 {
        match self {
            TransportTier::Seats7 => 7,
            TransportTier::Seats14 => 14,
            TransportTier::Seats22 => 22,
            TransportTier::Seats35 => 35,
            TransportTier::Seats50 => 50,
        }
    }

    pub fn label(&self) -> String {
        format!("{}-seater", self.seats())
    }
}

/// Per-day price pair for one vehicle tier
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TierPrice {
    pub b2c: Option<Decimal>,
    pub b2b: Option<Decimal>,
}

/// Private transport provider with one price pair per capacity tier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transport {
    pub id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
    pub seats_7: TierPrice,
    pub seats_14: TierPrice,
    pub seats_22: TierPrice,
    pub seats_35: TierPrice,
    pub seats_50: TierPrice,
}

impl Transport {
    /// Explicit tier-to-price mapping. Every tier is a compile-time-checked
    /// case; there is no field lookup by constructed name.
    pub fn tier_price(&self, tier: TransportTier) -> TierPrice {
        match tier {
            TransportTier::Seats7 => self.seats_7,
            TransportTier::Seats14 => self.seats_14,
            TransportTier::Seats22 => self.seats_22,
            TransportTier::Seats35 => self.seats_35,
            TransportTier::Seats50 => self.seats_50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_tier_seat_counts() {
        let seats: Vec<u32> = TransportTier::ALL.iter().map(|t| t.seats()).collect();
        assert_eq!(seats, vec![7, 14, 22, 35, 50]);
    }

    #[test]
    fn test_tier_price_mapping() {
        let transport = Transport {
            id: Uuid::nil(),
            name: "Desert Wheels".to_string(),
            image_url: None,
            seats_7: TierPrice {
                b2c: Some(dec!(90)),
                b2b: Some(dec!(80)),
            },
            seats_14: TierPrice::default(),
            seats_22: TierPrice::default(),
            seats_35: TierPrice::default(),
            seats_50: TierPrice {
                b2c: Some(dec!(300)),
                b2b: None,
            },
        };

        assert_eq!(
            transport.tier_price(TransportTier::Seats7).b2c,
            Some(dec!(90))
        );
        assert_eq!(
            transport.tier_price(TransportTier::Seats50).b2b,
            None
        );
        assert_eq!(transport.tier_price(TransportTier::Seats22).b2c, None);
    }

    #[test]
    fn test_tier_label() {
        assert_eq!(TransportTier::Seats35.label(), "35-seater");
    }
}
