//! Database queries for catalog listings and quotation persistence.
//!
//! Catalog rows map straight onto the catalog models. Quotations are stored
//! as one JSONB record per row with the ownership and lifecycle columns
//! lifted out for filtering; the record is the source of truth, the scalar
//! columns exist only for WHERE clauses and list screens.

use sqlx::PgPool;
use uuid::Uuid;

use crate::catalog::{Activity, Hotel, SicTransport, TierPrice, Transport, Visa};
use crate::error::{AppError, Result};
use crate::quote::models::Quotation;
use crate::session::SessionContext;

/// All hotels, name order.
pub async fn list_hotels(pool: &PgPool) -> Result<Vec<Hotel>> {
    let hotels = sqlx::query_as::<_, Hotel>(
        r#"
        SELECT
            id, name, place, rating, image_url,
            price_per_night, extra_bed_price,
            b2b_price_per_night, b2b_extra_bed_price
        FROM hotels
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(hotels)
}

/// All activities, name order.
pub async fn list_activities(pool: &PgPool) -> Result<Vec<Activity>> {
    let activities = sqlx::query_as::<_, Activity>(
        r#"
        SELECT
            id, name, place, image_url,
            adult_price, child_price,
            b2b_adult_price, b2b_child_price
        FROM activities
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(activities)
}

/// Flat row shape for transports; tier pairs are folded in Rust.
#[derive(sqlx::FromRow)]
struct TransportRow {
    id: Uuid,
    name: String,
    image_url: Option<String>,
    seats_7_price: Option<rust_decimal::Decimal>,
    seats_7_b2b_price: Option<rust_decimal::Decimal>,
    seats_14_price: Option<rust_decimal::Decimal>,
    seats_14_b2b_price: Option<rust_decimal::Decimal>,
    seats_22_price: Option<rust_decimal::Decimal>,
    seats_22_b2b_price: Option<rust_decimal::Decimal>,
    seats_35_price: Option<rust_decimal::Decimal>,
    seats_35_b2b_price: Option<rust_decimal::Decimal>,
    seats_50_price: Option<rust_decimal::Decimal>,
    seats_50_b2b_price: Option<rust_decimal::Decimal>,
}

impl From<TransportRow> for Transport {
    fn from(row: TransportRow) -> Self {
        let pair = |b2c, b2b| TierPrice { b2c, b2b };
        Transport {
            id: row.id,
            name: row.name,
            image_url: row.image_url,
            seats_7: pair(row.seats_7_price, row.seats_7_b2b_price),
            seats_14: pair(row.seats_14_price, row.seats_14_b2b_price),
            seats_22: pair(row.seats_22_price, row.seats_22_b2b_price),
            seats_35: pair(row.seats_35_price, row.seats_35_b2b_price),
            seats_50: pair(row.seats_50_price, row.seats_50_b2b_price),
        }
    }
}

/// All private-transport providers, name order.
pub async fn list_transports(pool: &PgPool) -> Result<Vec<Transport>> {
    let rows = sqlx::query_as::<_, TransportRow>(
        r#"
        SELECT
            id, name, image_url,
            seats_7_price, seats_7_b2b_price,
            seats_14_price, seats_14_b2b_price,
            seats_22_price, seats_22_b2b_price,
            seats_35_price, seats_35_b2b_price,
            seats_50_price, seats_50_b2b_price
        FROM transports
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Transport::from).collect())
}

/// All visa services, name order.
pub async fn list_visas(pool: &PgPool) -> Result<Vec<Visa>> {
    let visas = sqlx::query_as::<_, Visa>(
        r#"
        SELECT
            id, name, image_url,
            adult_price, child_price,
            b2b_adult_price, b2b_child_price
        FROM visas
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(visas)
}

/// All seat-in-coach transfers, name order.
pub async fn list_sic_transports(pool: &PgPool) -> Result<Vec<SicTransport>> {
    let transfers = sqlx::query_as::<_, SicTransport>(
        r#"
        SELECT
            id, name, image_url,
            adult_price, child_price,
            b2b_adult_price, b2b_child_price
        FROM sic_transports
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(transfers)
}

/// One row of the quotation list screen.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct QuotationSummary {
    pub id: Uuid,
    pub traveler_name: String,
    pub destination: String,
    pub status: String,
    pub created_by: String,
}

#[derive(sqlx::FromRow)]
struct QuotationRow {
    created_by: String,
    record: serde_json::Value,
}

fn decode_record(row: QuotationRow) -> Result<Quotation> {
    serde_json::from_value(row.record)
        .map_err(|e| AppError::Internal(format!("corrupt quotation record: {e}")))
}

/// Insert a new quotation.
pub async fn create_quotation(pool: &PgPool, quote: &Quotation) -> Result<()> {
    let record = serde_json::to_value(quote)
        .map_err(|e| AppError::Internal(format!("unserializable quotation: {e}")))?;

    sqlx::query(
        r#"
        INSERT INTO quotations (id, branch, status, traveler_name, destination, created_by, record)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(quote.id)
    .bind(&quote.branch)
    .bind(quote.status.as_str())
    .bind(&quote.traveler_name)
    .bind(&quote.destination)
    .bind(&quote.created_by)
    .bind(record)
    .execute(pool)
    .await?;

    Ok(())
}

/// Replace a stored quotation. Non-admin sessions may only touch their own.
pub async fn update_quotation(
    pool: &PgPool,
    quote: &Quotation,
    session: &SessionContext,
) -> Result<()> {
    let owner = sqlx::query_scalar::<_, String>(
        r#"SELECT created_by FROM quotations WHERE id = $1"#,
    )
    .bind(quote.id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)?;

    if !session.can_access(&owner) {
        return Err(AppError::Forbidden(
            "quotation belongs to another user".to_string(),
        ));
    }

    let record = serde_json::to_value(quote)
        .map_err(|e| AppError::Internal(format!("unserializable quotation: {e}")))?;

    sqlx::query(UPDATE_QUOTATION_SQL)
        .bind(quote.id)
        .bind(quote.status.as_str())
        .bind(&quote.traveler_name)
        .bind(&quote.destination)
        .bind(&quote.branch)
        .bind(record)
        .execute(pool)
        .await?;

    Ok(())
}

/// Every scalar column lifted out of the record for filtering must be
/// refreshed here, or it drifts from the JSONB on update.
const UPDATE_QUOTATION_SQL: &str = r#"
    UPDATE quotations
    SET status = $2, traveler_name = $3, destination = $4, branch = $5,
        record = $6, updated_at = now()
    WHERE id = $1
"#;

/// Load one quotation, subject to ownership.
pub async fn get_quotation(pool: &PgPool, id: Uuid, session: &SessionContext) -> Result<Quotation> {
    let row = sqlx::query_as::<_, QuotationRow>(
        r#"SELECT created_by, record FROM quotations WHERE id = $1"#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)?;

    if !session.can_access(&row.created_by) {
        return Err(AppError::Forbidden(
            "quotation belongs to another user".to_string(),
        ));
    }
    decode_record(row)
}

/// Quotation list for the session: admins see every row, everyone else
/// only their own, newest first.
pub async fn list_quotations(
    pool: &PgPool,
    session: &SessionContext,
) -> Result<Vec<QuotationSummary>> {
    let rows = if session.is_admin {
        sqlx::query_as::<_, QuotationSummary>(
            r#"
            SELECT id, traveler_name, destination, status, created_by
            FROM quotations
            ORDER BY updated_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?
    } else {
        sqlx::query_as::<_, QuotationSummary>(
            r#"
            SELECT id, traveler_name, destination, status, created_by
            FROM quotations
            WHERE created_by = $1
            ORDER BY updated_at DESC
            "#,
        )
        .bind(&session.username)
        .fetch_all(pool)
        .await?
    };

    Ok(rows)
}

/// Delete a quotation. Admin only.
pub async fn delete_quotation(pool: &PgPool, id: Uuid, session: &SessionContext) -> Result<()> {
    if !session.is_admin {
        return Err(AppError::Forbidden(
            "only admins may delete quotations".to_string(),
        ));
    }

    let result = sqlx::query(r#"DELETE FROM quotations WHERE id = $1"#)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::RateType;
    use rust_decimal_macros::dec;

    #[test]
    fn test_transport_row_folds_tier_pairs() {
        let row = TransportRow {
            id: Uuid::nil(),
            name: "Desert Wheels".to_string(),
            image_url: None,
            seats_7_price: Some(dec!(90)),
            seats_7_b2b_price: Some(dec!(80)),
            seats_14_price: None,
            seats_14_b2b_price: None,
            seats_22_price: Some(dec!(150)),
            seats_22_b2b_price: None,
            seats_35_price: None,
            seats_35_b2b_price: None,
            seats_50_price: None,
            seats_50_b2b_price: None,
        };
        let transport = Transport::from(row);
        assert_eq!(transport.seats_7.b2c, Some(dec!(90)));
        assert_eq!(transport.seats_7.b2b, Some(dec!(80)));
        assert_eq!(transport.seats_22.b2c, Some(dec!(150)));
        assert_eq!(transport.seats_22.b2b, None);
        assert_eq!(transport.seats_50.b2c, None);
    }

    #[test]
    fn test_record_round_trip() {
        let session = SessionContext {
            branch: "DXB".to_string(),
            username: "alice".to_string(),
            rate_type: RateType::B2c,
            is_admin: false,
        };
        let mut quote = Quotation::draft(&session);
        quote.traveler_name = "Jordan Lee".to_string();
        quote.commission = dec!(75);

        let value = serde_json::to_value(&quote).unwrap();
        let row = QuotationRow {
            created_by: quote.created_by.clone(),
            record: value,
        };
        let decoded = decode_record(row).unwrap();
        assert_eq!(decoded.id, quote.id);
        assert_eq!(decoded.commission, dec!(75));
    }

    #[test]
    fn test_update_refreshes_every_lifted_column() {
        // Columns the insert lifts out of the record, minus the immutable
        // id and created_by
        for column in ["status", "traveler_name", "destination", "branch"] {
            assert!(
                UPDATE_QUOTATION_SQL.contains(&format!("{column} = $")),
                "update statement does not refresh {column}"
            );
        }
        assert!(UPDATE_QUOTATION_SQL.contains("record = $"));
    }

    #[test]
    fn test_corrupt_record_is_internal_error() {
        let row = QuotationRow {
            created_by: "alice".to_string(),
            record: serde_json::json!({"nonsense": true}),
        };
        assert!(matches!(
            decode_record(row),
            Err(AppError::Internal(_))
        ));
    }
}
