//! PostgreSQL implementation of ShipmentRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::foundation::{
    AdminId, DomainError, ErrorCode, OrderId, ShipmentId, Timestamp,
};
use crate::domain::shipment::{CarrierCode, ServiceType, ShipmentRecord, ShipmentStatus};
use crate::ports::ShipmentRepository;

/// PostgreSQL implementation of the ShipmentRepository port.
///
/// The `shipments_one_created_per_order` partial unique index guarantees
/// at most one `created` shipment per order; a violation maps to
/// `ErrorCode::DuplicateShipment` so races surface as conflicts.
pub struct PgShipmentRepository {
    pool: PgPool,
}

impl PgShipmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a shipment.
#[derive(Debug, sqlx::FromRow)]
struct ShipmentRow {
    id: Uuid,
    order_id: Uuid,
    carrier: String,
    carrier_shipment_id: String,
    tracking_number: String,
    label_url: Option<String>,
    status: String,
    service_type: String,
    created_by: Uuid,
    created_at: DateTime<Utc>,
}

impl TryFrom<ShipmentRow> for ShipmentRecord {
    type Error = DomainError;

    fn try_from(row: ShipmentRow) -> Result<Self, Self::Error> {
        let carrier = CarrierCode::from_str(&row.carrier).map_err(|_| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid carrier value: {}", row.carrier),
            )
        })?;
        let status = parse_status(&row.status)?;
        let service_type = parse_service_type(&row.service_type)?;

        Ok(ShipmentRecord {
            id: ShipmentId::from_uuid(row.id),
            order_id: OrderId::from_uuid(row.order_id),
            carrier,
            carrier_shipment_id: row.carrier_shipment_id,
            tracking_number: row.tracking_number,
            label_url: row.label_url,
            status,
            service_type,
            created_by: AdminId::from_uuid(row.created_by),
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

fn parse_status(s: &str) -> Result<ShipmentStatus, DomainError> {
    match s {
        "created" => Ok(ShipmentStatus::Created),
        "cancelled" => Ok(ShipmentStatus::Cancelled),
        "failed" => Ok(ShipmentStatus::Failed),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid shipment status value: {}", s),
        )),
    }
}

fn parse_service_type(s: &str) -> Result<ServiceType, DomainError> {
    match s {
        "standard" => Ok(ServiceType::Standard),
        "express" => Ok(ServiceType::Express),
        "registered" => Ok(ServiceType::Registered),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid service type value: {}", s),
        )),
    }
}

#[async_trait]
impl ShipmentRepository for PgShipmentRepository {
    async fn insert(&self, record: &ShipmentRecord) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO shipments (
                id, order_id, carrier, carrier_shipment_id, tracking_number,
                label_url, status, service_type, created_by, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(record.order_id.as_uuid())
        .bind(record.carrier.as_str())
        .bind(&record.carrier_shipment_id)
        .bind(&record.tracking_number)
        .bind(&record.label_url)
        .bind(record.status.as_str())
        .bind(record.service_type.as_str())
        .bind(record.created_by.as_uuid())
        .bind(record.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("shipments_one_created_per_order") {
                    return DomainError::new(
                        ErrorCode::DuplicateShipment,
                        "Order already has an active shipment",
                    );
                }
            }
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert shipment: {}", e),
            )
        })?;

        Ok(())
    }

    async fn find_active_by_order(
        &self,
        order_id: &OrderId,
    ) -> Result<Option<ShipmentRecord>, DomainError> {
        let row = sqlx::query_as::<_, ShipmentRow>(
            r#"
            SELECT id, order_id, carrier, carrier_shipment_id, tracking_number,
                   label_url, status, service_type, created_by, created_at
            FROM shipments
            WHERE order_id = $1 AND status = 'created'
            "#,
        )
        .bind(order_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to load active shipment: {}", e),
            )
        })?;

        row.map(ShipmentRecord::try_from).transpose()
    }
}
