//! PostgreSQL implementation of OrderRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, ErrorCode, OrderId, OrderItemId, Timestamp,
};
use crate::domain::order::{FulfillmentStatus, GiftDetails, Order, OrderItem, ShippingAddress};
use crate::domain::shipment::CarrierCode;
use crate::ports::OrderRepository;

/// PostgreSQL implementation of the OrderRepository port.
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an order.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    order_number: String,
    customer_email: Option<String>,
    status: String,
    total_agorot: i64,
    shipping_address: Option<serde_json::Value>,
    gift: Option<serde_json::Value>,
    tracking_number: Option<String>,
    carrier: Option<String>,
    created_at: DateTime<Utc>,
    paid_at: Option<DateTime<Utc>>,
    shipped_at: Option<DateTime<Utc>>,
    delivered_at: Option<DateTime<Utc>>,
    cancelled_at: Option<DateTime<Utc>>,
    updated_at: DateTime<Utc>,
}

/// Database row representation of an order item.
#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    id: Uuid,
    order_id: Uuid,
    size: String,
    paper_type: String,
    frame_type: Option<String>,
    quantity: i32,
    price_agorot: i64,
    original_image_url: Option<String>,
    transformed_image_url: Option<String>,
    print_ready_url: Option<String>,
}

fn parse_status(s: &str) -> Result<FulfillmentStatus, DomainError> {
    FulfillmentStatus::from_str(s).map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid status value: {}", s),
        )
    })
}

fn parse_carrier(s: Option<&str>) -> Result<Option<CarrierCode>, DomainError> {
    s.map(|c| {
        CarrierCode::from_str(c).map_err(|_| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid carrier value: {}", c),
            )
        })
    })
    .transpose()
}

impl OrderRow {
    fn into_order(self, items: Vec<OrderItem>) -> Result<Order, DomainError> {
        let shipping_address: Option<ShippingAddress> = self
            .shipping_address
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Invalid shipping_address JSON: {}", e),
                )
            })?;
        let gift: Option<GiftDetails> = self
            .gift
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid gift JSON: {}", e))
            })?;

        Ok(Order {
            id: OrderId::from_uuid(self.id),
            order_number: self.order_number,
            customer_email: self.customer_email,
            status: parse_status(&self.status)?,
            total_agorot: self.total_agorot,
            shipping_address,
            gift,
            items,
            tracking_number: self.tracking_number,
            carrier: parse_carrier(self.carrier.as_deref())?,
            created_at: Timestamp::from_datetime(self.created_at),
            paid_at: self.paid_at.map(Timestamp::from_datetime),
            shipped_at: self.shipped_at.map(Timestamp::from_datetime),
            delivered_at: self.delivered_at.map(Timestamp::from_datetime),
            cancelled_at: self.cancelled_at.map(Timestamp::from_datetime),
            updated_at: Timestamp::from_datetime(self.updated_at),
        })
    }
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        OrderItem {
            id: OrderItemId::from_uuid(row.id),
            size: row.size,
            paper_type: row.paper_type,
            frame_type: row.frame_type,
            quantity: row.quantity.max(0) as u32,
            price_agorot: row.price_agorot,
            original_image_url: row.original_image_url,
            transformed_image_url: row.transformed_image_url,
            print_ready_url: row.print_ready_url,
        }
    }
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

impl PgOrderRepository {
    async fn load_items(
        &self,
        order_ids: &[Uuid],
    ) -> Result<Vec<OrderItemRow>, DomainError> {
        sqlx::query_as::<_, OrderItemRow>(
            r#"
            SELECT id, order_id, size, paper_type, frame_type, quantity,
                   price_agorot, original_image_url, transformed_image_url,
                   print_ready_url
            FROM order_items
            WHERE order_id = ANY($1)
            ORDER BY created_at
            "#,
        )
        .bind(order_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load order items", e))
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError> {
        let orders = self.find_by_ids(std::slice::from_ref(id)).await?;
        Ok(orders.into_iter().next())
    }

    async fn find_by_ids(&self, ids: &[OrderId]) -> Result<Vec<Order>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();

        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, order_number, customer_email, status, total_agorot,
                   shipping_address, gift, tracking_number, carrier, created_at,
                   paid_at, shipped_at, delivered_at, cancelled_at, updated_at
            FROM orders
            WHERE id = ANY($1)
            "#,
        )
        .bind(&uuids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load orders", e))?;

        let mut items_by_order: std::collections::HashMap<Uuid, Vec<OrderItem>> =
            std::collections::HashMap::new();
        for item in self.load_items(&uuids).await? {
            items_by_order
                .entry(item.order_id)
                .or_default()
                .push(item.into());
        }

        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            let items = items_by_order.remove(&row.id).unwrap_or_default();
            orders.push(row.into_order(items)?);
        }

        // Preserve request order so batch results line up with input
        orders.sort_by_key(|o| ids.iter().position(|id| id == &o.id));
        Ok(orders)
    }

    async fn update_status_bulk(
        &self,
        ids: &[OrderId],
        status: FulfillmentStatus,
        updated_at: Timestamp,
    ) -> Result<(), DomainError> {
        if ids.is_empty() {
            return Ok(());
        }
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();

        sqlx::query(
            r#"
            UPDATE orders
            SET status = $2, updated_at = $3
            WHERE id = ANY($1)
            "#,
        )
        .bind(&uuids)
        .bind(status.as_str())
        .bind(updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to bulk-update order status", e))?;

        Ok(())
    }

    async fn update_fulfillment(&self, order: &Order) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE orders
            SET status = $2,
                tracking_number = $3,
                carrier = $4,
                shipped_at = $5,
                delivered_at = $6,
                cancelled_at = $7,
                updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(order.id.as_uuid())
        .bind(order.status.as_str())
        .bind(&order.tracking_number)
        .bind(order.carrier.map(|c| c.as_str()))
        .bind(order.shipped_at.map(|t| *t.as_datetime()))
        .bind(order.delivered_at.map(|t| *t.as_datetime()))
        .bind(order.cancelled_at.map(|t| *t.as_datetime()))
        .bind(order.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update order fulfillment fields", e))?;

        Ok(())
    }
}
