//! Shared mock port implementations for handler tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, OrderId, OrderItemId, Timestamp};
use crate::domain::order::{FulfillmentStatus, Order, OrderItem, ShippingAddress};
use crate::domain::shipment::ShipmentRecord;
use crate::ports::{
    AuditEntry, AuditLog, FulfillmentNotifier, OrderRepository, ShipmentRepository,
};

/// Builds an order in the given status with a valid address and one A4 item.
pub fn order_with_status(status: FulfillmentStatus) -> Order {
    let id = OrderId::new();
    Order {
        id,
        order_number: format!("INK-{}", &id.to_string()[..8]),
        customer_email: Some("noa@example.com".to_string()),
        status,
        total_agorot: 18900,
        shipping_address: Some(ShippingAddress {
            name: "Noa Levi".to_string(),
            street: "Dizengoff 100".to_string(),
            street2: None,
            city: "Tel Aviv".to_string(),
            postal_code: "6433222".to_string(),
            country: "Israel".to_string(),
            phone: Some("052-1234567".to_string()),
        }),
        gift: None,
        items: vec![OrderItem {
            id: OrderItemId::new(),
            size: "A4".to_string(),
            paper_type: "matte".to_string(),
            frame_type: None,
            quantity: 1,
            price_agorot: 18900,
            original_image_url: None,
            transformed_image_url: Some(format!("https://cdn.example.com/t/{}.jpg", id)),
            print_ready_url: None,
        }],
        tracking_number: None,
        carrier: None,
        created_at: Timestamp::now(),
        paid_at: Some(Timestamp::now()),
        shipped_at: None,
        delivered_at: None,
        cancelled_at: None,
        updated_at: Timestamp::now(),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Order repository
// ════════════════════════════════════════════════════════════════════════════

pub struct MockOrderRepository {
    orders: Mutex<HashMap<OrderId, Order>>,
    pub fail_update: bool,
}

impl MockOrderRepository {
    pub fn new() -> Self {
        Self {
            orders: Mutex::new(HashMap::new()),
            fail_update: false,
        }
    }

    pub fn with_orders(orders: Vec<Order>) -> Self {
        Self {
            orders: Mutex::new(orders.into_iter().map(|o| (o.id, o)).collect()),
            fail_update: false,
        }
    }

    pub fn failing_update(orders: Vec<Order>) -> Self {
        Self {
            orders: Mutex::new(orders.into_iter().map(|o| (o.id, o)).collect()),
            fail_update: true,
        }
    }

    pub fn get(&self, id: &OrderId) -> Option<Order> {
        self.orders.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl OrderRepository for MockOrderRepository {
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError> {
        Ok(self.orders.lock().unwrap().get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[OrderId]) -> Result<Vec<Order>, DomainError> {
        let orders = self.orders.lock().unwrap();
        Ok(ids.iter().filter_map(|id| orders.get(id).cloned()).collect())
    }

    async fn update_status_bulk(
        &self,
        ids: &[OrderId],
        status: FulfillmentStatus,
        updated_at: Timestamp,
    ) -> Result<(), DomainError> {
        if self.fail_update {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Simulated update failure",
            ));
        }
        let mut orders = self.orders.lock().unwrap();
        for id in ids {
            if let Some(order) = orders.get_mut(id) {
                order.status = status;
                order.updated_at = updated_at;
            }
        }
        Ok(())
    }

    async fn update_fulfillment(&self, order: &Order) -> Result<(), DomainError> {
        if self.fail_update {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Simulated update failure",
            ));
        }
        self.orders.lock().unwrap().insert(order.id, order.clone());
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Shipment repository
// ════════════════════════════════════════════════════════════════════════════

pub struct MockShipmentRepository {
    records: Mutex<Vec<ShipmentRecord>>,
    pub fail_insert: bool,
}

impl MockShipmentRepository {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail_insert: false,
        }
    }

    pub fn failing_insert() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail_insert: true,
        }
    }

    pub fn records(&self) -> Vec<ShipmentRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl ShipmentRepository for MockShipmentRepository {
    async fn insert(&self, record: &ShipmentRecord) -> Result<(), DomainError> {
        if self.fail_insert {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Simulated insert failure",
            ));
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn find_active_by_order(
        &self,
        order_id: &OrderId,
    ) -> Result<Option<ShipmentRecord>, DomainError> {
        use crate::domain::shipment::ShipmentStatus;
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| &r.order_id == order_id && r.status == ShipmentStatus::Created)
            .cloned())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Audit log and notifier
// ════════════════════════════════════════════════════════════════════════════

pub struct MockAuditLog {
    entries: Mutex<Vec<AuditEntry>>,
}

impl MockAuditLog {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuditLog for MockAuditLog {
    async fn append(&self, entry: AuditEntry) -> Result<(), DomainError> {
        self.entries.lock().unwrap().push(entry);
        Ok(())
    }
}

pub struct MockNotifier {
    status_changes: Mutex<usize>,
    shipped: Mutex<usize>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self {
            status_changes: Mutex::new(0),
            shipped: Mutex::new(0),
        }
    }

    pub fn status_changes(&self) -> usize {
        *self.status_changes.lock().unwrap()
    }

    pub fn shipped(&self) -> usize {
        *self.shipped.lock().unwrap()
    }
}

#[async_trait]
impl FulfillmentNotifier for MockNotifier {
    async fn order_status_changed(&self, _order: &Order, _new_status: FulfillmentStatus) {
        *self.status_changes.lock().unwrap() += 1;
    }

    async fn order_shipped(&self, _order: &Order, _tracking_number: &str) {
        *self.shipped.lock().unwrap() += 1;
    }
}
