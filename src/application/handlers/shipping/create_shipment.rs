//! CreateShipmentHandler - Command handler for booking carrier shipments.
//!
//! Every precondition fails with its own `ShipmentError` variant so the
//! HTTP layer can answer 404/400/409/502 precisely. After a successful
//! carrier call the booking is never rolled back: persistence failures are
//! logged and the carrier result is still returned, so there is always a
//! record of what the carrier knows.

use std::sync::Arc;

use serde_json::json;

use crate::config::ShippingConfig;
use crate::domain::foundation::{AdminId, OrderId, Timestamp};
use crate::domain::shipment::{CarrierCode, ServiceType, ShipmentError, ShipmentRecord};
use crate::adapters::carriers::CarrierRegistry;
use crate::ports::{
    AuditEntry, AuditLog, CreateShipmentRequest, FulfillmentNotifier, OrderRepository,
    ShipmentParty, ShipmentRepository,
};

/// Command to create a shipment for one order.
#[derive(Debug, Clone)]
pub struct CreateShipmentCommand {
    pub admin_id: AdminId,
    pub order_id: OrderId,
    /// Defaults to the configured carrier when unspecified.
    pub carrier: Option<CarrierCode>,
    pub service_type: Option<ServiceType>,
}

/// Result of a successful shipment creation.
#[derive(Debug, Clone)]
pub struct ShipmentCreated {
    pub shipment_id: String,
    pub tracking_number: String,
    pub carrier: CarrierCode,
    pub label_url: Option<String>,
}

/// Handler for shipment creation.
pub struct CreateShipmentHandler {
    orders: Arc<dyn OrderRepository>,
    shipments: Arc<dyn ShipmentRepository>,
    carriers: Arc<CarrierRegistry>,
    audit: Arc<dyn AuditLog>,
    notifier: Arc<dyn FulfillmentNotifier>,
    config: ShippingConfig,
}

impl CreateShipmentHandler {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        shipments: Arc<dyn ShipmentRepository>,
        carriers: Arc<CarrierRegistry>,
        audit: Arc<dyn AuditLog>,
        notifier: Arc<dyn FulfillmentNotifier>,
        config: ShippingConfig,
    ) -> Self {
        Self {
            orders,
            shipments,
            carriers,
            audit,
            notifier,
            config,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateShipmentCommand,
    ) -> Result<ShipmentCreated, ShipmentError> {
        // 1. Order must exist
        let mut order = self
            .orders
            .find_by_id(&cmd.order_id)
            .await?
            .ok_or(ShipmentError::OrderNotFound(cmd.order_id))?;

        // 2. Order must carry a shipping address
        let address = order
            .shipping_address
            .clone()
            .ok_or(ShipmentError::MissingAddress(cmd.order_id))?;

        // 3. Address must pass structural validation before the carrier
        //    sees it
        let validation = address.validate();
        if !validation.is_valid() {
            return Err(ShipmentError::InvalidAddress {
                field_errors: validation.errors,
            });
        }

        // 4. Duplicate guard; the shipments table's unique index backs this
        //    check under concurrency
        if self
            .shipments
            .find_active_by_order(&cmd.order_id)
            .await?
            .is_some()
        {
            return Err(ShipmentError::Duplicate(cmd.order_id));
        }

        // 5. Book with the carrier
        let client = self
            .carriers
            .resolve(cmd.carrier)
            .map_err(|e| ShipmentError::Carrier {
                carrier: e.carrier,
                code: e.code,
                message: e.message,
                retryable: e.retryable,
            })?;
        let service_type = cmd.service_type.unwrap_or_default();

        let request = CreateShipmentRequest {
            order_id: order.id,
            order_number: order.order_number.clone(),
            sender: self.config.sender_party(),
            recipient: ShipmentParty {
                name: address.name.clone(),
                company: None,
                street: address.street.clone(),
                street2: address.street2.clone(),
                city: address.city.clone(),
                postal_code: address.postal_code.clone(),
                country: address.country.clone(),
                phone: address.phone.clone(),
                email: None,
            },
            package: self.config.default_package,
            service_type,
            declared_value: order.total_ils(),
            description: self.config.shipment_description.clone(),
            reference: order.order_number.clone(),
        };

        let booked = client
            .create_shipment(request)
            .await
            .map_err(|e| ShipmentError::Carrier {
                carrier: e.carrier,
                code: e.code,
                message: e.message,
                retryable: e.retryable,
            })?;

        // 6. Record the booking. The carrier call is done; from here on,
        //    failures are logged and the result is still returned.
        let record = ShipmentRecord::created(
            order.id,
            booked.carrier,
            booked.shipment_id.clone(),
            booked.tracking_number.clone(),
            booked.label_url.clone(),
            service_type,
            cmd.admin_id,
        );
        if let Err(e) = self.shipments.insert(&record).await {
            tracing::error!(
                order_id = %order.id,
                shipment_id = %booked.shipment_id,
                error = %e,
                "Failed to store shipment record after carrier booking"
            );
        }

        order.mark_shipped(
            booked.tracking_number.clone(),
            booked.carrier,
            Timestamp::now(),
        );
        if let Err(e) = self.orders.update_fulfillment(&order).await {
            tracing::error!(
                order_id = %order.id,
                error = %e,
                "Failed to update order after carrier booking"
            );
        }

        let entry = AuditEntry::new(
            cmd.admin_id,
            "shipment_created",
            json!({
                "order_id": order.id,
                "carrier": booked.carrier,
                "shipment_id": &booked.shipment_id,
                "tracking_number": &booked.tracking_number,
                "service_type": service_type,
            }),
        );
        if let Err(e) = self.audit.append(entry).await {
            tracing::error!(order_id = %order.id, error = %e, "Failed to audit shipment");
        }

        self.notifier
            .order_shipped(&order, &booked.tracking_number)
            .await;

        Ok(ShipmentCreated {
            shipment_id: booked.shipment_id,
            tracking_number: booked.tracking_number,
            carrier: booked.carrier,
            label_url: booked.label_url,
        })
    }
}
