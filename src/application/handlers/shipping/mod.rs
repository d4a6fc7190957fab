//! Shipping handlers.

mod create_shipment;

pub use create_shipment::{CreateShipmentCommand, CreateShipmentHandler, ShipmentCreated};
