//! Shipment records and carrier identification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{AdminId, OrderId, ShipmentId, Timestamp, ValidationError};

/// An external shipping provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarrierCode {
    IsraelPost,
    Dhl,
    Fedex,
    Ups,
}

impl CarrierCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CarrierCode::IsraelPost => "israel_post",
            CarrierCode::Dhl => "dhl",
            CarrierCode::Fedex => "fedex",
            CarrierCode::Ups => "ups",
        }
    }

    /// Detects the carrier from a tracking number's format.
    pub fn detect(tracking_number: &str) -> Option<CarrierCode> {
        let trimmed = tracking_number.trim().to_uppercase();
        if !trimmed.is_ascii() {
            return None;
        }
        let bytes = trimmed.as_bytes();

        // Israel Post: RR/RL/EA/EE + 9 digits + IL
        if trimmed.len() == 13
            && matches!(&trimmed[..2], "RR" | "RL" | "EA" | "EE")
            && trimmed[2..11].bytes().all(|b| b.is_ascii_digit())
            && trimmed.ends_with("IL")
        {
            return Some(CarrierCode::IsraelPost);
        }

        // UPS: 1Z + 16 alphanumeric
        if trimmed.len() == 18
            && trimmed.starts_with("1Z")
            && bytes[2..].iter().all(|b| b.is_ascii_alphanumeric())
        {
            return Some(CarrierCode::Ups);
        }

        if bytes.iter().all(|b| b.is_ascii_digit()) {
            // DHL: 10 digits; FedEx: 12-22 digits
            return match trimmed.len() {
                10 => Some(CarrierCode::Dhl),
                12..=22 => Some(CarrierCode::Fedex),
                _ => None,
            };
        }

        None
    }
}

impl fmt::Display for CarrierCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CarrierCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "israel_post" => Ok(CarrierCode::IsraelPost),
            "dhl" => Ok(CarrierCode::Dhl),
            "fedex" => Ok(CarrierCode::Fedex),
            "ups" => Ok(CarrierCode::Ups),
            other => Err(ValidationError::invalid_format(
                "carrier",
                format!("Unknown carrier '{}'", other),
            )),
        }
    }
}

/// Carrier service level for a shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Standard,
    Express,
    Registered,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Standard => "standard",
            ServiceType::Express => "express",
            ServiceType::Registered => "registered",
        }
    }
}

impl Default for ServiceType {
    fn default() -> Self {
        ServiceType::Registered
    }
}

/// Lifecycle status of a shipment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    /// Booked with the carrier; at most one per order may be in this state.
    Created,
    Cancelled,
    Failed,
}

impl ShipmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipmentStatus::Created => "created",
            ShipmentStatus::Cancelled => "cancelled",
            ShipmentStatus::Failed => "failed",
        }
    }
}

/// A booking made with an external carrier for one order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipmentRecord {
    pub id: ShipmentId,
    pub order_id: OrderId,
    pub carrier: CarrierCode,
    /// Carrier-assigned shipment identifier.
    pub carrier_shipment_id: String,
    pub tracking_number: String,
    pub label_url: Option<String>,
    pub status: ShipmentStatus,
    pub service_type: ServiceType,
    pub created_by: AdminId,
    pub created_at: Timestamp,
}

impl ShipmentRecord {
    /// Builds a freshly-booked record in the `created` state.
    pub fn created(
        order_id: OrderId,
        carrier: CarrierCode,
        carrier_shipment_id: String,
        tracking_number: String,
        label_url: Option<String>,
        service_type: ServiceType,
        created_by: AdminId,
    ) -> Self {
        Self {
            id: ShipmentId::new(),
            order_id,
            carrier,
            carrier_shipment_id,
            tracking_number,
            label_url,
            status: ShipmentStatus::Created,
            service_type,
            created_by,
            created_at: Timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_israel_post_tracking_numbers() {
        assert_eq!(
            CarrierCode::detect("RR123456789IL"),
            Some(CarrierCode::IsraelPost)
        );
        assert_eq!(
            CarrierCode::detect("  ee987654321il "),
            Some(CarrierCode::IsraelPost)
        );
    }

    #[test]
    fn detects_numeric_carriers_by_length() {
        assert_eq!(CarrierCode::detect("1234567890"), Some(CarrierCode::Dhl));
        assert_eq!(
            CarrierCode::detect("123456789012"),
            Some(CarrierCode::Fedex)
        );
    }

    #[test]
    fn detects_ups_tracking_numbers() {
        assert_eq!(
            CarrierCode::detect("1Z12345E0205271688"),
            Some(CarrierCode::Ups)
        );
    }

    #[test]
    fn unknown_formats_are_not_detected() {
        assert_eq!(CarrierCode::detect("hello"), None);
        assert_eq!(CarrierCode::detect("123"), None);
        assert_eq!(CarrierCode::detect(""), None);
    }

    #[test]
    fn carrier_code_roundtrips_through_from_str() {
        for code in [
            CarrierCode::IsraelPost,
            CarrierCode::Dhl,
            CarrierCode::Fedex,
            CarrierCode::Ups,
        ] {
            assert_eq!(code.as_str().parse::<CarrierCode>().unwrap(), code);
        }
    }

    #[test]
    fn created_record_starts_in_created_state() {
        let record = ShipmentRecord::created(
            OrderId::new(),
            CarrierCode::IsraelPost,
            "shp_1".to_string(),
            "RR123456789IL".to_string(),
            None,
            ServiceType::default(),
            AdminId::new(),
        );

        assert_eq!(record.status, ShipmentStatus::Created);
        assert_eq!(record.service_type, ServiceType::Registered);
    }
}
