//! Shipping configuration.
//!
//! The sender address, default package dimensions, and default carrier are
//! explicit configuration handed to the shipment handler at construction
//! time; nothing in the shipping flow reads the environment ad hoc.

use serde::Deserialize;
use std::str::FromStr;

use crate::domain::shipment::CarrierCode;
use crate::ports::{PackageDimensions, ShipmentParty};

use super::ConfigValidationError;

/// The shop's sender address.
#[derive(Debug, Clone, Deserialize)]
pub struct SenderAddress {
    pub name: String,
    pub company: Option<String>,
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub phone: String,
    pub email: Option<String>,
}

impl Default for SenderAddress {
    fn default() -> Self {
        Self {
            name: "Inkpress".to_string(),
            company: Some("Inkpress Ltd".to_string()),
            street: "Rothschild 1".to_string(),
            city: "Tel Aviv".to_string(),
            postal_code: "6688101".to_string(),
            country: "Israel".to_string(),
            phone: "03-1234567".to_string(),
            email: Some("shop@inkpress.example".to_string()),
        }
    }
}

/// Shipping configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ShippingConfig {
    #[serde(default)]
    pub sender: SenderAddress,
    /// Flat artwork parcel: 35x30x5 cm, 500 g.
    #[serde(default = "default_package")]
    pub default_package: PackageDimensions,
    #[serde(default = "default_carrier")]
    pub default_carrier: String,
    #[serde(default = "default_description")]
    pub shipment_description: String,
    /// Israel Post API credentials.
    #[serde(default)]
    pub israel_post_api_base: Option<String>,
    #[serde(default)]
    pub israel_post_api_key: Option<String>,
    #[serde(default)]
    pub israel_post_customer_id: Option<String>,
}

fn default_package() -> PackageDimensions {
    PackageDimensions {
        length_cm: 35,
        width_cm: 30,
        height_cm: 5,
        weight_g: 500,
    }
}

fn default_carrier() -> String {
    "israel_post".to_string()
}

fn default_description() -> String {
    "Printed artwork".to_string()
}

impl Default for ShippingConfig {
    fn default() -> Self {
        Self {
            sender: SenderAddress::default(),
            default_package: default_package(),
            default_carrier: default_carrier(),
            shipment_description: default_description(),
            israel_post_api_base: None,
            israel_post_api_key: None,
            israel_post_customer_id: None,
        }
    }
}

impl ShippingConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.parsed_default_carrier()?;
        if self.sender.name.is_empty() || self.sender.street.is_empty() {
            return Err(ConfigValidationError::new(
                "shipping.sender",
                "name and street are required",
            ));
        }
        if self.default_package.weight_g == 0 {
            return Err(ConfigValidationError::new(
                "shipping.default_package",
                "weight must be non-zero",
            ));
        }
        Ok(())
    }

    /// The configured default carrier as a typed code.
    pub fn parsed_default_carrier(&self) -> Result<CarrierCode, ConfigValidationError> {
        CarrierCode::from_str(&self.default_carrier).map_err(|e| {
            ConfigValidationError::new("shipping.default_carrier", e.to_string())
        })
    }

    /// The sender address as a shipment party.
    pub fn sender_party(&self) -> ShipmentParty {
        ShipmentParty {
            name: self.sender.name.clone(),
            company: self.sender.company.clone(),
            street: self.sender.street.clone(),
            street2: None,
            city: self.sender.city.clone(),
            postal_code: self.sender.postal_code.clone(),
            country: self.sender.country.clone(),
            phone: Some(self.sender.phone.clone()),
            email: self.sender.email.clone(),
        }
    }
}
