//! Israel Post carrier client.
//!
//! Talks to the Israel Post domestic shipping API over JSON. Failures are
//! mapped to `CarrierError`: 5xx responses are marked retryable, client
//! errors and configuration problems are not.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::shipment::CarrierCode;
use crate::ports::{
    CarrierClient, CarrierError, CreateShipmentRequest, CreateShipmentResult, PackageDimensions,
    ShipmentParty,
};

/// Israel Post API configuration.
#[derive(Clone)]
pub struct IsraelPostConfig {
    pub api_base_url: String,
    pub api_key: SecretString,
    pub customer_id: String,
}

impl IsraelPostConfig {
    pub fn new(
        api_base_url: impl Into<String>,
        api_key: impl Into<String>,
        customer_id: impl Into<String>,
    ) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            api_key: SecretString::new(api_key.into()),
            customer_id: customer_id.into(),
        }
    }
}

/// Israel Post shipping client.
pub struct IsraelPostClient {
    config: IsraelPostConfig,
    http_client: reqwest::Client,
}

/// Wire format for a shipment party.
#[derive(Debug, Serialize)]
struct PartyPayload<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    company: Option<&'a str>,
    address: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    address2: Option<&'a str>,
    city: &'a str,
    #[serde(rename = "postalCode")]
    postal_code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct PackagePayload {
    length: u32,
    width: u32,
    height: u32,
    weight: u32,
}

#[derive(Debug, Serialize)]
struct CreateShipmentPayload<'a> {
    #[serde(rename = "orderId")]
    order_id: String,
    #[serde(rename = "orderNumber")]
    order_number: &'a str,
    #[serde(rename = "serviceType")]
    service_type: &'a str,
    sender: PartyPayload<'a>,
    recipient: PartyPayload<'a>,
    package: PackagePayload,
    #[serde(rename = "declaredValue")]
    declared_value: f64,
    description: &'a str,
    reference: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreateShipmentResponse {
    #[serde(rename = "shipmentId")]
    shipment_id: String,
    #[serde(rename = "trackingNumber")]
    tracking_number: String,
    #[serde(rename = "labelUrl")]
    label_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
    code: Option<String>,
}

impl IsraelPostClient {
    pub fn new(config: IsraelPostConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn party_payload<'a>(party: &'a ShipmentParty) -> PartyPayload<'a> {
        PartyPayload {
            name: &party.name,
            company: party.company.as_deref(),
            address: &party.street,
            address2: party.street2.as_deref(),
            city: &party.city,
            postal_code: &party.postal_code,
            phone: party.phone.as_deref(),
            email: party.email.as_deref(),
        }
    }

    fn package_payload(package: PackageDimensions) -> PackagePayload {
        PackagePayload {
            length: package.length_cm,
            width: package.width_cm,
            height: package.height_cm,
            weight: package.weight_g,
        }
    }

    fn transport_error(&self, e: reqwest::Error) -> CarrierError {
        CarrierError::new(
            CarrierCode::IsraelPost,
            "TRANSPORT_ERROR",
            e.to_string(),
            // Timeouts and connection failures are worth retrying
            e.is_timeout() || e.is_connect(),
        )
    }
}

#[async_trait]
impl CarrierClient for IsraelPostClient {
    fn carrier(&self) -> CarrierCode {
        CarrierCode::IsraelPost
    }

    fn is_configured(&self) -> bool {
        !self.config.api_key.expose_secret().is_empty() && !self.config.customer_id.is_empty()
    }

    async fn create_shipment(
        &self,
        request: CreateShipmentRequest,
    ) -> Result<CreateShipmentResult, CarrierError> {
        if !self.is_configured() {
            return Err(CarrierError::not_configured(CarrierCode::IsraelPost));
        }

        let payload = CreateShipmentPayload {
            order_id: request.order_id.to_string(),
            order_number: &request.order_number,
            service_type: request.service_type.as_str(),
            sender: Self::party_payload(&request.sender),
            recipient: Self::party_payload(&request.recipient),
            package: Self::package_payload(request.package),
            declared_value: request.declared_value,
            description: &request.description,
            reference: &request.reference,
        };

        let url = format!("{}/shipments", self.config.api_base_url);
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.config.api_key.expose_secret())
            .header("X-Customer-ID", &self.config.customer_id)
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body: ApiErrorBody = response.json().await.unwrap_or(ApiErrorBody {
                error: None,
                code: None,
            });
            return Err(CarrierError::new(
                CarrierCode::IsraelPost,
                body.code.unwrap_or_else(|| "API_ERROR".to_string()),
                body.error.unwrap_or_else(|| {
                    format!("API request failed with status {}", status.as_u16())
                }),
                status.is_server_error(),
            ));
        }

        let body: CreateShipmentResponse = response
            .json()
            .await
            .map_err(|e| self.transport_error(e))?;

        Ok(CreateShipmentResult {
            shipment_id: body.shipment_id,
            tracking_number: body.tracking_number,
            carrier: CarrierCode::IsraelPost,
            label_url: body.label_url,
        })
    }
}
