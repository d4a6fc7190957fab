//! Carrier registry.
//!
//! Holds one client per carrier behind the `CarrierClient` trait and
//! resolves requests by typed `CarrierCode`, falling back to the
//! configured default when the caller does not name one. Unconfigured
//! clients are never handed out.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::shipment::CarrierCode;
use crate::ports::{CarrierClient, CarrierError};

/// Registry of carrier clients keyed by carrier code.
pub struct CarrierRegistry {
    clients: HashMap<CarrierCode, Arc<dyn CarrierClient>>,
    default_carrier: CarrierCode,
}

impl CarrierRegistry {
    /// Creates an empty registry with the given default carrier.
    pub fn new(default_carrier: CarrierCode) -> Self {
        Self {
            clients: HashMap::new(),
            default_carrier,
        }
    }

    /// Registers a client under its own carrier code.
    pub fn register(&mut self, client: Arc<dyn CarrierClient>) {
        self.clients.insert(client.carrier(), client);
    }

    /// Resolves a client for `carrier`, or the default when `None`.
    pub fn resolve(
        &self,
        carrier: Option<CarrierCode>,
    ) -> Result<Arc<dyn CarrierClient>, CarrierError> {
        let code = carrier.unwrap_or(self.default_carrier);
        let client = self
            .clients
            .get(&code)
            .ok_or_else(|| CarrierError::not_registered(code))?;

        if !client.is_configured() {
            return Err(CarrierError::not_configured(code));
        }

        Ok(client.clone())
    }

    /// Carrier codes with a registered, configured client.
    pub fn available(&self) -> Vec<CarrierCode> {
        self.clients
            .values()
            .filter(|c| c.is_configured())
            .map(|c| c.carrier())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{CreateShipmentRequest, CreateShipmentResult};
    use async_trait::async_trait;

    struct FakeClient {
        code: CarrierCode,
        configured: bool,
    }

    #[async_trait]
    impl CarrierClient for FakeClient {
        fn carrier(&self) -> CarrierCode {
            self.code
        }

        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn create_shipment(
            &self,
            _request: CreateShipmentRequest,
        ) -> Result<CreateShipmentResult, CarrierError> {
            unimplemented!("not exercised")
        }
    }

    #[test]
    fn resolves_default_when_unspecified() {
        let mut registry = CarrierRegistry::new(CarrierCode::IsraelPost);
        registry.register(Arc::new(FakeClient {
            code: CarrierCode::IsraelPost,
            configured: true,
        }));

        let client = registry.resolve(None).unwrap();
        assert_eq!(client.carrier(), CarrierCode::IsraelPost);
    }

    #[test]
    fn resolves_explicit_carrier() {
        let mut registry = CarrierRegistry::new(CarrierCode::IsraelPost);
        registry.register(Arc::new(FakeClient {
            code: CarrierCode::IsraelPost,
            configured: true,
        }));
        registry.register(Arc::new(FakeClient {
            code: CarrierCode::Dhl,
            configured: true,
        }));

        let client = registry.resolve(Some(CarrierCode::Dhl)).unwrap();
        assert_eq!(client.carrier(), CarrierCode::Dhl);
    }

    #[test]
    fn unregistered_carrier_is_an_error() {
        let registry = CarrierRegistry::new(CarrierCode::IsraelPost);
        let err = registry.resolve(Some(CarrierCode::Ups)).err().unwrap();
        assert_eq!(err.code, "PROVIDER_NOT_FOUND");
    }

    #[test]
    fn unconfigured_client_is_never_handed_out() {
        let mut registry = CarrierRegistry::new(CarrierCode::IsraelPost);
        registry.register(Arc::new(FakeClient {
            code: CarrierCode::IsraelPost,
            configured: false,
        }));

        let err = registry.resolve(None).err().unwrap();
        assert_eq!(err.code, "NOT_CONFIGURED");
        assert!(registry.available().is_empty());
    }
}
