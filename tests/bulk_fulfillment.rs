//! Integration tests for the bulk fulfillment flows.
//!
//! These tests wire real adapters (ZIP assembly, in-memory object storage)
//! to the command handlers and verify the end-to-end behavior:
//! 1. Bulk download packages files, uploads an archive, presigns a link
//! 2. The manifest ledger covers every requested order
//! 3. The duplicate-shipment guard holds across repeated bookings
//!
//! External fetch/generator calls are stubbed; everything else is real.

use std::collections::HashMap;
use std::io::Read;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;

use inkpress::adapters::archive::ZipArchiveAssembler;
use inkpress::adapters::carriers::CarrierRegistry;
use inkpress::adapters::storage::InMemoryObjectStorage;
use inkpress::application::handlers::fulfillment::{
    BulkDownloadCommand, BulkDownloadError, BulkDownloadHandler,
};
use inkpress::application::handlers::shipping::{CreateShipmentCommand, CreateShipmentHandler};
use inkpress::application::services::PrintFilePackager;
use inkpress::config::ShippingConfig;
use inkpress::domain::foundation::{AdminId, DomainError, OrderId, OrderItemId, Timestamp};
use inkpress::domain::order::{FulfillmentStatus, Order, OrderItem, ShippingAddress};
use inkpress::domain::shipment::{CarrierCode, ShipmentError, ShipmentRecord, ShipmentStatus};
use inkpress::ports::{
    AuditEntry, AuditLog, CarrierClient, CarrierError, CreateShipmentRequest,
    CreateShipmentResult, FetchError, FileFetcher, FulfillmentNotifier, GeneratedPrintFile,
    GeneratorError, OrderRepository, PrintFileGenerator, ShipmentRepository,
};
use inkpress::domain::order::PrintSize;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestOrderStore {
    orders: Mutex<HashMap<OrderId, Order>>,
}

impl TestOrderStore {
    fn with(orders: Vec<Order>) -> Arc<Self> {
        Arc::new(Self {
            orders: Mutex::new(orders.into_iter().map(|o| (o.id, o)).collect()),
        })
    }

    fn get(&self, id: &OrderId) -> Option<Order> {
        self.orders.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl OrderRepository for TestOrderStore {
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
        self.orders.lock().unwrap().insert(order.id, order.clone());
        Ok(())
    }
}

struct TestShipmentStore {
    records: Mutex<Vec<ShipmentRecord>>,
}

impl TestShipmentStore {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            records: Mutex::new(Vec::new()),
        })
    }

    fn created_count(&self) -> usize {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.status == ShipmentStatus::Created)
            .count()
    }
}

#[async_trait]
impl ShipmentRepository for TestShipmentStore {
    async fn insert(&self, record: &ShipmentRecord) -> Result<(), DomainError> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn find_active_by_order(
        &self,
        order_id: &OrderId,
    ) -> Result<Option<ShipmentRecord>, DomainError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| &r.order_id == order_id && r.status == ShipmentStatus::Created)
            .cloned())
    }
}

struct TestAuditLog {
    entries: Mutex<Vec<AuditEntry>>,
}

impl TestAuditLog {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            entries: Mutex::new(Vec::new()),
        })
    }

    fn actions(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.action.clone())
            .collect()
    }
}

#[async_trait]
impl AuditLog for TestAuditLog {
    async fn append(&self, entry: AuditEntry) -> Result<(), DomainError> {
        self.entries.lock().unwrap().push(entry);
        Ok(())
    }
}

struct SilentNotifier;

#[async_trait]
impl FulfillmentNotifier for SilentNotifier {
    async fn order_status_changed(&self, _order: &Order, _new_status: FulfillmentStatus) {}
    async fn order_shipped(&self, _order: &Order, _tracking_number: &str) {}
}

/// Serves every URL with fixed bytes unless broken.
struct TestFetcher {
    broken: bool,
}

#[async_trait]
impl FileFetcher for TestFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        if self.broken {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: 503,
            });
        }
        Ok(b"print-file-bytes".to_vec())
    }
}

struct TestGenerator;

#[async_trait]
impl PrintFileGenerator for TestGenerator {
    async fn generate(
        &self,
        _source: &[u8],
        order_id: &OrderId,
        size: PrintSize,
    ) -> Result<GeneratedPrintFile, GeneratorError> {
        Ok(GeneratedPrintFile {
            download_url: format!("https://render.test/{}/{}", order_id, size),
            file_name: format!("{}_{}_print.jpg", order_id, size),
        })
    }
}

struct TestCarrier;

#[async_trait]
impl CarrierClient for TestCarrier {
    fn carrier(&self) -> CarrierCode {
        CarrierCode::IsraelPost
    }

    fn is_configured(&self) -> bool {
        true
    }

    async fn create_shipment(
        &self,
        request: CreateShipmentRequest,
    ) -> Result<CreateShipmentResult, CarrierError> {
        Ok(CreateShipmentResult {
            shipment_id: format!("shp_{}", request.order_number),
            tracking_number: "RR900000001IL".to_string(),
            carrier: CarrierCode::IsraelPost,
            label_url: None,
        })
    }
}

fn order(status: FulfillmentStatus, size: &str, with_image: bool) -> Order {
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
            size: size.to_string(),
            paper_type: "matte".to_string(),
            frame_type: None,
            quantity: 1,
            price_agorot: 18900,
            original_image_url: None,
            transformed_image_url: with_image
                .then(|| format!("https://cdn.test/t/{}.jpg", id)),
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

fn download_handler(
    store: Arc<TestOrderStore>,
    storage: Arc<InMemoryObjectStorage>,
    audit: Arc<TestAuditLog>,
    broken_fetch: bool,
) -> BulkDownloadHandler {
    let packager = Arc::new(PrintFilePackager::new(
        Arc::new(TestFetcher {
            broken: broken_fetch,
        }),
        Arc::new(TestGenerator),
    ));
    BulkDownloadHandler::new(store, packager, Arc::new(ZipArchiveAssembler::new()), storage, audit)
}

// =============================================================================
// Bulk download
// =============================================================================

#[tokio::test]
async fn bulk_download_produces_archive_with_manifest() {
    let good_a = order(FulfillmentStatus::Printing, "A4", true);
    let good_b = order(FulfillmentStatus::Printing, "A3", true);
    let no_image = order(FulfillmentStatus::Printing, "A4", false);
    let missing = OrderId::new();
    let requested = vec![good_a.id, good_b.id, no_image.id, missing];
    let number_a = good_a.order_number.clone();

    let store = TestOrderStore::with(vec![good_a, good_b, no_image]);
    let storage = Arc::new(InMemoryObjectStorage::new("https://storage.test"));
    let audit = TestAuditLog::new();

    let result = download_handler(store, storage.clone(), audit.clone(), false)
        .handle(BulkDownloadCommand {
            admin_id: AdminId::new(),
            order_ids: requested.clone(),
        })
        .await
        .unwrap();

    assert_eq!(result.file_count, 2);
    assert_eq!(result.skipped.len(), 1);
    assert_eq!(result.not_found, vec![missing]);
    assert!(result.failed.is_empty());
    assert_eq!(result.expires_in_secs, 3600);

    // One object landed in the bulk-downloads folder
    assert_eq!(storage.len().await, 1);
    assert_eq!(audit.actions(), vec!["bulk_print_file_download"]);

    // Crack the archive open and check the ledger
    let key = {
        let url = &result.download_url;
        let start = "https://storage.test/".len();
        let end = url.find('?').unwrap_or(url.len());
        url[start..end].to_string()
    };
    let archive_bytes = storage.get(&key).await.expect("archive stored");
    let mut zip = zip::ZipArchive::new(std::io::Cursor::new(archive_bytes)).unwrap();

    let names: Vec<String> = (0..zip.len())
        .map(|i| zip.by_index(i).unwrap().name().to_string())
        .collect();
    assert_eq!(names.len(), 3, "two print files plus manifest.json");
    assert!(names.contains(&format!("{}/{}_A4_print.jpg", number_a, number_a)));
    assert_eq!(names.last().map(String::as_str), Some("manifest.json"));

    let mut manifest_json = String::new();
    zip.by_name("manifest.json")
        .unwrap()
        .read_to_string(&mut manifest_json)
        .unwrap();
    let manifest: serde_json::Value = serde_json::from_str(&manifest_json).unwrap();

    assert_eq!(manifest["requested"], 4);
    assert_eq!(manifest["included"], 2);
    assert_eq!(manifest["skipped"], 1);
    assert_eq!(manifest["not_found"], 1);
    assert_eq!(manifest["failed"], 0);
    assert_eq!(manifest["entries"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn bulk_download_with_no_producible_files_fails_without_archive() {
    let broken = order(FulfillmentStatus::Printing, "A4", true);
    let requested = vec![broken.id];
    let store = TestOrderStore::with(vec![broken]);
    let storage = Arc::new(InMemoryObjectStorage::new("https://storage.test"));
    let audit = TestAuditLog::new();

    let result = download_handler(store, storage.clone(), audit.clone(), true)
        .handle(BulkDownloadCommand {
            admin_id: AdminId::new(),
            order_ids: requested,
        })
        .await;

    assert!(matches!(result, Err(BulkDownloadError::NoValidFiles)));
    assert!(storage.is_empty().await, "no archive uploaded");
    assert!(audit.actions().is_empty(), "nothing to audit");
}

// =============================================================================
// Shipment creation
// =============================================================================

fn shipment_handler(
    store: Arc<TestOrderStore>,
    shipments: Arc<TestShipmentStore>,
    audit: Arc<TestAuditLog>,
) -> CreateShipmentHandler {
    let mut registry = CarrierRegistry::new(CarrierCode::IsraelPost);
    registry.register(Arc::new(TestCarrier));
    CreateShipmentHandler::new(
        store,
        shipments,
        Arc::new(registry),
        audit,
        Arc::new(SilentNotifier),
        ShippingConfig::default(),
    )
}

#[tokio::test]
async fn shipment_flow_books_once_and_conflicts_on_retry() {
    let ready = order(FulfillmentStatus::ReadyToShip, "A4", true);
    let id = ready.id;
    let store = TestOrderStore::with(vec![ready]);
    let shipments = TestShipmentStore::new();
    let audit = TestAuditLog::new();
    let handler = shipment_handler(store.clone(), shipments.clone(), audit.clone());

    let first = handler
        .handle(CreateShipmentCommand {
            admin_id: AdminId::new(),
            order_id: id,
            carrier: None,
            service_type: None,
        })
        .await
        .unwrap();

    assert_eq!(first.tracking_number, "RR900000001IL");
    assert_eq!(shipments.created_count(), 1);

    let updated = store.get(&id).unwrap();
    assert_eq!(updated.status, FulfillmentStatus::Shipped);
    assert_eq!(updated.carrier, Some(CarrierCode::IsraelPost));
    assert!(updated.shipped_at.is_some());
    assert_eq!(audit.actions(), vec!["shipment_created"]);

    // Second booking without an intervening status change must conflict
    let second = handler
        .handle(CreateShipmentCommand {
            admin_id: AdminId::new(),
            order_id: id,
            carrier: None,
            service_type: None,
        })
        .await;

    assert!(matches!(second, Err(ShipmentError::Duplicate(_))));
    assert_eq!(shipments.created_count(), 1, "still exactly one booking");
}
