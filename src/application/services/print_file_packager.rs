//! Print-file packaging for one order.
//!
//! Turns an order into a production-ready file for the operator archive.
//! Every failure degrades to a typed outcome so a caller processing many
//! orders can keep going; nothing here returns `Err`.

use std::str::FromStr;
use std::sync::Arc;

use crate::domain::order::{Order, PrintSize};
use crate::ports::{FileFetcher, PrintFileGenerator};

/// A production-ready file with its archive path.
#[derive(Debug, Clone)]
pub struct PackagedFile {
    /// Archive entry name: `{order_number}/{order_number}_{size}_print.jpg`.
    /// The leading segment groups files by order inside the archive.
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Outcome of packaging one order.
#[derive(Debug, Clone)]
pub enum PackageOutcome {
    Packaged(PackagedFile),
    /// The order cannot produce a print file (missing image, bad size).
    Skipped { reason: String },
    /// An upstream call failed; the order may succeed on a later attempt.
    Failed { reason: String },
}

/// Packages print-ready files for single orders.
pub struct PrintFilePackager {
    fetcher: Arc<dyn FileFetcher>,
    generator: Arc<dyn PrintFileGenerator>,
}

impl PrintFilePackager {
    pub fn new(fetcher: Arc<dyn FileFetcher>, generator: Arc<dyn PrintFileGenerator>) -> Self {
        Self { fetcher, generator }
    }

    /// Produces the order's print-ready file.
    pub async fn package(&self, order: &Order) -> PackageOutcome {
        // 1. The order needs a transformed image to print from
        let item = match order.primary_item() {
            Some(item) => item,
            None => {
                return PackageOutcome::Skipped {
                    reason: "No transformed image".to_string(),
                }
            }
        };
        let image_url = match &item.transformed_image_url {
            Some(url) => url,
            None => {
                return PackageOutcome::Skipped {
                    reason: "No transformed image".to_string(),
                }
            }
        };

        // 2. Only the supported physical sizes can be produced
        let size = match PrintSize::from_str(&item.size) {
            Ok(size) => size,
            Err(_) => {
                return PackageOutcome::Skipped {
                    reason: format!("Invalid print size: {}", item.size),
                }
            }
        };

        // 3. Fetch the transformed image
        let source = match self.fetcher.fetch(image_url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(order_id = %order.id, error = %e, "Transformed image fetch failed");
                return PackageOutcome::Failed {
                    reason: "Failed to fetch image".to_string(),
                };
            }
        };

        // 4. Generate the print file and fetch the result
        let generated = match self.generator.generate(&source, &order.id, size).await {
            Ok(generated) => generated,
            Err(e) => {
                tracing::warn!(order_id = %order.id, error = %e, "Print-file generation failed");
                return PackageOutcome::Failed {
                    reason: "Failed to fetch print file".to_string(),
                };
            }
        };
        let bytes = match self.fetcher.fetch(&generated.download_url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(order_id = %order.id, error = %e, "Print-file fetch failed");
                return PackageOutcome::Failed {
                    reason: "Failed to fetch print file".to_string(),
                };
            }
        };

        // 5. Name the file so archive entries group by order number
        PackageOutcome::Packaged(PackagedFile {
            name: format!(
                "{}/{}_{}_print.jpg",
                order.order_number, order.order_number, size
            ),
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{OrderId, OrderItemId, Timestamp};
    use crate::domain::order::{FulfillmentStatus, OrderItem};
    use crate::ports::{FetchError, GeneratedPrintFile, GeneratorError};
    use async_trait::async_trait;
    use std::collections::HashMap;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    struct MockFetcher {
        responses: HashMap<String, Vec<u8>>,
    }

    impl MockFetcher {
        fn with(pairs: &[(&str, &[u8])]) -> Self {
            Self {
                responses: pairs
                    .iter()
                    .map(|(url, bytes)| (url.to_string(), bytes.to_vec()))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl FileFetcher for MockFetcher {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            self.responses.get(url).cloned().ok_or(FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
        }
    }

    struct MockGenerator {
        fail: bool,
    }

    #[async_trait]
    impl PrintFileGenerator for MockGenerator {
        async fn generate(
            &self,
            _source: &[u8],
            order_id: &OrderId,
            size: PrintSize,
        ) -> Result<GeneratedPrintFile, GeneratorError> {
            if self.fail {
                return Err(GeneratorError::Generation("render queue full".to_string()));
            }
            Ok(GeneratedPrintFile {
                download_url: "https://gen.example.com/out.jpg".to_string(),
                file_name: format!("{}_{}_print.jpg", order_id, size),
            })
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn order_with_item(size: &str, transformed: Option<&str>) -> Order {
        Order {
            id: OrderId::new(),
            order_number: "INK-2026-000042".to_string(),
            customer_email: None,
            status: FulfillmentStatus::Printing,
            total_agorot: 18900,
            shipping_address: None,
            gift: None,
            items: vec![OrderItem {
                id: OrderItemId::new(),
                size: size.to_string(),
                paper_type: "matte".to_string(),
                frame_type: None,
                quantity: 1,
                price_agorot: 18900,
                original_image_url: None,
                transformed_image_url: transformed.map(|s| s.to_string()),
                print_ready_url: None,
            }],
            tracking_number: None,
            carrier: None,
            created_at: Timestamp::now(),
            paid_at: None,
            shipped_at: None,
            delivered_at: None,
            cancelled_at: None,
            updated_at: Timestamp::now(),
        }
    }

    fn packager(fetcher: MockFetcher, generator: MockGenerator) -> PrintFilePackager {
        PrintFilePackager::new(Arc::new(fetcher), Arc::new(generator))
    }

    const IMAGE_URL: &str = "https://cdn.example.com/t/img.jpg";
    const GEN_URL: &str = "https://gen.example.com/out.jpg";

    // ════════════════════════════════════════════════════════════════════════════
    // Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn packages_order_with_grouped_archive_name() {
        let order = order_with_item("A4", Some(IMAGE_URL));
        let p = packager(
            MockFetcher::with(&[(IMAGE_URL, b"img".as_slice()), (GEN_URL, b"print-bytes".as_slice())]),
            MockGenerator { fail: false },
        );

        match p.package(&order).await {
            PackageOutcome::Packaged(file) => {
                assert_eq!(file.name, "INK-2026-000042/INK-2026-000042_A4_print.jpg");
                assert_eq!(file.bytes, b"print-bytes");
            }
            other => panic!("expected Packaged, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn skips_order_without_transformed_image() {
        let order = order_with_item("A4", None);
        let p = packager(MockFetcher::with(&[]), MockGenerator { fail: false });

        match p.package(&order).await {
            PackageOutcome::Skipped { reason } => assert_eq!(reason, "No transformed image"),
            other => panic!("expected Skipped, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn skips_order_without_items() {
        let mut order = order_with_item("A4", Some(IMAGE_URL));
        order.items.clear();
        let p = packager(MockFetcher::with(&[]), MockGenerator { fail: false });

        assert!(matches!(
            p.package(&order).await,
            PackageOutcome::Skipped { .. }
        ));
    }

    #[tokio::test]
    async fn skips_unsupported_print_size_naming_it() {
        let order = order_with_item("Letter", Some(IMAGE_URL));
        let p = packager(MockFetcher::with(&[]), MockGenerator { fail: false });

        match p.package(&order).await {
            PackageOutcome::Skipped { reason } => {
                assert_eq!(reason, "Invalid print size: Letter");
            }
            other => panic!("expected Skipped, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn fails_when_image_fetch_fails() {
        let order = order_with_item("A4", Some(IMAGE_URL));
        let p = packager(MockFetcher::with(&[]), MockGenerator { fail: false });

        match p.package(&order).await {
            PackageOutcome::Failed { reason } => assert_eq!(reason, "Failed to fetch image"),
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn fails_when_generator_fails() {
        let order = order_with_item("A4", Some(IMAGE_URL));
        let p = packager(
            MockFetcher::with(&[(IMAGE_URL, b"img".as_slice())]),
            MockGenerator { fail: true },
        );

        match p.package(&order).await {
            PackageOutcome::Failed { reason } => {
                assert_eq!(reason, "Failed to fetch print file");
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn fails_when_generated_file_fetch_fails() {
        let order = order_with_item("A4", Some(IMAGE_URL));
        // Generator succeeds but its download URL is not fetchable
        let p = packager(
            MockFetcher::with(&[(IMAGE_URL, b"img".as_slice())]),
            MockGenerator { fail: false },
        );

        match p.package(&order).await {
            PackageOutcome::Failed { reason } => {
                assert_eq!(reason, "Failed to fetch print file");
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }
}
