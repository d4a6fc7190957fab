//! Shipping carrier adapters.
//!
//! ## Available Adapters
//!
//! - `IsraelPostClient` - Israel Post domestic shipping API
//! - `CarrierRegistry` - Typed registry selecting clients by `CarrierCode`

mod israel_post;
mod registry;

pub use israel_post::{IsraelPostClient, IsraelPostConfig};
pub use registry::CarrierRegistry;
