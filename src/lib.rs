//! Inkpress - Fulfillment Orchestration Backend
//!
//! This crate moves paid print-on-demand orders through production and
//! shipping: bulk status transitions, print-file packaging for operators,
//! and shipment creation against external carriers.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
