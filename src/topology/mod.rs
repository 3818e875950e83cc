//! Aggregation-and-normalization core.
//!
//! Raw provider records flow in through the [`client`] seam, get flattened by
//! the pure [`normalizers`], and leave as the canonical shapes in [`state`].
//! The [`aggregation`] module fans out the per-network composite query;
//! [`fault`] defines how failed sub-queries travel as data.

pub mod aggregation;
pub mod aws_services;
pub mod client;
pub mod fault;
pub mod normalizers;
pub mod state;

pub use aggregation::aggregate_network;
pub use client::{AwsResourceClient, ResourceClient};
pub use fault::{FaultEnvelope, ProviderFault};
