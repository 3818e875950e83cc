//! netdash - read-only network topology API for an AWS account.
//!
//! The service queries the EC2, ELBv2, RDS and STS control planes and
//! reshapes their deeply nested responses into flat, UI-consumable records.
//! Everything is rebuilt per request: no caching, no writes, no pagination
//! (single-page responses are assumed).
//!
//! # Architecture
//!
//! - [`topology`]: the core. A [`topology::ResourceClient`] seam over the
//!   AWS SDK, pure per-record normalizers, and the concurrent composite
//!   query that tolerates partial failure.
//! - [`server`]: the axum transport mapping routes onto the core.
//! - [`config`]: environment-driven settings.
//!
//! Sub-query failures never surface as transport errors; they travel as
//! [`topology::FaultEnvelope`] values inside an otherwise ordinary 200 body.

#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod server;
pub mod topology;
