//! HTTP transport layer.
//!
//! A thin axum router over the topology core: handlers parse the query
//! scope, invoke the orchestrator or a single normalization pass, and
//! serialize whatever comes back with status 200. Fault envelopes travel in
//! the body rather than the status line.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::topology::ResourceClient;

pub mod identity;
pub mod networks;

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn ResourceClient>,
    pub region: String,
}

pub fn router(client: Arc<dyn ResourceClient>, region: &str) -> Router {
    let state = AppState {
        client,
        region: region.to_string(),
    };

    // The UI is served from another origin; mirror the permissive CORS the
    // frontend has always relied on.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/vpc/all", get(networks::all_networks))
        .route("/vpc", get(networks::composite))
        .route("/subnet", get(networks::subnets))
        .route("/igw", get(networks::internet_gateways))
        .route("/sg", get(networks::security_group_rules))
        .route("/nacl", get(networks::network_acls))
        .route("/rds", get(networks::managed_databases))
        .route("/elb/all", get(networks::load_balancers))
        .route("/transit/all", get(networks::transit_gateways))
        .route("/peer/all", get(networks::peering_connections))
        .route("/vpn/all", get(networks::vpn_connections))
        .route("/security", get(identity::caller_identity))
        .with_state(state)
        .layer(cors)
}
