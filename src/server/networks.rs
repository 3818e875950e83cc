//! Handlers for the network-topology routes.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use super::AppState;
use crate::topology::aggregation::{aggregate_network, outcome};
use crate::topology::normalizers::{ec2, elbv2, rds};
use crate::topology::state::{
    CompositeResult, InternetGateway, LoadBalancer, ManagedDatabase, Network, NetworkAcl,
    PeeringConnection, QueryOutcome, SecurityGroupDetail, Subnet, TransitGateway, VpnConnection,
};

/// Optional `?vpcId=` narrowing; absent means "all the provider returns".
#[derive(Debug, Deserialize)]
pub struct NetworkScope {
    #[serde(rename = "vpcId")]
    vpc_id: Option<String>,
}

pub async fn all_networks(State(state): State<AppState>) -> Json<QueryOutcome<Network>> {
    Json(outcome(state.client.networks(None).await, ec2::network))
}

pub async fn composite(
    State(state): State<AppState>,
    Query(scope): Query<NetworkScope>,
) -> Json<CompositeResult> {
    Json(aggregate_network(state.client.as_ref(), scope.vpc_id.as_deref()).await)
}

pub async fn subnets(
    State(state): State<AppState>,
    Query(scope): Query<NetworkScope>,
) -> Json<QueryOutcome<Subnet>> {
    Json(outcome(
        state.client.subnets(scope.vpc_id.as_deref()).await,
        ec2::subnet,
    ))
}

pub async fn internet_gateways(
    State(state): State<AppState>,
    Query(scope): Query<NetworkScope>,
) -> Json<QueryOutcome<InternetGateway>> {
    Json(outcome(
        state.client.internet_gateways(scope.vpc_id.as_deref()).await,
        ec2::internet_gateway,
    ))
}

pub async fn security_group_rules(
    State(state): State<AppState>,
    Query(scope): Query<NetworkScope>,
) -> Json<QueryOutcome<SecurityGroupDetail>> {
    Json(outcome(
        state.client.security_groups(scope.vpc_id.as_deref()).await,
        ec2::security_group_detail,
    ))
}

pub async fn network_acls(
    State(state): State<AppState>,
    Query(scope): Query<NetworkScope>,
) -> Json<QueryOutcome<NetworkAcl>> {
    Json(outcome(
        state.client.network_acls(scope.vpc_id.as_deref()).await,
        ec2::network_acl,
    ))
}

/// RDS has no VPC-side filter, so membership is decided here: strict
/// equality against the instance's subnet-group VPC when a scope is given.
pub async fn managed_databases(
    State(state): State<AppState>,
    Query(scope): Query<NetworkScope>,
) -> Json<QueryOutcome<ManagedDatabase>> {
    match state.client.db_instances().await {
        Ok(raw) => {
            let records = raw
                .iter()
                .map(rds::managed_database)
                .filter(|db| match scope.vpc_id.as_deref() {
                    Some(id) => db.network_ref.as_deref() == Some(id),
                    None => true,
                })
                .collect();
            Json(QueryOutcome::Records(records))
        }
        Err(fault) => Json(QueryOutcome::Fault(fault.into())),
    }
}

pub async fn load_balancers(State(state): State<AppState>) -> Json<QueryOutcome<LoadBalancer>> {
    Json(outcome(
        state.client.load_balancers().await,
        elbv2::load_balancer,
    ))
}

pub async fn transit_gateways(
    State(state): State<AppState>,
) -> Json<QueryOutcome<TransitGateway>> {
    Json(outcome(
        state.client.transit_gateways().await,
        ec2::transit_gateway,
    ))
}

pub async fn peering_connections(
    State(state): State<AppState>,
) -> Json<QueryOutcome<PeeringConnection>> {
    Json(outcome(
        state.client.peering_connections(None).await,
        ec2::peering_connection,
    ))
}

pub async fn vpn_connections(State(state): State<AppState>) -> Json<QueryOutcome<VpnConnection>> {
    Json(outcome(
        state.client.vpn_connections().await,
        ec2::vpn_connection,
    ))
}
