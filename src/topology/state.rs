//! Canonical, UI-consumable record shapes.
//!
//! Every struct here is the flattened form of one deeply nested provider
//! record. Fields serialize under their PascalCase wire names and `None`
//! serializes as an explicit `null`, which is what the UI expects. Records
//! are rebuilt on every request; nothing is cached between queries.

use serde::Serialize;

use super::fault::FaultEnvelope;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Network {
    pub id: Option<String>,
    pub name: Option<String>,
    pub cidr_block: Option<String>,
    pub tenancy: Option<String>,
    pub dhcp_options_id: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Subnet {
    pub id: Option<String>,
    pub name: Option<String>,
    pub availability_zone: Option<String>,
    pub cidr_block: Option<String>,
    pub state: Option<String>,
    pub available_ip_count: Option<i64>,
    pub map_public_ip_on_launch: Option<bool>,
}

/// Route tables keep their routes as three parallel sequences, positionally
/// aligned: entry `i` of each describes the same route.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RouteTable {
    pub id: Option<String>,
    pub name: Option<String>,
    pub subnet_associations: Vec<String>,
    pub is_main: bool,
    pub route_destinations: Vec<Option<String>>,
    pub route_targets: Vec<Option<String>>,
    pub route_states: Vec<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InternetGateway {
    pub id: Option<String>,
    pub name: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NatGateway {
    pub id: Option<String>,
    pub name: Option<String>,
    pub state: Option<String>,
    pub subnet_id: Option<String>,
    #[serde(rename = "PublicIPs")]
    pub public_ips: Vec<String>,
    #[serde(rename = "PrivateIPs")]
    pub private_ips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NetworkAcl {
    pub id: Option<String>,
    pub name: Option<String>,
    pub subnet_ids: Vec<String>,
    pub is_default: Option<bool>,
    pub ingress_entry_count: usize,
    pub egress_entry_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SecurityGroupSummary {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Per-permission protocol and CIDR lists, positionally aligned. Only the
/// first IP range of each permission is surfaced; the UI renders one row per
/// permission and additional ranges were never plumbed through.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SecurityGroupDetail {
    pub id: Option<String>,
    pub ingress_protocols: Vec<Option<String>>,
    pub ingress_cidrs: Vec<Option<String>>,
    pub egress_protocols: Vec<Option<String>>,
    pub egress_cidrs: Vec<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Instance {
    pub id: Option<String>,
    pub name: Option<String>,
    pub state: Option<String>,
    pub private_ip: Option<String>,
    pub public_ip: Option<String>,
    pub subnet_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PeeringConnection {
    pub id: Option<String>,
    pub name: Option<String>,
    pub status: Option<String>,
    pub requester_network_ref: Option<String>,
    pub accepter_network_ref: Option<String>,
    pub requester_cidrs: Vec<String>,
    pub accepter_cidrs: Vec<String>,
    pub requester_owner: Option<String>,
    pub accepter_owner: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransitGateway {
    pub id: Option<String>,
    pub name: Option<String>,
    pub state: Option<String>,
    pub cidr_blocks: Vec<String>,
    pub dns_support: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct VpnConnection {
    pub id: Option<String>,
    pub name: Option<String>,
    pub state: Option<String>,
    #[serde(rename = "Type")]
    pub connection_type: Option<String>,
    pub category: Option<String>,
    pub vpn_gateway_ref: Option<String>,
    pub transit_gateway_ref: Option<String>,
    pub customer_gateway_ref: Option<String>,
    pub route_summaries: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoadBalancer {
    pub name: Option<String>,
    #[serde(rename = "Type")]
    pub lb_type: Option<String>,
    pub scheme: Option<String>,
    pub state: Option<String>,
    #[serde(rename = "DNSName")]
    pub dns_name: Option<String>,
    pub network_id: Option<String>,
    pub availability_zone_names: Vec<String>,
    pub subnets: Vec<String>,
    pub security_group_ids: Vec<String>,
    pub ip_address_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ManagedDatabase {
    pub name: Option<String>,
    pub engine: Option<String>,
    pub status: Option<String>,
    pub network_ref: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CallerIdentity {
    pub account: Option<String>,
    pub region: String,
}

/// The resource collections the composite query fans out over, in dispatch
/// order. This order is the positional contract: slot 0 of
/// [`CompositeResult::positional`] is always the Network outcome, slot 1 the
/// InternetGateway outcome, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResourceKind {
    Network,
    InternetGateway,
    Subnet,
    RouteTable,
    SecurityGroup,
    NatGateway,
    Instance,
    PeeringConnection,
}

impl ResourceKind {
    pub const DISPATCH_ORDER: [ResourceKind; 8] = [
        ResourceKind::Network,
        ResourceKind::InternetGateway,
        ResourceKind::Subnet,
        ResourceKind::RouteTable,
        ResourceKind::SecurityGroup,
        ResourceKind::NatGateway,
        ResourceKind::Instance,
        ResourceKind::PeeringConnection,
    ];

    /// Key under which this kind's outcome appears in the composite JSON.
    pub fn key(&self) -> &'static str {
        match self {
            ResourceKind::Network => "Networks",
            ResourceKind::InternetGateway => "InternetGateways",
            ResourceKind::Subnet => "Subnets",
            ResourceKind::RouteTable => "RouteTables",
            ResourceKind::SecurityGroup => "SecurityGroups",
            ResourceKind::NatGateway => "NatGateways",
            ResourceKind::Instance => "Instances",
            ResourceKind::PeeringConnection => "PeeringConnections",
        }
    }
}

/// One settled sub-query: either the normalized records or the fault that
/// took their place. Serializes untagged, so a slot is a JSON array on
/// success and a fault object on failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryOutcome<T> {
    Records(Vec<T>),
    Fault(FaultEnvelope),
}

impl<T> QueryOutcome<T> {
    pub fn records(&self) -> Option<&[T]> {
        match self {
            QueryOutcome::Records(records) => Some(records),
            QueryOutcome::Fault(_) => None,
        }
    }

    pub fn fault(&self) -> Option<&FaultEnvelope> {
        match self {
            QueryOutcome::Records(_) => None,
            QueryOutcome::Fault(envelope) => Some(envelope),
        }
    }

    pub fn is_fault(&self) -> bool {
        matches!(self, QueryOutcome::Fault(_))
    }
}

/// The assembled answer for one network: every fan-out query's outcome,
/// keyed by resource kind. Field declaration order matches
/// [`ResourceKind::DISPATCH_ORDER`], so the serialized object's keys and the
/// positional view enumerate identically.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeResult {
    #[serde(rename = "Networks")]
    pub networks: QueryOutcome<Network>,
    #[serde(rename = "InternetGateways")]
    pub internet_gateways: QueryOutcome<InternetGateway>,
    #[serde(rename = "Subnets")]
    pub subnets: QueryOutcome<Subnet>,
    #[serde(rename = "RouteTables")]
    pub route_tables: QueryOutcome<RouteTable>,
    #[serde(rename = "SecurityGroups")]
    pub security_groups: QueryOutcome<SecurityGroupSummary>,
    #[serde(rename = "NatGateways")]
    pub nat_gateways: QueryOutcome<NatGateway>,
    #[serde(rename = "Instances")]
    pub instances: QueryOutcome<Instance>,
    #[serde(rename = "PeeringConnections")]
    pub peering_connections: QueryOutcome<PeeringConnection>,
}

impl CompositeResult {
    pub const LEN: usize = ResourceKind::DISPATCH_ORDER.len();

    /// Serialized view of one slot.
    pub fn slot(&self, kind: ResourceKind) -> serde_json::Value {
        let serialized = match kind {
            ResourceKind::Network => serde_json::to_value(&self.networks),
            ResourceKind::InternetGateway => serde_json::to_value(&self.internet_gateways),
            ResourceKind::Subnet => serde_json::to_value(&self.subnets),
            ResourceKind::RouteTable => serde_json::to_value(&self.route_tables),
            ResourceKind::SecurityGroup => serde_json::to_value(&self.security_groups),
            ResourceKind::NatGateway => serde_json::to_value(&self.nat_gateways),
            ResourceKind::Instance => serde_json::to_value(&self.instances),
            ResourceKind::PeeringConnection => serde_json::to_value(&self.peering_connections),
        };
        serialized.unwrap_or(serde_json::Value::Null)
    }

    /// Legacy positional view: slots in dispatch order, one per resource
    /// kind, regardless of which sub-queries failed. Kept as a migration aid
    /// for consumers that still index into the composite.
    pub fn positional(&self) -> Vec<serde_json::Value> {
        ResourceKind::DISPATCH_ORDER
            .iter()
            .map(|kind| self.slot(*kind))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_order_starts_with_network_then_internet_gateway() {
        assert_eq!(ResourceKind::DISPATCH_ORDER[0], ResourceKind::Network);
        assert_eq!(
            ResourceKind::DISPATCH_ORDER[1],
            ResourceKind::InternetGateway
        );
        assert_eq!(ResourceKind::DISPATCH_ORDER.len(), CompositeResult::LEN);
    }

    #[test]
    fn outcome_accessors() {
        let ok: QueryOutcome<Network> = QueryOutcome::Records(Vec::new());
        assert!(!ok.is_fault());
        assert_eq!(ok.records().map(|r| r.len()), Some(0));
        assert!(ok.fault().is_none());
    }

    #[test]
    fn network_serializes_under_wire_names() {
        let network = Network {
            id: Some("vpc-1".to_string()),
            name: Some("prod".to_string()),
            cidr_block: Some("10.0.0.0/16".to_string()),
            tenancy: Some("default".to_string()),
            dhcp_options_id: Some("dopt-1".to_string()),
            state: Some("available".to_string()),
        };
        let json = serde_json::to_value(&network).unwrap();
        assert_eq!(json["Id"], "vpc-1");
        assert_eq!(json["Name"], "prod");
        assert_eq!(json["CidrBlock"], "10.0.0.0/16");
        assert_eq!(json["Tenancy"], "default");
        assert_eq!(json["DhcpOptionsId"], "dopt-1");
        assert_eq!(json["State"], "available");
    }

    #[test]
    fn absent_fields_serialize_as_explicit_nulls() {
        let instance = Instance {
            id: Some("i-1".to_string()),
            name: None,
            state: Some("running".to_string()),
            private_ip: Some("10.0.1.5".to_string()),
            public_ip: None,
            subnet_id: Some("subnet-1".to_string()),
        };
        let json = serde_json::to_value(&instance).unwrap();
        assert!(json.as_object().unwrap().contains_key("PublicIp"));
        assert_eq!(json["PublicIp"], serde_json::Value::Null);
    }
}
