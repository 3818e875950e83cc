//! Normalizers for EC2 resource records.

use serde_json::Value;

use super::{array_field, bool_field, collect_strs, resolve_name_tag, str_field};
use crate::topology::state::{
    Instance, InternetGateway, NatGateway, Network, NetworkAcl, PeeringConnection, RouteTable,
    SecurityGroupDetail, SecurityGroupSummary, Subnet, TransitGateway, VpnConnection,
};

pub fn network(raw: &Value) -> Network {
    Network {
        id: str_field(raw, "VpcId"),
        name: resolve_name_tag(raw),
        cidr_block: str_field(raw, "CidrBlock"),
        tenancy: str_field(raw, "InstanceTenancy"),
        dhcp_options_id: str_field(raw, "DhcpOptionsId"),
        state: str_field(raw, "State"),
    }
}

pub fn subnet(raw: &Value) -> Subnet {
    Subnet {
        id: str_field(raw, "SubnetId"),
        name: resolve_name_tag(raw),
        availability_zone: str_field(raw, "AvailabilityZone"),
        cidr_block: str_field(raw, "CidrBlock"),
        state: str_field(raw, "State"),
        available_ip_count: raw.get("AvailableIpAddressCount").and_then(Value::as_i64),
        map_public_ip_on_launch: bool_field(raw, "MapPublicIpOnLaunch"),
    }
}

pub fn route_table(raw: &Value) -> RouteTable {
    let routes = array_field(raw, "Routes");
    let mut route_destinations = Vec::with_capacity(routes.len());
    let mut route_targets = Vec::with_capacity(routes.len());
    let mut route_states = Vec::with_capacity(routes.len());
    for route in routes {
        route_destinations.push(str_field(route, "DestinationCidrBlock"));
        route_targets.push(route_target(route));
        route_states.push(str_field(route, "State"));
    }

    let associations = array_field(raw, "Associations");
    RouteTable {
        id: str_field(raw, "RouteTableId"),
        name: resolve_name_tag(raw),
        subnet_associations: associations
            .iter()
            .filter_map(|association| str_field(association, "SubnetId"))
            .collect(),
        is_main: associations
            .iter()
            .any(|association| bool_field(association, "Main").unwrap_or(false)),
        route_destinations,
        route_targets,
        route_states,
    }
}

/// A route names its forwarding target under one of several mutually
/// exclusive fields. Resolution order: peering connection, then gateway,
/// then NAT gateway, then transit gateway.
fn route_target(route: &Value) -> Option<String> {
    [
        "VpcPeeringConnectionId",
        "GatewayId",
        "NatGatewayId",
        "TransitGatewayId",
    ]
    .iter()
    .find_map(|key| str_field(route, key))
}

/// An internet gateway has at most one attachment; an unattached gateway
/// yields a null state.
pub fn internet_gateway(raw: &Value) -> InternetGateway {
    InternetGateway {
        id: str_field(raw, "InternetGatewayId"),
        name: resolve_name_tag(raw),
        state: array_field(raw, "Attachments")
            .first()
            .and_then(|attachment| str_field(attachment, "State")),
    }
}

pub fn nat_gateway(raw: &Value) -> NatGateway {
    NatGateway {
        id: str_field(raw, "NatGatewayId"),
        name: resolve_name_tag(raw),
        state: str_field(raw, "State"),
        subnet_id: str_field(raw, "SubnetId"),
        public_ips: collect_strs(raw, "NatGatewayAddresses", "PublicIp"),
        private_ips: collect_strs(raw, "NatGatewayAddresses", "PrivateIp"),
    }
}

pub fn network_acl(raw: &Value) -> NetworkAcl {
    let entries = array_field(raw, "Entries");
    let egress_entry_count = entries
        .iter()
        .filter(|entry| bool_field(entry, "Egress").unwrap_or(false))
        .count();
    NetworkAcl {
        id: str_field(raw, "NetworkAclId"),
        name: resolve_name_tag(raw),
        subnet_ids: collect_strs(raw, "Associations", "SubnetId"),
        is_default: bool_field(raw, "IsDefault"),
        ingress_entry_count: entries.len() - egress_entry_count,
        egress_entry_count,
    }
}

pub fn security_group_summary(raw: &Value) -> SecurityGroupSummary {
    SecurityGroupSummary {
        id: str_field(raw, "GroupId"),
        name: str_field(raw, "GroupName"),
        description: str_field(raw, "Description"),
    }
}

pub fn security_group_detail(raw: &Value) -> SecurityGroupDetail {
    let (ingress_protocols, ingress_cidrs) = permission_lists(array_field(raw, "IpPermissions"));
    let (egress_protocols, egress_cidrs) =
        permission_lists(array_field(raw, "IpPermissionsEgress"));
    SecurityGroupDetail {
        id: str_field(raw, "GroupId"),
        ingress_protocols,
        ingress_cidrs,
        egress_protocols,
        egress_cidrs,
    }
}

/// One protocol/CIDR pair per permission. Only the first `IpRanges` entry is
/// read; permissions with several ranges surface just the first.
fn permission_lists(permissions: &[Value]) -> (Vec<Option<String>>, Vec<Option<String>>) {
    let mut protocols = Vec::with_capacity(permissions.len());
    let mut cidrs = Vec::with_capacity(permissions.len());
    for permission in permissions {
        protocols.push(str_field(permission, "IpProtocol"));
        cidrs.push(
            array_field(permission, "IpRanges")
                .first()
                .and_then(|range| str_field(range, "CidrIp")),
        );
    }
    (protocols, cidrs)
}

pub fn instance(raw: &Value) -> Instance {
    Instance {
        id: str_field(raw, "InstanceId"),
        name: resolve_name_tag(raw),
        state: raw
            .get("State")
            .and_then(|state| state.get("Name"))
            .and_then(Value::as_str)
            .map(str::to_string),
        private_ip: str_field(raw, "PrivateIpAddress"),
        public_ip: str_field(raw, "PublicIpAddress"),
        subnet_id: str_field(raw, "SubnetId"),
    }
}

pub fn peering_connection(raw: &Value) -> PeeringConnection {
    let requester = raw.get("RequesterVpcInfo");
    let accepter = raw.get("AccepterVpcInfo");
    PeeringConnection {
        id: str_field(raw, "VpcPeeringConnectionId"),
        name: resolve_name_tag(raw),
        status: raw
            .get("Status")
            .and_then(|status| status.get("Code"))
            .and_then(Value::as_str)
            .map(str::to_string),
        requester_network_ref: requester.and_then(|info| str_field(info, "VpcId")),
        accepter_network_ref: accepter.and_then(|info| str_field(info, "VpcId")),
        requester_cidrs: requester.map_or_else(Vec::new, peer_cidrs),
        accepter_cidrs: accepter.map_or_else(Vec::new, peer_cidrs),
        requester_owner: requester.and_then(|info| str_field(info, "OwnerId")),
        accepter_owner: accepter.and_then(|info| str_field(info, "OwnerId")),
    }
}

/// CIDR blocks of one side of a peering link. The block set supersedes the
/// legacy single `CidrBlock` field, which only appears on old records.
fn peer_cidrs(info: &Value) -> Vec<String> {
    let from_set = collect_strs(info, "CidrBlockSet", "CidrBlock");
    if !from_set.is_empty() {
        return from_set;
    }
    str_field(info, "CidrBlock").into_iter().collect()
}

pub fn transit_gateway(raw: &Value) -> TransitGateway {
    let options = raw.get("Options");
    TransitGateway {
        id: str_field(raw, "TransitGatewayId"),
        name: resolve_name_tag(raw),
        state: str_field(raw, "State"),
        cidr_blocks: options
            .and_then(|options| options.get("TransitGatewayCidrBlocks"))
            .and_then(Value::as_array)
            .map_or_else(Vec::new, |blocks| {
                blocks
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            }),
        dns_support: options.and_then(|options| str_field(options, "DnsSupport")),
    }
}

pub fn vpn_connection(raw: &Value) -> VpnConnection {
    VpnConnection {
        id: str_field(raw, "VpnConnectionId"),
        name: resolve_name_tag(raw),
        state: str_field(raw, "State"),
        connection_type: str_field(raw, "Type"),
        category: str_field(raw, "Category"),
        vpn_gateway_ref: str_field(raw, "VpnGatewayId"),
        transit_gateway_ref: str_field(raw, "TransitGatewayId"),
        customer_gateway_ref: str_field(raw, "CustomerGatewayId"),
        route_summaries: array_field(raw, "Routes")
            .iter()
            .map(|route| {
                format!(
                    "{} ({})",
                    str_field(route, "DestinationCidrBlock")
                        .unwrap_or_else(|| "unknown".to_string()),
                    str_field(route, "State").unwrap_or_else(|| "unknown".to_string()),
                )
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn network_maps_all_fields() {
        let raw = json!({
            "VpcId": "vpc-1",
            "Tags": [{"Key": "Name", "Value": "prod"}],
            "CidrBlock": "10.0.0.0/16",
            "InstanceTenancy": "default",
            "DhcpOptionsId": "dopt-1",
            "State": "available"
        });
        assert_eq!(
            network(&raw),
            Network {
                id: Some("vpc-1".to_string()),
                name: Some("prod".to_string()),
                cidr_block: Some("10.0.0.0/16".to_string()),
                tenancy: Some("default".to_string()),
                dhcp_options_id: Some("dopt-1".to_string()),
                state: Some("available".to_string()),
            }
        );
    }

    #[test]
    fn normalizers_are_idempotent() {
        let raw = json!({"VpcId": "vpc-1", "Tags": [{"Key": "Name", "Value": "a"}]});
        assert_eq!(network(&raw), network(&raw));
    }

    #[test]
    fn route_target_prefers_peering_over_everything() {
        let route = json!({
            "VpcPeeringConnectionId": "pcx-1",
            "GatewayId": "igw-1",
            "NatGatewayId": "nat-1",
            "TransitGatewayId": "tgw-1"
        });
        assert_eq!(route_target(&route).as_deref(), Some("pcx-1"));
    }

    #[test]
    fn route_target_prefers_nat_over_transit() {
        let route = json!({"NatGatewayId": "nat-1", "TransitGatewayId": "tgw-1"});
        assert_eq!(route_target(&route).as_deref(), Some("nat-1"));
    }

    #[test]
    fn route_target_none_when_no_target_field_present() {
        assert_eq!(route_target(&json!({"DestinationCidrBlock": "0.0.0.0/0"})), None);
    }

    #[test]
    fn route_table_keeps_parallel_sequences_aligned() {
        let raw = json!({
            "RouteTableId": "rtb-1",
            "Routes": [
                {"DestinationCidrBlock": "10.0.0.0/16", "GatewayId": "local", "State": "active"},
                {"DestinationCidrBlock": "0.0.0.0/0", "NatGatewayId": "nat-1", "State": "blackhole"},
                {"State": "active"}
            ],
            "Associations": [
                {"SubnetId": "subnet-1", "Main": false},
                {"Main": true}
            ]
        });
        let table = route_table(&raw);
        assert_eq!(
            table.route_destinations,
            vec![Some("10.0.0.0/16".to_string()), Some("0.0.0.0/0".to_string()), None]
        );
        assert_eq!(
            table.route_targets,
            vec![Some("local".to_string()), Some("nat-1".to_string()), None]
        );
        assert_eq!(
            table.route_states,
            vec![
                Some("active".to_string()),
                Some("blackhole".to_string()),
                Some("active".to_string())
            ]
        );
        assert_eq!(table.subnet_associations, vec!["subnet-1".to_string()]);
        assert!(table.is_main);
    }

    #[test]
    fn internet_gateway_without_attachments_has_null_state() {
        let raw = json!({"InternetGatewayId": "igw-1", "Attachments": [], "Tags": []});
        let gateway = internet_gateway(&raw);
        assert_eq!(gateway.id.as_deref(), Some("igw-1"));
        assert_eq!(gateway.state, None);
    }

    #[test]
    fn internet_gateway_state_comes_from_sole_attachment() {
        let raw = json!({
            "InternetGatewayId": "igw-1",
            "Attachments": [{"VpcId": "vpc-1", "State": "available"}]
        });
        assert_eq!(internet_gateway(&raw).state.as_deref(), Some("available"));
    }

    #[test]
    fn nat_gateway_collects_addresses() {
        let raw = json!({
            "NatGatewayId": "nat-1",
            "State": "available",
            "SubnetId": "subnet-1",
            "NatGatewayAddresses": [
                {"PublicIp": "52.1.2.3", "PrivateIp": "10.0.1.10"},
                {"PrivateIp": "10.0.1.11"}
            ]
        });
        let gateway = nat_gateway(&raw);
        assert_eq!(gateway.public_ips, vec!["52.1.2.3".to_string()]);
        assert_eq!(
            gateway.private_ips,
            vec!["10.0.1.10".to_string(), "10.0.1.11".to_string()]
        );
    }

    #[test]
    fn network_acl_counts_entries_by_direction() {
        let raw = json!({
            "NetworkAclId": "acl-1",
            "IsDefault": true,
            "Associations": [{"SubnetId": "subnet-1"}, {"SubnetId": "subnet-2"}],
            "Entries": [
                {"RuleNumber": 100, "Egress": false},
                {"RuleNumber": 100, "Egress": true},
                {"RuleNumber": 32767, "Egress": true}
            ]
        });
        let acl = network_acl(&raw);
        assert_eq!(acl.ingress_entry_count, 1);
        assert_eq!(acl.egress_entry_count, 2);
        assert_eq!(acl.subnet_ids.len(), 2);
        assert_eq!(acl.is_default, Some(true));
    }

    #[test]
    fn security_group_detail_reads_only_first_ip_range() {
        let raw = json!({
            "GroupId": "sg-1",
            "IpPermissions": [{
                "IpProtocol": "tcp",
                "IpRanges": [{"CidrIp": "10.0.0.0/8"}, {"CidrIp": "192.168.0.0/16"}]
            }],
            "IpPermissionsEgress": [{"IpProtocol": "-1", "IpRanges": []}]
        });
        let detail = security_group_detail(&raw);
        assert_eq!(detail.ingress_protocols, vec![Some("tcp".to_string())]);
        assert_eq!(detail.ingress_cidrs, vec![Some("10.0.0.0/8".to_string())]);
        assert_eq!(detail.egress_protocols, vec![Some("-1".to_string())]);
        assert_eq!(detail.egress_cidrs, vec![None]);
    }

    #[test]
    fn instance_flattens_nested_state() {
        let raw = json!({
            "InstanceId": "i-1",
            "State": {"Code": 16, "Name": "running"},
            "PrivateIpAddress": "10.0.1.5",
            "SubnetId": "subnet-1"
        });
        let normalized = instance(&raw);
        assert_eq!(normalized.state.as_deref(), Some("running"));
        assert_eq!(normalized.public_ip, None);
    }

    #[test]
    fn peering_connection_maps_both_sides() {
        let raw = json!({
            "VpcPeeringConnectionId": "pcx-1",
            "Status": {"Code": "active", "Message": "Active"},
            "RequesterVpcInfo": {
                "VpcId": "vpc-1",
                "OwnerId": "111111111111",
                "CidrBlockSet": [{"CidrBlock": "10.0.0.0/16"}, {"CidrBlock": "10.1.0.0/16"}]
            },
            "AccepterVpcInfo": {
                "VpcId": "vpc-2",
                "OwnerId": "222222222222",
                "CidrBlock": "172.16.0.0/16"
            }
        });
        let peering = peering_connection(&raw);
        assert_eq!(peering.status.as_deref(), Some("active"));
        assert_eq!(peering.requester_cidrs.len(), 2);
        assert_eq!(peering.accepter_cidrs, vec!["172.16.0.0/16".to_string()]);
        assert_eq!(peering.requester_owner.as_deref(), Some("111111111111"));
    }

    #[test]
    fn transit_gateway_reads_option_block() {
        let raw = json!({
            "TransitGatewayId": "tgw-1",
            "State": "available",
            "Options": {
                "TransitGatewayCidrBlocks": ["10.100.0.0/24"],
                "DnsSupport": "enable"
            }
        });
        let gateway = transit_gateway(&raw);
        assert_eq!(gateway.cidr_blocks, vec!["10.100.0.0/24".to_string()]);
        assert_eq!(gateway.dns_support.as_deref(), Some("enable"));
    }

    #[test]
    fn vpn_connection_formats_route_summaries() {
        let raw = json!({
            "VpnConnectionId": "vpn-1",
            "State": "available",
            "Type": "ipsec.1",
            "Category": "VPN",
            "VpnGatewayId": "vgw-1",
            "Routes": [
                {"DestinationCidrBlock": "10.2.0.0/16", "State": "available"},
                {"State": "pending"}
            ]
        });
        let vpn = vpn_connection(&raw);
        assert_eq!(
            vpn.route_summaries,
            vec![
                "10.2.0.0/16 (available)".to_string(),
                "unknown (pending)".to_string()
            ]
        );
        assert_eq!(vpn.vpn_gateway_ref.as_deref(), Some("vgw-1"));
        assert_eq!(vpn.transit_gateway_ref, None);
    }
}
