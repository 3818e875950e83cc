//! Normalizer for ELBv2 load balancer records.

use serde_json::Value;

use super::{collect_strs, str_field};
use crate::topology::state::LoadBalancer;

pub fn load_balancer(raw: &Value) -> LoadBalancer {
    LoadBalancer {
        name: str_field(raw, "LoadBalancerName"),
        lb_type: str_field(raw, "Type"),
        scheme: str_field(raw, "Scheme"),
        state: raw
            .get("State")
            .and_then(|state| state.get("Code"))
            .and_then(Value::as_str)
            .map(str::to_string),
        dns_name: str_field(raw, "DNSName"),
        network_id: str_field(raw, "VpcId"),
        availability_zone_names: collect_strs(raw, "AvailabilityZones", "ZoneName"),
        subnets: collect_strs(raw, "AvailabilityZones", "SubnetId"),
        security_group_ids: raw
            .get("SecurityGroups")
            .and_then(Value::as_array)
            .map_or_else(Vec::new, |groups| {
                groups
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            }),
        ip_address_type: str_field(raw, "IpAddressType"),
    }
}
