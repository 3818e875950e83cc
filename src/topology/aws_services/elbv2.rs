//! ELBv2 control-plane queries.

use aws_sdk_elasticloadbalancingv2 as elbv2;
use serde_json::{json, Value};

use super::query_fault;
use crate::topology::fault::ProviderFault;

pub struct ElbService {
    client: elbv2::Client,
}

impl ElbService {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: elbv2::Client::new(config),
        }
    }

    pub async fn list_load_balancers(&self) -> Result<Vec<Value>, ProviderFault> {
        let response = self
            .client
            .describe_load_balancers()
            .send()
            .await
            .map_err(|e| query_fault("DescribeLoadBalancers", e))?;
        Ok(response
            .load_balancers
            .unwrap_or_default()
            .iter()
            .map(load_balancer_to_json)
            .collect())
    }
}

fn load_balancer_to_json(lb: &elbv2::types::LoadBalancer) -> Value {
    let availability_zones: Vec<Value> = lb
        .availability_zones
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|zone| {
            json!({
                "ZoneName": zone.zone_name.as_deref(),
                "SubnetId": zone.subnet_id.as_deref(),
            })
        })
        .collect();
    json!({
        "LoadBalancerName": lb.load_balancer_name.as_deref(),
        "Type": lb.r#type.as_ref().map(|t| t.as_str()),
        "Scheme": lb.scheme.as_ref().map(|s| s.as_str()),
        "State": lb.state.as_ref().map(|state| {
            json!({"Code": state.code.as_ref().map(|c| c.as_str())})
        }),
        "DNSName": lb.dns_name.as_deref(),
        "VpcId": lb.vpc_id.as_deref(),
        "AvailabilityZones": availability_zones,
        "SecurityGroups": lb.security_groups.as_deref(),
        "IpAddressType": lb.ip_address_type.as_ref().map(|t| t.as_str()),
    })
}
