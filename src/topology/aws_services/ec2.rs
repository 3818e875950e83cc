//! EC2 control-plane queries.

use aws_sdk_ec2 as ec2;
use serde_json::{json, Value};

use super::query_fault;
use crate::topology::fault::ProviderFault;

pub struct Ec2Service {
    client: ec2::Client,
}

impl Ec2Service {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: ec2::Client::new(config),
        }
    }

    /// List VPCs, optionally narrowed to one VPC id.
    pub async fn list_vpcs(&self, vpc_id: Option<&str>) -> Result<Vec<Value>, ProviderFault> {
        let mut request = self.client.describe_vpcs();
        if let Some(id) = vpc_id {
            request = request.vpc_ids(id);
        }
        let response = request
            .send()
            .await
            .map_err(|e| query_fault("DescribeVpcs", e))?;
        Ok(response.vpcs.unwrap_or_default().iter().map(vpc_to_json).collect())
    }

    pub async fn list_subnets(&self, vpc_id: Option<&str>) -> Result<Vec<Value>, ProviderFault> {
        let mut request = self.client.describe_subnets();
        if let Some(id) = vpc_id {
            request = request.filters(vpc_filter("vpc-id", id));
        }
        let response = request
            .send()
            .await
            .map_err(|e| query_fault("DescribeSubnets", e))?;
        Ok(response
            .subnets
            .unwrap_or_default()
            .iter()
            .map(subnet_to_json)
            .collect())
    }

    pub async fn list_route_tables(
        &self,
        vpc_id: Option<&str>,
    ) -> Result<Vec<Value>, ProviderFault> {
        let mut request = self.client.describe_route_tables();
        if let Some(id) = vpc_id {
            request = request.filters(vpc_filter("vpc-id", id));
        }
        let response = request
            .send()
            .await
            .map_err(|e| query_fault("DescribeRouteTables", e))?;
        Ok(response
            .route_tables
            .unwrap_or_default()
            .iter()
            .map(route_table_to_json)
            .collect())
    }

    /// Internet gateways are filtered by the VPC they are attached to.
    pub async fn list_internet_gateways(
        &self,
        vpc_id: Option<&str>,
    ) -> Result<Vec<Value>, ProviderFault> {
        let mut request = self.client.describe_internet_gateways();
        if let Some(id) = vpc_id {
            request = request.filters(vpc_filter("attachment.vpc-id", id));
        }
        let response = request
            .send()
            .await
            .map_err(|e| query_fault("DescribeInternetGateways", e))?;
        Ok(response
            .internet_gateways
            .unwrap_or_default()
            .iter()
            .map(internet_gateway_to_json)
            .collect())
    }

    pub async fn list_nat_gateways(
        &self,
        vpc_id: Option<&str>,
    ) -> Result<Vec<Value>, ProviderFault> {
        let mut request = self.client.describe_nat_gateways();
        if let Some(id) = vpc_id {
            request = request.filter(vpc_filter("vpc-id", id));
        }
        let response = request
            .send()
            .await
            .map_err(|e| query_fault("DescribeNatGateways", e))?;
        Ok(response
            .nat_gateways
            .unwrap_or_default()
            .iter()
            .map(nat_gateway_to_json)
            .collect())
    }

    pub async fn list_network_acls(
        &self,
        vpc_id: Option<&str>,
    ) -> Result<Vec<Value>, ProviderFault> {
        let mut request = self.client.describe_network_acls();
        if let Some(id) = vpc_id {
            request = request.filters(vpc_filter("vpc-id", id));
        }
        let response = request
            .send()
            .await
            .map_err(|e| query_fault("DescribeNetworkAcls", e))?;
        Ok(response
            .network_acls
            .unwrap_or_default()
            .iter()
            .map(network_acl_to_json)
            .collect())
    }

    pub async fn list_security_groups(
        &self,
        vpc_id: Option<&str>,
    ) -> Result<Vec<Value>, ProviderFault> {
        let mut request = self.client.describe_security_groups();
        if let Some(id) = vpc_id {
            request = request.filters(vpc_filter("vpc-id", id));
        }
        let response = request
            .send()
            .await
            .map_err(|e| query_fault("DescribeSecurityGroups", e))?;
        Ok(response
            .security_groups
            .unwrap_or_default()
            .iter()
            .map(security_group_to_json)
            .collect())
    }

    /// All instances in the region, flattened out of their reservations.
    pub async fn list_instances(&self) -> Result<Vec<Value>, ProviderFault> {
        let response = self
            .client
            .describe_instances()
            .send()
            .await
            .map_err(|e| query_fault("DescribeInstances", e))?;
        let mut instances = Vec::new();
        for reservation in response.reservations.unwrap_or_default() {
            for instance in reservation.instances.unwrap_or_default() {
                instances.push(instance_to_json(&instance));
            }
        }
        Ok(instances)
    }

    pub async fn list_peering_connections(
        &self,
        vpc_id: Option<&str>,
    ) -> Result<Vec<Value>, ProviderFault> {
        let mut request = self.client.describe_vpc_peering_connections();
        if let Some(id) = vpc_id {
            request = request.filters(vpc_filter("requester-vpc-info.vpc-id", id));
        }
        let response = request
            .send()
            .await
            .map_err(|e| query_fault("DescribeVpcPeeringConnections", e))?;
        Ok(response
            .vpc_peering_connections
            .unwrap_or_default()
            .iter()
            .map(peering_connection_to_json)
            .collect())
    }

    pub async fn list_transit_gateways(&self) -> Result<Vec<Value>, ProviderFault> {
        let response = self
            .client
            .describe_transit_gateways()
            .send()
            .await
            .map_err(|e| query_fault("DescribeTransitGateways", e))?;
        Ok(response
            .transit_gateways
            .unwrap_or_default()
            .iter()
            .map(transit_gateway_to_json)
            .collect())
    }

    pub async fn list_vpn_connections(&self) -> Result<Vec<Value>, ProviderFault> {
        let response = self
            .client
            .describe_vpn_connections()
            .send()
            .await
            .map_err(|e| query_fault("DescribeVpnConnections", e))?;
        Ok(response
            .vpn_connections
            .unwrap_or_default()
            .iter()
            .map(vpn_connection_to_json)
            .collect())
    }
}

fn vpc_filter(name: &'static str, value: &str) -> ec2::types::Filter {
    ec2::types::Filter::builder().name(name).values(value).build()
}

fn tags_to_json(tags: Option<&[ec2::types::Tag]>) -> Value {
    Value::Array(
        tags.unwrap_or_default()
            .iter()
            .map(|tag| json!({"Key": tag.key.as_deref(), "Value": tag.value.as_deref()}))
            .collect(),
    )
}

fn vpc_to_json(vpc: &ec2::types::Vpc) -> Value {
    json!({
        "VpcId": vpc.vpc_id.as_deref(),
        "CidrBlock": vpc.cidr_block.as_deref(),
        "InstanceTenancy": vpc.instance_tenancy.as_ref().map(|t| t.as_str()),
        "DhcpOptionsId": vpc.dhcp_options_id.as_deref(),
        "State": vpc.state.as_ref().map(|s| s.as_str()),
        "IsDefault": vpc.is_default,
        "Tags": tags_to_json(vpc.tags.as_deref()),
    })
}

fn subnet_to_json(subnet: &ec2::types::Subnet) -> Value {
    json!({
        "SubnetId": subnet.subnet_id.as_deref(),
        "VpcId": subnet.vpc_id.as_deref(),
        "AvailabilityZone": subnet.availability_zone.as_deref(),
        "CidrBlock": subnet.cidr_block.as_deref(),
        "State": subnet.state.as_ref().map(|s| s.as_str()),
        "AvailableIpAddressCount": subnet.available_ip_address_count,
        "MapPublicIpOnLaunch": subnet.map_public_ip_on_launch,
        "Tags": tags_to_json(subnet.tags.as_deref()),
    })
}

fn route_table_to_json(table: &ec2::types::RouteTable) -> Value {
    let routes: Vec<Value> = table
        .routes
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|route| {
            json!({
                "DestinationCidrBlock": route.destination_cidr_block.as_deref(),
                "GatewayId": route.gateway_id.as_deref(),
                "NatGatewayId": route.nat_gateway_id.as_deref(),
                "TransitGatewayId": route.transit_gateway_id.as_deref(),
                "VpcPeeringConnectionId": route.vpc_peering_connection_id.as_deref(),
                "State": route.state.as_ref().map(|s| s.as_str()),
            })
        })
        .collect();
    let associations: Vec<Value> = table
        .associations
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|association| {
            json!({
                "RouteTableAssociationId": association.route_table_association_id.as_deref(),
                "SubnetId": association.subnet_id.as_deref(),
                "Main": association.main,
            })
        })
        .collect();
    json!({
        "RouteTableId": table.route_table_id.as_deref(),
        "VpcId": table.vpc_id.as_deref(),
        "Routes": routes,
        "Associations": associations,
        "Tags": tags_to_json(table.tags.as_deref()),
    })
}

fn internet_gateway_to_json(gateway: &ec2::types::InternetGateway) -> Value {
    let attachments: Vec<Value> = gateway
        .attachments
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|attachment| {
            json!({
                "VpcId": attachment.vpc_id.as_deref(),
                "State": attachment.state.as_ref().map(|s| s.as_str()),
            })
        })
        .collect();
    json!({
        "InternetGatewayId": gateway.internet_gateway_id.as_deref(),
        "Attachments": attachments,
        "Tags": tags_to_json(gateway.tags.as_deref()),
    })
}

fn nat_gateway_to_json(gateway: &ec2::types::NatGateway) -> Value {
    let addresses: Vec<Value> = gateway
        .nat_gateway_addresses
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|address| {
            json!({
                "AllocationId": address.allocation_id.as_deref(),
                "PublicIp": address.public_ip.as_deref(),
                "PrivateIp": address.private_ip.as_deref(),
            })
        })
        .collect();
    json!({
        "NatGatewayId": gateway.nat_gateway_id.as_deref(),
        "VpcId": gateway.vpc_id.as_deref(),
        "SubnetId": gateway.subnet_id.as_deref(),
        "State": gateway.state.as_ref().map(|s| s.as_str()),
        "NatGatewayAddresses": addresses,
        "Tags": tags_to_json(gateway.tags.as_deref()),
    })
}

fn network_acl_to_json(acl: &ec2::types::NetworkAcl) -> Value {
    let associations: Vec<Value> = acl
        .associations
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|association| {
            json!({
                "NetworkAclAssociationId": association.network_acl_association_id.as_deref(),
                "SubnetId": association.subnet_id.as_deref(),
            })
        })
        .collect();
    let entries: Vec<Value> = acl
        .entries
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|entry| {
            json!({
                "RuleNumber": entry.rule_number,
                "Protocol": entry.protocol.as_deref(),
                "RuleAction": entry.rule_action.as_ref().map(|a| a.as_str()),
                "Egress": entry.egress,
                "CidrBlock": entry.cidr_block.as_deref(),
            })
        })
        .collect();
    json!({
        "NetworkAclId": acl.network_acl_id.as_deref(),
        "VpcId": acl.vpc_id.as_deref(),
        "IsDefault": acl.is_default,
        "Associations": associations,
        "Entries": entries,
        "Tags": tags_to_json(acl.tags.as_deref()),
    })
}

fn ip_permissions_to_json(permissions: Option<&[ec2::types::IpPermission]>) -> Value {
    Value::Array(
        permissions
            .unwrap_or_default()
            .iter()
            .map(|permission| {
                let ranges: Vec<Value> = permission
                    .ip_ranges
                    .as_deref()
                    .unwrap_or_default()
                    .iter()
                    .map(|range| {
                        json!({
                            "CidrIp": range.cidr_ip.as_deref(),
                            "Description": range.description.as_deref(),
                        })
                    })
                    .collect();
                json!({
                    "IpProtocol": permission.ip_protocol.as_deref(),
                    "FromPort": permission.from_port,
                    "ToPort": permission.to_port,
                    "IpRanges": ranges,
                })
            })
            .collect(),
    )
}

fn security_group_to_json(group: &ec2::types::SecurityGroup) -> Value {
    json!({
        "GroupId": group.group_id.as_deref(),
        "GroupName": group.group_name.as_deref(),
        "Description": group.description.as_deref(),
        "VpcId": group.vpc_id.as_deref(),
        "IpPermissions": ip_permissions_to_json(group.ip_permissions.as_deref()),
        "IpPermissionsEgress": ip_permissions_to_json(group.ip_permissions_egress.as_deref()),
        "Tags": tags_to_json(group.tags.as_deref()),
    })
}

fn instance_to_json(instance: &ec2::types::Instance) -> Value {
    json!({
        "InstanceId": instance.instance_id.as_deref(),
        "State": instance.state.as_ref().map(|state| {
            json!({
                "Code": state.code,
                "Name": state.name.as_ref().map(|n| n.as_str()),
            })
        }),
        "PrivateIpAddress": instance.private_ip_address.as_deref(),
        "PublicIpAddress": instance.public_ip_address.as_deref(),
        "SubnetId": instance.subnet_id.as_deref(),
        "VpcId": instance.vpc_id.as_deref(),
        "Tags": tags_to_json(instance.tags.as_deref()),
    })
}

fn peering_vpc_info_to_json(info: Option<&ec2::types::VpcPeeringConnectionVpcInfo>) -> Value {
    match info {
        Some(info) => {
            let cidr_block_set: Vec<Value> = info
                .cidr_block_set
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|block| json!({"CidrBlock": block.cidr_block.as_deref()}))
                .collect();
            json!({
                "VpcId": info.vpc_id.as_deref(),
                "OwnerId": info.owner_id.as_deref(),
                "CidrBlock": info.cidr_block.as_deref(),
                "CidrBlockSet": cidr_block_set,
            })
        }
        None => Value::Null,
    }
}

fn peering_connection_to_json(peering: &ec2::types::VpcPeeringConnection) -> Value {
    json!({
        "VpcPeeringConnectionId": peering.vpc_peering_connection_id.as_deref(),
        "Status": peering.status.as_ref().map(|status| {
            json!({
                "Code": status.code.as_ref().map(|c| c.as_str()),
                "Message": status.message.as_deref(),
            })
        }),
        "RequesterVpcInfo": peering_vpc_info_to_json(peering.requester_vpc_info.as_ref()),
        "AccepterVpcInfo": peering_vpc_info_to_json(peering.accepter_vpc_info.as_ref()),
        "Tags": tags_to_json(peering.tags.as_deref()),
    })
}

fn transit_gateway_to_json(gateway: &ec2::types::TransitGateway) -> Value {
    json!({
        "TransitGatewayId": gateway.transit_gateway_id.as_deref(),
        "State": gateway.state.as_ref().map(|s| s.as_str()),
        "Description": gateway.description.as_deref(),
        "Options": gateway.options.as_ref().map(|options| {
            json!({
                "AmazonSideAsn": options.amazon_side_asn,
                "TransitGatewayCidrBlocks": options.transit_gateway_cidr_blocks.as_deref(),
                "DnsSupport": options.dns_support.as_ref().map(|d| d.as_str()),
            })
        }),
        "Tags": tags_to_json(gateway.tags.as_deref()),
    })
}

fn vpn_connection_to_json(vpn: &ec2::types::VpnConnection) -> Value {
    let routes: Vec<Value> = vpn
        .routes
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|route| {
            json!({
                "DestinationCidrBlock": route.destination_cidr_block.as_deref(),
                "Source": route.source.as_ref().map(|s| s.as_str()),
                "State": route.state.as_ref().map(|s| s.as_str()),
            })
        })
        .collect();
    json!({
        "VpnConnectionId": vpn.vpn_connection_id.as_deref(),
        "State": vpn.state.as_ref().map(|s| s.as_str()),
        "Type": vpn.r#type.as_ref().map(|t| t.as_str()),
        "Category": vpn.category.as_deref(),
        "VpnGatewayId": vpn.vpn_gateway_id.as_deref(),
        "TransitGatewayId": vpn.transit_gateway_id.as_deref(),
        "CustomerGatewayId": vpn.customer_gateway_id.as_deref(),
        "Routes": routes,
        "Tags": tags_to_json(vpn.tags.as_deref()),
    })
}
