//! RDS control-plane queries.

use aws_sdk_rds as rds;
use serde_json::{json, Value};

use super::query_fault;
use crate::topology::fault::ProviderFault;

pub struct RdsService {
    client: rds::Client,
}

impl RdsService {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: rds::Client::new(config),
        }
    }

    /// All DB instances in the region. RDS offers no VPC-side filter on this
    /// call; association with a network happens after normalization.
    pub async fn list_db_instances(&self) -> Result<Vec<Value>, ProviderFault> {
        let response = self
            .client
            .describe_db_instances()
            .send()
            .await
            .map_err(|e| query_fault("DescribeDBInstances", e))?;
        Ok(response
            .db_instances
            .unwrap_or_default()
            .iter()
            .map(db_instance_to_json)
            .collect())
    }
}

fn db_instance_to_json(instance: &rds::types::DbInstance) -> Value {
    json!({
        "DBInstanceIdentifier": instance.db_instance_identifier.as_deref(),
        "Engine": instance.engine.as_deref(),
        "DBInstanceStatus": instance.db_instance_status.as_deref(),
        "DBSubnetGroup": instance.db_subnet_group.as_ref().map(|group| {
            json!({
                "DBSubnetGroupName": group.db_subnet_group_name.as_deref(),
                "VpcId": group.vpc_id.as_deref(),
            })
        }),
    })
}
