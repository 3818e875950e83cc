//! The provider-client seam.
//!
//! [`ResourceClient`] is the single credentialed handle the rest of the
//! system talks to: one query operation per resource kind, each yielding the
//! raw provider records for that kind or the [`ProviderFault`] that stopped
//! it. The handle is built once at startup and shared by reference, so the
//! test suite can substitute a double and the orchestrator never reaches for
//! process-global state. Implementations must tolerate concurrent
//! invocation; the composite query calls several operations at once.

use async_trait::async_trait;
use serde_json::Value;

use super::aws_services::{Ec2Service, ElbService, RdsService, StsService};
use super::fault::ProviderFault;

pub type RawRecords = Result<Vec<Value>, ProviderFault>;

#[async_trait]
pub trait ResourceClient: Send + Sync {
    async fn networks(&self, vpc_id: Option<&str>) -> RawRecords;
    async fn subnets(&self, vpc_id: Option<&str>) -> RawRecords;
    async fn route_tables(&self, vpc_id: Option<&str>) -> RawRecords;
    async fn internet_gateways(&self, vpc_id: Option<&str>) -> RawRecords;
    async fn nat_gateways(&self, vpc_id: Option<&str>) -> RawRecords;
    async fn network_acls(&self, vpc_id: Option<&str>) -> RawRecords;
    async fn security_groups(&self, vpc_id: Option<&str>) -> RawRecords;
    async fn instances(&self) -> RawRecords;
    async fn peering_connections(&self, vpc_id: Option<&str>) -> RawRecords;
    async fn transit_gateways(&self) -> RawRecords;
    async fn vpn_connections(&self) -> RawRecords;
    async fn load_balancers(&self) -> RawRecords;
    async fn db_instances(&self) -> RawRecords;
    async fn account_id(&self) -> Result<Option<String>, ProviderFault>;
}

/// Production implementation over the AWS SDK service wrappers.
pub struct AwsResourceClient {
    ec2: Ec2Service,
    elb: ElbService,
    rds: RdsService,
    sts: StsService,
}

impl AwsResourceClient {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            ec2: Ec2Service::new(config),
            elb: ElbService::new(config),
            rds: RdsService::new(config),
            sts: StsService::new(config),
        }
    }
}

#[async_trait]
impl ResourceClient for AwsResourceClient {
    async fn networks(&self, vpc_id: Option<&str>) -> RawRecords {
        self.ec2.list_vpcs(vpc_id).await
    }

    async fn subnets(&self, vpc_id: Option<&str>) -> RawRecords {
        self.ec2.list_subnets(vpc_id).await
    }

    async fn route_tables(&self, vpc_id: Option<&str>) -> RawRecords {
        self.ec2.list_route_tables(vpc_id).await
    }

    async fn internet_gateways(&self, vpc_id: Option<&str>) -> RawRecords {
        self.ec2.list_internet_gateways(vpc_id).await
    }

    async fn nat_gateways(&self, vpc_id: Option<&str>) -> RawRecords {
        self.ec2.list_nat_gateways(vpc_id).await
    }

    async fn network_acls(&self, vpc_id: Option<&str>) -> RawRecords {
        self.ec2.list_network_acls(vpc_id).await
    }

    async fn security_groups(&self, vpc_id: Option<&str>) -> RawRecords {
        self.ec2.list_security_groups(vpc_id).await
    }

    async fn instances(&self) -> RawRecords {
        self.ec2.list_instances().await
    }

    async fn peering_connections(&self, vpc_id: Option<&str>) -> RawRecords {
        self.ec2.list_peering_connections(vpc_id).await
    }

    async fn transit_gateways(&self) -> RawRecords {
        self.ec2.list_transit_gateways().await
    }

    async fn vpn_connections(&self) -> RawRecords {
        self.ec2.list_vpn_connections().await
    }

    async fn load_balancers(&self) -> RawRecords {
        self.elb.list_load_balancers().await
    }

    async fn db_instances(&self) -> RawRecords {
        self.rds.list_db_instances().await
    }

    async fn account_id(&self) -> Result<Option<String>, ProviderFault> {
        self.sts.account_id().await
    }
}
