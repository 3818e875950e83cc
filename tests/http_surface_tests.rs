//! Route-level behavior: every resource route answers 200, with either
//! canonical records or a fault envelope in the body.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceExt;

use netdash::server;
use netdash::topology::client::{RawRecords, ResourceClient};
use netdash::topology::ProviderFault;

/// One VPC's worth of fixtures; RDS spans two VPCs so the filter is visible.
struct StubClient;

fn denied() -> ProviderFault {
    ProviderFault {
        request_id: Some("req-7".to_string()),
        status_code: Some(403),
        code: Some("AccessDenied".to_string()),
        message: None,
        time: Utc::now(),
    }
}

#[async_trait]
impl ResourceClient for StubClient {
    async fn networks(&self, _vpc_id: Option<&str>) -> RawRecords {
        Ok(vec![json!({
            "VpcId": "vpc-1",
            "Tags": [{"Key": "Name", "Value": "prod"}],
            "CidrBlock": "10.0.0.0/16",
            "State": "available"
        })])
    }

    async fn subnets(&self, _vpc_id: Option<&str>) -> RawRecords {
        Ok(vec![json!({"SubnetId": "subnet-1"})])
    }

    async fn route_tables(&self, _vpc_id: Option<&str>) -> RawRecords {
        Ok(Vec::new())
    }

    async fn internet_gateways(&self, _vpc_id: Option<&str>) -> RawRecords {
        Ok(Vec::new())
    }

    async fn nat_gateways(&self, _vpc_id: Option<&str>) -> RawRecords {
        Ok(Vec::new())
    }

    async fn network_acls(&self, _vpc_id: Option<&str>) -> RawRecords {
        Err(denied())
    }

    async fn security_groups(&self, _vpc_id: Option<&str>) -> RawRecords {
        Ok(Vec::new())
    }

    async fn instances(&self) -> RawRecords {
        Ok(Vec::new())
    }

    async fn peering_connections(&self, _vpc_id: Option<&str>) -> RawRecords {
        Ok(Vec::new())
    }

    async fn transit_gateways(&self) -> RawRecords {
        Ok(Vec::new())
    }

    async fn vpn_connections(&self) -> RawRecords {
        Ok(Vec::new())
    }

    async fn load_balancers(&self) -> RawRecords {
        Ok(Vec::new())
    }

    async fn db_instances(&self) -> RawRecords {
        Ok(vec![
            json!({
                "DBInstanceIdentifier": "orders-db",
                "Engine": "postgres",
                "DBInstanceStatus": "available",
                "DBSubnetGroup": {"VpcId": "vpc-1"}
            }),
            json!({
                "DBInstanceIdentifier": "legacy-db",
                "Engine": "mysql",
                "DBInstanceStatus": "available",
                "DBSubnetGroup": {"VpcId": "vpc-2"}
            }),
        ])
    }

    async fn account_id(&self) -> Result<Option<String>, ProviderFault> {
        Ok(Some("111111111111".to_string()))
    }
}

async fn get(path: &str) -> (StatusCode, Value) {
    let router = server::router(Arc::new(StubClient), "eu-west-1");
    let response = router
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

#[tokio::test]
async fn vpc_all_returns_normalized_networks() {
    let (status, body) = get("/vpc/all").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["Id"], "vpc-1");
    assert_eq!(body[0]["Name"], "prod");
}

#[tokio::test]
async fn composite_route_is_kind_keyed() {
    let (status, body) = get("/vpc?vpcId=vpc-1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["Networks"][0]["Id"], "vpc-1");
    assert!(body["Subnets"].is_array());
    assert!(body["PeeringConnections"].is_array());
}

#[tokio::test]
async fn failing_resource_still_answers_200_with_envelope_body() {
    let (status, body) = get("/nacl?vpcId=vpc-1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["errorCode"], "AccessDenied");
    assert_eq!(body["statusCode"], 403);
}

#[tokio::test]
async fn rds_route_filters_by_network_when_scoped() {
    let (_, all) = get("/rds").await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (_, scoped) = get("/rds?vpcId=vpc-1").await;
    let scoped = scoped.as_array().unwrap();
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0]["Name"], "orders-db");
    assert_eq!(scoped[0]["NetworkRef"], "vpc-1");
}

#[tokio::test]
async fn security_route_reports_account_and_region() {
    let (status, body) = get("/security").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["Account"], "111111111111");
    assert_eq!(body["Region"], "eu-west-1");
}
