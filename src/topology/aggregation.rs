//! The composite fan-out query.
//!
//! One call answers "everything about this network": eight resource queries
//! dispatched concurrently against the shared client, joined without
//! short-circuiting, each outcome captured independently. A sub-query
//! failure becomes data (a fault envelope in that slot), never an error to
//! the caller. Dispatch order is fixed by
//! [`ResourceKind::DISPATCH_ORDER`](super::state::ResourceKind::DISPATCH_ORDER)
//! and is independent of completion order.
//!
//! No per-query deadline is enforced; a hanging provider call stalls the
//! whole composite.

use serde_json::Value;

use super::client::{RawRecords, ResourceClient};
use super::normalizers::ec2;
use super::state::{CompositeResult, QueryOutcome};

pub async fn aggregate_network(
    client: &dyn ResourceClient,
    vpc_id: Option<&str>,
) -> CompositeResult {
    let (
        networks,
        internet_gateways,
        subnets,
        route_tables,
        security_groups,
        nat_gateways,
        instances,
        peering_connections,
    ) = tokio::join!(
        client.networks(vpc_id),
        client.internet_gateways(vpc_id),
        client.subnets(vpc_id),
        client.route_tables(vpc_id),
        client.security_groups(None),
        client.nat_gateways(vpc_id),
        client.instances(),
        client.peering_connections(vpc_id),
    );

    CompositeResult {
        networks: outcome(networks, ec2::network),
        internet_gateways: outcome(internet_gateways, ec2::internet_gateway),
        subnets: outcome(subnets, ec2::subnet),
        route_tables: outcome(route_tables, ec2::route_table),
        security_groups: outcome(security_groups, ec2::security_group_summary),
        nat_gateways: outcome(nat_gateways, ec2::nat_gateway),
        instances: outcome(instances, ec2::instance),
        peering_connections: outcome(peering_connections, ec2::peering_connection),
    }
}

/// Settle one query: normalize every raw record on success, or downgrade the
/// fault into the envelope that takes the records' place.
pub fn outcome<T>(result: RawRecords, normalize: fn(&Value) -> T) -> QueryOutcome<T> {
    match result {
        Ok(raw) => QueryOutcome::Records(raw.iter().map(normalize).collect()),
        Err(fault) => QueryOutcome::Fault(fault.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::fault::ProviderFault;
    use chrono::Utc;
    use serde_json::json;

    fn fault() -> ProviderFault {
        ProviderFault {
            request_id: Some("req-1".to_string()),
            status_code: Some(503),
            code: Some("Throttling".to_string()),
            message: None,
            time: Utc::now(),
        }
    }

    #[test]
    fn outcome_normalizes_each_record() {
        let raw = vec![json!({"VpcId": "vpc-1"}), json!({"VpcId": "vpc-2"})];
        let settled = outcome(Ok(raw), ec2::network);
        let records = settled.records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].id.as_deref(), Some("vpc-2"));
    }

    #[test]
    fn outcome_keeps_empty_result_as_empty_records() {
        let settled = outcome(Ok(Vec::new()), ec2::network);
        assert!(!settled.is_fault());
        assert_eq!(settled.records().map(|r| r.len()), Some(0));
    }

    #[test]
    fn outcome_downgrades_fault_to_envelope() {
        let settled = outcome(Err(fault()), ec2::network);
        let envelope = settled.fault().unwrap();
        assert_eq!(envelope.error_code.as_deref(), Some("Throttling"));
        assert_eq!(envelope.status_code, Some(503));
    }
}
