//! Normalizer for RDS instance records.

use serde_json::Value;

use super::str_field;
use crate::topology::state::ManagedDatabase;

pub fn managed_database(raw: &Value) -> ManagedDatabase {
    ManagedDatabase {
        name: str_field(raw, "DBInstanceIdentifier"),
        engine: str_field(raw, "Engine"),
        status: str_field(raw, "DBInstanceStatus"),
        network_ref: raw
            .get("DBSubnetGroup")
            .and_then(|group| group.get("VpcId"))
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn managed_database_maps_subnet_group_vpc() {
        let raw = json!({
            "DBInstanceIdentifier": "orders-db",
            "Engine": "postgres",
            "DBInstanceStatus": "available",
            "DBSubnetGroup": {"DBSubnetGroupName": "main", "VpcId": "vpc-1"}
        });
        let db = managed_database(&raw);
        assert_eq!(db.name.as_deref(), Some("orders-db"));
        assert_eq!(db.engine.as_deref(), Some("postgres"));
        assert_eq!(db.status.as_deref(), Some("available"));
        assert_eq!(db.network_ref.as_deref(), Some("vpc-1"));
    }

    #[test]
    fn managed_database_without_subnet_group() {
        let db = managed_database(&json!({"DBInstanceIdentifier": "floating"}));
        assert_eq!(db.network_ref, None);
    }
}
