//! Club Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Club entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Club {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub admin_id: Option<i64>,
    /// Absent or zero means the club is free to join
    #[serde(default)]
    pub membership_fee: Option<Decimal>,
}

impl Club {
    /// True when joining goes through the hosted checkout
    pub fn requires_payment(&self) -> bool {
        self.membership_fee.is_some_and(|fee| fee > Decimal::ZERO)
    }
}

/// Create / update club payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubRequest {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub membership_fee: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn club(fee: serde_json::Value) -> Club {
        serde_json::from_value(json!({
            "id": 1,
            "name": "Photography Society",
            "description": "Shoot things",
            "membershipFee": fee
        }))
        .unwrap()
    }

    #[test]
    fn test_requires_payment() {
        assert!(club(json!(1500.0)).requires_payment());
        assert!(!club(json!(0)).requires_payment());
        assert!(!club(json!(null)).requires_payment());
    }

    #[test]
    fn test_missing_optional_fields() {
        let club: Club = serde_json::from_value(json!({"id": 2, "name": "Chess"})).unwrap();
        assert!(club.logo_url.is_none());
        assert!(club.membership_fee.is_none());
        assert!(!club.requires_payment());
    }
}
