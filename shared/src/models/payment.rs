//! Payment Model
//!
//! Payments are created by the backend when a checkout session is opened and
//! advanced by the payment processor. The client only reads them.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

/// Payment status as reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Succeeded,
    Failed,
    Cancelled,
    Refunded,
    /// Any status this client does not know about yet
    #[serde(other)]
    Unknown,
}

impl PaymentStatus {
    /// No further transition is expected
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PaymentStatus::Pending | PaymentStatus::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Succeeded => "SUCCEEDED",
            PaymentStatus::Failed => "FAILED",
            PaymentStatus::Cancelled => "CANCELLED",
            PaymentStatus::Refunded => "REFUNDED",
            PaymentStatus::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: i64,
    pub user_id: i64,
    pub club_id: i64,
    pub amount: Decimal,
    pub currency: String,
    pub status: PaymentStatus,
    #[serde(default)]
    pub stripe_session_id: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub paid_at: Option<NaiveDateTime>,
}

/// Serialize an amount with exactly two decimals, e.g. `"1500.00"`
pub fn serialize_amount<S: Serializer>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    let mut scaled = amount.round_dp(2);
    scaled.rescale(2);
    serializer.serialize_str(&scaled.to_string())
}

/// Checkout session request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionRequest {
    pub user_id: i64,
    pub club_id: i64,
    #[serde(serialize_with = "serialize_amount")]
    pub amount: Decimal,
    pub currency: String,
    pub success_url: String,
    pub cancel_url: String,
}

/// Checkout session created by the backend (flat response)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    pub session_id: String,
    /// Hosted checkout page to navigate to
    pub session_url: String,
    pub payment_id: i64,
    #[serde(default)]
    pub message: Option<String>,
}

/// Result of `payments/{id}/verify`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentVerification {
    pub is_successful: bool,
    pub status: PaymentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn test_status_wire_names() {
        let status: PaymentStatus = serde_json::from_value(json!("SUCCEEDED")).unwrap();
        assert_eq!(status, PaymentStatus::Succeeded);
        let status: PaymentStatus = serde_json::from_value(json!("DISPUTED")).unwrap();
        assert_eq!(status, PaymentStatus::Unknown);
    }

    #[test]
    fn test_terminal_states() {
        assert!(!PaymentStatus::Pending.is_terminal());
        assert!(!PaymentStatus::Unknown.is_terminal());
        assert!(PaymentStatus::Succeeded.is_terminal());
        assert!(PaymentStatus::Failed.is_terminal());
        assert!(PaymentStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_checkout_amount_has_two_decimals() {
        let request = CheckoutSessionRequest {
            user_id: 7,
            club_id: 3,
            amount: Decimal::from(1500),
            currency: "LKR".into(),
            success_url: "https://app/payment/success?session_id={CHECKOUT_SESSION_ID}".into(),
            cancel_url: "https://app/payment/cancel?session_id={CHECKOUT_SESSION_ID}".into(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["amount"], "1500.00");
        assert_eq!(value["currency"], "LKR");
        assert_eq!(value["userId"], 7);

        let request = CheckoutSessionRequest {
            amount: Decimal::from_str("249.999").unwrap(),
            ..request
        };
        assert_eq!(serde_json::to_value(&request).unwrap()["amount"], "250.00");
    }

    #[test]
    fn test_payment_from_backend_json() {
        let payment: Payment = serde_json::from_value(json!({
            "id": 42,
            "userId": 7,
            "clubId": 3,
            "amount": 1500.00,
            "currency": "LKR",
            "status": "PENDING",
            "stripeSessionId": "cs_test_1",
            "createdAt": "2026-01-02T09:00:00"
        }))
        .unwrap();
        assert_eq!(payment.amount, Decimal::from(1500));
        assert_eq!(payment.stripe_session_id.as_deref(), Some("cs_test_1"));
        assert!(payment.paid_at.is_none());
    }
}
