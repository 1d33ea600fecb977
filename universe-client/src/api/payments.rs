//! Payment endpoints

use serde_json::Value;
use shared::error::ErrorCode;
use shared::models::{
    CheckoutSession, CheckoutSessionRequest, Payment, PaymentStatus, PaymentVerification,
};

use super::Api;
use crate::{ClientError, ClientResult};

/// Result of `payments/{id}/confirm`
#[derive(Debug, Clone, PartialEq)]
pub struct Confirmation {
    pub payment: Payment,
    pub status: PaymentStatus,
    pub message: Option<String>,
}

impl Api {
    /// Open a hosted checkout session
    ///
    /// The backend appends `session_id` to both return URLs itself.
    pub async fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> ClientResult<CheckoutSession> {
        let value = self
            .http
            .post("payments/create-checkout-session", &Self::body(request)?)
            .await?;
        let envelope = Self::accept(value)?;

        let has_url = envelope
            .payload
            .get("sessionUrl")
            .and_then(Value::as_str)
            .is_some_and(|url| !url.trim().is_empty());
        if !has_url {
            return Err(ClientError::Rejected {
                status: 200,
                message: envelope.message_or(ErrorCode::CheckoutSessionFailed.message()),
            });
        }

        let message = envelope.message.clone();
        let mut session: CheckoutSession = envelope.into_flat()?;
        if session.message.is_none() {
            session.message = message;
        }
        Ok(session)
    }

    pub async fn payment(&self, payment_id: i64) -> ClientResult<Payment> {
        self.get_keyed(&format!("payments/{}", payment_id), "payment")
            .await
    }

    /// Payment created for a checkout session
    pub async fn payment_by_session(&self, session_id: &str) -> ClientResult<Payment> {
        self.get_keyed(&format!("payments/session/{}", session_id), "payment")
            .await
    }

    /// Read-only status check
    pub async fn verify_payment(&self, payment_id: i64) -> ClientResult<PaymentVerification> {
        let value = self
            .http
            .get(&format!("payments/{}/verify", payment_id))
            .await?;
        Ok(Self::accept(value)?.into_flat()?)
    }

    /// Ask the backend to re-check the processor and update the payment
    ///
    /// Idempotent: confirming a succeeded payment returns it unchanged.
    pub async fn confirm_payment(&self, payment_id: i64) -> ClientResult<Confirmation> {
        let value = self
            .http
            .post_empty(&format!("payments/{}/confirm", payment_id))
            .await?;
        let mut envelope = Self::accept(value)?;
        let payment: Payment = envelope.take("payment")?;
        let status = envelope
            .take_opt::<PaymentStatus>("status")?
            .unwrap_or(payment.status);
        Ok(Confirmation {
            payment,
            status,
            message: envelope.message,
        })
    }
}
