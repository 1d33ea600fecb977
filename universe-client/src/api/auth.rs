//! Auth endpoints

use shared::client::{AuthResponse, LoginRequest, RegisterRequest};
use shared::models::User;

use super::Api;
use crate::ClientResult;

impl Api {
    /// `POST auth/login`
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AuthResponse> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let value = self.http.post("auth/login", &Self::body(&request)?).await?;
        let mut envelope = Self::accept(value)?;
        Ok(AuthResponse {
            token: envelope.take("token")?,
            user: envelope.take("user")?,
        })
    }

    /// `POST auth/register`
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<AuthResponse> {
        let value = self.http.post("auth/register", &Self::body(request)?).await?;
        let mut envelope = Self::accept(value)?;
        Ok(AuthResponse {
            token: envelope.take("token")?,
            user: envelope.take("user")?,
        })
    }

    /// `GET auth/me` for the current bearer token
    pub async fn current_user(&self) -> ClientResult<User> {
        self.get_keyed("auth/me", "user").await
    }
}
