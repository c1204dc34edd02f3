use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::config::AuthConfig;

/// Thin client over the external identity provider's HTTP API. Client
/// credentials are forwarded and results relayed; nothing is persisted here.
#[derive(Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
    anon_key: String,
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity provider returned {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("identity provider unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub refresh_token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProviderUser {
    pub id: Uuid,
    pub email: Option<String>,
    pub role: Option<String>,
}

/// The provider reports failures in a couple of shapes depending on the
/// endpoint; take whichever field is populated.
#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    error: Option<String>,
    error_description: Option<String>,
    msg: Option<String>,
}

impl IdentityClient {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.provider_url.clone(),
            service_key: config.service_key.clone(),
            anon_key: config.anon_key.clone(),
        }
    }

    /// Password-grant login.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<TokenResponse, IdentityError> {
        let resp = self
            .http
            .post(format!("{}/token?grant_type=password", self.base_url))
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        into_result(resp).await
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<ProviderUser, IdentityError> {
        let resp = self
            .http
            .post(format!("{}/signup", self.base_url))
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        into_result(resp).await
    }

    /// Token verification: asks the provider who the bearer token belongs to.
    pub async fn user(&self, access_token: &str) -> Result<ProviderUser, IdentityError> {
        let resp = self
            .http
            .get(format!("{}/user", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;
        into_result(resp).await
    }

    /// Sends the provider's password-recovery email.
    pub async fn send_recovery(&self, email: &str) -> Result<(), IdentityError> {
        let resp = self
            .http
            .post(format!("{}/recover", self.base_url))
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email }))
            .send()
            .await?;
        into_empty_result(resp).await
    }

    /// Updates the password of the user the access token belongs to.
    pub async fn update_password(
        &self,
        access_token: &str,
        new_password: &str,
    ) -> Result<ProviderUser, IdentityError> {
        let resp = self
            .http
            .put(format!("{}/user", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .json(&json!({ "password": new_password }))
            .send()
            .await?;
        into_result(resp).await
    }

    /// Admin deletion, authorized with the service-role key.
    pub async fn admin_delete_user(&self, user_id: Uuid) -> Result<(), IdentityError> {
        let resp = self
            .http
            .delete(format!("{}/admin/users/{}", self.base_url, user_id))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.service_key)
            .send()
            .await?;
        into_empty_result(resp).await
    }
}

async fn into_result<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, IdentityError> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp.json::<T>().await?)
    } else {
        Err(provider_error(status.as_u16(), resp).await)
    }
}

async fn into_empty_result(resp: reqwest::Response) -> Result<(), IdentityError> {
    let status = resp.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(provider_error(status.as_u16(), resp).await)
    }
}

async fn provider_error(status: u16, resp: reqwest::Response) -> IdentityError {
    let message = match resp.json::<ProviderErrorBody>().await {
        Ok(body) => body
            .error_description
            .or(body.msg)
            .or(body.error)
            .unwrap_or_else(|| format!("HTTP {}", status)),
        Err(_) => format!("HTTP {}", status),
    };
    IdentityError::Provider { status, message }
}
