use std::sync::Arc;

use sqlx::PgPool;

use crate::services::{IdentityClient, Mailer, OtpStore, StorageClient};

/// Everything a request handler can reach: the shared pool plus the external
/// service clients, all cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub identity: IdentityClient,
    pub storage: StorageClient,
    pub mailer: Arc<Mailer>,
    pub otp: OtpStore,
}
