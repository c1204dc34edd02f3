use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde::Serialize;

static SERVER: OnceLock<TestServer> = OnceLock::new();

/// Secret shared between the spawned server and the token-minting helper.
pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Live tests need a reachable Postgres; skip quietly when the environment
/// doesn't provide one.
pub fn database_configured() -> bool {
    std::env::var("DATABASE_URL").is_ok()
}

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    #[allow(dead_code)]
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary to keep start fast during tests
        let mut cmd = Command::new("target/debug/practice-api");
        cmd.env("PRACTICE_API_PORT", port.to_string())
            .env("AUTH_JWT_SECRET", TEST_JWT_SECRET)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Inherit environment so the server sees DATABASE_URL from .env
        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK
                    || resp.status() == StatusCode::SERVICE_UNAVAILABLE
                {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

#[derive(Serialize)]
struct TestClaims {
    sub: uuid::Uuid,
    email: Option<String>,
    role: Option<String>,
    exp: i64,
}

/// Mint an access token the server will accept, standing in for the identity
/// provider during tests.
pub fn mint_token() -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let claims = TestClaims {
        sub: uuid::Uuid::new_v4(),
        email: Some("tester@example.com".to_string()),
        role: Some("authenticated".to_string()),
        exp: chrono::Utc::now().timestamp() + 3600,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()))
        .expect("failed to sign test token")
}
