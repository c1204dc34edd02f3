use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::Rng;
use tokio::sync::RwLock;

/// Expiring one-time-code store keyed by email. Codes have a fixed TTL,
/// expired entries are evicted when read, reissuing replaces any previous
/// code, and a successful verification consumes the entry.
#[derive(Clone)]
pub struct OtpStore {
    ttl: Duration,
    codes: Arc<RwLock<HashMap<String, IssuedCode>>>,
}

#[derive(Debug, Clone)]
struct IssuedCode {
    code: String,
    expires_at: Instant,
}

impl OtpStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            codes: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Issue a fresh six-digit code, replacing any outstanding one.
    pub async fn issue(&self, email: &str) -> String {
        let code = format!("{:06}", rand::thread_rng().gen_range(0..1_000_000));
        let now = Instant::now();

        let mut codes = self.codes.write().await;
        // Keep the map from accumulating entries for emails that never verify
        codes.retain(|_, entry| entry.expires_at > now);
        codes.insert(
            normalize(email),
            IssuedCode { code: code.clone(), expires_at: now + self.ttl },
        );
        code
    }

    /// Check a code; expired entries are evicted, matches are consumed.
    pub async fn verify(&self, email: &str, code: &str) -> bool {
        let key = normalize(email);
        let now = Instant::now();

        let mut codes = self.codes.write().await;
        let Some(entry) = codes.get(&key) else {
            return false;
        };
        if entry.expires_at <= now {
            codes.remove(&key);
            return false;
        }
        if entry.code == code {
            codes.remove(&key);
            return true;
        }
        false
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn verify_consumes_the_code() {
        let store = OtpStore::new(Duration::from_secs(60));
        let code = store.issue("kid@example.com").await;
        assert!(store.verify("kid@example.com", &code).await);
        // second use fails
        assert!(!store.verify("kid@example.com", &code).await);
    }

    #[tokio::test]
    async fn wrong_code_does_not_consume() {
        let store = OtpStore::new(Duration::from_secs(60));
        let code = store.issue("kid@example.com").await;
        let wrong = if code == "000000" { "000001" } else { "000000" };
        assert!(!store.verify("kid@example.com", wrong).await);
        assert!(store.verify("kid@example.com", &code).await);
    }

    #[tokio::test]
    async fn expired_codes_are_evicted_on_read() {
        let store = OtpStore::new(Duration::ZERO);
        let code = store.issue("kid@example.com").await;
        assert!(!store.verify("kid@example.com", &code).await);
    }

    #[tokio::test]
    async fn reissue_replaces_previous_code() {
        let store = OtpStore::new(Duration::from_secs(60));
        let first = store.issue("kid@example.com").await;
        let second = store.issue("kid@example.com").await;
        if first != second {
            assert!(!store.verify("kid@example.com", &first).await);
        }
        assert!(store.verify("kid@example.com", &second).await);
    }

    #[tokio::test]
    async fn email_matching_ignores_case_and_whitespace() {
        let store = OtpStore::new(Duration::from_secs(60));
        let code = store.issue("Kid@Example.com ").await;
        assert!(store.verify("kid@example.com", &code).await);
    }
}
