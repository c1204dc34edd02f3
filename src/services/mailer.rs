use std::path::Path;

use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncFileTransport, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;

use crate::config::{EmailConfig, EmailTransportConfig};

pub struct Mailer {
    transport: EmailTransport,
    from_email: String,
    from_name: String,
}

enum EmailTransport {
    Smtp(AsyncSmtpTransport<Tokio1Executor>),
    File(AsyncFileTransport<Tokio1Executor>),
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("failed to initialize email transport: {0}")]
    Transport(String),

    #[error("invalid mailbox address: {0}")]
    Address(String),

    #[error("failed to build email message: {0}")]
    Message(String),

    #[error("failed to send email: {0}")]
    Send(String),
}

impl Mailer {
    pub fn new(config: &EmailConfig) -> Result<Self, MailError> {
        let transport = match &config.transport {
            EmailTransportConfig::Smtp { host, port, username, password } => {
                let builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                    .map_err(|e| MailError::Transport(e.to_string()))?
                    .port(*port)
                    .credentials(Credentials::new(username.clone(), password.clone()));
                EmailTransport::Smtp(builder.build())
            }
            EmailTransportConfig::File { path } => {
                let outbox = Path::new(path);
                if !outbox.exists() {
                    std::fs::create_dir_all(outbox)
                        .map_err(|e| MailError::Transport(e.to_string()))?;
                }
                EmailTransport::File(AsyncFileTransport::<Tokio1Executor>::new(outbox))
            }
        };

        Ok(Self {
            transport,
            from_email: config.from_email.clone(),
            from_name: config.from_name.clone(),
        })
    }

    /// Render-and-send: recipient + subject + HTML body.
    pub async fn send(
        &self,
        to_email: &str,
        to_name: Option<&str>,
        subject: &str,
        body: &str,
    ) -> Result<(), MailError> {
        let from = format!("{} <{}>", self.from_name, self.from_email)
            .parse::<Mailbox>()
            .map_err(|e| MailError::Address(e.to_string()))?;

        let to = if let Some(name) = to_name {
            format!("{name} <{to_email}>")
        } else {
            to_email.to_string()
        }
        .parse::<Mailbox>()
        .map_err(|e| MailError::Address(e.to_string()))?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(body.to_string())
            .map_err(|e| MailError::Message(e.to_string()))?;

        match &self.transport {
            EmailTransport::Smtp(smtp) => {
                smtp.send(message).await.map_err(|e| MailError::Send(e.to_string()))?;
            }
            EmailTransport::File(file) => {
                file.send(message).await.map_err(|e| MailError::Send(e.to_string()))?;
            }
        }

        Ok(())
    }

    pub async fn send_otp_email(
        &self,
        to_email: &str,
        code: &str,
        ttl_minutes: u64,
    ) -> Result<(), MailError> {
        let subject = "Your verification code";
        let body = otp_body(code, ttl_minutes);
        self.send(to_email, None, subject, &body).await
    }
}

fn otp_body(code: &str, ttl_minutes: u64) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
        <h2>Your verification code</h2>

        <p>Use this code to continue signing in:</p>

        <p style="font-size: 28px; letter-spacing: 6px; font-weight: bold;">{code}</p>

        <p>The code expires in {ttl_minutes} minutes. If you didn't request it,
        you can safely ignore this email.</p>
    </div>
</body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn otp_body_includes_code_and_ttl() {
        let body = otp_body("493021", 10);
        assert!(body.contains("493021"));
        assert!(body.contains("10 minutes"));
    }

    #[test]
    fn file_transport_mailer_initializes() {
        let dir = std::env::temp_dir().join("practice-api-outbox-test");
        let config = EmailConfig {
            transport: EmailTransportConfig::File { path: dir.to_string_lossy().to_string() },
            from_email: "noreply@localhost".to_string(),
            from_name: "Practice API".to_string(),
        };
        assert!(Mailer::new(&config).is_ok());
    }
}
