use anyhow::Context as _;
use mail_send::{SmtpClientBuilder, mail_builder::MessageBuilder};

use crate::domain::repository::Mailer;
use crate::error::AdminServiceError;

#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
}

/// SMTP delivery via STARTTLS. Without settings, mail is logged and dropped.
#[derive(Debug, Clone)]
pub struct SmtpMailer {
    pub settings: Option<SmtpSettings>,
}

impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AdminServiceError> {
        let Some(settings) = &self.settings else {
            tracing::info!(subject, "SMTP not configured; mail dropped");
            return Ok(());
        };

        let message = MessageBuilder::new()
            .from(settings.from.as_str())
            .to(to)
            .subject(subject)
            .text_body(body);

        let mut client = SmtpClientBuilder::new(settings.host.as_str(), settings.port)
            .implicit_tls(settings.port == 465);
        if !settings.username.is_empty() {
            client = client.credentials((settings.username.as_str(), settings.password.as_str()));
        }
        client
            .connect()
            .await
            .context("connect to SMTP server")?
            .send(message)
            .await
            .context("send mail")?;
        Ok(())
    }
}
