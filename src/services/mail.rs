//! Transactional mail over SMTP
//!
//! The only message this system sends is the password-reset link. The reset
//! token itself is the sole state: nothing is persisted per request.

use anyhow::{Context, Result};
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use crate::config::Config;

/// SMTP mail sender
///
/// Built without a relay when SMTP is not configured; sending then fails
/// with a configuration error.
#[derive(Clone)]
pub struct Mailer {
    relay: Option<Relay>,
    client_url: String,
}

#[derive(Clone)]
struct Relay {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

/// Render the password-reset email body.
///
/// The link carries the short-lived token in the URL fragment, where the
/// client-side router picks it up.
fn reset_email_html(client_url: &str, token: &str) -> String {
    format!(
        r#"<html>
  <head>
    <style>
      body {{ font-family: Helvetica, Arial, sans-serif; }}
      a {{ background: #d94234; color: #ffffff; padding: 15px; font-weight: bold; border-radius: 10px; }}
    </style>
  </head>
  <body>
    <center>
      <h1>Places</h1>
      <h2>Alterar senha</h2>
      <a href="{client_url}/#/{token}">Clique aqui para continuar</a>
      <h4>Voc&ecirc; ser&aacute; direcionado para nossa p&aacute;gina de altera&ccedil;&atilde;o</h4>
    </center>
  </body>
</html>"#
    )
}

impl Mailer {
    /// Build a mailer from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let relay = match config.smtp_host.as_deref() {
            Some(host) => {
                let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(host)
                    .context("Failed to configure SMTP relay")?;

                if let (Some(username), Some(password)) =
                    (config.smtp_username.clone(), config.smtp_password.clone())
                {
                    builder = builder.credentials(Credentials::new(username, password));
                }

                let from: Mailbox = config
                    .mail_from
                    .parse()
                    .context("Invalid MAIL_FROM address")?;

                Some(Relay {
                    transport: builder.build(),
                    from,
                })
            }
            None => None,
        };

        Ok(Self {
            relay,
            client_url: config.client_url.clone(),
        })
    }

    /// Send the password-reset email carrying a short-lived token
    pub async fn send_password_reset(&self, to: &str, token: &str) -> Result<()> {
        let Some(relay) = &self.relay else {
            anyhow::bail!("SMTP relay is not configured");
        };

        let to_mailbox: Mailbox = to.parse().context("Invalid recipient address")?;

        let message = Message::builder()
            .from(relay.from.clone())
            .to(to_mailbox)
            .subject("Alterar senha")
            .header(ContentType::TEXT_HTML)
            .body(reset_email_html(&self.client_url, token))
            .context("Failed to build reset email")?;

        relay
            .transport
            .send(message)
            .await
            .context("Failed to send reset email")?;

        info!(to = %to, "Password reset email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_without_smtp() -> Config {
        Config {
            host: None,
            port: 3001,
            cors_origin: "http://localhost:3000".to_string(),
            database_url: ":memory:".to_string(),
            jwt_secret: "secret".to_string(),
            jwt_expiration_days: 7,
            google_api_key: None,
            smtp_host: None,
            smtp_username: None,
            smtp_password: None,
            mail_from: "Places <no-reply@places.local>".to_string(),
            client_url: "http://localhost:3000".to_string(),
        }
    }

    #[test]
    fn test_reset_link_embeds_token() {
        let html = reset_email_html("http://localhost:3000", "tok.abc.123");
        assert!(html.contains("http://localhost:3000/#/tok.abc.123"));
    }

    #[tokio::test]
    async fn test_send_fails_without_relay() {
        let mailer = Mailer::from_config(&config_without_smtp()).unwrap();
        let result = mailer.send_password_reset("user@example.com", "tok").await;
        assert!(result.is_err());
    }
}
