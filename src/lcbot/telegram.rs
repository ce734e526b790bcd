use anyhow::{Context, Result};
use reqwest::Client;
use serde::Serialize;

use std::future::Future;

use crate::lcapi;

/// Somewhere a finished announcement can be delivered.
pub trait Notifier {
    fn send(&self, text: &str) -> impl Future<Output = Result<()>>;
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
    disable_web_page_preview: bool,
}

/// Posts announcements to a single Telegram chat through the Bot API.
pub struct TelegramNotifier {
    client: Client,
    endpoint: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(api_base: &str, bot_token: &str, chat_id: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: lcapi::http_client()?,
            endpoint: format!("{api_base}/bot{bot_token}/sendMessage"),
            chat_id: chat_id.into(),
        })
    }

    fn payload<'a>(&'a self, text: &'a str) -> SendMessage<'a> {
        SendMessage {
            chat_id: &self.chat_id,
            text,
            parse_mode: "Markdown",
            disable_web_page_preview: true,
        }
    }
}

impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        log::trace!("[TelegramNotifier::send] Sending {} bytes to chat {}", text.len(), self.chat_id);

        // The endpoint embeds the bot token, so keep it out of error messages.
        self.client
            .post(&self.endpoint)
            .json(&self.payload(text))
            .send()
            .await
            .map_err(|err| err.without_url())
            .context("Could not reach Telegram.")?
            .error_for_status()
            .map_err(|err| err.without_url())
            .context("Telegram rejected the message.")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_requests_markdown_without_previews() {
        let notifier =
            TelegramNotifier::new("https://api.telegram.org", "123:abc", "-10042").unwrap();
        let body = serde_json::to_value(notifier.payload("*hi*")).unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "chat_id": "-10042",
                "text": "*hi*",
                "parse_mode": "Markdown",
                "disable_web_page_preview": true,
            })
        );
        assert_eq!(notifier.endpoint, "https://api.telegram.org/bot123:abc/sendMessage");
    }
}
