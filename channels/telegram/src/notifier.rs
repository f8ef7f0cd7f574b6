use async_trait::async_trait;
use common::config::TelegramConfig;
use common::notify::Notifier;
use teloxide::prelude::*;
use teloxide::types::Recipient;
use tracing::{debug, error, info};

/// Delivers watcher notifications to a single Telegram chat.
pub struct TelegramNotifier {
    bot: Bot,
    recipient: Recipient,
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig) -> Self {
        let recipient = parse_recipient(&config.chat_id);
        info!(destination = %config.chat_id, "Telegram notifier ready");
        Self {
            bot: Bot::new(&config.bot_token),
            recipient,
        }
    }

    async fn send(&self, text: &str) -> Result<(), teloxide::RequestError> {
        self.bot
            .send_message(self.recipient.clone(), text.to_string())
            .await?;
        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn deliver(&self, text: &str) {
        match self.send(text).await {
            Ok(()) => debug!("Notification delivered"),
            Err(e) => error!(error = %e, "Notification not delivered"),
        }
    }
}

/// Numeric ids address a chat directly; anything else is a public channel
/// username.
pub fn parse_recipient(destination: &str) -> Recipient {
    let destination = destination.trim();
    match destination.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) if destination.starts_with('@') => {
            Recipient::ChannelUsername(destination.to_string())
        }
        Err(_) => Recipient::ChannelUsername(format!("@{}", destination)),
    }
}
