use async_trait::async_trait;
use common::error::PollError;
use teloxide::prelude::*;
use teloxide::types::{ChatId, Recipient};
use tracing::{error, info};
use watcher::Notifier;

/// Sends notices to one fixed Telegram chat.
pub struct TelegramNotifier {
    bot: Bot,
    recipient: Recipient,
}

impl TelegramNotifier {
    pub fn new(token: &str, chat_id: &str) -> Self {
        info!("Starting Telegram bot...");
        Self {
            bot: Bot::new(token),
            recipient: parse_recipient(chat_id),
        }
    }
}

/// Numeric ids address users and groups; anything else is a channel username.
pub fn parse_recipient(chat_id: &str) -> Recipient {
    let chat_id = chat_id.trim();
    match chat_id.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) if chat_id.starts_with('@') => Recipient::ChannelUsername(chat_id.to_string()),
        Err(_) => Recipient::ChannelUsername(format!("@{}", chat_id)),
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<(), PollError> {
        match self.bot.send_message(self.recipient.clone(), text).await {
            Ok(_) => {
                info!("Message sent");
                Ok(())
            }
            Err(e) => {
                error!("Message not sent: {}", e);
                Err(PollError::Notification(e.to_string()))
            }
        }
    }
}
