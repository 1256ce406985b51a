use async_trait::async_trait;
use common::error::PollError;
use serde_json::Value;

pub mod api;
pub mod message;
pub mod poll;

pub use message::{latest_submission, render_failure, render_status, validate};
pub use poll::{Outcome, PollLoop};

/// Source of homework statuses.
#[async_trait]
pub trait HomeworkApi: Send + Sync {
    /// Fetch every homework updated since `from_date` (unix seconds).
    /// Returns the decoded body without checking its structure.
    async fn fetch(&self, from_date: i64) -> Result<Value, PollError>;
}

/// Outbound channel for status and failure notices.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), PollError>;
}
