//! Homework status poller.
//!
//! Fetches the latest homework every cycle, notifies when its status
//! differs from the last one delivered, and turns every cycle failure into
//! a notice on the same channel so the loop keeps running.

use chrono::Utc;
use common::error::PollError;
use common::homework::{HomeworkStatus, Submission};
use tokio::time::{self, Duration};
use tracing::{debug, error, info};

use crate::message::{latest_submission, render_failure, render_status, validate};
use crate::{HomeworkApi, Notifier};

/// Result of one successful cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Unchanged,
    Notified(HomeworkStatus),
}

pub struct PollLoop<A, N> {
    api: A,
    notifier: N,
    retry: Duration,
    timestamp: i64,
    cached: Option<HomeworkStatus>,
}

impl<A: HomeworkApi, N: Notifier> PollLoop<A, N> {
    /// Start polling from the current time; older homeworks are not reported.
    pub fn new(api: A, notifier: N, retry: Duration) -> Self {
        Self::with_start_timestamp(api, notifier, retry, Utc::now().timestamp())
    }

    pub fn with_start_timestamp(api: A, notifier: N, retry: Duration, timestamp: i64) -> Self {
        Self {
            api,
            notifier,
            retry,
            timestamp,
            cached: None,
        }
    }

    pub fn cached_status(&self) -> Option<HomeworkStatus> {
        self.cached
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Poll forever. Returns only when a failure notice itself cannot be sent.
    pub async fn run(mut self) -> Result<(), PollError> {
        info!(retry_secs = self.retry.as_secs(), "Homework poller started");
        loop {
            self.tick().await?;
        }
    }

    /// One cycle, including the error branch and the sleep that follows it.
    pub async fn tick(&mut self) -> Result<(), PollError> {
        match self.poll_once().await {
            Ok(Outcome::Unchanged) => {
                debug!("Homework status unchanged");
                self.timestamp = Utc::now().timestamp();
                time::sleep(self.retry).await;
            }
            Ok(Outcome::Notified(status)) => {
                info!(%status, "Status change delivered");
            }
            Err(e) => {
                error!(kind = e.kind(), "Poll cycle failed: {}", e);
                // A failure here is left to the caller.
                self.notifier.send(&render_failure(&e)).await?;
                time::sleep(self.retry).await;
            }
        }
        Ok(())
    }

    /// Fetch, validate and decide without any error containment.
    pub async fn poll_once(&mut self) -> Result<Outcome, PollError> {
        let response = self.api.fetch(self.timestamp).await?;
        let homeworks = validate(response)?;
        let submission = latest_submission(&homeworks)?;
        self.decide(&submission).await
    }

    /// Notify if `submission` differs from the cached status. The cache is
    /// only updated once the notification went through.
    pub async fn decide(&mut self, submission: &Submission) -> Result<Outcome, PollError> {
        if self.cached.map(|s| s.as_str()) == Some(submission.status.as_str()) {
            return Ok(Outcome::Unchanged);
        }

        let (text, status) = render_status(submission)?;
        self.notifier.send(&text).await?;
        self.cached = Some(status);
        Ok(Outcome::Notified(status))
    }
}
