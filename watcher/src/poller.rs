//! Poll loop: asks the status endpoint for changes every retry period and
//! forwards anything new to the notifier.
//!
//! A failed cycle never ends the loop. The failure is reported to the
//! operator (once per distinct message), the cursor stays where it was and the
//! next cycle asks again from the same point.

use chrono::Utc;
use common::notify::Notifier;
use common::protocol::QueryResult;
use std::sync::Arc;
use tokio::time::{self, Duration};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::api::StatusSource;
use crate::error::WatchError;
use crate::gate::NotificationGate;
use crate::validate::validate;
use crate::verdict::translate;

pub const NO_CHANGES_MESSAGE: &str = "Нет изменений в статусе работы";
pub const FAILURE_PREFIX: &str = "Сбой в работе программы";

const STATUS_KEY: &str = "status";
const ERROR_KEY: &str = "error";

/// What a single cycle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    Advanced { cursor: i64, items: usize },
    Failed { kind: &'static str },
}

pub struct PollLoop {
    source: Arc<dyn StatusSource>,
    notifier: Arc<dyn Notifier>,
    gate: NotificationGate,
    cursor: i64,
    retry_period: Duration,
}

impl PollLoop {
    /// The cursor starts at the current time, so only changes made after
    /// startup are reported.
    pub fn new(
        source: Arc<dyn StatusSource>,
        notifier: Arc<dyn Notifier>,
        retry_period: Duration,
    ) -> Self {
        Self {
            source,
            notifier,
            gate: NotificationGate::new(),
            cursor: Utc::now().timestamp(),
            retry_period,
        }
    }

    pub fn with_cursor(mut self, cursor: i64) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Run cycles until `cancel` fires. Cancellation is checked between
    /// cycles only; a cycle in flight always completes.
    pub async fn run(&mut self, cancel: CancellationToken) {
        info!(
            cursor = self.cursor,
            retry_period_secs = self.retry_period.as_secs(),
            "📡 Homework watcher polling"
        );

        loop {
            match self.run_cycle().await {
                CycleOutcome::Advanced { cursor, items } => {
                    debug!(cursor, items, "Cycle complete")
                }
                CycleOutcome::Failed { kind } => debug!(kind, "Cycle failed, will retry"),
            }

            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Homework watcher stopped");
                    return;
                }
                _ = time::sleep(self.retry_period) => {}
            }
        }
    }

    /// One fetch → validate → notify pass. Errors are contained here.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.poll().await {
            Ok(result) => {
                self.cursor = result.next_cursor;
                CycleOutcome::Advanced {
                    cursor: self.cursor,
                    items: result.items.len(),
                }
            }
            Err(e) => {
                let kind = e.kind();
                let message = format!("{}: {}", FAILURE_PREFIX, e);
                error!(kind, cursor = self.cursor, "{}", message);
                self.notify(ERROR_KEY, &message).await;
                CycleOutcome::Failed { kind }
            }
        }
    }

    async fn poll(&mut self) -> Result<QueryResult, WatchError> {
        let payload = self.source.fetch(self.cursor).await?;
        let result = validate(&payload)?;

        if result.items.is_empty() {
            debug!("No status changes reported");
            self.notify(STATUS_KEY, NO_CHANGES_MESSAGE).await;
        }

        for item in &result.items {
            let message = translate(item)?;
            info!(homework = %item.id, status = %item.status, "Homework status received");
            self.notify(&homework_key(&item.id), &message).await;
        }

        Ok(result)
    }

    async fn notify(&mut self, key: &str, message: &str) {
        if self.gate.admit(key, message) {
            self.notifier.deliver(message).await;
        } else {
            debug!(key, "Message unchanged, not sending");
        }
    }
}

// Prefixed so a homework name can never collide with the sentinel keys.
fn homework_key(id: &str) -> String {
    format!("homework:{}", id)
}
