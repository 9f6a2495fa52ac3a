//! Periodic fetch-and-render of the stats endpoint.
//!
//! [`StatsPoller::start`] fires one poll immediately and then one per
//! interval. Every tick spawns its own request task, so a slow response does
//! not hold back the next tick and several requests can be in flight at
//! once. Results reach the view as [`AppMessage::UsagesUpdated`] in the
//! order they complete, and the view applies each one unconditionally. A
//! response to an older request that completes late therefore overwrites a
//! newer one: the last processed response wins.
//!
//! Failed cycles leave the current list untouched. They are logged and
//! never retried; the next tick is the retry.
//!
//! # Dependency Injection
//!
//! - Use [`StatsPoller::with_reqwest`] in production
//! - Use [`StatsPoller::new`] with a `MockHttpClient` in tests

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, trace, warn};

use crate::adapters::ReqwestHttpClient;
use crate::app::AppMessage;
use crate::config::MonitorConfig;
use crate::error::PollError;
use crate::models::{StatsResponse, UsageList};
use crate::traits::HttpClient;

/// Polls the stats endpoint and forwards rendered lists to the view.
pub struct StatsPoller {
    client: Arc<dyn HttpClient>,
    stats_url: String,
    interval: Duration,
    message_tx: mpsc::UnboundedSender<AppMessage>,
    /// Issue order of requests, for logs and for spotting reordering
    next_seq: AtomicU64,
}

impl StatsPoller {
    /// Create a poller with an injected HTTP client.
    pub fn new(
        client: Arc<dyn HttpClient>,
        config: &MonitorConfig,
        message_tx: mpsc::UnboundedSender<AppMessage>,
    ) -> Self {
        Self {
            client,
            stats_url: config.stats_url(),
            interval: config.poll_interval,
            message_tx,
            next_seq: AtomicU64::new(0),
        }
    }

    /// Create a poller backed by reqwest.
    pub fn with_reqwest(
        config: &MonitorConfig,
        message_tx: mpsc::UnboundedSender<AppMessage>,
    ) -> Self {
        let client = ReqwestHttpClient::with_connect_timeout(config.connect_timeout);
        Self::new(Arc::new(client), config, message_tx)
    }

    pub fn stats_url(&self) -> &str {
        &self.stats_url
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of requests issued so far.
    pub fn requests_issued(&self) -> u64 {
        self.next_seq.load(Ordering::Relaxed)
    }

    /// GET the endpoint and decode the body.
    ///
    /// Succeeds only for status 200 with a complete body that parses as a
    /// stats document.
    pub async fn fetch(&self) -> Result<StatsResponse, PollError> {
        let response = self.client.get(&self.stats_url).await?;

        if !response.is_ok() {
            return Err(PollError::Status {
                status: response.status,
            });
        }

        Ok(StatsResponse::from_slice(&response.body)?)
    }

    /// One poll cycle: fetch, then replace the view's list.
    ///
    /// On any error nothing is sent and the view keeps what it shows.
    pub async fn fetch_and_render(&self) -> Result<(), PollError> {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        trace!(seq, url = %self.stats_url, "Issuing stats request");

        let stats = self.fetch().await?;
        let list = UsageList::from(stats);
        trace!(seq, rows = list.len(), "Stats received");

        self.message_tx
            .send(AppMessage::UsagesUpdated { seq, list })
            .map_err(|_| PollError::ViewClosed)
    }

    async fn run_cycle(&self) {
        match self.fetch_and_render().await {
            Ok(()) => {}
            Err(err @ PollError::Decode(_)) => {
                warn!(
                    code = err.error_code(),
                    category = %err.category(),
                    "Skipping render: {}",
                    err
                );
            }
            Err(err) => {
                debug!(
                    code = err.error_code(),
                    category = %err.category(),
                    "Poll cycle failed: {}",
                    err
                );
            }
        }
    }

    /// Poll now and then every interval until stopped.
    ///
    /// The ticker also stops by itself once the view side of the channel
    /// is dropped.
    pub fn start(self: Arc<Self>) -> PollerHandle {
        let poller = self;
        let ticker = tokio::spawn(async move {
            info!(
                "Stats poller started ({} every {}ms)",
                poller.stats_url,
                poller.interval.as_millis()
            );

            let mut interval = tokio::time::interval(poller.interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                // First tick completes immediately
                interval.tick().await;

                if poller.message_tx.is_closed() {
                    debug!("View closed, stopping stats poller");
                    break;
                }

                let cycle = Arc::clone(&poller);
                tokio::spawn(async move {
                    cycle.run_cycle().await;
                });
            }
        });

        PollerHandle { ticker }
    }
}

/// Lifecycle handle returned by [`StatsPoller::start`].
///
/// Stopping ends the timer. Requests already in flight are left to finish
/// and may still render. Dropping the handle stops the poller as well.
pub struct PollerHandle {
    ticker: JoinHandle<()>,
}

impl PollerHandle {
    pub fn stop(&self) {
        if !self.ticker.is_finished() {
            debug!("Stopping stats poller");
            self.ticker.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        !self.ticker.is_finished()
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.ticker.abort();
    }
}
