//! Background count of unseen booking inquiries
//!
//! The count is best effort: failed fetches are logged at debug level and the
//! previous value stays published. The task lives exactly as long as its
//! [`PollerHandle`].

use crate::api_client::ApiClient;
use fm_admin_core::unseen_count;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Starts unseen-booking polling tasks
#[derive(Debug, Clone)]
pub struct UnseenBookingsPoller {
    client: ApiClient,
    period: Duration,
}

impl UnseenBookingsPoller {
    /// Poll through `client` every `period`
    #[must_use]
    pub const fn new(client: ApiClient, period: Duration) -> Self {
        Self { client, period }
    }

    /// Spawn the polling task; the first fetch happens immediately
    #[must_use]
    pub fn start(&self) -> PollerHandle {
        let (sender, receiver) = watch::channel(None);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(poll_loop(
            self.client.clone(),
            self.period,
            sender,
            cancel.clone(),
        ));

        info!("Unseen-booking poller started (every {:?})", self.period);

        PollerHandle {
            cancel,
            receiver,
            task: Some(task),
        }
    }
}

async fn poll_loop(
    client: ApiClient,
    period: Duration,
    sender: watch::Sender<Option<usize>>,
    cancel: CancellationToken,
) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            result = client.list_bookings() => result,
        };

        match result {
            Ok(bookings) => {
                let count = unseen_count(&bookings);
                sender.send_if_modified(|current| {
                    let changed = *current != Some(count);
                    *current = Some(count);
                    changed
                });
            }
            Err(e) => debug!("Unseen-booking poll failed: {}", e),
        }
    }

    debug!("Unseen-booking poller stopped");
}

/// Owner of a running poller; dropping it stops the task
#[derive(Debug)]
pub struct PollerHandle {
    cancel: CancellationToken,
    receiver: watch::Receiver<Option<usize>>,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Receiver that observes every published count
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<usize>> {
        self.receiver.clone()
    }

    /// Stop polling and wait for the task to finish
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            // A cancelled task only exits through the loop's break
            let _ = task.await;
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
