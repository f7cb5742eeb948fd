use crate::client_ext::panel::ClientPanelExt;
use crate::config::Endpoints;
use crate::render::SnapshotView;
use crate::surface::Surface;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use url::Url;

/// One poll tick: fetch the snapshot and redraw the snapshot region.
///
/// Never fails; a transport or body error is logged and shown as
/// [`SnapshotView::Failed`].
pub async fn refresh_snapshot<S>(client: &Client, url: &Url, surface: &S) -> SnapshotView
where
    S: Surface + ?Sized,
{
    let view = match client.fetch_snapshot(url).await {
        Ok(reading) => SnapshotView::from(&reading),
        Err(e) => {
            log::error!("failed to load snapshot from {url}: {e}");
            SnapshotView::Failed
        }
    };
    surface.snapshot(&view);
    view
}

/// Refreshes the snapshot region on a fixed period, starting immediately.
pub struct Poller<S> {
    client: Client,
    url: Url,
    every: Duration,
    surface: Arc<S>,
}

impl<S: Surface + 'static> Poller<S> {
    pub fn new(client: Client, endpoints: &Endpoints, every: Duration, surface: Arc<S>) -> Self {
        Poller {
            client,
            url: endpoints.snapshot.clone(),
            // tokio intervals reject a zero period
            every: every.max(Duration::from_millis(1)),
            surface,
        }
    }

    /// Runs until the surrounding task is dropped.
    ///
    /// Each tick is spawned on its own, so a fetch slower than the period
    /// overlaps with the next one rather than delaying it. Failed ticks do
    /// not change the schedule.
    pub async fn run(self) {
        let mut ticker = interval(self.every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        log::info!("polling {} every {:?}", self.url, self.every);

        loop {
            ticker.tick().await;
            let client = self.client.clone();
            let url = self.url.clone();
            let surface = self.surface.clone();
            tokio::spawn(async move {
                refresh_snapshot(&client, &url, surface.as_ref()).await;
            });
        }
    }
}
