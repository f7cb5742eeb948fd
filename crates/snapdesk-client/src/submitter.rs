use crate::client_ext::panel::ClientPanelExt;
use crate::config::Endpoints;
use crate::render::{Outcome, ResultView};
use crate::schema::Query;
use crate::surface::{Surface, TriggerState};
use reqwest::Client;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use url::Url;

/// Sends the user's question and draws the answer into the output region.
///
/// Clones share one trigger, so at most one submission is in flight across
/// all of them.
pub struct Submitter<S> {
    client: Client,
    url: Url,
    surface: Arc<S>,
    enabled: Arc<AtomicBool>,
}

impl<S> Clone for Submitter<S> {
    fn clone(&self) -> Self {
        Submitter {
            client: self.client.clone(),
            url: self.url.clone(),
            surface: self.surface.clone(),
            enabled: self.enabled.clone(),
        }
    }
}

impl<S: Surface> Submitter<S> {
    pub fn new(client: Client, endpoints: &Endpoints, surface: Arc<S>) -> Self {
        Submitter {
            client,
            url: endpoints.query.clone(),
            surface,
            enabled: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn trigger_state(&self) -> TriggerState {
        if self.enabled.load(Ordering::Acquire) {
            TriggerState::Enabled
        } else {
            TriggerState::Disabled
        }
    }

    /// Submits `text` (trimmed) and returns how it settled.
    ///
    /// Returns `None` without touching the surface when the trigger is
    /// already disabled by another submission.
    pub async fn submit(&self, text: &str) -> Option<Outcome> {
        let Some(_trigger) = TriggerGuard::engage(&self.enabled, self.surface.as_ref()) else {
            log::debug!("submission ignored; a question is already in flight");
            return None;
        };

        self.surface.result(&ResultView::Generating);

        let query = Query::new(text);
        log::debug!("asking {}: {:?}", self.url, query.pergunta);
        let outcome = match self.client.ask(&self.url, &query).await {
            Ok(answer) => Outcome::from(answer),
            Err(e) => {
                log::error!("question to {} failed: {e}", self.url);
                Outcome::Failed
            }
        };

        self.surface.result(&ResultView::Settled(outcome.clone()));
        Some(outcome)
    }
}

/// Holds the trigger disabled; dropping it re-enables the trigger, whether
/// the submission settled or its task was cancelled.
struct TriggerGuard<'a, S: Surface + ?Sized> {
    enabled: &'a AtomicBool,
    surface: &'a S,
}

impl<'a, S: Surface + ?Sized> TriggerGuard<'a, S> {
    fn engage(enabled: &'a AtomicBool, surface: &'a S) -> Option<Self> {
        enabled
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        surface.trigger(TriggerState::Disabled);
        Some(TriggerGuard { enabled, surface })
    }
}

impl<S: Surface + ?Sized> Drop for TriggerGuard<'_, S> {
    fn drop(&mut self) {
        self.enabled.store(true, Ordering::Release);
        self.surface.trigger(TriggerState::Enabled);
    }
}
