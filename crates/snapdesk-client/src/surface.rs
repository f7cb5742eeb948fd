use crate::render::{ResultView, SnapshotView};

/// State of the submit control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    Enabled,
    Disabled,
}

/// Where the panel draws.
///
/// Each call replaces the whole content of its region. Implementations are
/// shared between the poll tasks and the submitter, hence `Send + Sync`.
pub trait Surface: Send + Sync {
    fn snapshot(&self, view: &SnapshotView);

    fn result(&self, view: &ResultView);

    fn trigger(&self, state: TriggerState);
}
