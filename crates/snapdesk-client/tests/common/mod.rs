#![allow(dead_code)]

use snapdesk_client::prelude::*;
use std::sync::Mutex;
use std::time::Duration;
use url::Url;

/// Surface that remembers every redraw, in order.
#[derive(Default)]
pub struct Recorder {
    snapshots: Mutex<Vec<SnapshotView>>,
    results: Mutex<Vec<ResultView>>,
    triggers: Mutex<Vec<TriggerState>>,
}

impl Recorder {
    pub fn snapshots(&self) -> Vec<SnapshotView> {
        self.snapshots.lock().unwrap().clone()
    }

    pub fn results(&self) -> Vec<ResultView> {
        self.results.lock().unwrap().clone()
    }

    pub fn triggers(&self) -> Vec<TriggerState> {
        self.triggers.lock().unwrap().clone()
    }

    /// Waits up to two seconds for `done` to hold.
    pub async fn wait_for(&self, done: impl Fn(&Recorder) -> bool) -> bool {
        for _ in 0..200 {
            if done(self) {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        done(self)
    }
}

impl Surface for Recorder {
    fn snapshot(&self, view: &SnapshotView) {
        self.snapshots.lock().unwrap().push(view.clone());
    }

    fn result(&self, view: &ResultView) {
        self.results.lock().unwrap().push(view.clone());
    }

    fn trigger(&self, state: TriggerState) {
        self.triggers.lock().unwrap().push(state);
    }
}

pub fn endpoints(uri: &str) -> Endpoints {
    Endpoints::new(&Url::parse(uri).unwrap()).unwrap()
}

/// Address nothing listens on any more.
pub fn closed_uri() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
