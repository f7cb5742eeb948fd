use crate::error::Result;
use crate::schema::{Answer, Query, SnapshotReading};
use reqwest::Client;
use std::future::Future;
use url::Url;

/// The two backend calls the panel makes.
///
/// Status codes are not checked; the backend reports its own failures inside
/// the JSON body (`erro`), so every body is parsed.
pub trait ClientPanelExt {
    fn fetch_snapshot(&self, url: &Url) -> impl Future<Output = Result<SnapshotReading>> + Send;

    fn ask(&self, url: &Url, query: &Query) -> impl Future<Output = Result<Answer>> + Send;
}

/// Add-on methods for [`reqwest::Client`].
///
/// [`reqwest::Client`]: https://docs.rs/reqwest/latest/reqwest/struct.Client.html
impl ClientPanelExt for Client {
    /// GET the snapshot; a body whose `last` is null reads as pending.
    async fn fetch_snapshot(&self, url: &Url) -> Result<SnapshotReading> {
        let response = self.get(url.clone()).send().await?;
        log::trace!("GET {url} -> {}", response.status());

        let body = response.bytes().await?;
        Ok(SnapshotReading::from_slice(&body)?)
    }

    /// POST `{ "pergunta": ... }` as JSON and read the answer.
    async fn ask(&self, url: &Url, query: &Query) -> Result<Answer> {
        let response = self.post(url.clone()).json(query).send().await?;
        log::trace!("POST {url} -> {}", response.status());

        let body = response.bytes().await?;
        Ok(Answer::from_slice(&body)?)
    }
}
