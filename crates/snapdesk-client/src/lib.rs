pub mod client_ext;
pub mod config;
pub mod error;
pub mod poller;
pub mod render;
pub mod schema;
pub mod submitter;
pub mod surface;

pub use crate::error::{PanelError, Result};

pub mod prelude {
    pub use crate::client_ext::panel::ClientPanelExt as PanelApi;
    #[allow(unused_imports)]
    pub use crate::client_ext::Client;

    pub use crate::config::{Endpoints, PanelConfig};
    pub use crate::poller::{refresh_snapshot, Poller};
    pub use crate::render::{Outcome, ResultView, SnapshotView};
    pub use crate::submitter::Submitter;
    pub use crate::surface::{Surface, TriggerState};

    pub fn build_client(user_agent: &str) -> crate::Result<Client> {
        let client = reqwest::ClientBuilder::new()
            .user_agent(user_agent)
            .build()?;
        Ok(client)
    }
}
