pub mod panel;

pub use reqwest::Client;
