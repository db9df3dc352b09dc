use serde::Deserialize;
use tracing::info;

use crate::model::RawMenuItem;
use crate::sync::{MenuSource, SourceError};

/// Wire shape of the hosted catalog: the item list sits under the `menu` key.
#[derive(Debug, Deserialize)]
struct MenuPayload {
    menu: Vec<RawMenuItem>,
}

/// Production menu source: one GET against the hosted catalog JSON.
#[derive(Debug, Clone)]
pub struct HttpMenuSource {
    client: reqwest::Client,
    url: String,
}

impl HttpMenuSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl MenuSource for HttpMenuSource {
    async fn fetch_menu(&self) -> Result<Vec<RawMenuItem>, SourceError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;
        let payload: MenuPayload = serde_json::from_str(&body)?;
        info!(
            target: "limone",
            event = "menu_fetched",
            url = %self.url,
            items = payload.menu.len()
        );
        Ok(payload.menu)
    }
}
