//! Read-only client for the library API
//!
//! Every call performs exactly one GET. Failures of any kind (transport,
//! non-2xx status, unexpected body) are logged once and collapsed into an
//! empty result, so callers cannot tell "empty" from "failed".

use crate::config::ApiConfig;
use crate::constants::{FOLDER_LIST_PATH, ITEM_LIST_PATH, THUMBNAIL_PATH};
use crate::error::FetchError;
use crate::types::{Folder, Item, ListResponse};
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

pub struct ApiClient {
    client: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// List the folder forest. Empty on any failure.
    pub async fn fetch_folders(&self) -> Vec<Folder> {
        match self.get_list(FOLDER_LIST_PATH, &[]).await {
            Ok(folders) => {
                debug!(count = folders.len(), "Folders fetched");
                folders
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch folders");
                Vec::new()
            }
        }
    }

    /// List the items of one folder. Empty on any failure.
    pub async fn fetch_items(&self, folder_id: &str) -> Vec<Item> {
        if folder_id.is_empty() {
            warn!("Item list requested without a folder id");
            return Vec::new();
        }

        match self.get_list(ITEM_LIST_PATH, &[("folders", folder_id)]).await {
            Ok(items) => {
                debug!(folder_id = %folder_id, count = items.len(), "Items fetched");
                items
            }
            Err(e) => {
                error!(folder_id = %folder_id, error = %e, "Failed to fetch items");
                Vec::new()
            }
        }
    }

    /// Raw thumbnail bytes for one item.
    pub async fn fetch_thumbnail(&self, item_id: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(self.config.endpoint(THUMBNAIL_PATH))
            .query(&[("id", item_id), ("token", self.config.token.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        Ok(response.bytes().await?.to_vec())
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<T>, FetchError> {
        let response = self
            .client
            .get(self.config.endpoint(path))
            .query(&[("token", self.config.token.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await?;
        parse_list(&body)
    }
}

fn parse_list<T: DeserializeOwned>(body: &[u8]) -> Result<Vec<T>, FetchError> {
    let envelope: ListResponse = serde_json::from_slice(body)?;
    match envelope.data {
        serde_json::Value::Array(_) => Ok(serde_json::from_value(envelope.data)?),
        _ => Err(FetchError::MissingData),
    }
}
