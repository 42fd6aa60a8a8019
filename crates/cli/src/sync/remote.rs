// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote submission of storage-shaped records.
//!
//! [`RemoteSubmit`] is the seam between the sync layer and the network.
//! [`HttpRemote`] posts JSON to the collection endpoint of each entity kind.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use canopy_core::{EntityKind, StorageRecord};
use serde::Serialize;

use crate::config::RemoteConfig;
use crate::error::{Error, Result};

/// Why a single submission failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubmitError {
    /// The remote answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The request never got an answer.
    #[error("transport error: {message}")]
    Transport { message: String },
}

/// Boxed future returned by [`RemoteSubmit::submit`].
pub type SubmitFuture<'a> =
    Pin<Box<dyn Future<Output = std::result::Result<(), SubmitError>> + Send + 'a>>;

/// Delivers one record to the remote store.
pub trait RemoteSubmit: Send + Sync {
    fn submit<'a>(&'a self, entity: EntityKind, record: &'a StorageRecord) -> SubmitFuture<'a>;
}

/// HTTP implementation: `POST {base_url}/{collection}` with a JSON body.
pub struct HttpRemote {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRemote {
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("cannot build HTTP client: {e}")))?;
        Ok(HttpRemote {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    /// Collection endpoint for `entity`.
    pub fn endpoint(&self, entity: EntityKind) -> String {
        format!("{}/{}", self.base_url, entity.collection())
    }

    /// Checks whether the remote answers at all.
    ///
    /// Any HTTP response counts as reachable; only transport failures
    /// mean offline.
    pub async fn probe(&self) -> bool {
        match self.client.get(&self.base_url).send().await {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(error = %e, url = %self.base_url, "remote unreachable");
                false
            }
        }
    }
}

impl RemoteSubmit for HttpRemote {
    fn submit<'a>(&'a self, entity: EntityKind, record: &'a StorageRecord) -> SubmitFuture<'a> {
        Box::pin(async move {
            let response = self
                .client
                .post(self.endpoint(entity))
                .json(record)
                .send()
                .await
                .map_err(|e| SubmitError::Transport {
                    message: e.to_string(),
                })?;

            let status = response.status();
            if status.is_success() {
                return Ok(());
            }
            let body = response.text().await.unwrap_or_default();
            Err(SubmitError::Rejected {
                status: status.as_u16(),
                body,
            })
        })
    }
}
