//! Best-effort purge of remote image assets.
//!
//! Posts reference images (and payment QR codes) by URL on an external
//! image store. When a post is deleted the referenced assets become
//! orphans; this client asks the store to drop them. Purge failures are
//! logged and swallowed - they must never block the deletion that
//! triggered them.

use reqwest::Client;
use serde_json::json;
use tracing::{info, warn};

use crate::domains::posts::models::{Post, PostDetails};

pub struct MediaPurger {
    client: Client,
    /// Purge endpoint of the image store; `None` disables purging.
    endpoint: Option<String>,
}

impl MediaPurger {
    pub fn new(endpoint: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }

    /// A purger that never talks to the network (tests, local dev).
    pub fn disabled() -> Self {
        Self::new(None)
    }

    /// Purge every asset a deleted post referenced: its image list plus
    /// any payment QR image in the variant payload.
    pub async fn purge_post_assets(&self, post: &Post) {
        let mut assets: Vec<&str> = post.images.iter().map(String::as_str).collect();
        match &post.details.0 {
            PostDetails::Event(details) => {
                if let Some(qr) = details.payment.qr_image.as_deref() {
                    assets.push(qr);
                }
            }
            PostDetails::CulturalEvent(details) => {
                if let Some(qr) = details.payment.qr_image.as_deref() {
                    assets.push(qr);
                }
            }
            PostDetails::Confession | PostDetails::News => {}
        }

        for asset in assets {
            self.purge(asset).await;
        }
    }

    async fn purge(&self, asset: &str) {
        let Some(endpoint) = &self.endpoint else {
            return;
        };

        let result = self
            .client
            .post(endpoint)
            .json(&json!({ "asset": asset }))
            .send()
            .await
            .and_then(|r| r.error_for_status());

        match result {
            Ok(_) => info!(asset, "purged orphaned media asset"),
            Err(e) => warn!(asset, error = %e, "media purge failed, leaving orphan"),
        }
    }
}
