use std::collections::HashMap;
use std::sync::Arc;

use futures_util::future::join_all;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::categories::Category;
use crate::gateway::BlobStore;
use crate::models::{ContentItem, MediaItem, MediaKind};

/// Shown whenever a storage path cannot be resolved, so rendering never
/// hard-fails on a missing asset.
pub const PLACEHOLDER_URL: &str = "https://placehold.co/600x400/png?text=No+Preview";

/// One variant per media kind, each carrying exactly what that kind's
/// renderer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderPlan {
    Image { url: String },
    Document { url: String },
    Video { url: String },
    Audio { url: String, poster_url: String },
}

#[derive(Debug, Clone)]
pub struct ResolvedMedia {
    pub media: MediaItem,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub plan: RenderPlan,
}

/// Maps storage paths to displayable URLs, memoized per path so a list
/// of N cards does not resolve the same asset N times. Unresolvable
/// paths fall back to the placeholder and are never an error.
pub struct MediaResolver {
    store: Arc<dyn BlobStore>,
    placeholder: String,
    cache: Mutex<HashMap<(Category, String), String>>,
}

impl MediaResolver {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self::with_placeholder(store, PLACEHOLDER_URL)
    }

    pub fn with_placeholder(store: Arc<dyn BlobStore>, placeholder: impl Into<String>) -> Self {
        Self {
            store,
            placeholder: placeholder.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Resolves one storage path. Failures are logged and substituted
    /// with the placeholder; only successful resolutions are cached so
    /// a transient failure can recover on the next call.
    pub async fn resolve(&self, category: Category, path: &str) -> String {
        let key = (category, path.to_string());
        {
            let cache = self.cache.lock().await;
            if let Some(url) = cache.get(&key) {
                debug!(%category, path, "resolved storage path from cache");
                return url.clone();
            }
        }

        match self.store.public_url(category, path).await {
            Ok(url) => {
                let mut cache = self.cache.lock().await;
                cache.insert(key, url.clone());
                url
            }
            Err(err) => {
                warn!(%category, path, error = %err, "falling back to placeholder");
                self.placeholder.clone()
            }
        }
    }

    pub async fn preview_url(&self, category: Category, media: &MediaItem) -> String {
        self.resolve(category, media.preview_path()).await
    }

    pub async fn resolve_item(&self, item: &ContentItem) -> Vec<ResolvedMedia> {
        join_all(
            item.media_items
                .iter()
                .map(|media| self.resolve_media(item.category, media)),
        )
        .await
    }

    pub async fn resolve_media(&self, category: Category, media: &MediaItem) -> ResolvedMedia {
        let url = self.resolve(category, &media.storage_path).await;
        let thumbnail_url = match &media.thumbnail_path {
            Some(path) => Some(self.resolve(category, path).await),
            None => None,
        };
        let plan = render_plan(media.kind, &url, thumbnail_url.as_deref(), &self.placeholder);
        ResolvedMedia {
            media: media.clone(),
            url,
            thumbnail_url,
            plan,
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }
}

pub fn render_plan(
    kind: MediaKind,
    url: &str,
    thumbnail_url: Option<&str>,
    placeholder: &str,
) -> RenderPlan {
    match kind {
        MediaKind::Image => RenderPlan::Image {
            url: url.to_string(),
        },
        MediaKind::Pdf => RenderPlan::Document {
            url: url.to_string(),
        },
        MediaKind::Video => RenderPlan::Video {
            url: url.to_string(),
        },
        MediaKind::Audio => RenderPlan::Audio {
            url: url.to_string(),
            poster_url: thumbnail_url.unwrap_or(placeholder).to_string(),
        },
    }
}
