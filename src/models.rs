use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::categories::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    Pdf,
}

impl MediaKind {
    /// Infers the kind from a MIME type. Anything unrecognised is
    /// treated as an image, matching the display fallback.
    pub fn from_mime(mime: Option<&str>) -> Self {
        let Some(mime) = mime else {
            return MediaKind::Image;
        };
        if mime.starts_with("image/") {
            MediaKind::Image
        } else if mime.starts_with("video/") {
            MediaKind::Video
        } else if mime.starts_with("audio/") {
            MediaKind::Audio
        } else if mime == "application/pdf" {
            MediaKind::Pdf
        } else {
            MediaKind::Image
        }
    }

    /// Kinds that cannot render their own preview and therefore need a
    /// thumbnail supplied at submission time.
    pub fn needs_thumbnail(self) -> bool {
        matches!(self, MediaKind::Video | MediaKind::Audio | MediaKind::Pdf)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub storage_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_path: Option<String>,
}

impl MediaItem {
    /// The path a card preview should resolve: the thumbnail when one
    /// exists, otherwise the primary file.
    pub fn preview_path(&self) -> &str {
        self.thumbnail_path.as_deref().unwrap_or(&self.storage_path)
    }
}

/// A published work. Read-only from the app's perspective once inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub content_id: Uuid,
    pub title: String,
    pub author_name: String,
    #[serde(default)]
    pub department: String,
    pub category: Category,
    #[serde(default)]
    pub batch_year: Option<i32>,
    #[serde(default)]
    pub body: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub media_items: Vec<MediaItem>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub view_count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewContent {
    pub title: String,
    pub author_name: String,
    pub author_id: Option<Uuid>,
    pub department: String,
    pub category: Category,
    pub batch_year: i32,
    pub body: String,
    pub media_items: Vec<MediaItem>,
    pub tags: Vec<String>,
    pub is_featured: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestItem {
    pub content_id: Uuid,
    pub title: String,
    pub author_name: String,
    pub category: Category,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub media_items: Vec<MediaItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateItem {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub link: Option<String>,
    pub created_at: DateTime<Utc>,
}
