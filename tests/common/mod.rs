use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use galleria::error::{Error, Result};
use galleria::gateway::{public_object_url, BlobStore, ContentStore};
use galleria::models::{ContentItem, LatestItem, MediaItem, NewContent, UpdateItem};
use galleria::Category;

#[allow(dead_code)]
pub const FAKE_BASE_URL: &str = "https://fake.backend";

#[allow(dead_code)]
#[derive(Clone)]
pub struct StoredObject {
    pub path: String,
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// In-memory stand-in for the managed backend: a record table plus
/// bucketed objects, with switches to force each failure mode.
#[derive(Default)]
pub struct FakeBackend {
    pub rows: Mutex<Vec<ContentItem>>,
    pub inserted: Mutex<Vec<NewContent>>,
    pub update_rows: Mutex<Vec<UpdateItem>>,
    pub objects: Mutex<HashMap<(Category, String), StoredObject>>,
    pub upload_calls: AtomicUsize,
    pub insert_calls: AtomicUsize,
    pub resolve_calls: AtomicUsize,
    pub fail_uploads: AtomicBool,
    pub duplicate_uploads: AtomicBool,
    pub fail_inserts: AtomicBool,
    pub fail_fetches: AtomicBool,
    pub fail_resolution: AtomicBool,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub async fn seed(&self, items: Vec<ContentItem>) {
        let mut rows = self.rows.lock().await;
        rows.extend(items);
    }

    #[allow(dead_code)]
    pub async fn object_count(&self) -> usize {
        self.objects.lock().await.len()
    }

    fn check_fetch(&self) -> Result<()> {
        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(Error::Backend {
                status: 500,
                message: "record store unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ContentStore for FakeBackend {
    async fn content_by_category(&self, category: Category) -> Result<Vec<ContentItem>> {
        self.check_fetch()?;
        let rows = self.rows.lock().await;
        let mut matched: Vec<ContentItem> = rows
            .iter()
            .filter(|row| row.category == category)
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matched)
    }

    async fn content_by_id(&self, id: Uuid) -> Result<ContentItem> {
        self.check_fetch()?;
        let rows = self.rows.lock().await;
        rows.iter()
            .find(|row| row.content_id == id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    async fn featured(&self) -> Result<Vec<ContentItem>> {
        self.check_fetch()?;
        let rows = self.rows.lock().await;
        let mut matched: Vec<ContentItem> =
            rows.iter().filter(|row| row.is_featured).cloned().collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matched)
    }

    async fn latest(&self, limit: usize) -> Result<Vec<LatestItem>> {
        self.check_fetch()?;
        let rows = self.rows.lock().await;
        let mut sorted: Vec<&ContentItem> = rows.iter().collect();
        sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sorted
            .into_iter()
            .take(limit)
            .map(|row| LatestItem {
                content_id: row.content_id,
                title: row.title.clone(),
                author_name: row.author_name.clone(),
                category: row.category,
                created_at: row.created_at,
                media_items: row.media_items.clone(),
            })
            .collect())
    }

    async fn insert_content(&self, record: NewContent) -> Result<()> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(Error::Backend {
                status: 500,
                message: "insert rejected".to_string(),
            });
        }
        let mut inserted = self.inserted.lock().await;
        inserted.push(record);
        Ok(())
    }

    async fn updates(&self) -> Result<Vec<UpdateItem>> {
        self.check_fetch()?;
        Ok(self.update_rows.lock().await.clone())
    }
}

#[async_trait]
impl BlobStore for FakeBackend {
    async fn upload(
        &self,
        category: Category,
        path: &str,
        bytes: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<()> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(Error::Backend {
                status: 500,
                message: "storage write rejected".to_string(),
            });
        }
        if self.duplicate_uploads.load(Ordering::SeqCst) {
            return Err(Error::AlreadyExists);
        }
        let mut objects = self.objects.lock().await;
        objects.insert(
            (category, path.to_string()),
            StoredObject {
                path: path.to_string(),
                bytes,
                content_type,
            },
        );
        Ok(())
    }

    async fn public_url(&self, category: Category, path: &str) -> Result<String> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_resolution.load(Ordering::SeqCst) {
            return Err(Error::Backend {
                status: 500,
                message: "resolution unavailable".to_string(),
            });
        }
        public_object_url(FAKE_BASE_URL, category.bucket(), path)
    }

    async fn download(&self, category: Category, path: &str) -> Result<Vec<u8>> {
        let objects = self.objects.lock().await;
        objects
            .get(&(category, path.to_string()))
            .map(|object| object.bytes.clone())
            .ok_or(Error::NotFound)
    }
}

/// A content row aged by the given number of days.
#[allow(dead_code)]
pub fn content_row(
    title: &str,
    category: Category,
    age_days: i64,
    media_items: Vec<MediaItem>,
) -> ContentItem {
    ContentItem {
        content_id: Uuid::new_v4(),
        title: title.to_string(),
        author_name: "A. Nair".to_string(),
        department: "Malayalam".to_string(),
        category,
        batch_year: Some(2023),
        body: "desc".to_string(),
        created_at: Utc::now() - Duration::days(age_days),
        media_items,
        is_featured: false,
        tags: vec!["nature".to_string()],
        view_count: None,
    }
}
