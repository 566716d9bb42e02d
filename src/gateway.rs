use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tracing::{debug, error};
use uuid::Uuid;

use crate::categories::Category;
use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::models::{ContentItem, LatestItem, NewContent, UpdateItem};

pub const DEFAULT_LATEST_LIMIT: usize = 8;

const CONTENT_TABLE: &str = "content";
const UPDATES_TABLE: &str = "updates";

const LATEST_PROJECTION: &str = "content_id,title,author_name,category,created_at,media_items";

// Everything except [A-Za-z0-9-_.~] is escaped; '/' is kept so nested
// object keys stay addressable.
const OBJECT_PATH: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

#[async_trait]
pub trait ContentStore: Send + Sync + 'static {
    async fn content_by_category(&self, category: Category) -> Result<Vec<ContentItem>>;

    /// A single item looked up by id. A missing row is `Error::NotFound`.
    async fn content_by_id(&self, id: Uuid) -> Result<ContentItem>;

    async fn featured(&self) -> Result<Vec<ContentItem>>;

    async fn latest(&self, limit: usize) -> Result<Vec<LatestItem>>;

    async fn insert_content(&self, record: NewContent) -> Result<()>;

    async fn updates(&self) -> Result<Vec<UpdateItem>>;
}

#[async_trait]
pub trait BlobStore: Send + Sync + 'static {
    /// Uploads raw bytes under the given key. A write rejected because
    /// the key already exists is `Error::AlreadyExists`.
    async fn upload(
        &self,
        category: Category,
        path: &str,
        bytes: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<()>;

    /// Resolves a storage path to a public, non-expiring URL.
    async fn public_url(&self, category: Category, path: &str) -> Result<String>;

    async fn download(&self, category: Category, path: &str) -> Result<Vec<u8>>;
}

/// Client for the managed backend: a PostgREST-style record store plus
/// a bucketed object store, authenticated with one API key.
#[derive(Clone)]
pub struct GalleryClient {
    http: Client,
    base: String,
    api_key: String,
}

impl GalleryClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: Client::new(),
            base: config.backend_url.as_str().trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base, table)
    }

    fn object_url(&self, category: Category, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base,
            category.bucket(),
            utf8_percent_encode(path, OBJECT_PATH)
        )
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn fetch_rows<T: serde::de::DeserializeOwned>(
        &self,
        url: String,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        debug!(%url, "querying record store");
        let response = self.authed(self.http.get(&url)).query(query).send().await?;
        let response = check_response(response).await?;
        Ok(response.json().await?)
    }
}

async fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    error!(%status, body = %body, "backend request rejected");
    Err(backend_error(status, body))
}

fn backend_error(status: StatusCode, body: String) -> Error {
    if status == StatusCode::NOT_FOUND {
        return Error::NotFound;
    }
    if status == StatusCode::CONFLICT || body.contains("already exists") {
        return Error::AlreadyExists;
    }
    Error::Backend {
        status: status.as_u16(),
        message: body,
    }
}

#[async_trait]
impl ContentStore for GalleryClient {
    async fn content_by_category(&self, category: Category) -> Result<Vec<ContentItem>> {
        self.fetch_rows(
            self.table_url(CONTENT_TABLE),
            &[
                ("select", "*".to_string()),
                ("category", format!("eq.{}", category.display_name())),
                ("order", "created_at.desc".to_string()),
            ],
        )
        .await
    }

    async fn content_by_id(&self, id: Uuid) -> Result<ContentItem> {
        let mut rows: Vec<ContentItem> = self
            .fetch_rows(
                self.table_url(CONTENT_TABLE),
                &[
                    ("select", "*".to_string()),
                    ("content_id", format!("eq.{id}")),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        rows.pop().ok_or(Error::NotFound)
    }

    async fn featured(&self) -> Result<Vec<ContentItem>> {
        self.fetch_rows(
            self.table_url(CONTENT_TABLE),
            &[
                ("select", "*".to_string()),
                ("is_featured", "eq.true".to_string()),
                ("order", "created_at.desc".to_string()),
            ],
        )
        .await
    }

    async fn latest(&self, limit: usize) -> Result<Vec<LatestItem>> {
        self.fetch_rows(
            self.table_url(CONTENT_TABLE),
            &[
                ("select", LATEST_PROJECTION.to_string()),
                ("order", "created_at.desc".to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    async fn insert_content(&self, record: NewContent) -> Result<()> {
        let url = self.table_url(CONTENT_TABLE);
        debug!(%url, title = %record.title, category = %record.category, "inserting content record");
        let response = self
            .authed(self.http.post(&url))
            .header("Prefer", "return=minimal")
            .json(&record)
            .send()
            .await?;
        check_response(response).await?;
        Ok(())
    }

    async fn updates(&self) -> Result<Vec<UpdateItem>> {
        self.fetch_rows(
            self.table_url(UPDATES_TABLE),
            &[("select", "*".to_string())],
        )
        .await
    }
}

#[async_trait]
impl BlobStore for GalleryClient {
    async fn upload(
        &self,
        category: Category,
        path: &str,
        bytes: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<()> {
        let url = self.object_url(category, path);
        debug!(%url, size = bytes.len(), "uploading object");
        let mut request = self.authed(self.http.post(&url)).body(bytes);
        if let Some(content_type) = content_type {
            request = request.header("Content-Type", content_type);
        }
        check_response(request.send().await?).await?;
        Ok(())
    }

    async fn public_url(&self, category: Category, path: &str) -> Result<String> {
        public_object_url(&self.base, category.bucket(), path)
    }

    async fn download(&self, category: Category, path: &str) -> Result<Vec<u8>> {
        let url = public_object_url(&self.base, category.bucket(), path)?;
        debug!(%url, "downloading object");
        let response = check_response(self.authed(self.http.get(&url)).send().await?).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

/// Pure construction of a public object URL; no network round trip is
/// involved. An empty path is unresolvable.
pub fn public_object_url(base: &str, bucket: &str, path: &str) -> Result<String> {
    let path = path.trim().trim_matches('/');
    if path.is_empty() {
        return Err(Error::NotFound);
    }
    Ok(format!(
        "{}/storage/v1/object/public/{}/{}",
        base.trim_end_matches('/'),
        bucket,
        utf8_percent_encode(path, OBJECT_PATH)
    ))
}
