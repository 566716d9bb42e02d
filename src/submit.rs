use std::sync::Arc;

use bytes::Bytes;
use chrono::{Datelike, Utc};
use thiserror::Error;
use tracing::{info, warn};

use crate::categories::Category;
use crate::error::Error;
use crate::gateway::{BlobStore, ContentStore};
use crate::models::{MediaItem, MediaKind, NewContent};

pub const FIRST_BATCH_YEAR: i32 = 2020;

const THUMBNAIL_PREFIX: &str = "thumbnail";

#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadFile {
    pub fn new(
        name: impl Into<String>,
        content_type: Option<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type,
            bytes: bytes.into(),
        }
    }

    pub fn guessed(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let name = name.into();
        let content_type = mime_guess::from_path(&name)
            .first()
            .map(|mime| mime.essence_str().to_string());
        Self {
            name,
            content_type,
            bytes: bytes.into(),
        }
    }

    pub fn kind(&self) -> MediaKind {
        MediaKind::from_mime(self.content_type.as_deref())
    }
}

/// The controlled state of the submission form. On success every field
/// is cleared; on failure entered data stays intact for correction.
#[derive(Debug, Clone, Default)]
pub struct SubmissionForm {
    pub title: String,
    pub author_name: String,
    pub department: String,
    pub category: Option<Category>,
    pub batch_year: Option<i32>,
    pub body: String,
    pub tags: String,
    pub file: Option<UploadFile>,
    pub thumbnail: Option<UploadFile>,
}

impl SubmissionForm {
    pub fn clear(&mut self) {
        *self = SubmissionForm::default();
    }

    pub fn requires_thumbnail(&self) -> bool {
        self.file
            .as_ref()
            .map(|file| file.kind().needs_thumbnail())
            .unwrap_or(false)
    }
}

/// Sequential phases of one submission, reported through the observer
/// hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Validating,
    UploadingFile,
    UploadingThumbnail,
    InsertingRecord,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("{0}")]
    Validation(String),

    #[error("file upload failed: {0}")]
    Upload(#[source] Error),

    #[error("thumbnail upload failed: {0}")]
    Thumbnail(#[source] Error),

    #[error("submission failed: {0}")]
    Insert(#[source] Error),
}

#[derive(Debug, Clone)]
pub struct SubmissionReceipt {
    pub storage_path: String,
    pub thumbnail_path: Option<String>,
    pub media: MediaItem,
}

/// Drives the validate → upload → insert sequence. Uploads are
/// sequential and the whole sequence aborts on first failure; an
/// already-uploaded file is left orphaned when a later step fails.
pub struct Submitter {
    content: Arc<dyn ContentStore>,
    blobs: Arc<dyn BlobStore>,
}

impl Submitter {
    pub fn new(content: Arc<dyn ContentStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { content, blobs }
    }

    pub async fn submit(
        &self,
        form: &mut SubmissionForm,
    ) -> Result<SubmissionReceipt, SubmitError> {
        self.submit_with(form, |_| {}).await
    }

    pub async fn submit_with(
        &self,
        form: &mut SubmissionForm,
        mut observe: impl FnMut(Phase),
    ) -> Result<SubmissionReceipt, SubmitError> {
        observe(Phase::Validating);
        validate(form)?;

        // Safe after validation.
        let category = form.category.ok_or_else(missing_fields)?;
        let batch_year = form.batch_year.ok_or_else(missing_fields)?;
        let file = form.file.as_ref().ok_or_else(missing_fields)?;
        let kind = file.kind();

        observe(Phase::UploadingFile);
        let now_millis = Utc::now().timestamp_millis();
        let storage_path = object_key(&file.name, now_millis);
        self.upload_tolerating_duplicate(category, &storage_path, file)
            .await
            .map_err(SubmitError::Upload)?;

        let thumbnail_path = match form.thumbnail.as_ref() {
            Some(thumbnail) => {
                observe(Phase::UploadingThumbnail);
                let path = format!(
                    "{}/{}",
                    THUMBNAIL_PREFIX,
                    object_key(&thumbnail.name, now_millis)
                );
                self.upload_tolerating_duplicate(category, &path, thumbnail)
                    .await
                    .map_err(SubmitError::Thumbnail)?;
                Some(path)
            }
            None => None,
        };

        let media = MediaItem {
            kind,
            storage_path: storage_path.clone(),
            title: Some(file.name.clone()),
            thumbnail_path: thumbnail_path.clone(),
        };

        observe(Phase::InsertingRecord);
        let record = NewContent {
            title: form.title.trim().to_string(),
            author_name: form.author_name.trim().to_string(),
            author_id: None,
            department: form.department.trim().to_string(),
            category,
            batch_year,
            body: form.body.trim().to_string(),
            media_items: vec![media.clone()],
            tags: parse_tags(&form.tags),
            is_featured: false,
        };
        self.content
            .insert_content(record)
            .await
            .map_err(SubmitError::Insert)?;

        info!(%category, path = %storage_path, "submission stored");
        form.clear();

        Ok(SubmissionReceipt {
            storage_path,
            thumbnail_path,
            media,
        })
    }

    async fn upload_tolerating_duplicate(
        &self,
        category: Category,
        path: &str,
        file: &UploadFile,
    ) -> Result<(), Error> {
        match self
            .blobs
            .upload(
                category,
                path,
                file.bytes.to_vec(),
                file.content_type.clone(),
            )
            .await
        {
            Ok(()) => Ok(()),
            Err(err) if err.is_already_exists() => {
                // Idempotent re-submission of the same key is tolerated.
                warn!(%category, path, "object already present, continuing");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}

fn missing_fields() -> SubmitError {
    SubmitError::Validation(
        "Please fill all required fields, including category and batch year.".to_string(),
    )
}

fn validate(form: &SubmissionForm) -> Result<(), SubmitError> {
    let text_fields = [
        &form.title,
        &form.author_name,
        &form.department,
        &form.body,
        &form.tags,
    ];
    if text_fields.iter().any(|field| field.trim().is_empty())
        || form.category.is_none()
        || form.batch_year.is_none()
        || form.file.is_none()
    {
        return Err(missing_fields());
    }

    let batch_year = form.batch_year.unwrap_or_default();
    let current_year = Utc::now().year();
    if !(FIRST_BATCH_YEAR..=current_year).contains(&batch_year) {
        return Err(SubmitError::Validation(format!(
            "Batch year must be between {FIRST_BATCH_YEAR} and {current_year}."
        )));
    }

    if form.requires_thumbnail() && form.thumbnail.is_none() {
        return Err(SubmitError::Validation(
            "Please upload a thumbnail for this file type.".to_string(),
        ));
    }

    Ok(())
}

/// Storage object key for an uploaded file: the sanitized name with the
/// upload timestamp appended, so re-picking the same file yields a
/// fresh key.
pub fn object_key(name: &str, now_millis: i64) -> String {
    format!("{}-{}", sanitize_file_name(name, now_millis), now_millis)
}

/// Names already restricted to `[A-Za-z0-9._-]` pass through untouched;
/// anything else is replaced with a timestamp-based name keeping only
/// the original extension (and only when the extension itself is safe).
pub fn sanitize_file_name(name: &str, now_millis: i64) -> String {
    if is_safe_name(name) {
        return name.to_string();
    }
    match safe_extension(name) {
        Some(ext) => format!("upload-{now_millis}.{ext}"),
        None => format!("upload-{now_millis}"),
    }
}

fn is_safe_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_safe_char)
}

fn is_safe_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-')
}

fn safe_extension(name: &str) -> Option<&str> {
    let (_, ext) = name.rsplit_once('.')?;
    if !ext.is_empty() && ext.chars().all(is_safe_char) && !ext.contains('.') {
        Some(ext)
    } else {
        None
    }
}

pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
