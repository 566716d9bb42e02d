pub mod categories;
pub mod config;
pub mod error;
pub mod gateway;
pub mod media;
pub mod models;
pub mod submit;
pub mod view;

pub use categories::{Category, CategoryInfo, CATALOG};
pub use config::AppConfig;
pub use error::{Error, Result};
pub use gateway::{BlobStore, ContentStore, GalleryClient, DEFAULT_LATEST_LIMIT};
pub use media::{MediaResolver, RenderPlan, ResolvedMedia, PLACEHOLDER_URL};
pub use models::{ContentItem, LatestItem, MediaItem, MediaKind, NewContent, UpdateItem};
pub use submit::{Phase, SubmissionForm, SubmissionReceipt, SubmitError, Submitter, UploadFile};
pub use view::{CategoryScreen, DetailScreen, FetchGuard, ScreenState, SortOrder};
