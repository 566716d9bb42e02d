use std::cmp::Reverse;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, error};
use uuid::Uuid;

use crate::categories::Category;
use crate::error::{Error, Result};
use crate::gateway::ContentStore;
use crate::media::{MediaResolver, ResolvedMedia};
use crate::models::ContentItem;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenState<T> {
    Loading,
    Empty,
    Populated(T),
    Failed(String),
}

impl<T> ScreenState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ScreenState::Loading)
    }
}

impl<T> Default for ScreenState<T> {
    fn default() -> Self {
        ScreenState::Loading
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    Popular,
}

impl SortOrder {
    /// Stable sort, so ties keep their relative order.
    pub fn apply(self, items: &mut [ContentItem]) {
        match self {
            SortOrder::Newest => items.sort_by_key(|item| Reverse(item.created_at)),
            SortOrder::Oldest => items.sort_by_key(|item| item.created_at),
            // Items without a view count sort last.
            SortOrder::Popular => {
                items.sort_by_key(|item| Reverse(item.view_count.unwrap_or(i64::MIN)))
            }
        }
    }
}

/// Monotone generation counter guarding view-state updates. A screen
/// begins a generation per fetch; a resolution carrying a stale token
/// is discarded instead of clobbering newer state.
#[derive(Debug, Default)]
pub struct FetchGuard {
    generation: AtomicU64,
}

impl FetchGuard {
    pub fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, token: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == token
    }
}

#[derive(Debug, Default)]
pub struct CategoryScreen {
    guard: FetchGuard,
    pub sort: SortOrder,
    pub state: ScreenState<Vec<ContentItem>>,
}

impl CategoryScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fetch generation, invalidating any still in flight.
    pub fn begin(&mut self) -> u64 {
        self.state = ScreenState::Loading;
        self.guard.begin()
    }

    /// Applies a fetch result. Returns false when the token is stale
    /// and the result was discarded.
    pub fn apply(&mut self, token: u64, result: Result<Vec<ContentItem>>) -> bool {
        if !self.guard.is_current(token) {
            debug!(token, "discarding stale category fetch");
            return false;
        }
        self.state = match result {
            Ok(items) if items.is_empty() => ScreenState::Empty,
            Ok(mut items) => {
                self.sort.apply(&mut items);
                ScreenState::Populated(items)
            }
            Err(err) => {
                error!(error = %err, "failed to load category content");
                ScreenState::Failed(err.to_string())
            }
        };
        true
    }

    pub fn resort(&mut self, order: SortOrder) {
        self.sort = order;
        if let ScreenState::Populated(items) = &mut self.state {
            order.apply(items);
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContentView {
    pub item: ContentItem,
    pub media: Vec<ResolvedMedia>,
}

#[derive(Debug, Default)]
pub struct DetailScreen {
    guard: FetchGuard,
    pub state: ScreenState<ContentView>,
}

impl DetailScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) -> u64 {
        self.state = ScreenState::Loading;
        self.guard.begin()
    }

    pub fn apply(&mut self, token: u64, result: Result<ContentView>) -> bool {
        if !self.guard.is_current(token) {
            debug!(token, "discarding stale detail fetch");
            return false;
        }
        self.state = match result {
            Ok(view) => ScreenState::Populated(view),
            // A missing record renders the "content not found" state.
            Err(Error::NotFound) => ScreenState::Empty,
            Err(err) => {
                error!(error = %err, "failed to load content detail");
                ScreenState::Failed(err.to_string())
            }
        };
        true
    }
}

pub async fn load_category(
    screen: &mut CategoryScreen,
    store: &dyn ContentStore,
    category: Category,
) {
    let token = screen.begin();
    let result = store.content_by_category(category).await;
    screen.apply(token, result);
}

pub async fn load_detail(
    screen: &mut DetailScreen,
    store: &dyn ContentStore,
    resolver: &MediaResolver,
    id: Uuid,
) {
    let token = screen.begin();
    let result = match store.content_by_id(id).await {
        Ok(item) => {
            let media = resolver.resolve_item(&item).await;
            Ok(ContentView { item, media })
        }
        Err(err) => Err(err),
    };
    screen.apply(token, result);
}
