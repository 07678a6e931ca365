//! Supplies the category list to the transaction form's selector.

use std::{
    collections::HashMap,
    fmt::Debug,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{AppState, Error, api::FinanceApi, category::Category};

/// The cache key for the list of categories.
pub const CATEGORIES_KEY: &str = "categories";

/// The htmx event emitted after a category is created.
pub const CATEGORIES_CHANGED_EVENT: &str = "categories-changed";

/// Fetches categories from the finance API and caches the result.
///
/// The cache entry is only dropped by [CategoryListProvider::invalidate] or
/// [CategoryListProvider::refresh], which the category form calls after it
/// creates a category.
pub struct CategoryListProvider {
    finance_api: Arc<dyn FinanceApi>,
    cache: Mutex<CategoryCache>,
}

#[derive(Debug, Default)]
struct CategoryCache {
    entries: HashMap<&'static str, Vec<Category>>,
    /// Bumped on every invalidation. A fetch only stores its result if no
    /// invalidation happened while it waited on the API.
    generation: u64,
}

impl Debug for CategoryListProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryListProvider")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl CategoryListProvider {
    pub fn new(finance_api: Arc<dyn FinanceApi>) -> Self {
        Self {
            finance_api,
            cache: Mutex::new(CategoryCache::default()),
        }
    }

    /// The current categories, fetched from the API when not cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the cache lock is poisoned.
    pub async fn categories(&self) -> Result<Vec<Category>, Error> {
        if let Some(categories) = self.cached()? {
            return Ok(categories);
        }

        self.fetch().await
    }

    /// Drop the cached list so the next read goes to the API.
    pub fn invalidate(&self) -> Result<(), Error> {
        let mut cache = self.lock_cache()?;
        cache.entries.remove(CATEGORIES_KEY);
        cache.generation += 1;
        tracing::debug!("invalidated cache entry \"{CATEGORIES_KEY}\"");

        Ok(())
    }

    /// Invalidate the cached list and fetch it again.
    pub async fn refresh(&self) -> Result<Vec<Category>, Error> {
        self.invalidate()?;
        self.fetch().await
    }

    async fn fetch(&self) -> Result<Vec<Category>, Error> {
        let generation = self.lock_cache()?.generation;

        let categories = self
            .finance_api
            .list_categories()
            .await
            .inspect_err(|error| tracing::error!("could not fetch categories: {error}"))?;

        let mut cache = self.lock_cache()?;
        if cache.generation == generation {
            cache.entries.insert(CATEGORIES_KEY, categories.clone());
        } else {
            tracing::debug!("discarding categories fetched before the cache was invalidated");
        }

        Ok(categories)
    }

    fn cached(&self) -> Result<Option<Vec<Category>>, Error> {
        Ok(self.lock_cache()?.entries.get(CATEGORIES_KEY).cloned())
    }

    fn lock_cache(&self) -> Result<std::sync::MutexGuard<'_, CategoryCache>, Error> {
        self.cache
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire category cache lock: {error}"))
            .map_err(|_| Error::CacheLockError)
    }

    /// The categories for rendering a selector.
    ///
    /// Failures are logged and produce an empty list so that the selector
    /// falls back to its placeholder.
    pub async fn categories_or_empty(&self) -> Vec<Category> {
        self.categories().await.unwrap_or_default()
    }
}

/// The state needed to render the category selector options.
#[derive(Debug, Clone)]
pub struct CategoryOptionsState {
    pub category_list: Arc<CategoryListProvider>,
}

impl FromRef<AppState> for CategoryOptionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            category_list: state.category_list.clone(),
        }
    }
}

/// The currently selected category, sent by the selector when it reloads.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryOptionsQuery {
    #[serde(default)]
    pub category: Option<String>,
}

/// The `<option>` elements for the category selector.
///
/// The placeholder always comes first, `selected` stays selected if it is
/// still a known category name.
pub fn category_options(categories: &[Category], selected: &str) -> Markup {
    html! {
        option value="" selected[selected.is_empty()] { "Select a category" }

        @for category in categories {
            option
                value=(category.name)
                selected[category.name.as_ref() == selected]
            {
                (category.name)
            }
        }
    }
}

/// Renders the options for the category selector from the current list.
pub async fn get_category_options(
    State(state): State<CategoryOptionsState>,
    Query(query): Query<CategoryOptionsQuery>,
) -> Response {
    let categories = state.category_list.categories_or_empty().await;
    let selected = query.category.unwrap_or_default();

    category_options(&categories, &selected).into_response()
}
