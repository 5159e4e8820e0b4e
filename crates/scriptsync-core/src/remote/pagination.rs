//! Paged listing aggregation
//!
//! Listing calls (versions, deployments, scripts) share one loop that
//! follows page tokens up to a page ceiling. Hitting the ceiling is not an
//! error; the result is flagged `partial` and the caller decides whether to
//! warn.

use std::future::Future;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::TransportError;

pub const DEFAULT_PAGE_SIZE: u32 = 50;
pub const DEFAULT_MAX_PAGES: usize = 5;

/// Parameters of one page fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page_size: u32,
    pub page_token: Option<String>,
}

impl PageRequest {
    /// The first page with the given size.
    pub fn first(page_size: u32) -> Self {
        Self {
            page_size,
            page_token: None,
        }
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub results: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl<T> Page<T> {
    pub fn last(results: Vec<T>) -> Self {
        Self {
            results,
            next_page_token: None,
        }
    }
}

/// Page size and ceiling for an aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageOptions {
    pub page_size: u32,
    pub max_pages: usize,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

/// Results merged across pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregated<T> {
    pub results: Vec<T>,
    /// Number of pages fetched
    pub pages: usize,
    /// The ceiling was reached while more pages remained
    pub partial: bool,
}

/// Fetch pages until the token runs out or `max_pages` is reached.
///
/// An empty token counts as absent. A `max_pages` of zero is treated as one.
pub async fn aggregate<T, E, F, Fut>(options: PageOptions, mut fetch_page: F) -> Result<Aggregated<T>, E>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
{
    let max_pages = options.max_pages.max(1);
    let mut results = Vec::new();
    let mut token: Option<String> = None;
    let mut pages = 0;

    loop {
        let page = fetch_page(PageRequest {
            page_size: options.page_size,
            page_token: token.take(),
        })
        .await?;
        pages += 1;
        debug!(page = pages, items = page.results.len(), "fetched page");
        results.extend(page.results);

        token = page.next_page_token.filter(|t| !t.is_empty());
        if token.is_none() {
            return Ok(Aggregated {
                results,
                pages,
                partial: false,
            });
        }
        if pages >= max_pages {
            warn!(pages, "page limit reached, results may be incomplete");
            return Ok(Aggregated {
                results,
                pages,
                partial: true,
            });
        }
    }
}

/// Serve one page out of an in-memory list using decimal offset tokens.
pub fn slice_page<T: Clone>(items: &[T], request: &PageRequest) -> Result<Page<T>, TransportError> {
    let start = match request.page_token.as_deref() {
        None | Some("") => 0,
        Some(token) => token
            .parse::<usize>()
            .map_err(|_| TransportError::new(format!("invalid page token '{}'", token)))?,
    };
    let size = (request.page_size.max(1)) as usize;
    let end = start.saturating_add(size).min(items.len());
    let results = items.get(start..end).map(<[T]>::to_vec).unwrap_or_default();
    let next_page_token = (end < items.len()).then(|| end.to_string());
    Ok(Page {
        results,
        next_page_token,
    })
}
