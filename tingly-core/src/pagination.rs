//! Client-side pagination and filtering for per-provider lists.
//!
//! Each logical list (keyed by provider name) carries its own search term and
//! 1-based current page; separate keys never share state. Paginating is a
//! pure derivation over the source list: nothing is mutated and out-of-range
//! pages simply come back empty.

use std::collections::HashMap;

/// Text an item exposes for search filtering.
///
/// Items returning `None` have no searchable representation; they are
/// excluded from results while a non-empty search term is active, and pass
/// through untouched otherwise.
pub trait SearchText {
    fn search_text(&self) -> Option<&str>;
}

impl SearchText for String {
    fn search_text(&self) -> Option<&str> {
        Some(self)
    }
}

impl SearchText for &str {
    fn search_text(&self) -> Option<&str> {
        Some(self)
    }
}

impl<T: SearchText> SearchText for Option<T> {
    fn search_text(&self) -> Option<&str> {
        self.as_ref().and_then(SearchText::search_text)
    }
}

/// One page of a filtered list.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    /// Items on the current page, in source order.
    pub items: Vec<&'a T>,
    /// Number of pages the filtered list spans.
    pub total_pages: usize,
    /// 1-based page this slice represents.
    pub current_page: usize,
    /// Filtered item count (not the source count).
    pub total_items: usize,
}

/// Per-key search and page state.
#[derive(Debug)]
pub struct Paginator {
    page_size: usize,
    search_terms: HashMap<String, String>,
    pages: HashMap<String, usize>,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            search_terms: HashMap::new(),
            pages: HashMap::new(),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Change the page size (e.g. after a grid-layout recomputation).
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
    }

    /// Store the search term for `key` and reset that key's page to 1.
    pub fn set_search(&mut self, key: &str, term: impl Into<String>) {
        self.search_terms.insert(key.to_string(), term.into());
        self.pages.insert(key.to_string(), 1);
    }

    /// The search term stored for `key` (empty if none).
    pub fn search_term(&self, key: &str) -> &str {
        self.search_terms.get(key).map(String::as_str).unwrap_or("")
    }

    /// Store the current page for `key`.
    ///
    /// No clamping happens here; a page past the end just yields an empty
    /// slice from [`paginate`](Self::paginate).
    pub fn set_page(&mut self, key: &str, page: usize) {
        self.pages.insert(key.to_string(), page.max(1));
    }

    /// The 1-based current page for `key` (1 if never set).
    pub fn page(&self, key: &str) -> usize {
        self.pages.get(key).copied().unwrap_or(1)
    }

    /// Filter `items` by `key`'s search term and slice out the current page.
    pub fn paginate<'a, T: SearchText>(&self, items: &'a [T], key: &str) -> Page<'a, T> {
        let term = self.search_term(key).to_lowercase();

        let filtered: Vec<&T> = if term.is_empty() {
            items.iter().collect()
        } else {
            items
                .iter()
                .filter(|item| {
                    item.search_text()
                        .is_some_and(|text| text.to_lowercase().contains(&term))
                })
                .collect()
        };

        let total_items = filtered.len();
        let total_pages = total_items.div_ceil(self.page_size);
        let current_page = self.page(key);

        let start = (current_page - 1).saturating_mul(self.page_size);
        let items = filtered
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .collect();

        Page {
            items,
            total_pages,
            current_page,
            total_items,
        }
    }
}
