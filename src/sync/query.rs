use std::collections::BTreeMap;

use crate::domain::problem::Difficulty;
use crate::domain::stats::RevenuePeriod;

/// The single UI-level "status" filter. Solved/NotSolved and Premium/Free are
/// mutually exclusive server parameters underneath; the composer splits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Solved,
    NotSolved,
    Premium,
    Free,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProblemFilters {
    pub difficulty: Option<Difficulty>,
    pub status: Option<StatusFilter>,
}

/// Canonical, comparable representation of "what page of what filtered and
/// searched data is currently desired". Structural equality drives request
/// deduplication and stale-result detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDescriptor {
    pub page: u32,
    pub page_size: u32,
    pub filters: BTreeMap<String, String>,
    pub search: String,
    pub period: Option<RevenuePeriod>,
}

impl QueryDescriptor {
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.page_size.to_string()),
        ];
        for (name, value) in &self.filters {
            params.push((name.clone(), value.clone()));
        }
        if !self.search.is_empty() {
            params.push(("search".to_string(), self.search.clone()));
        }
        if let Some(period) = self.period {
            params.push(("period".to_string(), period.as_str().to_string()));
        }
        params
    }
}

/// Pure composition of the problem-list query. One UI filter concept may map
/// to two different wire parameters, so the split lives here and nowhere else.
pub fn compose_problem_query(
    page: u32,
    page_size: u32,
    filters: &ProblemFilters,
    search: &str,
) -> QueryDescriptor {
    let mut map = BTreeMap::new();
    if let Some(difficulty) = filters.difficulty {
        map.insert("difficulty".to_string(), difficulty.as_str().to_string());
    }
    match filters.status {
        Some(StatusFilter::Solved) => {
            map.insert("solved".to_string(), "true".to_string());
        }
        Some(StatusFilter::NotSolved) => {
            map.insert("solved".to_string(), "false".to_string());
        }
        Some(StatusFilter::Premium) => {
            map.insert("status".to_string(), "premium".to_string());
        }
        Some(StatusFilter::Free) => {
            map.insert("status".to_string(), "free".to_string());
        }
        None => {}
    }
    QueryDescriptor {
        page: page.max(1),
        page_size,
        filters: map,
        search: search.to_string(),
        period: None,
    }
}

/// Named query slots for a list screen. Changing the result set (filters or
/// search) invalidates the meaning of the current page, so those setters
/// reset `page` to 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    page: u32,
    page_size: u32,
    filters: ProblemFilters,
    search: String,
}

impl QueryState {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            filters: ProblemFilters::default(),
            search: String::new(),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filters(&self) -> &ProblemFilters {
        &self.filters
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Returns true when the effective query changed.
    pub fn set_search(&mut self, search: impl Into<String>) -> bool {
        let search = search.into();
        if search == self.search {
            return false;
        }
        self.search = search;
        self.page = 1;
        true
    }

    pub fn set_filters(&mut self, filters: ProblemFilters) -> bool {
        if filters == self.filters {
            return false;
        }
        self.filters = filters;
        self.page = 1;
        true
    }

    pub fn clear(&mut self) {
        self.filters = ProblemFilters::default();
        self.search.clear();
        self.page = 1;
    }

    /// Out-of-range page recovery: when the server reports fewer pages than
    /// the one requested, fall back to the last valid page. Returns true when
    /// the page moved and the query must be re-issued.
    pub fn clamp_to(&mut self, total_pages: u32) -> bool {
        let last = total_pages.max(1);
        if self.page > last {
            self.page = last;
            return true;
        }
        false
    }

    pub fn descriptor(&self) -> QueryDescriptor {
        compose_problem_query(self.page, self.page_size, &self.filters, &self.search)
    }
}
