use std::time::Duration;

const DEFAULT_API_BASE: &str = "http://localhost:4000/api";
const DEFAULT_PAGE_SIZE: u32 = 10;
const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 500;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub page_size: u32,
    pub search_debounce: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: std::env::var("CODEDASH_API_BASE")
                .unwrap_or(defaults.api_base_url),
            page_size: std::env::var("CODEDASH_PAGE_SIZE")
                .ok()
                .and_then(|value| value.parse().ok())
                .filter(|&size| size > 0)
                .unwrap_or(defaults.page_size),
            search_debounce: std::env::var("CODEDASH_SEARCH_DEBOUNCE_MS")
                .ok()
                .and_then(|value| value.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.search_debounce),
        }
    }
}
