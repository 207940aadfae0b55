pub mod debounce;
pub mod fetch;
pub mod mutate;
pub mod query;
pub mod reconcile;
