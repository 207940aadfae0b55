pub mod api;
pub mod config;
pub mod domain;
pub mod screens;
pub mod services;
pub mod sync;
