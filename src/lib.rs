pub mod config;
pub mod context;
pub mod error;
pub mod event;
pub mod grid;
pub mod month_key;
pub mod store;
