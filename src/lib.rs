pub mod app;
pub mod common;
pub mod config;
pub mod domain;
pub mod infra;
pub mod observability;
pub mod pipeline;

pub use common::error::{Result, ScraperError};
pub use domain::{Company, RawSnapshot};
