pub mod cache;
pub mod config;
pub mod convention;
pub mod domain;
pub mod engine;
pub mod error;
pub mod git;
pub mod preset;
pub mod ui;

pub use error::{HeightTemplateError, NextverError, Result};
