//! Scholarship Agent — scripted conversation core.

pub mod catalog;
pub mod config;
pub mod error;
pub mod extractor;
pub mod profile;
pub mod prompts;
pub mod session;
pub mod stage;
pub mod timeline;
