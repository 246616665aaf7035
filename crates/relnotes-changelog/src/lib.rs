//! Relnotes Changelog - Milestone-driven changelog generation
//!
//! This crate groups issue tracker items into labeled sections, renders them
//! through a template and drives a [`ReleaseProvider`] to publish the result.

pub mod changelog;
pub mod provider;
pub mod template;
pub mod types;

#[cfg(test)]
mod mock;

pub use changelog::{parse_version, Changelog};
pub use provider::ReleaseProvider;
pub use template::{Template, TemplateContext};
pub use types::{assign_to_sections, Item, Section};
