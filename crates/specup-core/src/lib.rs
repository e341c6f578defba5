//! Core types and definitions for the specup specification generator.
//!
//! This crate holds the vocabulary shared by the directive parser, the
//! rendering pipeline, and the CLI: glossary records, anchor slugging,
//! and versioned snapshot directory names.

pub mod anchor;
pub mod glossary;
pub mod version;
