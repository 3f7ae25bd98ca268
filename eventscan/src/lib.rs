//! Core library for the eventscan static analysis tool.
//!
//! This library finds C# events declared `virtual` and offers two rewrites:
//! dropping the modifier, or dropping it and routing the raise through a
//! `protected virtual` method.

#![allow(
    clippy::similar_names,
    clippy::map_unwrap_or,
    clippy::items_after_statements
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

/// Module containing the analysis host.
/// This includes the `EventScan` struct, file processing and fix-all mode.
pub mod analyzer;

/// Module defining the command-line interface arguments and structs.
pub mod cli;

/// Module for loading configuration.
pub mod config;

/// Module containing shared constants and regex patterns.
pub mod constants;

/// Module defining the entry point logic shared by all binaries.
pub mod entry_point;

/// Module recognizing the two shapes of event declarations.
pub mod event;

/// Module computing and applying code actions.
pub mod fix;

/// Module containing the linter logic and visitor.
pub mod linter;

/// Module holding the localizable message table.
pub mod messages;

/// Module for rich CLI output formatting with colored text and progress bars.
pub mod output;

/// Module containing the implementation of the analysis rules.
pub mod rules;

/// Module containing the lossless C# lexer, parser and syntax tree.
pub mod syntax;

/// Module containing utility functions.
/// This includes line mapping, suppression comments and file discovery.
pub mod utils;
