//! Teamgraph - team relationship analytics.
//!
//! People are connected by a symmetric "works with" relation. This crate
//! loads that graph from a JSONL file as an immutable [`snapshot::Snapshot`]
//! and answers read-only questions over it through [`graph::TeamGraph`]:
//! shortest paths, degrees of separation, friend-of-friend suggestions and
//! connection rankings. It ships both as a library and as the `teamgraph`
//! CLI.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod domain;
pub mod error;
pub mod graph;
pub mod snapshot;

// Repository configuration and application context
pub mod app;
pub mod config;

// Public CLI module (needed by binary)
pub mod cli;

// Command implementations
pub mod commands;

// Output formatting
pub mod output;
