//! Commands that set up or reset a teamgraph repository.

pub mod init;
pub mod seed;
