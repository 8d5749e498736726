pub mod analyzers;
pub mod classify;
pub mod config;
pub mod error;
pub mod grid;
pub mod join;
pub mod loader;
pub mod output;
pub mod pipeline;
