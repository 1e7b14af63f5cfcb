pub mod api;
pub mod config;
pub mod control;
pub mod error;
pub mod input;
pub mod logging;
pub mod pipeline;
pub mod rewrite;
