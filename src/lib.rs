pub mod api;
pub mod availability;
pub mod command;
pub mod config;
pub mod core;
pub mod errors;
pub mod extensions;
pub mod logging;
pub mod session;
pub mod ui;
