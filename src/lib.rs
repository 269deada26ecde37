pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod export;
pub mod flash;
pub mod personnel;
pub mod state;
pub mod views;
