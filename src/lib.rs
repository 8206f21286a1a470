pub mod api;
pub mod client;
pub mod data;
pub mod reports;
pub mod security;
pub mod services;
