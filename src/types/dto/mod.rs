pub mod access;
pub mod alerts;
pub mod auth;
pub mod common;
pub mod devices;
