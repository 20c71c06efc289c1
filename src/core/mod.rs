//! Configuration and data model shared by the handler and its clients

pub mod config;
pub mod models;
