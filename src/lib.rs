pub mod catalog;
pub mod climate;
pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod models;
pub mod soil;
