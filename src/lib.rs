pub mod config;
pub mod lcapi;
pub mod lcbot;
pub mod lcdb;
pub mod models;
