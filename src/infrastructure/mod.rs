// src/infrastructure/mod.rs
pub mod database;
pub mod media;
pub mod repositories;
pub mod search;
pub mod security;
pub mod time;
pub mod util;
