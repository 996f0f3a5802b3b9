pub mod articles;
pub mod auth;
pub mod cities;
pub mod contacts;
pub mod maintenance;
pub mod media;
pub mod provinces;
pub mod schools;
pub mod sitemap;
