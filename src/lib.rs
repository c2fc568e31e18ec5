#[macro_use]
extern crate diesel;

pub mod config;
pub mod db;
pub mod http_client;
pub mod models;
pub mod schema;
pub mod seed;
pub mod sync;

pub use config::Config;
