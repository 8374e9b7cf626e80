pub mod config;
pub mod http;
pub mod parsers;
pub mod repositories;
