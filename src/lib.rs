pub mod analysis;
pub mod api_football;
pub mod commentary;
pub mod config;
pub mod form;
pub mod http_cache;
pub mod http_client;
pub mod live_stats;
pub mod logging;
pub mod poisson;
pub mod provider;
pub mod render;
pub mod replay;
