//! Configuration loading for the rescisão client.
//!
//! This module loads the client settings (calculation endpoint, cache
//! time-to-live and key prefix, backing store location, notice lifetime)
//! from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use rescisao_client::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/rescisao.yaml").unwrap();
//! println!("Posting to: {}", config.config().endpoint);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CacheConfig, ClientConfig, NoticeConfig, DEFAULT_CACHE_KEY_PREFIX, DEFAULT_CACHE_TTL_SECONDS,
    DEFAULT_ENDPOINT, DEFAULT_NOTICE_SECONDS,
};
