pub mod config;
pub use config::{ClientConfig, DEFAULT_ASK_URL};
