//! HTTP transport for the Billboard Hot 100 chart pages.

mod client;
mod errors;
mod user_agent;
pub use self::client::{Client, ClientConfig, DEFAULT_TIMEOUT_SECS};
pub use self::errors::Error;
pub use self::user_agent::get_user_agent;
