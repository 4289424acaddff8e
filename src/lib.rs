pub mod abi;
pub mod config;
pub mod connector;
pub mod error;
pub mod page;

pub use config::AppConfig;
pub use error::{DappError, DappResult};
