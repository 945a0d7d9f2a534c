pub mod cli;
pub mod error;
pub mod model;
pub mod ticker;

pub use cli::{GenaiClient, GenaiConfig};
pub use error::Error;
pub use model::*;
pub use ticker::normalize_ticker;

pub type Result<T> = std::result::Result<T, Error>;
