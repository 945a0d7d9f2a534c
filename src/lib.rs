//! twstock
//!
//! AI stock analysis for Taiwan-listed equities, with daily price history
//! annotated by 5/20/60-day moving averages for charting.

pub mod desk;
mod error;
pub mod source;

pub use desk::{StockAnalyst, StockDesk, StockReport, DEFAULT_LOOKBACK};
pub use error::Error;
pub use source::{read_bars, CsvPriceSource, PriceSource};
pub type Result<T> = std::result::Result<T, Error>;

pub use genai;
pub use twstock_metrics as metrics;
