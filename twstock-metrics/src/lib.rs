mod bar;
pub mod chart;
mod ma;

pub use bar::*;
pub use chart::{axis_label, close_line, ma_line, price_domain, ChartSeries, Period};
pub use ma::*;
