//! Chart data
//!
//! Pure helpers that turn an annotated series into what a chart renderer
//! consumes: the price axis domain, axis labels and per-line points.

use crate::bar::{AnnotatedBar, PriceBar};
use crate::ma::{annotate, MA20, MA5, MA60};
use serde_derive::*;

/// Moving average line on the chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Ma5,
    Ma20,
    Ma60,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Ma5, Period::Ma20, Period::Ma60];

    pub fn window(self) -> usize {
        match self {
            Period::Ma5 => MA5,
            Period::Ma20 => MA20,
            Period::Ma60 => MA60,
        }
    }

    pub fn value(self, ab: &AnnotatedBar) -> Option<f64> {
        match self {
            Period::Ma5 => ab.ma5,
            Period::Ma20 => ab.ma20,
            Period::Ma60 => ab.ma60,
        }
    }
}

/// Annotated bars together with the price axis domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub bars: Vec<AnnotatedBar>,
    pub domain: Option<(f64, f64)>,
}

impl ChartSeries {
    pub fn new(bars: &[PriceBar]) -> Self {
        ChartSeries {
            bars: annotate(bars),
            domain: price_domain(bars),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Price axis bounds with 2% headroom on both sides.
///
/// The lower bound is floored and the upper bound is ceiled to whole units.
pub fn price_domain(bars: &[PriceBar]) -> Option<(f64, f64)> {
    if bars.is_empty() {
        return None;
    }
    let min = bars.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
    let max = bars.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
    Some(((min * 0.98).floor(), (max * 1.02).ceil()))
}

/// Axis label of a date: `2024-03-05` becomes `03-05`
pub fn axis_label(date: &str) -> &str {
    date.get(5..).unwrap_or(date)
}

/// Points of one moving average line, skipping unavailable entries
pub fn ma_line(bars: &[AnnotatedBar], period: Period) -> Vec<(&str, f64)> {
    bars.iter()
        .filter_map(|ab| period.value(ab).map(|v| (ab.date(), v)))
        .collect()
}

pub fn close_line(bars: &[AnnotatedBar]) -> Vec<(&str, f64)> {
    bars.iter().map(|ab| (ab.date(), ab.close())).collect()
}
