//! Price history
//!
//! Upstream daily bars are validated here, before they reach the annotator.

use crate::{Error, Result};
use chrono::NaiveDate;
use genai::normalize_ticker;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use twstock_metrics::PriceBar;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// 单标的日K线来源
pub trait PriceSource {
    // 给定代码，获取最近不多于lookback条的日K线，按日期升序
    fn daily_bars(&self, ticker: &str, lookback: usize) -> Result<Vec<PriceBar>>;
}

/// read bars from csv with header `date,open,high,low,close,volume`
///
/// rows must have `YYYY-MM-DD` dates in strictly increasing order and
/// finite, non-negative prices
pub fn read_bars<R: Read>(rdr: R) -> Result<Vec<PriceBar>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(rdr);
    let mut bars = Vec::new();
    let mut prev_dt: Option<NaiveDate> = None;
    for (i, r) in reader.deserialize().enumerate() {
        let bar: PriceBar = r?;
        // header is row 1
        let row = i + 2;
        let dt = parse_date(&bar.date)
            .map_err(|e| Error::Source(format!("row {}: {}", row, e)))?;
        if let Some(prev) = prev_dt {
            if dt <= prev {
                return Err(Error::Source(format!(
                    "row {}: date {} is not after {}",
                    row, dt, prev
                )));
            }
        }
        for (name, price) in &[
            ("open", bar.open),
            ("high", bar.high),
            ("low", bar.low),
            ("close", bar.close),
        ] {
            if !price.is_finite() || *price < 0.0 {
                return Err(Error::Source(format!(
                    "row {}: invalid {} price {}",
                    row, name, price
                )));
            }
        }
        prev_dt = Some(dt);
        bars.push(bar);
    }
    Ok(bars)
}

fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    if s.len() != 10 {
        return Err(format!("invalid date {}", s));
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| format!("invalid date {}: {}", s, e))
}

/// keep the most recent `lookback` bars
fn keep_last(mut bars: Vec<PriceBar>, lookback: usize) -> Vec<PriceBar> {
    let skip = bars.len().saturating_sub(lookback);
    bars.drain(..skip);
    bars
}

/// Price history stored as `{dir}/{TICKER}.csv`, e.g. `data/2330.TW.csv`
#[derive(Debug, Clone)]
pub struct CsvPriceSource {
    dir: PathBuf,
}

impl CsvPriceSource {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        CsvPriceSource {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_of(&self, ticker: &str) -> Result<PathBuf> {
        let ticker = normalize_ticker(ticker)?;
        Ok(self.dir.join(format!("{}.csv", ticker)))
    }
}

impl PriceSource for CsvPriceSource {
    fn daily_bars(&self, ticker: &str, lookback: usize) -> Result<Vec<PriceBar>> {
        let path = self.path_of(ticker)?;
        if !path.exists() {
            log::info!("no price history at {}", path.display());
            return Ok(Vec::new());
        }
        let bars = read_bars(File::open(&path)?)?;
        log::debug!("read {} bars from {}", bars.len(), path.display());
        Ok(keep_last(bars, lookback))
    }
}
