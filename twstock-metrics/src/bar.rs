use serde_derive::*;

/// 日K线
///
/// 单个交易日的开高低收及成交量，日期格式为YYYY-MM-DD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl PriceBar {
    pub fn new(date: &str, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        PriceBar {
            date: date.to_owned(),
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// 附带均线的日K线
///
/// 均线在历史不足或窗口内存在非有限值时为None，序列化为null
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedBar {
    #[serde(flatten)]
    pub bar: PriceBar,
    pub ma5: Option<f64>,
    pub ma20: Option<f64>,
    pub ma60: Option<f64>,
}

impl AnnotatedBar {
    pub fn date(&self) -> &str {
        &self.bar.date
    }

    pub fn close(&self) -> f64 {
        self.bar.close
    }
}
