use std::cell::RefCell;
use twstock::genai::{self, MarketStatus, Recommendation, RecommendedStock, StockAnalysis};
use twstock::metrics::PriceBar;
use twstock::{Error, PriceSource, Result, StockAnalyst, StockDesk};

struct FakeAnalyst {
    tickers: RefCell<Vec<String>>,
}

impl FakeAnalyst {
    fn new() -> Self {
        FakeAnalyst {
            tickers: RefCell::new(Vec::new()),
        }
    }
}

impl StockAnalyst for FakeAnalyst {
    fn analyze_stock(&self, ticker: &str) -> Result<StockAnalysis> {
        self.tickers.borrow_mut().push(ticker.to_owned());
        Ok(StockAnalysis {
            symbol: ticker.to_owned(),
            name: "台積電".to_owned(),
            price: 1000.0,
            change: 5.0,
            change_percent: 0.5,
            volume: "20,000".to_owned(),
            pe_ratio: Some(25.0),
            dividend_yield: None,
            market_status: MarketStatus::Open,
            recommendation: Recommendation::Buy,
            recommendation_reason: "趨勢向上".to_owned(),
            buy_price: Some(980.0),
            sell_price: Some(1100.0),
            analysis: String::new(),
            news_summary: String::new(),
        })
    }

    fn list_recommendations(&self) -> Result<Vec<RecommendedStock>> {
        Ok(vec![RecommendedStock {
            symbol: "2454".to_owned(),
            name: "聯發科".to_owned(),
            price: 1250.0,
            change_percent: 3.2,
            reason: "法人買超".to_owned(),
        }])
    }
}

struct BrokenAnalyst;

impl StockAnalyst for BrokenAnalyst {
    fn analyze_stock(&self, _ticker: &str) -> Result<StockAnalysis> {
        Err(genai::Error::Server("no data".to_owned()).into())
    }

    fn list_recommendations(&self) -> Result<Vec<RecommendedStock>> {
        Err(genai::Error::Server("503 Service Unavailable".to_owned()).into())
    }
}

/// closes 1, 2, 3, ... on consecutive days
struct RampSource {
    len: usize,
}

impl PriceSource for RampSource {
    fn daily_bars(&self, _ticker: &str, lookback: usize) -> Result<Vec<PriceBar>> {
        let start = self.len.saturating_sub(lookback);
        Ok((start..self.len)
            .map(|i| {
                let c = (i + 1) as f64;
                let date = format!("2024-{:02}-{:02}", i / 28 + 1, i % 28 + 1);
                PriceBar::new(&date, c, c + 0.5, c - 0.5, c, 100)
            })
            .collect())
    }
}

#[test]
fn test_analyze_normalizes_ticker() -> Result<()> {
    let analyst = FakeAnalyst::new();
    let desk = StockDesk::new(&analyst, RampSource { len: 0 });
    let sa = desk.analyze(" 2330 ")?;
    assert_eq!("2330.TW", sa.symbol);
    assert_eq!(vec!["2330.TW".to_owned()], *analyst.tickers.borrow());
    Ok(())
}

#[test]
fn test_analyze_rejects_empty_ticker_before_calling_analyst() {
    let analyst = FakeAnalyst::new();
    let desk = StockDesk::new(&analyst, RampSource { len: 0 });
    assert!(matches!(
        desk.analyze("  "),
        Err(Error::Genai(genai::Error::Client(_)))
    ));
    assert!(analyst.tickers.borrow().is_empty());
}

#[test]
fn test_chart_annotates_lookback_window() -> Result<()> {
    let desk = StockDesk::new(FakeAnalyst::new(), RampSource { len: 200 }).with_lookback(10);
    let chart = desk.chart("2330")?;
    assert_eq!(10, chart.bars.len());
    // closes 191..=200
    assert_eq!(None, chart.bars[3].ma5);
    assert_eq!(Some(193.0), chart.bars[4].ma5);
    assert_eq!(Some(198.0), chart.bars[9].ma5);
    assert_eq!(None, chart.bars[9].ma20);
    assert_eq!(Some((186.0, 205.0)), chart.domain);
    Ok(())
}

#[test]
fn test_chart_without_history() -> Result<()> {
    let desk = StockDesk::new(FakeAnalyst::new(), RampSource { len: 0 });
    let chart = desk.chart("2330")?;
    assert!(chart.is_empty());
    assert_eq!(None, chart.domain);
    Ok(())
}

#[test]
fn test_report() -> Result<()> {
    let desk = StockDesk::new(FakeAnalyst::new(), RampSource { len: 130 });
    let report = desk.report("2330")?;
    assert_eq!(Recommendation::Buy, report.analysis.recommendation);
    assert_eq!(twstock::DEFAULT_LOOKBACK, report.chart.bars.len());
    let last = report.chart.bars.last().unwrap();
    // closes 71..=130
    assert_eq!(Some(100.5), last.ma60);
    Ok(())
}

#[test]
fn test_report_propagates_analyst_error() {
    let desk = StockDesk::new(BrokenAnalyst, RampSource { len: 10 });
    assert!(matches!(
        desk.report("2330"),
        Err(Error::Genai(genai::Error::Server(_)))
    ));
}

#[test]
fn test_dashboard() {
    let desk = StockDesk::new(FakeAnalyst::new(), RampSource { len: 0 });
    let stocks = desk.dashboard();
    assert_eq!(1, stocks.len());
    assert_eq!("聯發科", stocks[0].name);

    let desk = StockDesk::new(BrokenAnalyst, RampSource { len: 0 });
    assert!(desk.dashboard().is_empty());
}
