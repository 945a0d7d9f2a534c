use crate::source::PriceSource;
use crate::Result;
use genai::{AnalyzeStock, GenaiClient, ListRecommendations, RecommendedStock, StockAnalysis};
use serde_derive::*;
use twstock_metrics::ChartSeries;

/// enough sessions for the 60-day average to cover half of the chart
pub const DEFAULT_LOOKBACK: usize = 120;

/// AI analysis provider
pub trait StockAnalyst {
    fn analyze_stock(&self, ticker: &str) -> Result<StockAnalysis>;

    fn list_recommendations(&self) -> Result<Vec<RecommendedStock>>;
}

impl StockAnalyst for GenaiClient {
    fn analyze_stock(&self, ticker: &str) -> Result<StockAnalysis> {
        let sa = self.execute(AnalyzeStock {
            ticker: ticker.to_owned(),
        })?;
        Ok(sa)
    }

    fn list_recommendations(&self) -> Result<Vec<RecommendedStock>> {
        let stocks = self.execute(ListRecommendations {})?;
        Ok(stocks)
    }
}

impl<'a, T: StockAnalyst + ?Sized> StockAnalyst for &'a T {
    fn analyze_stock(&self, ticker: &str) -> Result<StockAnalysis> {
        (**self).analyze_stock(ticker)
    }

    fn list_recommendations(&self) -> Result<Vec<RecommendedStock>> {
        (**self).list_recommendations()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockReport {
    pub analysis: StockAnalysis,
    pub chart: ChartSeries,
}

/// Entry point of the front end: analysis, chart data and the dashboard
pub struct StockDesk<A, S> {
    analyst: A,
    prices: S,
    lookback: usize,
}

impl<A: StockAnalyst, S: PriceSource> StockDesk<A, S> {
    pub fn new(analyst: A, prices: S) -> Self {
        StockDesk {
            analyst,
            prices,
            lookback: DEFAULT_LOOKBACK,
        }
    }

    pub fn with_lookback(mut self, lookback: usize) -> Self {
        self.lookback = lookback;
        self
    }

    pub fn analyze(&self, ticker: &str) -> Result<StockAnalysis> {
        let ticker = genai::normalize_ticker(ticker)?;
        log::info!("analyzing {}", ticker);
        self.analyst.analyze_stock(&ticker)
    }

    pub fn chart(&self, ticker: &str) -> Result<ChartSeries> {
        let bars = self.prices.daily_bars(ticker, self.lookback)?;
        Ok(ChartSeries::new(&bars))
    }

    pub fn report(&self, ticker: &str) -> Result<StockReport> {
        let analysis = self.analyze(ticker)?;
        let chart = self.chart(ticker)?;
        Ok(StockReport { analysis, chart })
    }

    /// recommended stocks; failures leave the dashboard empty
    pub fn dashboard(&self) -> Vec<RecommendedStock> {
        match self.analyst.list_recommendations() {
            Ok(stocks) => stocks,
            Err(e) => {
                log::error!("failed to fetch recommendations: {}", e);
                Vec::new()
            }
        }
    }
}
