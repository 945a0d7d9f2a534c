mod error;
pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;

use twstock::genai::{GenaiClient, GenaiConfig, RecommendedStock, StockAnalysis};

/// build the model client from explicit settings
pub fn genai_client(
    api_key: Option<&str>,
    model: Option<&str>,
    base_url: Option<&str>,
) -> Result<GenaiClient> {
    let api_key = api_key.ok_or(Error::MissingApiKey)?;
    let mut cfg = GenaiConfig::new(api_key);
    if let Some(model) = model {
        cfg = cfg.with_model(model);
    }
    if let Some(base_url) = base_url {
        cfg = cfg.with_base_url(base_url);
    }
    Ok(GenaiClient::new(cfg)?)
}

/// two decimals with an explicit sign on non-negative values
pub fn signed(value: f64) -> String {
    if value >= 0.0 {
        format!("+{:.2}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// absent or zero prints `missing`
fn price_or(value: Option<f64>, missing: &str) -> String {
    match value {
        Some(v) if v != 0.0 => format!("{:.2}", v),
        _ => missing.to_owned(),
    }
}

pub fn format_analysis(sa: &StockAnalysis) -> String {
    let dividend_yield = match sa.dividend_yield {
        Some(v) if v != 0.0 => format!("{}%", v),
        _ => "N/A".to_owned(),
    };
    format!(
        "{} {}\n\
         {:.2}  {} ({}%)\n\
         [{}] {}\n\
         建議買進價 {} | 建議賣出價 {}\n\
         成交量 {} | 本益比 {} | 殖利率 {} | {}\n\
         \n話題・新聞快訊\n{}\n\
         \n綜合分析摘要\n{}",
        sa.symbol,
        sa.name,
        sa.price,
        signed(sa.change),
        signed(sa.change_percent),
        sa.recommendation.verdict(),
        sa.recommendation_reason,
        price_or(sa.buy_price, "-"),
        price_or(sa.sell_price, "-"),
        sa.volume,
        price_or(sa.pe_ratio, "N/A"),
        dividend_yield,
        sa.market_status.label(),
        sa.news_summary,
        sa.analysis
    )
}

pub fn format_recommendations(stocks: &[RecommendedStock]) -> String {
    if stocks.is_empty() {
        return "市場焦點・強勢精選: 暫無資料".to_owned();
    }
    let mut s = String::from("市場焦點・強勢精選");
    for st in stocks {
        s.push_str(&format!(
            "\n{} {} {:.2} {}% {}",
            st.symbol,
            st.name,
            st.price,
            signed(st.change_percent),
            st.reason
        ));
    }
    s
}
