use crate::error::Error;
use crate::ticker::normalize_ticker;
use serde_derive::*;
use serde_json::{json, Value};

/// RequestCommand
///
/// define how to generate request body
pub trait RequestCommand {
    // generate generateContent request body
    fn request_body(&self) -> Result<String, Error>;
}

/// GenaiCommand
///
/// defines how to handle the text generated by the model
pub trait GenaiCommand: RequestCommand {
    type Output;
    // text is None when the model returned no candidate text
    fn response_body(&self, text: Option<String>) -> Result<Self::Output, Error>;
}

/// build a schema-constrained, search-grounded generateContent body
fn generate_body(prompt: &str, schema: Value) -> Result<String, Error> {
    let json = serde_json::to_string(&json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": prompt }],
        }],
        "tools": [{ "googleSearch": {} }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": schema,
        },
    }))?;
    Ok(json)
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// extract the text of the first candidate from a generateContent response
pub(crate) fn candidate_text(body: &str) -> Result<Option<String>, Error> {
    let resp: GenerateContentResponse = serde_json::from_str(body)?;
    let text: String = resp
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(text))
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MarketStatus {
    Open,
    Closed,
}

impl MarketStatus {
    pub fn label(self) -> &'static str {
        match self {
            MarketStatus::Open => "交易中",
            MarketStatus::Closed => "已收盤",
        }
    }
}

/// investment recommendation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Recommendation {
    Buy,
    Sell,
    Hold,
}

impl Recommendation {
    pub fn verdict(self) -> &'static str {
        match self {
            Recommendation::Buy => "建議買進",
            Recommendation::Sell => "建議賣出",
            Recommendation::Hold => "建議續抱 / 觀望",
        }
    }
}

/// analysis of a single stock
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StockAnalysis {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    #[serde(default)]
    pub volume: String,
    #[serde(default)]
    pub pe_ratio: Option<f64>,
    #[serde(default)]
    pub dividend_yield: Option<f64>,
    pub market_status: MarketStatus,
    pub recommendation: Recommendation,
    pub recommendation_reason: String,
    #[serde(default)]
    pub buy_price: Option<f64>,
    #[serde(default)]
    pub sell_price: Option<f64>,
    pub analysis: String,
    pub news_summary: String,
}

/// stock picked for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedStock {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change_percent: f64,
    pub reason: String,
}

#[derive(Debug, Deserialize)]
struct RecommendationList {
    #[serde(default)]
    stocks: Vec<RecommendedStock>,
}

/// all commands are defined below

/// 個股分析
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeStock {
    pub ticker: String,
}

impl AnalyzeStock {
    pub fn response_schema() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "symbol": { "type": "STRING" },
                "name": { "type": "STRING" },
                "price": { "type": "NUMBER" },
                "change": { "type": "NUMBER" },
                "changePercent": { "type": "NUMBER" },
                "volume": { "type": "STRING" },
                "peRatio": { "type": "NUMBER", "nullable": true, "description": "P/E ratio, null if not applicable." },
                "dividendYield": { "type": "NUMBER", "nullable": true, "description": "Dividend yield in percent, e.g. 4.5" },
                "marketStatus": { "type": "STRING", "enum": ["Open", "Closed"] },
                "recommendation": { "type": "STRING", "enum": ["Buy", "Sell", "Hold"] },
                "recommendationReason": { "type": "STRING" },
                "buyPrice": { "type": "NUMBER", "nullable": true, "description": "Entry price at technical support, null if not applicable." },
                "sellPrice": { "type": "NUMBER", "nullable": true, "description": "Target price at resistance, null if not applicable." },
                "analysis": { "type": "STRING" },
                "newsSummary": { "type": "STRING" },
            },
            "required": [
                "symbol", "name", "price", "change", "changePercent", "marketStatus",
                "recommendation", "recommendationReason", "buyPrice", "sellPrice",
                "analysis", "newsSummary",
            ],
        })
    }
}

impl RequestCommand for AnalyzeStock {
    fn request_body(&self) -> Result<String, Error> {
        let ticker = normalize_ticker(&self.ticker)?;
        let prompt = format!(
            "Look up the latest quote, valuation, news and forum discussion of {} \
             on the Taiwan Stock Exchange, then give a Buy, Sell or Hold call with \
             support and resistance prices. Write all prose in Traditional Chinese. \
             Reply with JSON matching the schema.",
            ticker
        );
        generate_body(&prompt, Self::response_schema())
    }
}

impl GenaiCommand for AnalyzeStock {
    type Output = StockAnalysis;
    fn response_body(&self, text: Option<String>) -> Result<StockAnalysis, Error> {
        match text {
            Some(text) => Ok(serde_json::from_str(&text)?),
            None => Err(Error::Server("no data".to_owned())),
        }
    }
}

/// 強勢精選
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListRecommendations {}

impl ListRecommendations {
    pub fn response_schema() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "stocks": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "symbol": { "type": "STRING" },
                            "name": { "type": "STRING" },
                            "price": { "type": "NUMBER" },
                            "changePercent": { "type": "NUMBER" },
                            "reason": { "type": "STRING" },
                        },
                        "required": ["symbol", "name", "price", "changePercent", "reason"],
                    },
                },
            },
        })
    }
}

impl RequestCommand for ListRecommendations {
    fn request_body(&self) -> Result<String, Error> {
        let prompt = "Find three Taiwan-listed stocks with strong momentum in today's \
                      session, using today's prices and change percentages. Names and \
                      reasons must be in Traditional Chinese. Reply with JSON only.";
        generate_body(prompt, Self::response_schema())
    }
}

impl GenaiCommand for ListRecommendations {
    type Output = Vec<RecommendedStock>;
    fn response_body(&self, text: Option<String>) -> Result<Vec<RecommendedStock>, Error> {
        match text {
            Some(text) => {
                let list: RecommendationList = serde_json::from_str(&text)?;
                Ok(list.stocks)
            }
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_request_body() {
        let cmd = AnalyzeStock {
            ticker: "2330".to_owned(),
        };
        let body: Value = serde_json::from_str(&cmd.request_body().unwrap()).unwrap();
        let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("2330.TW"));
        assert_eq!(json!([{ "googleSearch": {} }]), body["tools"]);
        assert_eq!(
            "application/json",
            body["generationConfig"]["responseMimeType"]
        );
        assert_eq!(
            AnalyzeStock::response_schema(),
            body["generationConfig"]["responseSchema"]
        );
    }

    #[test]
    fn test_analyze_request_body_empty_ticker() {
        let cmd = AnalyzeStock {
            ticker: " ".to_owned(),
        };
        assert!(matches!(cmd.request_body(), Err(Error::Client(_))));
    }

    #[test]
    fn test_analyze_response_body() {
        let text = json!({
            "symbol": "2330.TW",
            "name": "台積電",
            "price": 1005.0,
            "change": -15.0,
            "changePercent": -1.47,
            "volume": "35,210",
            "peRatio": 24.8,
            "dividendYield": null,
            "marketStatus": "Closed",
            "recommendation": "Hold",
            "recommendationReason": "量縮整理",
            "buyPrice": 980.0,
            "sellPrice": null,
            "analysis": "- 外資賣超",
            "newsSummary": "法說會將至",
        })
        .to_string();
        let sa = AnalyzeStock {
            ticker: "2330".to_owned(),
        }
        .response_body(Some(text))
        .unwrap();
        assert_eq!("2330.TW", sa.symbol);
        assert_eq!(-1.47, sa.change_percent);
        assert_eq!(Some(24.8), sa.pe_ratio);
        assert_eq!(None, sa.dividend_yield);
        assert_eq!(MarketStatus::Closed, sa.market_status);
        assert_eq!(Recommendation::Hold, sa.recommendation);
        assert_eq!(Some(980.0), sa.buy_price);
        assert_eq!(None, sa.sell_price);
    }

    #[test]
    fn test_analyze_response_missing_optionals() {
        let text = r#"{"symbol":"2317.TW","name":"鴻海","price":150.5,"change":2.5,
            "changePercent":1.69,"marketStatus":"Open","recommendation":"Buy",
            "recommendationReason":"帶量突破","analysis":"","newsSummary":""}"#;
        let sa = AnalyzeStock {
            ticker: "2317".to_owned(),
        }
        .response_body(Some(text.to_owned()))
        .unwrap();
        assert_eq!("", sa.volume);
        assert_eq!(None, sa.pe_ratio);
        assert_eq!(None, sa.buy_price);
    }

    #[test]
    fn test_analyze_response_no_data() {
        let r = AnalyzeStock {
            ticker: "2330".to_owned(),
        }
        .response_body(None);
        assert!(matches!(r, Err(Error::Server(_))));
    }

    #[test]
    fn test_recommendations_response_body() {
        let cmd = ListRecommendations {};
        let text = json!({
            "stocks": [
                { "symbol": "2454.TW", "name": "聯發科", "price": 1250.0, "changePercent": 3.2, "reason": "法人買超" },
            ]
        })
        .to_string();
        let stocks = cmd.response_body(Some(text)).unwrap();
        assert_eq!(1, stocks.len());
        assert_eq!("聯發科", stocks[0].name);
        assert!(cmd.response_body(Some("{}".to_owned())).unwrap().is_empty());
        assert!(cmd.response_body(None).unwrap().is_empty());
    }

    #[test]
    fn test_candidate_text() {
        let body = json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "{\"a\":" }, { "text": "1}" }] }
            }]
        })
        .to_string();
        assert_eq!(Some("{\"a\":1}".to_owned()), candidate_text(&body).unwrap());
        assert_eq!(None, candidate_text("{}").unwrap());
        assert_eq!(None, candidate_text(r#"{"candidates":[{}]}"#).unwrap());
        assert!(candidate_text("not json").is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!("建議買進", Recommendation::Buy.verdict());
        assert_eq!("建議續抱 / 觀望", Recommendation::Hold.verdict());
        assert_eq!("交易中", MarketStatus::Open.label());
    }
}
