//! Client for the backing analysis service.
//!
//! The service produces the two raw daily return series the engine
//! compares: the computed portfolio series and single-ticker reference
//! prices with a pre-computed summary block. This crate only moves
//! bytes; all reconciliation happens in `series-align`.

use comparison_core::CompareError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Upstream summary block shipped alongside the reference series.
///
/// Every field is optional — the engine recomputes its own summary
/// under one formula and only passes this block through for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceSummary {
    #[serde(default)]
    pub avg_daily_return: Option<f64>,
    #[serde(default)]
    pub volatility: Option<f64>,
    #[serde(default)]
    pub total_return: Option<f64>,
    #[serde(default)]
    pub num_observations: Option<u64>,
}

/// Reference-series response: raw price/return records plus summary.
#[derive(Debug, Clone, Deserialize)]
pub struct TickerPrices {
    pub ticker: String,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub prices: Vec<Value>,
    #[serde(default)]
    pub summary: ReferenceSummary,
}

/// Portfolio-series response from the sentiment analysis run.
#[derive(Debug, Clone, Deserialize)]
pub struct PortfolioReturns {
    #[serde(default)]
    pub returns: Vec<Value>,
    #[serde(default)]
    pub top_stocks: Vec<Value>,
    #[serde(default)]
    pub metadata: Value,
}

#[derive(Serialize)]
struct RangeRequest<'a> {
    start_date: &'a str,
    end_date: &'a str,
}

#[derive(Serialize)]
struct TickerRequest<'a> {
    ticker: String,
    start_date: &'a str,
    end_date: &'a str,
}

#[derive(Clone)]
pub struct AnalysisClient {
    base_url: String,
    client: Client,
}

impl AnalysisClient {
    pub fn new(base_url: String) -> Self {
        // Analysis runs can take a while upstream
        let client = Client::builder()
            .timeout(Duration::from_secs(90))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Fetch the computed portfolio daily return series for a range.
    pub async fn get_portfolio_returns(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<PortfolioReturns, CompareError> {
        let url = format!("{}/api/analyze/sentiment", self.base_url);
        tracing::debug!(%url, start_date, end_date, "requesting portfolio returns");

        let response = self
            .client
            .post(&url)
            .json(&RangeRequest {
                start_date,
                end_date,
            })
            .send()
            .await
            .map_err(|e| CompareError::ApiError(e.to_string()))?;

        Self::decode(response).await
    }

    /// Fetch reference prices/returns for one ticker over a range.
    pub async fn get_ticker_prices(
        &self,
        ticker: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<TickerPrices, CompareError> {
        let url = format!("{}/api/analyze/ticker-prices", self.base_url);
        tracing::debug!(%url, ticker, start_date, end_date, "requesting ticker prices");

        let response = self
            .client
            .post(&url)
            .json(&TickerRequest {
                ticker: ticker.trim().to_uppercase(),
                start_date,
                end_date,
            })
            .send()
            .await
            .map_err(|e| CompareError::ApiError(e.to_string()))?;

        Self::decode(response).await
    }

    /// Probe upstream liveness; body passed through as-is.
    pub async fn health(&self) -> Result<Value, CompareError> {
        let url = format!("{}/api/health", self.base_url);
        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .map_err(|e| CompareError::ApiError(e.to_string()))?;

        Self::decode(response).await
    }

    /// Check status, then decode. Upstream error text is surfaced
    /// unchanged so the UI can show the service's own message.
    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, CompareError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompareError::ApiError(format!("HTTP {}: {}", status, body)));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| CompareError::ApiError(e.to_string()))
    }
}
