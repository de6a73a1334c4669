use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use analysis_client::{PortfolioReturns, ReferenceSummary, TickerPrices};
use comparison_core::{AlignedPair, DiffTable, DropCounts, FieldMap, SeriesSummary};
use series_align::{align, numeric_series, project, summarize, to_csv, DEFAULT_ROW_LIMIT, TRADING_DAYS_PER_YEAR};

use crate::{ApiResponse, AppError, AppState};

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub ticker: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub ticker: String,
    pub start_date: String,
    pub end_date: String,
}

/// Comparison state tag, so callers can tell "zero rows because no
/// overlap" from "zero rows because nothing was requested".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareStatus {
    Ok,
    NoOverlap,
    NoData,
}

#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub ticker: String,
    pub period: Option<String>,
    pub status: CompareStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Aligned overlap in percent units, side-A (portfolio) order.
    pub pairs: Vec<AlignedPair>,
    /// Engine summary over the portfolio's full series; absent when
    /// there were no valid observations.
    pub portfolio_summary: Option<SeriesSummary>,
    /// Engine summary over the reference's full series, same formula.
    pub reference_summary: Option<SeriesSummary>,
    /// Upstream pre-computed block, passed through untouched.
    pub upstream_summary: ReferenceSummary,
    pub table: DiffTable,
    pub dropped_portfolio: DropCounts,
    pub dropped_reference: DropCounts,
}

pub fn compare_routes() -> Router<AppState> {
    Router::new()
        .route("/api/compare", post(compare))
        .route("/api/compare/export", get(export_csv))
        .route("/api/health", get(health))
}

/// Run one comparison: fetch both series, align, summarize, project.
async fn compare(
    State(state): State<AppState>,
    Json(req): Json<CompareRequest>,
) -> Result<Json<ApiResponse<CompareResponse>>, AppError> {
    if req.ticker.trim().is_empty() {
        return Ok(Json(ApiResponse::error("ticker is required")));
    }

    let (portfolio, reference) = fetch_both(&state, &req.ticker, &req.start_date, &req.end_date).await?;
    let response = build_comparison(portfolio, reference);

    Ok(Json(ApiResponse::success(response)))
}

/// Full-range CSV of the aligned series, sorted by date.
async fn export_csv(
    State(state): State<AppState>,
    Query(q): Query<ExportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (portfolio, reference) = fetch_both(&state, &q.ticker, &q.start_date, &q.end_date).await?;

    let alignment = align(
        &portfolio.returns,
        &reference.prices,
        &FieldMap::portfolio(),
        &FieldMap::reference(),
    );
    let csv = to_csv(&alignment.pairs);

    let filename = format!(
        "comparison_{}_{}_{}.csv",
        reference.ticker, q.start_date, q.end_date
    );
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        csv,
    ))
}

/// Liveness of this server plus the backing analysis service.
async fn health(State(state): State<AppState>) -> Json<Value> {
    let upstream = match state.analysis.health().await {
        Ok(body) => body,
        Err(err) => {
            tracing::warn!(error = %err, "analysis service unreachable");
            json!("unreachable")
        }
    };

    Json(json!({
        "api": "healthy",
        "analysis_service": upstream,
    }))
}

async fn fetch_both(
    state: &AppState,
    ticker: &str,
    start_date: &str,
    end_date: &str,
) -> Result<(PortfolioReturns, TickerPrices), AppError> {
    let (portfolio, reference) = tokio::join!(
        state.analysis.get_portfolio_returns(start_date, end_date),
        state.analysis.get_ticker_prices(ticker, start_date, end_date),
    );
    Ok((portfolio?, reference?))
}

/// Pure assembly of the comparison payload from the two raw series.
fn build_comparison(portfolio: PortfolioReturns, reference: TickerPrices) -> CompareResponse {
    let fields_a = FieldMap::portfolio();
    let fields_b = FieldMap::reference();

    let portfolio_values = numeric_series(&portfolio.returns, &fields_a);
    let reference_values = numeric_series(&reference.prices, &fields_b);
    let portfolio_summary = summarize(&portfolio_values, TRADING_DAYS_PER_YEAR);
    let reference_summary = summarize(&reference_values, TRADING_DAYS_PER_YEAR);

    let alignment = align(&portfolio.returns, &reference.prices, &fields_a, &fields_b);
    let table = project(&alignment.pairs, DEFAULT_ROW_LIMIT);

    let (status, hint) = if portfolio.returns.is_empty() {
        (
            CompareStatus::NoData,
            Some("The portfolio analysis returned no data for this range.".to_string()),
        )
    } else if !alignment.has_overlap() {
        (
            CompareStatus::NoOverlap,
            Some(
                "No overlapping trading days between the portfolio and this ticker. \
                 Try a different date range or instrument."
                    .to_string(),
            ),
        )
    } else {
        (CompareStatus::Ok, None)
    };

    CompareResponse {
        ticker: reference.ticker,
        period: reference.period,
        status,
        hint,
        pairs: alignment.pairs,
        portfolio_summary,
        reference_summary,
        upstream_summary: reference.summary,
        table,
        dropped_portfolio: alignment.dropped_a,
        dropped_reference: alignment.dropped_b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn portfolio_with(returns: Vec<Value>) -> PortfolioReturns {
        serde_json::from_value(json!({"returns": returns})).unwrap()
    }

    fn reference_with(prices: Vec<Value>) -> TickerPrices {
        serde_json::from_value(json!({"ticker": "AAPL", "prices": prices})).unwrap()
    }

    #[test]
    fn ok_comparison_end_to_end() {
        let portfolio = portfolio_with(vec![
            json!({"date": "2023-01-02", "portfolio_return": 0.01}),
            json!({"date": "2023-01-03", "portfolio_return": -0.02}),
        ]);
        let reference = reference_with(vec![
            json!({"Date": "2023-01-02T00:00:00Z", "return": 0.015}),
            json!({"Date": "2023-01-04", "return": 0.03}),
        ]);

        let resp = build_comparison(portfolio, reference);

        assert_eq!(resp.status, CompareStatus::Ok);
        assert_eq!(resp.pairs.len(), 1);
        assert_eq!(resp.pairs[0].date, "2023-01-02");
        assert!((resp.pairs[0].value_a - 1.0).abs() < 1e-12);
        assert!((resp.pairs[0].value_b - 1.5).abs() < 1e-12);
        // summaries cover each full side, not just the overlap
        assert_eq!(resp.portfolio_summary.as_ref().unwrap().observation_count, 2);
        assert_eq!(resp.reference_summary.as_ref().unwrap().observation_count, 2);
        assert_eq!(resp.table.rows.len(), 1);
        assert_eq!(resp.table.omitted_count, 0);
    }

    #[test]
    fn no_overlap_is_tagged_with_guidance() {
        let portfolio = portfolio_with(vec![
            json!({"date": "2023-01-02", "portfolio_return": 0.01}),
        ]);
        let reference = reference_with(vec![json!({"Date": "2023-06-01", "return": 0.02})]);

        let resp = build_comparison(portfolio, reference);

        assert_eq!(resp.status, CompareStatus::NoOverlap);
        assert!(resp.hint.is_some());
        assert!(resp.pairs.is_empty());
        assert_eq!(resp.table.omitted_count, 0);
        // per-side metrics still computed
        assert!(resp.portfolio_summary.is_some());
    }

    #[test]
    fn empty_portfolio_is_no_data_not_a_crash() {
        let portfolio = portfolio_with(vec![]);
        let reference = reference_with(vec![json!({"Date": "2023-01-02", "return": 0.02})]);

        let resp = build_comparison(portfolio, reference);

        assert_eq!(resp.status, CompareStatus::NoData);
        assert!(resp.portfolio_summary.is_none());
        assert!(resp.reference_summary.is_some());
    }

    #[test]
    fn long_overlap_is_truncated_in_table_only() {
        let days: Vec<Value> = (1..=20)
            .map(|d| json!({"date": format!("2023-01-{:02}", d), "portfolio_return": 0.01}))
            .collect();
        let prices: Vec<Value> = (1..=20)
            .map(|d| json!({"Date": format!("2023-01-{:02}", d), "return": 0.02}))
            .collect();

        let resp = build_comparison(portfolio_with(days), reference_with(prices));

        assert_eq!(resp.pairs.len(), 20);
        assert_eq!(resp.table.rows.len(), DEFAULT_ROW_LIMIT);
        assert_eq!(resp.table.omitted_count, 5);
    }
}
