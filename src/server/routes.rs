use crate::errors::AppError;
use crate::payoff::{classify_structure, OptionDirection, Position, StrikeSet, StructureType};
use crate::preview::{self, scenario::DEFAULT_OFFSETS_PCT, PreviewParams, TradePreview};
use crate::state::{AppState, PerfCounters};
use crate::tournament::score::{score_breakdown, ScoreBreakdown};
use crate::tournament::{leaderboard, LeaderboardEntry, ScoreInputs, SettledTrade};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use std::sync::Arc;

const MAX_PREVIEW_SAMPLES: usize = 5000;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<serde_json::Value>)>;

#[derive(serde::Deserialize)]
pub struct PayoutRequest {
    pub strikes: Vec<f64>,
    pub direction: OptionDirection,
    pub contracts: f64,
    pub settlement_price: f64,
}

#[derive(serde::Serialize)]
pub struct PayoutResponse {
    pub structure: StructureType,
    pub width: f64,
    pub payout: f64,
}

#[derive(serde::Deserialize)]
pub struct PreviewRequest {
    pub strikes: Vec<f64>,
    pub direction: OptionDirection,
    pub investment: f64,
    pub price_per_contract: f64,
    pub reference_price: f64,
    pub offsets: Option<Vec<f64>>,
    pub samples: Option<usize>,
    pub range_pct: Option<f64>,
}

#[derive(serde::Deserialize)]
pub struct LeaderboardRequest {
    pub trades: Vec<SettledTrade>,
    pub streak_day_hours: Option<i64>,
}

#[derive(serde::Serialize)]
pub struct LeaderboardResponse {
    pub entries: Vec<LeaderboardEntry>,
}

fn reject(state: &AppState, e: AppError) -> (StatusCode, Json<serde_json::Value>) {
    PerfCounters::bump(&state.counters.requests_rejected);
    let status = if e.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    tracing::warn!(error = %e, status = status.as_u16(), "request rejected");
    (status, Json(serde_json::json!({ "error": e.to_string() })))
}

/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /api/structure/{count} -- never fails, unsupported counts are "unknown"
pub async fn get_structure(Path(count): Path<usize>) -> Json<serde_json::Value> {
    let structure = classify_structure(count);
    Json(serde_json::json!({
        "count": count,
        "structure": structure,
        "supported": structure.profile().is_some(),
    }))
}

/// POST /api/payout -- gross payout of a validated position
pub async fn post_payout(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PayoutRequest>,
) -> ApiResult<PayoutResponse> {
    if !req.settlement_price.is_finite() || req.settlement_price < 0.0 {
        return Err(reject(
            &state,
            AppError::InvalidInput(format!("settlement price must be non-negative, got {}", req.settlement_price)),
        ));
    }
    let position = StrikeSet::new(&req.strikes)
        .and_then(|strikes| Position::new(strikes, req.direction, req.contracts))
        .map_err(|e| reject(&state, e))?;

    PerfCounters::bump(&state.counters.payouts_evaluated);
    Ok(Json(PayoutResponse {
        structure: position.structure(),
        width: position.strikes.width(),
        payout: position.payout_at(req.settlement_price),
    }))
}

/// POST /api/preview -- P/L curve, scenarios and breakevens for a prospective trade
pub async fn post_preview(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PreviewRequest>,
) -> ApiResult<TradePreview> {
    let position = preview::contracts_for_investment(req.investment, req.price_per_contract)
        .and_then(|contracts| {
            let strikes = StrikeSet::new(&req.strikes)?;
            Position::new(strikes, req.direction, contracts)
        })
        .map_err(|e| reject(&state, e))?;

    let offsets = req.offsets.as_deref().unwrap_or(&DEFAULT_OFFSETS_PCT);
    let params = PreviewParams {
        investment: req.investment,
        reference_price: req.reference_price,
        range_pct: req.range_pct.unwrap_or(state.config.preview_range_pct),
        samples: req
            .samples
            .unwrap_or(state.config.preview_samples)
            .min(MAX_PREVIEW_SAMPLES),
        offsets,
    };

    let preview = preview::build_preview(&position, &params).map_err(|e| reject(&state, e))?;
    PerfCounters::bump(&state.counters.previews_built);
    Ok(Json(preview))
}

/// POST /api/score -- tournament score with its per-axis breakdown
pub async fn post_score(
    State(state): State<Arc<AppState>>,
    Json(inputs): Json<ScoreInputs>,
) -> ApiResult<ScoreBreakdown> {
    if !inputs.total_premium.is_finite() || inputs.total_premium < 0.0 {
        return Err(reject(
            &state,
            AppError::InvalidInput(format!("total premium must be non-negative, got {}", inputs.total_premium)),
        ));
    }
    if !inputs.total_profit.is_finite() {
        return Err(reject(&state, AppError::InvalidInput("total profit must be finite".into())));
    }
    PerfCounters::bump(&state.counters.scores_computed);
    Ok(Json(score_breakdown(&inputs)))
}

/// POST /api/leaderboard -- aggregate settled trades and rank participants
pub async fn post_leaderboard(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LeaderboardRequest>,
) -> ApiResult<LeaderboardResponse> {
    let day_hours = req.streak_day_hours.unwrap_or(state.config.streak_day_hours);
    if day_hours <= 0 {
        return Err(reject(
            &state,
            AppError::InvalidInput(format!("streak day hours must be positive, got {day_hours}")),
        ));
    }
    if let Some(bad) = req
        .trades
        .iter()
        .find(|t| !t.premium.is_finite() || t.premium < 0.0 || !t.payout.is_finite() || t.payout < 0.0)
    {
        return Err(reject(
            &state,
            AppError::InvalidInput(format!("trade for {} has invalid premium or payout", bad.participant)),
        ));
    }

    let entries = leaderboard::rank(&req.trades, chrono::Duration::hours(day_hours));
    PerfCounters::bump(&state.counters.leaderboards_ranked);
    Ok(Json(LeaderboardResponse { entries }))
}

/// GET /api/counters -- performance counters (lock-free reads)
pub async fn get_counters(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    use portable_atomic::Ordering::Relaxed;
    Json(serde_json::json!({
        "payouts_evaluated": state.counters.payouts_evaluated.load(Relaxed),
        "previews_built": state.counters.previews_built.load(Relaxed),
        "scores_computed": state.counters.scores_computed.load(Relaxed),
        "leaderboards_ranked": state.counters.leaderboards_ranked.load(Relaxed),
        "requests_rejected": state.counters.requests_rejected.load(Relaxed),
    }))
}

#[cfg(test)]
mod tests {
    use crate::config::AppConfig;
    use crate::server::router;
    use crate::state::AppState;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn app() -> axum::Router {
        router(AppState::new(AppConfig::default()))
    }

    async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_structure_lookup() {
        let request = Request::builder().uri("/api/structure/3").body(Body::empty()).unwrap();
        let (_, body) = send(app(), request).await;
        assert_eq!(body["structure"], "butterfly");
        assert_eq!(body["supported"], true);

        let request = Request::builder().uri("/api/structure/6").body(Body::empty()).unwrap();
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["structure"], "unknown");
        assert_eq!(body["supported"], false);
    }

    #[tokio::test]
    async fn test_payout() {
        let request = post(
            "/api/payout",
            serde_json::json!({
                "strikes": [100.0, 110.0],
                "direction": "call",
                "contracts": 5.0,
                "settlement_price": 105.0
            }),
        );
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["structure"], "spread");
        assert_eq!(body["width"], 10.0);
        assert_eq!(body["payout"], 25.0);
    }

    #[tokio::test]
    async fn test_payout_rejects_unsorted_strikes() {
        let request = post(
            "/api/payout",
            serde_json::json!({
                "strikes": [110.0, 100.0],
                "direction": "put",
                "contracts": 1.0,
                "settlement_price": 105.0
            }),
        );
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("strictly increasing"));
    }

    #[tokio::test]
    async fn test_preview() {
        let request = post(
            "/api/preview",
            serde_json::json!({
                "strikes": [90.0, 100.0, 110.0],
                "direction": "call",
                "investment": 10.0,
                "price_per_contract": 5.0,
                "reference_price": 100.0,
                "samples": 40
            }),
        );
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["structure"], "butterfly");
        assert_eq!(body["contracts"], 2.0);
        assert_eq!(body["curve"].as_array().unwrap().len(), 40);
        assert_eq!(body["scenarios"].as_array().unwrap().len(), 10);
        assert_eq!(body["breakevens"].as_array().unwrap().len(), 2);
        assert_eq!(body["max_payout"], 20.0);
    }

    #[tokio::test]
    async fn test_preview_rejects_zero_price() {
        let request = post(
            "/api/preview",
            serde_json::json!({
                "strikes": [100.0],
                "direction": "call",
                "investment": 10.0,
                "price_per_contract": 0.0,
                "reference_price": 100.0
            }),
        );
        let (status, _) = send(app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_score() {
        let request = post(
            "/api/score",
            serde_json::json!({
                "total_premium": 1000.0,
                "total_profit": 500.0,
                "trade_count": 16,
                "streak_days": 9
            }),
        );
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert!((body["score"].as_f64().unwrap() - 62.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_score_rejects_negative_premium() {
        let request = post(
            "/api/score",
            serde_json::json!({
                "total_premium": -50.0,
                "total_profit": 10.0,
                "trade_count": 3,
                "streak_days": 1
            }),
        );
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("total premium"));
    }

    #[tokio::test]
    async fn test_leaderboard() {
        let request = post(
            "/api/leaderboard",
            serde_json::json!({
                "trades": [
                    { "participant": "bob", "premium": 10.0, "payout": 0.0, "settled_at": "2026-03-01T10:00:00Z" },
                    { "participant": "alice", "premium": 500.0, "payout": 900.0, "settled_at": "2026-03-01T10:00:00Z" },
                    { "participant": "alice", "premium": 100.0, "payout": 50.0, "settled_at": "2026-03-02T08:30:00Z" }
                ]
            }),
        );
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::OK);
        let entries = body["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["participant"], "alice");
        assert_eq!(entries[0]["rank"], 1);
        assert_eq!(entries[0]["inputs"]["streak_days"], 2);
        assert_eq!(entries[1]["participant"], "bob");
    }

    #[tokio::test]
    async fn test_counters_track_rejections() {
        let app = app();
        let bad = post(
            "/api/payout",
            serde_json::json!({
                "strikes": [1.0, 2.0, 3.0, 4.0, 5.0],
                "direction": "call",
                "contracts": 1.0,
                "settlement_price": 3.0
            }),
        );
        let (status, _) = send(app.clone(), bad).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let request = Request::builder().uri("/api/counters").body(Body::empty()).unwrap();
        let (_, body) = send(app, request).await;
        assert_eq!(body["requests_rejected"], 1);
        assert_eq!(body["payouts_evaluated"], 0);
    }
}
