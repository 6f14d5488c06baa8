use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, routing::post, Json, Router};
use freightledger_core::{
    CashPosition, LedgerReport, LoadLedger, LoadSnapshot, SettlementSummary, StageProgress,
    WorkflowState,
};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

fn read_snapshot(payload: Result<Json<LoadSnapshot>, JsonRejection>) -> ApiResult<LoadSnapshot> {
    let Json(snapshot) = payload?;
    tracing::debug!(
        load_id = %snapshot.load.id,
        transactions = snapshot.transactions.len(),
        expenses = snapshot.expenses.len(),
        charges = snapshot.charges.len(),
        "Received load snapshot"
    );
    Ok(snapshot)
}

async fn get_settlement(
    payload: Result<Json<LoadSnapshot>, JsonRejection>,
) -> ApiResult<Json<SettlementSummary>> {
    let snapshot = read_snapshot(payload)?;
    let ledger = LoadLedger::new(&snapshot)?;
    Ok(Json(ledger.settlement()))
}

async fn get_progress(
    payload: Result<Json<LoadSnapshot>, JsonRejection>,
) -> ApiResult<Json<Vec<StageProgress>>> {
    let snapshot = read_snapshot(payload)?;
    let ledger = LoadLedger::new(&snapshot)?;
    Ok(Json(ledger.progress()))
}

async fn get_workflow(
    payload: Result<Json<LoadSnapshot>, JsonRejection>,
) -> ApiResult<Json<WorkflowState>> {
    let snapshot = read_snapshot(payload)?;
    let ledger = LoadLedger::new(&snapshot)?;
    Ok(Json(ledger.workflow()))
}

async fn get_cash_position(
    payload: Result<Json<LoadSnapshot>, JsonRejection>,
) -> ApiResult<Json<CashPosition>> {
    let snapshot = read_snapshot(payload)?;
    let ledger = LoadLedger::new(&snapshot)?;
    Ok(Json(ledger.cash_position()))
}

async fn get_report(
    payload: Result<Json<LoadSnapshot>, JsonRejection>,
) -> ApiResult<Json<LedgerReport>> {
    let snapshot = read_snapshot(payload)?;
    let ledger = LoadLedger::new(&snapshot)?;
    Ok(Json(ledger.report()))
}

/// Cash position across several loads.
async fn get_cash_book(
    payload: Result<Json<Vec<LoadSnapshot>>, JsonRejection>,
) -> ApiResult<Json<CashPosition>> {
    let Json(snapshots) = payload?;
    let mut positions = Vec::with_capacity(snapshots.len());
    for snapshot in &snapshots {
        positions.push(LoadLedger::new(snapshot)?.cash_position());
    }
    let book = CashPosition::merge(&positions);
    tracing::debug!(loads = snapshots.len(), total = %book.total, "Computed cash book");
    Ok(Json(book))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ledger/settlement", post(get_settlement))
        .route("/ledger/progress", post(get_progress))
        .route("/ledger/workflow", post(get_workflow))
        .route("/ledger/cash-position", post(get_cash_position))
        .route("/ledger/cash-book", post(get_cash_book))
        .route("/ledger/report", post(get_report))
}

#[cfg(test)]
mod tests {
    use crate::api::app_router;
    use crate::config::Config;
    use crate::main_lib::AppState;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn router() -> axum::Router {
        let config = Config::from_lookup(|_| None).unwrap();
        app_router(Arc::new(AppState::new(config)))
    }

    fn worked_example() -> Value {
        json!({
            "load": {
                "id": "LD-1001",
                "providerFreight": "10000",
                "truckFreight": "8000",
                "paymentModel": "standard",
                "status": "in_transit"
            },
            "assignment": { "truckId": "TRK-9", "commissionAmount": "800" },
            "transactions": [
                {"id": "t1", "amount": "5000", "type": "advance_from_provider", "paymentMethod": "cash", "date": "2024-04-01"},
                {"id": "t2", "amount": "5000", "type": "balance_from_provider", "paymentMethod": "upi", "date": "2024-04-03"},
                {"id": "t3", "amount": "4000", "type": "advance_to_driver", "paymentMethod": "cash", "date": "2024-04-01"}
            ],
            "expenses": [
                {"id": "e1", "amount": "1000", "paymentMethod": "cash", "date": "2024-04-02"}
            ],
            "charges": []
        })
    }

    async fn post_json(uri: &str, body: &Value) -> (StatusCode, Value) {
        let response = router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_settlement_endpoint() {
        let (status, body) = post_json("/api/v1/ledger/settlement", &worked_example()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["balanceToReceive"].as_f64(), Some(0.0));
        assert_eq!(body["balanceToPay"].as_f64(), Some(4000.0));
        assert_eq!(body["netProfit"].as_f64(), Some(1800.0));
        assert_eq!(body["driverLeg"], "settled_by_broker");
    }

    #[tokio::test]
    async fn test_cash_position_endpoint() {
        let (status, body) = post_json("/api/v1/ledger/cash-position", &worked_example()).await;
        assert_eq!(status, StatusCode::OK);
        let rows = body["byMethod"].as_array().unwrap();
        assert_eq!(rows[0]["method"], "cash");
        assert_eq!(rows[0]["balance"].as_f64(), Some(0.0));
        assert_eq!(rows[1]["method"], "upi");
        assert_eq!(rows[1]["balance"].as_f64(), Some(5000.0));
    }

    #[tokio::test]
    async fn test_workflow_endpoint() {
        let (status, body) = post_json("/api/v1/ledger/workflow", &worked_example()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["applicableCount"], 11);
        assert_eq!(body["completedCount"], 4);
        assert_eq!(body["nextStage"], "advance_from_provider");
    }

    #[tokio::test]
    async fn test_report_endpoint_bundles_all_views() {
        let (status, body) = post_json("/api/v1/ledger/report", &worked_example()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["settlement"].is_object());
        assert_eq!(body["progress"].as_array().map(|a| a.len()), Some(5));
        assert!(body["workflow"].is_object());
        assert!(body["cashPosition"].is_object());
    }

    #[tokio::test]
    async fn test_cash_book_merges_loads() {
        let body = json!([worked_example(), worked_example()]);
        let (status, body) = post_json("/api/v1/ledger/cash-book", &body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"].as_f64(), Some(10000.0));
    }

    #[tokio::test]
    async fn test_negative_amount_is_unprocessable() {
        let mut body = worked_example();
        body["expenses"][0]["amount"] = json!("-5");
        let (status, body) = post_json("/api/v1/ledger/settlement", &body).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], 422);
    }

    #[tokio::test]
    async fn test_dust_freight_is_rejected_before_computing() {
        let mut body = worked_example();
        body["load"]["providerFreight"] = json!("0.0000000000000001");
        body["transactions"][0]["amount"] = json!("1000000000000");
        let (status, body) = post_json("/api/v1/ledger/workflow", &body).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"]["message"]
            .as_str()
            .is_some_and(|m| m.contains("load.providerFreight")));
    }

    #[tokio::test]
    async fn test_non_numeric_amount_is_bad_request() {
        let mut body = worked_example();
        body["transactions"][0]["amount"] = json!("lots");
        let (status, body) = post_json("/api/v1/ledger/settlement", &body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], 400);
    }

    #[tokio::test]
    async fn test_healthz() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/healthz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
