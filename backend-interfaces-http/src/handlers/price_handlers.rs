use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use backend_application::queries::price_queries::{self, PriceView};
use backend_application::AppState;
use backend_domain::{ItemKind, PriceGroupView, PriceQuery};

use crate::error::HttpError;
use crate::middleware::authorize;

#[derive(Serialize)]
struct PriceBoardBody {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<ItemKind>,
    groups: Vec<PriceGroupView>,
}

pub async fn list_prices(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PriceQuery>,
) -> Result<Response, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let response = match price_queries::price_board(&state, query).await? {
        PriceView::Ready { kind, groups } => (
            StatusCode::OK,
            Json(PriceBoardBody {
                status: "ok",
                kind: Some(kind),
                groups,
            }),
        )
            .into_response(),
        PriceView::Unavailable => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(PriceBoardBody {
                status: "error",
                kind: None,
                groups: Vec::new(),
            }),
        )
            .into_response(),
    };
    Ok(response)
}
