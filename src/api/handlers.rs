//! API handlers

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::api::AppState;
use crate::catalog::validate_item;
use crate::query::{HealthReport, Summary, SummaryParams, TopHeatDays, TopHeatDaysParams};
use crate::types::{Item, ItemId};
use crate::Error;

type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

fn reject(err: Error) -> (StatusCode, String) {
    let status = err.status_code();
    if status.is_server_error() {
        tracing::error!(error = %err, "Request failed");
    } else {
        tracing::debug!(error = %err, %status, "Request rejected");
    }
    (status, err.to_string())
}

fn query_params<T>(params: Result<Query<T>, QueryRejection>) -> Result<T, (StatusCode, String)> {
    params
        .map(|Query(p)| p)
        .map_err(|e| reject(Error::invalid_request(e.body_text())))
}

fn item_body(body: Result<Json<Item>, JsonRejection>) -> Result<Item, (StatusCode, String)> {
    let Json(item) = body.map_err(|e| reject(Error::invalid_request(e.body_text())))?;
    validate_item(&item).map_err(reject)?;
    Ok(item)
}

/// Row count and year coverage of the loaded table
pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    Json(state.query.health())
}

/// Summary statistics, optionally restricted to one year
pub async fn summary(
    State(state): State<AppState>,
    params: Result<Query<SummaryParams>, QueryRejection>,
) -> ApiResult<Summary> {
    let params = query_params(params)?;

    state
        .query
        .summary(params.year, params.threshold)
        .map(Json)
        .map_err(reject)
}

/// Hottest `k` days, optionally restricted to one year
pub async fn top_heat_days(
    State(state): State<AppState>,
    params: Result<Query<TopHeatDaysParams>, QueryRejection>,
) -> ApiResult<TopHeatDays> {
    let params = query_params(params)?;

    state
        .query
        .top_heat_days(params.year, params.k)
        .map(Json)
        .map_err(reject)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HelloResponse {
    pub message: String,
}

pub async fn hello() -> Json<HelloResponse> {
    Json(HelloResponse {
        message: "안녕, API!".to_string(),
    })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EchoResponse {
    pub you_sent: Value,
}

/// Return the request body unchanged
pub async fn echo(body: Result<Json<Value>, JsonRejection>) -> ApiResult<EchoResponse> {
    let Json(you_sent) = body.map_err(|e| reject(Error::invalid_request(e.body_text())))?;
    Ok(Json(EchoResponse { you_sent }))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ItemResponse {
    pub msg: String,
    pub item: Item,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub msg: String,
}

pub async fn list_items(State(state): State<AppState>) -> ApiResult<BTreeMap<ItemId, Item>> {
    state.items.list().await.map(Json).map_err(reject)
}

pub async fn get_item(State(state): State<AppState>, Path(id): Path<ItemId>) -> ApiResult<Item> {
    state.items.get(id).await.map(Json).map_err(reject)
}

pub async fn create_item(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
    body: Result<Json<Item>, JsonRejection>,
) -> ApiResult<ItemResponse> {
    let item = item_body(body)?;
    let item = state.items.create(id, item).await.map_err(reject)?;
    tracing::info!(id, name = %item.name, "Item created");

    Ok(Json(ItemResponse {
        msg: "created".to_string(),
        item,
    }))
}

pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
    body: Result<Json<Item>, JsonRejection>,
) -> ApiResult<ItemResponse> {
    let item = item_body(body)?;
    let item = state.items.update(id, item).await.map_err(reject)?;
    tracing::info!(id, name = %item.name, "Item updated");

    Ok(Json(ItemResponse {
        msg: "updated".to_string(),
        item,
    }))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
) -> ApiResult<MessageResponse> {
    state.items.delete(id).await.map_err(reject)?;
    tracing::info!(id, "Item deleted");

    Ok(Json(MessageResponse {
        msg: "deleted".to_string(),
    }))
}
