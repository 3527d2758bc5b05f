//! Handler functions
//!
//! Each one accepts a well-formed body for its endpoint and answers
//! with a fixed reply. Nothing is stored.

use blockdb_common::operations::{BatchBody, IncreaseBody, SetBody, UpdateBody};
use serde_json::json;
use std::convert::Infallible;
use warp::http::StatusCode;
use warp::Reply;

/// The `set` handler
///
/// POST /set; 201 `{"code": 0}`
pub async fn set(body: SetBody) -> Result<impl Reply, Infallible> {
    log::debug!("set; ref = {}", body.reference);

    Ok(warp::reply::with_status(
        warp::reply::json(&json!({"code": 0})),
        StatusCode::CREATED,
    ))
}

/// The `update` handler
///
/// POST /update; 201 `{"code": 0, "result": "result"}`
pub async fn update(body: UpdateBody) -> Result<impl Reply, Infallible> {
    log::debug!("update; refs = {:?}", body.data.keys().collect::<Vec<_>>());

    Ok(warp::reply::with_status(
        warp::reply::json(&json!({"code": 0, "result": "result"})),
        StatusCode::CREATED,
    ))
}

/// The `batch` handler
///
/// POST /batch; 200 `[]`
pub async fn batch(body: BatchBody) -> Result<impl Reply, Infallible> {
    log::debug!("batch; {} entries", body.batch_list.len());

    Ok(warp::reply::with_status(
        warp::reply::json(&json!([])),
        StatusCode::OK,
    ))
}

/// The `increase` handler
///
/// POST /increase; 200 `{"code": 0, "result": "something"}`
pub async fn increase(body: IncreaseBody) -> Result<impl Reply, Infallible> {
    log::debug!("increase; diff = {:?}", body.diff);

    Ok(warp::reply::with_status(
        warp::reply::json(&json!({"code": 0, "result": "something"})),
        StatusCode::OK,
    ))
}
