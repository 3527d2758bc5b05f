//! A stand-in for the database service's write endpoints.
//!
//! Useful for exercising the load tester without a running node.

pub mod errors;
pub mod handlers;

use std::convert::Infallible;
use warp::{Filter, Reply};

/// Largest request body accepted, in bytes.
pub const BODY_LIMIT: u64 = 1024 * 16;

/// **All routes, with rejections turned into JSON error replies**
pub fn routes() -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let set = warp::path!("set")
        .and(warp::post())
        .and(warp::body::content_length_limit(BODY_LIMIT))
        .and(warp::body::json())
        .and_then(handlers::set);

    let update = warp::path!("update")
        .and(warp::post())
        .and(warp::body::content_length_limit(BODY_LIMIT))
        .and(warp::body::json())
        .and_then(handlers::update);

    let batch = warp::path!("batch")
        .and(warp::post())
        .and(warp::body::content_length_limit(BODY_LIMIT))
        .and(warp::body::json())
        .and_then(handlers::batch);

    let increase = warp::path!("increase")
        .and(warp::post())
        .and(warp::body::content_length_limit(BODY_LIMIT))
        .and(warp::body::json())
        .and_then(handlers::increase);

    set.or(update)
        .or(batch)
        .or(increase)
        .recover(errors::handle_rejection)
        .with(warp::log("blockdb::dummy_server"))
}

#[cfg(test)]
mod tests {
    use super::routes;
    use blockdb_common::operations::sample_operations;
    use serde_json::{json, Value};
    use warp::http::StatusCode;

    #[tokio::test]
    async fn test_every_sample_operation_is_accepted() {
        let api = routes();

        for op in sample_operations() {
            let response = warp::test::request()
                .method("POST")
                .path(&format!("/{}", op.path()))
                .json(&op)
                .reply(&api)
                .await;

            assert!(response.status().is_success(), "{}", op.path());
        }
    }

    #[tokio::test]
    async fn test_fixed_replies() {
        let api = routes();

        let response = warp::test::request()
            .method("POST")
            .path("/set")
            .json(&json!({"ref": "test/a", "value": 1}))
            .reply(&api)
            .await;
        assert_eq!(StatusCode::CREATED, response.status());
        assert_eq!(
            json!({"code": 0}),
            serde_json::from_slice::<Value>(response.body()).unwrap()
        );

        let response = warp::test::request()
            .method("POST")
            .path("/batch")
            .json(&json!({"batch_list": []}))
            .reply(&api)
            .await;
        assert_eq!(StatusCode::OK, response.status());
        assert_eq!(
            json!([]),
            serde_json::from_slice::<Value>(response.body()).unwrap()
        );

        let response = warp::test::request()
            .method("POST")
            .path("/increase")
            .json(&json!({"diff": {"test/a": -3}}))
            .reply(&api)
            .await;
        assert_eq!(
            json!({"code": 0, "result": "something"}),
            serde_json::from_slice::<Value>(response.body()).unwrap()
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let response = warp::test::request()
            .method("POST")
            .path("/increase")
            .json(&json!({"diff": {"test/a": "not a number"}}))
            .reply(&routes())
            .await;

        assert_eq!(StatusCode::BAD_REQUEST, response.status());
        let body: Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(json!(1), body["code"]);
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let response = warp::test::request()
            .method("POST")
            .path("/delete")
            .json(&json!({}))
            .reply(&routes())
            .await;

        assert_eq!(StatusCode::NOT_FOUND, response.status());
    }

    #[tokio::test]
    async fn test_wrong_method_is_rejected() {
        let response = warp::test::request()
            .method("GET")
            .path("/set")
            .reply(&routes())
            .await;

        assert_eq!(StatusCode::METHOD_NOT_ALLOWED, response.status());
    }
}
