use blockdb_common::operations::{sample_operations, OperationKind};
use blockdb_load_tester::{build_client, run_load};
use reqwest::Url;
use std::net::TcpListener;
use std::time::Duration;
use warp::http::StatusCode;
use warp::Filter;

/// Starts a warp server on an ephemeral port and yields its base URL.
macro_rules! serve {
    ($filter:expr) => {{
        let (addr, server) = warp::serve($filter).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);
        Url::parse(&format!("http://{addr}/")).unwrap()
    }};
}

/// A URL nothing is listening on.
fn dead_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}/")).unwrap()
}

#[tokio::test]
async fn test_all_samples_succeed_against_dummy_servers() {
    let urls = vec![
        serve!(blockdb_dummy_server::routes()),
        serve!(blockdb_dummy_server::routes()),
        serve!(blockdb_dummy_server::routes()),
    ];
    let client = build_client(Some(Duration::from_secs(10))).unwrap();

    let report = run_load(&client, &urls, 30, &sample_operations())
        .await
        .unwrap();

    assert_eq!(90, report.total);
    assert_eq!(90, report.successful());
    assert!(report.error_indices.is_empty());
    assert!(report.none_indices.is_empty());
}

#[tokio::test]
async fn test_errors_and_missing_responses_are_indexed() {
    let failing_increase = warp::path!("increase")
        .map(|| warp::reply::with_status("nope", StatusCode::INTERNAL_SERVER_ERROR))
        .or(blockdb_dummy_server::routes());
    let urls = vec![serve!(failing_increase), dead_url()];
    let client = build_client(Some(Duration::from_secs(10))).unwrap();
    let operations = sample_operations();

    let report = run_load(&client, &urls, 20, &operations).await.unwrap();

    // Even indices go to the live server, odd ones to the dead one.
    let expected_errors: Vec<usize> = (0..40)
        .step_by(2)
        .filter(|i| operations[i % operations.len()].kind() == OperationKind::Increase)
        .collect();
    let expected_none: Vec<usize> = (1..40).step_by(2).collect();

    assert_eq!(40, report.total);
    assert_eq!(expected_errors, report.error_indices);
    assert_eq!(expected_none, report.none_indices);
    assert_eq!(40 - expected_errors.len() - 20, report.successful());
}

#[tokio::test]
async fn test_slow_server_times_out_as_no_response() {
    let slow = warp::any().and_then(|| async {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok::<_, std::convert::Infallible>(warp::reply())
    });
    let urls = vec![serve!(slow)];
    let client = build_client(Some(Duration::from_millis(200))).unwrap();

    let report = run_load(&client, &urls, 3, &sample_operations())
        .await
        .unwrap();

    assert_eq!(vec![0, 1, 2], report.none_indices);
    assert_eq!(0, report.successful());
}
