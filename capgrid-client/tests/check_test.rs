//! Integrity check and repair requests
//!
//! Run with: cargo test --test check_test -p capgrid-client

mod common;

use capgrid_client::{CheckOptions, GridError, RepairOutcome};
use common::*;
use mockito::Matcher;

fn check_path(cap: &str, query: &str) -> String {
    format!("/uri/{}?{}", cap, query)
}

#[tokio::test]
async fn test_check_returns_results() {
    let mut server = mockito::Server::new_async().await;
    let dir = writeable_root(&server);
    let check = server
        .mock(
            "POST",
            check_path(ROOT_RW, "t=check&verify=false&add-lease=false&output=JSON").as_str(),
        )
        .with_status(200)
        .with_body(r#"{"storage-index": "abc", "results": {"healthy": true, "count-shares-good": 10}}"#)
        .expect(1)
        .create_async()
        .await;

    let results = dir.check(CheckOptions::default()).await.unwrap();
    assert_eq!(results["healthy"], true);
    assert_eq!(results["count-shares-good"], 10);

    check.assert_async().await;
}

#[tokio::test]
async fn test_check_passes_flags() {
    let mut server = mockito::Server::new_async().await;
    let dir = writeable_root(&server);
    let check = server
        .mock(
            "POST",
            check_path(ROOT_RW, "t=check&verify=true&add-lease=true&output=JSON").as_str(),
        )
        .with_status(200)
        .with_body(r#"{"results": {"healthy": false}}"#)
        .expect(1)
        .create_async()
        .await;

    let options = CheckOptions::default().verify(true).add_lease(true);
    let results = dir.check(options).await.unwrap();
    assert_eq!(results["healthy"], false);

    check.assert_async().await;
}

#[tokio::test]
async fn test_healthy() {
    let mut server = mockito::Server::new_async().await;
    let dir = read_only_root(&server);
    server
        .mock(
            "POST",
            check_path(ROOT_RO, "t=check&verify=false&add-lease=false&output=JSON").as_str(),
        )
        .with_status(200)
        .with_body(r#"{"results": {"healthy": true}}"#)
        .create_async()
        .await;

    assert!(dir.healthy().await.unwrap());
}

#[tokio::test]
async fn test_check_without_results_is_protocol_error() {
    let mut server = mockito::Server::new_async().await;
    let dir = writeable_root(&server);
    server
        .mock("POST", Matcher::Any)
        .with_status(200)
        .with_body(r#"{"summary": "Healthy"}"#)
        .create_async()
        .await;

    let err = dir.check(CheckOptions::default()).await.unwrap_err();
    assert!(matches!(err, GridError::Protocol(_)), "unexpected error: {err}");
}

#[tokio::test]
async fn test_repair_outcomes() {
    let query = "t=check&repair=true&verify=false&add-lease=false&output=JSON";
    let cases = [
        (r#"{"repair-attempted": false}"#, RepairOutcome::NotAttempted),
        (
            r#"{"repair-attempted": true, "repair-successful": true}"#,
            RepairOutcome::Succeeded,
        ),
        (
            r#"{"repair-attempted": true, "repair-successful": false}"#,
            RepairOutcome::Failed,
        ),
    ];

    for (body, expected) in cases {
        let mut server = mockito::Server::new_async().await;
        let dir = writeable_root(&server);
        let repair = server
            .mock("POST", check_path(ROOT_RW, query).as_str())
            .with_status(200)
            .with_body(body)
            .expect(1)
            .create_async()
            .await;

        let outcome = dir.repair(CheckOptions::default()).await.unwrap();
        assert_eq!(outcome, expected, "body: {body}");

        repair.assert_async().await;
    }
}

#[tokio::test]
async fn test_check_failure_is_api_error() {
    let mut server = mockito::Server::new_async().await;
    let dir = writeable_root(&server);
    server
        .mock("POST", Matcher::Any)
        .with_status(500)
        .with_body("checker crashed")
        .create_async()
        .await;

    let err = dir.repair(CheckOptions::default()).await.unwrap_err();
    assert!(
        matches!(err, GridError::Api { status: 500, .. }),
        "unexpected error: {err}"
    );
}
