//! Integration tests for the search_code tool
//!
//! A mockito server stands in for Searchfox. These tests verify query string
//! construction, normalization of the returned payload and error reporting.

use mockito::Matcher;
use serde_json::json;

use searchfox_mcp::tools::error::ToolError;
use test_util::{arguments, create_test_tools, result_json};

fn definitions_payload() -> String {
    json!({
        "*title*": "Definitions of 'f'",
        "*timedout*": false,
        "normal": {
            "Definitions": [
                {"path": "a.cpp", "lines": [{"lno": 10, "line": "void f(){}", "bounds": [5, 6]}]}
            ]
        }
    })
    .to_string()
}

#[tokio::test]
async fn test_search_code_end_to_end() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/mozilla-central/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "void f".into()),
            Matcher::UrlEncoded("case".into(), "false".into()),
            Matcher::UrlEncoded("regexp".into(), "false".into()),
        ]))
        .match_header("accept", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(definitions_payload())
        .create_async()
        .await;

    let tools = create_test_tools(&server.url());
    let result = tools
        .call(
            "search_code",
            Some(arguments(json!({"query": "void f", "limit": 10}))),
        )
        .await
        .unwrap();

    mock.assert_async().await;

    let output = result_json(&result);
    assert_eq!(output["query"], "void f");
    assert_eq!(output["repo"], "mozilla-central");
    assert_eq!(output["count"], 1);
    assert_eq!(output["timedout"], false);
    assert_eq!(output["title"], "Definitions of 'f'");
    assert!(output.get("total_available").is_none());
    assert!(output.get("limits").is_none());
    assert_eq!(
        output["results"],
        json!([{
            "path": "a.cpp",
            "line": 10,
            "column": 5,
            "snippet": "void f(){}",
            "context": "normal: Definitions",
            "bounds": [5, 6]
        }])
    );
}

#[tokio::test]
async fn test_search_code_passes_options() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/comm-central/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "nsMsg\\w+".into()),
            Matcher::UrlEncoded("case".into(), "true".into()),
            Matcher::UrlEncoded("regexp".into(), "true".into()),
            Matcher::UrlEncoded("path".into(), "^mailnews/".into()),
        ]))
        .with_status(200)
        .with_body(json!({"*timedout*": true, "*limits*": ["Too many results"]}).to_string())
        .create_async()
        .await;

    let tools = create_test_tools(&server.url());
    let result = tools
        .call(
            "search_code",
            Some(arguments(json!({
                "query": "nsMsg\\w+",
                "repo": "comm-central",
                "path": "^mailnews/",
                "case": true,
                "regexp": true
            }))),
        )
        .await
        .unwrap();

    mock.assert_async().await;

    let output = result_json(&result);
    assert_eq!(output["count"], 0);
    assert_eq!(output["results"], json!([]));
    assert_eq!(output["timedout"], true);
    assert_eq!(output["limits"], json!(["Too many results"]));
    assert_eq!(
        output["total_available"],
        "Search timed out - more results may be available"
    );
}

#[tokio::test]
async fn test_search_code_applies_limit() {
    let lines: Vec<_> = (1..=20)
        .map(|lno| json!({"lno": lno, "line": format!("hit {}", lno)}))
        .collect();
    let body = json!({
        "Textual Occurrences": [{"path": "big.cpp", "lines": lines}],
        "normal": {"Uses": [{"path": "other.cpp", "lines": [{"lno": 1, "line": "x"}]}]}
    });

    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/mozilla-central/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(body.to_string())
        .create_async()
        .await;

    let tools = create_test_tools(&server.url());

    let capped = result_json(
        &tools
            .call("search_code", Some(arguments(json!({"query": "hit", "limit": 7}))))
            .await
            .unwrap(),
    );
    assert_eq!(capped["count"], 7);
    for result in capped["results"].as_array().unwrap() {
        assert_eq!(result["context"], "Textual Occurrences");
    }

    let unbounded = result_json(
        &tools
            .call("search_code", Some(arguments(json!({"query": "hit", "limit": 0}))))
            .await
            .unwrap(),
    );
    assert_eq!(unbounded["count"], 21);
    assert_eq!(unbounded["results"][20]["context"], "normal: Uses");
}

#[tokio::test]
async fn test_search_code_limit_keeps_trailing_diagnostics() {
    let body = json!({
        "Textual Occurrences": [{"path": "a.cpp", "lines": [
            {"lno": 1, "line": "one"},
            {"lno": 2, "line": "two"}
        ]}],
        "*title*": "T",
        "*timedout*": true,
        "*limits*": ["L"]
    });

    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/mozilla-central/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(body.to_string())
        .create_async()
        .await;

    let tools = create_test_tools(&server.url());
    let output = result_json(
        &tools
            .call("search_code", Some(arguments(json!({"query": "o", "limit": 1}))))
            .await
            .unwrap(),
    );

    assert_eq!(output["count"], 1);
    assert_eq!(output["results"][0]["snippet"], "one");
    assert_eq!(output["title"], "T");
    assert_eq!(output["timedout"], true);
    assert_eq!(output["limits"], json!(["L"]));
    assert_eq!(
        output["total_available"],
        "Search timed out - more results may be available"
    );
}

#[tokio::test]
async fn test_search_code_upstream_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/mozilla-central/search")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let tools = create_test_tools(&server.url());
    let error = tools
        .call("search_code", Some(arguments(json!({"query": "nsIFoo"}))))
        .await
        .unwrap_err();

    match error {
        ToolError::UpstreamSearchFailure(details) => assert!(details.contains("HTTP 500")),
        other => panic!("expected UpstreamSearchFailure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_search_code_invalid_json_is_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/mozilla-central/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let tools = create_test_tools(&server.url());
    let error = tools
        .call("search_code", Some(arguments(json!({"query": "nsIFoo"}))))
        .await
        .unwrap_err();

    assert!(matches!(error, ToolError::UpstreamSearchFailure(_)));
}

#[tokio::test]
async fn test_invalid_calls_never_reach_upstream() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let tools = create_test_tools(&server.url());

    let error = tools.call("search_code", None).await.unwrap_err();
    assert!(matches!(error, ToolError::InvalidInput(msg) if msg == "Missing arguments"));

    let error = tools
        .call("search_code", Some(arguments(json!({"query": 42}))))
        .await
        .unwrap_err();
    assert!(matches!(error, ToolError::InvalidInput(_)));

    let error = tools
        .call("blame", Some(arguments(json!({"query": "x"}))))
        .await
        .unwrap_err();
    assert!(matches!(error, ToolError::UnknownOperation(name) if name == "blame"));

    mock.assert_async().await;
}
