use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn search_response(titles: &[(&str, Option<&str>)]) -> ResponseTemplate {
    let nodes: Vec<_> = titles
        .iter()
        .enumerate()
        .map(|(i, (title, severity))| {
            json!({
                "id": format!("doc-{}", i),
                "severity_rating": severity,
                "report": {
                    "title": title,
                    "url": format!("https://hackerone.com/reports/{}", i),
                    "disclosed_at": null
                }
            })
        })
        .collect();
    ResponseTemplate::new(200).set_body_json(json!({
        "data": {"search": {"total_count": nodes.len(), "nodes": nodes}}
    }))
}

/// Missing -v is rejected by the argument grammar.
#[test]
fn test_no_args_shows_error() {
    cargo_bin_cmd!("hacktivity")
        .assert()
        .failure();
}

/// A zero count fails validation with exit code 1 before any request.
#[test]
fn test_zero_count_exits_1() {
    cargo_bin_cmd!("hacktivity")
        .args(&["-v", "XSS", "-n", "0", "--no-animation", "--endpoint", "http://127.0.0.1:9/graphql"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("must be greater than 0"));
}

#[test]
fn test_negative_count_exits_1() {
    cargo_bin_cmd!("hacktivity")
        .args(&["-v", "XSS", "-n", "-5", "--no-animation", "--endpoint", "http://127.0.0.1:9/graphql"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("must be greater than 0"));
}

#[test]
fn test_count_above_ceiling_exits_1() {
    cargo_bin_cmd!("hacktivity")
        .args(&["-v", "XSS", "-n", "3001", "--no-animation", "--endpoint", "http://127.0.0.1:9/graphql"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("3000"));
}

/// Counts wider than 64 bits still hit the range check, not a parse error.
#[test]
fn test_huge_count_reports_ceiling() {
    cargo_bin_cmd!("hacktivity")
        .args(&["-v", "XSS", "-n", "99999999999999999999", "--no-animation"])
        .args(&["--endpoint", "http://127.0.0.1:9/graphql"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("HackerOne API max is 3000"));
}

#[test]
fn test_huge_negative_count_exits_1() {
    cargo_bin_cmd!("hacktivity")
        .args(&["-v", "XSS", "-n", "-99999999999999999999", "--no-animation"])
        .args(&["--endpoint", "http://127.0.0.1:9/graphql"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("must be greater than 0"));
}

/// The banner is shown even when the argument grammar rejects the input.
#[test]
fn test_banner_precedes_usage_error() {
    cargo_bin_cmd!("hacktivity")
        .args(&["-n", "5", "--no-animation"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("[+] Connected!"))
        .stderr(predicate::str::contains("--vulnerability"));
}

/// Validation failures never reach the network.
#[tokio::test(flavor = "multi_thread")]
async fn test_invalid_count_sends_no_request() {
    let server = MockServer::start().await;
    let endpoint = format!("{}/graphql", server.uri());

    cargo_bin_cmd!("hacktivity")
        .args(&["-v", "XSS", "-n", "0", "--no-animation", "--endpoint", &endpoint])
        .assert()
        .code(1);

    assert!(server.received_requests().await.unwrap().is_empty());
}

/// With -o the records go to the file only.
#[tokio::test(flavor = "multi_thread")]
async fn test_explicit_output_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"variables": {"from": 0, "size": 3}})))
        .respond_with(search_response(&[
            ("Account takeover", Some("critical")),
            ("Reflected XSS, search page", None),
        ]))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("ato.csv");
    let out_str = out.to_str().unwrap().to_string();

    cargo_bin_cmd!("hacktivity")
        .args(&["-v", "Account", "Takeover", "-n", "3", "-o", &out_str, "--no-animation"])
        .args(&["--endpoint", &server.uri()])
        .assert()
        .success()
        .stdout(predicate::str::contains("[+] Connected!"))
        .stdout(predicate::str::contains("[#] Title:").not())
        .stdout(predicate::str::contains(format!(
            "[+] Saved 2 reports about 'Account Takeover' to {}",
            out_str
        )));

    assert_eq!(
        std::fs::read_to_string(&out).unwrap(),
        "Title,Severity,URL\r\n\
         Account takeover,critical,https://hackerone.com/reports/0\r\n\
         \"Reflected XSS, search page\",,https://hackerone.com/reports/1\r\n"
    );
}

/// Without -o the file name is derived from the category and records are echoed.
#[tokio::test(flavor = "multi_thread")]
async fn test_default_output_echoes_records() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"variables": {"from": 0, "size": 100}})))
        .respond_with(search_response(&[("Union-based SQLi", Some("High"))]))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();

    cargo_bin_cmd!("hacktivity")
        .current_dir(dir.path())
        .args(&["-v", "SQL", "Injection", "--no-animation", "--endpoint", &server.uri()])
        .assert()
        .success()
        .stdout(predicate::str::contains("[#] Title: Union-based SQLi"))
        .stdout(predicate::str::contains("Severity: High"))
        .stdout(predicate::str::contains("URL: https://hackerone.com/reports/0"))
        .stdout(predicate::str::contains(
            "[+] Saved 1 reports about 'SQL Injection' to SQL_Injection.csv",
        ));

    let written = std::fs::read_to_string(dir.path().join("SQL_Injection.csv")).unwrap();
    assert!(written.starts_with("Title,Severity,URL\r\n"));
    assert!(written.contains("Union-based SQLi,High,https://hackerone.com/reports/0"));
}

/// Server failures surface as exit code 1 and leave no output file.
#[tokio::test(flavor = "multi_thread")]
async fn test_server_error_exits_1() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("x.csv");

    cargo_bin_cmd!("hacktivity")
        .args(&["-v", "XSS", "-o", out.to_str().unwrap(), "--no-animation"])
        .args(&["--endpoint", &server.uri()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("[!]"));

    assert!(!out.exists());
}
