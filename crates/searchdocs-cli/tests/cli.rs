#![allow(
    missing_docs,
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]

mod common;

use common::{python_inventory, searchdocs_cmd, serve_inventory};
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Env {
    cache: TempDir,
    config: TempDir,
}

impl Env {
    fn new() -> Self {
        Self {
            cache: TempDir::new().unwrap(),
            config: TempDir::new().unwrap(),
        }
    }

    fn cmd(&self) -> assert_cmd::Command {
        searchdocs_cmd(self.cache.path(), self.config.path())
    }
}

async fn python_docs() -> (MockServer, String) {
    let server = MockServer::start().await;
    serve_inventory(&server, python_inventory()).await;
    let docs = format!("{}/3/", server.uri());
    (server, docs)
}

#[tokio::test(flavor = "multi_thread")]
async fn prints_url_of_exact_match() {
    let (server, docs) = python_docs().await;
    let env = Env::new();

    env.cmd()
        .args(["--docs-url", docs.as_str(), "dict"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "{}/3/library/stdtypes.html#dict\n",
            server.uri()
        )));
}

#[tokio::test(flavor = "multi_thread")]
async fn tolerates_typos() {
    let (server, docs) = python_docs().await;
    let env = Env::new();

    env.cmd()
        .args(["--docs-url", docs.as_str(), "difflib.get_clos_matches"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "{}/3/library/difflib.html#difflib.get_close_matches\n",
            server.uri()
        )));
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_symbol_exits_with_not_found() {
    let (_server, docs) = python_docs().await;
    let env = Env::new();

    env.cmd()
        .args(["--docs-url", docs.as_str(), "NoSuchSymbolXYZ123"])
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "error: Object NoSuchSymbolXYZ123 not found.",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn threshold_flag_filters_weak_matches() {
    let (_server, docs) = python_docs().await;
    let env = Env::new();

    // "dict " scores 89 against "dict".
    env.cmd()
        .args(["--docs-url", docs.as_str(), "--threshold", "90", "dict "])
        .assert()
        .code(3);

    env.cmd()
        .args(["--docs-url", docs.as_str(), "--threshold", "89", "dict "])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("/3/library/stdtypes.html#dict\n"));
}

#[tokio::test(flavor = "multi_thread")]
async fn docs_url_from_environment() {
    let (_server, docs) = python_docs().await;
    let env = Env::new();

    env.cmd()
        .env("SEARCHDOCS_DOCS_URL", &docs)
        .arg("typing.Dict")
        .assert()
        .success()
        .stdout(predicate::str::ends_with(
            "/3/library/typing.html#typing.Dict\n",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn docs_url_and_threshold_from_config_file() {
    let (_server, docs) = python_docs().await;
    let env = Env::new();
    std::fs::write(
        env.config.path().join("config.toml"),
        format!("[defaults]\ndocs_url = \"{docs}\"\nthreshold = 95\n"),
    )
    .unwrap();

    env.cmd()
        .arg("Decimal")
        .assert()
        .code(3);

    env.cmd()
        .args(["--threshold", "80", "Decimal"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with(
            "/3/library/decimal.html#module-decimal\n",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn repeated_lookup_downloads_inventory_once() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/3/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/3/objects.inv"))
        .respond_with(ResponseTemplate::new(200).insert_header("etag", "\"inv-1\""))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/3/objects.inv"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("etag", "\"inv-1\"")
                .set_body_bytes(python_inventory()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let env = Env::new();
    let docs = format!("{}/3/", server.uri());
    for _ in 0..2 {
        env.cmd()
            .args(["--docs-url", docs.as_str(), "dict"])
            .assert()
            .success()
            .stdout(predicate::str::ends_with("/3/library/stdtypes.html#dict\n"));
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn corrupt_inventory_exits_with_integrity_error() {
    let server = MockServer::start().await;
    serve_inventory(&server, b"<html>not an inventory</html>".to_vec()).await;
    let env = Env::new();

    env.cmd()
        .args(["--docs-url", format!("{}/3/", server.uri()).as_str(), "dict"])
        .assert()
        .code(7)
        .stderr(predicate::str::contains("error:"));
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_inventory_exits_with_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/3/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    let env = Env::new();

    env.cmd()
        .args(["--docs-url", format!("{}/3/", server.uri()).as_str(), "dict"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("404"));
}

#[test]
fn unreachable_host_exits_with_network_error() {
    let env = Env::new();

    env.cmd()
        .args(["--docs-url", "http://127.0.0.1:9/", "dict"])
        .assert()
        .code(5);
}

#[test]
fn invalid_docs_url_is_a_usage_error() {
    let env = Env::new();

    env.cmd()
        .args(["--docs-url", "not a url", "dict"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not a url"));
}

#[test]
fn out_of_range_threshold_is_rejected() {
    let env = Env::new();

    env.cmd()
        .args(["--threshold", "101", "dict"])
        .assert()
        .code(2);
}

#[test]
fn search_term_is_required() {
    let env = Env::new();

    env.cmd().assert().code(2).stderr(predicate::str::contains("SEARCH_TERM"));
}

#[cfg(unix)]
#[tokio::test(flavor = "multi_thread")]
async fn browser_flag_opens_instead_of_printing() {
    let (_server, docs) = python_docs().await;
    let env = Env::new();

    env.cmd()
        .env("BROWSER", "true")
        .args(["--docs-url", docs.as_str(), "--browser", "dict"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    env.cmd()
        .env("BROWSER", "false")
        .args(["--docs-url", docs.as_str(), "--browser", "dict"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to open"));
}
