#![allow(clippy::expect_used, clippy::unwrap_used, dead_code)]

use assert_cmd::Command;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

/// Create an isolated `searchdocs` command: its own cache and config dirs,
/// no colors and no inherited docs URL or browser.
pub fn searchdocs_cmd(cache_dir: &Path, config_dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("searchdocs"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env("SEARCHDOCS_CACHE_DIR", cache_dir);
    cmd.env("SEARCHDOCS_CONFIG_DIR", config_dir);
    cmd.env_remove("SEARCHDOCS_DOCS_URL");
    cmd.env_remove("BROWSER");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// A Sphinx v2 inventory with a handful of Python-shaped records.
pub fn python_inventory() -> Vec<u8> {
    inventory(&[
        "difflib py:module 0 library/difflib.html#module-$ -",
        "difflib.get_close_matches py:function 1 library/difflib.html#$ -",
        "dict py:class 1 library/stdtypes.html#$ -",
        "typing.Dict py:data 1 library/typing.html#$ -",
        "decimal py:module 0 library/decimal.html#module-$ -",
    ])
}

pub fn inventory(records: &[&str]) -> Vec<u8> {
    let mut blob = b"# Sphinx inventory version 2\n\
        # Project: Python\n\
        # Version: 3.13\n\
        # The remainder of this file is compressed using zlib.\n"
        .to_vec();
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    for record in records {
        writeln!(encoder, "{record}").unwrap();
    }
    blob.extend(encoder.finish().unwrap());
    blob
}

/// Serves `body` as `/3/objects.inv` (with an `ETag`) under a `/3/` base.
pub async fn serve_inventory(server: &MockServer, body: Vec<u8>) {
    Mock::given(method("HEAD"))
        .and(path("/3/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/3/objects.inv"))
        .respond_with(ResponseTemplate::new(200).insert_header("etag", "\"inv-1\""))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/3/objects.inv"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("etag", "\"inv-1\"")
                .set_body_bytes(body),
        )
        .mount(server)
        .await;
}
