//! Decoder for Sphinx `objects.inv` inventories (format version 2).
//!
//! ```text
//! # Sphinx inventory version 2
//! # Project: Python
//! # Version: 3.13
//! # The remainder of this file is compressed using zlib.
//! <zlib stream of "name domain:role priority uri display_name" lines>
//! ```

use crate::{Error, Result};
use flate2::read::ZlibDecoder;
use regex::Regex;
use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

const VERSION_2_HEADER: &str = "# Sphinx inventory version 2";
const PROJECT_PREFIX: &str = "# Project:";
const VERSION_PREFIX: &str = "# Version:";

/// One documented object from an inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentedObject {
    /// Fully qualified name, e.g. `difflib.get_close_matches`
    pub name: String,
    /// Sphinx domain, e.g. `py` or `std`
    pub domain: String,
    /// Object role within the domain, e.g. `function`, `class`, `label`
    pub role: String,
    /// Search priority as declared by the inventory
    pub priority: i32,
    /// URI relative to the documentation root, possibly ending in `$`
    pub uri: String,
    /// Display name; `-` in the inventory is already expanded to `name`
    pub display_name: String,
}

impl DocumentedObject {
    /// URI with the trailing `$` shorthand replaced by the object name.
    #[must_use]
    pub fn uri_expanded(&self) -> String {
        self.uri.strip_suffix('$').map_or_else(
            || self.uri.clone(),
            |prefix| format!("{prefix}{}", self.name),
        )
    }

    /// `domain:role`, as written in the inventory.
    #[must_use]
    pub fn domain_role(&self) -> String {
        format!("{}:{}", self.domain, self.role)
    }
}

/// A decoded inventory: metadata plus objects in inventory order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    /// Project name from the header
    pub project: String,
    /// Project version from the header
    pub version: String,
    /// Objects in the order they appear in the inventory
    pub objects: Vec<DocumentedObject>,
}

impl Inventory {
    /// Decodes the inventory blob at `path`.
    pub fn decode(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Decodes an in-memory inventory blob.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut rest = bytes;

        let header = take_line(&mut rest)?;
        if header != VERSION_2_HEADER {
            return Err(Error::Format(format!(
                "unsupported inventory header: {header:?}"
            )));
        }

        let project = header_value(take_line(&mut rest)?, PROJECT_PREFIX)?;
        let version = header_value(take_line(&mut rest)?, VERSION_PREFIX)?;

        let compression = take_line(&mut rest)?;
        if !compression.contains("zlib") {
            return Err(Error::Format(format!(
                "expected zlib compression marker, found {compression:?}"
            )));
        }

        let mut body = String::new();
        ZlibDecoder::new(rest)
            .read_to_string(&mut body)
            .map_err(|e| Error::Format(format!("corrupt inventory body: {e}")))?;

        let objects = parse_records(&body);
        debug!(
            project,
            version,
            objects = objects.len(),
            "decoded inventory"
        );

        Ok(Self {
            project,
            version,
            objects,
        })
    }

    /// Number of objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the inventory has no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Object at an inventory index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&DocumentedObject> {
        self.objects.get(index)
    }
}

fn record_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // name may contain spaces (std:label entries), so it is matched lazily
        // up to the first `domain:role` token.
        #[allow(clippy::expect_used)]
        Regex::new(r"^(.+?)\s+(\S+?):(\S+)\s+(-?\d+)\s+(\S*)\s+(.*)$")
            .expect("record pattern is valid")
    })
}

fn parse_records(body: &str) -> Vec<DocumentedObject> {
    let pattern = record_pattern();
    let mut objects = Vec::new();

    for line in body.lines() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let Some(caps) = pattern.captures(line) else {
            debug!(line, "skipping malformed inventory record");
            continue;
        };
        let Ok(priority) = caps[4].parse::<i32>() else {
            debug!(line, "skipping inventory record with out-of-range priority");
            continue;
        };

        let name = caps[1].to_string();
        let display_name = match &caps[6] {
            "-" => name.clone(),
            other => other.to_string(),
        };

        objects.push(DocumentedObject {
            name,
            domain: caps[2].to_string(),
            role: caps[3].to_string(),
            priority,
            uri: caps[5].to_string(),
            display_name,
        });
    }

    objects
}

/// Splits one `\n`-terminated header line off the front of `rest`.
fn take_line<'a>(rest: &mut &'a [u8]) -> Result<&'a str> {
    let end = rest
        .iter()
        .position(|&b| b == b'\n')
        .ok_or_else(|| Error::Format("truncated inventory header".into()))?;
    let (line, tail) = rest.split_at(end);
    *rest = &tail[1..];

    std::str::from_utf8(line)
        .map(|s| s.trim_end_matches('\r'))
        .map_err(|_| Error::Format("inventory header is not UTF-8".into()))
}

fn header_value(line: &str, prefix: &str) -> Result<String> {
    line.strip_prefix(prefix)
        .map(|value| value.trim().to_string())
        .ok_or_else(|| Error::Format(format!("expected {prefix:?} header line, found {line:?}")))
}
