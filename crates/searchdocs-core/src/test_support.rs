//! In-memory [`Transport`] double for unit tests.

use crate::transport::{Response, Transport};
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use url::Url;

#[derive(Default)]
struct State {
    redirects: HashMap<String, String>,
    resources: HashMap<String, (Option<String>, Vec<u8>)>,
    heads: usize,
    gets: usize,
    offline: bool,
}

/// Serves registered resources, follows registered redirects and counts
/// requests. Unknown directory URLs answer `HEAD` with 200; everything else
/// unknown is a 404.
#[derive(Default)]
pub struct MockTransport {
    state: Mutex<State>,
}

#[allow(clippy::unwrap_used)]
impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn redirect(&self, from: &str, to: &str) {
        let mut state = self.state.lock().unwrap();
        state.redirects.insert(from.to_string(), to.to_string());
    }

    pub fn serve(&self, url: &str, etag: Option<&str>, body: Vec<u8>) {
        let mut state = self.state.lock().unwrap();
        state
            .resources
            .insert(url.to_string(), (etag.map(str::to_string), body));
    }

    pub fn set_offline(&self, offline: bool) {
        self.state.lock().unwrap().offline = offline;
    }

    pub fn heads(&self) -> usize {
        self.state.lock().unwrap().heads
    }

    pub fn gets(&self) -> usize {
        self.state.lock().unwrap().gets
    }

    fn respond(&self, url: &Url, with_body: bool) -> Result<Response> {
        let mut state = self.state.lock().unwrap();
        if state.offline {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                format!("offline: {url}"),
            )));
        }
        if with_body {
            state.gets += 1;
        } else {
            state.heads += 1;
        }

        let mut current = url.to_string();
        for _ in 0..10 {
            match state.redirects.get(&current) {
                Some(next) => current = next.clone(),
                None => break,
            }
        }
        let final_url = Url::parse(&current)?;

        match state.resources.get(&current) {
            Some((etag, body)) => Ok(Response {
                url: final_url,
                status: 200,
                etag: etag.clone(),
                body: if with_body { body.clone() } else { Vec::new() },
            }),
            None if !with_body && current.ends_with('/') => Ok(Response {
                url: final_url,
                status: 200,
                etag: None,
                body: Vec::new(),
            }),
            None => Err(Error::HttpStatus {
                url: current,
                status: 404,
            }),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn head(&self, url: &Url) -> Result<Response> {
        self.respond(url, false)
    }

    async fn get(&self, url: &Url) -> Result<Response> {
        self.respond(url, true)
    }
}
