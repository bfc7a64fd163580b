//! Graph provider client.
//!
//! The provider supplies the graph wholesale at session start and on explicit
//! refresh. Retrieval failures are non-fatal: the kernel keeps the previously
//! loaded snapshot fully interactive and surfaces the error as a dismissible
//! notice.

use thiserror::Error;

use paper_graph_types::GraphSnapshot;

/// Errors from fetching a graph snapshot.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider returned HTTP {status}")]
    Http { status: u16 },

    #[error("malformed graph payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Source of graph snapshots.
///
/// Implemented by [`HttpGraphProvider`] in production and by in-memory stubs
/// in tests.
pub trait GraphProvider {
    fn fetch_graph(&self) -> Result<GraphSnapshot, RetrievalError>;
}

/// HTTP-backed provider against the paper-management server.
pub struct HttpGraphProvider {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpGraphProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl GraphProvider for HttpGraphProvider {
    fn fetch_graph(&self) -> Result<GraphSnapshot, RetrievalError> {
        let url = format!("{}/api/graph", self.base_url);
        let response = self.client.get(&url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(RetrievalError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.text()?;
        let snapshot = serde_json::from_str(&body)?;
        Ok(snapshot)
    }
}
