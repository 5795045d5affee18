use std::sync::Arc;

use wt_core::{AnalysisSource, Error, Result, SampleProvider, TrustReport};

use crate::bootstrap::PageShell;

pub struct AppState {
    pub source: Arc<dyn AnalysisSource>,
    pub fallback: Option<SampleProvider>,
    pub shell: Arc<PageShell>,
}

impl AppState {
    /// Falls back to the sample report when the live source is unreachable.
    pub fn new(source: Arc<dyn AnalysisSource>, shell: PageShell) -> Self {
        Self {
            source,
            fallback: Some(SampleProvider::new()),
            shell: Arc::new(shell),
        }
    }

    pub fn without_fallback(mut self) -> Self {
        self.fallback = None;
        self
    }

    pub async fn report(&self, title: &str) -> Result<TrustReport> {
        match self.source.analyze(title).await {
            Ok(report) => Ok(report),
            Err(e) if is_unreachable(&e) => match &self.fallback {
                Some(fallback) => {
                    tracing::warn!(
                        "⚠️ {} source unavailable for {:?} ({}), using {} data",
                        self.source.name(),
                        title,
                        e,
                        fallback.name()
                    );
                    fallback.analyze(title).await
                }
                None => Err(e),
            },
            Err(e) => Err(e),
        }
    }
}

/// Transport failures and server-side errors, as opposed to a bad title or
/// an inconsistent record.
pub fn is_unreachable(error: &Error) -> bool {
    match error {
        Error::Http(e) => {
            e.is_connect() || e.is_timeout() || e.status().map_or(false, |s| s.is_server_error())
        }
        Error::Io(_) => true,
        _ => false,
    }
}
