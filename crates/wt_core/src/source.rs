use async_trait::async_trait;
use crate::types::TrustReport;
use crate::Result;

#[async_trait]
pub trait AnalysisSource: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Analyze the article with the given title
    async fn analyze(&self, title: &str) -> Result<TrustReport>;
}
