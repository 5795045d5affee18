use wt_core::Result;

use super::ContentRiskModel;

/// Always reports zero risk.
#[derive(Debug, Clone, Default)]
pub struct DummyModel;

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl ContentRiskModel for DummyModel {
    fn name(&self) -> &str {
        "dummy"
    }

    async fn estimate_risk(&self, _text: &str) -> Result<f64> {
        Ok(0.0)
    }
}
