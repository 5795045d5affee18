use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use wt_core::{Error, Result};

use crate::Config;

pub mod dummy;
pub mod patterns;

pub use dummy::DummyModel;
pub use patterns::PatternModel;

#[async_trait]
pub trait ContentRiskModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Probability in [0, 1] that the text was machine generated
    async fn estimate_risk(&self, text: &str) -> Result<f64>;
}

pub fn create_model(config: Option<Config>) -> Result<Arc<dyn ContentRiskModel>> {
    let config = config.unwrap_or_default();
    match config.model_name.as_deref().unwrap_or("patterns") {
        "patterns" => Ok(Arc::new(PatternModel::new())),
        "dummy" => Ok(Arc::new(DummyModel::new())),
        other => Err(Error::Inference(format!(
            "Unknown model: {}. Available models: patterns (default), dummy",
            other
        ))),
    }
}
