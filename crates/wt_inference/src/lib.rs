use serde::{Deserialize, Serialize};

pub mod explanation;
pub mod models;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub model_name: Option<String>,
}

pub mod prelude {
    pub use super::Config;
    pub use super::explanation::{explain, RiskBand, Signals};
    pub use super::models::{create_model, ContentRiskModel};
    pub use wt_core::{Error, Result};
}

pub use explanation::{explain, RiskBand, Signals};
pub use models::{create_model, ContentRiskModel};

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_inference_pipeline() {
        let model = create_model(None).unwrap();
        let text = "In conclusion, it is important to note that Nairobi is a city.";
        let risk = model.estimate_risk(text).await.unwrap();
        let explanation = explain(&Signals {
            ai_content_risk: risk,
            ..Signals::default()
        });
        assert_eq!(risk, 0.5);
        assert!(explanation.ends_with("Text shows a moderate risk of AI-generated patterns."));
    }
}
