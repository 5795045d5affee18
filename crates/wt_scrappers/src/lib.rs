pub mod analyzer;
pub mod cli;
pub mod logging;
pub mod probe;
pub mod recommend;
pub mod signals;
pub mod wiki;

pub use analyzer::WikiAnalyzer;
pub use cli::SourceArgs;
pub use probe::{LinkProber, ProbeConfig};
pub use wiki::{WikiClient, WikiConfig};

pub mod prelude {
    pub use super::analyzer::WikiAnalyzer;
    pub use super::recommend::recommend;
    pub use wt_core::{AnalysisSource, ArticleAnalysis, Error, Result, TrustReport};
}
