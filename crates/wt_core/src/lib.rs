pub mod error;
pub mod sample;
pub mod source;
pub mod types;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;

pub use sample::{sample_analysis, sample_recommendations, sample_report, SampleProvider};
pub use source::AnalysisSource;
pub use types::{AnalysisRecord, ArticleAnalysis, RecommendationList, TrustReport, Violation};
