use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use wt_core::{AnalysisSource, Result, SampleProvider};

use crate::analyzer::WikiAnalyzer;
use crate::probe::ProbeConfig;
use crate::wiki::{WikiConfig, DEFAULT_WIKI};

/// Options shared by every command that needs an analysis source.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Base URL of the MediaWiki site to analyze
    #[arg(long, global = true, default_value = DEFAULT_WIKI)]
    pub wiki: String,
    /// How many external links get probed for breakage
    #[arg(long, global = true, default_value_t = 15)]
    pub probe_limit: usize,
    /// Per-link probe timeout in seconds
    #[arg(long, global = true, default_value_t = 8)]
    pub probe_timeout: u64,
    /// Risk model. Available models: patterns (default), dummy
    #[arg(long, global = true, default_value = "patterns")]
    pub model: String,
    /// Never contact the wiki, serve the sample analysis instead
    #[arg(long, global = true)]
    pub offline: bool,
}

impl SourceArgs {
    pub fn wiki_config(&self) -> WikiConfig {
        WikiConfig {
            base_url: self.wiki.clone(),
            ..WikiConfig::default()
        }
    }

    pub fn probe_config(&self) -> ProbeConfig {
        ProbeConfig {
            limit: self.probe_limit,
            timeout: Duration::from_secs(self.probe_timeout),
            ..ProbeConfig::default()
        }
    }

    pub fn inference_config(&self) -> wt_inference::Config {
        wt_inference::Config {
            model_name: Some(self.model.clone()),
        }
    }

    pub fn create_source(&self) -> Result<Arc<dyn AnalysisSource>> {
        if self.offline {
            return Ok(Arc::new(SampleProvider::new()));
        }
        let model = wt_inference::create_model(Some(self.inference_config()))?;
        let analyzer = WikiAnalyzer::from_config(self.wiki_config(), self.probe_config(), model)?;
        Ok(Arc::new(analyzer))
    }
}
