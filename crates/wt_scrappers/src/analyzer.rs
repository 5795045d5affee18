use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use url::Url;
use wt_core::{AnalysisRecord, AnalysisSource, ArticleAnalysis, Result, TrustReport};
use wt_inference::{explain, ContentRiskModel, Signals};

use crate::logging::Logger;
use crate::probe::{LinkProber, ProbeConfig};
use crate::recommend::recommend;
use crate::signals::CategorySignals;
use crate::wiki::{WikiClient, WikiConfig};

/// Link lists are capped to keep responses small. Totals are not.
pub const MAX_LISTED_LINKS: usize = 200;

/// Live [`AnalysisSource`] backed by a MediaWiki site.
pub struct WikiAnalyzer {
    wiki: WikiClient,
    prober: LinkProber,
    model: Arc<dyn ContentRiskModel>,
    logger: Logger,
}

impl fmt::Debug for WikiAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WikiAnalyzer")
            .field("wiki", &self.wiki)
            .field("model", &self.model.name())
            .finish()
    }
}

impl WikiAnalyzer {
    pub fn new(wiki: WikiClient, prober: LinkProber, model: Arc<dyn ContentRiskModel>) -> Self {
        Self {
            wiki,
            prober,
            model,
            logger: Logger::new().with_prefix("📖".to_string()),
        }
    }

    pub fn from_config(
        wiki: WikiConfig,
        probe: ProbeConfig,
        model: Arc<dyn ContentRiskModel>,
    ) -> Result<Self> {
        Ok(Self::new(WikiClient::new(wiki)?, LinkProber::new(probe)?, model))
    }

    pub async fn run(&self, title: &str) -> Result<TrustReport> {
        let log = self.logger.clone().with_prefix(format!("[{}]", title));

        let summary = self.wiki.summary(title).await?;
        let lead = summary.lead_text();
        let ai_content_risk = self.model.estimate_risk(&lead).await?;
        let content_type = summary.content_type();
        let page_title = summary
            .title
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| title.to_string());
        log.debug(&format!("Summary fetched, risk {:.2}, type {}", ai_content_risk, content_type));

        let (links, extlinks, categories) = futures::try_join!(
            self.wiki.links(&page_title),
            self.wiki.extlinks(&page_title),
            self.wiki.categories(&page_title),
        )?;
        log.info(&format!(
            "🔗 {} internal, {} external links, {} categories",
            links.len(),
            extlinks.len(),
            categories.len()
        ));

        let signals = CategorySignals::from_categories(&categories);

        let ext_urls: Vec<String> = extlinks.iter().filter_map(|l| normalize_link(l)).collect();
        let broken = self.prober.find_broken(&ext_urls).await;
        if !broken.is_empty() {
            log.warn(&format!("💔 {} broken external link(s)", broken.len()));
        }

        let ai_explanation = explain(&Signals {
            content_type: content_type.clone(),
            birth_year: signals.birth_year,
            living: signals.living,
            dead: signals.dead,
            stub: signals.stub,
            internal_links: links.len(),
            external_links: extlinks.len(),
            broken_links: broken.len(),
            ai_content_risk,
        });

        let url = match summary.page_url() {
            Some(url) => url.to_string(),
            None => self.wiki.article_url(&page_title)?.to_string(),
        };

        let record = AnalysisRecord {
            title: page_title,
            url,
            ai_content_risk,
            broken_links_count: broken.len(),
            broken_external_links: broken,
            content_type,
            total_links_internal: links.len(),
            total_links_external: extlinks.len(),
            internal_links: unique_capped(links, MAX_LISTED_LINKS),
            external_links: unique_capped(ext_urls, MAX_LISTED_LINKS),
            categories: unique_capped(categories, usize::MAX),
            is_living: signals.is_living(),
            is_dead: signals.dead,
            death_year: signals.death_year,
            birth_year: signals.birth_year,
            is_stub: signals.stub,
            ai_explanation,
        };

        let analysis = ArticleAnalysis::new(record).map_err(|e| {
            log.error(&format!("Rejected inconsistent analysis: {}", e));
            e
        })?;
        let recommendations = recommend(&analysis, Some(lead.chars().count()))?;
        log.info(&format!("✨ Analysis done, {} recommendation(s)", recommendations.len()));

        Ok(TrustReport {
            analysis,
            recommendations,
        })
    }
}

#[async_trait]
impl AnalysisSource for WikiAnalyzer {
    fn name(&self) -> &str {
        "wiki"
    }

    async fn analyze(&self, title: &str) -> Result<TrustReport> {
        self.run(title).await
    }
}

/// Absolute http(s) form of an external link, or `None` if it is not a web link.
fn normalize_link(link: &str) -> Option<String> {
    let candidate = if link.starts_with("//") {
        format!("https:{}", link)
    } else {
        link.to_string()
    };
    let url = Url::parse(&candidate).ok()?;
    matches!(url.scheme(), "http" | "https").then(|| candidate)
}

/// First occurrence of each item, in order, at most `cap` of them.
fn unique_capped(items: Vec<String>, cap: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .take(cap)
        .collect()
}
