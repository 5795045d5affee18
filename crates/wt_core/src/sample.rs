//! Fixed analysis used when no live backend is reachable.

use async_trait::async_trait;
use lazy_static::lazy_static;

use crate::source::AnalysisSource;
use crate::types::{AnalysisRecord, ArticleAnalysis, RecommendationList, TrustReport};
use crate::Result;

lazy_static! {
    static ref SAMPLE_ANALYSIS: ArticleAnalysis =
        ArticleAnalysis::new(sample_record()).expect("sample analysis literal is valid");
    static ref SAMPLE_RECOMMENDATIONS: RecommendationList =
        RecommendationList::new(strings(&[
            "Makala imewekwa kama mbegu (stub) — ongeza maudhui na marejeo ya kuaminika.",
            "Marejeo machache (3) — ongeza citations zaidi.",
            "Ongeza viungo vya ndani kwa makala zinazohusiana.",
            "Muhtasari ni mfupi — boresha dibaji (lead section).",
        ]))
        .expect("sample recommendations literal is valid");
}

/// The sample analysis record. Same value on every call.
pub fn sample_analysis() -> &'static ArticleAnalysis {
    &SAMPLE_ANALYSIS
}

/// The sample recommendations, in display order.
pub fn sample_recommendations() -> &'static RecommendationList {
    &SAMPLE_RECOMMENDATIONS
}

pub fn sample_report() -> TrustReport {
    TrustReport {
        analysis: sample_analysis().clone(),
        recommendations: sample_recommendations().clone(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn sample_record() -> AnalysisRecord {
    AnalysisRecord {
        title: "Costantino Castriota".to_string(),
        url: "https://sw.wikipedia.org/wiki/Costantino_Castriota".to_string(),
        ai_content_risk: 0.02,
        broken_links_count: 0,
        broken_external_links: vec![],
        content_type: "article".to_string(),
        total_links_internal: 12,
        total_links_external: 3,
        internal_links: strings(&[
            "Albania",
            "Kastrioti",
            "Kanisa Katoliki",
            "Askofu",
            "Isernia",
            "Scanderbeg",
            "Prelati",
            "Mtemi",
            "Ukoo",
            "Wakristo",
            "Mababu",
            "Historia ya Albania",
        ]),
        external_links: strings(&[
            "https://www.catholic-hierarchy.org/bishop/bcastri.html",
            "https://en.wikipedia.org/wiki/Constantine_Castriota",
            "https://www.newadvent.org/cathen/03407a.htm",
        ]),
        categories: strings(&[
            "Mbegu za Wakristo",
            "Waliozaliwa 1477",
            "Waliofariki 1500",
            "Wanasiasa wa Albania",
            "Maaskofu Wakatoliki",
            "Watu wa Albania",
            "Wakristo wa Albania",
            "Historia ya Albania",
            "Wanahistoria wa Albania",
        ]),
        is_living: false,
        is_dead: true,
        death_year: Some(1500),
        birth_year: Some(1477),
        is_stub: true,
        ai_explanation: "This appears to be a standard encyclopedia article about Costantino \
            Castriota, an Albanian prince and Catholic prelate who served as Bishop of Isernia \
            from 1497-1500. The subject was born in 1477 and died in 1500. Categories indicate \
            the subject is deceased. The article is categorized as a stub (mbegu); it may be \
            incomplete. There are about 12 internal links and 3 external links. Low indications \
            of AI-generated phrasing in summary."
            .to_string(),
    }
}

/// Offline [`AnalysisSource`]: answers every title with the sample report.
#[derive(Debug, Clone, Default)]
pub struct SampleProvider;

impl SampleProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AnalysisSource for SampleProvider {
    fn name(&self) -> &str {
        "sample"
    }

    async fn analyze(&self, title: &str) -> Result<TrustReport> {
        tracing::debug!("Serving sample analysis in place of {:?}", title);
        Ok(sample_report())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    #[test]
    fn test_link_counts_match_lists() {
        let analysis = sample_analysis();
        assert_eq!(analysis.broken_links_count, analysis.broken_external_links.len());
        assert_eq!(analysis.broken_links_count, 0);
        assert_eq!(analysis.total_links_internal, analysis.internal_links.len());
        assert_eq!(analysis.total_links_internal, 12);
        assert_eq!(analysis.total_links_external, analysis.external_links.len());
        assert_eq!(analysis.total_links_external, 3);
        assert!(analysis.internal_links_exhaustive());
        assert!(analysis.external_links_exhaustive());
    }

    #[test]
    fn test_life_data() {
        let analysis = sample_analysis();
        assert!(!analysis.is_living);
        assert!(analysis.is_dead);
        assert!(!(analysis.is_living && analysis.is_dead));
        assert_eq!(analysis.birth_year, Some(1477));
        assert_eq!(analysis.death_year, Some(1500));
        assert!(analysis.birth_year <= analysis.death_year);
    }

    #[test]
    fn test_accessors_are_stable() {
        let first = sample_analysis().clone();
        let second = sample_analysis().clone();
        assert_eq!(first, second);
        assert!(std::ptr::eq(sample_analysis(), sample_analysis()));

        let recommendations = sample_recommendations();
        assert_eq!(recommendations.len(), 4);
        assert!(recommendations.iter().all(|r| !r.trim().is_empty()));
        assert_eq!(recommendations, sample_recommendations());
        assert!(recommendations[0].starts_with("Makala imewekwa kama mbegu"));
        assert!(recommendations[3].starts_with("Muhtasari ni mfupi"));
    }

    #[test]
    fn test_links_are_uris() {
        let analysis = sample_analysis();
        for link in analysis.external_links.iter().chain(&analysis.broken_external_links) {
            assert!(Url::parse(link).is_ok(), "{}", link);
        }
        assert!(Url::parse(&analysis.url).is_ok());
    }

    #[test]
    fn test_json_field_names() {
        let value = serde_json::to_value(sample_analysis()).unwrap();
        assert_eq!(value["title"], "Costantino Castriota");
        assert_eq!(value["ai_content_risk"], 0.02);
        assert_eq!(value["categories"].as_array().unwrap().len(), 9);
        assert_eq!(value["is_stub"], true);

        let back: ArticleAnalysis = serde_json::from_value(value).unwrap();
        assert_eq!(&back, sample_analysis());
    }

    #[tokio::test]
    async fn test_provider_ignores_title() {
        let provider = SampleProvider::new();
        let report = provider.analyze("Nairobi").await.unwrap();
        assert_eq!(report.analysis.title, "Costantino Castriota");
        assert_eq!(report.recommendations.len(), 4);
    }
}
