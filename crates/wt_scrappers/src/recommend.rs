use wt_core::{ArticleAnalysis, RecommendationList, Result};
use wt_inference::RiskBand;

pub const MIN_EXTERNAL_LINKS: usize = 5;
pub const MIN_INTERNAL_LINKS: usize = 20;
pub const MIN_LEAD_CHARS: usize = 400;

/// Editing suggestions for an analysed article, most important first.
///
/// `lead_chars` is the length of the lead section; `None` when it is not
/// known, which is treated as too short.
pub fn recommend(
    analysis: &ArticleAnalysis,
    lead_chars: Option<usize>,
) -> Result<RecommendationList> {
    let mut items = Vec::new();

    if analysis.is_stub {
        items.push(
            "Makala imewekwa kama mbegu (stub) — ongeza maudhui na marejeo \
             ya kuaminika."
                .to_string(),
        );
    }
    if analysis.total_links_external < MIN_EXTERNAL_LINKS {
        items.push(format!(
            "Marejeo machache ({}) — ongeza citations zaidi.",
            analysis.total_links_external
        ));
    }
    if analysis.total_links_internal < MIN_INTERNAL_LINKS {
        items.push("Ongeza viungo vya ndani kwa makala zinazohusiana.".to_string());
    }
    if lead_chars.map_or(true, |chars| chars < MIN_LEAD_CHARS) {
        items.push("Muhtasari ni mfupi — boresha dibaji (lead section).".to_string());
    }
    if analysis.broken_links_count > 0 {
        items.push(format!(
            "Rekebisha viungo vya nje vilivyovunjika ({}).",
            analysis.broken_links_count
        ));
    }
    if RiskBand::from_risk(analysis.ai_content_risk) != RiskBand::Low {
        items.push(
            "Kagua maandishi — kuna dalili za maudhui yaliyotengenezwa na AI.".to_string(),
        );
    }
    if analysis.is_living {
        items.push("Hakikisha taarifa za mtu aliye hai zina marejeo ya kuaminika.".to_string());
    }

    RecommendationList::new(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wt_core::{sample_analysis, sample_recommendations};

    #[test]
    fn test_reproduces_sample() {
        let list = recommend(sample_analysis(), None).unwrap();
        assert_eq!(&list, sample_recommendations());
    }

    #[test]
    fn test_well_developed_article() {
        let mut record = sample_analysis().record().clone();
        record.is_stub = false;
        record.total_links_external = 12;
        record.total_links_internal = 80;
        let analysis = ArticleAnalysis::new(record).unwrap();
        assert!(recommend(&analysis, Some(1200)).unwrap().is_empty());
    }

    #[test]
    fn test_living_risky_broken() {
        let mut record = sample_analysis().record().clone();
        record.is_stub = false;
        record.total_links_external = 12;
        record.total_links_internal = 80;
        record.is_dead = false;
        record.death_year = None;
        record.is_living = true;
        record.ai_content_risk = 0.45;
        record.broken_external_links = vec![record.external_links[0].clone()];
        record.broken_links_count = 1;
        let analysis = ArticleAnalysis::new(record).unwrap();

        let list = recommend(&analysis, Some(1200)).unwrap();
        assert_eq!(
            list.to_vec(),
            vec![
                "Rekebisha viungo vya nje vilivyovunjika (1).".to_string(),
                "Kagua maandishi — kuna dalili za maudhui yaliyotengenezwa na AI.".to_string(),
                "Hakikisha taarifa za mtu aliye hai zina marejeo ya kuaminika.".to_string(),
            ]
        );
    }
}
