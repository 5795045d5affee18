//! Plain-language summary of what the analysis found.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskBand {
    Low,
    Moderate,
    High,
}

impl RiskBand {
    pub fn from_risk(risk: f64) -> Self {
        if risk >= 0.7 {
            RiskBand::High
        } else if risk >= 0.4 {
            RiskBand::Moderate
        } else {
            RiskBand::Low
        }
    }

    fn sentence(self) -> &'static str {
        match self {
            RiskBand::High => "Text shows a high risk of AI-generated patterns.",
            RiskBand::Moderate => "Text shows a moderate risk of AI-generated patterns.",
            RiskBand::Low => "Low indications of AI-generated phrasing in summary.",
        }
    }
}

/// Facts the explanation is built from.
#[derive(Debug, Clone)]
pub struct Signals {
    pub content_type: String,
    pub birth_year: Option<i32>,
    pub living: bool,
    pub dead: bool,
    pub stub: bool,
    pub internal_links: usize,
    pub external_links: usize,
    pub broken_links: usize,
    pub ai_content_risk: f64,
}

impl Default for Signals {
    fn default() -> Self {
        Self {
            content_type: "article".to_string(),
            birth_year: None,
            living: false,
            dead: false,
            stub: false,
            internal_links: 0,
            external_links: 0,
            broken_links: 0,
            ai_content_risk: 0.0,
        }
    }
}

pub fn explain(signals: &Signals) -> String {
    let mut parts = Vec::new();

    if signals.content_type == "article" {
        parts.push("This appears to be a standard encyclopedia article.".to_string());
    } else {
        parts.push(format!("This page is a '{}' page.", signals.content_type));
    }
    if let Some(year) = signals.birth_year {
        parts.push(format!("The subject seems to have been born in {}.", year));
    }
    if signals.living {
        parts.push("Categories suggest the person is living.".to_string());
    }
    if signals.dead {
        parts.push("Categories indicate the subject is deceased.".to_string());
    }
    if signals.stub {
        parts.push(
            "The article is categorized as a stub (mbegu); it may be incomplete.".to_string(),
        );
    }
    parts.push(format!(
        "There are about {} internal links and {} external links.",
        signals.internal_links, signals.external_links
    ));
    if signals.broken_links > 0 {
        parts.push(format!(
            "At least {} external link(s) appear broken.",
            signals.broken_links
        ));
    }
    parts.push(RiskBand::from_risk(signals.ai_content_risk).sentence().to_string());

    parts.join(" ")
}
