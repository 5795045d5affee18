use std::collections::HashSet;
use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Wire shape of an article analysis, as produced by a backend.
///
/// Nothing here is checked. Use [`ArticleAnalysis::new`] to get a record the
/// rendering layer is allowed to display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub title: String,
    pub url: String,
    pub ai_content_risk: f64,
    pub broken_links_count: usize,
    pub broken_external_links: Vec<String>,
    pub content_type: String,
    pub total_links_internal: usize,
    pub total_links_external: usize,
    pub internal_links: Vec<String>,
    pub external_links: Vec<String>,
    pub categories: Vec<String>,
    pub is_living: bool,
    pub is_dead: bool,
    pub death_year: Option<i32>,
    pub birth_year: Option<i32>,
    pub is_stub: bool,
    pub ai_explanation: String,
}

/// A single broken invariant of an [`AnalysisRecord`] or recommendation list.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    EmptyTitle,
    EmptyExplanation,
    MalformedUri { field: &'static str, value: String },
    RiskOutOfRange(f64),
    BrokenCountMismatch { count: usize, listed: usize },
    LinkTotalBelowListed { field: &'static str, total: usize, listed: usize },
    LivingAndDead,
    DeathYearWithoutDeath(i32),
    BirthAfterDeath { birth: i32, death: i32 },
    DuplicateCategory(String),
    BlankRecommendation(usize),
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::EmptyTitle => write!(f, "title is empty"),
            Violation::EmptyExplanation => write!(f, "ai_explanation is empty"),
            Violation::MalformedUri { field, value } => {
                write!(f, "{} contains a malformed URI: {:?}", field, value)
            }
            Violation::RiskOutOfRange(risk) => {
                write!(f, "ai_content_risk {} is outside [0, 1]", risk)
            }
            Violation::BrokenCountMismatch { count, listed } => write!(
                f,
                "broken_links_count is {} but {} broken links are listed",
                count, listed
            ),
            Violation::LinkTotalBelowListed { field, total, listed } => write!(
                f,
                "{} is {} but {} links are listed",
                field, total, listed
            ),
            Violation::LivingAndDead => write!(f, "is_living and is_dead are both set"),
            Violation::DeathYearWithoutDeath(year) => {
                write!(f, "death_year {} is set but is_dead is false", year)
            }
            Violation::BirthAfterDeath { birth, death } => {
                write!(f, "birth_year {} is after death_year {}", birth, death)
            }
            Violation::DuplicateCategory(category) => {
                write!(f, "category {:?} is listed twice", category)
            }
            Violation::BlankRecommendation(index) => {
                write!(f, "recommendation #{} is blank", index)
            }
        }
    }
}

impl AnalysisRecord {
    /// Every invariant this record breaks, in field order.
    pub fn violations(&self) -> Vec<Violation> {
        let mut violations = Vec::new();

        if self.title.trim().is_empty() {
            violations.push(Violation::EmptyTitle);
        }
        check_uri(&mut violations, "url", &self.url);

        if !self.ai_content_risk.is_finite() || !(0.0..=1.0).contains(&self.ai_content_risk) {
            violations.push(Violation::RiskOutOfRange(self.ai_content_risk));
        }

        if self.broken_links_count != self.broken_external_links.len() {
            violations.push(Violation::BrokenCountMismatch {
                count: self.broken_links_count,
                listed: self.broken_external_links.len(),
            });
        }
        for link in &self.broken_external_links {
            check_uri(&mut violations, "broken_external_links", link);
        }

        // Totals count raw links, lists may be de-duplicated or capped.
        if self.total_links_internal < self.internal_links.len() {
            violations.push(Violation::LinkTotalBelowListed {
                field: "total_links_internal",
                total: self.total_links_internal,
                listed: self.internal_links.len(),
            });
        }
        if self.total_links_external < self.external_links.len() {
            violations.push(Violation::LinkTotalBelowListed {
                field: "total_links_external",
                total: self.total_links_external,
                listed: self.external_links.len(),
            });
        }
        for link in &self.external_links {
            check_uri(&mut violations, "external_links", link);
        }

        let mut seen = HashSet::new();
        for category in &self.categories {
            if !seen.insert(category.as_str()) {
                violations.push(Violation::DuplicateCategory(category.clone()));
            }
        }

        if self.is_living && self.is_dead {
            violations.push(Violation::LivingAndDead);
        }
        if let Some(death) = self.death_year {
            if !self.is_dead {
                violations.push(Violation::DeathYearWithoutDeath(death));
            }
            if let Some(birth) = self.birth_year {
                if birth > death {
                    violations.push(Violation::BirthAfterDeath { birth, death });
                }
            }
        }

        if self.ai_explanation.trim().is_empty() {
            violations.push(Violation::EmptyExplanation);
        }

        violations
    }
}

fn check_uri(violations: &mut Vec<Violation>, field: &'static str, value: &str) {
    if Url::parse(value).is_err() {
        violations.push(Violation::MalformedUri {
            field,
            value: value.to_string(),
        });
    }
}

/// An [`AnalysisRecord`] that satisfies every invariant.
///
/// The only ways to get one are [`ArticleAnalysis::new`] and deserialization,
/// both of which reject inconsistent data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AnalysisRecord", into = "AnalysisRecord")]
pub struct ArticleAnalysis(AnalysisRecord);

impl ArticleAnalysis {
    pub fn new(record: AnalysisRecord) -> Result<Self> {
        let violations = record.violations();
        if violations.is_empty() {
            Ok(Self(record))
        } else {
            Err(Error::Validation(violations))
        }
    }

    pub fn record(&self) -> &AnalysisRecord {
        &self.0
    }

    pub fn into_record(self) -> AnalysisRecord {
        self.0
    }

    /// True when `internal_links` holds every counted internal link.
    pub fn internal_links_exhaustive(&self) -> bool {
        self.0.total_links_internal == self.0.internal_links.len()
    }

    /// True when `external_links` holds every counted external link.
    pub fn external_links_exhaustive(&self) -> bool {
        self.0.total_links_external == self.0.external_links.len()
    }
}

impl Deref for ArticleAnalysis {
    type Target = AnalysisRecord;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<AnalysisRecord> for ArticleAnalysis {
    type Error = Error;

    fn try_from(record: AnalysisRecord) -> Result<Self> {
        Self::new(record)
    }
}

impl From<ArticleAnalysis> for AnalysisRecord {
    fn from(analysis: ArticleAnalysis) -> Self {
        analysis.0
    }
}

/// Ordered, independent suggestions for improving an article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct RecommendationList(Vec<String>);

impl RecommendationList {
    pub fn new(items: Vec<String>) -> Result<Self> {
        let violations: Vec<_> = items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.trim().is_empty())
            .map(|(i, _)| Violation::BlankRecommendation(i))
            .collect();
        if violations.is_empty() {
            Ok(Self(items))
        } else {
            Err(Error::Validation(violations))
        }
    }
}

impl Deref for RecommendationList {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<Vec<String>> for RecommendationList {
    type Error = Error;

    fn try_from(items: Vec<String>) -> Result<Self> {
        Self::new(items)
    }
}

impl From<RecommendationList> for Vec<String> {
    fn from(list: RecommendationList) -> Self {
        list.0
    }
}

/// What a source hands to the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustReport {
    pub analysis: ArticleAnalysis,
    pub recommendations: RecommendationList,
}
