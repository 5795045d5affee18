//! Facts about the article subject read from its category titles.

use lazy_static::lazy_static;
use regex::Regex;

const YEARS: std::ops::RangeInclusive<i32> = 1000..=2100;

lazy_static! {
    static ref BIRTH: Vec<Regex> = vec![
        Regex::new(r"(?i)(?:Waliozaliwa|Kuzaliwa)\s+([0-9]{3,4})$").expect("birth pattern"),
        Regex::new(r"(?i)([0-9]{3,4})\s+births$").expect("birth pattern"),
    ];
    static ref DEATH: Vec<Regex> = vec![
        Regex::new(r"(?i)(?:Waliofariki|Vifo vya)\s+([0-9]{3,4})$").expect("death pattern"),
        Regex::new(r"(?i)([0-9]{3,4})\s+deaths$").expect("death pattern"),
    ];
    static ref LIVING: Regex =
        Regex::new(r"(?i)Watu hai|Walio hai|Living people").expect("living pattern");
    static ref STUB: Regex = Regex::new(r"(?i)mbegu|stub").expect("stub pattern");
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySignals {
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
    pub dead: bool,
    pub living: bool,
    pub stub: bool,
}

impl CategorySignals {
    pub fn from_categories(categories: &[String]) -> Self {
        let death_year = find_year(categories, &DEATH);
        Self {
            birth_year: find_year(categories, &BIRTH),
            death_year,
            dead: death_year.is_some(),
            living: categories.iter().any(|c| LIVING.is_match(c)),
            stub: categories.iter().any(|c| STUB.is_match(c)),
        }
    }

    /// A death category wins over a living-people category.
    pub fn is_living(&self) -> bool {
        self.living && !self.dead
    }
}

/// First plausible year matched by any pattern, scanning categories in order.
fn find_year(categories: &[String], patterns: &[Regex]) -> Option<i32> {
    categories.iter().find_map(|category| {
        patterns.iter().find_map(|pattern| {
            pattern
                .captures(category)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse::<i32>().ok())
                .filter(|year| YEARS.contains(year))
        })
    })
}
