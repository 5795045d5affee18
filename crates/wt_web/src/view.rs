use std::fmt::Write;

use wt_core::TrustReport;
use wt_inference::RiskBand;

use crate::bootstrap::Component;

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Root component: the whole trust report for one article.
#[derive(Debug, Clone, Copy)]
pub struct ReportView<'a> {
    report: &'a TrustReport,
}

impl<'a> ReportView<'a> {
    pub fn new(report: &'a TrustReport) -> Self {
        Self { report }
    }

    fn risk_badge(&self) -> String {
        let risk = self.report.analysis.ai_content_risk;
        let class = match RiskBand::from_risk(risk) {
            RiskBand::Low => "bg-success",
            RiskBand::Moderate => "bg-warning text-dark",
            RiskBand::High => "bg-danger",
        };
        format!(
            "<span class=\"badge {}\" data-risk=\"{:.2}\">{:.0}%</span>",
            class,
            risk,
            risk * 100.0
        )
    }

    fn life(&self) -> Option<String> {
        let a = &self.report.analysis;
        let mut parts = Vec::new();
        if let Some(year) = a.birth_year {
            parts.push(format!("Alizaliwa {}", year));
        }
        if let Some(year) = a.death_year {
            parts.push(format!("Alifariki {}", year));
        } else if a.is_dead {
            parts.push("Amefariki".to_string());
        }
        if a.is_living {
            parts.push("Yu hai".to_string());
        }
        (!parts.is_empty()).then(|| parts.join(" · "))
    }
}

impl Component for ReportView<'_> {
    fn render(&self) -> String {
        let a = &self.report.analysis;
        let mut html = String::new();

        html.push_str("<main class=\"container py-4 wt-report\">\n");
        html.push_str(
            "<h1 class=\"h3 mb-3\"><i class=\"bi bi-shield-check\"></i> WikiTrust Index</h1>\n",
        );
        html.push_str("<div class=\"card mb-4\"><div class=\"card-body\">\n");

        let _ = write!(
            html,
            "<h2 class=\"h4 card-title\"><a href=\"{}\">{}</a> \
             <span class=\"badge bg-secondary\">{}</span>",
            escape(&a.url),
            escape(&a.title),
            escape(&a.content_type)
        );
        if a.is_stub {
            html.push_str(" <span class=\"badge bg-info text-dark\">stub</span>");
        }
        html.push_str("</h2>\n");

        let _ = writeln!(
            html,
            "<p class=\"wt-risk\"><i class=\"bi bi-robot\"></i> AI content risk: {}</p>",
            self.risk_badge()
        );

        let _ = writeln!(
            html,
            "<ul class=\"list-inline wt-links\">\
             <li class=\"list-inline-item\"><i class=\"bi bi-link\"></i> \
             Viungo vya ndani: {}</li>\
             <li class=\"list-inline-item\"><i class=\"bi bi-box-arrow-up-right\"></i> \
             Viungo vya nje: {}</li>\
             <li class=\"list-inline-item\"><i class=\"bi bi-exclamation-triangle\"></i> \
             Vilivyovunjika: {}</li>\
             </ul>",
            a.total_links_internal, a.total_links_external, a.broken_links_count
        );

        if let Some(life) = self.life() {
            let _ = writeln!(
                html,
                "<p class=\"wt-life\"><i class=\"bi bi-person\"></i> {}</p>",
                escape(&life)
            );
        }

        if !a.categories.is_empty() {
            html.push_str("<div class=\"wt-categories mb-2\">");
            for category in &a.categories {
                let _ = write!(
                    html,
                    "<span class=\"badge bg-light text-dark me-1\">{}</span>",
                    escape(category)
                );
            }
            html.push_str("</div>\n");
        }

        if !a.broken_external_links.is_empty() {
            html.push_str("<ul class=\"wt-broken\">");
            for link in &a.broken_external_links {
                let _ = write!(html, "<li><a href=\"{0}\">{0}</a></li>", escape(link));
            }
            html.push_str("</ul>\n");
        }

        let _ = writeln!(
            html,
            "<p class=\"text-muted wt-explanation\">{}</p>",
            escape(&a.ai_explanation)
        );
        html.push_str("</div></div>\n");

        html.push_str("<h3 class=\"h5\"><i class=\"bi bi-lightbulb\"></i> Mapendekezo</h3>\n");
        html.push_str("<ol class=\"list-group list-group-numbered wt-recommendations\">\n");
        for item in self.report.recommendations.iter() {
            let _ = writeln!(html, "<li class=\"list-group-item\">{}</li>", escape(item));
        }
        html.push_str("</ol>\n</main>\n");

        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};
    use wt_core::{sample_report, ArticleAnalysis};

    fn select_texts(html: &str, selector: &str) -> Vec<String> {
        let document = Html::parse_fragment(html);
        let selector = Selector::parse(selector).unwrap();
        document
            .select(&selector)
            .map(|el| el.text().collect::<String>())
            .collect()
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape("<a href=\"x\">&'</a>"),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_renders_sample() {
        let report = sample_report();
        let html = ReportView::new(&report).render();

        assert_eq!(select_texts(&html, "h2 a"), vec!["Costantino Castriota"]);
        assert_eq!(select_texts(&html, ".wt-recommendations li").len(), 4);
        assert_eq!(select_texts(&html, ".wt-categories .badge").len(), 9);
        assert_eq!(select_texts(&html, ".wt-life"), vec![" Alizaliwa 1477 · Alifariki 1500"]);
        assert!(html.contains("data-risk=\"0.02\">2%"));
        assert!(html.contains("bg-success"));
        assert!(select_texts(&html, ".wt-broken li").is_empty());
    }

    #[test]
    fn test_escapes_report_text() {
        let mut record = sample_report().analysis.into_record();
        record.title = "<script>alert(1)</script>".to_string();
        let mut report = sample_report();
        report.analysis = ArticleAnalysis::new(record).unwrap();

        let html = ReportView::new(&report).render();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }
}
