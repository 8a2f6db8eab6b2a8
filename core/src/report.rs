use colored::Color;

use crate::api::HacktivityNode;

/// One disclosed report as written to disk and echoed to the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRecord {
    pub title: String,
    pub severity: Option<String>,
    pub url: String,
}

impl From<HacktivityNode> for ReportRecord {
    fn from(node: HacktivityNode) -> Self {
        Self {
            title: node.report.title,
            severity: node.severity_rating,
            url: node.report.url,
        }
    }
}

impl ReportRecord {
    pub fn severity_label(&self) -> &str {
        match self.severity.as_deref() {
            Some(s) if !s.is_empty() => s,
            _ => "No rating",
        }
    }

    pub fn color(&self) -> Color {
        severity_color(self.severity.as_deref())
    }
}

/// Terminal color for a severity rating, matched case-insensitively.
pub fn severity_color(severity: Option<&str>) -> Color {
    let Some(raw) = severity.filter(|s| !s.is_empty()) else {
        return Color::BrightBlue;
    };
    match raw.to_ascii_lowercase().as_str() {
        "critical" => Color::BrightRed,
        "high" => Color::TrueColor { r: 255, g: 135, b: 0 },
        "medium" => Color::BrightYellow,
        "low" => Color::BrightGreen,
        _ => Color::BrightWhite,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DisclosedReport;

    #[test]
    fn test_palette() {
        assert_eq!(severity_color(Some("critical")), Color::BrightRed);
        assert_eq!(severity_color(Some("high")), Color::TrueColor { r: 255, g: 135, b: 0 });
        assert_eq!(severity_color(Some("medium")), Color::BrightYellow);
        assert_eq!(severity_color(Some("low")), Color::BrightGreen);
        assert_eq!(severity_color(None), Color::BrightBlue);
        assert_eq!(severity_color(Some("")), Color::BrightBlue);
        assert_eq!(severity_color(Some("none")), Color::BrightWhite);
    }

    #[test]
    fn test_palette_ignores_case() {
        assert_eq!(severity_color(Some("CRITICAL")), severity_color(Some("critical")));
        assert_eq!(severity_color(Some("Medium")), Color::BrightYellow);
    }

    #[test]
    fn test_from_node() {
        let node = HacktivityNode {
            id: Some("abc".into()),
            severity_rating: Some("high".into()),
            report: DisclosedReport {
                id: None,
                title: "IDOR in invoices".into(),
                url: "https://hackerone.com/reports/1".into(),
                disclosed_at: None,
            },
        };
        let record = ReportRecord::from(node);
        assert_eq!(record.title, "IDOR in invoices");
        assert_eq!(record.severity.as_deref(), Some("high"));
        assert_eq!(record.url, "https://hackerone.com/reports/1");
    }

    #[test]
    fn test_severity_label() {
        let mut record = ReportRecord {
            title: "t".into(),
            severity: None,
            url: "u".into(),
        };
        assert_eq!(record.severity_label(), "No rating");
        record.severity = Some("low".into());
        assert_eq!(record.severity_label(), "low");
    }
}
