use chrono::{DateTime, TimeZone, Utc};
use std::fmt::Display;

use crate::types::Article;

/// Date layouts used when rendering an article's publication time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFormatStyle {
    /// `10 Jul 2025, 14:30`
    #[default]
    DayMonthYearTime,
    /// `10/07/2025 14:30`
    ShortDateTime,
    /// `10/07/2025`
    OnlyDate,
    /// `14:30`
    OnlyTime,
    /// `2025-07-10T14:30:00+0000`
    IsoDate,
}

impl DateFormatStyle {
    pub fn pattern(&self) -> &'static str {
        match self {
            DateFormatStyle::DayMonthYearTime => "%d %b %Y, %H:%M",
            DateFormatStyle::ShortDateTime => "%d/%m/%Y %H:%M",
            DateFormatStyle::OnlyDate => "%d/%m/%Y",
            DateFormatStyle::OnlyTime => "%H:%M",
            DateFormatStyle::IsoDate => "%Y-%m-%dT%H:%M:%S%z",
        }
    }
}

impl Article {
    /// Publication time, falling back to now when absent or unparsable.
    pub fn published_date(&self) -> DateTime<Utc> {
        self.published_at
            .as_deref()
            .and_then(|raw| match DateTime::parse_from_rfc3339(raw) {
                Ok(date) => Some(date.with_timezone(&Utc)),
                Err(e) => {
                    tracing::debug!("Unparsable published_at {:?}: {}", raw, e);
                    None
                }
            })
            .unwrap_or_else(Utc::now)
    }

    pub fn formatted_date<Tz>(&self, style: DateFormatStyle, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        self.published_date()
            .with_timezone(tz)
            .format(style.pattern())
            .to_string()
    }

    /// `by A, B, C`, or an empty string when there are no authors.
    pub fn authors_formatted(&self) -> String {
        let names: Vec<&str> = self
            .authors
            .iter()
            .flatten()
            .map(|author| author.name.as_deref().unwrap_or(""))
            .collect();

        if names.is_empty() {
            String::new()
        } else {
            format!("by {}", names.join(", "))
        }
    }

    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    pub fn summary_or_default(&self) -> &str {
        self.summary.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Author;
    use chrono::FixedOffset;

    fn article_published(at: Option<&str>) -> Article {
        Article {
            published_at: at.map(str::to_string),
            ..Default::default()
        }
    }

    fn author(name: Option<&str>) -> Author {
        Author {
            name: name.map(str::to_string),
        }
    }

    #[test]
    fn test_published_date_parses_iso8601() {
        let article = article_published(Some("2024-01-02T03:04:05Z"));
        assert_eq!(
            article.published_date(),
            Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
        );

        let with_fraction = article_published(Some("2024-01-02T03:04:05.123+02:00"));
        assert_eq!(
            with_fraction.published_date().format("%H:%M:%S").to_string(),
            "01:04:05"
        );
    }

    #[test]
    fn test_published_date_falls_back_to_now() {
        let before = Utc::now();
        let missing = article_published(None).published_date();
        let garbage = article_published(Some("yesterday-ish")).published_date();
        let after = Utc::now();

        assert!(missing >= before && missing <= after);
        assert!(garbage >= before && garbage <= after);
    }

    #[test]
    fn test_formatted_date_styles() {
        let article = article_published(Some("2025-07-10T14:30:00Z"));

        assert_eq!(
            article.formatted_date(DateFormatStyle::DayMonthYearTime, &Utc),
            "10 Jul 2025, 14:30"
        );
        assert_eq!(
            article.formatted_date(DateFormatStyle::ShortDateTime, &Utc),
            "10/07/2025 14:30"
        );
        assert_eq!(article.formatted_date(DateFormatStyle::OnlyDate, &Utc), "10/07/2025");
        assert_eq!(article.formatted_date(DateFormatStyle::OnlyTime, &Utc), "14:30");
        assert_eq!(
            article.formatted_date(DateFormatStyle::IsoDate, &Utc),
            "2025-07-10T14:30:00+0000"
        );

        let buenos_aires = FixedOffset::west_opt(3 * 3600).unwrap();
        assert_eq!(
            article.formatted_date(DateFormatStyle::OnlyTime, &buenos_aires),
            "11:30"
        );
    }

    #[test]
    fn test_authors_formatted() {
        let mut article = Article::default();
        assert_eq!(article.authors_formatted(), "");

        article.authors = Some(vec![]);
        assert_eq!(article.authors_formatted(), "");

        article.authors = Some(vec![author(Some("Ada"))]);
        assert_eq!(article.authors_formatted(), "by Ada");

        article.authors = Some(vec![author(Some("Ada")), author(None), author(Some("Grace"))]);
        assert_eq!(article.authors_formatted(), "by Ada, , Grace");
    }

    #[test]
    fn test_defaults_for_missing_text() {
        let article = Article::default();
        assert_eq!(article.title_or_default(), "");
        assert_eq!(article.summary_or_default(), "");
    }
}
