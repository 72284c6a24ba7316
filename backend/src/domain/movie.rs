//! Movie catalogue entities.
//!
//! A [`Movie`] is created once from a validated [`MovieDraft`] and then
//! mutated only by the enrichment merge performed during creation.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};

/// Server-assigned movie identifier.
///
/// Rendered as a decimal string on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MovieId(i64);

impl MovieId {
    /// Wrap a storage identifier.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Raw storage identifier.
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for MovieId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Revenue figures reported by the box-office source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoxOfficeRevenue {
    pub worldwide: i64,
    pub opening_weekend_usa: i64,
}

/// All-or-nothing box-office sub-record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxOffice {
    pub revenue: BoxOfficeRevenue,
    /// ISO currency code of the revenue figures.
    pub currency: String,
    /// Name of the upstream source that supplied the figures.
    pub source: String,
    pub last_updated: DateTime<Utc>,
}

impl BoxOffice {
    /// Rebuild the sub-record from nullable storage columns.
    ///
    /// Returns `None` unless every column is populated, so a partially written
    /// row never surfaces as a partial record.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use movie_catalogue::domain::BoxOffice;
    ///
    /// let now = Utc::now();
    /// assert!(BoxOffice::from_parts(Some(1), Some(2), Some("USD".into()), None, Some(now)).is_none());
    /// ```
    pub fn from_parts(
        worldwide: Option<i64>,
        opening_weekend_usa: Option<i64>,
        currency: Option<String>,
        source: Option<String>,
        last_updated: Option<DateTime<Utc>>,
    ) -> Option<Self> {
        Some(Self {
            revenue: BoxOfficeRevenue {
                worldwide: worldwide?,
                opening_weekend_usa: opening_weekend_usa?,
            },
            currency: currency?,
            source: source?,
            last_updated: last_updated?,
        })
    }
}

/// Stored movie record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub genre: String,
    pub release_date: NaiveDate,
    pub distributor: Option<String>,
    pub budget: Option<i64>,
    pub mpa_rating: Option<String>,
    pub box_office: Option<BoxOffice>,
}

impl Movie {
    /// Combine a freshly inserted draft with its enrichment outcome.
    pub fn from_draft(id: MovieId, draft: MovieDraft, enrichment: MovieEnrichment) -> Self {
        Self {
            id,
            title: draft.title,
            genre: draft.genre,
            release_date: draft.release_date,
            distributor: enrichment.distributor,
            budget: enrichment.budget,
            mpa_rating: enrichment.mpa_rating,
            box_office: enrichment.box_office,
        }
    }
}

/// Field that failed movie validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieField {
    Title,
    Genre,
    ReleaseDate,
    Budget,
}

impl MovieField {
    /// Wire name of the field.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Genre => "genre",
            Self::ReleaseDate => "releaseDate",
            Self::Budget => "budget",
        }
    }
}

/// Reasons a create request cannot become a [`MovieDraft`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MovieValidationError {
    #[error("{} is required", field.as_str())]
    Missing { field: MovieField },
    #[error("releaseDate must be an ISO date (YYYY-MM-DD): {value}")]
    InvalidReleaseDate { value: String },
    #[error("budget must not be negative")]
    NegativeBudget,
}

impl MovieValidationError {
    /// Field the error refers to.
    pub const fn field(&self) -> MovieField {
        match self {
            Self::Missing { field } => *field,
            Self::InvalidReleaseDate { .. } => MovieField::ReleaseDate,
            Self::NegativeBudget => MovieField::Budget,
        }
    }
}

/// Validated input for a new movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieDraft {
    pub title: String,
    pub genre: String,
    pub release_date: NaiveDate,
    pub distributor: Option<String>,
    pub budget: Option<i64>,
    pub mpa_rating: Option<String>,
}

impl MovieDraft {
    /// Validate raw create input.
    ///
    /// Required strings are trimmed; blank optional strings count as absent.
    ///
    /// # Examples
    /// ```
    /// use movie_catalogue::domain::MovieDraft;
    ///
    /// let draft = MovieDraft::parse("Heat", "Crime", "1995-12-15", None, Some(60_000_000), None)
    ///     .expect("valid draft");
    /// assert_eq!(draft.release_date.to_string(), "1995-12-15");
    /// ```
    pub fn parse(
        title: &str,
        genre: &str,
        release_date: &str,
        distributor: Option<&str>,
        budget: Option<i64>,
        mpa_rating: Option<&str>,
    ) -> Result<Self, MovieValidationError> {
        let title = required(title, MovieField::Title)?;
        let genre = required(genre, MovieField::Genre)?;
        let raw_date = required(release_date, MovieField::ReleaseDate)?;
        let release_date = NaiveDate::parse_from_str(&raw_date, "%Y-%m-%d")
            .map_err(|_| MovieValidationError::InvalidReleaseDate { value: raw_date })?;
        if budget.is_some_and(|value| value < 0) {
            return Err(MovieValidationError::NegativeBudget);
        }

        Ok(Self {
            title,
            genre,
            release_date,
            distributor: optional(distributor),
            budget,
            mpa_rating: optional(mpa_rating),
        })
    }
}

fn required(value: &str, field: MovieField) -> Result<String, MovieValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(MovieValidationError::Missing { field });
    }
    Ok(trimmed.to_owned())
}

fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

/// Data returned by the box-office source for one title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxOfficeRecord {
    pub distributor: Option<String>,
    pub budget: Option<i64>,
    pub mpa_rating: Option<String>,
    pub box_office: BoxOffice,
}

/// Fields written by the enrichment update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MovieEnrichment {
    pub distributor: Option<String>,
    pub budget: Option<i64>,
    pub mpa_rating: Option<String>,
    pub box_office: Option<BoxOffice>,
}

impl MovieEnrichment {
    /// Merge user input with an optional upstream record.
    ///
    /// Each scalar is taken from the draft when present and from the record
    /// otherwise. Box office comes wholesale from the record.
    ///
    /// # Examples
    /// ```
    /// use movie_catalogue::domain::{MovieDraft, MovieEnrichment};
    ///
    /// let draft = MovieDraft::parse("Heat", "Crime", "1995-12-15", Some("Warner"), None, None)
    ///     .expect("valid draft");
    /// let merged = MovieEnrichment::merge(&draft, None);
    /// assert_eq!(merged.distributor.as_deref(), Some("Warner"));
    /// assert!(merged.box_office.is_none());
    /// ```
    pub fn merge(draft: &MovieDraft, record: Option<BoxOfficeRecord>) -> Self {
        let Some(record) = record else {
            return Self {
                distributor: draft.distributor.clone(),
                budget: draft.budget,
                mpa_rating: draft.mpa_rating.clone(),
                box_office: None,
            };
        };
        Self {
            distributor: draft.distributor.clone().or(record.distributor),
            budget: draft.budget.or(record.budget),
            mpa_rating: draft.mpa_rating.clone().or(record.mpa_rating),
            box_office: Some(record.box_office),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    #[fixture]
    fn record() -> BoxOfficeRecord {
        BoxOfficeRecord {
            distributor: Some("Upstream Pictures".to_owned()),
            budget: Some(160_000_000),
            mpa_rating: Some("PG-13".to_owned()),
            box_office: BoxOffice {
                revenue: BoxOfficeRevenue {
                    worldwide: 836_836_967,
                    opening_weekend_usa: 62_785_337,
                },
                currency: "USD".to_owned(),
                source: "ExampleBoxOfficeAPI".to_owned(),
                last_updated: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            },
        }
    }

    fn draft(distributor: Option<&str>, budget: Option<i64>, mpa: Option<&str>) -> MovieDraft {
        MovieDraft::parse("Inception", "Sci-Fi", "2010-07-16", distributor, budget, mpa)
            .expect("valid draft")
    }

    #[rstest]
    #[case("", "Drama", "2010-07-16", MovieField::Title)]
    #[case("Heat", "  ", "2010-07-16", MovieField::Genre)]
    #[case("Heat", "Crime", "", MovieField::ReleaseDate)]
    fn rejects_blank_required_fields(
        #[case] title: &str,
        #[case] genre: &str,
        #[case] date: &str,
        #[case] field: MovieField,
    ) {
        let err = MovieDraft::parse(title, genre, date, None, None, None)
            .expect_err("blank field rejected");
        assert_eq!(err, MovieValidationError::Missing { field });
    }

    #[rstest]
    #[case("16/07/2010")]
    #[case("2010-13-01")]
    #[case("2010-07-16T00:00:00Z")]
    fn rejects_non_iso_dates(#[case] date: &str) {
        let err = MovieDraft::parse("Heat", "Crime", date, None, None, None)
            .expect_err("date rejected");
        assert_eq!(err.field(), MovieField::ReleaseDate);
    }

    #[test]
    fn rejects_negative_budget() {
        let err = MovieDraft::parse("Heat", "Crime", "1995-12-15", None, Some(-1), None)
            .expect_err("budget rejected");
        assert_eq!(err, MovieValidationError::NegativeBudget);
    }

    #[test]
    fn blank_optional_strings_are_absent() {
        let draft = draft(Some("  "), None, Some(""));
        assert!(draft.distributor.is_none());
        assert!(draft.mpa_rating.is_none());
    }

    #[rstest]
    fn user_values_win_over_upstream(record: BoxOfficeRecord) {
        let merged = MovieEnrichment::merge(
            &draft(Some("Warner Bros."), Some(1), Some("R")),
            Some(record.clone()),
        );

        assert_eq!(merged.distributor.as_deref(), Some("Warner Bros."));
        assert_eq!(merged.budget, Some(1));
        assert_eq!(merged.mpa_rating.as_deref(), Some("R"));
        assert_eq!(merged.box_office, Some(record.box_office));
    }

    #[rstest]
    fn upstream_fills_each_gap_independently(record: BoxOfficeRecord) {
        let merged = MovieEnrichment::merge(&draft(None, Some(5), None), Some(record));

        assert_eq!(merged.distributor.as_deref(), Some("Upstream Pictures"));
        assert_eq!(merged.budget, Some(5));
        assert_eq!(merged.mpa_rating.as_deref(), Some("PG-13"));
    }

    #[test]
    fn no_record_keeps_user_values_only() {
        let merged = MovieEnrichment::merge(&draft(None, Some(5), None), None);
        assert_eq!(
            merged,
            MovieEnrichment {
                budget: Some(5),
                ..MovieEnrichment::default()
            }
        );
    }

    #[rstest]
    fn box_office_requires_every_part(record: BoxOfficeRecord) {
        let expected = record.box_office;
        let rebuilt = BoxOffice::from_parts(
            Some(expected.revenue.worldwide),
            Some(expected.revenue.opening_weekend_usa),
            Some(expected.currency.clone()),
            Some(expected.source.clone()),
            Some(expected.last_updated),
        );
        assert_eq!(rebuilt, Some(expected));
        assert!(BoxOffice::from_parts(Some(1), None, None, None, None).is_none());
    }
}
