//! Catalogue listing filters expressed as storage-neutral predicates.
//!
//! [`MovieFilter`] holds the optional criteria a caller supplied and
//! [`MovieFilter::predicates`] turns the present ones into an ordered,
//! conjunctive list of [`MoviePredicate`] triples. Adapters render that list
//! once into their own query language; nothing here knows about SQL.

use chrono::{Datelike, NaiveDate};

use super::Movie;

/// Column a predicate constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovieColumn {
    Title,
    ReleaseDate,
    Genre,
    Distributor,
    Budget,
    MpaRating,
}

/// Comparison applied by a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredicateOperator {
    /// Case-insensitive substring match.
    ContainsIgnoreCase,
    /// Case-insensitive whole-value match.
    EqualsIgnoreCase,
    /// Exact match.
    Equals,
    /// Date falls within the given calendar year.
    InYear,
    /// Value is less than or equal to the operand.
    AtMost,
}

/// Operand of a predicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PredicateValue {
    Text(String),
    Integer(i64),
    Year(i32),
}

/// One `(column, operator, value)` condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MoviePredicate {
    pub column: MovieColumn,
    pub operator: PredicateOperator,
    pub value: PredicateValue,
}

impl MoviePredicate {
    /// Build a predicate triple.
    pub const fn new(column: MovieColumn, operator: PredicateOperator, value: PredicateValue) -> Self {
        Self {
            column,
            operator,
            value,
        }
    }

    /// Evaluate the predicate against an in-memory record.
    ///
    /// Mirrors the semantics storage adapters render: absent optional values
    /// never match, and combinations no filter produces evaluate to `false`.
    pub fn matches(&self, movie: &Movie) -> bool {
        match (self.column, self.operator, &self.value) {
            (MovieColumn::Title, PredicateOperator::ContainsIgnoreCase, PredicateValue::Text(needle)) => {
                movie.title.to_lowercase().contains(&needle.to_lowercase())
            }
            (MovieColumn::ReleaseDate, PredicateOperator::InYear, PredicateValue::Year(year)) => {
                movie.release_date.year() == *year
            }
            (MovieColumn::Genre, PredicateOperator::EqualsIgnoreCase, PredicateValue::Text(genre)) => {
                movie.genre.to_lowercase() == genre.to_lowercase()
            }
            (
                MovieColumn::Distributor,
                PredicateOperator::EqualsIgnoreCase,
                PredicateValue::Text(distributor),
            ) => movie
                .distributor
                .as_deref()
                .is_some_and(|value| value.to_lowercase() == distributor.to_lowercase()),
            (MovieColumn::Budget, PredicateOperator::AtMost, PredicateValue::Integer(max)) => {
                movie.budget.is_some_and(|budget| budget <= *max)
            }
            (MovieColumn::MpaRating, PredicateOperator::Equals, PredicateValue::Text(rating)) => {
                movie.mpa_rating.as_deref() == Some(rating.as_str())
            }
            _ => false,
        }
    }
}

/// First day of `year` and first day of the following year.
///
/// Returns `None` when either bound falls outside the supported date range.
///
/// # Examples
/// ```
/// use movie_catalogue::domain::year_bounds;
///
/// let (start, end) = year_bounds(2010).expect("representable year");
/// assert_eq!(start.to_string(), "2010-01-01");
/// assert_eq!(end.to_string(), "2011-01-01");
/// ```
pub fn year_bounds(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let end = NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?;
    Some((start, end))
}

/// Optional listing criteria; every present field is ANDed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MovieFilter {
    /// Case-insensitive title substring.
    pub title: Option<String>,
    /// Release year.
    pub year: Option<i32>,
    /// Case-insensitive genre.
    pub genre: Option<String>,
    /// Case-insensitive distributor.
    pub distributor: Option<String>,
    /// Inclusive budget ceiling.
    pub max_budget: Option<i64>,
    /// Exact MPA rating.
    pub mpa_rating: Option<String>,
}

impl MovieFilter {
    /// Translate present criteria into predicates.
    ///
    /// Blank strings count as absent.
    ///
    /// # Examples
    /// ```
    /// use movie_catalogue::domain::{MovieColumn, MovieFilter};
    ///
    /// let filter = MovieFilter {
    ///     genre: Some("Drama".into()),
    ///     title: Some("  ".into()),
    ///     ..MovieFilter::default()
    /// };
    /// let predicates = filter.predicates();
    /// assert_eq!(predicates.len(), 1);
    /// assert_eq!(predicates[0].column, MovieColumn::Genre);
    /// ```
    pub fn predicates(&self) -> Vec<MoviePredicate> {
        let mut predicates = Vec::new();
        if let Some(title) = non_blank(self.title.as_deref()) {
            predicates.push(MoviePredicate::new(
                MovieColumn::Title,
                PredicateOperator::ContainsIgnoreCase,
                PredicateValue::Text(title),
            ));
        }
        if let Some(year) = self.year {
            predicates.push(MoviePredicate::new(
                MovieColumn::ReleaseDate,
                PredicateOperator::InYear,
                PredicateValue::Year(year),
            ));
        }
        if let Some(genre) = non_blank(self.genre.as_deref()) {
            predicates.push(MoviePredicate::new(
                MovieColumn::Genre,
                PredicateOperator::EqualsIgnoreCase,
                PredicateValue::Text(genre),
            ));
        }
        if let Some(distributor) = non_blank(self.distributor.as_deref()) {
            predicates.push(MoviePredicate::new(
                MovieColumn::Distributor,
                PredicateOperator::EqualsIgnoreCase,
                PredicateValue::Text(distributor),
            ));
        }
        if let Some(max_budget) = self.max_budget {
            predicates.push(MoviePredicate::new(
                MovieColumn::Budget,
                PredicateOperator::AtMost,
                PredicateValue::Integer(max_budget),
            ));
        }
        if let Some(rating) = non_blank(self.mpa_rating.as_deref()) {
            predicates.push(MoviePredicate::new(
                MovieColumn::MpaRating,
                PredicateOperator::Equals,
                PredicateValue::Text(rating),
            ));
        }
        predicates
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MovieId;
    use rstest::{fixture, rstest};

    #[fixture]
    fn inception() -> Movie {
        Movie {
            id: MovieId::new(1),
            title: "Inception".to_owned(),
            genre: "Sci-Fi".to_owned(),
            release_date: NaiveDate::from_ymd_opt(2010, 7, 16).expect("valid date"),
            distributor: Some("Warner Bros.".to_owned()),
            budget: Some(160_000_000),
            mpa_rating: Some("PG-13".to_owned()),
            box_office: None,
        }
    }

    #[test]
    fn empty_filter_has_no_predicates() {
        assert!(MovieFilter::default().predicates().is_empty());
    }

    #[test]
    fn predicates_follow_fixed_column_order() {
        let filter = MovieFilter {
            title: Some("inc".to_owned()),
            year: Some(2010),
            genre: Some("sci-fi".to_owned()),
            distributor: Some("warner bros.".to_owned()),
            max_budget: Some(200_000_000),
            mpa_rating: Some("PG-13".to_owned()),
        };
        let columns: Vec<_> = filter.predicates().iter().map(|p| p.column).collect();
        assert_eq!(
            columns,
            vec![
                MovieColumn::Title,
                MovieColumn::ReleaseDate,
                MovieColumn::Genre,
                MovieColumn::Distributor,
                MovieColumn::Budget,
                MovieColumn::MpaRating,
            ]
        );
    }

    #[rstest]
    #[case(MovieFilter { title: Some("CEPT".into()), ..MovieFilter::default() }, true)]
    #[case(MovieFilter { year: Some(2010), ..MovieFilter::default() }, true)]
    #[case(MovieFilter { year: Some(2011), ..MovieFilter::default() }, false)]
    #[case(MovieFilter { genre: Some("sci-fi".into()), ..MovieFilter::default() }, true)]
    #[case(MovieFilter { genre: Some("sci".into()), ..MovieFilter::default() }, false)]
    #[case(MovieFilter { distributor: Some("WARNER BROS.".into()), ..MovieFilter::default() }, true)]
    #[case(MovieFilter { max_budget: Some(160_000_000), ..MovieFilter::default() }, true)]
    #[case(MovieFilter { max_budget: Some(159_999_999), ..MovieFilter::default() }, false)]
    #[case(MovieFilter { mpa_rating: Some("pg-13".into()), ..MovieFilter::default() }, false)]
    fn predicates_evaluate_in_memory(
        inception: Movie,
        #[case] filter: MovieFilter,
        #[case] expected: bool,
    ) {
        let matched = filter.predicates().iter().all(|p| p.matches(&inception));
        assert_eq!(matched, expected);
    }

    #[rstest]
    fn absent_optional_column_never_matches(mut inception: Movie) {
        inception.budget = None;
        let filter = MovieFilter {
            max_budget: Some(i64::MAX),
            ..MovieFilter::default()
        };
        assert!(!filter.predicates().iter().all(|p| p.matches(&inception)));
    }

    #[test]
    fn year_bounds_reject_unrepresentable_years() {
        assert!(year_bounds(i32::MAX).is_none());
    }
}
