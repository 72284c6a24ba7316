//! Per-rater movie scores and their aggregate.

use std::fmt;

/// Rating on the half-step scale 0.5 through 5.0.
///
/// Stored internally as a count of half stars so equality is exact.
///
/// # Examples
/// ```
/// use movie_catalogue::domain::RatingValue;
///
/// assert_eq!(RatingValue::new(3.5).map(RatingValue::value), Some(3.5));
/// assert!(RatingValue::new(3.3).is_none());
/// assert!(RatingValue::new(0.0).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RatingValue(u8);

impl RatingValue {
    pub const MIN_HALF_STEPS: u8 = 1;
    pub const MAX_HALF_STEPS: u8 = 10;

    /// Accept `value` only when it is exactly one of the half steps.
    pub fn new(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let doubled = value * 2.0;
        if doubled.fract() != 0.0 {
            return None;
        }
        let steps = doubled as i64;
        u8::try_from(steps)
            .ok()
            .filter(|steps| (Self::MIN_HALF_STEPS..=Self::MAX_HALF_STEPS).contains(steps))
            .map(Self)
    }

    /// Numeric rating.
    pub fn value(self) -> f64 {
        f64::from(self.0) / 2.0
    }
}

impl fmt::Display for RatingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.value())
    }
}

/// Stored rating returned after a submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Rating {
    pub movie_title: String,
    pub rater_id: String,
    pub value: RatingValue,
}

/// Whether an upsert created a new rating or overwrote an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingUpsertOutcome {
    Created,
    Updated,
}

impl RatingUpsertOutcome {
    /// Map the storage "row was inserted" flag onto an outcome.
    pub const fn from_inserted(inserted: bool) -> Self {
        if inserted { Self::Created } else { Self::Updated }
    }
}

/// Average and count over all ratings for one movie.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingAggregate {
    pub average: f64,
    pub count: i64,
}

impl RatingAggregate {
    /// Build the aggregate from raw storage totals.
    ///
    /// An empty set yields `0.0`. The average is rounded to one decimal place,
    /// half away from zero.
    ///
    /// # Examples
    /// ```
    /// use movie_catalogue::domain::RatingAggregate;
    ///
    /// let aggregate = RatingAggregate::from_totals(Some(4.25), 4);
    /// assert_eq!(aggregate.average, 4.3);
    /// assert_eq!(RatingAggregate::from_totals(None, 0).average, 0.0);
    /// ```
    pub fn from_totals(average: Option<f64>, count: i64) -> Self {
        if count == 0 {
            return Self {
                average: 0.0,
                count,
            };
        }
        let rounded = average.map_or(0.0, |avg| (avg * 10.0).round() / 10.0);
        Self {
            average: rounded,
            count,
        }
    }
}
