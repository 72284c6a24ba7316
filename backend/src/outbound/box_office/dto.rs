//! Wire shapes for the box-office lookup endpoint.
//!
//! Decoding is lenient in the same places the upstream is sloppy: blank
//! strings and non-positive budgets mean "unknown", and missing revenue
//! figures read as zero.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::{BoxOffice, BoxOfficeRecord, BoxOfficeRevenue};

pub(super) const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct BoxOfficeRevenueDto {
    #[serde(default)]
    pub(super) worldwide: i64,
    #[serde(default, rename = "openingWeekendUSA")]
    pub(super) opening_weekend_usa: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct BoxOfficeResponseDto {
    #[serde(default)]
    pub(super) distributor: Option<String>,
    #[serde(default)]
    pub(super) budget: Option<i64>,
    #[serde(default)]
    pub(super) revenue: BoxOfficeRevenueDto,
    #[serde(default)]
    pub(super) mpa_rating: Option<String>,
    #[serde(default)]
    pub(super) currency: Option<String>,
    #[serde(default)]
    pub(super) last_updated: Option<DateTime<Utc>>,
}

/// Values the adapter supplies when the payload omits them.
pub(super) struct RecordDefaults<'a> {
    pub(super) source: &'a str,
    pub(super) fetched_at: DateTime<Utc>,
}

impl BoxOfficeResponseDto {
    pub(super) fn into_record(self, defaults: &RecordDefaults<'_>) -> BoxOfficeRecord {
        BoxOfficeRecord {
            distributor: non_blank(self.distributor),
            budget: self.budget.filter(|budget| *budget > 0),
            mpa_rating: non_blank(self.mpa_rating),
            box_office: BoxOffice {
                revenue: BoxOfficeRevenue {
                    worldwide: self.revenue.worldwide,
                    opening_weekend_usa: self.revenue.opening_weekend_usa,
                },
                currency: non_blank(self.currency).unwrap_or_else(|| DEFAULT_CURRENCY.to_owned()),
                source: defaults.source.to_owned(),
                last_updated: self.last_updated.unwrap_or(defaults.fetched_at),
            },
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
