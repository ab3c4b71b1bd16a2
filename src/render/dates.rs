// src/render/dates.rs
use chrono::NaiveDate;

use crate::analysis::DateRange;

const ISO_DATE: &str = "%Y-%m-%d";

/// Earliest and latest ISO dates among the trend labels. Labels that are not
/// plain dates are skipped.
pub fn span_of_labels(labels: &[String]) -> Option<DateRange> {
    let mut dates = labels.iter()
        .filter_map(|label| NaiveDate::parse_from_str(label.trim(), ISO_DATE).ok());

    let first = dates.next()?;
    let (min, max) = dates.fold((first, first), |(min, max), d| (min.min(d), max.max(d)));

    Some(DateRange::new(
        min.format(ISO_DATE).to_string(),
        max.format(ISO_DATE).to_string(),
    ))
}
