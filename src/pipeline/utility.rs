//! Date text inference for the raw `data` column.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{PrepError, PrepResult};

/// A textual layout a raw date value may follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateLayout {
    /// Calendar date only
    Date(&'static str),
    /// Date and time of day. Only the date is kept, so the output shows
    /// `2021-03-15` for `2021-03-15 13:45:00`.
    DateTime(&'static str),
}

impl DateLayout {
    pub fn parse(&self, text: &str) -> Option<NaiveDate> {
        match self {
            DateLayout::Date(fmt) => NaiveDate::parse_from_str(text, fmt).ok(),
            DateLayout::DateTime(fmt) => NaiveDateTime::parse_from_str(text, fmt)
                .ok()
                .map(|dt| dt.date()),
        }
    }
}

/// Candidate layouts in inference priority. Month-first wins over day-first
/// for ambiguous slash dates.
pub const DATE_LAYOUTS: [DateLayout; 11] = [
    DateLayout::Date("%Y-%m-%d"),
    DateLayout::DateTime("%Y-%m-%d %H:%M:%S"),
    DateLayout::DateTime("%Y-%m-%dT%H:%M:%S"),
    DateLayout::DateTime("%Y-%m-%d %H:%M:%S%.f"),
    DateLayout::DateTime("%Y-%m-%d %H:%M"),
    DateLayout::Date("%Y/%m/%d"),
    DateLayout::Date("%Y%m%d"),
    DateLayout::Date("%m/%d/%Y"),
    DateLayout::Date("%d/%m/%Y"),
    DateLayout::Date("%d.%m.%Y"),
    DateLayout::Date("%d-%m-%Y"),
];

/// Pick the first layout that accepts `sample`.
pub fn infer_layout(sample: &str) -> Option<DateLayout> {
    DATE_LAYOUTS.iter().copied().find(|layout| layout.parse(sample).is_some())
}

/// Parse a column of date strings.
///
/// The layout is inferred from the first non-empty value and tried first for
/// every row; rows it rejects fall back to the other layouts. Missing or blank
/// values stay missing. A value no layout accepts is a hard error.
pub fn parse_dates<'a, I>(values: I) -> PrepResult<Vec<Option<NaiveDate>>>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut inferred: Option<DateLayout> = None;
    let mut out = Vec::new();

    for (row, value) in values.into_iter().enumerate() {
        let text = match value.map(str::trim) {
            Some(t) if !t.is_empty() => t,
            _ => {
                out.push(None);
                continue;
            }
        };

        let layout = match inferred {
            Some(layout) => layout,
            None => {
                let layout = infer_layout(text).ok_or_else(|| PrepError::Parse {
                    row,
                    value: text.to_string(),
                })?;
                inferred = Some(layout);
                layout
            }
        };

        let date = layout
            .parse(text)
            .or_else(|| DATE_LAYOUTS.iter().find_map(|l| l.parse(text)))
            .ok_or_else(|| PrepError::Parse {
                row,
                value: text.to_string(),
            })?;
        out.push(Some(date));
    }

    Ok(out)
}
