//! Day counters derived from form dates.
//!
//! All arithmetic is on civil dates, so a DST transition between the two
//! operands cannot shift the count by one.

use jiff::Zoned;
use jiff::civil::Date;

use carenote_core::models::field_group::FieldGroup;
use carenote_core::models::preview::DerivedValue;

use crate::schema::{Counter, FormSchema};

/// Days after the end of a course during which the post-therapy label shows.
pub const POST_COURSE_WINDOW: i64 = 3;

/// Whole calendar days from `a` to `b` (negative when `b` is earlier).
pub fn days_between(a: Date, b: Date) -> i64 {
    i64::from((b - a).get_days())
}

/// The civil date of `now` in its own time zone.
pub fn local_today(now: &Zoned) -> Date {
    now.date()
}

/// A computed position within a course or window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayCount {
    /// Course with no end date yet.
    Open { day: i64 },
    /// Within a course of known length, or a fixed window.
    Within { day: i64, total: i64 },
    /// `day` days after the course ended, up to [`POST_COURSE_WINDOW`].
    PostCourse { day: i64 },
}

impl DayCount {
    pub fn label(&self) -> String {
        match self {
            DayCount::Open { day } => format!("Day {day}/?"),
            DayCount::Within { day, total } => format!("Day {day}/{total}"),
            DayCount::PostCourse { day } => {
                format!("Post-therapy Day {day}/{POST_COURSE_WINDOW}")
            }
        }
    }
}

/// Position within a treatment course.
///
/// Returns `None` once the post-therapy window has passed, or when `end`
/// precedes `start`.
pub fn course_day(start: Date, end: Option<Date>, today: Date) -> Option<DayCount> {
    let elapsed = days_between(start, today) + 1;
    let Some(end) = end else {
        return Some(DayCount::Open {
            day: elapsed.max(1),
        });
    };

    let total = days_between(start, end) + 1;
    if total < 1 {
        return None;
    }

    let since_end = days_between(end, today);
    if since_end <= 0 {
        Some(DayCount::Within {
            day: elapsed.clamp(1, total),
            total,
        })
    } else if since_end <= POST_COURSE_WINDOW {
        Some(DayCount::PostCourse { day: since_end })
    } else {
        None
    }
}

/// Position within a fixed window of `days` days starting at `start`.
pub fn window_day(start: Date, days: u32, today: Date) -> DayCount {
    let total = i64::from(days.max(1));
    DayCount::Within {
        day: (days_between(start, today) + 1).clamp(1, total),
        total,
    }
}

/// Derived values for one FieldGroup, in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedFieldSet {
    values: Vec<DerivedValue>,
}

impl DerivedFieldSet {
    /// The rendered label of a derived value, if it has one.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|v| v.name == name)
            .and_then(|v| v.value.as_deref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.iter().any(|v| v.name == name)
    }

    pub fn values(&self) -> &[DerivedValue] {
        &self.values
    }

    pub fn into_values(self) -> Vec<DerivedValue> {
        self.values
    }
}

/// Compute every derived value the schema declares. Pure.
pub fn compute_derived(schema: &FormSchema, fields: &FieldGroup, today: Date) -> DerivedFieldSet {
    let values = schema
        .derived()
        .iter()
        .map(|def| {
            let count = match &def.counter {
                Counter::Course { start, end } => read_date(fields, start).and_then(|start| {
                    let end = end.as_deref().and_then(|e| read_date(fields, e));
                    course_day(start, end, today)
                }),
                Counter::Window { start, days } => {
                    read_date(fields, start).map(|start| window_day(start, *days, today))
                }
            };
            DerivedValue {
                name: def.name.clone(),
                value: count.map(|c| c.label()),
            }
        })
        .collect();

    DerivedFieldSet { values }
}

fn read_date(fields: &FieldGroup, name: &str) -> Option<Date> {
    match fields.date(name) {
        Ok(date) => date,
        Err(e) => {
            tracing::debug!(error = %e, "ignoring unparseable date");
            None
        }
    }
}
