use chrono::NaiveDate;

/// Source of the calendar date an auction reports.
///
/// Lets the CLI use the wall clock while tests pin a fixed day.
pub trait Clock {
    fn today(&self) -> NaiveDate;

    fn name(&self) -> &str {
        "Clock"
    }
}
