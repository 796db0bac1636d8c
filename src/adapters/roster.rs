use crate::adapters::budget::{coerce_budget, parse_budget};
use crate::domain::model::Attendee;
use crate::utils::error::Result;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// One row of a `name,budget` roster file.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub budget: String,
}

impl RosterEntry {
    pub fn into_attendee(self, strict: bool) -> Result<Attendee> {
        let budget = if strict {
            parse_budget(&self.budget)?
        } else {
            coerce_budget(&self.budget)
        };
        Ok(Attendee::new(self.name.trim(), budget))
    }
}

pub fn read_roster<R: Read>(reader: R, strict: bool) -> Result<Vec<Attendee>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut attendees = Vec::new();
    for row in csv_reader.deserialize::<RosterEntry>() {
        attendees.push(row?.into_attendee(strict)?);
    }
    tracing::debug!("Read {} attendees from roster", attendees.len());
    Ok(attendees)
}

pub fn load_roster<P: AsRef<Path>>(path: P, strict: bool) -> Result<Vec<Attendee>> {
    let file = std::fs::File::open(path)?;
    read_roster(file, strict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::AuctionError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_roster() {
        let csv = "name,budget\nMegan,$50\nBob, $75\nMike,100\n";
        let attendees = read_roster(csv.as_bytes(), true).unwrap();

        assert_eq!(
            attendees,
            vec![
                Attendee::new("Megan", 50),
                Attendee::new("Bob", 75),
                Attendee::new("Mike", 100),
            ]
        );
    }

    #[test]
    fn test_strict_roster_rejects_bad_budget() {
        let csv = "name,budget\nMegan,about fifty\n";
        assert!(matches!(
            read_roster(csv.as_bytes(), true),
            Err(AuctionError::InvalidBudgetFormat { .. })
        ));

        let lenient = read_roster(csv.as_bytes(), false).unwrap();
        assert_eq!(lenient[0].budget(), 0);
    }

    #[test]
    fn test_missing_column_is_csv_error() {
        let csv = "name\nMegan\n";
        assert!(matches!(
            read_roster(csv.as_bytes(), false),
            Err(AuctionError::CsvError(_))
        ));
    }

    #[test]
    fn test_load_roster_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"name,budget\nMegan,$50\n").unwrap();

        let attendees = load_roster(temp_file.path(), false).unwrap();
        assert_eq!(attendees, vec![Attendee::new("Megan", 50)]);
    }
}
