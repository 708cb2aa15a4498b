//! Roster import: CSV export of a competition's registrations (`athleteId,clubId`).

use crate::models::Competitor;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug)]
pub enum RosterError {
    Csv(csv::Error),
    /// Row with a blank athlete id (1-based file line, header is line 1).
    MissingAthleteId { line: usize },
}

impl std::fmt::Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterError::Csv(e) => write!(f, "Invalid roster CSV: {}", e),
            RosterError::MissingAthleteId { line } => write!(f, "Missing athleteId on line {}", line),
        }
    }
}

impl std::error::Error for RosterError {}

impl From<csv::Error> for RosterError {
    fn from(e: csv::Error) -> Self {
        RosterError::Csv(e)
    }
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "athleteId")]
    athlete_id: String,
    #[serde(rename = "clubId", default)]
    club_id: Option<String>,
}

/// Parse a roster with an `athleteId` column and an optional `clubId` column.
pub fn read_roster<R: Read>(reader: R) -> Result<Vec<Competitor>, RosterError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut competitors = Vec::new();
    for (i, row) in rdr.deserialize::<RosterRow>().enumerate() {
        let row = row?;
        if row.athlete_id.is_empty() {
            return Err(RosterError::MissingAthleteId { line: i + 2 });
        }
        competitors.push(Competitor {
            id: row.athlete_id,
            club_id: row.club_id.filter(|c| !c.is_empty()),
        });
    }
    Ok(competitors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_ids_and_optional_clubs() {
        let csv = "athleteId,clubId\na1,c1\na2,\n a3 , c2\n";
        let roster = read_roster(csv.as_bytes()).unwrap();
        assert_eq!(
            roster,
            vec![
                Competitor::with_club("a1", "c1"),
                Competitor::new("a2"),
                Competitor::with_club("a3", "c2"),
            ]
        );
    }

    #[test]
    fn club_column_is_optional() {
        let roster = read_roster("athleteId\nx\ny\n".as_bytes()).unwrap();
        assert_eq!(roster, vec![Competitor::new("x"), Competitor::new("y")]);
    }

    #[test]
    fn blank_athlete_id_names_the_line() {
        let err = read_roster("athleteId,clubId\na1,c1\n,c2\n".as_bytes()).unwrap_err();
        assert!(matches!(err, RosterError::MissingAthleteId { line: 3 }));
    }
}
