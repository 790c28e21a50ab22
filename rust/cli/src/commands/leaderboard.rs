//! Leaderboard command: print stored standings.

use super::tournament::write_standings;
use crate::error::CliError;
use crate::store::Leaderboard;
use std::io::Write;
use std::path::Path;

/// Handle the leaderboard command.
///
/// The database must already exist; a missing file is reported instead of
/// silently creating an empty board.
pub fn handle_leaderboard_command(
    db: &Path,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if !db.is_file() {
        return Err(CliError::InvalidInput(format!(
            "leaderboard database not found: {}",
            db.display()
        )));
    }
    let board = Leaderboard::open(db)?;
    let standings = board.standings()?;

    if json {
        let s = serde_json::to_string_pretty(&standings).map_err(std::io::Error::other)?;
        writeln!(out, "{}", s)?;
    } else if standings.is_empty() {
        writeln!(out, "No matches recorded yet")?;
    } else {
        write_standings(out, &standings)?;
        writeln!(out, "Matches recorded: {}", board.match_count()?)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_database_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        let res = handle_leaderboard_command(&dir.path().join("none.sqlite"), false, &mut out);
        assert!(matches!(res, Err(CliError::InvalidInput(_))));
        assert!(!dir.path().join("none.sqlite").exists());
    }

    #[test]
    fn empty_board_says_so() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lb.sqlite");
        Leaderboard::open(&path).unwrap();

        let mut out = Vec::new();
        handle_leaderboard_command(&path, false, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No matches recorded yet\n");

        let mut out = Vec::new();
        handle_leaderboard_command(&path, true, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().trim(), "[]");
    }
}
