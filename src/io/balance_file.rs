//! Balance file persistence
//!
//! The balance file holds one `tag,balance` row per provisioned tag. It is
//! read once at startup and rewritten in full after every change; there is no
//! incremental update and no protection against a crash mid-write.

use crate::core::BalanceBook;
use crate::io::csv_format::{read_amount_rows, write_balances_csv};
use crate::types::LedgerError;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

/// Load the balance book from `path`
///
/// A missing file yields an empty book. Rows with the wrong number of fields
/// are skipped; a non-integer balance is an error.
pub fn load_balances(path: &Path) -> Result<BalanceBook, LedgerError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::info!(
                "Balance file '{}' not found, starting with no balances",
                path.display()
            );
            return Ok(BalanceBook::new());
        }
        Err(e) => return Err(e.into()),
    };

    let book: BalanceBook = read_amount_rows(BufReader::new(file))?
        .into_iter()
        .map(|row| (row.tag, row.amount))
        .collect();

    log::debug!("Loaded {} balance(s) from '{}'", book.len(), path.display());
    Ok(book)
}

/// Overwrite `path` with the full contents of `book`
pub fn save_balances(path: &Path, book: &BalanceBook) -> Result<(), LedgerError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_balances_csv(book, &mut writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Balance;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_returns_empty_book() {
        let dir = TempDir::new().expect("Failed to create temp dir");

        let book = load_balances(&dir.path().join("balance_data.csv")).unwrap();

        assert!(book.is_empty());
    }

    #[test]
    fn test_load_reads_rows() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("balance_data.csv");
        fs::write(&path, "A1,20\nB2,0\n").unwrap();

        let book = load_balances(&path).unwrap();

        assert_eq!(book.len(), 2);
        assert_eq!(book.get("A1"), Some(20));
        assert_eq!(book.get("B2"), Some(0));
    }

    #[test]
    fn test_load_later_row_wins() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("balance_data.csv");
        fs::write(&path, "A1,20\nA1,70\n").unwrap();

        let book = load_balances(&path).unwrap();

        assert_eq!(book.get("A1"), Some(70));
    }

    #[test]
    fn test_load_fails_on_malformed_balance() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("balance_data.csv");
        fs::write(&path, "A1,20\nB2,lots\n").unwrap();

        let result = load_balances(&path);

        assert!(matches!(
            result.unwrap_err(),
            LedgerError::ParseError { line: Some(2), .. }
        ));
    }

    #[test]
    fn test_save_overwrites_previous_content() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("balance_data.csv");
        fs::write(&path, "OLD,1\nSTALE,2\n").unwrap();

        let book: BalanceBook = [("A1", 25)].into_iter().collect();
        save_balances(&path, &book).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "A1,25\n");
    }

    #[test]
    fn test_save_empty_book_truncates_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("balance_data.csv");
        fs::write(&path, "A1,25\n").unwrap();

        save_balances(&path, &BalanceBook::new()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[rstest]
    #[case::empty(vec![])]
    #[case::single(vec![("A1", 20)])]
    #[case::mixed_signs(vec![("A1", 20), ("B2", 0), ("C3", -5), ("D4", Balance::MAX), ("E5", Balance::MIN)])]
    #[case::odd_tags(vec![("04 A2 19 7B", 10), ("tag,with,commas", 3), ("\"quoted\"", 7)])]
    #[case::whitespace_tags(vec![(" A1 ", 20), ("B2\t", 5), ("B2", 6)])]
    fn test_save_load_round_trip(#[case] entries: Vec<(&str, Balance)>) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("balance_data.csv");
        let book: BalanceBook = entries.into_iter().collect();

        save_balances(&path, &book).unwrap();
        let loaded = load_balances(&path).unwrap();
        save_balances(&path, &loaded).unwrap();

        assert_eq!(loaded, book);
        assert_eq!(load_balances(&path).unwrap(), book);
    }
}
