//! Balance book module
//!
//! This module provides the `BalanceBook` struct which holds the in-memory
//! balance of every provisioned tag. It is loaded once at startup, owned by
//! the scan loop, and passed by reference to every component that reads or
//! mutates balances.
//!
//! The BalanceBook is responsible for:
//! - Looking up balances by exact tag match
//! - Crediting recharges and debiting scan fees with checked arithmetic
//! - Providing a deterministic (tag-sorted) view for persistence
//!
//! The book never creates a record on its own: `credit` and `debit` on an
//! unknown tag return `Ok(None)` and leave the book untouched. New tags only
//! enter through `insert`, which is used when loading the balance file.

use crate::types::{Balance, LedgerError, TagId};
use std::collections::BTreeMap;

/// In-memory mapping from tag to balance
///
/// Backed by a `BTreeMap` so iteration order, and therefore the balance file
/// layout, is sorted by tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceBook {
    /// Map of tag identifiers to balances
    balances: BTreeMap<TagId, Balance>,
}

impl BalanceBook {
    /// Create a new BalanceBook with no records
    pub fn new() -> Self {
        BalanceBook {
            balances: BTreeMap::new(),
        }
    }

    /// Insert or replace the balance of a tag
    ///
    /// Used when loading the balance file; a later row for the same tag
    /// replaces an earlier one.
    pub fn insert(&mut self, tag: impl Into<TagId>, balance: Balance) {
        self.balances.insert(tag.into(), balance);
    }

    /// Get the balance of a tag, if the tag is known
    pub fn get(&self, tag: &str) -> Option<Balance> {
        self.balances.get(tag).copied()
    }

    /// Check whether a tag has a balance record
    pub fn contains(&self, tag: &str) -> bool {
        self.balances.contains_key(tag)
    }

    /// Add credit to a known tag
    ///
    /// # Arguments
    ///
    /// * `tag` - The tag to credit
    /// * `amount` - The amount to add
    ///
    /// # Returns
    ///
    /// * `Ok(Some(balance))` - The new balance, if the tag is known
    /// * `Ok(None)` - The tag is unknown; nothing changed
    /// * `Err(LedgerError)` - If overflow would occur; the balance is unchanged
    pub fn credit(&mut self, tag: &str, amount: Balance) -> Result<Option<Balance>, LedgerError> {
        let Some(balance) = self.balances.get_mut(tag) else {
            return Ok(None);
        };

        let new_balance = balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("credit", tag))?;

        *balance = new_balance;
        Ok(Some(new_balance))
    }

    /// Remove credit from a known tag
    ///
    /// No sufficiency check happens here; the gate decides whether a debit
    /// is allowed.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(balance))` - The new balance, if the tag is known
    /// * `Ok(None)` - The tag is unknown; nothing changed
    /// * `Err(LedgerError)` - If underflow would occur; the balance is unchanged
    pub fn debit(&mut self, tag: &str, amount: Balance) -> Result<Option<Balance>, LedgerError> {
        let Some(balance) = self.balances.get_mut(tag) else {
            return Ok(None);
        };

        let new_balance = balance
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("debit", tag))?;

        *balance = new_balance;
        Ok(Some(new_balance))
    }

    /// Iterate over all records in tag order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Balance)> {
        self.balances
            .iter()
            .map(|(tag, balance)| (tag.as_str(), *balance))
    }

    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }
}

impl<T: Into<TagId>> FromIterator<(T, Balance)> for BalanceBook {
    fn from_iter<I: IntoIterator<Item = (T, Balance)>>(iter: I) -> Self {
        let mut book = BalanceBook::new();
        for (tag, balance) in iter {
            book.insert(tag, balance);
        }
        book
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_new_creates_empty_book() {
        let book = BalanceBook::new();
        assert!(book.is_empty());
        assert_eq!(book.len(), 0);
        assert_eq!(book.get("A1"), None);
    }

    #[test]
    fn test_get_is_exact_match() {
        let book: BalanceBook = [("A1", 20)].into_iter().collect();

        assert_eq!(book.get("A1"), Some(20));
        assert_eq!(book.get("a1"), None);
        assert_eq!(book.get("A1 "), None);
    }

    #[test]
    fn test_insert_replaces_existing_balance() {
        let mut book = BalanceBook::new();
        book.insert("A1", 20);
        book.insert("A1", 35);

        assert_eq!(book.len(), 1);
        assert_eq!(book.get("A1"), Some(35));
    }

    #[rstest]
    #[case::positive(20, 15, 35)]
    #[case::from_zero(0, 10, 10)]
    #[case::from_negative(-5, 10, 5)]
    fn test_credit_known_tag(#[case] start: Balance, #[case] amount: Balance, #[case] expected: Balance) {
        let mut book: BalanceBook = [("A1", start)].into_iter().collect();

        let result = book.credit("A1", amount).unwrap();

        assert_eq!(result, Some(expected));
        assert_eq!(book.get("A1"), Some(expected));
    }

    #[test]
    fn test_credit_unknown_tag_does_not_create_record() {
        let mut book: BalanceBook = [("A1", 20)].into_iter().collect();

        let result = book.credit("ZZ", 50).unwrap();

        assert_eq!(result, None);
        assert!(!book.contains("ZZ"));
        assert_eq!(book.len(), 1);
    }

    #[rstest]
    #[case::regular(50, 10, 40)]
    #[case::below_zero(5, 10, -5)]
    fn test_debit_known_tag(#[case] start: Balance, #[case] amount: Balance, #[case] expected: Balance) {
        let mut book: BalanceBook = [("A1", start)].into_iter().collect();

        assert_eq!(book.debit("A1", amount).unwrap(), Some(expected));
        assert_eq!(book.get("A1"), Some(expected));
    }

    #[test]
    fn test_debit_unknown_tag_is_noop() {
        let mut book = BalanceBook::new();
        assert_eq!(book.debit("ZZ", 10).unwrap(), None);
        assert!(book.is_empty());
    }

    #[test]
    fn test_credit_overflow_leaves_balance_unchanged() {
        let mut book: BalanceBook = [("A1", Balance::MAX)].into_iter().collect();

        let result = book.credit("A1", 1);

        assert!(matches!(
            result.unwrap_err(),
            LedgerError::ArithmeticOverflow { .. }
        ));
        assert_eq!(book.get("A1"), Some(Balance::MAX));
    }

    #[test]
    fn test_debit_underflow_leaves_balance_unchanged() {
        let mut book: BalanceBook = [("A1", Balance::MIN)].into_iter().collect();

        assert!(book.debit("A1", 10).is_err());
        assert_eq!(book.get("A1"), Some(Balance::MIN));
    }

    #[test]
    fn test_iter_is_sorted_by_tag() {
        let book: BalanceBook = [("C3", 3), ("A1", 1), ("B2", 2)].into_iter().collect();

        let tags: Vec<&str> = book.iter().map(|(tag, _)| tag).collect();
        assert_eq!(tags, vec!["A1", "B2", "C3"]);
    }
}
