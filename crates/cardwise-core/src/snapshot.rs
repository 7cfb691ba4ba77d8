//! In-memory snapshot repository
//!
//! A snapshot is one JSON document holding the card catalog, card ownership
//! and expense records. Expenses can also be appended from a CSV export with
//! the header `owner,category_id,amount,occurred_at` (RFC 3339 timestamps).

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::engine::aggregate::checked_total;
use crate::error::{Error, Result};
use crate::models::{BenefitRule, CardSummary, Category, ExpenseRecord, UserCard, UserId};
use crate::repository::{CardRepository, ExpenseRepository};
use crate::window::SpendingWindow;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub cards: Vec<CardSummary>,
    #[serde(default)]
    pub benefit_rules: Vec<BenefitRule>,
    #[serde(default)]
    pub user_cards: Vec<UserCard>,
    #[serde(default)]
    pub expenses: Vec<ExpenseRecord>,
}

impl Snapshot {
    /// Read and validate a snapshot JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let snapshot: Snapshot = serde_json::from_reader(BufReader::new(file))?;
        snapshot.validate()?;

        tracing::debug!(
            path = %path.display(),
            cards = snapshot.cards.len(),
            rules = snapshot.benefit_rules.len(),
            expenses = snapshot.expenses.len(),
            "Loaded snapshot"
        );

        Ok(snapshot)
    }

    /// Parse and validate a snapshot from a JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(content)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Append expenses from a CSV file, returning how many were added
    pub fn load_expenses_csv(&mut self, path: &Path) -> Result<usize> {
        let file = File::open(path)?;
        let expenses = parse_expenses_csv(file)?;
        let count = expenses.len();
        self.expenses.extend(expenses);

        tracing::debug!(path = %path.display(), count, "Loaded expenses from CSV");
        Ok(count)
    }

    /// Check the catalog, expenses and ownership links
    pub fn validate(&self) -> Result<()> {
        self.build_catalog()?;

        for expense in &self.expenses {
            expense.validate()?;
        }

        for link in &self.user_cards {
            if !self.cards.iter().any(|c| c.card_id == link.card_id) {
                return Err(Error::InvalidData(format!(
                    "User {} owns unknown card {}",
                    link.owner, link.card_id
                )));
            }
        }

        Ok(())
    }

    fn build_catalog(&self) -> Result<Catalog> {
        Catalog::new(
            self.categories.clone(),
            self.cards.clone(),
            self.benefit_rules.clone(),
        )
    }
}

/// Parse expense records from CSV
///
/// Negative amounts are rejected here so bad exports fail at load time.
pub fn parse_expenses_csv<R: Read>(reader: R) -> Result<Vec<ExpenseRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut expenses = Vec::new();
    for row in rdr.deserialize() {
        let expense: ExpenseRecord = row?;
        expense.validate()?;
        expenses.push(expense);
    }
    Ok(expenses)
}

impl ExpenseRepository for Snapshot {
    fn expenses_for(&self, owner: UserId, window: &SpendingWindow) -> Result<Vec<ExpenseRecord>> {
        Ok(self
            .expenses
            .iter()
            .filter(|e| e.owner == owner && window.contains(e.occurred_at))
            .cloned()
            .collect())
    }

    fn peer_totals(&self, window: &SpendingWindow) -> Result<Vec<i64>> {
        let mut by_user: BTreeMap<UserId, i64> = BTreeMap::new();
        for expense in self.expenses.iter().filter(|e| window.contains(e.occurred_at)) {
            let total = by_user.entry(expense.owner).or_insert(0);
            *total = checked_total(*total, expense.amount, "Peer spending total")?;
        }
        Ok(by_user.into_values().collect())
    }
}

impl CardRepository for Snapshot {
    fn owned_cards(&self, owner: UserId) -> Result<Vec<CardSummary>> {
        self.user_cards
            .iter()
            .filter(|link| link.owner == owner)
            .map(|link| {
                self.cards
                    .iter()
                    .find(|c| c.card_id == link.card_id)
                    .cloned()
                    .ok_or_else(|| Error::NotFound(format!("Card {}", link.card_id)))
            })
            .collect()
    }

    fn catalog(&self) -> Result<Catalog> {
        self.build_catalog()
    }
}
