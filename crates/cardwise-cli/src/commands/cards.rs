//! Owned card listing

use anyhow::Result;
use cardwise_core::{CardRepository, Snapshot};

use super::truncate;

pub fn cmd_cards(snapshot: &Snapshot, user: i64, json: bool) -> Result<()> {
    let cards = snapshot.owned_cards(user)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&cards)?);
        return Ok(());
    }

    println!();
    println!("💳 Cards held by user {}", user);
    println!("   ─────────────────────────────────────────────────────────────");

    if cards.is_empty() {
        println!("   No cards held.");
        return Ok(());
    }

    let catalog = snapshot.catalog()?;

    println!(
        "   {:>5} │ {:24} │ {:16} │ {:>10} │ {:>5}",
        "ID", "Card", "Issuer", "Fee", "Rules"
    );
    println!("   ──────┼──────────────────────────┼──────────────────┼────────────┼───────");
    for card in &cards {
        println!(
            "   {:>5} │ {:24} │ {:16} │ {:>10} │ {:>5}",
            card.card_id,
            truncate(&card.display_name, 24),
            truncate(&card.issuer, 16),
            card.annual_fee,
            catalog.rules_for_card(card.card_id).count()
        );
    }

    Ok(())
}
