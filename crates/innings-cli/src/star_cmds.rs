//! `innings star` commands: bookmark opportunities from the catalog.

use anyhow::Result;

use innings_db::LocalStore;
use innings_db::models::{OpportunityCategory, OpportunityRef};

use crate::StarCommands;

pub async fn run_star_command(command: StarCommands, store: &LocalStore) -> Result<()> {
    match command {
        StarCommands::Toggle {
            id,
            category,
            title,
        } => {
            let title = title.unwrap_or_else(|| id.clone());
            let starred = store
                .toggle_star(&OpportunityRef::new(id.as_str(), category, title))
                .await?;
            if starred {
                println!("Starred {id}.");
            } else {
                println!("Unstarred {id}.");
            }
            Ok(())
        }
        StarCommands::List { category } => run_list(store, category).await,
    }
}

async fn run_list(store: &LocalStore, category: Option<OpportunityCategory>) -> Result<()> {
    let starred = store.list_starred(category).await?;
    if starred.is_empty() {
        println!("No starred opportunities.");
        return Ok(());
    }

    println!(
        "{:<24} {:<12} {:<20} TITLE",
        "ID", "CATEGORY", "STARRED"
    );
    println!("{}", "-".repeat(72));
    for s in &starred {
        println!(
            "{:<24} {:<12} {:<20} {}",
            s.id,
            s.category,
            s.starred_at.format("%Y-%m-%d %H:%M").to_string(),
            s.title
        );
    }
    Ok(())
}
