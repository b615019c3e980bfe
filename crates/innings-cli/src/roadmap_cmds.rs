//! `innings roadmap` commands: browse and manage the locker.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use innings_core::artifact::{ResultView, export_filename, parse_artifact, to_markdown};
use innings_core::service;
use innings_db::LocalStore;
use innings_db::models::{Roadmap, RoadmapQuery};

use crate::RoadmapCommands;
use crate::render;

/// Dispatch a `roadmap` subcommand.
pub async fn run_roadmap_command(command: RoadmapCommands, store: &LocalStore) -> Result<()> {
    match command {
        RoadmapCommands::List {
            flow,
            sport,
            oldest_first,
        } => {
            let mut query = RoadmapQuery::all();
            if let Some(flow) = flow {
                query = query.with_flow(flow);
            }
            if let Some(sport) = sport {
                query = query.with_sport(sport);
            }
            if oldest_first {
                query = query.oldest_first();
            }
            run_list(store, &query).await
        }
        RoadmapCommands::Show { id, expand_all } => run_show(store, id, expand_all).await,
        RoadmapCommands::Export { id, output } => {
            let roadmap = fetch(store, id).await?;
            let path = export_payload(&roadmap.full_content, output.as_deref())
                .with_context(|| format!("roadmap {id} cannot be exported"))?;
            println!("Exported roadmap {id} to {}", path.display());
            Ok(())
        }
        RoadmapCommands::Delete { id, yes } => run_delete(store, id, yes).await,
    }
}

async fn fetch(store: &LocalStore, id: i64) -> Result<Roadmap> {
    store
        .get_roadmap(id)
        .await?
        .with_context(|| format!("roadmap {id} not found"))
}

/// One line per roadmap for listings.
pub fn format_row(r: &Roadmap) -> String {
    format!(
        "  [{}] {} {:<9} {} - {}",
        r.id,
        r.created_at.format("%Y-%m-%d %H:%M"),
        r.flow,
        r.title,
        r.summary
    )
}

async fn run_list(store: &LocalStore, query: &RoadmapQuery) -> Result<()> {
    let total = store.count_roadmaps(&RoadmapQuery::all()).await?;
    if total == 0 {
        println!("Your locker is empty. Generate a plan with `innings discover --save` or `innings pivot --save`.");
        return Ok(());
    }

    let roadmaps = store.list_roadmaps(query).await?;
    if roadmaps.len() as i64 == total {
        println!("Saved roadmaps ({total}):");
    } else {
        println!("Saved roadmaps ({} of {total}):", roadmaps.len());
    }
    for r in &roadmaps {
        println!("{}", format_row(r));
    }
    Ok(())
}

async fn run_show(store: &LocalStore, id: i64, expand_all: bool) -> Result<()> {
    let roadmap = fetch(store, id).await?;
    println!(
        "Saved {} ({}, {})",
        roadmap.created_at.format("%Y-%m-%d %H:%M UTC"),
        roadmap.flow,
        roadmap.sport
    );
    println!();

    match service::load_into_view(&roadmap) {
        ResultView::Rendered(view) => {
            print!("{}", render::format_view(&view, expand_all));
            Ok(())
        }
        ResultView::Unsupported { reason } => {
            bail!("{}", render::unsupported_message(&reason))
        }
    }
}

async fn run_delete(store: &LocalStore, id: i64, yes: bool) -> Result<()> {
    let Some(roadmap) = store.get_roadmap(id).await? else {
        println!("Roadmap {id} not found; nothing to delete.");
        return Ok(());
    };

    if !yes {
        let stdin = std::io::stdin();
        let confirmed = confirm(
            &mut stdin.lock(),
            &mut std::io::stdout(),
            &format!("Delete roadmap {id} \"{}\"?", roadmap.title),
        )?;
        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store.delete_roadmap(id).await?;
    println!("Roadmap {id} deleted.");
    Ok(())
}

/// Ask a yes/no question; anything but `y`/`yes` is a no.
pub fn confirm(input: &mut impl BufRead, output: &mut impl Write, question: &str) -> Result<bool> {
    write!(output, "{question} [y/N] ")?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

/// Write the Markdown export of `payload`.
///
/// `output` may be a directory (the derived filename is used inside it) or
/// a file path; `None` means the current directory.
pub fn export_payload(payload: &str, output: Option<&Path>) -> Result<PathBuf> {
    let artifact = parse_artifact(payload).context("payload is not a supported roadmap")?;
    let filename = export_filename(&artifact.title);

    let path = match output {
        Some(p) if p.is_dir() => p.join(filename),
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(filename),
    };

    std::fs::write(&path, to_markdown(&artifact))
        .with_context(|| format!("cannot write export file: {}", path.display()))?;
    Ok(path)
}
