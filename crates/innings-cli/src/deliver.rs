//! What happens to a freshly generated result: print, save, export.

use std::path::PathBuf;

use anyhow::{Context, Result};

use innings_core::Profile;
use innings_core::service;
use innings_db::config::DbConfig;

use crate::render;
use crate::roadmap_cmds::export_payload;

/// Flags shared by the generating commands.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ResultOptions {
    /// Save the result to the locker
    #[arg(long)]
    pub save: bool,
    /// Write a Markdown export to this file or directory
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,
    /// Show every roadmap phase expanded
    #[arg(long)]
    pub expand_all: bool,
}

/// Print the payload, then export and save it as requested.
///
/// The export is written first and a failed save does not undo it, so the
/// generated plan is never lost to a locker error.
pub async fn deliver(
    db_config: &DbConfig,
    profile: &Profile,
    payload: &str,
    options: &ResultOptions,
) -> Result<()> {
    render::print_payload(payload, options.expand_all);

    let exported = match &options.export {
        Some(target) => export_payload(payload, Some(target.as_path())).map(Some),
        None => Ok(None),
    };
    if let Ok(Some(path)) = &exported {
        println!("Exported to {}", path.display());
    }

    if options.save {
        let id = save(db_config, profile, payload).await.map_err(|e| {
            if exported.as_ref().is_ok_and(Option::is_some) {
                e.context("the roadmap was exported but not saved to the locker")
            } else {
                e
            }
        })?;
        println!();
        println!("Saved to locker as roadmap {id}.");
    }

    exported.map(|_| ())
}

async fn save(db_config: &DbConfig, profile: &Profile, payload: &str) -> Result<i64> {
    let store = innings_db::open_store(db_config).await?;
    let saved = service::save_result(&store, profile, payload).await;
    store.close().await;
    saved.context("failed to save roadmap to the locker")
}
