//! `innings discover`: build a development roadmap for an aspiring athlete.

use anyhow::Result;

use innings_core::intake::{DiscoveryFlow, DiscoveryForm, Level, Profile};

use crate::config::InningsConfig;
use crate::deliver::{self, ResultOptions};

pub async fn run_discover(
    config: &InningsConfig,
    sport: String,
    age: String,
    level: Level,
    goal: String,
    options: &ResultOptions,
) -> Result<()> {
    let mut flow = DiscoveryFlow::with_form(DiscoveryForm {
        sport,
        age,
        level,
        goal,
    });
    // Validate before touching the provider config.
    let profile = flow.form().validate()?;
    let client = config.generation_client().await?;

    eprintln!(
        "Analyzing pathways for a {} {} player...",
        profile.level.label(),
        profile.sport
    );
    let payload = flow.submit(&client).await?.to_string();

    deliver::deliver(&config.db_config, &Profile::Discovery(profile), &payload, options).await
}
