//! `fablegate lookup` command.

use anyhow::{Context, Result};
use fablegate::config::Config;
use fablegate::profile::SpeciesProfile;
use fablegate::service::SpeciesService;

/// Run one lookup and print the profile as pretty JSON.
pub async fn cmd_lookup(config: Config, name: &str, translated: bool) -> Result<()> {
    let service =
        SpeciesService::from_config(&config).context("Failed to build lookup service")?;
    let profile = service
        .get_species(name, translated)
        .await
        .map_err(|e| match e.upstream_status() {
            Some(status) => anyhow::anyhow!("species lookup failed ({status}): {e}"),
            None => anyhow::Error::new(e).context("species lookup failed"),
        })?;
    println!("{}", render(&profile)?);
    Ok(())
}

fn render(profile: &SpeciesProfile) -> Result<String> {
    serde_json::to_string_pretty(profile).context("Failed to serialize profile")
}
