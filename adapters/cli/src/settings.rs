use std::{fs, path::Path};

use anyhow::{Context, Result};
use lane_defence_core::GameConfig;
use lane_defence_system_layout::DesiredLayout;
use lane_defence_system_turn::OffensePolicy;
use serde::Deserialize;

/// Everything the headless runner needs before the first turn.
#[derive(Debug)]
pub(crate) struct Settings {
    /// Unit and economy configuration shared by the host and the controller.
    pub(crate) config: GameConfig,
    /// Offense thresholds and wave composition.
    pub(crate) policy: OffensePolicy,
    /// Layout the controller builds toward.
    pub(crate) layout: DesiredLayout,
    /// Layout mirrored onto the opponent's half before the match starts.
    pub(crate) opponent: DesiredLayout,
}

/// Paths supplied on the command line; missing entries fall back to built-ins.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Sources<'a> {
    pub(crate) config: Option<&'a Path>,
    pub(crate) policy: Option<&'a Path>,
    pub(crate) layout: Option<&'a Path>,
    pub(crate) opponent: Option<&'a Path>,
}

#[derive(Debug, Default, Deserialize)]
struct PolicyFile {
    #[serde(default)]
    offense: OffensePolicy,
}

impl Settings {
    /// Loads every source, stopping at the first malformed file.
    pub(crate) fn load(sources: Sources<'_>) -> Result<Self> {
        let config = match sources.config {
            Some(path) => parse_config(&read(path)?)
                .with_context(|| format!("invalid game configuration in {}", path.display()))?,
            None => GameConfig::standard(),
        };
        let policy = match sources.policy {
            Some(path) => parse_policy(&read(path)?)
                .with_context(|| format!("invalid offense policy in {}", path.display()))?,
            None => OffensePolicy::default(),
        };
        let layout = load_layout(sources.layout)?;
        let opponent = match sources.opponent {
            Some(path) => load_layout(Some(path))?,
            None => layout.clone(),
        };

        Ok(Self {
            config,
            policy,
            layout,
            opponent,
        })
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("could not read {}", path.display()))
}

fn load_layout(path: Option<&Path>) -> Result<DesiredLayout> {
    match path {
        Some(path) => parse_layout(&read(path)?)
            .with_context(|| format!("invalid layout in {}", path.display())),
        None => DesiredLayout::standard().context("built-in layout is invalid"),
    }
}

fn parse_config(payload: &str) -> Result<GameConfig> {
    Ok(GameConfig::from_toml_str(payload)?)
}

fn parse_policy(payload: &str) -> Result<OffensePolicy> {
    let file: PolicyFile = toml::from_str(payload)?;
    Ok(file.offense)
}

fn parse_layout(payload: &str) -> Result<DesiredLayout> {
    Ok(DesiredLayout::from_toml_str(payload)?)
}
