//! Process-wide unit configuration consumed once at startup.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::UnitKind;

/// Price of a single unit in both currencies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitCost {
    /// Cores charged per unit.
    #[serde(default)]
    pub cores: f32,
    /// Bits charged per unit.
    #[serde(default)]
    pub bits: f32,
}

impl UnitCost {
    /// Creates a new cost descriptor.
    #[must_use]
    pub const fn new(cores: f32, bits: f32) -> Self {
        Self { cores, bits }
    }
}

/// Static attributes of a unit kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitStats {
    /// Short identifier the host uses on the wire.
    pub shorthand: String,
    /// Price of one unit.
    pub cost: UnitCost,
    /// Damage dealt per hit; zero for units that never attack.
    #[serde(default)]
    pub damage: f32,
    /// Attack radius measured in cells.
    #[serde(default)]
    pub range: f32,
    /// Hit points of a freshly created unit.
    pub health: f32,
}

/// Per-match economy parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IncomeConfig {
    /// Cores granted to each player at the start of every turn.
    pub cores_per_turn: f32,
    /// Bits granted to each player at the start of every turn.
    pub bits_per_turn: f32,
    /// Cores held before the first turn.
    pub starting_cores: f32,
    /// Bits held before the first turn.
    pub starting_bits: f32,
    /// Core health each player starts with.
    pub starting_health: f32,
}

impl Default for IncomeConfig {
    fn default() -> Self {
        Self {
            cores_per_turn: 4.0,
            bits_per_turn: 5.0,
            starting_cores: 40.0,
            starting_bits: 5.0,
            starting_health: 30.0,
        }
    }
}

/// Errors raised while loading or consulting the unit configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A unit kind required by a component has no configured stats.
    #[error("unit kind `{0}` is not present in the configuration")]
    MissingUnit(UnitKind),
    /// A unit kind declares a negative price.
    #[error("unit kind `{kind}` declares a negative cost")]
    NegativeCost {
        /// Offending unit kind.
        kind: UnitKind,
    },
    /// The configuration payload could not be parsed.
    #[error("could not parse configuration: {0}")]
    Malformed(#[from] toml::de::Error),
}

#[derive(Deserialize)]
struct RawGameConfig {
    #[serde(default)]
    income: IncomeConfig,
    units: BTreeMap<UnitKind, UnitStats>,
}

/// Immutable unit and economy configuration shared by every component.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    units: BTreeMap<UnitKind, UnitStats>,
    income: IncomeConfig,
}

impl GameConfig {
    /// Creates a configuration from explicit unit stats.
    pub fn new(
        units: BTreeMap<UnitKind, UnitStats>,
        income: IncomeConfig,
    ) -> Result<Self, ConfigError> {
        for (kind, stats) in &units {
            if stats.cost.cores < 0.0 || stats.cost.bits < 0.0 {
                return Err(ConfigError::NegativeCost { kind: *kind });
            }
        }

        Ok(Self { units, income })
    }

    /// Parses a TOML payload with an optional `[income]` table and a `[units]`
    /// table keyed by lowercase unit names.
    pub fn from_toml_str(payload: &str) -> Result<Self, ConfigError> {
        let raw: RawGameConfig = toml::from_str(payload)?;
        Self::new(raw.units, raw.income)
    }

    /// Stock configuration of the arena's six unit kinds.
    #[must_use]
    pub fn standard() -> Self {
        let entry = |shorthand: &str, cost: UnitCost, damage: f32, range: f32, health: f32| {
            UnitStats {
                shorthand: shorthand.to_owned(),
                cost,
                damage,
                range,
                health,
            }
        };

        let units = BTreeMap::from([
            (
                UnitKind::Filter,
                entry("FF", UnitCost::new(1.0, 0.0), 0.0, 0.0, 60.0),
            ),
            (
                UnitKind::Encryptor,
                entry("EF", UnitCost::new(4.0, 0.0), 0.0, 3.0, 30.0),
            ),
            (
                UnitKind::Destructor,
                entry("DF", UnitCost::new(3.0, 0.0), 4.0, 3.5, 75.0),
            ),
            (
                UnitKind::Ping,
                entry("PI", UnitCost::new(0.0, 1.0), 2.0, 3.5, 15.0),
            ),
            (
                UnitKind::Emp,
                entry("EI", UnitCost::new(0.0, 3.0), 3.0, 4.5, 5.0),
            ),
            (
                UnitKind::Scrambler,
                entry("SI", UnitCost::new(0.0, 1.0), 20.0, 3.5, 40.0),
            ),
        ]);

        Self {
            units,
            income: IncomeConfig::default(),
        }
    }

    /// Stats configured for `kind`, if any.
    #[must_use]
    pub fn stats(&self, kind: UnitKind) -> Option<&UnitStats> {
        self.units.get(&kind)
    }

    /// Stats configured for `kind`, failing when the kind is unknown.
    pub fn require(&self, kind: UnitKind) -> Result<&UnitStats, ConfigError> {
        self.stats(kind).ok_or(ConfigError::MissingUnit(kind))
    }

    /// Damage per hit of `kind`; unknown kinds deal no damage.
    #[must_use]
    pub fn damage(&self, kind: UnitKind) -> f32 {
        self.stats(kind).map_or(0.0, |stats| stats.damage)
    }

    /// Economy parameters of the match.
    #[must_use]
    pub const fn income(&self) -> &IncomeConfig {
        &self.income
    }
}
