//! Configuration loading and typed config structures for the Hive engine.
//!
//! The canonical configuration lives in `hive-config.yaml` at the project
//! root. Every section and field has a default, so an empty file (or no
//! file at all) yields a runnable colony.

use std::collections::BTreeMap;
use std::path::Path;

use hive_agents::BehaviorSettings;
use hive_types::{BodyPart, Role};
use hive_world::LayoutParams;
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration, mirroring `hive-config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// World generation and timing.
    #[serde(default)]
    pub world: WorldConfig,

    /// Behavior thresholds.
    #[serde(default)]
    pub behavior: BehaviorConfig,

    /// Desired population and body per role.
    #[serde(default = "default_roles")]
    pub roles: BTreeMap<Role, RoleConfig>,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            behavior: BehaviorConfig::default(),
            roles: default_roles(),
            logging: LoggingConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string. An empty string yields the
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// The spawn target for a role; zero when the role is not configured.
    pub fn target_amount(&self, role: Role) -> u32 {
        self.roles.get(&role).map_or(0, |r| r.target_amount)
    }
}

/// World generation and timing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable simulation name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Random seed for the colony layout.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Real-time milliseconds between ticks.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Region width in tiles.
    #[serde(default = "default_side")]
    pub width: u32,

    /// Region height in tiles.
    #[serde(default = "default_side")]
    pub height: u32,

    /// Number of regions; the first is home.
    #[serde(default = "default_regions")]
    pub regions: u32,

    /// Sources per region.
    #[serde(default = "default_sources_per_region")]
    pub sources_per_region: u32,

    /// Stop after this many ticks.
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: default_seed(),
            tick_interval_ms: default_tick_interval_ms(),
            width: default_side(),
            height: default_side(),
            regions: default_regions(),
            sources_per_region: default_sources_per_region(),
            max_ticks: default_max_ticks(),
        }
    }
}

impl WorldConfig {
    /// Layout parameters for [`hive_world::create_colony`].
    pub const fn layout(&self) -> LayoutParams {
        LayoutParams {
            width: self.width,
            height: self.height,
            regions: self.regions,
            sources_per_region: self.sources_per_region,
        }
    }
}

/// Behavior thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BehaviorConfig {
    /// Consecutive no-path results before a target is abandoned.
    #[serde(default = "default_blocked_threshold")]
    pub blocked_threshold: u32,

    /// Minimum energy for a container to count as a gather source.
    #[serde(default = "default_container_min_energy")]
    pub container_min_energy: u32,

    /// Numeric suffixes tried when a worker name is taken.
    #[serde(default = "default_name_retry_limit")]
    pub name_retry_limit: u32,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            blocked_threshold: default_blocked_threshold(),
            container_min_energy: default_container_min_energy(),
            name_retry_limit: default_name_retry_limit(),
        }
    }
}

impl BehaviorConfig {
    /// The thresholds the decision engine reads.
    pub const fn settings(&self) -> BehaviorSettings {
        BehaviorSettings {
            blocked_threshold: self.blocked_threshold,
            container_min_energy: self.container_min_energy,
        }
    }
}

/// Desired population and body for one role.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoleConfig {
    /// How many live workers of this role to keep.
    #[serde(default)]
    pub target_amount: u32,

    /// Body of each new worker.
    #[serde(default = "default_body")]
    pub body: Vec<BodyPart>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

fn default_world_name() -> String {
    "Hive".to_owned()
}

const fn default_seed() -> u64 {
    42
}

const fn default_tick_interval_ms() -> u64 {
    100
}

const fn default_side() -> u32 {
    25
}

const fn default_regions() -> u32 {
    1
}

const fn default_sources_per_region() -> u32 {
    2
}

const fn default_max_ticks() -> u64 {
    1500
}

const fn default_blocked_threshold() -> u32 {
    5
}

const fn default_container_min_energy() -> u32 {
    100
}

const fn default_name_retry_limit() -> u32 {
    5
}

fn default_body() -> Vec<BodyPart> {
    vec![BodyPart::Work, BodyPart::Carry, BodyPart::Move, BodyPart::Move]
}

fn default_roles() -> BTreeMap<Role, RoleConfig> {
    [(Role::Harvester, 3), (Role::Builder, 1), (Role::Upgrader, 1)]
        .into_iter()
        .map(|(role, target_amount)| {
            (
                role,
                RoleConfig {
                    target_amount,
                    body: default_body(),
                },
            )
        })
        .collect()
}

fn default_log_level() -> String {
    "info".to_owned()
}
