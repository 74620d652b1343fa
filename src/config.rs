use crate::convention::{HeightConvention, HeightRule, MessageConvention, MessageIndicator};
use crate::convention::HeightPosition;
use crate::domain::VersionPart;
use crate::error::{NextverError, Result};
use crate::preset::{
    FlowCondition, FlowMode, IncrementFlow, IncrementMode, VersioningPreset, PRESET_NAMES,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Complete configuration for nextver.
///
/// Covers the tag prefix, the versioning section binding a preset, and the
/// cache behavior.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,

    #[serde(default)]
    pub versioning: VersioningConfig,

    #[serde(default)]
    pub cache: CacheConfig,
}

fn default_tag_prefix() -> String {
    "v".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tag_prefix: default_tag_prefix(),
            versioning: VersioningConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

/// The versioning section: an optional named base preset plus overrides for
/// individual pieces. Absent fields inherit from the base.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct VersioningConfig {
    #[serde(default)]
    pub preset: Option<String>,

    #[serde(default)]
    pub increment_mode: Option<IncrementMode>,

    /// Pre-release channel label; an empty string selects the release
    /// channel.
    #[serde(default)]
    pub pre_release: Option<String>,

    #[serde(default)]
    pub flow: Option<FlowConfig>,

    #[serde(default)]
    pub message_convention: Option<MessageConventionConfig>,

    #[serde(default)]
    pub height: Option<HeightConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct FlowConfig {
    #[serde(default)]
    pub condition: FlowCondition,

    #[serde(default)]
    pub major: FlowMode,

    #[serde(default)]
    pub minor: FlowMode,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct MessageConventionConfig {
    #[serde(default)]
    pub conventional_commits: bool,

    #[serde(default)]
    pub major_patterns: Vec<String>,

    #[serde(default)]
    pub minor_patterns: Vec<String>,

    #[serde(default)]
    pub patch_patterns: Vec<String>,
}

/// Height encoding: where the counter lives and the template per dot count.
/// Rule keys are dot counts written as strings, TOML table keys being
/// strings.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HeightConfig {
    #[serde(default)]
    pub position: HeightPosition,

    #[serde(default = "default_initial_height")]
    pub initial_height: u32,

    #[serde(default)]
    pub rules: HashMap<String, String>,
}

fn default_initial_height() -> u32 {
    1
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,

    #[serde(default = "default_cache_ttl_minutes")]
    pub ttl_minutes: u64,
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_ttl_minutes() -> u64 {
    15
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            enabled: default_cache_enabled(),
            ttl_minutes: default_cache_ttl_minutes(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `nextver.toml` in current directory
/// 3. `nextver/config.toml` in the user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./nextver.toml").exists() {
        fs::read_to_string("./nextver.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("nextver").join("config.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}

impl Config {
    /// Resolve the versioning section into a preset: start from the named
    /// base when one is given, then apply every override. Fails when no
    /// message convention results or a height rule is malformed.
    pub fn bind_preset(&self) -> Result<VersioningPreset> {
        let section = &self.versioning;
        let mut preset = match section.preset.as_deref() {
            Some(name) => VersioningPreset::named(name).ok_or_else(|| {
                NextverError::configuration(format!(
                    "Unknown preset '{}' (expected one of: {})",
                    name,
                    PRESET_NAMES.join(", ")
                ))
            })?,
            None => VersioningPreset::default(),
        };
        let has_base = section.preset.is_some();

        if let Some(mode) = section.increment_mode {
            preset.increment_mode = mode;
        }
        if let Some(flow) = &section.flow {
            preset.increment_flow = IncrementFlow {
                condition: flow.condition,
                major_flow: flow.major,
                minor_flow: flow.minor,
            };
        }
        if let Some(convention) = &section.message_convention {
            preset.message_convention = build_message_convention(convention)?;
        } else if !has_base {
            return Err(NextverError::configuration(
                "No message convention configured and no base preset to inherit one from",
            ));
        }
        if let Some(height) = &section.height {
            preset.height_convention = build_height_convention(height)?;
        }

        Ok(preset)
    }
}

fn build_message_convention(config: &MessageConventionConfig) -> Result<MessageConvention> {
    let mut convention = MessageConvention::default();
    if config.conventional_commits {
        convention
            .major_indicators
            .push(MessageIndicator::ConventionalCommits);
        convention
            .minor_indicators
            .push(MessageIndicator::ConventionalCommits);
        convention
            .patch_indicators
            .push(MessageIndicator::ConventionalCommits);
    }
    for pattern in &config.major_patterns {
        convention
            .major_indicators
            .push(MessageIndicator::regex_for(VersionPart::Major, pattern)?);
    }
    for pattern in &config.minor_patterns {
        convention
            .minor_indicators
            .push(MessageIndicator::regex_for(VersionPart::Minor, pattern)?);
    }
    for pattern in &config.patch_patterns {
        convention
            .patch_indicators
            .push(MessageIndicator::regex_for(VersionPart::Patch, pattern)?);
    }

    if convention.major_indicators.is_empty()
        && convention.minor_indicators.is_empty()
        && convention.patch_indicators.is_empty()
    {
        return Err(NextverError::configuration(
            "Message convention section declares no indicators",
        ));
    }
    Ok(convention)
}

fn build_height_convention(config: &HeightConfig) -> Result<HeightConvention> {
    let mut convention = HeightConvention::new(config.position, config.initial_height);
    for (dots, template) in &config.rules {
        let dots: u32 = dots.parse().map_err(|_| {
            NextverError::configuration(format!("Height rule key '{}' is not a dot count", dots))
        })?;
        let rule = HeightRule::new(template.clone());
        // Surface template syntax errors at load time instead of mid-run
        rule.tokens()?;
        convention.rules.insert(dots, rule);
    }
    Ok(convention)
}
