use crate::convention::{HeightConvention, HeightPosition, MessageConvention};
use serde::{Deserialize, Serialize};

/// Whether a core part may bump at most once per run, unlimited times, or
/// never.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IncrementMode {
    None,
    #[default]
    Consecutive,
    Successive,
}

/// When downstream flow is considered at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlowCondition {
    #[default]
    None,
    ZeroMajor,
}

/// Per-part flow policy: keep the signal, or route it one part lower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlowMode {
    #[default]
    None,
    Downstream,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IncrementFlow {
    pub condition: FlowCondition,
    pub major_flow: FlowMode,
    pub minor_flow: FlowMode,
}

impl IncrementFlow {
    /// The zero-major convention: anything may break pre-1.0, so breaking
    /// changes land on minor and features on patch.
    pub fn zero_major_downstream() -> Self {
        IncrementFlow {
            condition: FlowCondition::ZeroMajor,
            major_flow: FlowMode::Downstream,
            minor_flow: FlowMode::Downstream,
        }
    }
}

/// Everything one calculation run needs to know about policy: how messages
/// classify, how often parts may bump, where signals flow, and how the height
/// counter is encoded.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VersioningPreset {
    pub increment_mode: IncrementMode,
    pub increment_flow: IncrementFlow,
    pub message_convention: MessageConvention,
    pub height_convention: HeightConvention,
}

/// Names accepted by [`VersioningPreset::named`], for error messages and CLI
/// help.
pub const PRESET_NAMES: &[&str] = &[
    "conventional-commits",
    "conventional-commits-delivery",
    "conventional-commits-deployment",
    "continuous-delivery",
    "continuous-deployment",
    "manual",
];

impl VersioningPreset {
    /// Look up a named preset; configuration may inherit from one and
    /// override individual pieces.
    pub fn named(name: &str) -> Option<Self> {
        Some(match name {
            "conventional-commits" => VersioningPreset {
                increment_mode: IncrementMode::Consecutive,
                increment_flow: IncrementFlow::default(),
                message_convention: MessageConvention::conventional_commits(),
                height_convention: HeightConvention::disabled(),
            },
            "conventional-commits-delivery" => VersioningPreset {
                increment_mode: IncrementMode::Consecutive,
                increment_flow: IncrementFlow::default(),
                message_convention: MessageConvention::conventional_commits(),
                height_convention: HeightConvention::labeled(HeightPosition::PreRelease, 1),
            },
            "conventional-commits-deployment" => VersioningPreset {
                increment_mode: IncrementMode::Successive,
                increment_flow: IncrementFlow::default(),
                message_convention: MessageConvention::conventional_commits(),
                height_convention: HeightConvention::disabled(),
            },
            "continuous-delivery" => VersioningPreset {
                increment_mode: IncrementMode::Consecutive,
                increment_flow: IncrementFlow::default(),
                message_convention: MessageConvention::always_patch(),
                height_convention: HeightConvention::labeled(HeightPosition::PreRelease, 1),
            },
            "continuous-deployment" => VersioningPreset {
                increment_mode: IncrementMode::Successive,
                increment_flow: IncrementFlow::default(),
                message_convention: MessageConvention::always_patch(),
                height_convention: HeightConvention::disabled(),
            },
            "manual" => VersioningPreset {
                increment_mode: IncrementMode::None,
                increment_flow: IncrementFlow::default(),
                message_convention: MessageConvention::never(),
                height_convention: HeightConvention::disabled(),
            },
            _ => return None,
        })
    }
}
