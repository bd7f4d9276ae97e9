//! Per-platform installation requirements and their resolution.
//!
//! Repository feeds may declare `require`, `arch` and `devices` globally on a module or per root
//! solution inside the `manager` object. [`resolve`] applies the precedence between the two so
//! callers never have to repeat it.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::modules::online::OnlineModule;
use crate::utils::common::is_not_empty;

/// Root solutions a module can be installed with.
#[derive(ValueEnum, Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Platform {
    #[default]
    #[value(name = "magisk")]
    Magisk,
    #[value(name = "kernelsu")]
    #[serde(rename = "kernelsu")]
    KernelSu,
    #[value(name = "ksunext")]
    #[serde(rename = "ksunext")]
    KernelSuNext,
    #[value(name = "apatch")]
    #[serde(rename = "apatch")]
    APatch,
}

impl Platform {
    /// Identifier used for this platform in feeds, config files and on the command line.
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Platform::Magisk => "magisk",
            Platform::KernelSu => "kernelsu",
            Platform::KernelSuNext => "ksunext",
            Platform::APatch => "apatch",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "magisk" => Ok(Platform::Magisk),
            "kernelsu" => Ok(Platform::KernelSu),
            "ksunext" => Ok(Platform::KernelSuNext),
            "apatch" => Ok(Platform::APatch),
            _ => Err(format!("Unknown platform: {}", s)),
        }
    }
}

/// Installation requirements of a module for a single root solution.
///
/// Every field is optional. When returned by [`resolve`] the struct holds the *effective*
/// requirements after falling back between the module's top-level fields and the override.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ModuleManagerSolution {
    /// Minimum version of the root manager.
    pub(crate) min: Option<i64>,
    /// Device models the module supports.
    pub(crate) devices: Option<Vec<String>>,
    /// CPU architectures the module supports.
    pub(crate) arch: Option<Vec<String>>,
    /// Module ids that have to be installed first.
    pub(crate) require: Option<Vec<String>>,
}

/// Effective requirements of a module on a given platform.
pub(crate) type EffectiveRequirements = ModuleManagerSolution;

/// Per-platform overrides as found in the `manager` object of a module.
///
/// Keys that don't name a known platform are ignored during deserialization.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ModuleManager {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) magisk: Option<ModuleManagerSolution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) kernelsu: Option<ModuleManagerSolution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) ksunext: Option<ModuleManagerSolution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) apatch: Option<ModuleManagerSolution>,
}

impl ModuleManager {
    /// Returns the override for `platform`, if the feed declared one.
    pub(crate) fn get(&self, platform: Platform) -> Option<&ModuleManagerSolution> {
        match platform {
            Platform::Magisk => self.magisk.as_ref(),
            Platform::KernelSu => self.kernelsu.as_ref(),
            Platform::KernelSuNext => self.ksunext.as_ref(),
            Platform::APatch => self.apatch.as_ref(),
        }
    }
}

/// Picks `default` if it holds at least one entry, otherwise the field selected by `extractor`
/// from the platform override. Returns `None` if neither level declares anything.
fn from_manager_or_default<F>(
    default: Option<&Vec<String>>,
    solution: Option<&ModuleManagerSolution>,
    extractor: F,
) -> Option<Vec<String>>
where
    F: Fn(&ModuleManagerSolution) -> Option<&Vec<String>>,
{
    if is_not_empty(default.map(Vec::as_slice)) {
        return default.cloned();
    }

    solution
        .and_then(extractor)
        .filter(|v| !v.is_empty())
        .cloned()
}

/// Computes the effective installation requirements of `module` on `platform`.
///
/// * `require`, `devices` and `arch` use the module's top-level value when it is non-empty and
///   otherwise the non-empty value of the platform override.
/// * `min` is only ever taken from the platform override.
///
/// A platform without an entry in the `manager` mapping behaves as if no override existed.
pub(crate) fn resolve(module: &OnlineModule, platform: Platform) -> EffectiveRequirements {
    let solution = module.manager.as_ref().and_then(|m| m.get(platform));

    ModuleManagerSolution {
        min: solution.and_then(|s| s.min),
        devices: from_manager_or_default(module.devices.as_ref(), solution, |s| {
            s.devices.as_ref()
        }),
        arch: from_manager_or_default(module.arch.as_ref(), solution, |s| s.arch.as_ref()),
        require: from_manager_or_default(module.require.as_ref(), solution, |s| {
            s.require.as_ref()
        }),
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
