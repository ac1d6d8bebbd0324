//! Size registry: resolving a size name into a concrete definition.
//!
//! Registered sizes come from two places, resolved in priority order:
//!
//! - **Theme override**: a size the active theme registered explicitly.
//!   Wins when present.
//! - **Global default**: the platform-wide default options for the stock
//!   size names, read one dimension at a time.
//!
//! Resolution never fails: missing options resolve to 0 (unconstrained) and
//! an unknown name simply resolves to nothing. The registry itself is
//! read-only configuration, consulted freshly on each request.

use crate::config::PluginConfig;
use crate::types::SizeDefinition;
use std::collections::BTreeSet;

/// One option slot of a size's global default definition.
///
/// `Crop` rides the same integer channel as the dimensions (0 = constrain,
/// non-zero = hard crop), matching how the host platform stores its
/// thumbnail-crop option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Width,
    Height,
    Crop,
}

/// Read-only registered-size configuration.
///
/// The production implementation is [`ConfigSizeRegistry`]; tests and
/// embedding hosts may supply their own.
pub trait SizeRegistry {
    /// Names of all registered sizes, defaults and theme additions alike.
    fn registered_size_names(&self) -> Vec<String>;

    /// The theme-registered definition for `name`, if the theme has one.
    fn size_override(&self, name: &str) -> Option<SizeDefinition>;

    /// One option of the global default definition for `name`.
    fn default_size_option(&self, name: &str, dimension: Dimension) -> Option<u32>;
}

/// Resolve one size name against the registry.
///
/// Returns `None` for names the registry has never heard of. For known
/// names, the theme override wins wholesale; otherwise the definition is
/// assembled from the global default options with 0/false filling any gap.
pub fn resolve_size(name: &str, registry: &impl SizeRegistry) -> Option<SizeDefinition> {
    if !registry.registered_size_names().iter().any(|n| n == name) {
        return None;
    }
    if let Some(definition) = registry.size_override(name) {
        return Some(definition);
    }
    Some(SizeDefinition {
        name: name.to_string(),
        width: registry
            .default_size_option(name, Dimension::Width)
            .unwrap_or(0),
        height: registry
            .default_size_option(name, Dimension::Height)
            .unwrap_or(0),
        crop: registry
            .default_size_option(name, Dimension::Crop)
            .unwrap_or(0)
            != 0,
    })
}

/// [`SizeRegistry`] backed by [`PluginConfig`].
#[derive(Debug, Clone)]
pub struct ConfigSizeRegistry {
    config: PluginConfig,
}

impl ConfigSizeRegistry {
    pub fn new(config: PluginConfig) -> Self {
        Self { config }
    }
}

impl Default for ConfigSizeRegistry {
    fn default() -> Self {
        Self::new(PluginConfig::default())
    }
}

impl SizeRegistry for ConfigSizeRegistry {
    fn registered_size_names(&self) -> Vec<String> {
        let names: BTreeSet<&String> = self
            .config
            .sizes
            .keys()
            .chain(self.config.theme_sizes.keys())
            .collect();
        names.into_iter().cloned().collect()
    }

    fn size_override(&self, name: &str) -> Option<SizeDefinition> {
        self.config
            .theme_sizes
            .get(name)
            .map(|options| SizeDefinition {
                name: name.to_string(),
                width: options.width,
                height: options.height,
                crop: options.crop,
            })
    }

    fn default_size_option(&self, name: &str, dimension: Dimension) -> Option<u32> {
        let options = self.config.sizes.get(name)?;
        Some(match dimension {
            Dimension::Width => options.width,
            Dimension::Height => options.height,
            Dimension::Crop => u32::from(options.crop),
        })
    }
}
