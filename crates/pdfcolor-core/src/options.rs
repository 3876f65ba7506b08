//! Resolver configuration

use crate::transform::RenderingIntent;

/// What an Indexed space does with an index outside `[0, hival]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexPolicy {
    /// Fail the conversion with an invalid-argument error
    #[default]
    Reject,
    /// Clamp to the nearest valid entry
    Clamp,
}

/// Options for color space resolution
#[derive(Debug, Clone, Copy)]
pub struct ResolveOptions {
    /// Build ICCBased spaces from their embedded profiles. When false they
    /// resolve to their `/Alternate` space, or the device space matching `/N`.
    pub use_icc_profiles: bool,
    /// Rendering intent for ICC transforms
    pub rendering_intent: RenderingIntent,
    /// Out-of-range handling for Indexed lookups
    pub index_policy: IndexPolicy,
    /// Maximum nesting of named and nested descriptors
    pub max_depth: usize,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            use_icc_profiles: true,
            rendering_intent: RenderingIntent::default(),
            index_policy: IndexPolicy::default(),
            max_depth: 32,
        }
    }
}
