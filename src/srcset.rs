//! Responsive attribute building: `srcset` candidates and `sizes` rules.
//!
//! The `srcset` is built from the attachment's generated breakpoint
//! variants, one candidate per variant in ascending width. The `sizes`
//! value starts from a single default rule keyed to the display width; the
//! host environment may post-process it through a [`SizesAdjuster`], and
//! the engine always routes the default through that hook before emitting.

use crate::types::ImageMetadata;

/// Computed responsive attribute pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsiveAttrs {
    /// Comma-joined `"<url> <width>w"` candidates.
    pub srcset: String,
    /// The pre-adjustment default `sizes` expression.
    pub sizes: String,
}

/// The default responsive rule for a given display width: full viewport
/// width below it, fixed width at or above it.
pub fn default_sizes_expr(display_width: u32) -> String {
    format!("(max-width: {display_width}px) 100vw, {display_width}px")
}

/// Build `srcset`/`sizes` from an attachment's breakpoint variants.
///
/// Returns `None` when the attachment is not mirrored or has no generated
/// variants. Candidates are emitted in ascending width; a literal space in
/// a variant URL would corrupt the candidate list, so spaces are
/// percent-encoded.
pub fn build_responsive_attrs(meta: &ImageMetadata, display_width: u32) -> Option<ResponsiveAttrs> {
    let cdn = meta.cdn()?;
    if cdn.variants.is_empty() {
        return None;
    }

    let srcset = cdn
        .variants
        .values()
        .map(|v| format!("{} {}w", v.secure_url.replace(' ', "%20"), v.width))
        .collect::<Vec<_>>()
        .join(", ");

    Some(ResponsiveAttrs {
        srcset,
        sizes: default_sizes_expr(display_width),
    })
}

/// Host extension point for post-processing the default `sizes` expression.
///
/// The engine calls this for every computed `sizes` value and uses the
/// return value as final output. `dims` are the resolved display
/// dimensions, `src_url` the URL the expression accompanies.
pub trait SizesAdjuster {
    fn adjust(
        &self,
        default_expr: &str,
        dims: (u32, u32),
        src_url: &str,
        meta: &ImageMetadata,
        attachment_id: u64,
    ) -> String;
}

/// Default adjuster: the computed expression is already final.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityAdjuster;

impl SizesAdjuster for IdentityAdjuster {
    fn adjust(
        &self,
        default_expr: &str,
        _dims: (u32, u32),
        _src_url: &str,
        _meta: &ImageMetadata,
        _attachment_id: u64,
    ) -> String {
        default_expr.to_string()
    }
}
