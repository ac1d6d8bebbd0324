//! Variant selection: resolving one requested size against CDN data.
//!
//! Only two shapes of request can be served from the CDN:
//!
//! - a **named size** that is cropless and fits within the master asset's
//!   bounds — the display dimensions are recomputed with constrain-fit
//!   semantics against the original image, then requested as an on-the-fly
//!   `c_limit` transformation;
//! - an **explicit width/height pair** — requested directly, always
//!   `c_limit`, since no crop intent is expressible in a bare pair.
//!
//! Everything else (unmirrored attachment, unknown name, cropped
//! definition, size exceeding the master, full size) resolves to `None`,
//! which the host pipeline treats as "use native local rendering".

use crate::registry::{SizeRegistry, resolve_size};
use crate::sizing::constrain_fit;
use crate::transform::{CropMode, transform_url};
use crate::types::{DownsizeResult, ImageMetadata, SizeToken};
use tracing::trace;

/// Resolve `token` against `meta`'s CDN data.
///
/// Successful results always report `is_constrained = true`: the URL is a
/// final rendition and must not be resized again downstream.
pub fn select_for_size(
    meta: &ImageMetadata,
    token: &SizeToken,
    registry: &impl SizeRegistry,
) -> Option<DownsizeResult> {
    let cdn = meta.cdn()?;

    match token {
        SizeToken::Name(name) => {
            let definition = resolve_size(name, registry)?;
            if definition.crop {
                trace!(size = %name, "cropped size defers to native rendering");
                return None;
            }
            if definition.width > cdn.width || definition.height > cdn.height {
                trace!(size = %name, "size exceeds master bounds, deferring");
                return None;
            }
            // Constrain-fit against the original; when no valid fit exists
            // the registry dimensions are used verbatim.
            let (width, height) = constrain_fit(
                (meta.width, meta.height),
                (definition.width, definition.height),
            )
            .unwrap_or((definition.width, definition.height));

            Some(DownsizeResult {
                url: transform_url(&cdn.secure_url, width, height, CropMode::Limit),
                width,
                height,
                is_constrained: true,
            })
        }
        SizeToken::Dimensions(width, height) => Some(DownsizeResult {
            url: transform_url(&cdn.secure_url, *width, *height, CropMode::Limit),
            width: *width,
            height: *height,
            is_constrained: true,
        }),
        SizeToken::Full => None,
    }
}
