//! Shared data model for CDN-mirrored attachments.
//!
//! These records are persisted as JSON inside the host CMS's attachment
//! metadata and read back on every render request, so they must stay
//! serialization-stable across versions.
//!
//! ## Presence contract
//!
//! `ImageMetadata.cdn` is populated exactly once, at mirror time, by the
//! upload boundary ([`crate::upload`]) and is read-only afterwards. Absent
//! CDN data means "not mirrored — render from local files". Partially
//! populated CDN data (an empty `secure_url`) is treated as absent
//! everywhere; use [`ImageMetadata::cdn`] instead of touching the field
//! directly.
//!
//! ## Variant ordering
//!
//! [`CdnData::variants`] maps breakpoint width to the generated variant.
//! Widths are unique keys (re-inserting a width replaces the prior entry)
//! and iteration is in ascending width — the order breakpoints are
//! generated in, and the order `srcset` candidates are emitted in.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-attachment image record stored by the host CMS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMetadata {
    /// True pixel width of the source image.
    pub width: u32,
    /// True pixel height of the source image.
    pub height: u32,
    /// CDN mirror data. Absent until the attachment has been uploaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cdn: Option<CdnData>,
}

impl ImageMetadata {
    /// CDN data, treating partially-populated records as absent.
    ///
    /// Presence is tested via `secure_url`: a record without one cannot be
    /// rendered from the CDN and must fall back to local rendering.
    pub fn cdn(&self) -> Option<&CdnData> {
        self.cdn.as_ref().filter(|c| !c.secure_url.is_empty())
    }
}

/// CDN master asset plus its generated breakpoint variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CdnData {
    /// CDN-side asset identifier.
    pub public_id: String,
    /// Dimensions of the CDN master (equal to the original at upload time).
    pub width: u32,
    pub height: u32,
    pub url: String,
    pub secure_url: String,
    /// Breakpoint width → generated variant, ascending-width iteration.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variants: BTreeMap<u32, Variant>,
}

impl CdnData {
    /// Filename token of the master asset (last path segment of
    /// `secure_url`). Used by the rewriter to confirm a tag's `src` points
    /// at this attachment.
    pub fn filename(&self) -> &str {
        self.secure_url.rsplit('/').next().unwrap_or_default()
    }
}

/// One CDN-generated breakpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub width: u32,
    pub height: u32,
    pub secure_url: String,
}

/// A registered named size, resolved from the size registry.
///
/// `width`/`height` of 0 mean "unconstrained in that dimension". `crop`
/// selects hard-crop to exact dimensions; cropless sizes constrain-fit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeDefinition {
    pub name: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub crop: bool,
}

/// A requested display size, as passed by the rendering pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SizeToken {
    /// A registered size name like `"thumbnail"` or `"medium"`.
    Name(String),
    /// An explicit width/height pair. No crop intent is expressible here.
    Dimensions(u32, u32),
    /// The full-resolution master asset.
    Full,
}

impl SizeToken {
    pub fn name(name: impl Into<String>) -> Self {
        SizeToken::Name(name.into())
    }
}

impl From<(u32, u32)> for SizeToken {
    fn from((width, height): (u32, u32)) -> Self {
        SizeToken::Dimensions(width, height)
    }
}

/// Outcome of resolving one requested size against CDN data.
///
/// `is_constrained` is always true for CDN results: the URL is a definitive
/// final size and the host pipeline must not resize it further.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownsizeResult {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub is_constrained: bool,
}
