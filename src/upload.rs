//! Upload mirror boundary.
//!
//! Mirroring an attachment to the CDN happens once, at attachment-creation
//! time, outside the resolution engine. This module owns only the boundary:
//! the [`UploadMirror`] trait the host's upload client implements, and the
//! conversion from its result into the [`CdnData`] persisted in attachment
//! metadata. When an upload fails, metadata simply keeps no CDN record and
//! every resolution path degrades to local rendering — there is no
//! user-visible error and no retry here (retry policy belongs to the
//! client).

use crate::types::{CdnData, ImageMetadata, Variant};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("upload rejected: {0}")]
    Rejected(String),
    #[error("mirror unreachable: {0}")]
    Unreachable(String),
}

/// Result of mirroring one local file to the CDN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    pub public_id: String,
    pub width: u32,
    pub height: u32,
    pub url: String,
    pub secure_url: String,
    /// Breakpoints generated by the CDN, in the order it reported them.
    pub breakpoints: Vec<Variant>,
}

impl UploadResult {
    /// Convert into the persisted CDN record. Breakpoints are keyed by
    /// width; a width collision keeps the last-reported breakpoint.
    pub fn into_cdn_data(self) -> CdnData {
        let mut variants = BTreeMap::new();
        for breakpoint in self.breakpoints {
            variants.insert(breakpoint.width, breakpoint);
        }
        CdnData {
            public_id: self.public_id,
            width: self.width,
            height: self.height,
            url: self.url,
            secure_url: self.secure_url,
            variants,
        }
    }
}

/// CDN upload client implemented by the host environment.
pub trait UploadMirror {
    fn upload(&self, path: &Path) -> Result<UploadResult, UploadError>;
}

/// Mirror one attachment and record the result in its metadata.
///
/// On success the metadata carries the new CDN record; on failure it is
/// left untouched and the error is returned for the caller to log — the
/// attachment stays on the local rendering path either way.
pub fn mirror_attachment(
    mirror: &impl UploadMirror,
    meta: &mut ImageMetadata,
    path: &Path,
) -> Result<(), UploadError> {
    let result = mirror.upload(path)?;
    meta.cdn = Some(result.into_cdn_data());
    Ok(())
}
