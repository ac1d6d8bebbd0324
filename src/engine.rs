//! The resolution engine: one explicit instance wiring the collaborators.
//!
//! The host rendering pipeline constructs an [`Engine`] once at wiring time
//! — metadata store, size registry, `sizes` adjustment hook — and calls its
//! operations directly wherever it previously dispatched to ambient
//! machinery. The engine holds no mutable state: every call re-reads
//! whatever it needs from the collaborators, so calls are independent and
//! safe to interleave.
//!
//! Degradation contract: any attachment without usable CDN data resolves to
//! its local/native rendering path (`None` results, pass-through URLs,
//! untouched attribute maps). Only collaborator transport failures surface
//! as errors.

use crate::registry::SizeRegistry;
use crate::rewrite;
use crate::select::select_for_size;
use crate::srcset::{IdentityAdjuster, SizesAdjuster, build_responsive_attrs};
use crate::store::{MetadataStore, StoreError};
use crate::types::{DownsizeResult, SizeToken};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// HTML attribute map for one `<img>` element, keyed by attribute name.
pub type ImageAttributes = BTreeMap<String, String>;

/// The responsive-image resolution engine.
pub struct Engine<S, R, A = IdentityAdjuster> {
    store: S,
    registry: R,
    adjuster: A,
}

impl<S, R> Engine<S, R, IdentityAdjuster>
where
    S: MetadataStore,
    R: SizeRegistry,
{
    /// Engine with the default (identity) `sizes` adjustment.
    pub fn new(store: S, registry: R) -> Self {
        Self::with_adjuster(store, registry, IdentityAdjuster)
    }
}

impl<S, R, A> Engine<S, R, A>
where
    S: MetadataStore,
    R: SizeRegistry,
    A: SizesAdjuster,
{
    pub fn with_adjuster(store: S, registry: R, adjuster: A) -> Self {
        Self {
            store,
            registry,
            adjuster,
        }
    }

    /// Resolve one requested size to a CDN rendition.
    ///
    /// `Ok(None)` means "defer to native local rendering" — unknown id,
    /// unmirrored attachment, or a size the CDN cannot serve.
    pub fn resolve_downsize(
        &self,
        attachment_id: u64,
        token: &SizeToken,
    ) -> Result<Option<DownsizeResult>, EngineError> {
        let Some(meta) = self.store.attachment_metadata(attachment_id)? else {
            return Ok(None);
        };
        Ok(select_for_size(&meta, token, &self.registry))
    }

    /// The attachment's canonical URL: the CDN secure URL when mirrored,
    /// else the caller's local URL unchanged.
    pub fn resolve_attachment_url(
        &self,
        attachment_id: u64,
        local_url: &str,
    ) -> Result<String, EngineError> {
        let meta = self.store.attachment_metadata(attachment_id)?;
        Ok(meta
            .as_ref()
            .and_then(|m| m.cdn())
            .map(|cdn| cdn.secure_url.clone())
            .unwrap_or_else(|| local_url.to_string()))
    }

    /// Compose the full attribute set for rendering one `<img>` element.
    ///
    /// Merges `src`/`width`/`height` — and `srcset`/`sizes` when variants
    /// exist — into the caller's base attributes. The base map is returned
    /// unchanged whenever the request cannot be served from the CDN.
    pub fn build_image_attributes(
        &self,
        attachment_id: u64,
        token: &SizeToken,
        base: ImageAttributes,
    ) -> Result<ImageAttributes, EngineError> {
        let Some(meta) = self.store.attachment_metadata(attachment_id)? else {
            return Ok(base);
        };
        let Some(cdn) = meta.cdn() else {
            return Ok(base);
        };

        let (src, width, height) = match token {
            SizeToken::Full => (cdn.secure_url.clone(), cdn.width, cdn.height),
            _ => match select_for_size(&meta, token, &self.registry) {
                Some(result) => (result.url, result.width, result.height),
                None => return Ok(base),
            },
        };

        let mut attrs = base;
        if let Some(responsive) = build_responsive_attrs(&meta, width) {
            let sizes =
                self.adjuster
                    .adjust(&responsive.sizes, (width, height), &src, &meta, attachment_id);
            attrs.insert("srcset".to_string(), responsive.srcset);
            attrs.insert("sizes".to_string(), sizes);
        }
        attrs.insert("src".to_string(), src);
        attrs.insert("width".to_string(), width.to_string());
        attrs.insert("height".to_string(), height.to_string());
        Ok(attrs)
    }

    /// Rewrite managed `<img>` tags in rendered content. See
    /// [`rewrite`](crate::rewrite) for the per-tag rules.
    pub fn rewrite_content(&self, html: &str) -> Result<String, EngineError> {
        Ok(rewrite::rewrite_content(html, &self.store, &self.adjuster)?)
    }
}
