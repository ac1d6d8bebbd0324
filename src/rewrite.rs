//! Content rewriting: adding `srcset`/`sizes` to managed `<img>` tags.
//!
//! The scan is deliberately flat — a tag is any substring from `<img ` to
//! the next `>`, with no nested-tag awareness. That is all the host's
//! post-render content ever needs, and it keeps the rewriter a cheap string
//! pass instead of a DOM parse.
//!
//! ## Per-tag gauntlet
//!
//! A tag is rewritten only when all of these hold:
//!
//! 1. it does not already carry a `srcset` attribute (which also makes the
//!    whole pass idempotent);
//! 2. it carries a `wp-image-<id>` class token naming a managed attachment;
//! 3. the attachment is mirrored and its CDN master filename appears in the
//!    tag's `src` value;
//! 4. the `src` is not a fill-cropped rendition (`c_fill`) — those have
//!    discarded content and must not be swapped for constrain-fit variants.
//!
//! ## Dedup and batching
//!
//! Rewrite rules are keyed by exact tag text: identical tags collapse to a
//! single rule (and a single metadata lookup) applied to every occurrence.
//! The same attachment appearing under distinct tag texts is processed once
//! per distinct text. When multiple attachments are involved, their ids are
//! announced to the store via a prefetch hint before per-tag processing —
//! purely a warm-up; output is identical whether or not the store honors it.

use crate::srcset::{SizesAdjuster, build_responsive_attrs};
use crate::store::{MetadataStore, StoreError};
use crate::transform::FILL_MARKER;
use crate::types::ImageMetadata;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;
use tracing::debug;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<img [^>]+>").unwrap());
static CLASS_ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"wp-image-([0-9]+)").unwrap());
static SRC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"src="([^"]+)""#).unwrap());
static WIDTH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#" width="([0-9]+)""#).unwrap());
static HEIGHT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#" height="([0-9]+)""#).unwrap());

/// Rewrite every managed `<img>` tag in `html`, returning the new content.
///
/// Tags that fail any gate are left byte-identical; content without a
/// single tag match is returned unchanged. Store transport failures
/// propagate; unknown attachment ids do not.
pub fn rewrite_content<S, A>(html: &str, store: &S, adjuster: &A) -> Result<String, StoreError>
where
    S: MetadataStore,
    A: SizesAdjuster,
{
    // Dedupe by exact tag text, first-occurrence order.
    let mut selected: Vec<(String, u64)> = Vec::new();
    for tag_match in TAG_RE.find_iter(html) {
        let tag = tag_match.as_str();
        if tag.contains(" srcset=") {
            continue;
        }
        let Some(id) = attachment_id(tag) else {
            continue;
        };
        if !selected.iter().any(|(text, _)| text == tag) {
            selected.push((tag.to_string(), id));
        }
    }
    if selected.is_empty() {
        return Ok(html.to_string());
    }

    let distinct: BTreeSet<u64> = selected.iter().map(|&(_, id)| id).collect();
    if distinct.len() > 1 {
        store.prefetch(&distinct);
    }
    debug!(
        tags = selected.len(),
        attachments = distinct.len(),
        "rewriting managed image tags"
    );

    let mut content = html.to_string();
    for (tag, id) in &selected {
        let Some(meta) = store.attachment_metadata(*id)? else {
            continue;
        };
        if let Some(rewritten) = rewrite_tag(tag, &meta, *id, adjuster) {
            content = content.replace(tag.as_str(), &rewritten);
        }
    }
    Ok(content)
}

/// Extract the managed-attachment id from a `wp-image-<digits>` class token.
fn attachment_id(tag: &str) -> Option<u64> {
    CLASS_ID_RE
        .captures(tag)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
}

fn attr_u32(tag: &str, re: &Regex) -> u32 {
    re.captures(tag)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Produce the rewritten form of one tag, or `None` to leave it untouched.
fn rewrite_tag<A: SizesAdjuster>(
    tag: &str,
    meta: &ImageMetadata,
    id: u64,
    adjuster: &A,
) -> Option<String> {
    let cdn = meta.cdn()?;

    let src_caps = SRC_RE.captures(tag);
    let src = src_caps
        .as_ref()
        .and_then(|caps| caps.get(1))
        .map_or("", |m| m.as_str());

    let filename = cdn.filename();
    if filename.is_empty() || !src.contains(filename) {
        return None;
    }
    if src.contains(FILL_MARKER) {
        return None;
    }

    // Display dimensions come from the tag itself; missing attributes are 0.
    let width = attr_u32(tag, &WIDTH_RE);
    let height = attr_u32(tag, &HEIGHT_RE);

    let attrs = build_responsive_attrs(meta, width)?;
    let sizes = adjuster.adjust(&attrs.sizes, (width, height), src, meta, id);

    let src_attr = src_caps?.get(0)?.as_str();
    let replacement = format!("{src_attr} srcset=\"{}\" sizes=\"{sizes}\"", attrs.srcset);
    Some(tag.replacen(src_attr, &replacement, 1))
}
