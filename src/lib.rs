//! # Mirrorpix
//!
//! CDN mirroring and responsive image resolution for CMS-managed
//! attachments. Locally-stored images are mirrored once to a remote image
//! CDN; from then on, rendering is served from CDN-hosted breakpoint
//! variants — attachment URLs, `srcset`/`sizes` attributes, and on-the-fly
//! resizes all resolve against the mirrored asset instead of local files.
//!
//! # Architecture: Three-Stage Resolution
//!
//! Every render request flows through three independent stages, each a pure
//! function over the attachment's stored metadata:
//!
//! ```text
//! 1. Resolve   size token   →  concrete width/height/crop   (registry)
//! 2. Select    metadata     →  CDN URL + final dimensions   (select)
//! 3. Compose   variants     →  srcset / sizes attributes    (srcset, rewrite)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Degradability**: any stage can bail to "not CDN-served" and the host
//!   falls back to its native local rendering, with no error surfaced.
//! - **Testability**: each stage is pure computation over in-memory
//!   records, so the whole pipeline unit-tests without a CDN or a database.
//! - **Reuse**: the same selection and composition logic serves both
//!   freshly-rendered image elements and rewriting of pre-existing content.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Shared data model: attachment metadata, CDN records, variants, size tokens |
//! | [`config`] | `mirrorpix.toml` loading, merging, and the registered-size tables |
//! | [`registry`] | Size-name resolution: theme overrides over global defaults |
//! | [`sizing`] | Pure dimension math: aspect-preserving constrain-fit |
//! | [`transform`] | On-the-fly CDN transformation URL construction |
//! | [`select`] | Best-variant selection for one requested size |
//! | [`srcset`] | `srcset`/`sizes` building and the adjustment hook |
//! | [`rewrite`] | Content rewriting: scan, dedupe, and patch `<img>` tags |
//! | [`store`] | Metadata-store collaborator interface + in-memory implementation |
//! | [`upload`] | Upload mirror boundary: populates CDN metadata once per attachment |
//! | [`engine`] | The wired façade the host rendering pipeline calls |
//!
//! # Design Decisions
//!
//! ## Flat Tag Scanning, Not DOM Parsing
//!
//! The rewriter scans for `<img ...>` substrings with a flat pattern and
//! patches attribute text in place. Post-render content is the only input,
//! volumes are large, and the failure mode of a non-matching tag is simply
//! "leave it alone" — a full HTML parser would add cost and a second
//! serialization without changing any outcome. Tags already carrying a
//! `srcset` are skipped, which also makes rewriting idempotent.
//!
//! ## Explicit Wiring, No Ambient State
//!
//! There is no global plugin object. The host constructs one
//! [`engine::Engine`] from its collaborators (metadata store, size
//! registry, `sizes` adjustment hook) and calls plain operations. Every
//! call re-reads external state; nothing is cached across invocations.
//!
//! ## Absence Is Not an Error
//!
//! Unmirrored attachments, unknown size names, cropped sizes, and
//! out-of-bounds requests all resolve to "defer to native rendering" —
//! `None` results and pass-through values, never errors. Only collaborator
//! transport failures propagate, and retry policy stays with the
//! collaborator that failed.
//!
//! ## Breakpoints Keyed by Width
//!
//! Generated variants live in a width-keyed map with ascending-width
//! iteration. Widths are unique by construction (a regenerated breakpoint
//! replaces its predecessor), and `srcset` candidate order falls out of the
//! map's ordering rather than any incidental insertion sequence.

pub mod config;
pub mod engine;
pub mod registry;
pub mod rewrite;
pub mod select;
pub mod sizing;
pub mod srcset;
pub mod store;
pub mod transform;
pub mod types;
pub mod upload;

pub use config::{ConfigError, PluginConfig};
pub use engine::{Engine, EngineError, ImageAttributes};
pub use registry::{ConfigSizeRegistry, Dimension, SizeRegistry};
pub use srcset::{IdentityAdjuster, ResponsiveAttrs, SizesAdjuster};
pub use store::{InMemoryStore, MetadataStore, StoreError};
pub use types::{CdnData, DownsizeResult, ImageMetadata, SizeDefinition, SizeToken, Variant};
