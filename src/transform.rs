//! CDN transformation URL construction.
//!
//! On-the-fly resizes are requested by inserting a directive segment
//! (`w_<w>,h_<h>,c_<mode>/`) immediately after the CDN's fixed upload path
//! segment. Generated breakpoint variants carry their own direct URLs and
//! never go through here.

/// Fixed path segment after which transformation directives are inserted.
pub const UPLOAD_SEGMENT: &str = "/image/upload/";

/// Directive token marking a hard-crop transformation in a URL.
///
/// The rewriter skips tags whose `src` already carries this marker: a
/// fill-cropped rendition has discarded content and must not be swapped for
/// constrain-fit breakpoints.
pub const FILL_MARKER: &str = "c_fill";

/// Crop behavior of a transformation directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropMode {
    /// Fit within the requested box, preserving aspect ratio. Never crops.
    Limit,
    /// Crop to exactly fill the requested dimensions.
    Fill,
}

impl CropMode {
    fn directive(self) -> &'static str {
        match self {
            CropMode::Limit => "c_limit",
            CropMode::Fill => "c_fill",
        }
    }
}

/// Insert a size/crop directive into a CDN URL.
///
/// Performs a single literal replacement of [`UPLOAD_SEGMENT`]. When the
/// segment is absent the URL passes through unchanged — a deliberate no-op,
/// not an error (such URLs come from outside the upload path and cannot be
/// transformed).
pub fn transform_url(secure_url: &str, width: u32, height: u32, mode: CropMode) -> String {
    let directive = format!("{UPLOAD_SEGMENT}w_{width},h_{height},{}/", mode.directive());
    secure_url.replacen(UPLOAD_SEGMENT, &directive, 1)
}
