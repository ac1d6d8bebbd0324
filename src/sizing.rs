//! Pure calculation functions for display dimensions.
//!
//! All functions here are pure and testable without any I/O or metadata.

/// Compute the largest aspect-preserving fit of `original` within `bbox`.
///
/// A box dimension of 0 means "unconstrained in that dimension". The binding
/// dimension lands exactly on the box edge; the other is derived from the
/// aspect ratio and rounded.
///
/// Returns `None` when the box demands no downsize — both targets at or
/// above the original — or when any computed dimension would round to zero.
/// Callers treat `None` as "use the registry-provided dimensions verbatim".
///
/// # Examples
/// ```
/// # use mirrorpix::sizing::constrain_fit;
/// // 1200x800 into a 300x300 box → 300x200
/// assert_eq!(constrain_fit((1200, 800), (300, 300)), Some((300, 200)));
///
/// // A box larger than the original is not a valid fit
/// assert_eq!(constrain_fit((400, 300), (800, 600)), None);
/// ```
pub fn constrain_fit(original: (u32, u32), bbox: (u32, u32)) -> Option<(u32, u32)> {
    let (orig_w, orig_h) = original;
    if orig_w == 0 || orig_h == 0 {
        return None;
    }

    let (box_w, box_h) = bbox;
    let width_ratio = if box_w > 0 {
        box_w as f64 / orig_w as f64
    } else {
        f64::INFINITY
    };
    let height_ratio = if box_h > 0 {
        box_h as f64 / orig_h as f64
    } else {
        f64::INFINITY
    };

    // Fully unconstrained box
    if !width_ratio.is_finite() && !height_ratio.is_finite() {
        return None;
    }

    let (w, h) = if width_ratio <= height_ratio {
        (box_w, (orig_h as f64 * width_ratio).round() as u32)
    } else {
        ((orig_w as f64 * height_ratio).round() as u32, box_h)
    };

    if w == 0 || h == 0 {
        return None;
    }
    // Not a downsize: the original already fits the box.
    if w >= orig_w && h >= orig_h {
        return None;
    }

    Some((w, h))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_landscape_into_square_box() {
        // 1200x800 into 300x300 → width binds at 300, height 200
        assert_eq!(constrain_fit((1200, 800), (300, 300)), Some((300, 200)));
    }

    #[test]
    fn fits_portrait_into_square_box() {
        // 800x1200 into 300x300 → height binds at 300, width 200
        assert_eq!(constrain_fit((800, 1200), (300, 300)), Some((200, 300)));
    }

    #[test]
    fn zero_height_means_unconstrained() {
        // 2000x1500 into 768-wide → 768x576
        assert_eq!(constrain_fit((2000, 1500), (768, 0)), Some((768, 576)));
    }

    #[test]
    fn zero_width_means_unconstrained() {
        assert_eq!(constrain_fit((2000, 1500), (0, 750)), Some((1000, 750)));
    }

    #[test]
    fn rounds_derived_dimension() {
        // 1000x667 into 300x300 → 300 x round(200.1) = 300x200
        assert_eq!(constrain_fit((1000, 667), (300, 300)), Some((300, 200)));
    }

    #[test]
    fn binding_dimension_lands_on_box_edge() {
        // Mixed box: height binds, width derived
        assert_eq!(constrain_fit((800, 600), (1000, 300)), Some((400, 300)));
    }

    #[test]
    fn no_fit_when_box_exceeds_original() {
        assert_eq!(constrain_fit((400, 300), (800, 600)), None);
    }

    #[test]
    fn no_fit_when_box_equals_original() {
        assert_eq!(constrain_fit((400, 300), (400, 300)), None);
    }

    #[test]
    fn no_fit_for_fully_unconstrained_box() {
        assert_eq!(constrain_fit((400, 300), (0, 0)), None);
    }

    #[test]
    fn no_fit_for_degenerate_original() {
        assert_eq!(constrain_fit((0, 300), (100, 100)), None);
        assert_eq!(constrain_fit((300, 0), (100, 100)), None);
    }

    #[test]
    fn no_fit_when_derived_dimension_rounds_to_zero() {
        // 1000x1 into a 300-wide box → height rounds to 0
        assert_eq!(constrain_fit((1000, 1), (300, 0)), None);
    }

    #[test]
    fn extreme_panorama_still_fits() {
        // 4000x500 into 800x800 → 800x100
        assert_eq!(constrain_fit((4000, 500), (800, 800)), Some((800, 100)));
    }
}
