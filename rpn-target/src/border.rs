use crate::{
    common::*,
    misc::{ImageInfo, Label},
};
use bbox::{Rect, TLBR};

/// Flags anchors lying inside the image bounds, allowing boxes to cross
/// the border by up to `allowed_border` pixels.
///
/// The far edges use a strict comparison: a box ending exactly on the
/// image boundary is outside.
pub fn inside_image(anchors: &[TLBR<f64>], image: &ImageInfo, allowed_border: f64) -> Vec<bool> {
    anchors
        .iter()
        .map(|anchor| {
            anchor.l() >= -allowed_border
                && anchor.t() >= -allowed_border
                && anchor.r() < allowed_border + image.width()
                && anchor.b() < allowed_border + image.height()
        })
        .collect()
}

/// Forces anchors outside the image to ignore, overriding any prior
/// assignment.
pub fn mask_outside_anchors(labels: &mut [Label], inside: &[bool]) {
    for (label, &inside) in izip!(labels, inside) {
        if !inside {
            *label = Label::Ignore;
        }
    }
}
