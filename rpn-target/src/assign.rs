use crate::{common::*, misc::Label};

/// Raw label assignment, before mini-batch subsampling.
#[derive(Debug, Clone, PartialEq)]
pub struct RawAssignment {
    /// Index of the best-overlapping ground-truth box per anchor.
    pub argmax_overlaps: Vec<usize>,
    /// Overlap with that box per anchor.
    pub max_overlaps: Vec<f64>,
    /// Label per anchor.
    pub labels: Vec<Label>,
}

/// Turns the overlap matrix into a three-valued label per anchor plus the
/// matched ground-truth index per anchor.
///
/// Labels start as ignore. With `clobber_positives` unset, the background
/// pass runs first so that the positive passes may override it; set, it
/// runs last and overrides them instead. Every ground-truth box keeps its
/// single best anchor as foreground regardless of threshold; ties keep
/// the lowest index on both argmax axes.
pub fn assign_labels(
    overlaps: &Array2<f64>,
    negative_overlap: f64,
    positive_overlap: f64,
    clobber_positives: bool,
) -> RawAssignment {
    let num_anchors = overlaps.nrows();
    let num_gt = overlaps.ncols();

    let mut labels = vec![Label::Ignore; num_anchors];

    if num_anchors == 0 || num_gt == 0 {
        // Without ground truth no pass fires and every anchor stays ignored.
        return RawAssignment {
            argmax_overlaps: vec![0; num_anchors],
            max_overlaps: vec![0.0; num_anchors],
            labels,
        };
    }

    let (argmax_overlaps, max_overlaps): (Vec<usize>, Vec<f64>) = (0..num_anchors)
        .map(|anchor| {
            let mut best = (0, overlaps[[anchor, 0]]);
            for gt in 1..num_gt {
                if overlaps[[anchor, gt]] > best.1 {
                    best = (gt, overlaps[[anchor, gt]]);
                }
            }
            best
        })
        .unzip();

    let gt_argmax_overlaps: Vec<usize> = (0..num_gt)
        .map(|gt| {
            let mut best = (0, overlaps[[0, gt]]);
            for anchor in 1..num_anchors {
                if overlaps[[anchor, gt]] > best.1 {
                    best = (anchor, overlaps[[anchor, gt]]);
                }
            }
            best.0
        })
        .collect();

    if !clobber_positives {
        // Background first so that the positive passes may clobber it.
        for (label, &max) in izip!(&mut labels, &max_overlaps) {
            if max < negative_overlap {
                *label = Label::Negative;
            }
        }
    }

    // Each ground-truth box keeps its best anchor regardless of threshold.
    for &anchor in gt_argmax_overlaps.iter().unique() {
        labels[anchor] = Label::Positive;
    }

    for (label, &max) in izip!(&mut labels, &max_overlaps) {
        if max >= positive_overlap {
            *label = Label::Positive;
        }
    }

    if clobber_positives {
        // Background last so that it clobbers the positive passes.
        for (label, &max) in izip!(&mut labels, &max_overlaps) {
            if max < negative_overlap {
                *label = Label::Negative;
            }
        }
    }

    RawAssignment {
        argmax_overlaps,
        max_overlaps,
        labels,
    }
}
