use crate::common::*;
use bbox::{RectFloat, TLBR};

/// Pairwise IoU between anchors and ground-truth boxes.
///
/// Returns an N×M matrix with entries in [0, 1]. Disjoint pairs and boxes
/// with non-positive area contribute zero.
pub fn overlap_matrix(anchors: &[TLBR<f64>], gt_boxes: &[TLBR<f64>]) -> Array2<f64> {
    let mut overlaps = Array2::zeros((anchors.len(), gt_boxes.len()));
    for (row, anchor) in anchors.iter().enumerate() {
        for (col, gt) in gt_boxes.iter().enumerate() {
            overlaps[[row, col]] = anchor.iou_with(gt);
        }
    }
    overlaps
}
