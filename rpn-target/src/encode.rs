use crate::common::*;
use bbox::{BoxDelta, TLBR};

/// Regression deltas from every anchor to its matched ground-truth box,
/// as an N×4 array in (dx, dy, dw, dh) order.
///
/// Targets are computed for all anchors regardless of label; consumers
/// mask by label when computing loss.
pub fn regression_targets(anchors: &[TLBR<f64>], matched_gt: &[TLBR<f64>]) -> Array2<f64> {
    debug_assert_eq!(anchors.len(), matched_gt.len());

    let mut targets = Array2::zeros((anchors.len(), 4));
    for (row, (anchor, gt)) in izip!(anchors, matched_gt).enumerate() {
        let [dx, dy, dw, dh] = BoxDelta::encode(anchor, gt).dxdydwdh();
        targets[[row, 0]] = dx;
        targets[[row, 1]] = dy;
        targets[[row, 2]] = dw;
        targets[[row, 3]] = dh;
    }
    targets
}
