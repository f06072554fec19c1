use super::{CyCxHW, Rect, TLBR};
use crate::common::*;

/// Bounding box regression offsets in (dx, dy, dw, dh) form.
///
/// The offsets carry a source box onto a target box: centers move by a
/// fraction of the source extent, sizes change by a log-space factor.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxDelta<T> {
    pub dx: T,
    pub dy: T,
    pub dw: T,
    pub dh: T,
}

impl<T> BoxDelta<T>
where
    T: Float,
{
    /// Offsets carrying `anchor` onto `target`.
    ///
    /// An anchor with non-positive extent propagates non-finite offsets;
    /// no defensive check is made.
    pub fn encode<A, G>(anchor: &A, target: &G) -> Self
    where
        A: Rect<Type = T>,
        G: Rect<Type = T>,
    {
        let dx = (target.cx() - anchor.cx()) / anchor.w();
        let dy = (target.cy() - anchor.cy()) / anchor.h();
        let dw = (target.w() / anchor.w()).ln();
        let dh = (target.h() / anchor.h()).ln();

        Self { dx, dy, dw, dh }
    }

    /// Applies the offsets to `anchor`, inverting [encode](Self::encode).
    pub fn decode<A>(&self, anchor: &A) -> TLBR<T>
    where
        A: Rect<Type = T>,
    {
        let cx = anchor.cx() + self.dx * anchor.w();
        let cy = anchor.cy() + self.dy * anchor.h();
        let w = anchor.w() * self.dw.exp();
        let h = anchor.h() * self.dh.exp();

        TLBR::from(CyCxHW { cy, cx, h, w })
    }

    pub fn dxdydwdh(&self) -> [T; 4] {
        [self.dx, self.dy, self.dw, self.dh]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rect::RectNum;
    use approx::assert_abs_diff_eq;

    #[test]
    fn delta_identity() {
        let anchor: TLBR<f64> = TLBR::from_tlbr([0.0, 0.0, 16.0, 16.0]);
        let delta = BoxDelta::encode(&anchor, &anchor);
        assert_abs_diff_eq!(delta.dx, 0.0);
        assert_abs_diff_eq!(delta.dy, 0.0);
        assert_abs_diff_eq!(delta.dw, 0.0);
        assert_abs_diff_eq!(delta.dh, 0.0);
    }

    #[test]
    fn delta_round_trip() {
        let anchor: TLBR<f64> = TLBR::from_tlbr([0.0, 0.0, 16.0, 16.0]);
        let target: TLBR<f64> = TLBR::from_tlbr([2.0, 3.0, 10.0, 12.0]);

        let delta = BoxDelta::encode(&anchor, &target);
        let decoded = delta.decode(&anchor);

        let [t, l, b, r] = target.tlbr();
        assert_abs_diff_eq!(decoded.t(), t, epsilon = 1e-9);
        assert_abs_diff_eq!(decoded.l(), l, epsilon = 1e-9);
        assert_abs_diff_eq!(decoded.b(), b, epsilon = 1e-9);
        assert_abs_diff_eq!(decoded.r(), r, epsilon = 1e-9);
    }
}
