use super::{CyCxHW, TLBR};
use crate::common::*;

/// The generic rectangle.
pub trait Rect {
    type Type;

    fn t(&self) -> Self::Type;
    fn l(&self) -> Self::Type;
    fn b(&self) -> Self::Type;
    fn r(&self) -> Self::Type;
    fn cy(&self) -> Self::Type;
    fn cx(&self) -> Self::Type;
    fn h(&self) -> Self::Type;
    fn w(&self) -> Self::Type;

    fn try_from_tlbr(tlbr: [Self::Type; 4]) -> Result<Self>
    where
        Self: Sized;

    fn try_from_tlhw(tlhw: [Self::Type; 4]) -> Result<Self>
    where
        Self: Sized;

    fn try_from_cycxhw(cycxhw: [Self::Type; 4]) -> Result<Self>
    where
        Self: Sized;
}

pub trait RectNum: Rect
where
    Self::Type: Num + PartialOrd,
{
    fn from_tlbr(tlbr: [Self::Type; 4]) -> Self
    where
        Self: Sized,
    {
        Self::try_from_tlbr(tlbr).unwrap()
    }

    fn from_tlhw(tlhw: [Self::Type; 4]) -> Self
    where
        Self: Sized,
    {
        Self::try_from_tlhw(tlhw).unwrap()
    }

    fn from_cycxhw(cycxhw: [Self::Type; 4]) -> Self
    where
        Self: Sized,
    {
        Self::try_from_cycxhw(cycxhw).unwrap()
    }

    fn cycxhw(&self) -> [Self::Type; 4] {
        [self.cy(), self.cx(), self.h(), self.w()]
    }

    fn tlbr(&self) -> [Self::Type; 4] {
        [self.t(), self.l(), self.b(), self.r()]
    }

    fn tlhw(&self) -> [Self::Type; 4] {
        [self.t(), self.l(), self.h(), self.w()]
    }

    fn hw(&self) -> [Self::Type; 2] {
        [self.h(), self.w()]
    }

    fn to_cycxhw(&self) -> CyCxHW<Self::Type> {
        CyCxHW {
            cy: self.cy(),
            cx: self.cx(),
            h: self.h(),
            w: self.w(),
        }
    }

    fn to_tlbr(&self) -> TLBR<Self::Type> {
        TLBR {
            t: self.t(),
            l: self.l(),
            b: self.b(),
            r: self.r(),
        }
    }

    fn area(&self) -> <Self::Type as Mul<Self::Type>>::Output
    where
        Self::Type: Mul<Self::Type>,
    {
        self.h() * self.w()
    }
}

pub trait RectFloat: RectNum
where
    Self::Type: Float,
{
    fn intersect_with<R>(&self, other: &R) -> Option<TLBR<Self::Type>>
    where
        R: Rect<Type = Self::Type>,
    {
        let t = self.t().max(other.t());
        let l = self.l().max(other.l());
        let b = self.b().min(other.b());
        let r = self.r().min(other.r());
        (b > t && r > l).then(|| TLBR::from_tlbr([t, l, b, r]))
    }

    fn intersection_area_with<R>(&self, other: &R) -> Self::Type
    where
        R: Rect<Type = Self::Type>,
    {
        self.intersect_with(other)
            .map(|rect| rect.area())
            .unwrap_or_else(Self::Type::zero)
    }

    /// Intersection over union of two boxes.
    ///
    /// Disjoint pairs and boxes with non-positive area give zero.
    fn iou_with<R>(&self, other: &R) -> Self::Type
    where
        R: Rect<Type = Self::Type>,
    {
        let zero = Self::Type::zero();
        let inter_area = self.intersection_area_with(other);
        if inter_area <= zero {
            return zero;
        }
        let union_area = self.area() + other.area() - inter_area;
        if union_area <= zero {
            return zero;
        }
        inter_area / union_area
    }
}

impl<T> RectNum for T
where
    T: Rect,
    T::Type: Num + PartialOrd,
{
}

impl<T> RectFloat for T
where
    T: Rect,
    T::Type: Float,
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn rect_conversion() {
        let tlbr: TLBR<f64> = TLBR::from_tlbr([2.0, 1.0, 6.0, 9.0]);
        assert_eq!(tlbr.cycxhw(), [4.0, 5.0, 4.0, 8.0]);
        assert_eq!(tlbr.to_cycxhw().to_tlbr(), tlbr);
        assert_eq!(tlbr.tlhw(), [2.0, 1.0, 4.0, 8.0]);
        assert_eq!(tlbr.hw(), [4.0, 8.0]);

        let cycxhw: CyCxHW<f64> = CyCxHW::from_cycxhw([4.0, 5.0, 4.0, 8.0]);
        assert_eq!(cycxhw.tlbr(), [2.0, 1.0, 6.0, 9.0]);
    }

    #[test]
    fn rect_iou_identity() {
        let rect: TLBR<f64> = TLBR::from_tlbr([0.0, 0.0, 4.0, 4.0]);
        assert_abs_diff_eq!(rect.iou_with(&rect), 1.0);
    }

    #[test]
    fn rect_iou_symmetry() {
        let lhs: TLBR<f64> = TLBR::from_tlbr([0.0, 0.0, 4.0, 4.0]);
        let rhs: TLBR<f64> = TLBR::from_tlbr([2.0, 2.0, 6.0, 6.0]);
        assert_abs_diff_eq!(lhs.iou_with(&rhs), rhs.iou_with(&lhs));
        assert_abs_diff_eq!(lhs.iou_with(&rhs), 4.0 / 28.0);
    }

    #[test]
    fn rect_iou_disjoint() {
        let lhs: TLBR<f64> = TLBR::from_tlbr([0.0, 0.0, 4.0, 4.0]);
        let rhs: TLBR<f64> = TLBR::from_tlbr([0.0, 4.0, 4.0, 8.0]);
        assert_abs_diff_eq!(lhs.iou_with(&rhs), 0.0);
    }

    #[test]
    fn rect_iou_degenerate_area() {
        let empty: TLBR<f64> = TLBR::from_tlbr([1.0, 1.0, 1.0, 5.0]);
        let rect: TLBR<f64> = TLBR::from_tlbr([0.0, 0.0, 4.0, 4.0]);
        assert_abs_diff_eq!(empty.iou_with(&rect), 0.0);
        assert_abs_diff_eq!(empty.iou_with(&empty), 0.0);
    }
}
