use crate::common::*;
use bbox::{RectNum, TLBR};

/// Anchor window geometry generated at every feature-map grid cell.
///
/// A square window of `base_size` pixels is reshaped to every aspect ratio
/// preserving area, then magnified by every scale, all centered on the
/// window center. Shapes are enumerated ratio-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorGeometry {
    pub base_size: R64,
    pub ratios: Vec<R64>,
    pub scales: Vec<R64>,
}

impl Default for AnchorGeometry {
    fn default() -> Self {
        Self {
            base_size: r64(16.0),
            ratios: vec![r64(0.5), r64(1.0), r64(2.0)],
            scales: vec![r64(8.0), r64(16.0), r64(32.0)],
        }
    }
}

impl AnchorGeometry {
    pub fn num_shapes(&self) -> usize {
        self.ratios.len() * self.scales.len()
    }

    pub fn base_shapes(&self) -> Vec<TLBR<f64>> {
        let base = self.base_size.raw();
        let (cy, cx) = (base / 2.0, base / 2.0);

        iproduct!(&self.ratios, &self.scales)
            .map(|(&ratio, &scale)| {
                let (ratio, scale) = (ratio.raw(), scale.raw());
                let ws = (base * base / ratio).sqrt();
                let hs = ws * ratio;
                let h = hs * scale;
                let w = ws * scale;
                TLBR::from_tlbr([cy - h / 2.0, cx - w / 2.0, cy + h / 2.0, cx + w / 2.0])
            })
            .collect()
    }
}

/// Translates the base shapes over an R×C feature-map grid at the given
/// pixel stride.
///
/// Output order is row-major over grid cells, then shape index within the
/// cell; downstream label and target arrays align positionally with this
/// sequence.
pub fn shift_anchors(
    grid: (usize, usize),
    stride: usize,
    base_shapes: &[TLBR<f64>],
) -> Vec<TLBR<f64>> {
    let (rows, cols) = grid;
    iproduct!(0..rows, 0..cols)
        .flat_map(|(row, col)| {
            let dy = (row * stride) as f64;
            let dx = (col * stride) as f64;
            base_shapes.iter().map(move |shape| shape.translate(dy, dx))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use bbox::Rect;

    #[test]
    fn base_shapes_preserve_area_across_ratios() {
        let geometry = AnchorGeometry {
            base_size: r64(16.0),
            ratios: vec![r64(0.5), r64(1.0), r64(2.0)],
            scales: vec![r64(1.0)],
        };
        let shapes = geometry.base_shapes();
        assert_eq!(shapes.len(), 3);
        for shape in &shapes {
            assert_abs_diff_eq!(shape.area(), 256.0, epsilon = 1e-9);
            assert_abs_diff_eq!(shape.cy(), 8.0, epsilon = 1e-9);
            assert_abs_diff_eq!(shape.cx(), 8.0, epsilon = 1e-9);
        }
        assert_abs_diff_eq!(shapes[0].h() / shapes[0].w(), 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(shapes[1].h() / shapes[1].w(), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(shapes[2].h() / shapes[2].w(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn shift_anchors_raster_order() {
        let base = vec![TLBR::from_tlbr([0.0, 0.0, 16.0, 16.0])];
        let anchors = shift_anchors((2, 2), 16, &base);
        assert_eq!(anchors.len(), 4);
        assert_eq!(anchors[0].tlbr(), [0.0, 0.0, 16.0, 16.0]);
        assert_eq!(anchors[1].tlbr(), [0.0, 16.0, 16.0, 32.0]);
        assert_eq!(anchors[2].tlbr(), [16.0, 0.0, 32.0, 16.0]);
        assert_eq!(anchors[3].tlbr(), [16.0, 16.0, 32.0, 32.0]);
    }

    #[test]
    fn shift_anchors_shape_major_within_cell() {
        let geometry = AnchorGeometry {
            base_size: r64(16.0),
            ratios: vec![r64(1.0)],
            scales: vec![r64(1.0), r64(2.0)],
        };
        let anchors = shift_anchors((1, 2), 16, &geometry.base_shapes());
        assert_eq!(anchors.len(), 4);
        // both shapes of cell (0, 0) precede every shape of cell (0, 1)
        assert_abs_diff_eq!(anchors[0].cx(), 8.0);
        assert_abs_diff_eq!(anchors[1].cx(), 8.0);
        assert_abs_diff_eq!(anchors[2].cx(), 24.0);
        assert_abs_diff_eq!(anchors[3].cx(), 24.0);
    }
}
