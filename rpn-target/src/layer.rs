use crate::{
    assign::{assign_labels, RawAssignment},
    border::{inside_image, mask_outside_anchors},
    common::*,
    encode::regression_targets,
    grid::{shift_anchors, AnchorGeometry},
    misc::{ImageInfo, Label},
    overlap::overlap_matrix,
    sample::balance,
};
use bbox::TLBR;

/// The anchor target layer initializer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorTargetInit {
    /// Pixels an anchor may cross the image border and still count as
    /// inside.
    pub allowed_border: R64,
    /// Whether the background pass runs after the positive passes, so
    /// that a low-overlap forced positive flips back to background.
    pub clobber_positives: bool,
    /// Overlap below which an anchor is labeled background.
    pub negative_overlap: R64,
    /// Overlap at or above which an anchor is labeled foreground.
    pub positive_overlap: R64,
    /// Pixel stride of the feature-map grid on the original image.
    pub stride: usize,
    /// Labeled mini-batch size per image.
    pub batch_size: usize,
    /// Fraction of the mini-batch reserved for foreground anchors.
    pub fg_fraction: R64,
    /// Anchor window geometry per grid cell.
    pub geometry: AnchorGeometry,
}

impl Default for AnchorTargetInit {
    fn default() -> Self {
        Self {
            allowed_border: r64(0.0),
            clobber_positives: false,
            negative_overlap: r64(0.3),
            positive_overlap: r64(0.7),
            stride: 16,
            batch_size: 256,
            fg_fraction: r64(0.5),
            geometry: AnchorGeometry::default(),
        }
    }
}

impl AnchorTargetInit {
    pub fn build(self) -> Result<AnchorTarget> {
        let Self {
            allowed_border,
            clobber_positives,
            negative_overlap,
            positive_overlap,
            stride,
            batch_size,
            fg_fraction,
            geometry,
        } = self;

        ensure!(
            (0.0..=1.0).contains(&negative_overlap.raw()),
            "negative_overlap must be in range [0, 1]"
        );
        ensure!(
            (0.0..=1.0).contains(&positive_overlap.raw()),
            "positive_overlap must be in range [0, 1]"
        );
        ensure!(stride > 0, "stride must be positive");
        ensure!(batch_size > 0, "batch_size must be positive");
        ensure!(
            fg_fraction.raw() > 0.0 && fg_fraction.raw() <= 1.0,
            "fg_fraction must be in range (0, 1]"
        );
        ensure!(
            geometry.base_size.raw() > 0.0,
            "anchor base size must be positive"
        );
        ensure!(
            !geometry.ratios.is_empty() && !geometry.scales.is_empty(),
            "anchor geometry must define at least one shape"
        );
        ensure!(
            geometry.ratios.iter().all(|ratio| ratio.raw() > 0.0)
                && geometry.scales.iter().all(|scale| scale.raw() > 0.0),
            "anchor ratios and scales must be positive"
        );

        let base_shapes = geometry.base_shapes();

        Ok(AnchorTarget {
            allowed_border: allowed_border.raw(),
            clobber_positives,
            negative_overlap: negative_overlap.raw(),
            positive_overlap: positive_overlap.raw(),
            stride,
            batch_size,
            fg_fraction: fg_fraction.raw(),
            base_shapes,
        })
    }
}

/// Computes classification labels and box regression targets for every
/// anchor over a feature-map grid.
#[derive(Debug, Clone, CopyGetters, Getters)]
pub struct AnchorTarget {
    #[get_copy = "pub"]
    allowed_border: f64,
    #[get_copy = "pub"]
    clobber_positives: bool,
    #[get_copy = "pub"]
    negative_overlap: f64,
    #[get_copy = "pub"]
    positive_overlap: f64,
    #[get_copy = "pub"]
    stride: usize,
    #[get_copy = "pub"]
    batch_size: usize,
    #[get_copy = "pub"]
    fg_fraction: f64,
    /// Anchor windows generated at every grid cell.
    #[get = "pub"]
    base_shapes: Vec<TLBR<f64>>,
}

impl AnchorTarget {
    /// Number of anchors generated per grid cell.
    pub fn num_shapes(&self) -> usize {
        self.base_shapes.len()
    }

    /// Computes targets for one image, drawing the subsampling from a
    /// fresh entropy-seeded generator.
    ///
    /// `grid` is the (rows, cols) spatial shape of the score map;
    /// `gt_boxes` is an M×4 array of (x1, y1, x2, y2) corners.
    pub fn forward(
        &self,
        grid: (usize, usize),
        gt_boxes: ArrayView2<f64>,
        image: &ImageInfo,
    ) -> Result<AnchorTargets> {
        let mut rng = StdRng::from_entropy();
        self.forward_with_rng(grid, gt_boxes, image, &mut rng)
    }

    /// Like [forward](Self::forward), with a caller-provided random
    /// source for the label subsampling.
    pub fn forward_with_rng<R>(
        &self,
        grid: (usize, usize),
        gt_boxes: ArrayView2<f64>,
        image: &ImageInfo,
        rng: &mut R,
    ) -> Result<AnchorTargets>
    where
        R: Rng + ?Sized,
    {
        ensure!(
            gt_boxes.nrows() == 0 || gt_boxes.ncols() == 4,
            "ground-truth boxes must form an M×4 array, but get shape {:?}",
            gt_boxes.shape()
        );

        let anchors = shift_anchors(grid, self.stride, &self.base_shapes);
        let gt_boxes: Vec<TLBR<f64>> = gt_boxes
            .rows()
            .into_iter()
            .map(|corners| {
                TLBR::from_tlbr_unchecked([corners[1], corners[0], corners[3], corners[2]])
            })
            .collect();

        let overlaps = overlap_matrix(&anchors, &gt_boxes);
        let RawAssignment {
            argmax_overlaps,
            mut labels,
            ..
        } = assign_labels(
            &overlaps,
            self.negative_overlap,
            self.positive_overlap,
            self.clobber_positives,
        );

        balance(&mut labels, self.batch_size, self.fg_fraction, rng);

        let inside = inside_image(&anchors, image, self.allowed_border);
        mask_outside_anchors(&mut labels, &inside);

        let bbox_targets = if gt_boxes.is_empty() {
            Array2::zeros((anchors.len(), 4))
        } else {
            let matched: Vec<TLBR<f64>> = argmax_overlaps
                .iter()
                .map(|&gt| gt_boxes[gt].clone())
                .collect();
            regression_targets(&anchors, &matched)
        };

        let num_fg = labels
            .iter()
            .filter(|&&label| label == Label::Positive)
            .count();
        let num_bg = labels
            .iter()
            .filter(|&&label| label == Label::Negative)
            .count();
        debug!(
            "sampled {} foreground and {} background anchors out of {}",
            num_fg,
            num_bg,
            labels.len()
        );

        Ok(AnchorTargets {
            labels,
            match_indices: argmax_overlaps,
            bbox_targets,
        })
    }

    /// Strips the leading batch axis and computes targets for the first
    /// sample.
    pub fn forward_batched(
        &self,
        grid: (usize, usize),
        gt_boxes: ArrayView3<f64>,
        image: &ImageInfo,
    ) -> Result<AnchorTargets> {
        ensure!(
            gt_boxes.shape()[0] >= 1,
            "ground-truth batch must contain at least one sample, but get shape {:?}",
            gt_boxes.shape()
        );
        self.forward(grid, gt_boxes.index_axis(Axis(0), 0), image)
    }
}

/// Anchor labels and regression targets for one image.
#[derive(Debug, Clone, Getters)]
pub struct AnchorTargets {
    /// Label per anchor, aligned with the anchor raster order.
    #[get = "pub"]
    labels: Vec<Label>,
    /// Matched ground-truth index per anchor, meaningful where the label
    /// is not ignore.
    #[get = "pub"]
    match_indices: Vec<usize>,
    /// Regression deltas per anchor in (dx, dy, dw, dh) order, shape
    /// (N, 4).
    #[get = "pub"]
    bbox_targets: Array2<f64>,
}

impl AnchorTargets {
    pub fn num_anchors(&self) -> usize {
        self.labels.len()
    }

    /// Labels as a (1, N) array of {1, 0, -1} with the batch axis the
    /// downstream pipeline expects.
    pub fn label_array(&self) -> Array2<i8> {
        self.labels
            .iter()
            .map(|label| label.value())
            .collect::<Array1<i8>>()
            .insert_axis(Axis(0))
    }

    /// Targets as a (1, N, 4) array with the batch axis the downstream
    /// pipeline expects.
    pub fn target_array(&self) -> Array3<f64> {
        self.bbox_targets.clone().insert_axis(Axis(0))
    }
}
