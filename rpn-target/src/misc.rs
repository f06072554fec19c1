use crate::common::*;
use bbox::HW;

/// Per-anchor classification label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    /// Foreground training example.
    Positive,
    /// Background training example.
    Negative,
    /// Excluded from loss computation.
    Ignore,
}

impl Label {
    pub fn value(&self) -> i8 {
        match self {
            Self::Positive => 1,
            Self::Negative => 0,
            Self::Ignore => -1,
        }
    }
}

/// Size and scale of the original image the anchors are projected onto.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageInfo {
    size: HW<f64>,
    scale: R64,
}

impl ImageInfo {
    pub fn new(height: f64, width: f64, scale: f64) -> Result<Self> {
        let size = HW::try_from_hw([height, width])?;
        let scale =
            R64::try_new(scale).ok_or_else(|| format_err!("scale must be a finite value"))?;
        Ok(Self { size, scale })
    }

    pub fn height(&self) -> f64 {
        self.size.h()
    }

    pub fn width(&self) -> f64 {
        self.size.w()
    }

    pub fn scale(&self) -> f64 {
        self.scale.raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_values() {
        assert_eq!(Label::Positive.value(), 1);
        assert_eq!(Label::Negative.value(), 0);
        assert_eq!(Label::Ignore.value(), -1);
    }

    #[test]
    fn image_info_rejects_malformed_input() {
        assert!(ImageInfo::new(-32.0, 32.0, 1.0).is_err());
        assert!(ImageInfo::new(32.0, 32.0, f64::NAN).is_err());

        let info = ImageInfo::new(32.0, 48.0, 2.0).unwrap();
        assert_eq!(info.height(), 32.0);
        assert_eq!(info.width(), 48.0);
        assert_eq!(info.scale(), 2.0);
    }
}
