//! Training target assignment for a region proposal network.
//!
//! Given a feature-map grid of candidate anchor boxes and the ground-truth
//! boxes of one image, the [AnchorTarget](crate::AnchorTarget) layer labels
//! every anchor as foreground, background or ignored, subsamples the labels
//! to a class-balanced mini-batch, and encodes a box regression target per
//! anchor.

mod common;

pub use assign::*;
pub mod assign;

pub use border::*;
pub mod border;

pub use encode::*;
pub mod encode;

pub use grid::*;
pub mod grid;

pub use layer::*;
pub mod layer;

pub use misc::*;
pub mod misc;

pub use overlap::*;
pub mod overlap;

pub use sample::*;
pub mod sample;
