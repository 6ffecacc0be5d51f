//! Depth reconstruction for rectified stereo rigs.
//!
//! Given a per-pixel disparity field and the geometry derived by
//! [`stereo_calib`], this crate triangulates a dense metric depth map with
//! unreliable pixels zeroed out. Disparity estimation itself is an external
//! collaborator hidden behind the [`DisparityEstimator`] trait; this crate
//! makes no assumption about how disparity is computed, only that it arrives
//! as a 2-D float grid.

mod field;
mod reconstruct;

pub use field::{DepthMap, DisparityField};
pub use reconstruct::{DepthReconstructor, Error};

pub use ndarray;
pub use stereo_calib as calib;

use image::DynamicImage;

/// An external source of disparity estimates for rectified image pairs.
///
/// This is the seam behind which a learned disparity model (or a classical
/// block matcher) lives. The returned field must cover the output pixel grid;
/// nothing else about the estimator's internals, state or lifecycle is
/// assumed.
pub trait DisparityEstimator {
    type Error;

    /// Estimates per-pixel disparity between a rectified stereo pair.
    fn estimate_disparity(
        &mut self,
        left: &DynamicImage,
        right: &DynamicImage,
    ) -> Result<DisparityField, Self::Error>;
}
