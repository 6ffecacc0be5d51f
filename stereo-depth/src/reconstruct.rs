use log::*;
use stereo_calib::RectifiedStereoCalibration;
use thiserror::Error;

use crate::{DepthMap, DisparityField};

/// Ways a disparity field can be unusable for reconstruction. Numeric edge
/// cases such as non-positive or near-zero disparity are not errors; they
/// are resolved per pixel by the validity threshold.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The disparity field has no pixels at all.
    #[error("disparity field has no pixels")]
    EmptyDisparity,
    /// The disparity field does not match the calibrated image size.
    #[error("disparity field is {actual:?} where the calibration describes {expected:?} (rows, columns)")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
}

/// Converts disparity fields into metric depth maps by classic rectified
/// stereo triangulation.
///
/// Per pixel the depth is `1000 * baseline * fx / (d * image_width)`
/// millimeters, where `fx` is the left camera's horizontal focal length.
/// The division by the calibrated image width is deliberate: the disparity
/// is interpreted as a fraction of the image width, which absorbs the
/// estimator having run at a rescaled resolution.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DepthReconstructor {
    depth_limit_mm: u16,
    require_full_resolution: bool,
}

impl DepthReconstructor {
    /// Creates a `DepthReconstructor` with default values.
    ///
    /// Same as calling [`Default::default`].
    pub fn new() -> Self {
        Default::default()
    }

    /// Set the largest representable depth in millimeters.
    ///
    /// Disparities so small that the triangulated depth would exceed this
    /// limit are treated as unreliable and zeroed rather than clamped.
    ///
    /// Default is `u16::MAX`.
    #[must_use]
    pub fn depth_limit_mm(self, depth_limit_mm: u16) -> Self {
        Self {
            depth_limit_mm,
            ..self
        }
    }

    /// Require the disparity field to match the calibrated image size
    /// exactly.
    ///
    /// Off by default: disparity estimators commonly run at a rescaled
    /// resolution, which the reconstruction formula already accounts for.
    #[must_use]
    pub fn require_full_resolution(self, require_full_resolution: bool) -> Self {
        Self {
            require_full_resolution,
            ..self
        }
    }

    /// Triangulates a dense metric depth map from a disparity field.
    ///
    /// Depth values are truncated toward zero to fit the 16-bit output.
    /// Pixels whose disparity is non-positive, or small enough that the
    /// depth would exceed the configured limit, come out as zero; the
    /// formula is never evaluated for a non-positive disparity.
    ///
    /// ```
    /// use stereo_calib::nalgebra::Matrix3;
    /// use stereo_calib::RectifiedStereoCalibration;
    /// use stereo_depth::ndarray::arr2;
    /// use stereo_depth::{DepthReconstructor, DisparityField};
    ///
    /// let calibration = RectifiedStereoCalibration {
    ///     k_left: Matrix3::new(721.5, 0.0, 609.6, 0.0, 721.5, 172.9, 0.0, 0.0, 1.0),
    ///     k_right: Matrix3::new(721.5, 0.0, 609.6, 0.0, 721.5, 172.9, 0.0, 0.0, 1.0),
    ///     baseline: 0.54,
    ///     image_width: 1242.0,
    ///     image_height: 375.0,
    /// };
    /// let disparity = DisparityField(arr2(&[[10.0f32, 0.0]]));
    /// let depth = DepthReconstructor::new()
    ///     .compute(&disparity, &calibration)
    ///     .unwrap();
    /// // 1000 * 0.54 * 721.5 / (10 * 1242) = 31.37 mm, truncated.
    /// assert_eq!(depth[(0, 0)], 31);
    /// assert_eq!(depth[(0, 1)], 0);
    /// ```
    pub fn compute(
        &self,
        disparity: &DisparityField,
        calibration: &RectifiedStereoCalibration,
    ) -> Result<DepthMap, Error> {
        let (rows, cols) = disparity.dimensions();
        if rows == 0 || cols == 0 {
            return Err(Error::EmptyDisparity);
        }
        if self.require_full_resolution {
            let expected = (
                calibration.image_height as usize,
                calibration.image_width as usize,
            );
            if (rows, cols) != expected {
                return Err(Error::ShapeMismatch {
                    expected,
                    actual: (rows, cols),
                });
            }
        }

        // Millimeter depth for a disparity of one full image width.
        let scale = 1000.0 * calibration.baseline * calibration.fx() / calibration.image_width;
        // Below this disparity the depth would exceed the limit.
        let disp_limit = scale / f64::from(self.depth_limit_mm);
        trace!("disparity validity limit is {}", disp_limit);

        let depth = disparity.map(|&d| {
            let d = f64::from(d);
            if d <= 0.0 || d < disp_limit {
                0
            } else {
                (scale / d) as u16
            }
        });
        Ok(DepthMap(depth))
    }
}

impl Default for DepthReconstructor {
    fn default() -> Self {
        Self {
            depth_limit_mm: u16::MAX,
            require_full_resolution: false,
        }
    }
}
