//! This crate reads the textual calibration records that accompany rectified
//! stereo datasets (such as the KITTI `calib_cam_to_cam.txt` files) and derives
//! the quantities needed for depth-from-disparity triangulation: the intrinsic
//! matrix of each rectified camera and the stereo baseline between their
//! optical centers.
//!
//! Parsing and derivation are deliberately separate steps. A
//! [`CalibrationRecord`] is the raw numeric content of a file and may hold
//! entries (such as the rectifying rotations) that the derived
//! [`RectifiedStereoCalibration`] validates but never consumes, so those
//! entries stay easy to inspect in tests without being load-bearing.

mod error;
mod record;
mod rectified;

pub use error::Error;
pub use record::CalibrationRecord;
pub use rectified::RectifiedStereoCalibration;

pub use nalgebra;
