use std::path::Path;

use log::*;
use nalgebra::{Matrix3, Matrix3x4, Point2, Point3, Translation3, Vector2};

use crate::{CalibrationRecord, Error};

/// The derived geometry of a rectified two-camera rig: the intrinsic matrix
/// of each rectified camera, the stereo baseline between their optical
/// centers, and the rectified sensor size.
///
/// Constructed once per calibration record and read-only afterward. All
/// distances are in meters, all pixel quantities in pixels of the rectified
/// images.
#[derive(Debug, Clone, PartialEq)]
pub struct RectifiedStereoCalibration {
    /// Intrinsic matrix of the left rectified camera (top-left 3x3 block of
    /// its projection matrix).
    pub k_left: Matrix3<f64>,
    /// Intrinsic matrix of the right rectified camera.
    pub k_right: Matrix3<f64>,
    /// Distance between the two rectified optical centers in meters.
    pub baseline: f64,
    /// Width of the rectified images in pixels.
    pub image_width: f64,
    /// Height of the rectified images in pixels.
    pub image_height: f64,
}

impl RectifiedStereoCalibration {
    /// Reads the calibration file at `path` and derives the stereo geometry
    /// from it in one step.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        Self::from_record(&CalibrationRecord::from_file(path)?)
    }

    /// Derives the stereo geometry from an already-parsed record.
    ///
    /// Requires `P_rect_02`/`P_rect_03` (3x4 rectified projections),
    /// `R_rect_02`/`R_rect_03` (3x3 rectifying rotations) and `S_rect_02`
    /// (rectified sensor width and height). The rotations take no part in
    /// the derivation, but a record missing them or holding them with the
    /// wrong shape does not describe a rectified rig and is rejected.
    pub fn from_record(record: &CalibrationRecord) -> Result<Self, Error> {
        let p_left = record.matrix3x4("P_rect_02")?;
        let p_right = record.matrix3x4("P_rect_03")?;
        record.matrix3("R_rect_02")?;
        record.matrix3("R_rect_03")?;
        let sensor = record.require("S_rect_02")?;
        if sensor.len() != 2 {
            return Err(Error::BadShape {
                key: "S_rect_02".to_owned(),
                expected: 2,
                actual: sensor.len(),
            });
        }

        let baseline = (optical_center(&p_right) - optical_center(&p_left)).norm();
        debug!("derived a stereo baseline of {} m", baseline);

        Ok(Self {
            k_left: p_left.fixed_columns::<3>(0).into_owned(),
            k_right: p_right.fixed_columns::<3>(0).into_owned(),
            baseline,
            image_width: sensor[0],
            image_height: sensor[1],
        })
    }

    /// Horizontal focal length of the left rectified camera in pixels.
    pub fn fx(&self) -> f64 {
        self.k_left[(0, 0)]
    }

    /// Focal lengths of the left rectified camera in pixels.
    pub fn focals(&self) -> Vector2<f64> {
        Vector2::new(self.k_left[(0, 0)], self.k_left[(1, 1)])
    }

    /// Principal point of the left rectified camera in pixels.
    pub fn principal_point(&self) -> Point2<f64> {
        Point2::new(self.k_left[(0, 2)], self.k_left[(1, 2)])
    }
}

/// Recovers a camera's optical center in the rectified frame from its 3x4
/// projection matrix. The projection's translation term, normalized by the
/// focal length, is the camera's horizontal offset; inverting that
/// translation and applying it to the homogeneous origin yields the center.
fn optical_center(p: &Matrix3x4<f64>) -> Point3<f64> {
    let offset = Translation3::new(p[(0, 3)] / p[(0, 0)], 0.0, 0.0);
    offset.inverse().transform_point(&Point3::origin())
}
