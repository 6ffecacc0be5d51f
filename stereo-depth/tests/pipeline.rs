//! End-to-end: parse a calibration record, derive the rig geometry, and
//! reconstruct depth from a synthetic disparity field.

use stereo_calib::{CalibrationRecord, RectifiedStereoCalibration};
use stereo_depth::ndarray::Array2;
use stereo_depth::{DepthReconstructor, DisparityField};

const CALIB: &str = "\
calib_time: 09-Jan-2012 13:57:47\n\
S_rect_02: 1.242000e+03 3.750000e+02\n\
R_rect_02: 9.998817e-01 1.511453e-02 -2.841595e-03 -1.511724e-02 9.998853e-01 -9.338510e-04 2.827154e-03 9.766976e-04 9.999955e-01\n\
P_rect_02: 7.215377e+02 0.000000e+00 6.095593e+02 4.485728e+01 0.000000e+00 7.215377e+02 1.728540e+02 2.163791e-01 0.000000e+00 0.000000e+00 1.000000e+00 2.745884e-03\n\
R_rect_03: 9.998321e-01 -7.193136e-03 1.685599e-02 7.232804e-03 9.999712e-01 -2.293585e-03 -1.683901e-02 2.415116e-03 9.998553e-01\n\
P_rect_03: 7.215377e+02 0.000000e+00 6.095593e+02 -3.395242e+02 0.000000e+00 7.215377e+02 1.728540e+02 2.199936e+00 0.000000e+00 0.000000e+00 1.000000e+00 2.729905e-03\n";

#[test]
fn calibration_to_depth() {
    let record = CalibrationRecord::from_reader(CALIB.as_bytes()).unwrap();
    let calibration = RectifiedStereoCalibration::from_record(&record).unwrap();

    // A gradient of disparities at the model's working resolution.
    let disparity = DisparityField(Array2::from_shape_fn((257, 513), |(y, x)| {
        (x as f32) / 512.0 * 50.0 + (y as f32) * 0.001
    }));
    let depth = DepthReconstructor::new()
        .compute(&disparity, &calibration)
        .unwrap();
    assert_eq!(depth.dimensions(), disparity.dimensions());

    let scale = 1000.0 * calibration.baseline * calibration.fx() / calibration.image_width;
    let disp_limit = scale / 65535.0;
    for ((y, x), &d) in disparity.indexed_iter() {
        let expected = if f64::from(d) < disp_limit {
            0
        } else {
            (scale / f64::from(d)) as u16
        };
        assert_eq!(depth[(y, x)], expected);
    }

    // Column zero of row zero has zero disparity and must be invalid.
    assert_eq!(depth[(0, 0)], 0);
    // Large disparities give near depths, monotonically decreasing across a row.
    assert!(depth[(100, 512)] < depth[(100, 100)]);
}
