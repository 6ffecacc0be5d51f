use log::*;
use std::path::PathBuf;
use structopt::StructOpt;

use stereo_calib::RectifiedStereoCalibration;
use stereo_depth::{DepthReconstructor, DisparityField};

#[derive(StructOpt, Clone)]
#[structopt(
    name = "depth-sandbox",
    about = "A tool for reconstructing metric depth maps from stereo disparity"
)]
struct Opt {
    /// KITTI-style calibration file describing the rectified rig.
    #[structopt(short, long)]
    calibration: PathBuf,
    /// Precomputed disparity map as a 16-bit PNG scaled by 256.
    ///
    /// This stands in for a live disparity estimator; any tool that writes
    /// disparity in the KITTI convention can feed this.
    #[structopt(short, long)]
    disparity: PathBuf,
    /// The largest depth in millimeters; more distant pixels become zero.
    #[structopt(long, default_value = "65535")]
    depth_limit: u16,
    /// Require the disparity image to match the calibrated image size.
    #[structopt(long)]
    strict_size: bool,
    /// Output 16-bit PNG depth map in millimeters.
    #[structopt(short, long, default_value = "depth.png")]
    output: PathBuf,
}

fn main() {
    pretty_env_logger::init_timed();
    let opt = Opt::from_args();

    let calibration = RectifiedStereoCalibration::from_file(&opt.calibration)
        .expect("unable to load calibration");
    info!("K_left {}", calibration.k_left);
    info!("K_right {}", calibration.k_right);
    info!("baseline {} m", calibration.baseline);
    info!(
        "rectified image size {} x {}",
        calibration.image_width, calibration.image_height
    );

    let disparity_image = image::open(&opt.disparity).expect("unable to open disparity image");
    let disparity = DisparityField::from_kitti_png(&disparity_image);

    let depth = DepthReconstructor::new()
        .depth_limit_mm(opt.depth_limit)
        .require_full_resolution(opt.strict_size)
        .compute(&disparity, &calibration)
        .expect("depth reconstruction failed");

    depth
        .into_image()
        .save(&opt.output)
        .expect("unable to save depth map");
    info!("wrote depth map to {}", opt.output.display());
}
