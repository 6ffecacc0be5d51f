use derive_more::{AsRef, Deref, DerefMut, From, Into};
use image::{DynamicImage, ImageBuffer, Luma};
use log::*;
use ndarray::Array2;

/// A per-pixel horizontal disparity grid in pixel units, indexed
/// `(row, column)`. Non-positive values denote pixels with no reliable
/// match.
#[derive(Debug, Clone, PartialEq, AsRef, Deref, DerefMut, From, Into)]
pub struct DisparityField(pub Array2<f32>);

impl DisparityField {
    /// The `(rows, columns)` extent of the field.
    pub fn dimensions(&self) -> (usize, usize) {
        self.0.dim()
    }

    /// Loads a disparity field stored in the KITTI convention: a 16-bit
    /// grayscale image whose pixel values are disparity multiplied by 256,
    /// with zero marking pixels that have no estimate.
    pub fn from_kitti_png(image: &DynamicImage) -> Self {
        let gray = image.to_luma16();
        info!(
            "loaded a {} x {} disparity image",
            gray.width(),
            gray.height()
        );
        let (width, height) = gray.dimensions();
        let data = Array2::from_shape_fn((height as usize, width as usize), |(y, x)| {
            f32::from(gray[(x as u32, y as u32)][0]) / 256.0
        });
        Self(data)
    }
}

/// A dense depth map in millimeters, indexed `(row, column)`, with the same
/// extent as the disparity field it was reconstructed from. Zero encodes
/// invalid or unknown depth.
#[derive(Debug, Clone, PartialEq, AsRef, Deref, DerefMut, From, Into)]
pub struct DepthMap(pub Array2<u16>);

impl DepthMap {
    /// The `(rows, columns)` extent of the map.
    pub fn dimensions(&self) -> (usize, usize) {
        self.0.dim()
    }

    /// Converts the map into a 16-bit grayscale image buffer for saving.
    pub fn into_image(self) -> ImageBuffer<Luma<u16>, Vec<u16>> {
        let (rows, cols) = self.0.dim();
        ImageBuffer::from_fn(cols as u32, rows as u32, |x, y| {
            Luma([self.0[(y as usize, x as usize)]])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn kitti_png_scaling() {
        let mut buffer = ImageBuffer::<Luma<u16>, Vec<u16>>::new(3, 2);
        buffer[(0, 0)] = Luma([256]);
        buffer[(2, 1)] = Luma([2560]);
        let field = DisparityField::from_kitti_png(&DynamicImage::ImageLuma16(buffer));
        assert_eq!(field.dimensions(), (2, 3));
        assert_eq!(field[(0, 0)], 1.0);
        assert_eq!(field[(1, 2)], 10.0);
        assert_eq!(field[(0, 1)], 0.0);
    }

    #[test]
    fn depth_map_image_layout() {
        let map = DepthMap(arr2(&[[1u16, 2, 3], [4, 5, 6]]));
        let image = map.into_image();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image[(0, 0)][0], 1);
        assert_eq!(image[(2, 1)][0], 6);
    }
}
