use std::collections::HashMap;
use std::sync::OnceLock;

use chromakit_image::{ImageError, PixelBuffer, Sample};
use chromakit_imgproc::color;

use crate::space::ColorSpaceId;

/// A direct transform between a color space and the BGR hub.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum ColorTransform {
    BgrFromRgb,
    RgbFromBgr,
    BgrFromHsv,
    HsvFromBgr,
    BgrFromHls,
    HlsFromBgr,
    BgrFromLab,
    LabFromBgr,
    BgrFromYuv,
    YuvFromBgr,
    BgrFromXyz,
    XyzFromBgr,
    BgrFromGray,
    GrayFromBgr,
    BgrFromRgba,
    RgbaFromBgr,
    BgrFromBgra,
    BgraFromBgr,
    BgrFromYCrCb,
    YCrCbFromBgr,
}

type Kernel<T> = fn(&PixelBuffer<T>, &mut PixelBuffer<T>) -> Result<(), ImageError>;

impl ColorTransform {
    /// Number of channels written by the transform. Gray output has no channel axis.
    pub fn output_channels(&self) -> usize {
        match self {
            ColorTransform::GrayFromBgr => 1,
            ColorTransform::RgbaFromBgr | ColorTransform::BgraFromBgr => 4,
            _ => 3,
        }
    }

    fn kernel<T: Sample>(&self) -> Kernel<T> {
        match self {
            // RGB <-> BGR is a channel swap in both directions
            ColorTransform::BgrFromRgb | ColorTransform::RgbFromBgr => color::bgr_from_rgb,
            ColorTransform::BgrFromHsv => color::bgr_from_hsv,
            ColorTransform::HsvFromBgr => color::hsv_from_bgr,
            ColorTransform::BgrFromHls => color::bgr_from_hls,
            ColorTransform::HlsFromBgr => color::hls_from_bgr,
            ColorTransform::BgrFromLab => color::bgr_from_lab,
            ColorTransform::LabFromBgr => color::lab_from_bgr,
            ColorTransform::BgrFromYuv => color::bgr_from_yuv,
            ColorTransform::YuvFromBgr => color::yuv_from_bgr,
            ColorTransform::BgrFromXyz => color::bgr_from_xyz,
            ColorTransform::XyzFromBgr => color::xyz_from_bgr,
            ColorTransform::BgrFromGray => color::bgr_from_gray,
            ColorTransform::GrayFromBgr => color::gray_from_bgr,
            ColorTransform::BgrFromRgba => color::bgr_from_rgba,
            ColorTransform::RgbaFromBgr => color::rgba_from_bgr,
            ColorTransform::BgrFromBgra => color::bgr_from_bgra,
            ColorTransform::BgraFromBgr => color::bgra_from_bgr,
            ColorTransform::BgrFromYCrCb => color::bgr_from_ycrcb,
            ColorTransform::YCrCbFromBgr => color::ycrcb_from_bgr,
        }
    }

    /// Apply the transform to a buffer, allocating the output.
    ///
    /// # Errors
    ///
    /// Returns an error if the input channel count does not fit the transform or the sample
    /// type is not supported by the formula.
    pub fn apply<T: Sample>(&self, src: &PixelBuffer<T>) -> Result<PixelBuffer<T>, ImageError> {
        let size = src.size();
        let mut dst = match self.output_channels() {
            1 => PixelBuffer::new_2d(size, vec![T::default(); size.area()])?,
            n => PixelBuffer::from_size_val(size, n, T::default())?,
        };

        (self.kernel::<T>())(src, &mut dst)?;

        Ok(dst)
    }
}

use ColorSpaceId as S;
use ColorTransform as X;

const ENTRIES: [(ColorSpaceId, ColorSpaceId, ColorTransform); 20] = [
    (S::Rgb, S::Bgr, X::BgrFromRgb),
    (S::Bgr, S::Rgb, X::RgbFromBgr),
    (S::Hsv, S::Bgr, X::BgrFromHsv),
    (S::Bgr, S::Hsv, X::HsvFromBgr),
    (S::Hls, S::Bgr, X::BgrFromHls),
    (S::Bgr, S::Hls, X::HlsFromBgr),
    (S::Lab, S::Bgr, X::BgrFromLab),
    (S::Bgr, S::Lab, X::LabFromBgr),
    (S::Yuv, S::Bgr, X::BgrFromYuv),
    (S::Bgr, S::Yuv, X::YuvFromBgr),
    (S::Xyz, S::Bgr, X::BgrFromXyz),
    (S::Bgr, S::Xyz, X::XyzFromBgr),
    (S::Gray, S::Bgr, X::BgrFromGray),
    (S::Bgr, S::Gray, X::GrayFromBgr),
    (S::Rgba, S::Bgr, X::BgrFromRgba),
    (S::Bgr, S::Rgba, X::RgbaFromBgr),
    (S::Bgra, S::Bgr, X::BgrFromBgra),
    (S::Bgr, S::Bgra, X::BgraFromBgr),
    (S::YCrCb, S::Bgr, X::BgrFromYCrCb),
    (S::Bgr, S::YCrCb, X::YCrCbFromBgr),
];

/// Map from ordered `(src, dst)` pairs to the direct transform between them.
///
/// The table only holds hops to and from the BGR hub. It is built once from a fixed entry
/// list and shared read-only through [`ConversionTable::global`].
///
/// # Example
///
/// ```
/// use chromakit_color::{ColorSpaceId, ColorTransform, ConversionTable};
///
/// let table = ConversionTable::global();
/// assert_eq!(
///     table.get(ColorSpaceId::Lab, ColorSpaceId::Bgr),
///     Some(ColorTransform::BgrFromLab)
/// );
/// assert_eq!(table.get(ColorSpaceId::Lab, ColorSpaceId::Hsv), None);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ConversionTable {
    entries: HashMap<(ColorSpaceId, ColorSpaceId), ColorTransform>,
}

impl ConversionTable {
    /// Get the process-wide table.
    pub fn global() -> &'static ConversionTable {
        static INSTANCE: OnceLock<ConversionTable> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let table = ConversionTable::from_entries(ENTRIES);
            log::debug!("conversion table built with {} entries", table.len());
            table
        })
    }

    /// Build a table from arbitrary entries. Later entries override earlier ones.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (ColorSpaceId, ColorSpaceId, ColorTransform)>,
    ) -> Self {
        let entries = entries
            .into_iter()
            .map(|(src, dst, transform)| ((src, dst), transform))
            .collect();
        Self { entries }
    }

    /// Look up the direct transform from `src` to `dst`.
    pub fn get(&self, src: ColorSpaceId, dst: ColorSpaceId) -> Option<ColorTransform> {
        self.entries.get(&(src, dst)).copied()
    }

    /// Number of direct transforms in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no transform.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ConversionTable {
    fn default() -> Self {
        Self::from_entries(ENTRIES)
    }
}

#[cfg(test)]
mod tests {
    use super::{ColorTransform, ConversionTable};
    use crate::space::ColorSpaceId;
    use chromakit_image::{ImageError, PixelBuffer};

    #[test]
    fn hub_is_complete() {
        let table = ConversionTable::global();
        assert_eq!(table.len(), 20);

        for space in ColorSpaceId::ALL {
            if space == ColorSpaceId::Bgr {
                continue;
            }
            assert!(table.get(space, ColorSpaceId::Bgr).is_some(), "{space}");
            assert!(table.get(ColorSpaceId::Bgr, space).is_some(), "{space}");
        }

        assert_eq!(table.get(ColorSpaceId::Bgr, ColorSpaceId::Bgr), None);
    }

    #[test]
    fn global_is_shared() {
        let a = ConversionTable::global();
        let b = ConversionTable::global();
        assert!(std::ptr::eq(a, b));
        assert_eq!(a, &ConversionTable::default());
    }

    #[test]
    fn apply_allocates_output() -> Result<(), ImageError> {
        let bgr = PixelBuffer::new([2, 1].into(), 3, vec![0u8, 0, 255, 255, 255, 255])?;

        let gray = ColorTransform::GrayFromBgr.apply(&bgr)?;
        assert_eq!(gray.shape(), vec![1, 2]);
        assert_eq!(gray.as_slice(), &[76, 255]);

        let bgra = ColorTransform::BgraFromBgr.apply(&bgr)?;
        assert_eq!(bgra.num_channels(), 4);

        let rgb = ColorTransform::RgbFromBgr.apply(&bgr)?;
        assert_eq!(rgb.as_slice(), &[255, 0, 0, 255, 255, 255]);

        Ok(())
    }
}
