use std::borrow::Cow;

use chromakit_image::{ops, PixelBuffer, Sample};

use crate::error::ConversionError;
use crate::space::ColorSpaceId;
use crate::table::{ColorTransform, ConversionTable};

/// Converts pixel buffers between color spaces by routing through the BGR hub.
///
/// Every conversion `src -> dst` is performed as `src -> BGR -> dst`, so the table only needs
/// one transform to and one from BGR per color space. Channels beyond the third are treated
/// as alpha: they are split off before the color math and appended back unchanged.
///
/// # Example
///
/// ```
/// use chromakit_color::{ColorSpaceId, ConversionEngine};
/// use chromakit_image::PixelBuffer;
///
/// let rgb = PixelBuffer::<u8>::new([1, 1].into(), 3, vec![255, 0, 0]).unwrap();
///
/// let engine = ConversionEngine::default();
/// let gray = engine.convert(&rgb, ColorSpaceId::Rgb, ColorSpaceId::Gray).unwrap();
///
/// assert_eq!(gray.shape(), vec![1, 1]);
/// assert_eq!(gray.as_slice(), &[76]);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ConversionEngine<'a> {
    table: &'a ConversionTable,
}

impl Default for ConversionEngine<'static> {
    fn default() -> Self {
        Self::new(ConversionTable::global())
    }
}

impl<'a> ConversionEngine<'a> {
    /// Create an engine backed by the given table.
    pub fn new(table: &'a ConversionTable) -> Self {
        Self { table }
    }

    /// The table used to route conversions.
    pub fn table(&self) -> &'a ConversionTable {
        self.table
    }

    /// Convert a buffer from `src` to `dst`.
    ///
    /// # Arguments
    ///
    /// * `image` - The input buffer, never modified.
    /// * `src` - The color space the buffer is encoded in.
    /// * `dst` - The requested color space.
    ///
    /// # Returns
    ///
    /// A newly allocated buffer. When `src == dst` this is an independent copy of the input.
    ///
    /// # Errors
    ///
    /// * [`ConversionError::NoConversionPath`] if a hop is missing from the table.
    /// * [`ConversionError::Image`] if the buffer does not fit a transform, e.g. a 3 channel
    ///   buffer declared as GRAY.
    pub fn convert<T: Sample>(
        &self,
        image: &PixelBuffer<T>,
        src: ColorSpaceId,
        dst: ColorSpaceId,
    ) -> Result<PixelBuffer<T>, ConversionError> {
        if src == dst {
            return Ok(image.clone());
        }

        let (color, alpha) = if image.num_channels() > 3 {
            let (color, alpha) = ops::split_channels_at(image, 3)?;
            (Cow::Owned(color), alpha)
        } else {
            (Cow::Borrowed(image), None)
        };

        let bgr = if src == ColorSpaceId::Bgr {
            color
        } else {
            let transform = self.lookup(src, ColorSpaceId::Bgr, src, dst)?;
            log::trace!("{src} -> BGR via {transform:?}");
            Cow::Owned(transform.apply(&color)?)
        };

        // a carried alpha replaces the opaque one the alpha-bearing transforms synthesize
        let target = match alpha {
            Some(_) => dst.color_base(),
            None => dst,
        };

        let converted = if target == ColorSpaceId::Bgr {
            bgr.into_owned()
        } else {
            let transform = self.lookup(ColorSpaceId::Bgr, target, src, dst)?;
            log::trace!("BGR -> {target} via {transform:?}");
            transform.apply(&bgr)?
        };

        let Some(alpha) = alpha else {
            return Ok(converted);
        };

        log::trace!("reattaching {} alpha channel(s)", alpha.num_channels());
        let converted = if converted.has_channel_axis() {
            converted
        } else {
            converted.with_channel_axis()
        };

        Ok(ops::concat_channels(&converted, &alpha)?)
    }

    /// Convert a buffer between two color spaces given by name, case-insensitively.
    ///
    /// Only the names of [`ColorSpaceId::SUPPORTED`] are accepted. `YCrCb` is reachable through
    /// [`ConversionEngine::convert`] only.
    ///
    /// # Errors
    ///
    /// [`ConversionError::UnsupportedSpace`] naming the first rejected identifier, plus the
    /// errors of [`ConversionEngine::convert`].
    pub fn convert_named<T: Sample>(
        &self,
        image: &PixelBuffer<T>,
        src: &str,
        dst: &str,
    ) -> Result<PixelBuffer<T>, ConversionError> {
        let src = ColorSpaceId::parse_supported(src)?;
        let dst = ColorSpaceId::parse_supported(dst)?;
        self.convert(image, src, dst)
    }

    fn lookup(
        &self,
        from: ColorSpaceId,
        to: ColorSpaceId,
        src: ColorSpaceId,
        dst: ColorSpaceId,
    ) -> Result<ColorTransform, ConversionError> {
        self.table
            .get(from, to)
            .ok_or(ConversionError::NoConversionPath { src, dst })
    }
}

/// Convert a buffer with the process-wide conversion table.
///
/// See [`ConversionEngine::convert`].
pub fn convert<T: Sample>(
    image: &PixelBuffer<T>,
    src: ColorSpaceId,
    dst: ColorSpaceId,
) -> Result<PixelBuffer<T>, ConversionError> {
    ConversionEngine::default().convert(image, src, dst)
}

/// Convert a buffer between two named color spaces with the process-wide conversion table.
///
/// See [`ConversionEngine::convert_named`].
pub fn convert_named<T: Sample>(
    image: &PixelBuffer<T>,
    src: &str,
    dst: &str,
) -> Result<PixelBuffer<T>, ConversionError> {
    ConversionEngine::default().convert_named(image, src, dst)
}
