use std::borrow::Cow;

use chromakit_color::{ColorSpaceId, ConversionEngine};
use chromakit_image::{ops, ImageError, ImageSize, PixelBuffer, Sample};
use chromakit_imgproc::interpolation::InterpolationMode;
use chromakit_imgproc::metrics::mse;
use chromakit_imgproc::parallel::{map_ordered, ExecutionStrategy};
use chromakit_imgproc::resize::resize_to;

use crate::error::DetectError;
use crate::hint::{channel_hint, ChannelHint};

/// How a [`Classification`] was reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerdictBasis {
    /// The buffer has a single channel, which is always GRAY.
    SingleChannel,
    /// The buffer has four channels and the caller's provenance label was returned as is.
    ///
    /// No pixel evidence backs this verdict. RGBA and BGRA cannot be told apart by
    /// reconstruction once alpha is dropped.
    Provenance,
    /// The space whose reconstruction is closest to the reference.
    Reconstruction,
}

/// The verdict of a [`SpaceClassifier`].
#[derive(Clone, Debug, PartialEq)]
pub struct Classification {
    /// The detected color space.
    pub space: ColorSpaceId,
    /// The mean squared error of the winning reconstruction, if one was scored.
    pub error: Option<f64>,
    /// How the verdict was reached.
    pub basis: VerdictBasis,
    scores: Vec<(ColorSpaceId, f64)>,
}

impl Classification {
    fn single_channel() -> Self {
        Self {
            space: ColorSpaceId::Gray,
            error: None,
            basis: VerdictBasis::SingleChannel,
            scores: Vec::new(),
        }
    }

    fn provenance(space: ColorSpaceId) -> Self {
        Self {
            space,
            error: None,
            basis: VerdictBasis::Provenance,
            scores: Vec::new(),
        }
    }

    /// Every hypothesis that produced a reconstruction, with its error, in evaluation order.
    ///
    /// Empty unless the verdict was reached by reconstruction.
    pub fn scores(&self) -> &[(ColorSpaceId, f64)] {
        &self.scores
    }
}

/// Options of a [`SpaceClassifier`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClassifierConfig {
    /// How the hypotheses are scheduled. The verdict does not depend on it.
    pub strategy: ExecutionStrategy,
    /// Interpolation used when a reconstruction must be resized to the reference.
    pub interpolation: InterpolationMode,
}

/// Detects the color space of a buffer without metadata.
///
/// A 3-channel candidate is converted to BGR under every 3-channel hypothesis and compared
/// with a trusted BGR rendering of the same image. The hypothesis with the lowest mean squared
/// error wins; ties go to the hypothesis evaluated first.
///
/// # Example
///
/// ```
/// use chromakit_color::ColorSpaceId;
/// use chromakit_detect::SpaceClassifier;
/// use chromakit_image::PixelBuffer;
///
/// let reference = PixelBuffer::<u8>::new([1, 1].into(), 3, vec![10, 20, 200]).unwrap();
/// let candidate = PixelBuffer::<u8>::new([1, 1].into(), 3, vec![200, 20, 10]).unwrap();
///
/// let classifier = SpaceClassifier::default();
/// let verdict = classifier.classify(&candidate, &reference, None).unwrap();
/// assert_eq!(verdict.space, ColorSpaceId::Rgb);
/// assert_eq!(verdict.error, Some(0.0));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct SpaceClassifier<'a> {
    engine: ConversionEngine<'a>,
    config: ClassifierConfig,
}

impl Default for SpaceClassifier<'static> {
    fn default() -> Self {
        Self::new(ConversionEngine::default(), ClassifierConfig::default())
    }
}

impl SpaceClassifier<'static> {
    /// Create a classifier on the process-wide conversion table.
    pub fn with_config(config: ClassifierConfig) -> Self {
        Self::new(ConversionEngine::default(), config)
    }
}

impl<'a> SpaceClassifier<'a> {
    /// Create a classifier reconstructing with the given engine.
    pub fn new(engine: ConversionEngine<'a>, config: ClassifierConfig) -> Self {
        Self { engine, config }
    }

    /// The classifier options.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify a candidate buffer.
    ///
    /// # Arguments
    ///
    /// * `candidate` - The buffer of unknown color space.
    /// * `reference` - A BGR rendering of the same image. Gray references are replicated to
    ///   three channels and alpha is dropped.
    /// * `provenance` - The space the candidate is labelled with, if known. Only used for
    ///   4-channel candidates.
    ///
    /// # Errors
    ///
    /// * [`DetectError::MissingProvenance`] for a 4-channel candidate without a label.
    /// * [`DetectError::NoValidHypothesis`] if no hypothesis could be scored, or the channel
    ///   count is not 1, 3 or 4.
    pub fn classify<T: Sample, R: Sample>(
        &self,
        candidate: &PixelBuffer<T>,
        reference: &PixelBuffer<R>,
        provenance: Option<ColorSpaceId>,
    ) -> Result<Classification, DetectError> {
        match shortcut(candidate, provenance) {
            Some(verdict) => verdict,
            None => self.reconstruct_and_score(candidate, reference),
        }
    }

    pub(crate) fn reconstruct_and_score<T: Sample, R: Sample>(
        &self,
        candidate: &PixelBuffer<T>,
        reference: &PixelBuffer<R>,
    ) -> Result<Classification, DetectError> {
        let normalized = normalize_reference(reference)?;
        let reference: &PixelBuffer<R> = &normalized;
        let size = reference.size();

        let results = map_ordered(
            self.config.strategy,
            ChannelHint::NeedsReconstruction.candidates(),
            |&space| {
                let score = self
                    .reconstruct(candidate, space, size)
                    .and_then(|bgr| Ok(mse(&bgr, reference)?));
                (space, score)
            },
        )?;

        let scores: Vec<(ColorSpaceId, f64)> = results
            .into_iter()
            .filter_map(|(space, score)| match score {
                Ok(error) => Some((space, error)),
                Err(e) => {
                    log::debug!("skipping {space} hypothesis: {e}");
                    None
                }
            })
            .collect();

        let (space, error) = scores
            .iter()
            .fold(None, |best: Option<(ColorSpaceId, f64)>, &(space, error)| {
                match best {
                    _ if error.is_nan() => best,
                    Some((_, lowest)) if lowest <= error => best,
                    _ => Some((space, error)),
                }
            })
            .ok_or(DetectError::NoValidHypothesis)?;

        log::debug!("classified as {space} with mse {error:.4}");

        Ok(Classification {
            space,
            error: Some(error),
            basis: VerdictBasis::Reconstruction,
            scores,
        })
    }

    /// Convert the candidate to BGR assuming it is encoded in `space`, then shape it like the
    /// reference.
    fn reconstruct<T: Sample>(
        &self,
        candidate: &PixelBuffer<T>,
        space: ColorSpaceId,
        size: ImageSize,
    ) -> Result<PixelBuffer<T>, DetectError> {
        let mut bgr = self.engine.convert(candidate, space, ColorSpaceId::Bgr)?;

        match bgr.num_channels() {
            1 => bgr = ops::broadcast_channels(&bgr, 3)?,
            n if n > 3 => bgr = ops::select_channels(&bgr, 0..3)?,
            _ => {}
        }

        if bgr.size() != size {
            log::trace!("resizing {space} reconstruction from {} to {size}", bgr.size());
            bgr = resize_to(&bgr, size, self.config.interpolation)?;
        }

        Ok(bgr)
    }
}

/// The verdict for candidates whose channel count alone decides, if any.
pub(crate) fn shortcut<T: Sample>(
    candidate: &PixelBuffer<T>,
    provenance: Option<ColorSpaceId>,
) -> Option<Result<Classification, DetectError>> {
    match channel_hint(candidate) {
        ChannelHint::Gray => Some(Ok(Classification::single_channel())),
        ChannelHint::AlphaBearing => Some(
            provenance
                .map(Classification::provenance)
                .ok_or(DetectError::MissingProvenance),
        ),
        ChannelHint::NeedsReconstruction => None,
        ChannelHint::Unknown(n) => {
            log::debug!("no hypothesis accepts {n} channels");
            Some(Err(DetectError::NoValidHypothesis))
        }
    }
}

/// Bring the reference to three channels.
fn normalize_reference<R: Sample>(
    reference: &PixelBuffer<R>,
) -> Result<Cow<'_, PixelBuffer<R>>, ImageError> {
    let normalized = match reference.num_channels() {
        3 => return Ok(Cow::Borrowed(reference)),
        1 => ops::broadcast_channels(reference, 3)?,
        // luma + alpha
        2 => ops::broadcast_channels(&ops::select_channels(reference, 0..1)?, 3)?,
        _ => ops::select_channels(reference, 0..3)?,
    };

    Ok(Cow::Owned(normalized))
}

#[cfg(test)]
mod tests {
    use super::{ClassifierConfig, SpaceClassifier, VerdictBasis};
    use crate::error::DetectError;
    use chromakit_color::{convert, ColorSpaceId, ConversionEngine, ConversionTable};
    use chromakit_image::{ImageSize, PixelBuffer};
    use chromakit_imgproc::parallel::ExecutionStrategy;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// A 16x16 BGR gradient with distinct red and blue channels and no saturated chroma.
    fn gradient_bgr() -> Result<PixelBuffer<u8>, DetectError> {
        let size = ImageSize {
            width: 16,
            height: 16,
        };
        let mut data = Vec::with_capacity(size.area() * 3);
        for y in 0..16u8 {
            for x in 0..16u8 {
                data.extend_from_slice(&[40 + 8 * x, 50 + 9 * y, 210 - 6 * x - 3 * y]);
            }
        }

        Ok(PixelBuffer::new(size, 3, data)?)
    }

    #[test]
    fn all_zero_ties_resolve_to_first_hypothesis() -> Result<(), DetectError> {
        init_logger();
        let candidate = PixelBuffer::from_size_val([2, 2].into(), 3, 0u8)?;
        let reference = candidate.clone();

        let verdict = SpaceClassifier::default().classify(&candidate, &reference, None)?;

        assert_eq!(verdict.space, ColorSpaceId::Rgb);
        assert_eq!(verdict.basis, VerdictBasis::Reconstruction);
        assert_eq!(verdict.error, Some(0.0));
        assert_eq!(verdict.scores()[0].0, ColorSpaceId::Rgb);
        assert_eq!(verdict.scores()[1], (ColorSpaceId::Bgr, 0.0));
        assert_eq!(verdict.scores()[2], (ColorSpaceId::Hsv, 0.0));

        Ok(())
    }

    #[test]
    fn self_consistency() -> Result<(), DetectError> {
        init_logger();
        let reference = gradient_bgr()?;
        let classifier = SpaceClassifier::default();

        for space in [
            ColorSpaceId::Rgb,
            ColorSpaceId::Bgr,
            ColorSpaceId::Hsv,
            ColorSpaceId::Hls,
            ColorSpaceId::Lab,
            ColorSpaceId::Yuv,
            ColorSpaceId::Xyz,
        ] {
            let candidate = convert(&reference, ColorSpaceId::Bgr, space)?;
            let verdict = classifier.classify(&candidate, &reference, None)?;
            assert_eq!(verdict.space, space);
            assert_eq!(verdict.scores().len(), 7);
        }

        Ok(())
    }

    #[test]
    fn single_channel_is_gray() -> Result<(), DetectError> {
        let reference = gradient_bgr()?;
        let classifier = SpaceClassifier::default();

        for fill in [0u8, 255] {
            let flat = PixelBuffer::new_2d([16, 16].into(), vec![fill; 256])?;
            let verdict = classifier.classify(&flat, &reference, None)?;
            assert_eq!(verdict.space, ColorSpaceId::Gray);
            assert_eq!(verdict.basis, VerdictBasis::SingleChannel);
            assert_eq!(verdict.error, None);
            assert!(verdict.scores().is_empty());
        }

        let singleton = PixelBuffer::from_size_val([3, 3].into(), 1, 0.25f32)?;
        let verdict = classifier.classify(&singleton, &reference, None)?;
        assert_eq!(verdict.space, ColorSpaceId::Gray);

        Ok(())
    }

    #[test]
    fn four_channels_use_provenance() -> Result<(), DetectError> {
        let reference = gradient_bgr()?;
        let candidate = PixelBuffer::from_size_val([16, 16].into(), 4, 7u8)?;
        let classifier = SpaceClassifier::default();

        let verdict = classifier.classify(&candidate, &reference, Some(ColorSpaceId::Bgra))?;
        assert_eq!(verdict.space, ColorSpaceId::Bgra);
        assert_eq!(verdict.basis, VerdictBasis::Provenance);

        let res = classifier.classify(&candidate, &reference, None);
        assert!(matches!(res, Err(DetectError::MissingProvenance)));

        Ok(())
    }

    #[test]
    fn unknown_channel_count() -> Result<(), DetectError> {
        let reference = gradient_bgr()?;
        let candidate = PixelBuffer::from_size_val([16, 16].into(), 2, 7u8)?;

        let res = SpaceClassifier::default().classify(&candidate, &reference, None);
        assert!(matches!(res, Err(DetectError::NoValidHypothesis)));

        Ok(())
    }

    #[test]
    fn failed_hypotheses_are_skipped() -> Result<(), DetectError> {
        init_logger();
        let reference = PixelBuffer::from_size_val([4, 4].into(), 3, 1000u16)?;
        let candidate = PixelBuffer::from_size_val([4, 4].into(), 3, 1000u16)?;

        // HSV, HLS and LAB have no 16-bit formula
        let verdict = SpaceClassifier::default().classify(&candidate, &reference, None)?;
        let spaces: Vec<_> = verdict.scores().iter().map(|(space, _)| *space).collect();
        assert_eq!(
            spaces,
            vec![
                ColorSpaceId::Rgb,
                ColorSpaceId::Bgr,
                ColorSpaceId::Yuv,
                ColorSpaceId::Xyz
            ]
        );
        assert_eq!(verdict.space, ColorSpaceId::Rgb);

        Ok(())
    }

    #[test]
    fn missing_hops_are_skipped() -> Result<(), DetectError> {
        let empty = ConversionTable::from_entries(std::iter::empty());
        let classifier = SpaceClassifier::new(ConversionEngine::new(&empty), Default::default());

        let reference = gradient_bgr()?;
        let candidate = convert(&reference, ColorSpaceId::Bgr, ColorSpaceId::Hsv)?;

        // BGR is a plain copy and survives without a table
        let verdict = classifier.classify(&candidate, &reference, None)?;
        assert_eq!(verdict.space, ColorSpaceId::Bgr);
        assert_eq!(verdict.scores().len(), 1);

        Ok(())
    }

    #[test]
    fn reconstruction_is_resized_to_reference() -> Result<(), DetectError> {
        let reference = PixelBuffer::from_size_val([8, 6].into(), 3, 100u8)?;
        let candidate = PixelBuffer::from_size_val([4, 3].into(), 3, 100u8)?;

        let verdict = SpaceClassifier::default().classify(&candidate, &reference, None)?;
        assert_eq!(verdict.space, ColorSpaceId::Rgb);
        assert_eq!(verdict.error, Some(0.0));

        Ok(())
    }

    #[test]
    fn gray_and_alpha_references() -> Result<(), DetectError> {
        let bgr = gradient_bgr()?;
        let candidate = convert(&bgr, ColorSpaceId::Bgr, ColorSpaceId::Lab)?;
        let classifier = SpaceClassifier::default();

        let bgra = convert(&bgr, ColorSpaceId::Bgr, ColorSpaceId::Bgra)?;
        let verdict = classifier.classify(&candidate, &bgra, None)?;
        assert_eq!(verdict.space, ColorSpaceId::Lab);

        let gray = convert(&bgr, ColorSpaceId::Bgr, ColorSpaceId::Gray)?;
        let verdict = classifier.classify(&candidate, &gray, None)?;
        assert_eq!(verdict.scores().len(), 7);

        Ok(())
    }

    #[test]
    fn strategies_agree() -> Result<(), DetectError> {
        let reference = gradient_bgr()?;
        let candidate = convert(&reference, ColorSpaceId::Bgr, ColorSpaceId::Yuv)?;

        let serial = SpaceClassifier::with_config(ClassifierConfig {
            strategy: ExecutionStrategy::Serial,
            ..Default::default()
        })
        .classify(&candidate, &reference, None)?;

        for strategy in [ExecutionStrategy::Parallel, ExecutionStrategy::Fixed(3)] {
            let config = ClassifierConfig {
                strategy,
                ..Default::default()
            };
            let verdict =
                SpaceClassifier::with_config(config).classify(&candidate, &reference, None)?;
            assert_eq!(verdict, serial);
        }

        let res = SpaceClassifier::with_config(ClassifierConfig {
            strategy: ExecutionStrategy::Fixed(0),
            ..Default::default()
        })
        .classify(&candidate, &reference, None);
        assert!(matches!(res, Err(DetectError::Parallel(_))));

        Ok(())
    }
}
