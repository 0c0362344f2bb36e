use std::path::{Path, PathBuf};

use chromakit_color::ColorSpaceId;
use chromakit_image::{PixelBuffer, Sample};
use chromakit_io::functional::read_image_unchanged;
use chromakit_io::raw::read_raw_array;
use chromakit_io::RawArray;

use crate::classifier::{shortcut, Classification, SpaceClassifier};
use crate::error::DetectError;

/// Finds the trusted reference rendering of a candidate file.
///
/// A candidate `<dir>/<LABEL>/<stem>.<any>` has its reference at
/// `<root>/<LABEL>/<stem>.<extension>`, or next to the candidate at
/// `<dir>/<LABEL>/<stem>.<extension>`. The label directory `YCRCB` is spelled `YCrCb` on the
/// reference side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceLocator {
    /// Directory holding one sub-directory of references per color space.
    pub root: PathBuf,
    /// Extension of the reference files, without the dot.
    pub extension: String,
}

impl Default for ReferenceLocator {
    fn default() -> Self {
        Self {
            root: PathBuf::from("converted_images"),
            extension: "jpg".to_string(),
        }
    }
}

impl ReferenceLocator {
    /// Create a locator for references stored under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Use another reference file extension.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// The name of the directory holding the candidate, as used on the reference side.
    pub fn label_dir(candidate: &Path) -> Option<String> {
        let name = candidate.parent()?.file_name()?.to_str()?;
        if name == "YCRCB" {
            Some(ColorSpaceId::YCrCb.as_str().to_string())
        } else {
            Some(name.to_string())
        }
    }

    /// The color space named by the directory holding the candidate, if any.
    pub fn provenance(candidate: &Path) -> Option<ColorSpaceId> {
        Self::label_dir(candidate)?.parse().ok()
    }

    /// The primary and fallback reference paths of a candidate.
    pub fn candidates(&self, candidate: &Path) -> (PathBuf, PathBuf) {
        let file_name = Path::new(candidate.file_stem().unwrap_or_default())
            .with_extension(&self.extension);

        let primary = match Self::label_dir(candidate) {
            Some(label) => self.root.join(label).join(&file_name),
            None => self.root.join(&file_name),
        };
        let fallback = candidate.with_file_name(&file_name);

        (primary, fallback)
    }

    /// Resolve the reference of a candidate.
    ///
    /// # Errors
    ///
    /// [`DetectError::ReferenceNotFound`] if neither location holds a file.
    pub fn locate(&self, candidate: &Path) -> Result<PathBuf, DetectError> {
        let (primary, fallback) = self.candidates(candidate);

        if primary.is_file() {
            Ok(primary)
        } else if fallback.is_file() {
            log::debug!("using fallback reference {}", fallback.display());
            Ok(fallback)
        } else {
            Err(DetectError::ReferenceNotFound { primary, fallback })
        }
    }
}

impl SpaceClassifier<'_> {
    /// Classify a raw array file, finding its reference with `locator`.
    ///
    /// The parent directory name of the candidate is used as provenance. Gray and 4-channel
    /// candidates are decided without reading a reference.
    ///
    /// # Errors
    ///
    /// Besides the errors of [`SpaceClassifier::classify`], fails if the candidate cannot be
    /// read or its reference cannot be found or decoded.
    pub fn classify_path(
        &self,
        candidate: impl AsRef<Path>,
        locator: &ReferenceLocator,
    ) -> Result<Classification, DetectError> {
        let candidate = candidate.as_ref();
        let provenance = ReferenceLocator::provenance(candidate);

        match read_raw_array(candidate)? {
            RawArray::U8(buffer) => self.classify_file(&buffer, candidate, locator, provenance),
            RawArray::U16(buffer) => self.classify_file(&buffer, candidate, locator, provenance),
            RawArray::F32(buffer) => self.classify_file(&buffer, candidate, locator, provenance),
        }
    }

    fn classify_file<T: Sample>(
        &self,
        buffer: &PixelBuffer<T>,
        path: &Path,
        locator: &ReferenceLocator,
        provenance: Option<ColorSpaceId>,
    ) -> Result<Classification, DetectError> {
        if let Some(verdict) = shortcut(buffer, provenance) {
            return verdict;
        }

        let reference = read_image_unchanged(locator.locate(path)?)?;
        self.reconstruct_and_score(buffer, &reference)
    }
}
