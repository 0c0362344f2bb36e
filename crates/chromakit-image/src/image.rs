use crate::error::ImageError;
use crate::sample::Sample;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use chromakit_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// The number of pixels covered by the size.
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

impl From<ImageSize> for [u32; 2] {
    fn from(size: ImageSize) -> Self {
        [size.width as u32, size.height as u32]
    }
}

/// Represents a decoded raster with interleaved pixel samples.
///
/// The buffer has shape (H, W) when it carries a single channel without a channel axis,
/// or (H, W, C) otherwise. Samples are stored row-major, channels interleaved.
///
/// Cloning a buffer always produces an independent allocation.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer<T> {
    data: Vec<T>,
    size: ImageSize,
    channels: usize,
    channel_axis: bool,
}

impl<T: Sample> PixelBuffer<T> {
    /// Create a new (H, W, C) buffer from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `channels` - The number of interleaved channels.
    /// * `data` - The pixel data of the image.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use chromakit_image::{PixelBuffer, ImageSize};
    ///
    /// let image = PixelBuffer::<u8>::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     3,
    ///     vec![0u8; 10 * 20 * 3],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// assert_eq!(image.shape(), vec![20, 10, 3]);
    /// ```
    pub fn new(size: ImageSize, channels: usize, data: Vec<T>) -> Result<Self, ImageError> {
        if channels == 0 {
            return Err(ImageError::ZeroChannels);
        }

        // check if the data length matches the image size
        if data.len() != size.area() * channels {
            return Err(ImageError::InvalidChannelShape(
                data.len(),
                size.area() * channels,
            ));
        }

        Ok(Self {
            data,
            size,
            channels,
            channel_axis: true,
        })
    }

    /// Create a new single channel (H, W) buffer without a channel axis.
    ///
    /// # Examples
    ///
    /// ```
    /// use chromakit_image::{PixelBuffer, ImageSize};
    ///
    /// let gray = PixelBuffer::<u8>::new_2d([2, 3].into(), vec![0u8; 6]).unwrap();
    ///
    /// assert_eq!(gray.ndim(), 2);
    /// assert_eq!(gray.num_channels(), 1);
    /// assert_eq!(gray.shape(), vec![3, 2]);
    /// ```
    pub fn new_2d(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        let mut buffer = Self::new(size, 1, data)?;
        buffer.channel_axis = false;
        Ok(buffer)
    }

    /// Build a buffer from a (H, W) or (H, W, C) shape and its samples.
    ///
    /// # Examples
    ///
    /// ```
    /// use chromakit_image::PixelBuffer;
    ///
    /// let image = PixelBuffer::<u8>::from_shape_vec(&[2, 1, 3], vec![0u8; 6]).unwrap();
    /// assert_eq!(image.height(), 2);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn from_shape_vec(shape: &[usize], data: Vec<T>) -> Result<Self, ImageError> {
        match *shape {
            [height, width] => Self::new_2d(ImageSize { width, height }, data),
            [height, width, channels] => Self::new(ImageSize { width, height }, channels, data),
            _ => Err(ImageError::InvalidShape(shape.to_vec())),
        }
    }

    /// Create a new (H, W, C) buffer filled with the given value.
    pub fn from_size_val(size: ImageSize, channels: usize, val: T) -> Result<Self, ImageError> {
        Self::new(size, channels, vec![val; size.area() * channels])
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Get the number of channels in the image. A 2-D buffer has one channel.
    pub fn num_channels(&self) -> usize {
        self.channels
    }

    /// Whether the buffer carries an explicit channel axis.
    pub fn has_channel_axis(&self) -> bool {
        self.channel_axis
    }

    /// Number of dimensions of the buffer, either 2 or 3.
    pub fn ndim(&self) -> usize {
        if self.channel_axis {
            3
        } else {
            2
        }
    }

    /// The shape of the buffer as (H, W) or (H, W, C).
    pub fn shape(&self) -> Vec<usize> {
        if self.channel_axis {
            vec![self.size.height, self.size.width, self.channels]
        } else {
            vec![self.size.height, self.size.width]
        }
    }

    /// Total number of samples in the buffer.
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// Get the samples as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the samples as a mutable slice.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the buffer and return the samples.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Get a sample at the given `[y, x, ch]` index.
    pub fn get(&self, index: [usize; 3]) -> Option<&T> {
        let [y, x, ch] = index;
        if y >= self.height() || x >= self.width() || ch >= self.channels {
            return None;
        }
        self.data.get((y * self.width() + x) * self.channels + ch)
    }

    /// Iterate over the pixels of the buffer, one slice of `num_channels` samples per pixel.
    pub fn pixels(&self) -> std::slice::ChunksExact<'_, T> {
        self.data.chunks_exact(self.channels)
    }

    /// Return the buffer with an explicit channel axis, turning (H, W) into (H, W, 1).
    pub fn with_channel_axis(mut self) -> Self {
        self.channel_axis = true;
        self
    }

    /// Drop a singleton channel axis, turning (H, W, 1) into (H, W).
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer has more than one channel.
    pub fn without_channel_axis(mut self) -> Result<Self, ImageError> {
        if self.channels != 1 {
            return Err(ImageError::InvalidChannelCount {
                expected: "1".to_string(),
                got: self.channels,
            });
        }
        self.channel_axis = false;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::image::{ImageError, ImageSize, PixelBuffer};

    #[test]
    fn image_size() {
        let image_size = ImageSize {
            width: 10,
            height: 20,
        };
        assert_eq!(image_size.width, 10);
        assert_eq!(image_size.height, 20);
        assert_eq!(image_size.area(), 200);
    }

    #[test]
    fn image_smoke() -> Result<(), ImageError> {
        let image = PixelBuffer::<u8>::new(
            ImageSize {
                width: 10,
                height: 20,
            },
            3,
            vec![0u8; 10 * 20 * 3],
        )?;
        assert_eq!(image.size().width, 10);
        assert_eq!(image.size().height, 20);
        assert_eq!(image.num_channels(), 3);
        assert_eq!(image.ndim(), 3);

        Ok(())
    }

    #[test]
    fn image_invalid_length() {
        let image = PixelBuffer::<u8>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            3,
            vec![0u8; 11],
        );
        assert_eq!(image, Err(ImageError::InvalidChannelShape(11, 12)));

        let image = PixelBuffer::<u8>::new([1, 1].into(), 0, vec![]);
        assert_eq!(image, Err(ImageError::ZeroChannels));
    }

    #[test]
    fn image_get() -> Result<(), ImageError> {
        let image = PixelBuffer::new(
            ImageSize {
                height: 2,
                width: 1,
            },
            3,
            vec![0u8, 1, 2, 3, 4, 5],
        )?;
        assert_eq!(image.get([1, 0, 2]), Some(&5u8));
        assert_eq!(image.get([2, 0, 0]), None);
        assert_eq!(image.get([0, 0, 3]), None);

        Ok(())
    }

    #[test]
    fn image_channel_axis() -> Result<(), ImageError> {
        let gray = PixelBuffer::new_2d([3, 2].into(), vec![1.0f32; 6])?;
        assert_eq!(gray.shape(), vec![2, 3]);
        assert!(!gray.has_channel_axis());

        let gray = gray.with_channel_axis();
        assert_eq!(gray.shape(), vec![2, 3, 1]);

        let gray = gray.without_channel_axis()?;
        assert_eq!(gray.ndim(), 2);

        let rgb = PixelBuffer::from_size_val([3, 2].into(), 3, 0u8)?;
        assert!(rgb.without_channel_axis().is_err());

        Ok(())
    }

    #[test]
    fn image_clone_is_independent() -> Result<(), ImageError> {
        let image = PixelBuffer::from_size_val([2, 2].into(), 3, 7u8)?;
        let mut copy = image.clone();
        copy.as_slice_mut()[0] = 0;

        assert_eq!(image.as_slice()[0], 7);
        assert_ne!(image.as_slice().as_ptr(), copy.as_slice().as_ptr());

        Ok(())
    }
}
