use std::ops::Range;

use crate::{ImageError, PixelBuffer, Sample};

/// Copy a contiguous range of channels into a new (H, W, C') buffer.
///
/// # Arguments
///
/// * `src` - The source buffer.
/// * `channels` - The range of channel indices to keep.
///
/// Example:
///
/// ```
/// use chromakit_image::{ops, PixelBuffer, ImageSize};
///
/// let bgra = PixelBuffer::<u8>::new(
///     ImageSize { width: 2, height: 1 },
///     4,
///     vec![1, 2, 3, 255, 4, 5, 6, 128],
/// )
/// .unwrap();
///
/// let alpha = ops::select_channels(&bgra, 3..4).unwrap();
/// assert_eq!(alpha.as_slice(), &[255, 128]);
/// ```
pub fn select_channels<T: Sample>(
    src: &PixelBuffer<T>,
    channels: Range<usize>,
) -> Result<PixelBuffer<T>, ImageError> {
    let num_channels = src.num_channels();
    if channels.start >= channels.end || channels.end > num_channels {
        return Err(ImageError::ChannelIndexOutOfBounds(
            channels.end.saturating_sub(1),
            num_channels,
        ));
    }

    let width = channels.end - channels.start;
    let mut data = Vec::with_capacity(src.size().area() * width);
    for pixel in src.pixels() {
        data.extend_from_slice(&pixel[channels.clone()]);
    }

    PixelBuffer::new(src.size(), width, data)
}

/// Split a buffer into its leading `at` channels and the trailing remainder.
///
/// The remainder is `None` when the buffer has no more than `at` channels, in which case the
/// leading part is an independent copy of the input.
pub fn split_channels_at<T: Sample>(
    src: &PixelBuffer<T>,
    at: usize,
) -> Result<(PixelBuffer<T>, Option<PixelBuffer<T>>), ImageError> {
    let num_channels = src.num_channels();
    if num_channels <= at {
        return Ok((src.clone(), None));
    }

    let head = select_channels(src, 0..at)?;
    let tail = select_channels(src, at..num_channels)?;

    Ok((head, Some(tail)))
}

/// Concatenate two (H, W, C) buffers along the channel axis.
///
/// Both buffers must carry an explicit channel axis and share the same spatial size.
///
/// Example:
///
/// ```
/// use chromakit_image::{ops, PixelBuffer, ImageSize};
///
/// let size = ImageSize { width: 1, height: 1 };
/// let bgr = PixelBuffer::<u8>::new(size, 3, vec![1, 2, 3]).unwrap();
/// let alpha = PixelBuffer::<u8>::new(size, 1, vec![9]).unwrap();
///
/// let bgra = ops::concat_channels(&bgr, &alpha).unwrap();
/// assert_eq!(bgra.as_slice(), &[1, 2, 3, 9]);
/// ```
pub fn concat_channels<T: Sample>(
    a: &PixelBuffer<T>,
    b: &PixelBuffer<T>,
) -> Result<PixelBuffer<T>, ImageError> {
    if !a.has_channel_axis() {
        return Err(ImageError::MissingChannelAxis(a.shape()));
    }
    if !b.has_channel_axis() {
        return Err(ImageError::MissingChannelAxis(b.shape()));
    }
    if a.size() != b.size() {
        return Err(ImageError::InvalidImageSize(
            a.width(),
            a.height(),
            b.width(),
            b.height(),
        ));
    }

    let channels = a.num_channels() + b.num_channels();
    let mut data = Vec::with_capacity(a.size().area() * channels);
    for (pa, pb) in a.pixels().zip(b.pixels()) {
        data.extend_from_slice(pa);
        data.extend_from_slice(pb);
    }

    PixelBuffer::new(a.size(), channels, data)
}

/// Replicate a single channel buffer into a (H, W, `channels`) buffer.
pub fn broadcast_channels<T: Sample>(
    src: &PixelBuffer<T>,
    channels: usize,
) -> Result<PixelBuffer<T>, ImageError> {
    if src.num_channels() != 1 {
        return Err(ImageError::InvalidChannelCount {
            expected: "1".to_string(),
            got: src.num_channels(),
        });
    }

    let data = src
        .as_slice()
        .iter()
        .flat_map(|&v| std::iter::repeat(v).take(channels))
        .collect();

    PixelBuffer::new(src.size(), channels, data)
}
