use std::path::Path;

use chromakit_image::{ImageSize, PixelBuffer};

use crate::error::IoError;

/// Reads an image from the given file path, keeping its channel count.
///
/// The method tries to read from any image format supported by the image crate. The samples
/// are returned in BGR(A) order:
///
/// * single channel images become a (H, W) buffer,
/// * color images become a (H, W, 3) BGR buffer,
/// * images with alpha become a (H, W, 4) BGRA buffer, gray + alpha is widened to BGRA.
///
/// Higher bit depths are reduced to 8 bits.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// A pixel buffer containing the image data.
pub fn read_image_unchanged(file_path: impl AsRef<Path>) -> Result<PixelBuffer<u8>, IoError> {
    let file_path = file_path.as_ref().to_owned();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let img = image::ImageReader::open(&file_path)?
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    log::debug!(
        "decoded {} as {:?} ({}x{})",
        file_path.display(),
        img.color(),
        size.width,
        size.height
    );

    let image = match img.color().channel_count() {
        1 => PixelBuffer::new_2d(size, img.into_luma8().into_raw())?,
        2 => {
            let data = img
                .into_luma_alpha8()
                .into_raw()
                .chunks_exact(2)
                .flat_map(|la| [la[0], la[0], la[0], la[1]])
                .collect();
            PixelBuffer::new(size, 4, data)?
        }
        3 => {
            let mut data = img.into_rgb8().into_raw();
            data.chunks_exact_mut(3).for_each(|px| px.swap(0, 2));
            PixelBuffer::new(size, 3, data)?
        }
        4 => {
            let mut data = img.into_rgba8().into_raw();
            data.chunks_exact_mut(4).for_each(|px| px.swap(0, 2));
            PixelBuffer::new(size, 4, data)?
        }
        n => return Err(IoError::UnsupportedChannelCount(n as usize)),
    };

    Ok(image)
}

/// Writes a BGR(A) or grayscale buffer to the given file path.
///
/// The format is deduced from the file extension. Buffers with 1, 3 or 4 channels are
/// supported; 3 and 4 channel buffers are expected in BGR(A) order.
///
/// # Arguments
///
/// * `file_path` - The path to the output image.
/// * `image` - The buffer to encode.
pub fn write_image(file_path: impl AsRef<Path>, image: &PixelBuffer<u8>) -> Result<(), IoError> {
    let (width, height) = (image.width() as u32, image.height() as u32);

    let (data, color) = match image.num_channels() {
        1 => (image.as_slice().to_vec(), image::ColorType::L8),
        3 => {
            let mut data = image.as_slice().to_vec();
            data.chunks_exact_mut(3).for_each(|px| px.swap(0, 2));
            (data, image::ColorType::Rgb8)
        }
        4 => {
            let mut data = image.as_slice().to_vec();
            data.chunks_exact_mut(4).for_each(|px| px.swap(0, 2));
            (data, image::ColorType::Rgba8)
        }
        n => return Err(IoError::UnsupportedChannelCount(n)),
    };

    image::save_buffer(file_path, &data, width, height, color)?;

    Ok(())
}
