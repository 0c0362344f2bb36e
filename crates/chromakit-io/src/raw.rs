use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use chromakit_image::{PixelBuffer, Sample, SampleDepth};

use crate::error::IoError;

/// A pixel buffer read back from a raw array file, tagged with its sample type.
///
/// Raw arrays carry no color space information, only the shape and the samples.
#[derive(Clone, Debug, PartialEq)]
pub enum RawArray {
    /// 8-bit unsigned samples.
    U8(PixelBuffer<u8>),
    /// 16-bit unsigned samples.
    U16(PixelBuffer<u16>),
    /// 32-bit floating point samples.
    F32(PixelBuffer<f32>),
}

impl RawArray {
    /// The sample depth of the stored buffer.
    pub fn depth(&self) -> SampleDepth {
        match self {
            RawArray::U8(_) => SampleDepth::U8,
            RawArray::U16(_) => SampleDepth::U16,
            RawArray::F32(_) => SampleDepth::F32,
        }
    }

    /// The shape of the stored buffer, (H, W) or (H, W, C).
    pub fn shape(&self) -> Vec<usize> {
        match self {
            RawArray::U8(b) => b.shape(),
            RawArray::U16(b) => b.shape(),
            RawArray::F32(b) => b.shape(),
        }
    }

    /// The number of channels of the stored buffer.
    pub fn num_channels(&self) -> usize {
        match self {
            RawArray::U8(b) => b.num_channels(),
            RawArray::U16(b) => b.num_channels(),
            RawArray::F32(b) => b.num_channels(),
        }
    }
}

fn depth_tag(depth: SampleDepth) -> u8 {
    match depth {
        SampleDepth::U8 => 0,
        SampleDepth::U16 => 1,
        SampleDepth::F32 => 2,
    }
}

/// Writes a pixel buffer to a raw array file.
///
/// The file holds a sample type tag followed by the bincode encoding (standard config) of the
/// buffer shape and samples.
///
/// # Arguments
///
/// * `file_path` - The path to the output file.
/// * `image` - The buffer to store.
///
/// # Example
///
/// ```no_run
/// use chromakit_image::PixelBuffer;
/// use chromakit_io::raw::{read_raw_array, write_raw_array, RawArray};
///
/// let image = PixelBuffer::<u8>::from_size_val([4, 4].into(), 3, 0).unwrap();
/// write_raw_array("image.ckraw", &image).unwrap();
///
/// let RawArray::U8(image_back) = read_raw_array("image.ckraw").unwrap() else {
///     panic!("unexpected sample type");
/// };
/// assert_eq!(image_back, image);
/// ```
pub fn write_raw_array<T>(file_path: impl AsRef<Path>, image: &PixelBuffer<T>) -> Result<(), IoError>
where
    T: Sample + bincode::Encode,
{
    let config = bincode::config::standard();
    let mut writer = BufWriter::new(File::create(file_path)?);

    bincode::encode_into_std_write(depth_tag(T::DEPTH), &mut writer, config)?;
    bincode::encode_into_std_write(image, &mut writer, config)?;
    writer.flush()?;

    Ok(())
}

/// Reads a raw array file written by [`write_raw_array`].
///
/// # Arguments
///
/// * `file_path` - The path to the raw array file.
///
/// # Returns
///
/// The stored buffer, tagged with its sample type.
pub fn read_raw_array(file_path: impl AsRef<Path>) -> Result<RawArray, IoError> {
    let file_path = file_path.as_ref();

    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let config = bincode::config::standard();
    let mut reader = BufReader::new(File::open(file_path)?);

    let tag: u8 = bincode::decode_from_std_read(&mut reader, config)?;
    let array = match tag {
        0 => RawArray::U8(bincode::decode_from_std_read(&mut reader, config)?),
        1 => RawArray::U16(bincode::decode_from_std_read(&mut reader, config)?),
        2 => RawArray::F32(bincode::decode_from_std_read(&mut reader, config)?),
        _ => {
            return Err(IoError::RawArrayDecodeError(
                bincode::error::DecodeError::OtherString(format!("unknown sample tag {tag}")),
            ))
        }
    };

    log::debug!(
        "read raw array {} with shape {:?} ({})",
        file_path.display(),
        array.shape(),
        array.depth()
    );

    Ok(array)
}
