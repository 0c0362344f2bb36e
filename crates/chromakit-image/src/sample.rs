/// The numeric width of the samples stored in a pixel buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SampleDepth {
    /// 8-bit unsigned integer samples in the range [0, 255].
    U8,
    /// 16-bit unsigned integer samples in the range [0, 65535].
    U16,
    /// 32-bit floating point samples, nominally in the range [0, 1].
    F32,
}

impl SampleDepth {
    /// The value of a full intensity sample.
    pub fn max_value(&self) -> f32 {
        match self {
            SampleDepth::U8 => 255.0,
            SampleDepth::U16 => 65535.0,
            SampleDepth::F32 => 1.0,
        }
    }

    /// The offset added to signed chroma channels (YUV, YCrCb, XYZ-like encodings).
    pub fn chroma_offset(&self) -> f32 {
        match self {
            SampleDepth::U8 => 128.0,
            SampleDepth::U16 => 32768.0,
            SampleDepth::F32 => 0.5,
        }
    }
}

impl std::fmt::Display for SampleDepth {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            SampleDepth::U8 => "u8",
            SampleDepth::U16 => "u16",
            SampleDepth::F32 => "f32",
        };
        write!(f, "{name}")
    }
}

/// Trait for pixel sample types.
///
/// Send and Sync are required to process rows on the rayon thread pool.
pub trait Sample: Copy + Default + PartialEq + std::fmt::Debug + Send + Sync + 'static {
    /// The depth tag of the sample type.
    const DEPTH: SampleDepth;

    /// Convert the sample to a f32 value without scaling.
    fn to_f32(self) -> f32;

    /// Convert a f32 value to the sample type, rounding and saturating integer types.
    fn from_f32(x: f32) -> Self;
}

impl Sample for u8 {
    const DEPTH: SampleDepth = SampleDepth::U8;

    fn to_f32(self) -> f32 {
        self as f32
    }

    fn from_f32(x: f32) -> Self {
        num_traits::clamp(x.round(), 0.0, 255.0) as u8
    }
}

impl Sample for u16 {
    const DEPTH: SampleDepth = SampleDepth::U16;

    fn to_f32(self) -> f32 {
        self as f32
    }

    fn from_f32(x: f32) -> Self {
        num_traits::clamp(x.round(), 0.0, 65535.0) as u16
    }
}

impl Sample for f32 {
    const DEPTH: SampleDepth = SampleDepth::F32;

    fn to_f32(self) -> f32 {
        self
    }

    fn from_f32(x: f32) -> Self {
        x
    }
}

#[cfg(test)]
mod tests {
    use super::{Sample, SampleDepth};

    #[test]
    fn saturating_cast() {
        assert_eq!(u8::from_f32(-3.0), 0);
        assert_eq!(u8::from_f32(76.245), 76);
        assert_eq!(u8::from_f32(127.5), 128);
        assert_eq!(u8::from_f32(300.0), 255);
        assert_eq!(u16::from_f32(70000.0), u16::MAX);
        assert_eq!(f32::from_f32(-0.25), -0.25);
    }

    #[test]
    fn depth_constants() {
        assert_eq!(u8::DEPTH.max_value(), 255.0);
        assert_eq!(u16::DEPTH.chroma_offset(), 32768.0);
        assert_eq!(f32::DEPTH, SampleDepth::F32);
        assert_eq!(SampleDepth::U16.to_string(), "u16");
    }
}
