use crate::{PixelBuffer, Sample};

use serde::ser::SerializeStruct;
use serde::Deserialize;

impl<T> serde::Serialize for PixelBuffer<T>
where
    T: Sample + serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("PixelBuffer", 2)?;
        state.serialize_field("data", self.as_slice())?;
        state.serialize_field("shape", &self.shape())?;
        state.end()
    }
}

impl<'de, T> serde::Deserialize<'de> for PixelBuffer<T>
where
    T: Sample + serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct BufferData<T> {
            data: Vec<T>,
            shape: Vec<usize>,
        }

        let BufferData { data, shape } = BufferData::deserialize(deserializer)?;

        PixelBuffer::from_shape_vec(&shape, data).map_err(serde::de::Error::custom)
    }
}
