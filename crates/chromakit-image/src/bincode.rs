use crate::{PixelBuffer, Sample};

impl<T> bincode::enc::Encode for PixelBuffer<T>
where
    T: Sample + bincode::enc::Encode,
{
    fn encode<E: bincode::enc::Encoder>(
        &self,
        encoder: &mut E,
    ) -> Result<(), bincode::error::EncodeError> {
        bincode::Encode::encode(&self.shape(), encoder)?;
        bincode::Encode::encode(self.as_slice(), encoder)?;
        Ok(())
    }
}

impl<T, C> bincode::de::Decode<C> for PixelBuffer<T>
where
    T: Sample + bincode::de::Decode<C>,
{
    fn decode<D: bincode::de::Decoder<Context = C>>(
        decoder: &mut D,
    ) -> Result<Self, bincode::error::DecodeError> {
        let shape: Vec<usize> = bincode::Decode::decode(decoder)?;
        let data: Vec<T> = bincode::Decode::decode(decoder)?;
        PixelBuffer::from_shape_vec(&shape, data)
            .map_err(|e| bincode::error::DecodeError::OtherString(format!("Buffer error: {e}")))
    }
}
