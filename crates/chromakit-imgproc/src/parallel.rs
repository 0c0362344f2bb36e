use rayon::prelude::*;
use thiserror::Error;

use chromakit_image::PixelBuffer;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),
}

/// Controls how independent work items are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool.
    #[default]
    Parallel,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    /// Use this primarily for benchmarking or specific isolation needs.
    Fixed(usize),
}

/// Apply a function to each pixel in the image in parallel.
///
/// The closure receives one source pixel (`src.num_channels()` samples) and one destination
/// pixel (`dst.num_channels()` samples). Both buffers must share the same spatial size.
pub fn par_iter_rows<T1, T2>(
    src: &PixelBuffer<T1>,
    dst: &mut PixelBuffer<T2>,
    f: impl Fn(&[T1], &mut [T2]) + Send + Sync,
) where
    T1: chromakit_image::Sample,
    T2: chromakit_image::Sample,
{
    let (c1, c2, cols) = (src.num_channels(), dst.num_channels(), src.cols());
    if cols == 0 {
        return;
    }

    src.as_slice()
        .par_chunks_exact(c1 * cols)
        .zip(dst.as_slice_mut().par_chunks_exact_mut(c2 * cols))
        .for_each(|(src_chunk, dst_chunk)| {
            src_chunk
                .chunks_exact(c1)
                .zip(dst_chunk.chunks_exact_mut(c2))
                .for_each(|(src_pixel, dst_pixel)| {
                    f(src_pixel, dst_pixel);
                });
        });
}

/// Map every item with the given strategy, returning the results in input order.
///
/// The output order never depends on completion order, so callers can reduce the results
/// deterministically.
///
/// # Example
///
/// ```
/// use chromakit_imgproc::parallel::{map_ordered, ExecutionStrategy};
///
/// let squares = map_ordered(ExecutionStrategy::Parallel, &[1, 2, 3], |x| x * x).unwrap();
/// assert_eq!(squares, vec![1, 4, 9]);
/// ```
pub fn map_ordered<I, O, F>(
    strategy: ExecutionStrategy,
    items: &[I],
    f: F,
) -> Result<Vec<O>, ParallelError>
where
    I: Sync,
    O: Send,
    F: Fn(&I) -> O + Sync + Send,
{
    let out: Vec<O> = match strategy {
        ExecutionStrategy::Serial => items.iter().map(f).collect(),
        ExecutionStrategy::Parallel => items.par_iter().map(f).collect(),
        ExecutionStrategy::Fixed(n) => {
            if n == 0 {
                return Err(ParallelError::InvalidThreadCount(n));
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            pool.install(|| items.par_iter().map(f).collect())
        }
    };

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chromakit_image::{ImageError, ImageSize};

    #[test]
    fn test_par_iter_rows_channel_change() -> Result<(), ImageError> {
        let src = PixelBuffer::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            3,
            vec![1u8, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12],
        )?;
        let mut dst = PixelBuffer::from_size_val(src.size(), 1, 0u8)?;

        par_iter_rows(&src, &mut dst, |s, d| d[0] = s[0] + s[2]);

        assert_eq!(dst.as_slice(), &[4, 10, 16, 22]);

        Ok(())
    }

    #[test]
    fn test_map_serial() -> Result<(), ParallelError> {
        let out = map_ordered(ExecutionStrategy::Serial, &[1, 2, 3, 4], |s| s * 2)?;
        assert_eq!(out, vec![2, 4, 6, 8]);
        Ok(())
    }

    #[test]
    fn test_map_parallel_keeps_order() -> Result<(), ParallelError> {
        let items: Vec<usize> = (0..1000).collect();
        let out = map_ordered(ExecutionStrategy::Parallel, &items, |s| s + 1)?;
        assert_eq!(out, (1..1001).collect::<Vec<_>>());
        Ok(())
    }

    #[test]
    fn test_map_fixed_success() -> Result<(), ParallelError> {
        let out = map_ordered(ExecutionStrategy::Fixed(2), &[1, 2, 3, 4], |s| s * 2)?;
        assert_eq!(out, vec![2, 4, 6, 8]);
        Ok(())
    }

    #[test]
    fn test_map_fixed_error() {
        let res = map_ordered(ExecutionStrategy::Fixed(0), &[1], |s| *s);
        assert_eq!(res, Err(ParallelError::InvalidThreadCount(0)));
    }
}
