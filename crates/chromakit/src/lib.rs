#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use chromakit_image as image;

#[doc(inline)]
pub use chromakit_imgproc as imgproc;

#[doc(inline)]
pub use chromakit_color as color;

#[doc(inline)]
pub use chromakit_detect as detect;

#[doc(inline)]
pub use chromakit_io as io;
