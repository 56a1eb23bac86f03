//! Image payloads for the inpaint check
//!
//! Generates the synthetic test image and mask and converts images to and
//! from the wire formats the IOPaint API uses.

mod codec;
mod synth;

pub use codec::{decode_image, save_image, to_base64_png};
#[cfg(test)]
pub use codec::to_png_bytes;
pub use synth::{create_test_image, create_test_mask, TEST_IMAGE_SIZE};
