//! A buffer for building big-endian test data

use font_types::Scalar;

/// A convenience type for building big-endian byte buffers in tests.
///
/// Each value is written with its [`Scalar`] encoding.
#[derive(Clone, Debug, Default)]
pub struct BeBuffer {
    data: Vec<u8>,
}

impl BeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of bytes written so far.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The written bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer, returning the written bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Write a single value.
    pub fn push(mut self, item: impl Scalar) -> Self {
        self.data.extend_from_slice(item.to_raw().as_ref());
        self
    }

    /// Write each value in a sequence.
    pub fn extend<T: Scalar>(mut self, iter: impl IntoIterator<Item = T>) -> Self {
        for item in iter {
            self.data.extend_from_slice(item.to_raw().as_ref());
        }
        self
    }
}

impl std::ops::Deref for BeBuffer {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use font_types::{F2Dot14, MajorMinor, Tag};

    use super::*;

    #[test]
    fn builds_big_endian_bytes() {
        let buf = BeBuffer::new()
            .push(MajorMinor::VERSION_1_0)
            .push(Tag::new(b"wght"))
            .extend([F2Dot14::from_f64(-1.0), F2Dot14::from_f64(0.3)]);
        assert_eq!(
            buf.data(),
            [0, 1, 0, 0, b'w', b'g', b'h', b't', 0xC0, 0x00, 0x13, 0x33]
        );
    }
}
