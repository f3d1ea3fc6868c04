//! Writing big-endian table data

use types::{F2Dot14, Fixed, MajorMinor, Scalar, Tag};

/// A type that that can be written out as part of a font file.
pub trait FontWrite {
    /// Write our data into this [TableWriter].
    fn write_into(&self, writer: &mut TableWriter);
}

/// A buffer that accumulates the bytes of a single table.
#[derive(Debug, Default, Clone)]
pub struct TableWriter {
    bytes: Vec<u8>,
}

/// Serialize a table to bytes.
pub fn dump_table<T: FontWrite + ?Sized>(table: &T) -> Vec<u8> {
    let mut writer = TableWriter::default();
    table.write_into(&mut writer);
    writer.into_data()
}

impl TableWriter {
    /// Write raw bytes into this table.
    ///
    /// The caller is responsible for ensuring bytes are in big-endian order.
    #[inline]
    pub fn write_slice(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes)
    }

    /// Write zeros until the length of the table is a multiple of four.
    pub fn pad_to_4byte_aligned(&mut self) {
        let padding = round4(self.bytes.len()) - self.bytes.len();
        self.bytes.extend(std::iter::repeat(0).take(padding));
    }

    /// The number of bytes written so far.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Finish writing, returning the bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.bytes
    }
}

pub(crate) fn round4(sz: usize) -> usize {
    (sz + 3) & !3
}

macro_rules! write_scalar {
    ($ty:ty) => {
        impl FontWrite for $ty {
            #[inline]
            fn write_into(&self, writer: &mut TableWriter) {
                writer.write_slice(Scalar::to_raw(*self).as_ref())
            }
        }
    };
}

write_scalar!(u8);
write_scalar!(i8);
write_scalar!(u16);
write_scalar!(i16);
write_scalar!(u32);
write_scalar!(i32);
write_scalar!(F2Dot14);
write_scalar!(Fixed);
write_scalar!(MajorMinor);
write_scalar!(Tag);

impl<T: FontWrite> FontWrite for [T] {
    fn write_into(&self, writer: &mut TableWriter) {
        self.iter().for_each(|item| item.write_into(writer))
    }
}

impl<T: FontWrite> FontWrite for Vec<T> {
    fn write_into(&self, writer: &mut TableWriter) {
        self.as_slice().write_into(writer)
    }
}

impl<T: FontWrite, const N: usize> FontWrite for [T; N] {
    fn write_into(&self, writer: &mut TableWriter) {
        self.as_slice().write_into(writer)
    }
}
