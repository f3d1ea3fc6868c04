//! Writing the [WOFF 1.0](https://www.w3.org/TR/WOFF/) container
//!
//! Table data is stored uncompressed, which WOFF allows: each table's
//! `compLength` equals its `origLength`. No metadata or private data blocks
//! are written.

use types::Tag;

use crate::{
    font::{
        table_checksum, FontBuilder, FontRef, HEAD_TAG, TABLE_DIRECTORY_HEADER_LEN, TABLE_RECORD_LEN,
    },
    write::{round4, FontWrite, TableWriter},
};

/// 'wOFF'
pub const WOFF_SIGNATURE: u32 = 0x774F4646;

const WOFF_HEADER_LEN: usize = 44;
const WOFF_TABLE_ENTRY_LEN: usize = 20;
// fontRevision, as two u16s
const HEAD_FONT_REVISION: std::ops::Range<usize> = 4..8;

struct WoffHeader {
    flavor: u32,
    length: u32,
    num_tables: u16,
    total_sfnt_size: u32,
    major_version: u16,
    minor_version: u16,
}

struct WoffTableEntry {
    tag: Tag,
    offset: u32,
    length: u32,
    orig_checksum: u32,
}

impl FontWrite for WoffHeader {
    fn write_into(&self, writer: &mut TableWriter) {
        WOFF_SIGNATURE.write_into(writer);
        self.flavor.write_into(writer);
        self.length.write_into(writer);
        self.num_tables.write_into(writer);
        0u16.write_into(writer); // reserved
        self.total_sfnt_size.write_into(writer);
        self.major_version.write_into(writer);
        self.minor_version.write_into(writer);
        // metaOffset, metaLength, metaOrigLength, privOffset, privLength
        [0u32; 5].write_into(writer);
    }
}

impl FontWrite for WoffTableEntry {
    fn write_into(&self, writer: &mut TableWriter) {
        self.tag.write_into(writer);
        self.offset.write_into(writer);
        self.length.write_into(writer); // compLength
        self.length.write_into(writer); // origLength
        self.orig_checksum.write_into(writer);
    }
}

impl FontBuilder<'_> {
    /// Assemble all the tables into a WOFF file.
    ///
    /// The font version in the header is taken from the `fontRevision` of
    /// the head table, if there is one.
    pub fn build_woff(&self) -> Vec<u8> {
        let num_tables = self.num_tables();
        let mut offset = WOFF_HEADER_LEN + num_tables * WOFF_TABLE_ENTRY_LEN;
        let mut total_sfnt_size = TABLE_DIRECTORY_HEADER_LEN + num_tables * TABLE_RECORD_LEN;
        let mut version = (0, 0);
        let entries: Vec<_> = self
            .tables()
            .map(|(tag, data)| {
                if tag == HEAD_TAG {
                    if let Some(rev) = data.get(HEAD_FONT_REVISION) {
                        version = (
                            u16::from_be_bytes([rev[0], rev[1]]),
                            u16::from_be_bytes([rev[2], rev[3]]),
                        );
                    }
                }
                let entry = WoffTableEntry {
                    tag,
                    offset: offset as u32,
                    length: data.len() as u32,
                    orig_checksum: table_checksum(tag, data),
                };
                offset += round4(data.len());
                total_sfnt_size += round4(data.len());
                entry
            })
            .collect();
        if !self.contains(HEAD_TAG) {
            log::debug!("no head table, WOFF version will be 0.0");
        }

        let header = WoffHeader {
            flavor: self.sfnt_version(),
            length: offset as u32,
            num_tables: num_tables as u16,
            total_sfnt_size: total_sfnt_size as u32,
            major_version: version.0,
            minor_version: version.1,
        };
        let mut writer = TableWriter::default();
        header.write_into(&mut writer);
        entries.write_into(&mut writer);
        for (_, data) in self.tables() {
            writer.write_slice(data);
            writer.pad_to_4byte_aligned();
        }
        writer.into_data()
    }
}

/// Re-wrap all the tables of a font as WOFF.
pub fn write_woff(font: &FontRef) -> Vec<u8> {
    FontBuilder::new().copy_missing_tables(font).build_woff()
}
