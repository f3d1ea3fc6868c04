//! Reading and assembling sfnt font files

use std::borrow::Cow;
use std::collections::BTreeMap;

use types::{Tag, CFF_SFNT_VERSION, TT_SFNT_VERSION};

use crate::{
    font_data::FontData,
    table_provider::TableProvider,
    write::{round4, FontWrite, TableWriter},
    ReadError,
};

/// The legacy Apple sfnt version, 'true'.
const TRUE_SFNT_VERSION: u32 = 0x74727565;
pub(crate) const TABLE_DIRECTORY_HEADER_LEN: usize = 12;
pub(crate) const TABLE_RECORD_LEN: usize = 16;

/// 'head'
pub(crate) const HEAD_TAG: Tag = Tag::new(b"head");
/// The byte range of `checkSumAdjustment` in the head table.
pub(crate) const HEAD_CHECKSUM_ADJUSTMENT: std::ops::Range<usize> = 8..12;

/// A reference to the tables of an in-memory sfnt font.
#[derive(Clone, Debug)]
pub struct FontRef<'a> {
    data: FontData<'a>,
    sfnt_version: u32,
    table_records: Vec<TableRecord>,
}

/// A single entry in the table directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableRecord {
    pub tag: Tag,
    pub checksum: u32,
    pub offset: u32,
    pub length: u32,
}

impl<'a> FontRef<'a> {
    /// Parse the table directory at the start of `data`.
    ///
    /// Font collections and other containers are not supported.
    pub fn new(data: &'a [u8]) -> Result<Self, ReadError> {
        let data = FontData::new(data);
        let mut cursor = data.cursor();
        let sfnt_version: u32 = cursor.read()?;
        if ![TT_SFNT_VERSION, CFF_SFNT_VERSION, TRUE_SFNT_VERSION].contains(&sfnt_version) {
            return Err(ReadError::InvalidSfnt(sfnt_version));
        }
        let num_tables: u16 = cursor.read()?;
        cursor.advance_by(6); // searchRange, entrySelector, rangeShift
        let table_records = (0..num_tables)
            .map(|_| {
                Ok(TableRecord {
                    tag: cursor.read()?,
                    checksum: cursor.read()?,
                    offset: cursor.read()?,
                    length: cursor.read()?,
                })
            })
            .collect::<Result<_, ReadError>>()?;
        Ok(FontRef {
            data,
            sfnt_version,
            table_records,
        })
    }

    /// The version tag at the start of the table directory.
    pub fn sfnt_version(&self) -> u32 {
        self.sfnt_version
    }

    /// The records of the table directory, in file order.
    pub fn table_records(&self) -> &[TableRecord] {
        &self.table_records
    }

    /// Returns the data for the table with the specified tag, if present.
    ///
    /// A record pointing outside the font is treated as missing.
    pub fn table_data(&self, tag: Tag) -> Option<FontData<'a>> {
        let record = self.table_records.iter().find(|record| record.tag == tag)?;
        let start = record.offset as usize;
        let end = start.checked_add(record.length as usize)?;
        self.data.slice(start..end)
    }

    /// The underlying font data.
    pub fn data(&self) -> FontData<'a> {
        self.data
    }
}

impl<'a> TableProvider<'a> for FontRef<'a> {
    fn data_for_tag(&self, tag: Tag) -> Option<FontData<'a>> {
        self.table_data(tag)
    }
}

/// Build a font from some set of tables.
#[derive(Debug, Clone)]
pub struct FontBuilder<'a> {
    sfnt_version: u32,
    tables: BTreeMap<Tag, Cow<'a, [u8]>>,
}

impl Default for FontBuilder<'_> {
    fn default() -> Self {
        FontBuilder {
            sfnt_version: TT_SFNT_VERSION,
            tables: BTreeMap::new(),
        }
    }
}

impl<'a> FontBuilder<'a> {
    /// Create a new builder to compile a binary font
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sfnt version written to the table directory.
    pub fn set_sfnt_version(&mut self, sfnt_version: u32) -> &mut Self {
        self.sfnt_version = sfnt_version;
        self
    }

    /// A builder method to add raw data for the provided tag
    pub fn add_raw(&mut self, tag: Tag, data: impl Into<Cow<'a, [u8]>>) -> &mut Self {
        self.tables.insert(tag, data.into());
        self
    }

    /// Copy each table from the source font if it does not already exist.
    ///
    /// The source's sfnt version is copied too.
    pub fn copy_missing_tables(&mut self, font: &FontRef<'a>) -> &mut Self {
        self.sfnt_version = font.sfnt_version();
        for record in font.table_records() {
            let tag = record.tag;
            if !self.tables.contains_key(&tag) {
                if let Some(data) = font.table_data(tag) {
                    self.add_raw(tag, data.as_bytes());
                } else {
                    log::warn!("data for '{tag}' is malformed");
                }
            }
        }
        self
    }

    /// Returns `true` if the builder contains a table with this tag.
    pub fn contains(&self, tag: Tag) -> bool {
        self.tables.contains_key(&tag)
    }

    pub(crate) fn sfnt_version(&self) -> u32 {
        self.sfnt_version
    }

    /// The tables, sorted by tag.
    pub(crate) fn tables(&self) -> impl Iterator<Item = (Tag, &[u8])> + '_ {
        self.tables.iter().map(|(tag, data)| (*tag, data.as_ref()))
    }

    pub(crate) fn num_tables(&self) -> usize {
        self.tables.len()
    }

    /// Assemble all the tables into a binary font file with a [Table Directory].
    ///
    /// [Table Directory]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory
    pub fn build(&self) -> Vec<u8> {
        let header_len = TABLE_DIRECTORY_HEADER_LEN + self.tables.len() * TABLE_RECORD_LEN;
        let mut position = header_len as u32;
        let table_records: Vec<_> = self
            .tables()
            .map(|(tag, data)| {
                let offset = position;
                position += round4(data.len()) as u32;
                TableRecord {
                    tag,
                    checksum: table_checksum(tag, data),
                    offset,
                    length: data.len() as u32,
                }
            })
            .collect();

        let search = SearchRange::compute(table_records.len(), TABLE_RECORD_LEN);
        let mut writer = TableWriter::default();
        self.sfnt_version.write_into(&mut writer);
        (table_records.len() as u16).write_into(&mut writer);
        search.write_into(&mut writer);
        table_records.write_into(&mut writer);
        for (_, data) in self.tables() {
            writer.write_slice(data);
            writer.pad_to_4byte_aligned();
        }
        writer.into_data()
    }
}

impl FontWrite for TableRecord {
    fn write_into(&self, writer: &mut TableWriter) {
        self.tag.write_into(writer);
        self.checksum.write_into(writer);
        self.offset.write_into(writer);
        self.length.write_into(writer);
    }
}

/// The binary search fields of a table directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SearchRange {
    pub search_range: u16,
    pub entry_selector: u16,
    pub range_shift: u16,
}

impl SearchRange {
    pub(crate) fn compute(n_items: usize, item_size: usize) -> Self {
        let entry_selector = if n_items == 0 {
            0
        } else {
            n_items.ilog2() as usize
        };
        let search_range = (1 << entry_selector) * item_size;
        let range_shift = (n_items * item_size).saturating_sub(search_range);
        SearchRange {
            search_range: search_range as u16,
            entry_selector: entry_selector as u16,
            range_shift: range_shift as u16,
        }
    }
}

impl FontWrite for SearchRange {
    fn write_into(&self, writer: &mut TableWriter) {
        self.search_range.write_into(writer);
        self.entry_selector.write_into(writer);
        self.range_shift.write_into(writer);
    }
}

/// The sum of the table's big-endian u32 words, zero-padded.
pub fn compute_checksum(table: &[u8]) -> u32 {
    let mut chunks = table.chunks_exact(4);
    let mut sum = chunks.by_ref().fold(0u32, |sum, chunk| {
        let word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        sum.wrapping_add(word)
    });
    let rem = chunks.remainder();
    if !rem.is_empty() {
        let mut last = [0u8; 4];
        last[..rem.len()].copy_from_slice(rem);
        sum = sum.wrapping_add(u32::from_be_bytes(last));
    }
    sum
}

/// The checksum of a table, treating the head table's `checkSumAdjustment` as zero.
pub(crate) fn table_checksum(tag: Tag, data: &[u8]) -> u32 {
    if tag == HEAD_TAG && data.len() >= HEAD_CHECKSUM_ADJUSTMENT.end {
        let mut head = data.to_vec();
        head[HEAD_CHECKSUM_ADJUSTMENT].fill(0);
        compute_checksum(&head)
    } else {
        compute_checksum(data)
    }
}
