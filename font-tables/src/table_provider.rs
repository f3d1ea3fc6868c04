//! a trait for things that can serve font tables

use types::Tag;

use crate::{font_data::FontData, tables::fvar, ReadError};

/// An interface for accessing tables from a font (or font-like object)
pub trait TableProvider<'a> {
    fn data_for_tag(&self, tag: Tag) -> Option<FontData<'a>>;

    fn expect_data_for_tag(&self, tag: Tag) -> Result<FontData<'a>, ReadError> {
        self.data_for_tag(tag).ok_or(ReadError::TableIsMissing(tag))
    }

    fn fvar(&self) -> Result<fvar::Fvar, ReadError> {
        self.expect_data_for_tag(fvar::TAG).and_then(fvar::Fvar::read)
    }

    /// The font's axis registry, or `None` if the font is not variable.
    ///
    /// A present but malformed `fvar` table is an error.
    fn axis_registry(&self) -> Result<Option<fvar::Fvar>, ReadError> {
        match self.data_for_tag(fvar::TAG) {
            Some(data) => fvar::Fvar::read(data).map(Some),
            None => Ok(None),
        }
    }
}
