//! Converting the `avar` font table between binary, in-memory and text forms
//!
//! The [`avar`](tables::avar) table stores one segment map per variation
//! axis. In the binary table the maps carry no axis tags; they are matched to
//! axes by position in the font's [`fvar`](tables::fvar) table. The in-memory
//! [`Avar`](tables::avar::Avar) is keyed by tag, so compiling and
//! decompiling both take an [`AxisRegistry`].
//!
//! ```
//! use font_tables::tables::avar::{Avar, SegmentMap};
//! use font_tables::types::Tag;
//!
//! let wght = Tag::new(b"wght");
//! let mut avar = Avar::new();
//! avar.set_map(wght, [(-1.0, -1.0), (0.0, 0.0), (0.5, 0.7), (1.0, 1.0)].into_iter().collect());
//! let bytes = avar.compile(Some(&[wght])).unwrap();
//! let decoded = Avar::decompile(&bytes, Some(&[wght])).unwrap();
//! assert_eq!(decoded.get_map(wght).unwrap().len(), 4);
//! ```
//!
//! Whole fonts can be read with [`FontRef`], reassembled with
//! [`FontBuilder`], and written as WOFF with [`FontBuilder::build_woff`].

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod axes;
mod error;
mod font;
mod font_data;
mod table;
mod table_provider;
pub mod tables;
pub mod woff;
mod write;
pub mod xml;

/// Public re-export of the font-types crate.
pub extern crate font_types as types;

pub use axes::{AxisOrder, AxisRegistry};
pub use error::{Error, ReadError, TextError};
pub use font::{compute_checksum, FontBuilder, FontRef, TableRecord};
pub use font_data::{Cursor, FontData};
pub use table::{Table, TableCodec};
pub use table_provider::TableProvider;
pub use write::{dump_table, FontWrite, TableWriter};
