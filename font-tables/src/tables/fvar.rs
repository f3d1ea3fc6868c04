//! The [Font Variations](https://docs.microsoft.com/en-us/typography/opentype/spec/fvar) table
//!
//! Only the axis records are read; named instances are not needed to
//! resolve axis order.

use types::{Fixed, MajorMinor, Tag};

use crate::{axes::AxisRegistry, error::ReadError, font_data::FontData};

/// 'fvar'
pub const TAG: Tag = Tag::new(b"fvar");

const AXIS_RECORD_LEN: usize = 20;

/// The axes of a variable font.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fvar {
    pub version: MajorMinor,
    pub axes: Vec<VariationAxisRecord>,
}

/// A single variation axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VariationAxisRecord {
    pub tag: Tag,
    pub min_value: Fixed,
    pub default_value: Fixed,
    pub max_value: Fixed,
    pub flags: u16,
    pub axis_name_id: u16,
}

impl Fvar {
    /// Parse the table.
    pub fn read(data: FontData) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let version: MajorMinor = cursor.read()?;
        if version.major != 1 {
            return Err(ReadError::InvalidFormat(version.major.into()));
        }
        let axes_array_offset = cursor.read::<u16>()? as usize;
        cursor.advance_by(2); // reserved
        let axis_count = cursor.read::<u16>()? as usize;
        let axis_size = cursor.read::<u16>()? as usize;
        if axis_size < AXIS_RECORD_LEN {
            return Err(ReadError::MalformedData("fvar axisSize is too small"));
        }

        let axes_data = data
            .split_off(axes_array_offset)
            .ok_or(ReadError::OutOfBounds)?;
        let axes = (0..axis_count)
            .map(|i| {
                let record = axes_data
                    .slice(i * axis_size..i * axis_size + AXIS_RECORD_LEN)
                    .ok_or(ReadError::OutOfBounds)?;
                VariationAxisRecord::read(record)
            })
            .collect::<Result<_, _>>()?;
        Ok(Fvar { version, axes })
    }

    /// The record for the axis with this tag.
    pub fn axis(&self, tag: Tag) -> Option<&VariationAxisRecord> {
        self.axes.iter().find(|axis| axis.tag == tag)
    }
}

impl AxisRegistry for Fvar {
    fn axis_tags(&self) -> Vec<Tag> {
        self.axes.iter().map(|axis| axis.tag).collect()
    }
}

impl VariationAxisRecord {
    /// The axis should not be exposed directly in user interfaces.
    pub const HIDDEN_AXIS: u16 = 0x0001;

    fn read(data: FontData) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        Ok(VariationAxisRecord {
            tag: cursor.read()?,
            min_value: cursor.read()?,
            default_value: cursor.read()?,
            max_value: cursor.read()?,
            flags: cursor.read()?,
            axis_name_id: cursor.read()?,
        })
    }

    pub fn is_hidden(&self) -> bool {
        self.flags & Self::HIDDEN_AXIS != 0
    }

    /// Returns a normalized coordinate for the given user-space value.
    pub fn normalize(&self, value: f64) -> f64 {
        use std::cmp::Ordering::*;
        let min_value = self.min_value.to_f64();
        let default_value = self.default_value.to_f64();
        let max_value = self.max_value.to_f64().max(min_value);
        let value = value.clamp(min_value, max_value);
        let normalized = match value.partial_cmp(&default_value) {
            Some(Less) => -(default_value - value) / (default_value - min_value),
            Some(Greater) => (value - default_value) / (max_value - default_value),
            _ => 0.0,
        };
        normalized.clamp(-1.0, 1.0)
    }
}
