//! Resolving the order of a font's variation axes
//!
//! Several variation tables store per-axis data positionally, without an axis
//! tag. The meaning of each entry is defined by the order of axes in the
//! font's axis registry (the `fvar` table), so those tables cannot be read
//! or written without it.

use types::Tag;

use crate::error::Error;

/// A source of the ordered list of a font's variation axes.
///
/// This is implemented by the [`Fvar`](crate::tables::fvar::Fvar) table, and
/// for plain lists of tags, which serve as a stand-in registry when no full
/// font is available.
pub trait AxisRegistry {
    /// The tags of all axes, in registry order.
    fn axis_tags(&self) -> Vec<Tag>;
}

impl AxisRegistry for Vec<Tag> {
    fn axis_tags(&self) -> Vec<Tag> {
        self.clone()
    }
}

impl<const N: usize> AxisRegistry for [Tag; N] {
    fn axis_tags(&self) -> Vec<Tag> {
        self.to_vec()
    }
}

/// The resolved axis order for a single compile or decompile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AxisOrder {
    tags: Vec<Tag>,
}

impl AxisOrder {
    /// Query the registry for its axes.
    ///
    /// The registry is queried exactly once. It is an error for the
    /// registry to be missing or to declare no axes.
    pub fn resolve(registry: Option<&dyn AxisRegistry>) -> Result<Self, Error> {
        let tags = registry.ok_or(Error::MissingAxisRegistry)?.axis_tags();
        if tags.is_empty() {
            return Err(Error::RegistryMismatch {
                table_axes: 0,
                registry_axes: 0,
            });
        }
        for (i, tag) in tags.iter().enumerate() {
            if tags[..i].contains(tag) {
                log::warn!("axis '{tag}' appears more than once in the axis registry");
            }
        }
        Ok(AxisOrder { tags })
    }

    /// The number of axes.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Always `false`; a resolved order has at least one axis.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// `true` if this axis is in the registry.
    pub fn contains(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    /// The position of this axis in the registry, if present.
    pub fn position(&self, tag: Tag) -> Option<usize> {
        self.tags.iter().position(|t| *t == tag)
    }

    /// Iterate over the axis tags, in order.
    pub fn iter(&self) -> impl Iterator<Item = Tag> + '_ {
        self.tags.iter().copied()
    }
}
