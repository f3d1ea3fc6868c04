//! Converting whole tables between their binary, in-memory and text forms

use types::Tag;

use crate::{
    axes::AxisRegistry,
    error::{Error, TextError},
    table_provider::TableProvider,
    tables::avar::{self, Avar},
    xml::{self, Element, XmlWriter},
};

/// A table that can be converted between its binary and text forms.
///
/// Tables that depend on other tables (such as the axis registry) get them
/// from `font`.
pub trait TableCodec: Sized {
    /// The table's tag.
    const TAG: Tag;

    fn decompile<'a>(data: &[u8], font: &impl TableProvider<'a>) -> Result<Self, Error>;

    fn compile<'a>(&self, font: &impl TableProvider<'a>) -> Result<Vec<u8>, Error>;

    /// Write the table's child elements.
    fn to_xml<'a>(&self, writer: &mut XmlWriter, font: &impl TableProvider<'a>)
        -> Result<(), Error>;

    /// Build the table from its child elements.
    fn from_xml(elements: &[Element]) -> Result<Self, Error>;
}

impl TableCodec for Avar {
    const TAG: Tag = avar::TAG;

    fn decompile<'a>(data: &[u8], font: &impl TableProvider<'a>) -> Result<Self, Error> {
        let fvar = font.axis_registry()?;
        Avar::decompile(data, fvar.as_ref().map(|fvar| fvar as &dyn AxisRegistry))
    }

    fn compile<'a>(&self, font: &impl TableProvider<'a>) -> Result<Vec<u8>, Error> {
        let fvar = font.axis_registry()?;
        Avar::compile(self, fvar.as_ref().map(|fvar| fvar as &dyn AxisRegistry))
    }

    fn to_xml<'a>(
        &self,
        writer: &mut XmlWriter,
        font: &impl TableProvider<'a>,
    ) -> Result<(), Error> {
        let fvar = font.axis_registry()?;
        Avar::to_xml(self, writer, fvar.as_ref().map(|fvar| fvar as &dyn AxisRegistry));
        Ok(())
    }

    fn from_xml(elements: &[Element]) -> Result<Self, Error> {
        Avar::from_xml(elements)
    }
}

/// Any table in a font.
///
/// Tables without a codec are kept as raw bytes, and written as hex data.
#[derive(Clone, Debug, PartialEq)]
pub enum Table {
    Avar(Avar),
    Raw { tag: Tag, data: Vec<u8> },
}

impl Table {
    /// The tag of this table.
    pub fn tag(&self) -> Tag {
        match self {
            Table::Avar(_) => avar::TAG,
            Table::Raw { tag, .. } => *tag,
        }
    }

    pub fn decompile<'a>(
        tag: Tag,
        data: &[u8],
        font: &impl TableProvider<'a>,
    ) -> Result<Table, Error> {
        match tag {
            avar::TAG => TableCodec::decompile(data, font).map(Table::Avar),
            _ => Ok(Table::Raw {
                tag,
                data: data.to_owned(),
            }),
        }
    }

    pub fn compile<'a>(&self, font: &impl TableProvider<'a>) -> Result<Vec<u8>, Error> {
        match self {
            Table::Avar(table) => TableCodec::compile(table, font),
            Table::Raw { data, .. } => Ok(data.clone()),
        }
    }

    /// Write this table as a `table` element with a `tag` attribute.
    pub fn to_xml<'a>(
        &self,
        writer: &mut XmlWriter,
        font: &impl TableProvider<'a>,
    ) -> Result<(), Error> {
        writer.start_element("table");
        writer.write_attribute("tag", &self.tag());
        match self {
            Table::Avar(table) => TableCodec::to_xml(table, writer, font)?,
            Table::Raw { data, .. } => xml::write_hex_data(writer, data),
        }
        writer.end_element();
        Ok(())
    }

    /// Parse a `table` element, as written by [`Table::to_xml`].
    pub fn from_xml(element: &Element) -> Result<Table, Error> {
        let tag = element.required_attribute("table", "tag")?;
        let tag = Tag::new_checked(tag.as_bytes()).map_err(|error| TextError::InvalidTag {
            value: tag.to_owned(),
            error,
        })?;
        match tag {
            avar::TAG => <Avar as TableCodec>::from_xml(&element.children).map(Table::Avar),
            _ => {
                let hex = element
                    .children_named("hexdata")
                    .next()
                    .map(|hex| hex.text.as_str())
                    .unwrap_or_default();
                Ok(Table::Raw {
                    tag,
                    data: xml::parse_hex_data(hex)?,
                })
            }
        }
    }
}
