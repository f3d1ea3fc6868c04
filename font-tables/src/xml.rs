//! The textual form of tables
//!
//! Tables are written as XML with [`xmlwriter`], and read back through a
//! small owned element tree ([`Element`]) built with [`roxmltree`]. The
//! element tree ignores comments and processing instructions, and keeps
//! only the text content that tables actually use (for `hexdata`).

use types::F2Dot14;
pub use xmlwriter::{Indent, Options, XmlWriter};

use crate::error::{Error, TextError};

const HEX_BYTES_PER_LINE: usize = 16;

/// An XML element, with its attributes and child elements.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    /// The concatenated text content directly inside this element.
    pub text: String,
}

impl Element {
    /// Create a new element with no attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder method to add an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Builder method to add a child element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Parse a document, returning its root element.
    pub fn parse(text: &str) -> Result<Element, TextError> {
        let doc = roxmltree::Document::parse(text).map_err(|e| TextError::Xml(e.to_string()))?;
        Ok(Element::from_node(doc.root_element()))
    }

    fn from_node(node: roxmltree::Node) -> Element {
        let mut element = Element::new(node.tag_name().name());
        element.attributes = node
            .attributes()
            .map(|attr| (attr.name().to_owned(), attr.value().to_owned()))
            .collect();
        for child in node.children() {
            if child.is_element() {
                element.children.push(Element::from_node(child));
            } else if let Some(text) = child.text().filter(|_| child.is_text()) {
                element.text.push_str(text);
            }
        }
        if element.text.trim().is_empty() {
            element.text.clear();
        }
        element
    }

    /// The value of an attribute, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value.as_str())
    }

    /// The value of an attribute that must be present.
    pub fn required_attribute(
        &self,
        element: &'static str,
        attribute: &'static str,
    ) -> Result<&str, TextError> {
        self.attribute(attribute)
            .ok_or(TextError::MissingAttribute { element, attribute })
    }

    /// Iterate over the child elements with the given name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Write this element and its descendants.
    pub fn write(&self, writer: &mut XmlWriter) {
        writer.start_element(&self.name);
        for (name, value) in &self.attributes {
            writer.write_attribute(name, value);
        }
        if !self.text.is_empty() {
            writer.write_text(&self.text);
        }
        for child in &self.children {
            child.write(writer);
        }
        writer.end_element();
    }
}

/// Format an F2Dot14 value as the shortest decimal that reads back as the
/// same value.
///
/// The output always has a fractional part: `1.0`, `0.0`, `0.3`.
pub fn fixed_to_str(value: F2Dot14) -> String {
    if value == F2Dot14::ZERO {
        return "0.0".into();
    }
    let value = value.to_f64();
    let eps = 0.5 / (F2Dot14::ONE.to_bits() as f64);
    let lo = value - eps;
    let hi = value + eps;
    // any decimal in (lo, hi) rounds to this value; if that includes an
    // integer, use it.
    if lo.trunc() != hi.trunc() {
        return format!("{:.1}", value.round());
    }
    let lo = format!("{lo:.8}");
    let hi = format!("{hi:.8}");
    let first_diff = lo
        .bytes()
        .zip(hi.bytes())
        .position(|(a, b)| a != b)
        .unwrap_or(lo.len());
    let period = lo.find('.').unwrap_or_default();
    let precision = first_diff.saturating_sub(period).max(1);
    format!("{value:.precision$}")
}

/// Quantize a float to F2Dot14 precision and format it with [`fixed_to_str`].
///
/// Values that cannot be represented are formatted as-is.
pub fn float_to_fixed_to_str(value: f64) -> String {
    match F2Dot14::checked_from_f64(value) {
        Some(fixed) => fixed_to_str(fixed),
        None => {
            log::warn!("{value} is out of range for F2Dot14, writing unquantized");
            format!("{value:?}")
        }
    }
}

/// Parse a decimal attribute, quantized to F2Dot14 precision.
pub fn parse_fixed_attribute(attribute: &str, text: &str) -> Result<f64, Error> {
    let invalid = || TextError::InvalidNumber {
        attribute: attribute.to_owned(),
        value: text.to_owned(),
    };
    let value: f64 = text.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() {
        return Err(invalid().into());
    }
    F2Dot14::checked_from_f64(value)
        .map(F2Dot14::to_f64)
        .ok_or(Error::OutOfRange { axis: None, value })
}

/// Write binary data as the text of a `hexdata` element.
pub fn write_hex_data(writer: &mut XmlWriter, data: &[u8]) {
    let mut text = String::with_capacity(data.len() * 3);
    for line in data.chunks(HEX_BYTES_PER_LINE) {
        text.push('\n');
        for (i, word) in line.chunks(2).enumerate() {
            if i > 0 {
                text.push(' ');
            }
            for byte in word {
                text.push_str(&format!("{byte:02x}"));
            }
        }
    }
    text.push('\n');
    writer.start_element("hexdata");
    writer.write_text(&text);
    writer.end_element();
}

/// Parse the text of a `hexdata` element.
pub fn parse_hex_data(text: &str) -> Result<Vec<u8>, TextError> {
    let digits = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_digit(16).ok_or(TextError::InvalidHexData))
        .collect::<Result<Vec<_>, _>>()?;
    if digits.len() % 2 != 0 {
        return Err(TextError::InvalidHexData);
    }
    Ok(digits
        .chunks(2)
        .map(|pair| (pair[0] * 16 + pair[1]) as u8)
        .collect())
}
