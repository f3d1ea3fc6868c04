//! The [Axis Variations](https://docs.microsoft.com/en-us/typography/opentype/spec/avar) table
//!
//! The binary table holds one segment map per axis, stored positionally: the
//! n-th map belongs to the n-th axis of the font's [axis registry]. The
//! in-memory [`Avar`] is keyed by axis tag instead, so compiling and
//! decompiling both need the registry.
//!
//! [axis registry]: crate::axes::AxisRegistry

use indexmap::{IndexMap, IndexSet};
use types::{F2Dot14, MajorMinor, Scalar, Tag};

use crate::{
    axes::{AxisOrder, AxisRegistry},
    error::{Error, TextError},
    font_data::{Cursor, FontData},
    write::{FontWrite, TableWriter},
    xml::{self, Element, XmlWriter},
};

/// 'avar'
pub const TAG: Tag = Tag::new(b"avar");

/// A single point of a [`SegmentMap`], in normalized coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisValueMap {
    pub from_coordinate: f64,
    pub to_coordinate: f64,
}

/// The piecewise-linear mapping for one axis.
///
/// Points are kept sorted by their `from` coordinate.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentMap {
    points: Vec<AxisValueMap>,
}

/// The axis variations table, mapping axis tags to their segment maps.
///
/// Equality ignores the order in which axes were added.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Avar {
    segments: IndexMap<Tag, SegmentMap>,
}

impl AxisValueMap {
    pub fn new(from_coordinate: f64, to_coordinate: f64) -> Self {
        AxisValueMap {
            from_coordinate,
            to_coordinate,
        }
    }
}

impl SegmentMap {
    /// Create a new, empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value for `from`, returning the previous value if there was one.
    pub fn insert(&mut self, from: f64, to: f64) -> Option<f64> {
        let idx = self.points.partition_point(|p| p.from_coordinate < from);
        match self.points.get_mut(idx) {
            Some(existing) if existing.from_coordinate == from => {
                Some(std::mem::replace(&mut existing.to_coordinate, to))
            }
            _ => {
                self.points.insert(idx, AxisValueMap::new(from, to));
                None
            }
        }
    }

    // keeps points with an equal `from`, in the order they were pushed
    fn push_sorted(&mut self, from: f64, to: f64) {
        let idx = self.points.partition_point(|p| p.from_coordinate <= from);
        self.points.insert(idx, AxisValueMap::new(from, to));
    }

    /// The value mapped from `from`, if there is a point at exactly `from`.
    pub fn get(&self, from: f64) -> Option<f64> {
        self.points
            .iter()
            .find(|p| p.from_coordinate == from)
            .map(|p| p.to_coordinate)
    }

    /// Remove the point at `from`, returning its value.
    pub fn remove(&mut self, from: f64) -> Option<f64> {
        let idx = self.points.iter().position(|p| p.from_coordinate == from)?;
        Some(self.points.remove(idx).to_coordinate)
    }

    /// Iterate over the points, in ascending `from` order.
    pub fn iter(&self) -> std::slice::Iter<'_, AxisValueMap> {
        self.points.iter()
    }

    /// The number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `true` if every point maps a value to itself.
    pub fn is_identity(&self) -> bool {
        self.points
            .iter()
            .all(|p| p.from_coordinate == p.to_coordinate)
    }

    /// `true` if the map contains the points -1 → -1, 0 → 0 and 1 → 1.
    pub fn has_default_anchors(&self) -> bool {
        [-1.0, 0.0, 1.0]
            .into_iter()
            .all(|anchor| self.get(anchor) == Some(anchor))
    }

    /// Apply the mapping to a normalized coordinate.
    ///
    /// Coordinates between two points are linearly interpolated; coordinates
    /// outside the mapped range are shifted by the delta of the nearest point.
    /// An empty map is the identity.
    pub fn apply(&self, coord: f64) -> f64 {
        if coord.is_nan() {
            return coord;
        }
        let (first, last) = match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return coord,
        };
        if let Some(exact) = self.points.iter().find(|p| p.from_coordinate == coord) {
            return exact.to_coordinate;
        }
        if coord < first.from_coordinate {
            return coord - first.from_coordinate + first.to_coordinate;
        }
        if coord > last.from_coordinate {
            return coord - last.from_coordinate + last.to_coordinate;
        }
        // NaN points break the ordering; leave such coordinates unmapped
        let idx = self.points.partition_point(|p| p.from_coordinate < coord);
        match (
            idx.checked_sub(1).and_then(|i| self.points.get(i)),
            self.points.get(idx),
        ) {
            (Some(before), Some(after)) if before.from_coordinate < after.from_coordinate => {
                let t = (coord - before.from_coordinate)
                    / (after.from_coordinate - before.from_coordinate);
                before.to_coordinate + t * (after.to_coordinate - before.to_coordinate)
            }
            _ => coord,
        }
    }

    fn to_fixed(&self, axis: Tag) -> Result<FixedSegmentMap, Error> {
        if self.points.len() > u16::MAX as usize {
            return Err(Error::TooManyPoints {
                axis,
                count: self.points.len(),
            });
        }
        let to_fixed = |value: f64| {
            F2Dot14::checked_from_f64(value).ok_or(Error::OutOfRange {
                axis: Some(axis),
                value,
            })
        };
        let mut points = self
            .points
            .iter()
            .map(|p| Ok([to_fixed(p.from_coordinate)?, to_fixed(p.to_coordinate)?]))
            .collect::<Result<Vec<_>, Error>>()?;
        // deserialized maps may be unsorted
        points.sort_by_key(|[from, _]| *from);
        Ok(FixedSegmentMap { points })
    }

    fn read(cursor: &mut Cursor) -> Result<Self, Error> {
        let count: u16 = cursor.read()?;
        let mut map = SegmentMap::new();
        for _ in 0..count {
            let from: F2Dot14 = cursor.read()?;
            let to: F2Dot14 = cursor.read()?;
            map.push_sorted(from.to_f64(), to.to_f64());
        }
        Ok(map)
    }

    fn from_xml_element(element: &Element) -> Result<Self, Error> {
        let mut map = SegmentMap::new();
        for mapping in element.children_named("mapping") {
            let from = mapping.required_attribute("mapping", "from")?;
            let to = mapping.required_attribute("mapping", "to")?;
            let from = xml::parse_fixed_attribute("from", from)?;
            let to = xml::parse_fixed_attribute("to", to)?;
            if let Some(prev) = map.insert(from, to) {
                log::warn!("duplicate mapping from {from}, replacing {prev} with {to}");
            }
        }
        Ok(map)
    }

    fn write_xml(&self, writer: &mut XmlWriter, axis: Tag) {
        writer.start_element("segment");
        writer.write_attribute("axis", &axis);
        for point in &self.points {
            writer.start_element("mapping");
            writer.write_attribute("from", &xml::float_to_fixed_to_str(point.from_coordinate));
            writer.write_attribute("to", &xml::float_to_fixed_to_str(point.to_coordinate));
            writer.end_element();
        }
        writer.end_element();
    }
}

impl FromIterator<(f64, f64)> for SegmentMap {
    fn from_iter<T: IntoIterator<Item = (f64, f64)>>(iter: T) -> Self {
        let mut map = SegmentMap::new();
        for (from, to) in iter {
            map.insert(from, to);
        }
        map
    }
}

impl<'a> IntoIterator for &'a SegmentMap {
    type Item = &'a AxisValueMap;
    type IntoIter = std::slice::Iter<'a, AxisValueMap>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The binary form of one axis's segment map.
struct FixedSegmentMap {
    points: Vec<[F2Dot14; 2]>,
}

impl FontWrite for FixedSegmentMap {
    fn write_into(&self, writer: &mut TableWriter) {
        (self.points.len() as u16).write_into(writer);
        self.points.write_into(writer);
    }
}

impl Avar {
    /// Create a new, empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the segment map for an axis, returning the previous map.
    pub fn set_map(&mut self, axis: Tag, map: SegmentMap) -> Option<SegmentMap> {
        self.segments.insert(axis, map)
    }

    /// The segment map for an axis.
    pub fn get_map(&self, axis: Tag) -> Option<&SegmentMap> {
        self.segments.get(&axis)
    }

    pub fn get_map_mut(&mut self, axis: Tag) -> Option<&mut SegmentMap> {
        self.segments.get_mut(&axis)
    }

    /// Remove the segment map for an axis.
    pub fn remove_map(&mut self, axis: Tag) -> Option<SegmentMap> {
        self.segments.shift_remove(&axis)
    }

    /// The tags of all axes with a segment map, in insertion order.
    pub fn axis_tags(&self) -> impl Iterator<Item = Tag> + '_ {
        self.segments.keys().copied()
    }

    /// Iterate over axes and their segment maps, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Tag, &SegmentMap)> + '_ {
        self.segments.iter().map(|(tag, map)| (*tag, map))
    }

    /// The number of axes with a segment map.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Compile the table to its binary form.
    ///
    /// One segment map is written for each axis in the registry, in registry
    /// order; axes without a map are written as empty maps. A map for an axis
    /// that is not in the registry has no position in the table, and is an
    /// error.
    pub fn compile(&self, registry: Option<&dyn AxisRegistry>) -> Result<Vec<u8>, Error> {
        let order = AxisOrder::resolve(registry)?;
        let axis_count = u16::try_from(order.len()).map_err(|_| Error::RegistryMismatch {
            table_axes: u16::MAX as usize,
            registry_axes: order.len(),
        })?;
        if let Some(axis) = self.axis_tags().find(|tag| !order.contains(*tag)) {
            return Err(Error::UnknownAxis { axis });
        }

        let empty = SegmentMap::new();
        let maps = order
            .iter()
            .map(|tag| self.get_map(tag).unwrap_or(&empty).to_fixed(tag))
            .collect::<Result<Vec<_>, _>>()?;

        let mut writer = TableWriter::default();
        MajorMinor::VERSION_1_0.write_into(&mut writer);
        0u16.write_into(&mut writer); // reserved
        axis_count.write_into(&mut writer);
        for map in &maps {
            map.write_into(&mut writer);
        }
        Ok(writer.into_data())
    }

    /// Decompile the table from its binary form.
    ///
    /// Segment maps are assigned to axes by their position in the registry,
    /// which must declare exactly as many axes as the table.
    pub fn decompile(data: &[u8], registry: Option<&dyn AxisRegistry>) -> Result<Avar, Error> {
        let mut cursor = FontData::new(data).cursor();
        let version: MajorMinor = cursor.read()?;
        if version != MajorMinor::VERSION_1_0 {
            return Err(Error::UnsupportedVersion { tag: TAG, version });
        }
        cursor.advance_by(u16::RAW_BYTE_LEN); // reserved
        let axis_count = cursor.read::<u16>()? as usize;

        let order = AxisOrder::resolve(registry)?;
        if axis_count != order.len() {
            return Err(Error::RegistryMismatch {
                table_axes: axis_count,
                registry_axes: order.len(),
            });
        }

        let mut segments = IndexMap::with_capacity(axis_count);
        for tag in order.iter() {
            segments.insert(tag, SegmentMap::read(&mut cursor)?);
        }
        if cursor.remaining_bytes() > 0 {
            log::debug!("{} unused bytes after avar data", cursor.remaining_bytes());
        }
        Ok(Avar { segments })
    }

    /// Write the table's `segment` elements.
    ///
    /// With a registry, axes are written in registry order, followed by any
    /// axes the registry doesn't know about; otherwise in insertion order.
    pub fn to_xml(&self, writer: &mut XmlWriter, registry: Option<&dyn AxisRegistry>) {
        let registry_tags = registry.map(|r| r.axis_tags()).unwrap_or_default();
        let ordered: IndexSet<Tag> = registry_tags
            .iter()
            .copied()
            .filter(|tag| self.segments.contains_key(tag))
            .chain(self.axis_tags())
            .collect();
        for tag in ordered {
            if let Some(map) = self.get_map(tag) {
                map.write_xml(writer, tag);
            }
        }
    }

    /// Build a table from `segment` elements.
    ///
    /// Other elements are ignored.
    pub fn from_xml(elements: &[Element]) -> Result<Avar, Error> {
        let mut avar = Avar::new();
        for element in elements {
            avar.from_xml_element(element)?;
        }
        Ok(avar)
    }

    /// Add the segment map described by a single `segment` element.
    ///
    /// On error the table is unchanged.
    pub fn from_xml_element(&mut self, element: &Element) -> Result<(), Error> {
        if element.name != "segment" {
            log::debug!("ignoring <{}> in avar", element.name);
            return Ok(());
        }
        let axis = element.required_attribute("segment", "axis")?;
        let tag = Tag::new_checked(axis.as_bytes()).map_err(|error| TextError::InvalidTag {
            value: axis.to_owned(),
            error,
        })?;
        let map = SegmentMap::from_xml_element(element)?;
        if self.set_map(tag, map).is_some() {
            log::warn!("duplicate segment for axis '{tag}', keeping the last one");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::xml::Options;

    const WDTH: Tag = Tag::new(b"wdth");
    const WGHT: Tag = Tag::new(b"wght");
    const OPSZ: Tag = Tag::new(b"opsz");

    fn approx_eq(left: &SegmentMap, right: &[(f64, f64)]) -> bool {
        left.len() == right.len()
            && left.iter().zip(right).all(|(p, (from, to))| {
                (p.from_coordinate - from).abs() <= 1e-6 && (p.to_coordinate - to).abs() <= 1e-6
            })
    }

    fn wdth_wght() -> Avar {
        let mut avar = Avar::new();
        avar.set_map(
            WDTH,
            [(-1.0, -1.0), (0.0, 0.0), (0.3, 0.8), (1.0, 1.0)]
                .into_iter()
                .collect(),
        );
        avar.set_map(
            WGHT,
            [(-1.0, -1.0), (0.0, 0.0), (1.0, 1.0)].into_iter().collect(),
        );
        avar
    }

    // wrap in a root element, and strip indentation
    fn xml_lines(avar: &Avar, registry: Option<&dyn AxisRegistry>) -> Vec<String> {
        let mut writer = XmlWriter::new(Options::default());
        writer.start_element("avar");
        avar.to_xml(&mut writer, registry);
        let text = writer.end_document();
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && *line != "<avar>" && *line != "</avar>")
            .map(String::from)
            .collect()
    }

    fn parse_segments(text: &str) -> Result<Avar, Error> {
        let root = Element::parse(text)?;
        Avar::from_xml(&root.children)
    }

    #[test]
    fn compile_reference() {
        let bytes = wdth_wght().compile(Some(&[WDTH, WGHT])).unwrap();
        assert_eq!(bytes, font_test_data::avar::WDTH_WGHT);
    }

    #[test]
    fn decompile_reference() {
        let avar = Avar::decompile(font_test_data::avar::WDTH_WGHT, Some(&[WDTH, WGHT])).unwrap();
        assert_eq!(avar.axis_tags().collect::<Vec<_>>(), [WDTH, WGHT]);
        assert!(approx_eq(
            avar.get_map(WDTH).unwrap(),
            &[(-1.0, -1.0), (0.0, 0.0), (0.2999878, 0.7999878), (1.0, 1.0)]
        ));
        assert!(approx_eq(
            avar.get_map(WGHT).unwrap(),
            &[(-1.0, -1.0), (0.0, 0.0), (1.0, 1.0)]
        ));
    }

    #[test]
    fn round_trip_exact_grid() {
        let mut avar = Avar::new();
        avar.set_map(
            OPSZ,
            [(-1.0, -1.0), (-0.5, -0.75), (0.0, 0.0), (0.25, 0.125), (1.0, 1.0)]
                .into_iter()
                .collect(),
        );
        avar.set_map(WGHT, SegmentMap::new());
        let registry = vec![WGHT, OPSZ];
        let bytes = avar.compile(Some(&registry)).unwrap();
        let decoded = Avar::decompile(&bytes, Some(&registry)).unwrap();
        assert_eq!(decoded, avar);
    }

    #[test]
    fn unsupported_version() {
        let err =
            Avar::decompile(font_test_data::avar::UNSUPPORTED_VERSION, Some(&[WDTH])).unwrap_err();
        assert_eq!(
            err,
            Error::UnsupportedVersion {
                tag: TAG,
                version: MajorMinor::new(513, 774)
            }
        );
        // the version is checked before the registry is needed
        assert!(matches!(
            Avar::decompile(font_test_data::avar::UNSUPPORTED_VERSION, None),
            Err(Error::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn order_follows_registry() {
        let a = Tag::new(b"AAAA");
        let b = Tag::new(b"BBBB");
        let mut avar = Avar::new();
        avar.set_map(b, [(-1.0, -1.0), (1.0, 1.0)].into_iter().collect());
        avar.set_map(a, [(0.5, 0.25)].into_iter().collect());

        let bytes = avar.compile(Some(&[a, b])).unwrap();
        #[rustfmt::skip]
        let expected = [
            0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02,
            0x00, 0x01, 0x20, 0x00, 0x10, 0x00,
            0x00, 0x02, 0xC0, 0x00, 0xC0, 0x00, 0x40, 0x00, 0x40, 0x00,
        ];
        assert_eq!(bytes, expected);
    }

    #[test]
    fn more_axes_than_registry() {
        let err = Avar::decompile(font_test_data::avar::WDTH_WGHT, Some(&[WDTH])).unwrap_err();
        assert_eq!(
            err,
            Error::RegistryMismatch {
                table_axes: 2,
                registry_axes: 1
            }
        );
    }

    #[test]
    fn fewer_axes_than_registry() {
        assert_eq!(
            Avar::decompile(font_test_data::avar::WDTH_WGHT, Some(&[WDTH, WGHT, OPSZ])),
            Err(Error::RegistryMismatch {
                table_axes: 2,
                registry_axes: 3
            })
        );
    }

    #[test]
    fn missing_registry() {
        assert_eq!(
            Avar::decompile(font_test_data::avar::WDTH_WGHT, None),
            Err(Error::MissingAxisRegistry)
        );
        assert_eq!(wdth_wght().compile(None), Err(Error::MissingAxisRegistry));
    }

    #[test]
    fn truncated() {
        assert_eq!(
            Avar::decompile(font_test_data::avar::TRUNCATED, Some(&[WDTH])),
            Err(Error::Read(crate::ReadError::OutOfBounds))
        );
    }

    #[test]
    fn out_of_range_is_an_error() {
        let mut avar = Avar::new();
        avar.set_map(WDTH, [(0.0, 2.5)].into_iter().collect());
        assert_eq!(
            avar.compile(Some(&[WDTH])),
            Err(Error::OutOfRange {
                axis: Some(WDTH),
                value: 2.5
            })
        );
    }

    #[test]
    fn unknown_axis_is_an_error() {
        let mut avar = Avar::new();
        avar.set_map(
            OPSZ,
            [(-1.0, -1.0), (0.5, 0.2), (1.0, 1.0)].into_iter().collect(),
        );
        assert_eq!(
            avar.compile(Some(&[WDTH])),
            Err(Error::UnknownAxis { axis: OPSZ })
        );
        // known axes don't hide the unknown one
        avar.set_map(WDTH, SegmentMap::new());
        assert_eq!(
            avar.compile(Some(&[WDTH])),
            Err(Error::UnknownAxis { axis: OPSZ })
        );
    }

    #[test]
    fn registry_axes_without_a_map_are_empty() {
        let mut avar = Avar::new();
        avar.set_map(WGHT, [(0.0, 0.0)].into_iter().collect());
        let bytes = avar.compile(Some(&[WDTH, WGHT])).unwrap();
        #[rustfmt::skip]
        let expected = [
            0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02,
            0x00, 0x00,
            0x00, 0x01, 0x00, 0x00, 0x00, 0x00,
        ];
        assert_eq!(bytes, expected);
    }

    #[test]
    fn duplicate_from_values_survive_binary_round_trip() {
        #[rustfmt::skip]
        let data = [
            0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01,
            0x00, 0x03,
            0xC0, 0x00, 0xC0, 0x00,
            0xC0, 0x00, 0xE0, 0x00,
            0x40, 0x00, 0x40, 0x00,
        ];
        let avar = Avar::decompile(&data, Some(&[WDTH])).unwrap();
        let map = avar.get_map(WDTH).unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(avar.compile(Some(&[WDTH])).unwrap(), data);
    }

    #[test]
    fn to_xml() {
        let mut avar = Avar::new();
        avar.set_map(
            OPSZ,
            [(-1.0, -1.0), (0.0, 0.0), (0.2999878, 0.7999878), (1.0, 1.0)]
                .into_iter()
                .collect(),
        );
        assert_eq!(
            xml_lines(&avar, Some(&[OPSZ])),
            [
                r#"<segment axis="opsz">"#,
                r#"<mapping from="-1.0" to="-1.0"/>"#,
                r#"<mapping from="0.0" to="0.0"/>"#,
                r#"<mapping from="0.3" to="0.8"/>"#,
                r#"<mapping from="1.0" to="1.0"/>"#,
                r#"</segment>"#,
            ]
        );
    }

    #[test]
    fn to_xml_axis_order() {
        let mut avar = Avar::new();
        avar.set_map(OPSZ, SegmentMap::new());
        avar.set_map(WGHT, SegmentMap::new());
        avar.set_map(WDTH, SegmentMap::new());
        let lines = xml_lines(&avar, Some(&[WDTH, WGHT]));
        assert_eq!(
            lines,
            [
                r#"<segment axis="wdth"/>"#,
                r#"<segment axis="wght"/>"#,
                r#"<segment axis="opsz"/>"#,
            ]
        );
        let lines = xml_lines(&avar, None);
        assert_eq!(lines[0], r#"<segment axis="opsz"/>"#);
    }

    #[test]
    fn to_xml_repeated_registry_axis() {
        let mut avar = Avar::new();
        avar.set_map(WDTH, [(0.0, 0.0)].into_iter().collect());
        assert_eq!(
            xml_lines(&avar, Some(&[WDTH, WDTH])),
            [
                r#"<segment axis="wdth">"#,
                r#"<mapping from="0.0" to="0.0"/>"#,
                r#"</segment>"#,
            ]
        );
    }

    #[test]
    fn from_xml() {
        let _ = env_logger::builder().is_test(true).try_init();
        let avar = parse_segments(
            r#"<avar>
                <version major="1" minor="0"/>
                <segment axis="wdth">
                    <mapping from="-1.0" to="-1.0"/>
                    <mapping from="0.0" to="0.0"/>
                    <mapping from="0.7" to="0.2"/>
                    <mapping from="1.0" to="1.0"/>
                </segment>
            </avar>"#,
        )
        .unwrap();
        assert_eq!(avar.axis_tags().collect::<Vec<_>>(), [WDTH]);
        assert!(approx_eq(
            avar.get_map(WDTH).unwrap(),
            &[(-1.0, -1.0), (0.0, 0.0), (0.7, 0.2), (1.0, 1.0)]
        ));
    }

    #[test]
    fn from_xml_errors() {
        assert_eq!(
            parse_segments(r#"<avar><segment><mapping from="0" to="0"/></segment></avar>"#),
            Err(Error::Text(TextError::MissingAttribute {
                element: "segment",
                attribute: "axis"
            }))
        );
        assert_eq!(
            parse_segments(r#"<avar><segment axis="wdth"><mapping to="0"/></segment></avar>"#),
            Err(Error::Text(TextError::MissingAttribute {
                element: "mapping",
                attribute: "from"
            }))
        );
        assert!(matches!(
            parse_segments(r#"<avar><segment axis="wd th"/></avar>"#),
            Err(Error::Text(TextError::InvalidTag { .. }))
        ));
        assert!(matches!(
            parse_segments(
                r#"<avar><segment axis="wdth"><mapping from="x" to="0"/></segment></avar>"#
            ),
            Err(Error::Text(TextError::InvalidNumber { .. }))
        ));
    }

    #[test]
    fn failed_element_leaves_table_unchanged() {
        let mut avar = wdth_wght();
        let before = avar.clone();
        let root = Element::parse(
            r#"<segment axis="wdth"><mapping from="0" to="0"/><mapping from="0"/></segment>"#,
        )
        .unwrap();
        assert!(avar.from_xml_element(&root).is_err());
        assert_eq!(avar, before);
    }

    #[test]
    fn text_round_trip() {
        let avar = wdth_wght();
        let mut writer = XmlWriter::new(Options::default());
        writer.start_element("avar");
        avar.to_xml(&mut writer, Some(&[WDTH, WGHT]));
        let text = writer.end_document();
        let parsed = parse_segments(&text).unwrap();
        assert_eq!(
            parsed.compile(Some(&[WDTH, WGHT])).unwrap(),
            avar.compile(Some(&[WDTH, WGHT])).unwrap()
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let avar = wdth_wght();
        let json = serde_json::to_string(&avar).unwrap();
        let loaded: Avar = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, avar);
    }

    #[test]
    fn segment_map_insert_replaces() {
        let mut map = SegmentMap::new();
        assert_eq!(map.insert(0.5, 0.1), None);
        assert_eq!(map.insert(-0.5, -0.1), None);
        assert_eq!(map.insert(0.5, 0.2), Some(0.1));
        assert_eq!(map.len(), 2);
        assert_eq!(
            map.iter().map(|p| p.from_coordinate).collect::<Vec<_>>(),
            [-0.5, 0.5]
        );
        assert_eq!(map.get(0.5), Some(0.2));
        assert_eq!(map.remove(-0.5), Some(-0.1));
        assert_eq!(map.get(-0.5), None);
    }

    #[test]
    fn segment_map_inspection() {
        let identity: SegmentMap = [(-1.0, -1.0), (0.0, 0.0), (1.0, 1.0)].into_iter().collect();
        assert!(identity.is_identity());
        assert!(identity.has_default_anchors());
        let map: SegmentMap = [(0.0, 0.0), (0.5, 0.8)].into_iter().collect();
        assert!(!map.is_identity());
        assert!(!map.has_default_anchors());
    }

    #[test]
    fn apply() {
        let map: SegmentMap = [(-1.0, -1.0), (0.0, 0.0), (0.5, 0.8), (1.0, 1.0)]
            .into_iter()
            .collect();
        assert_eq!(map.apply(0.5), 0.8);
        assert!((map.apply(0.25) - 0.4).abs() < 1e-9);
        assert!((map.apply(0.75) - 0.9).abs() < 1e-9);
        assert_eq!(map.apply(-0.5), -0.5);
        assert_eq!(SegmentMap::new().apply(0.3), 0.3);

        let shifted: SegmentMap = [(0.0, 0.1)].into_iter().collect();
        assert!((shifted.apply(0.5) - 0.6).abs() < 1e-9);
    }

    #[test]
    fn apply_with_nan_point() {
        let mut map = SegmentMap::new();
        map.insert(f64::NAN, 0.0);
        assert_eq!(map.apply(0.5), 0.5);

        let mut map: SegmentMap = [(-1.0, -1.0), (0.0, 0.0), (1.0, 1.0)].into_iter().collect();
        map.insert(f64::NAN, 0.5);
        for coord in [-2.0, -0.5, 0.0, 0.5, 2.0] {
            assert!(map.apply(coord).is_finite());
        }
    }
}
