//! JSON wire format.
//!
//! A record travels as an ordered array of stroke objects:
//!
//! ```text
//! [{"id": "s1", "color": "#1a1a2e", "width": 2.5,
//!   "points": [{"x": 10.0, "y": 12.5, "timestamp": 1042.0}, ...]}, ...]
//! ```
//!
//! This shape is the interoperability contract with storage and transport
//! collaborators; field names and nesting must not change.

use crate::error::RecordError;
use crate::model::StrokeRecord;

impl StrokeRecord {
    /// Encodes the record as compact JSON.
    pub fn to_json(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Encodes the record as indented JSON (used for files meant to be read by people).
    pub fn to_json_pretty(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decodes a record.
    ///
    /// Only the shape is checked. Invariants are left to [`StrokeRecord::validate`]
    /// so that stored records with defects still render what they can.
    pub fn from_json(src: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(src)?)
    }

    /// Decodes a record from raw bytes (file contents, request bodies).
    pub fn from_slice(bytes: &[u8]) -> Result<Self, RecordError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{Point, Stroke};

    use super::*;

    #[test]
    fn encodes_documented_shape() {
        let rec = StrokeRecord::from_strokes(vec![
            Stroke::new("s1", "#000", 2.0)
                .with_points([Point::new(1.0, 2.0, 0.0), Point::new(3.5, 4.0, 16.0)]),
        ]);
        assert_eq!(
            rec.to_json().unwrap(),
            r##"[{"id":"s1","color":"#000","width":2.0,"points":[{"x":1.0,"y":2.0,"timestamp":0.0},{"x":3.5,"y":4.0,"timestamp":16.0}]}]"##
        );
    }

    #[test]
    fn decodes_integer_numbers() {
        let src = r#"[{"id":"a","color":"blue","width":3,"points":[{"x":10,"y":20,"timestamp":100},{"x":11,"y":21,"timestamp":116}]}]"#;
        let rec = StrokeRecord::from_json(src).unwrap();
        assert_eq!(rec.len(), 1);
        let s = &rec.strokes()[0];
        assert_eq!(s.color, "blue");
        assert_eq!(s.width, 3.0);
        assert_eq!(s.points[1], Point::new(11.0, 21.0, 116.0));
    }

    #[test]
    fn empty_array_is_empty_record() {
        let rec = StrokeRecord::from_json("[]").unwrap();
        assert!(rec.is_empty());
        assert_eq!(rec.to_json().unwrap(), "[]");
    }

    #[test]
    fn decode_is_tolerant_of_invariant_breaks() {
        // A lone point is not drawable but still decodes.
        let src = r##"[{"id":"t","color":"#000","width":1,"points":[{"x":0,"y":0,"timestamp":0}]}]"##;
        let rec = StrokeRecord::from_json(src).unwrap();
        assert_eq!(rec.point_count(), 1);
        assert!(rec.validate().is_err());
    }

    #[test]
    fn missing_field_is_an_error() {
        let src = r#"[{"id":"a","width":1,"points":[]}]"#;
        assert!(matches!(StrokeRecord::from_json(src), Err(RecordError::Json(_))));
    }

    #[test]
    fn object_root_is_rejected() {
        assert!(StrokeRecord::from_json(r#"{"strokes":[]}"#).is_err());
    }

    #[test]
    fn pretty_output_decodes_to_same_record() {
        let rec = StrokeRecord::from_strokes(vec![
            Stroke::new("x", "rgb(10, 20, 30)", 1.5)
                .with_points([Point::new(0.25, 0.5, 3.0), Point::new(8.0, 9.0, 40.5)]),
        ]);
        let pretty = rec.to_json_pretty().unwrap();
        assert!(pretty.contains('\n'));
        assert_eq!(StrokeRecord::from_json(&pretty).unwrap(), rec);
    }
}
