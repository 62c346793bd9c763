//! Serde serialization bridges.
//!
//! Parsed HRTDS data can be exported to any serde format: scalars
//! serialize as native primitives, arrays as sequences, struct instances as
//! maps keyed by their layout's field names, and a [`Document`] as a map of
//! its fields. Registry-added custom scalars serialize as their grammar
//! text.
//!
//! ```rust
//! let document = hrtds::from_str("${ &struct&P:{&int&X,&int&Y}; &P&Origin:(3,4); }$").unwrap();
//! let json = serde_json::to_value(&document).unwrap();
//! assert_eq!(json["Origin"]["X"], 3);
//! ```
//!
//! Deserialization is deliberately absent: an HRTDS document cannot be
//! reconstructed from untyped data without its struct layouts, so documents
//! are only ever built by [`Document::parse`].

use crate::document::Document;
use crate::value::{Scalar, Value};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

impl Serialize for Scalar {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Scalar::Bool(value) => serializer.serialize_bool(*value),
            Scalar::String(value) => serializer.serialize_str(value),
            Scalar::Int8(value) => serializer.serialize_i8(*value),
            Scalar::Int16(value) => serializer.serialize_i16(*value),
            Scalar::Int32(value) => serializer.serialize_i32(*value),
            Scalar::Int64(value) => serializer.serialize_i64(*value),
            Scalar::UInt8(value) => serializer.serialize_u8(*value),
            Scalar::UInt16(value) => serializer.serialize_u16(*value),
            Scalar::UInt32(value) => serializer.serialize_u32(*value),
            Scalar::UInt64(value) => serializer.serialize_u64(*value),
            Scalar::Float(value) => serializer.serialize_f32(*value),
            Scalar::Double(value) => serializer.serialize_f64(*value),
            Scalar::Custom(custom) => serializer.serialize_str(&custom.encode()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if let Some(scalar) = self.scalar() {
            return scalar.serialize(serializer);
        }

        if let Some(layout) = self.layout() {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (element, child) in layout.iter().zip(self.children()) {
                map.serialize_entry(&element.name, child)?;
            }
            return map.end();
        }

        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for child in self.children() {
            seq.serialize_element(child)?;
        }
        seq.end()
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields().len()))?;
        for (name, value) in self.fields() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
