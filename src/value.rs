//! Parsed runtime values.
//!
//! A [`Value`] holds exactly one of two payload shapes, determined by its
//! [`Identifier`]:
//!
//! - a [`Scalar`] decoded by the converter registry (builtin, not array), or
//! - an ordered list of child values, used both for arrays (homogeneous
//!   element type, arbitrary length) and for struct instances ("tuples":
//!   fixed length equal to the layout, each child typed positionally).
//!
//! A struct-instance value additionally carries its [`StructureLayout`] so
//! children can be looked up by field name (`value["X"]`) as well as by
//! position (`value[0]`).
//!
//! Values are move-only: a scalar payload is released exactly once when the
//! value drops, and children are exclusively owned.

use crate::convert::ConverterRegistry;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::glyph;
use crate::ident::{Identifier, IdentifierKind};
use crate::layout::StructureLayout;
use crate::token::ValueToken;
use std::any::Any;
use std::fmt;
use std::ops;

/// A scalar type added through the converter registry.
///
/// Registered converters wrap their decoded representation in
/// [`Scalar::Custom`]; `encode` must render the exact grammar text the
/// converter's decode accepts, and `as_any` enables
/// [`Scalar::downcast_ref`] back to the concrete type.
pub trait CustomScalar: fmt::Debug + Send + Sync {
    /// Renders the scalar back to its grammar text.
    fn encode(&self) -> String;

    /// The concrete value, for downcasting.
    fn as_any(&self) -> &dyn Any;
}

/// A decoded scalar datum.
///
/// The builtin kinds are closed variants; registry-added types live behind
/// the [`Custom`](Scalar::Custom) extension point. Ownership is automatic:
/// dropping the scalar releases its payload, so converters need no separate
/// destroy operation.
#[derive(Debug)]
pub enum Scalar {
    Bool(bool),
    String(String),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float(f32),
    Double(f64),
    Custom(Box<dyn CustomScalar>),
}

impl Scalar {
    /// Wraps a registry-added scalar.
    pub fn custom<T: CustomScalar + 'static>(value: T) -> Self {
        Scalar::Custom(Box::new(value))
    }

    /// Human-readable variant name, used in error messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Scalar::Bool(_) => "bool",
            Scalar::String(_) => "string",
            Scalar::Int8(_) => "int8",
            Scalar::Int16(_) => "int16",
            Scalar::Int32(_) => "int32",
            Scalar::Int64(_) => "int64",
            Scalar::UInt8(_) => "uint8",
            Scalar::UInt16(_) => "uint16",
            Scalar::UInt32(_) => "uint32",
            Scalar::UInt64(_) => "uint64",
            Scalar::Float(_) => "float",
            Scalar::Double(_) => "double",
            Scalar::Custom(_) => "custom",
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(value) => Some(value),
            _ => None,
        }
    }

    /// Widens any integral scalar that fits into an `i64`.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Int8(value) => Some(i64::from(*value)),
            Scalar::Int16(value) => Some(i64::from(*value)),
            Scalar::Int32(value) => Some(i64::from(*value)),
            Scalar::Int64(value) => Some(*value),
            Scalar::UInt8(value) => Some(i64::from(*value)),
            Scalar::UInt16(value) => Some(i64::from(*value)),
            Scalar::UInt32(value) => Some(i64::from(*value)),
            Scalar::UInt64(value) => i64::try_from(*value).ok(),
            _ => None,
        }
    }

    /// Widens any non-negative integral scalar into a `u64`.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Scalar::UInt8(value) => Some(u64::from(*value)),
            Scalar::UInt16(value) => Some(u64::from(*value)),
            Scalar::UInt32(value) => Some(u64::from(*value)),
            Scalar::UInt64(value) => Some(*value),
            Scalar::Int8(value) => u64::try_from(*value).ok(),
            Scalar::Int16(value) => u64::try_from(*value).ok(),
            Scalar::Int32(value) => u64::try_from(*value).ok(),
            Scalar::Int64(value) => u64::try_from(*value).ok(),
            _ => None,
        }
    }

    /// Widens `float` and `double` scalars into an `f64`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Float(value) => Some(f64::from(*value)),
            Scalar::Double(value) => Some(*value),
            _ => None,
        }
    }

    /// Downcasts a [`Scalar::Custom`] payload to its concrete type.
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        match self {
            Scalar::Custom(custom) => custom.as_any().downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            (Scalar::String(a), Scalar::String(b)) => a == b,
            (Scalar::Int8(a), Scalar::Int8(b)) => a == b,
            (Scalar::Int16(a), Scalar::Int16(b)) => a == b,
            (Scalar::Int32(a), Scalar::Int32(b)) => a == b,
            (Scalar::Int64(a), Scalar::Int64(b)) => a == b,
            (Scalar::UInt8(a), Scalar::UInt8(b)) => a == b,
            (Scalar::UInt16(a), Scalar::UInt16(b)) => a == b,
            (Scalar::UInt32(a), Scalar::UInt32(b)) => a == b,
            (Scalar::UInt64(a), Scalar::UInt64(b)) => a == b,
            (Scalar::Float(a), Scalar::Float(b)) => a == b,
            (Scalar::Double(a), Scalar::Double(b)) => a == b,
            // Custom scalars compare through their grammar text.
            (Scalar::Custom(a), Scalar::Custom(b)) => a.encode() == b.encode(),
            _ => false,
        }
    }
}

/// The payload of a value: a scalar or exclusively-owned children, never
/// both.
#[derive(Debug, PartialEq)]
enum Payload {
    Scalar(Scalar),
    Composite(Vec<Value>),
}

/// A parsed datum: a scalar, an array of values, or a struct instance.
#[derive(Debug, PartialEq)]
pub struct Value {
    identifier: Identifier,
    payload: Payload,
    /// Present only on struct instances; enables field-name lookup.
    layout: Option<StructureLayout>,
}

impl Value {
    pub(crate) fn from_scalar(identifier: Identifier, scalar: Scalar) -> Self {
        Value {
            identifier,
            payload: Payload::Scalar(scalar),
            layout: None,
        }
    }

    pub(crate) fn from_array(identifier: Identifier, children: Vec<Value>) -> Self {
        Value {
            identifier,
            payload: Payload::Composite(children),
            layout: None,
        }
    }

    pub(crate) fn from_tuple(
        identifier: Identifier,
        children: Vec<Value>,
        layout: StructureLayout,
    ) -> Self {
        Value {
            identifier,
            payload: Payload::Composite(children),
            layout: Some(layout),
        }
    }

    /// The declared type of this value.
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// The scalar payload, if this value is not an array or struct instance.
    #[must_use]
    pub fn scalar(&self) -> Option<&Scalar> {
        match &self.payload {
            Payload::Scalar(scalar) => Some(scalar),
            Payload::Composite(_) => None,
        }
    }

    /// The child values of an array or struct instance; empty for scalars.
    pub fn children(&self) -> &[Value] {
        match &self.payload {
            Payload::Scalar(_) => &[],
            Payload::Composite(children) => children,
        }
    }

    /// The layout of a struct instance.
    pub fn layout(&self) -> Option<&StructureLayout> {
        self.layout.as_ref()
    }

    /// The number of child values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children().is_empty()
    }

    /// Positional child lookup.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.children().get(index)
    }

    /// Field-name child lookup on a struct instance.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        let position = self.layout.as_ref()?.position(name)?;
        self.get(position)
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        self.scalar().and_then(Scalar::as_bool)
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.scalar().and_then(Scalar::as_str)
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.scalar().and_then(Scalar::as_i64)
    }

    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        self.scalar().and_then(Scalar::as_u64)
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.scalar().and_then(Scalar::as_f64)
    }

    /// Recursively builds a value from a token, validating literal shape,
    /// array homogeneity, and tuple arity against the declared identifier.
    pub(crate) fn build(
        identifier: Identifier,
        token: &ValueToken,
        registry: &ConverterRegistry,
        document: &Document,
    ) -> Result<Value> {
        if identifier.is_array() {
            let ValueToken::Array(items) = token else {
                return Err(Error::ValueShape {
                    type_name: identifier.to_string(),
                    expected: "an array literal '[...]'",
                    found: token.kind_name(),
                });
            };

            let element = identifier.element();
            let children = items
                .iter()
                .map(|item| Value::build(element.clone(), item, registry, document))
                .collect::<Result<Vec<_>>>()?;
            return Ok(Value::from_array(identifier, children));
        }

        match identifier.kind() {
            IdentifierKind::StructReference => {
                let ValueToken::Tuple(items) = token else {
                    return Err(Error::ValueShape {
                        type_name: identifier.to_string(),
                        expected: "a tuple literal '(...)'",
                        found: token.kind_name(),
                    });
                };

                let layout = document
                    .structure(identifier.name())
                    .ok_or_else(|| Error::unresolved_identifier(identifier.name()))?
                    .clone();
                if items.len() != layout.len() {
                    return Err(Error::arity_mismatch(
                        identifier.name(),
                        layout.len(),
                        items.len(),
                    ));
                }

                let children = items
                    .iter()
                    .zip(layout.iter())
                    .map(|(item, element)| {
                        Value::build(element.identifier.clone(), item, registry, document)
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Value::from_tuple(identifier, children, layout))
            }
            IdentifierKind::Builtin => {
                let ValueToken::Data(text) = token else {
                    return Err(Error::ValueShape {
                        type_name: identifier.to_string(),
                        expected: "raw scalar text",
                        found: token.kind_name(),
                    });
                };

                let scalar = registry.decode(identifier.name(), text)?;
                Ok(Value::from_scalar(identifier, scalar))
            }
        }
    }

    /// Renders this value back to grammar text, the exact structural inverse
    /// of [`Value::build`].
    ///
    /// Composite values expand across multiple lines when the value is a
    /// struct-typed array or when any child is itself composite; otherwise
    /// the list stays on one line.
    pub(crate) fn compose(&self, registry: &ConverterRegistry, level: usize) -> Result<String> {
        let children = match &self.payload {
            Payload::Scalar(scalar) => {
                return registry.encode(self.identifier.name(), scalar);
            }
            Payload::Composite(children) => children,
        };

        let expand_as_array = self.identifier.is_array()
            && self.identifier.kind() == IdentifierKind::StructReference;
        let expand_from_children = children
            .iter()
            .any(|child| child.identifier.is_composite());
        let expand = expand_as_array || expand_from_children;

        let (begin, end) = if self.identifier.is_array() {
            (glyph::BEGIN_ARRAY, glyph::END_ARRAY)
        } else {
            (glyph::BEGIN_TUPLE, glyph::END_TUPLE)
        };

        let mut composed = String::new();
        composed.push(begin);
        if expand {
            composed.push('\n');
        }

        for (index, child) in children.iter().enumerate() {
            if index > 0 {
                composed.push(glyph::LIST_SEPARATOR);
                composed.push(' ');
                if expand {
                    composed.push('\n');
                }
            }
            if expand {
                for _ in 0..=level {
                    composed.push('\t');
                }
            }
            composed.push_str(&child.compose(registry, level + 1)?);
        }

        if expand {
            composed.push('\n');
            for _ in 0..level {
                composed.push('\t');
            }
        }
        composed.push(end);

        Ok(composed)
    }
}

impl ops::Index<usize> for Value {
    type Output = Value;

    /// Positional child access. Panics when out of bounds; use
    /// [`Value::get`] for a checked lookup.
    fn index(&self, index: usize) -> &Value {
        &self.children()[index]
    }
}

impl ops::Index<&str> for Value {
    type Output = Value;

    /// Field-name child access on a struct instance. Panics when the field
    /// is unknown or the value carries no layout; use [`Value::field`] for a
    /// checked lookup.
    fn index(&self, name: &str) -> &Value {
        self.field(name)
            .unwrap_or_else(|| panic!("no field named '{name}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Document {
        let registry = ConverterRegistry::new();
        Document::parse(text, &registry).unwrap()
    }

    #[test]
    fn scalar_values_compose_without_brackets() {
        let registry = ConverterRegistry::new();
        let document = parse("${ &int&Age:32; }$");
        let composed = document["Age"].compose(&registry, 0).unwrap();
        assert_eq!(composed, "32");
    }

    #[test]
    fn scalar_arrays_stay_on_one_line() {
        let registry = ConverterRegistry::new();
        let document = parse("${ &int[]&Nums:[1,2,3]; }$");
        let composed = document["Nums"].compose(&registry, 0).unwrap();
        assert_eq!(composed, "[1, 2, 3]");
    }

    #[test]
    fn struct_typed_arrays_always_expand() {
        let registry = ConverterRegistry::new();
        let document = parse("${ &struct&P:{&int&X,&int&Y}; &P[]&Points:[(1,2)]; }$");
        let composed = document["Points"].compose(&registry, 0).unwrap();
        assert_eq!(composed, "[\n\t(1, 2)\n]");
    }

    #[test]
    fn composite_children_propagate_expansion() {
        let registry = ConverterRegistry::new();
        let document = parse("${ &struct&B:{&int[]&Ns}; &B&Bag:([1,2]); }$");
        let composed = document["Bag"].compose(&registry, 0).unwrap();
        assert_eq!(composed, "(\n\t[1, 2]\n)");
    }

    #[test]
    fn field_lookup_uses_the_layout() {
        let document = parse("${ &struct&P:{&int&X,&int&Y}; &P&Origin:(3,4); }$");
        let origin = &document["Origin"];

        assert_eq!(origin.len(), 2);
        assert_eq!(origin[0].as_i64(), Some(3));
        assert_eq!(origin["Y"].as_i64(), Some(4));
        assert!(origin.field("Z").is_none());
    }

    #[test]
    fn arity_is_validated_against_the_layout() {
        let registry = ConverterRegistry::new();
        let result = Document::parse("${ &struct&P:{&int&X,&int&Y}; &P&Origin:(1,2,3); }$", &registry);
        assert!(matches!(
            result,
            Err(Error::ArityMismatch {
                expected: 2,
                found: 3,
                ..
            })
        ));
    }

    #[test]
    fn literal_shape_is_validated() {
        let registry = ConverterRegistry::new();

        let result = Document::parse("${ &int[]&Nums:5; }$", &registry);
        assert!(matches!(result, Err(Error::ValueShape { .. })));

        let result = Document::parse("${ &struct&P:{&int&X}; &P&Origin:7; }$", &registry);
        assert!(matches!(result, Err(Error::ValueShape { .. })));

        let result = Document::parse("${ &int&Age:(1); }$", &registry);
        assert!(matches!(result, Err(Error::ValueShape { .. })));
    }
}
