//! The converter registry: the extensible mapping from scalar type names to
//! decode/encode operations.
//!
//! A [`ConverterRegistry`] is an explicit value constructed once at startup
//! and passed by reference into parse and compose; there is no global
//! mutable state. [`ConverterRegistry::new`] registers the builtin types:
//!
//! `bool`, `string`, `int8`, `int16`, `int32`, `int64`, `uint8`, `uint16`,
//! `uint32`, `uint64`, `float`, `double` (plus the aliases `int` and `uint`
//! for `int32` and `uint32`).
//!
//! Integral decoding is saturating: numeric text outside the target type's
//! range clamps to the type's minimum or maximum instead of failing. Only
//! non-numeric text is a conversion error. This is a deliberate
//! lossy-but-total policy.
//!
//! ## Extending the registry
//!
//! New scalar types are added by registering a [`Converter`] before the
//! first parse; the core never special-cases type names:
//!
//! ```rust
//! use hrtds::{Converter, ConverterRegistry, Error, Scalar};
//!
//! #[derive(Debug, PartialEq)]
//! struct Hex(u32);
//!
//! impl hrtds::CustomScalar for Hex {
//!     fn encode(&self) -> String {
//!         format!("0x{:x}", self.0)
//!     }
//!     fn as_any(&self) -> &dyn std::any::Any {
//!         self
//!     }
//! }
//!
//! let registry = ConverterRegistry::new().with_converter(
//!     "hex",
//!     Converter::new(
//!         |text| {
//!             let digits = text.strip_prefix("0x").unwrap_or(text);
//!             u32::from_str_radix(digits, 16)
//!                 .map(|parsed| Scalar::custom(Hex(parsed)))
//!                 .map_err(|err| Error::conversion("hex", text, err))
//!         },
//!         |scalar| match scalar {
//!             Scalar::Custom(custom) => Ok(custom.encode()),
//!             other => Err(Error::Encode {
//!                 type_name: "hex".to_string(),
//!                 found: other.kind_name(),
//!             }),
//!         },
//!     ),
//! );
//!
//! let document = hrtds::from_str_with("${ &hex&Mask:0xff; }$", &registry).unwrap();
//! assert_eq!(
//!     document["Mask"].scalar().and_then(|s| s.downcast_ref::<Hex>()),
//!     Some(&Hex(255))
//! );
//! ```

use crate::error::{Error, Result};
use crate::glyph;
use crate::value::Scalar;
use indexmap::IndexMap;
use std::num::IntErrorKind;

type DecodeFn = Box<dyn Fn(&str) -> Result<Scalar> + Send + Sync>;
type EncodeFn = Box<dyn Fn(&Scalar) -> Result<String> + Send + Sync>;

/// The decode/encode pair registered for one scalar type name.
///
/// Decode turns grammar text into a [`Scalar`]; encode is its exact inverse.
/// No destroy operation is needed: scalar ownership is tied to the
/// [`Scalar`] variant and released on drop.
pub struct Converter {
    decode: DecodeFn,
    encode: EncodeFn,
}

impl Converter {
    pub fn new(
        decode: impl Fn(&str) -> Result<Scalar> + Send + Sync + 'static,
        encode: impl Fn(&Scalar) -> Result<String> + Send + Sync + 'static,
    ) -> Self {
        Converter {
            decode: Box::new(decode),
            encode: Box::new(encode),
        }
    }

    pub fn decode(&self, text: &str) -> Result<Scalar> {
        (self.decode)(text)
    }

    pub fn encode(&self, scalar: &Scalar) -> Result<String> {
        (self.encode)(scalar)
    }
}

impl std::fmt::Debug for Converter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Converter").finish_non_exhaustive()
    }
}

/// Maps scalar type names to their [`Converter`]s.
///
/// Populate it once at startup and pass it by reference into every parse
/// and compose call. Registration must complete before the first lookup;
/// the core itself never writes to the registry.
#[derive(Debug)]
pub struct ConverterRegistry {
    converters: IndexMap<String, Converter>,
}

macro_rules! register_integral {
    ($registry:expr, $name:literal, $ty:ty, $variant:ident) => {
        $registry.register(
            $name,
            Converter::new(
                |text| decode_integral::<$ty>($name, text).map(Scalar::$variant),
                |scalar| match scalar {
                    Scalar::$variant(value) => Ok(value.to_string()),
                    other => Err(Error::Encode {
                        type_name: $name.to_string(),
                        found: other.kind_name(),
                    }),
                },
            ),
        );
    };
}

impl ConverterRegistry {
    /// Creates a registry populated with the builtin scalar types.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = ConverterRegistry::empty();

        registry.register(
            "bool",
            Converter::new(
                |text| match text {
                    "true" | "1" => Ok(Scalar::Bool(true)),
                    "false" | "0" => Ok(Scalar::Bool(false)),
                    _ => Err(Error::conversion("bool", text, "expected true/false/1/0")),
                },
                |scalar| match scalar {
                    Scalar::Bool(value) => Ok(value.to_string()),
                    other => Err(Error::Encode {
                        type_name: "bool".to_string(),
                        found: other.kind_name(),
                    }),
                },
            ),
        );

        registry.register(
            "string",
            Converter::new(
                |text| Ok(Scalar::String(text.to_string())),
                |scalar| match scalar {
                    Scalar::String(value) => {
                        Ok(format!("{quote}{value}{quote}", quote = glyph::QUOTE))
                    }
                    other => Err(Error::Encode {
                        type_name: "string".to_string(),
                        found: other.kind_name(),
                    }),
                },
            ),
        );

        register_integral!(registry, "int8", i8, Int8);
        register_integral!(registry, "int16", i16, Int16);
        register_integral!(registry, "int32", i32, Int32);
        register_integral!(registry, "int64", i64, Int64);
        register_integral!(registry, "uint8", u8, UInt8);
        register_integral!(registry, "uint16", u16, UInt16);
        register_integral!(registry, "uint32", u32, UInt32);
        register_integral!(registry, "uint64", u64, UInt64);
        register_integral!(registry, "int", i32, Int32);
        register_integral!(registry, "uint", u32, UInt32);

        registry.register(
            "float",
            Converter::new(
                |text| {
                    text.parse::<f32>()
                        .map(Scalar::Float)
                        .map_err(|err| Error::conversion("float", text, err))
                },
                |scalar| match scalar {
                    Scalar::Float(value) => Ok(value.to_string()),
                    other => Err(Error::Encode {
                        type_name: "float".to_string(),
                        found: other.kind_name(),
                    }),
                },
            ),
        );

        registry.register(
            "double",
            Converter::new(
                |text| {
                    text.parse::<f64>()
                        .map(Scalar::Double)
                        .map_err(|err| Error::conversion("double", text, err))
                },
                |scalar| match scalar {
                    Scalar::Double(value) => Ok(value.to_string()),
                    other => Err(Error::Encode {
                        type_name: "double".to_string(),
                        found: other.kind_name(),
                    }),
                },
            ),
        );

        registry
    }

    /// Creates a registry with no converters at all.
    #[must_use]
    pub fn empty() -> Self {
        ConverterRegistry {
            converters: IndexMap::new(),
        }
    }

    /// Registers (or replaces) the converter for `name`.
    pub fn register(&mut self, name: &str, converter: Converter) {
        self.converters.insert(name.to_string(), converter);
    }

    /// Builder-style [`register`](Self::register).
    #[must_use]
    pub fn with_converter(mut self, name: &str, converter: Converter) -> Self {
        self.register(name, converter);
        self
    }

    /// Whether a converter is registered for `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.converters.contains_key(name)
    }

    /// Decodes scalar text under the converter registered for `type_name`.
    pub fn decode(&self, type_name: &str, text: &str) -> Result<Scalar> {
        self.converter(type_name)?.decode(text)
    }

    /// Encodes a scalar back to grammar text under the converter registered
    /// for `type_name`.
    pub fn encode(&self, type_name: &str, scalar: &Scalar) -> Result<String> {
        self.converter(type_name)?.encode(scalar)
    }

    fn converter(&self, type_name: &str) -> Result<&Converter> {
        self.converters
            .get(type_name)
            .ok_or_else(|| Error::unresolved_identifier(type_name))
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Saturating integral decode: numeric text outside the target range clamps
/// to the range bounds; only non-numeric text fails.
fn decode_integral<T>(type_name: &'static str, text: &str) -> Result<T>
where
    T: TryFrom<i128> + Bounded,
{
    let clamped = match text.parse::<i128>() {
        Ok(wide) => wide.clamp(T::MIN_WIDE, T::MAX_WIDE),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => T::MAX_WIDE,
            IntErrorKind::NegOverflow => T::MIN_WIDE,
            _ => {
                return Err(Error::conversion(
                    type_name,
                    text,
                    "not an integral number",
                ))
            }
        },
    };

    // The clamp above guarantees the value fits.
    T::try_from(clamped).map_err(|_| Error::conversion(type_name, text, "out of range"))
}

/// The integral range bounds widened to `i128`, for saturating decode.
trait Bounded {
    const MIN_WIDE: i128;
    const MAX_WIDE: i128;
}

macro_rules! bounded {
    ($($ty:ty),*) => {
        $(impl Bounded for $ty {
            const MIN_WIDE: i128 = <$ty>::MIN as i128;
            const MAX_WIDE: i128 = <$ty>::MAX as i128;
        })*
    };
}

bounded!(i8, i16, i32, i64, u8, u16, u32, u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_registered() {
        let registry = ConverterRegistry::new();
        for name in [
            "bool", "string", "int8", "int16", "int32", "int64", "uint8", "uint16", "uint32",
            "uint64", "float", "double", "int", "uint",
        ] {
            assert!(registry.contains(name), "missing builtin '{name}'");
        }
        assert!(!registry.contains("Point"));
    }

    #[test]
    fn integral_decode_saturates_out_of_range_text() {
        let registry = ConverterRegistry::new();

        assert_eq!(registry.decode("int8", "300").unwrap(), Scalar::Int8(127));
        assert_eq!(registry.decode("int8", "-300").unwrap(), Scalar::Int8(-128));
        assert_eq!(registry.decode("uint8", "-1").unwrap(), Scalar::UInt8(0));
        assert_eq!(
            registry.decode("uint64", "999999999999999999999999999999").unwrap(),
            Scalar::UInt64(u64::MAX)
        );
        assert_eq!(
            registry
                .decode("int64", "-999999999999999999999999999999999999999999")
                .unwrap(),
            Scalar::Int64(i64::MIN)
        );
    }

    #[test]
    fn non_numeric_integral_text_is_an_error() {
        let registry = ConverterRegistry::new();
        assert!(matches!(
            registry.decode("int32", "forty-two"),
            Err(Error::Conversion { .. })
        ));
        assert!(matches!(
            registry.decode("uint16", "1.5"),
            Err(Error::Conversion { .. })
        ));
    }

    #[test]
    fn bool_decode_is_strict() {
        let registry = ConverterRegistry::new();
        assert_eq!(registry.decode("bool", "true").unwrap(), Scalar::Bool(true));
        assert_eq!(registry.decode("bool", "0").unwrap(), Scalar::Bool(false));
        assert!(matches!(
            registry.decode("bool", "yes"),
            Err(Error::Conversion { .. })
        ));
    }

    #[test]
    fn string_encode_restores_quotes() {
        let registry = ConverterRegistry::new();
        let scalar = registry.decode("string", "A, B").unwrap();
        assert_eq!(registry.encode("string", &scalar).unwrap(), "\"A, B\"");
    }

    #[test]
    fn encode_rejects_mismatched_scalars() {
        let registry = ConverterRegistry::new();
        assert!(matches!(
            registry.encode("bool", &Scalar::Int32(1)),
            Err(Error::Encode { .. })
        ));
    }

    #[test]
    fn unknown_type_names_fail_lookup() {
        let registry = ConverterRegistry::new();
        assert!(matches!(
            registry.decode("quaternion", "1"),
            Err(Error::UnresolvedIdentifier { .. })
        ));
    }
}
