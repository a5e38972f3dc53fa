//! The nested configuration value model produced by flag sources.
//!
//! Values carry their kind explicitly. Extraction decides the kind from the
//! flag's definition, so a flag set to `""`, `0`, `0.0` or `false` is
//! represented faithfully rather than being mistaken for an unset flag.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use figment::value::{Dict as FigmentDict, Num, Tag, Value};

/// A nested configuration map keyed by path segment.
///
/// Invariant: a key never holds a scalar and a sub-mapping simultaneously;
/// insertion rejects writes that would violate this.
pub type Dict = BTreeMap<String, FlagValue>;

/// A typed value read from a command-line flag, or a nested level of the
/// configuration map.
#[derive(Debug, Clone, PartialEq)]
pub enum FlagValue {
    /// A string value, including values of open kinds rendered to a string.
    Str(String),
    /// A signed integer value.
    Int(i64),
    /// An unsigned integer value.
    Uint(u64),
    /// A floating point value.
    Float(f64),
    /// A boolean value.
    Bool(bool),
    /// A duration value.
    Duration(Duration),
    /// A list of strings.
    StrList(Vec<String>),
    /// A list of signed integers.
    IntList(Vec<i64>),
    /// A list of unsigned integers.
    UintList(Vec<u64>),
    /// A list of floating point values.
    FloatList(Vec<f64>),
    /// A nested mapping.
    Dict(Dict),
}

impl FlagValue {
    /// Returns `true` for the nested-mapping variant.
    #[must_use]
    pub const fn is_dict(&self) -> bool {
        matches!(self, Self::Dict(_))
    }
}

impl fmt::Display for FlagValue {
    /// Renders the value back to a string, the inverse of the engine's
    /// parse-from-string step. Lists render comma-separated; mappings render
    /// their key count only.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Uint(u) => write!(f, "{u}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Duration(d) => write!(f, "{d:?}"),
            Self::StrList(xs) => f.write_str(&xs.join(",")),
            Self::IntList(xs) => f.write_str(&join_list(xs)),
            Self::UintList(xs) => f.write_str(&join_list(xs)),
            Self::FloatList(xs) => f.write_str(&join_list(xs)),
            Self::Dict(d) => write!(f, "{{{} keys}}", d.len()),
        }
    }
}

fn join_list<T: ToString>(xs: &[T]) -> String {
    let rendered: Vec<String> = xs.iter().map(ToString::to_string).collect();
    rendered.join(",")
}

/// Converts a nested [`Dict`] into figment's dictionary type.
#[must_use]
pub fn into_figment_dict(dict: Dict) -> FigmentDict {
    dict.into_iter().map(|(k, v)| (k, Value::from(v))).collect()
}

impl From<FlagValue> for Value {
    /// Durations convert to the `{secs, nanos}` mapping serde uses for
    /// `std::time::Duration`, so extraction round-trips into duration fields.
    fn from(value: FlagValue) -> Self {
        match value {
            FlagValue::Str(s) => Self::String(Tag::Default, s),
            FlagValue::Int(i) => Self::Num(Tag::Default, Num::I64(i)),
            FlagValue::Uint(u) => Self::Num(Tag::Default, Num::U64(u)),
            FlagValue::Float(x) => Self::Num(Tag::Default, Num::F64(x)),
            FlagValue::Bool(b) => Self::Bool(Tag::Default, b),
            FlagValue::Duration(d) => {
                let mut repr = FigmentDict::new();
                repr.insert("secs".to_owned(), Self::Num(Tag::Default, Num::U64(d.as_secs())));
                repr.insert(
                    "nanos".to_owned(),
                    Self::Num(Tag::Default, Num::U32(d.subsec_nanos())),
                );
                Self::Dict(Tag::Default, repr)
            }
            FlagValue::StrList(xs) => Self::Array(
                Tag::Default,
                xs.into_iter().map(|s| Self::String(Tag::Default, s)).collect(),
            ),
            FlagValue::IntList(xs) => Self::Array(
                Tag::Default,
                xs.into_iter().map(|i| Self::Num(Tag::Default, Num::I64(i))).collect(),
            ),
            FlagValue::UintList(xs) => Self::Array(
                Tag::Default,
                xs.into_iter().map(|u| Self::Num(Tag::Default, Num::U64(u))).collect(),
            ),
            FlagValue::FloatList(xs) => Self::Array(
                Tag::Default,
                xs.into_iter().map(|x| Self::Num(Tag::Default, Num::F64(x))).collect(),
            ),
            FlagValue::Dict(d) => Self::Dict(Tag::Default, into_figment_dict(d)),
        }
    }
}
