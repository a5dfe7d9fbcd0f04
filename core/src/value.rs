//! `ArgValue` and closely related types.

use core::{fmt, mem, ops, slice};

use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

/// Opaque wrapper for a [`Debug`](fmt::Debug)gable object captured as an argument
/// of a traced call.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DebugObject(String);

impl fmt::Debug for DebugObject {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// Returns the [`Debug`](fmt::Debug) representation of the object.
impl AsRef<str> for DebugObject {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Snapshot of a single value passed to a traced callable.
///
/// The variants form the closed set of categories the renderer distinguishes;
/// anything that does not fit a more specific category is captured eagerly via
/// its [`Debug`](fmt::Debug) output as [`Self::Object`], which makes rendering
/// total (it can never fail on an unrepresentable value).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ArgValue {
    /// Absent / null-like value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed integer value.
    Int(i128),
    /// Unsigned integer value.
    UInt(u128),
    /// Floating-point value.
    Float(f64),
    /// String value.
    String(String),
    /// Function value, identified by its display name.
    Callable(String),
    /// Opaque object implementing the [`Debug`](fmt::Debug) trait.
    Object(DebugObject),
}

impl ArgValue {
    /// Captures the [`Debug`](fmt::Debug) representation of the object.
    pub fn debug(object: &dyn fmt::Debug) -> Self {
        Self::Object(DebugObject(format!("{object:?}")))
    }

    /// Creates a value referencing a function by its display name.
    pub fn callable(name: impl Into<String>) -> Self {
        Self::Callable(name.into())
    }

    /// Returns value as a string, or `None` if it's not one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns value as a [`Debug`](fmt::Debug) string output, or `None` if this value
    /// is not [`Self::Object`].
    pub fn as_debug_str(&self) -> Option<&str> {
        match self {
            Self::Object(value) => Some(&value.0),
            _ => None,
        }
    }

    /// Checks whether this value is a [`DebugObject`] with the same [`Debug`](fmt::Debug)
    /// output as the provided `object`.
    pub fn is_debug(&self, object: &dyn fmt::Debug) -> bool {
        match self {
            Self::Object(value) => value.0 == format!("{object:?}"),
            _ => false,
        }
    }
}

impl<T: Into<ArgValue>> From<Option<T>> for ArgValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

macro_rules! impl_value_conversions {
    (ArgValue :: $variant:ident ($source:ty)) => {
        impl From<$source> for ArgValue {
            fn from(value: $source) -> Self {
                Self::$variant(value)
            }
        }

        impl PartialEq<$source> for ArgValue {
            fn eq(&self, other: &$source) -> bool {
                match self {
                    Self::$variant(value) => value == other,
                    _ => false,
                }
            }
        }

        impl PartialEq<ArgValue> for $source {
            fn eq(&self, other: &ArgValue) -> bool {
                other == self
            }
        }
    };

    (ArgValue :: $variant:ident ($source:ty as $field_ty:ty)) => {
        impl From<$source> for ArgValue {
            fn from(value: $source) -> Self {
                Self::$variant(value.into())
            }
        }

        impl PartialEq<$source> for ArgValue {
            fn eq(&self, other: &$source) -> bool {
                match self {
                    Self::$variant(value) => *value == <$field_ty>::from(*other),
                    _ => false,
                }
            }
        }

        impl PartialEq<ArgValue> for $source {
            fn eq(&self, other: &ArgValue) -> bool {
                other == self
            }
        }
    };
}

impl_value_conversions!(ArgValue::Bool(bool));
impl_value_conversions!(ArgValue::Int(i128));
impl_value_conversions!(ArgValue::Int(i64 as i128));
impl_value_conversions!(ArgValue::Int(i32 as i128));
impl_value_conversions!(ArgValue::UInt(u128));
impl_value_conversions!(ArgValue::UInt(u64 as u128));
impl_value_conversions!(ArgValue::UInt(u32 as u128));
impl_value_conversions!(ArgValue::Float(f64));

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl PartialEq<str> for ArgValue {
    fn eq(&self, other: &str) -> bool {
        match self {
            Self::String(value) => value == other,
            _ => false,
        }
    }
}

impl PartialEq<ArgValue> for str {
    fn eq(&self, other: &ArgValue) -> bool {
        other == self
    }
}

impl PartialEq<&str> for ArgValue {
    fn eq(&self, other: &&str) -> bool {
        match self {
            Self::String(value) => value == *other,
            _ => false,
        }
    }
}

impl PartialEq<ArgValue> for &str {
    fn eq(&self, other: &ArgValue) -> bool {
        other == self
    }
}

/// Insertion-ordered collection of named [`ArgValue`]s.
///
/// Functionally similar to a `HashMap<String, ArgValue>`, with the key difference that
/// the order of [iteration](Self::iter()) is the insertion order. If a value is updated,
/// it preserves its old placement.
#[derive(Clone, Default, PartialEq)]
pub struct TraceValues {
    inner: Vec<(String, ArgValue)>,
}

impl fmt::Debug for TraceValues {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = formatter.debug_map();
        for (key, value) in &self.inner {
            map.entry(&key.as_str(), value);
        }
        map.finish()
    }
}

impl TraceValues {
    /// Creates new empty values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored values.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Checks whether this collection of values is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the value with the specified name, or `None` if it is not set.
    pub fn get(&self, key: &str) -> Option<&ArgValue> {
        self.inner.iter().find_map(|(existing_key, value)| {
            if existing_key == key {
                Some(value)
            } else {
                None
            }
        })
    }

    /// Iterates over the contained name-value pairs.
    pub fn iter(&self) -> TraceValuesIter<'_> {
        TraceValuesIter {
            inner: self.inner.iter(),
        }
    }

    /// Inserts a value with the specified name. If a value with the same name was present
    /// previously, it is overwritten in place.
    pub fn insert(&mut self, key: impl Into<String>, value: ArgValue) -> Option<ArgValue> {
        let key = key.into();
        let position = self
            .inner
            .iter()
            .position(|(existing_key, _)| *existing_key == key);
        if let Some(position) = position {
            let place = &mut self.inner[position].1;
            Some(mem::replace(place, value))
        } else {
            self.inner.push((key, value));
            None
        }
    }
}

impl ops::Index<&str> for TraceValues {
    type Output = ArgValue;

    fn index(&self, index: &str) -> &Self::Output {
        self.get(index)
            .unwrap_or_else(|| panic!("value `{index}` is not defined"))
    }
}

impl<S: Into<String>> FromIterator<(S, ArgValue)> for TraceValues {
    fn from_iter<I: IntoIterator<Item = (S, ArgValue)>>(iter: I) -> Self {
        let mut this = Self::new();
        this.extend(iter);
        this
    }
}

impl<S: Into<String>> Extend<(S, ArgValue)> for TraceValues {
    fn extend<I: IntoIterator<Item = (S, ArgValue)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.inner.reserve(iter.size_hint().0);
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

impl IntoIterator for TraceValues {
    type Item = (String, ArgValue);
    type IntoIter = std::vec::IntoIter<(String, ArgValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

/// Iterator over name-value references returned from [`TraceValues::iter()`].
#[derive(Debug)]
pub struct TraceValuesIter<'a> {
    inner: slice::Iter<'a, (String, ArgValue)>,
}

impl<'a> Iterator for TraceValuesIter<'a> {
    type Item = (&'a str, &'a ArgValue);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(name, value)| (name.as_str(), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for TraceValuesIter<'_> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<'a> IntoIterator for &'a TraceValues {
    type Item = (&'a str, &'a ArgValue);
    type IntoIter = TraceValuesIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for TraceValues {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TraceValues {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MapVisitor;

        impl<'v> Visitor<'v> for MapVisitor {
            type Value = TraceValues;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("map of name-value entries")
            }

            fn visit_map<A: MapAccess<'v>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut values = TraceValues {
                    inner: Vec::with_capacity(map.size_hint().unwrap_or(0)),
                };
                while let Some((name, value)) = map.next_entry::<String, ArgValue>()? {
                    values.insert(name, value);
                }
                Ok(values)
            }
        }

        deserializer.deserialize_map(MapVisitor)
    }
}
