use std::collections::BTreeMap;

/// What a structure reports about one of its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldValue {
    /// Any signed integer width, widened.
    Signed(i64),
    /// Any unsigned integer width, widened.
    Unsigned(u64),
    /// A field that is not an integer.
    Other,
}

impl FieldValue {
    /// The value as a signed 64-bit integer, if it is an integer that fits.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            FieldValue::Signed(v) => Some(v),
            FieldValue::Unsigned(v) => i64::try_from(v).ok(),
            FieldValue::Other => None,
        }
    }

    pub fn is_integer(&self) -> bool {
        !matches!(self, FieldValue::Other)
    }
}

/// Read access to the fields of a structure instance, by name.
///
/// The resolver uses this to turn symbolic lengths and offsets such as
/// `len:Count` into the value currently held by the sibling field `Count`.
/// Implement it by hand, with [`impl_field_accessor!`], or use [`Fields`].
///
/// [`impl_field_accessor!`]: crate::impl_field_accessor
pub trait FieldAccessor {
    /// Returns `None` when the structure has no field called `name`.
    fn field_value(&self, name: &str) -> Option<FieldValue>;

    /// The integer value of field `name`, or `None` if it is missing, not
    /// an integer, or does not fit in an `i64`.
    fn integer_field(&self, name: &str) -> Option<i64> {
        self.field_value(name).and_then(|value| value.as_i64())
    }
}

impl<T: FieldAccessor + ?Sized> FieldAccessor for &T {
    fn field_value(&self, name: &str) -> Option<FieldValue> {
        (**self).field_value(name)
    }
}

impl<T: FieldAccessor + ?Sized> FieldAccessor for Box<T> {
    fn field_value(&self, name: &str) -> Option<FieldValue> {
        (**self).field_value(name)
    }
}

/// Conversion of a field's current value into a [`FieldValue`].
pub trait AsFieldValue {
    fn as_field_value(&self) -> FieldValue;
}

macro_rules! signed_field_value {
    ($($t:ty),*) => {
        $(
            impl AsFieldValue for $t {
                fn as_field_value(&self) -> FieldValue {
                    FieldValue::Signed(*self as i64)
                }
            }

            impl From<$t> for FieldValue {
                fn from(value: $t) -> Self { value.as_field_value() }
            }
        )*
    };
}

macro_rules! unsigned_field_value {
    ($($t:ty),*) => {
        $(
            impl AsFieldValue for $t {
                fn as_field_value(&self) -> FieldValue {
                    FieldValue::Unsigned(*self as u64)
                }
            }

            impl From<$t> for FieldValue {
                fn from(value: $t) -> Self { value.as_field_value() }
            }
        )*
    };
}

macro_rules! other_field_value {
    ($($t:ty),*) => {
        $(
            impl AsFieldValue for $t {
                fn as_field_value(&self) -> FieldValue { FieldValue::Other }
            }
        )*
    };
}

signed_field_value!(i8, i16, i32, i64, isize);
unsigned_field_value!(u8, u16, u32, u64, usize);
other_field_value!(bool, char, f32, f64, String, str);

impl<T> AsFieldValue for Vec<T> {
    fn as_field_value(&self) -> FieldValue { FieldValue::Other }
}

impl<T, const N: usize> AsFieldValue for [T; N] {
    fn as_field_value(&self) -> FieldValue { FieldValue::Other }
}

impl<T> AsFieldValue for Option<T> {
    fn as_field_value(&self) -> FieldValue { FieldValue::Other }
}

impl<T: AsFieldValue + ?Sized> AsFieldValue for Box<T> {
    fn as_field_value(&self) -> FieldValue { (**self).as_field_value() }
}

/// An ordered registry of named field values.
///
/// Useful when the decoding engine keeps already-decoded values in its own
/// storage rather than in a Rust struct.
///
/// # Example
///
/// ```rust
/// # use bintag_parse::{ FieldAccessor, FieldValue, Fields };
/// let fields = Fields::new()
///     .with("Count", 3u16)
///     .with("Name", FieldValue::Other);
/// assert_eq!(fields.integer_field("Count"), Some(3));
/// assert_eq!(fields.integer_field("Name"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    values: BTreeMap<String, FieldValue>,
}

impl Fields {
    pub fn new() -> Self { Self::default() }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets a field, returning its previous value.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.values.insert(name.into(), value.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.values.remove(name)
    }

    pub fn len(&self) -> usize { self.values.len() }

    pub fn is_empty(&self) -> bool { self.values.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, FieldValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

impl FieldAccessor for Fields {
    fn field_value(&self, name: &str) -> Option<FieldValue> {
        self.values.get(name).copied()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (name, value) in iter {
            fields.insert(name, value);
        }
        fields
    }
}

/// Implements [`FieldAccessor`] for a struct by listing the fields that tags
/// may reference. Every listed field's type must implement [`AsFieldValue`].
///
/// # Example
///
/// ```rust
/// # use bintag_parse::{ impl_field_accessor, FieldAccessor, FieldValue };
/// struct Header {
///     count: u32,
///     data_offset: i16,
///     name: String,
/// }
///
/// impl_field_accessor!(Header { count, data_offset, name });
///
/// let header = Header { count: 4, data_offset: -2, name: "hdr".into() };
/// assert_eq!(header.field_value("count"), Some(FieldValue::Unsigned(4)));
/// assert_eq!(header.integer_field("data_offset"), Some(-2));
/// assert_eq!(header.field_value("name"), Some(FieldValue::Other));
/// assert_eq!(header.field_value("missing"), None);
/// ```
#[macro_export]
macro_rules! impl_field_accessor {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::FieldAccessor for $ty {
            fn field_value(&self, name: &str) -> Option<$crate::FieldValue> {
                match name {
                    $(
                        stringify!($field) => {
                            Some($crate::AsFieldValue::as_field_value(&self.$field))
                        }
                    )*
                    _ => None,
                }
            }
        }
    };
}
