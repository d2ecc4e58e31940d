// Loosely typed values and ordered arrays

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;

/// Array key: either an integer index or a string name.
///
/// Names that are canonical decimal integers (`"7"`, `"-3"`, but not `"07"`
/// or `"-0"`) become indexes, so `"7"` and `7` address the same slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Index(i64),
    Name(String),
}

impl Key {
    pub fn as_index(&self) -> Option<i64> {
        match self {
            Key::Index(i) => Some(*i),
            Key::Name(_) => None,
        }
    }
}

fn canonical_index(name: &str) -> Option<i64> {
    let digits = name.strip_prefix('-').unwrap_or(name);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    if name == "-0" {
        return None;
    }
    name.parse().ok()
}

impl From<i64> for Key {
    fn from(index: i64) -> Self {
        Key::Index(index)
    }
}

impl From<i32> for Key {
    fn from(index: i32) -> Self {
        Key::Index(index.into())
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(i64::try_from(index).unwrap_or(i64::MAX))
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        match canonical_index(name) {
            Some(i) => Key::Index(i),
            None => Key::Name(name.to_string()),
        }
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        match canonical_index(&name) {
            Some(i) => Key::Index(i),
            None => Key::Name(name),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{i}"),
            Key::Name(name) => f.write_str(name),
        }
    }
}

/// A loosely typed value, as found in request input, query strings or
/// configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Array(Array),
}

impl Value {
    /// Truthiness: null, `false`, `0`, `0.0`, `""`, `"0"` and the empty
    /// array are falsy, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !(s.is_empty() || s == "0"),
            Value::Array(arr) => !arr.is_empty(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view of ints and floats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Name of the variant, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
        }
    }

    /// Convert into a `serde_json::Value`. Lists become JSON arrays, keyed
    /// arrays become objects, non-finite floats become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Str(s) => serde_json::Value::String(s.clone()),
            Value::Array(arr) if arr.is_list() => {
                serde_json::Value::Array(arr.values().map(Value::to_json).collect())
            }
            Value::Array(arr) => serde_json::Value::Object(
                arr.iter()
                    .map(|(key, value)| (key.to_string(), value.to_json()))
                    .collect(),
            ),
        }
    }
}

/// Significant digits kept when a float becomes a string.
const FLOAT_PRECISION: usize = 14;

/// Render a finite float the way loosely typed string conversion does:
/// rounded to [`FLOAT_PRECISION`] significant digits, positional notation
/// while the decimal exponent is in `-4..14`, otherwise `1.5E+20` style.
fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x == 0.0 {
        return f.write_str(if x.is_sign_negative() { "-0" } else { "0" });
    }

    let scientific = format!("{:.*e}", FLOAT_PRECISION - 1, x);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return write!(f, "{x}");
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return write!(f, "{x}");
    };
    let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');

    if !(-4..FLOAT_PRECISION as i32).contains(&exponent) {
        let dot = if mantissa.contains('.') { "" } else { ".0" };
        let sign = if exponent < 0 { '-' } else { '+' };
        return write!(f, "{mantissa}{dot}E{sign}{}", exponent.abs());
    }

    let (negative, digits) = match mantissa.strip_prefix('-') {
        Some(rest) => (true, rest.replace('.', "")),
        None => (false, mantissa.replace('.', "")),
    };
    if negative {
        f.write_str("-")?;
    }

    // Position of the decimal point within `digits`.
    let point = exponent + 1;
    if point <= 0 {
        write!(f, "0.{}{digits}", "0".repeat(point.unsigned_abs() as usize))
    } else {
        let point = point as usize;
        if digits.len() <= point {
            write!(f, "{digits}{}", "0".repeat(point - digits.len()))
        } else {
            write!(f, "{}.{}", &digits[..point], &digits[point..])
        }
    }
}

/// String conversion used when joining: `true` is `"1"`, `false` and null
/// are empty, floats keep 14 significant digits and switch to exponent form
/// (`1.0E+20`, `1.0E-7`) outside `1e-4..1e14`, arrays render as `"Array"`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null | Value::Bool(false) => Ok(()),
            Value::Bool(true) => f.write_str("1"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) if x.is_nan() => f.write_str("NAN"),
            Value::Float(x) if x.is_infinite() => {
                f.write_str(if *x > 0.0 { "INF" } else { "-INF" })
            }
            Value::Float(x) => write_float(f, *x),
            Value::Str(s) => f.write_str(s),
            Value::Array(_) => f.write_str("Array"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i.into())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Array> for Value {
    fn from(arr: Array) -> Self {
        Value::Array(arr)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::Array(values.into_iter().collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(fields) => Value::Array(
                fields
                    .into_iter()
                    .map(|(k, v)| (Key::from(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Array(arr) => arr.serialize(serializer),
        }
    }
}

/// Ordered key/value container.
///
/// Keeps insertion order. `push` appends under the next free integer index
/// (one past the largest integer key inserted so far, never below zero).
/// Lookups are linear, which is fine for the input-sized data this type
/// carries.
#[derive(Debug, Clone, Default)]
pub struct Array {
    entries: Vec<(Key, Value)>,
    next_index: i64,
}

impl Array {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append under the next free integer index.
    pub fn push(&mut self, value: impl Into<Value>) {
        let key = Key::Index(self.next_index);
        self.next_index = self.next_index.saturating_add(1);
        self.entries.push((key, value.into()));
    }

    /// Insert or replace. A replaced entry keeps its position; the previous
    /// value is returned.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.get_mut(&key) {
            return Some(std::mem::replace(slot, value));
        }
        if let Key::Index(i) = key {
            self.next_index = self.next_index.max(i.saturating_add(1));
        }
        self.entries.push((key, value));
        None
    }

    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &Key) -> Option<&mut Value> {
        self.entries.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &Key) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &Key) -> Option<Value> {
        let position = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(position).1)
    }

    /// Last entry in insertion order.
    pub fn last(&self) -> Option<(&Key, &Value)> {
        self.entries.last().map(|(k, v)| (k, v))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&Key, &mut Value)> {
        self.entries.iter_mut().map(|(k, v)| (&*k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// True when the keys are exactly `0, 1, 2, ...` in order.
    pub fn is_list(&self) -> bool {
        self.entries
            .iter()
            .enumerate()
            .all(|(i, (k, _))| k.as_index() == i64::try_from(i).ok())
    }
}

/// Arrays compare by their entries in order.
impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl IntoIterator for Array {
    type Item = (Key, Value);
    type IntoIter = std::vec::IntoIter<(Key, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let mut arr = Array::new();
        for value in iter {
            arr.push(value);
        }
        arr
    }
}

impl FromIterator<(Key, Value)> for Array {
    fn from_iter<I: IntoIterator<Item = (Key, Value)>>(iter: I) -> Self {
        let mut arr = Array::new();
        for (key, value) in iter {
            arr.insert(key, value);
        }
        arr
    }
}

impl From<Vec<Value>> for Array {
    fn from(values: Vec<Value>) -> Self {
        values.into_iter().collect()
    }
}

impl Serialize for Array {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_list() {
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for value in self.values() {
                seq.serialize_element(value)?;
            }
            seq.end()
        } else {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (key, value) in self.iter() {
                map.serialize_entry(&key.to_string(), value)?;
            }
            map.end()
        }
    }
}

/// Build an [`Array`].
///
/// ```rust
/// use garavel_support::{array, Value};
///
/// let list = array!["a", 1, true];
/// assert_eq!(list.len(), 3);
///
/// let user = array! { "name" => "ada", "age" => 36 };
/// assert_eq!(user.get(&"name".into()), Some(&Value::from("ada")));
/// ```
#[macro_export]
macro_rules! array {
    () => {
        $crate::Array::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut arr = $crate::Array::new();
        $( arr.insert($crate::Key::from($key), $crate::Value::from($value)); )+
        arr
    }};
    ($($value:expr),+ $(,)?) => {{
        let mut arr = $crate::Array::new();
        $( arr.push($crate::Value::from($value)); )+
        arr
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_names_become_indexes() {
        assert_eq!(Key::from("7"), Key::Index(7));
        assert_eq!(Key::from("-3"), Key::Index(-3));
        assert_eq!(Key::from("07"), Key::Name("07".to_string()));
        assert_eq!(Key::from("-0"), Key::Name("-0".to_string()));
        assert_eq!(Key::from("1.5"), Key::Name("1.5".to_string()));
        assert_eq!(Key::from(""), Key::Name(String::new()));
    }

    #[test]
    fn test_push_continues_after_largest_index() {
        let mut arr = Array::new();
        arr.insert(5, "five");
        arr.push("six");
        arr.insert("name", "x");
        arr.push("seven");

        let keys: Vec<Key> = arr.keys().cloned().collect();
        assert_eq!(
            keys,
            vec![Key::Index(5), Key::Index(6), Key::from("name"), Key::Index(7)]
        );
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut arr = array!["a", "b", "c"];
        let previous = arr.insert(1, "B");

        assert_eq!(previous, Some(Value::from("b")));
        assert_eq!(arr, array!["a", "B", "c"]);
    }

    #[test]
    fn test_is_list() {
        assert!(Array::new().is_list());
        assert!(array![1, 2].is_list());

        let mut gap = array![1, 2, 3];
        gap.remove(&Key::Index(1));
        assert!(!gap.is_list());

        assert!(!array! { "a" => 1 }.is_list());
    }

    #[test]
    fn test_truthiness() {
        for falsy in [
            Value::Null,
            Value::Bool(false),
            Value::Int(0),
            Value::Float(0.0),
            Value::from(""),
            Value::from("0"),
            Value::Array(Array::new()),
        ] {
            assert!(!falsy.is_truthy(), "{falsy:?} should be falsy");
        }

        for truthy in [
            Value::Bool(true),
            Value::Int(-1),
            Value::Float(0.5),
            Value::from("0.0"),
            Value::from("false"),
            Value::from(array![0]),
        ] {
            assert!(truthy.is_truthy(), "{truthy:?} should be truthy");
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Bool(true).to_string(), "1");
        assert_eq!(Value::Bool(false).to_string(), "");
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::Float(1.0).to_string(), "1");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::Float(f64::INFINITY).to_string(), "INF");
        assert_eq!(Value::from(array![1]).to_string(), "Array");
    }

    #[test]
    fn test_display_float_forms() {
        assert_eq!(Value::Float(1e20).to_string(), "1.0E+20");
        assert_eq!(Value::Float(1.5e20).to_string(), "1.5E+20");
        assert_eq!(Value::Float(1e-7).to_string(), "1.0E-7");
        assert_eq!(Value::Float(-2.5e-6).to_string(), "-2.5E-6");
        assert_eq!(Value::Float(1e13).to_string(), "10000000000000");
        assert_eq!(Value::Float(1e14).to_string(), "1.0E+14");
        assert_eq!(Value::Float(0.0001).to_string(), "0.0001");
        assert_eq!(Value::Float(0.00001).to_string(), "1.0E-5");
        assert_eq!(Value::Float(0.1 + 0.2).to_string(), "0.3");
        assert_eq!(Value::Float(-1234.5).to_string(), "-1234.5");
        assert_eq!(Value::Float(0.0).to_string(), "0");
        assert_eq!(Value::Float(-0.0).to_string(), "-0");
    }

    #[test]
    fn test_serialize_lists_and_maps() {
        let value = Value::from(array! {
            "tags" => Value::from(array!["a", "b"]),
            "score" => 2.5,
            "active" => true,
        });

        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"tags":["a","b"],"score":2.5,"active":true}"#);
        assert_eq!(value.to_json(), serde_json::from_str::<serde_json::Value>(&json).unwrap());
    }

    #[test]
    fn test_from_json() {
        let json = serde_json::json!({ "id": 3, "ratio": 0.5, "items": [null, "x"] });
        let value = Value::from(json);

        let arr = value.as_array().unwrap();
        assert_eq!(arr.get(&"id".into()), Some(&Value::Int(3)));
        assert_eq!(arr.get(&"ratio".into()), Some(&Value::Float(0.5)));
        assert_eq!(
            arr.get(&"items".into()),
            Some(&Value::from(array![Value::Null, "x"]))
        );
    }
}
