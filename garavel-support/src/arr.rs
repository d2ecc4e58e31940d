//! Array helpers and value normalization.
//!
//! [`normalize`] turns loosely typed input (query strings, form fields,
//! environment-style settings) into typed values:
//!
//! ```rust
//! use garavel_support::{arr, array, Value};
//!
//! let input = array!["1", "2.5", "true", "a,b"];
//! let expected = array![1.0, 2.5, true, Value::from(array!["a", "b"])];
//!
//! assert_eq!(arr::normalize(input), expected);
//! ```

use crate::config::NormalizeConfig;
use crate::text;
use crate::value::{Array, Key, Value};
use crate::{Result, SupportError};
use garavel_log::trace;

/// Last element in insertion order.
pub fn latest(arr: &Array) -> Option<&Value> {
    arr.last().map(|(_, value)| value)
}

/// Join the string forms of the values with `glue`.
pub fn join(arr: &Array, glue: &str) -> String {
    arr.values()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join(glue)
}

/// [`join`] with `", "`.
pub fn join_default(arr: &Array) -> String {
    join(arr, ", ")
}

/// Keep the entries whose value satisfies `predicate`. Keys and order are
/// preserved.
pub fn filter<F>(arr: &Array, mut predicate: F) -> Array
where
    F: FnMut(&Value) -> bool,
{
    filter_with_key(arr, |_, value| predicate(value))
}

/// Like [`filter`], with the key passed to the predicate as well.
pub fn filter_with_key<F>(arr: &Array, mut predicate: F) -> Array
where
    F: FnMut(&Key, &Value) -> bool,
{
    arr.iter()
        .filter(|&(key, value)| predicate(key, value))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Drop every falsy entry (see [`Value::is_truthy`]). Surviving entries
/// keep their keys.
pub fn clean(arr: &Array) -> Array {
    filter(arr, Value::is_truthy)
}

/// Collect `field` from every element into a list.
///
/// Every element must be an array holding `field`; the first one that
/// does not fails the whole call.
pub fn pluck(arr: &Array, field: &str) -> Result<Array> {
    let field_key = Key::from(field);
    arr.iter()
        .map(|(key, item)| {
            item.as_array()
                .and_then(|fields| fields.get(&field_key))
                .cloned()
                .ok_or_else(|| SupportError::MissingField {
                    index: key.to_string(),
                    field: field.to_string(),
                })
        })
        .collect::<Result<Vec<_>>>()
        .map(Array::from)
}

/// Flatten nested arrays depth-first into a single list.
pub fn flat(arr: &Array) -> Array {
    let mut out = Array::new();
    flat_into(arr, &mut out);
    out
}

fn flat_into(arr: &Array, out: &mut Array) {
    for value in arr.values() {
        match value {
            Value::Array(inner) => flat_into(inner, out),
            leaf => out.push(leaf.clone()),
        }
    }
}

/// Normalize with the default settings. See [`Normalizer::normalize`].
pub fn normalize(arr: Array) -> Array {
    Normalizer::default().normalize(arr)
}

/// Rewrites every leaf of an array to its typed form.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizeConfig,
}

impl Normalizer {
    pub fn new(config: NormalizeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormalizeConfig {
        &self.config
    }

    /// Rewrite every leaf, depth-first. The first matching rule wins:
    ///
    /// 1. numbers and numeric strings become floats
    /// 2. nested arrays are normalized in place
    /// 3. `"true"`/`"false"` (and booleans) become booleans
    /// 4. strings with a list delimiter are split and the pieces normalized
    /// 5. anything else is left alone
    ///
    /// Running it again on its own output changes nothing.
    pub fn normalize(&self, mut arr: Array) -> Array {
        trace!("normalizing array of {} entries", arr.len());
        self.normalize_in_place(&mut arr);
        arr
    }

    /// Normalize a single value with the same rules.
    pub fn normalize_value(&self, value: Value) -> Value {
        match value {
            Value::Int(i) => Value::Float(i as f64),
            Value::Str(s) => self.normalize_str(s),
            Value::Array(mut inner) => {
                self.normalize_in_place(&mut inner);
                Value::Array(inner)
            }
            other => other,
        }
    }

    fn normalize_in_place(&self, arr: &mut Array) {
        for (_, slot) in arr.iter_mut() {
            let value = std::mem::take(slot);
            *slot = self.normalize_value(value);
        }
    }

    fn normalize_str(&self, s: String) -> Value {
        if let Some(number) = text::parse_numeric(&s) {
            return Value::Float(number);
        }

        let value = Value::Str(s);
        if text::is_boolable(&value) {
            return Value::Bool(text::parse_bool(&value));
        }

        match value {
            Value::Str(s) => self.split_list(s),
            other => other,
        }
    }

    fn split_list(&self, s: String) -> Value {
        let Some(delimiter) = text::splitter_with(&s, self.config.pipe_detection) else {
            return Value::Str(s);
        };

        let mut pieces: Array = text::split(&s, &delimiter.to_string())
            .into_iter()
            .map(Value::Str)
            .collect();
        self.normalize_in_place(&mut pieces);
        Value::Array(pieces)
    }
}
