//! Data Values
//!
//! [`Value`] is what a data store holds. Scalars are stored inline, while
//! arrays and objects are shared handles, so cloning a value is always
//! cheap.
//!
//! # Equality
//!
//! Change detection uses *strict* equality: scalars compare by value, arrays
//! and objects compare by identity. Writing a structurally identical but
//! freshly built object is therefore a change, and writing the same handle
//! back is not. `NaN` is never equal to itself.

use std::fmt;
use std::rc::Rc;

use super::object::Object;

/// A value held by a data store.
#[derive(Clone, Default)]
pub enum Value {
    /// Missing or undefined.
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(Rc<str>),
    /// An opaque list. Elements are never observed individually.
    Array(Rc<[Value]>),
    /// A nested data object.
    Object(Object),
}

impl Value {
    /// Strict equality, as used to suppress redundant updates.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Render the value as node text.
    ///
    /// `Null` renders as the empty string. Arrays and objects render as
    /// compact JSON.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
            Value::Text(s) => s.to_string(),
            Value::Array(_) | Value::Object(_) => self.to_json().to_string(),
        }
    }

    /// Snapshot the value as JSON without registering any dependency.
    ///
    /// An object nested inside itself renders as `"[Circular]"` at the
    /// point where it repeats.
    pub fn to_json(&self) -> serde_json::Value {
        self.to_json_within(&mut Vec::new())
    }

    /// `path` holds the objects currently being rendered, outermost first.
    pub(crate) fn to_json_within(&self, path: &mut Vec<*const ()>) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => json_number(*n),
            Value::Text(s) => serde_json::Value::String(s.to_string()),
            Value::Array(items) => serde_json::Value::Array(
                items.iter().map(|item| item.to_json_within(path)).collect(),
            ),
            Value::Object(object) => object.to_json_within(path),
        }
    }
}

/// Numbers render the way a browser prints them: `-0` as `0`, and very
/// large or very small magnitudes in exponent form with a signed exponent.
fn format_number(n: f64) -> String {
    if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        let formatted = format!("{n:e}");
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        }
    } else {
        // Display already prints integral floats without a fraction.
        n.to_string()
    }
}

/// Integral numbers serialize without a fraction; non-finite ones as null.
fn json_number(n: f64) -> serde_json::Value {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        serde_json::Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.strict_eq(other)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::Text(s) => write!(f, "Text({s:?})"),
            Value::Array(items) => f.debug_list().entries(items.iter()).finish(),
            Value::Object(object) => fmt::Debug::fmt(object, f),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

// ----------------------------------------------------------------------------
// Conversions
// ----------------------------------------------------------------------------

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::Text(s.into()),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(Object::from(map)),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s.into())
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(object)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items.into())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_compare_by_value() {
        assert_eq!(Value::from(1), Value::from(1.0));
        assert_eq!(Value::from("a"), Value::from(String::from("a")));
        assert_ne!(Value::from(1), Value::from("1"));
        assert_ne!(Value::Null, Value::from(false));
    }

    #[test]
    fn nan_is_never_equal() {
        let nan = Value::from(f64::NAN);
        assert!(!nan.strict_eq(&nan.clone()));
    }

    #[test]
    fn containers_compare_by_identity() {
        let array = Value::from(vec![Value::from(1)]);
        assert_eq!(array, array.clone());
        assert_ne!(array, Value::from(vec![Value::from(1)]));

        let object = Value::from(Object::new());
        assert_eq!(object, object.clone());
        assert_ne!(object, Value::from(Object::new()));
    }

    #[test]
    fn text_rendering() {
        assert_eq!(Value::Null.to_text(), "");
        assert_eq!(Value::from(3).to_text(), "3");
        assert_eq!(Value::from(2.5).to_text(), "2.5");
        assert_eq!(Value::from(f64::INFINITY).to_text(), "Infinity");
        assert_eq!(Value::from(true).to_text(), "true");
        assert_eq!(Value::from(vec![Value::from(1), Value::from("x")]).to_text(), r#"[1,"x"]"#);
        assert_eq!(Value::from(vec![Value::from(0.5)]).to_text(), "[0.5]");
    }

    #[test]
    fn number_edge_rendering() {
        assert_eq!(Value::from(-0.0).to_text(), "0");
        assert_eq!(Value::from(1e21).to_text(), "1e+21");
        assert_eq!(Value::from(-2.5e30).to_text(), "-2.5e+30");
        assert_eq!(Value::from(1e20).to_text(), "100000000000000000000");
        assert_eq!(Value::from(1.5e-7).to_text(), "1.5e-7");
        assert_eq!(Value::from(0.000001).to_text(), "0.000001");
        assert_eq!(Value::from(f64::NAN).to_text(), "NaN");
    }

    #[test]
    fn self_containing_objects_render_a_placeholder() {
        let object = Object::new();
        object.set("n", 1);
        object.set("me", object.clone());
        object.set("list", vec![Value::from(object.clone())]);

        assert_eq!(
            Value::from(object.clone()).to_text(),
            r#"{"n":1,"me":"[Circular]","list":["[Circular]"]}"#
        );

        object.set("me", Value::Null);
        object.set("list", Value::Null);
    }

    #[test]
    fn shared_objects_are_not_circular() {
        let shared = Object::new();
        shared.set("x", 1);
        let outer = Object::new();
        outer.set("a", shared.clone());
        outer.set("b", shared);

        assert_eq!(Value::from(outer).to_text(), r#"{"a":{"x":1},"b":{"x":1}}"#);
    }

    #[test]
    fn from_json_builds_objects_and_opaque_arrays() {
        let value = Value::from(json!({ "user": { "age": 1 }, "tags": ["a", "b"] }));
        let object = value.as_object().unwrap();

        let user = object.get("user");
        assert_eq!(user.as_object().unwrap().get("age").as_f64(), Some(1.0));
        assert!(matches!(object.get("tags"), Value::Array(ref items) if items.len() == 2));
        assert_eq!(value.to_json(), json!({ "user": { "age": 1 }, "tags": ["a", "b"] }));
    }
}
