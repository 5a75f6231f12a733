//! Data Objects and Interception
//!
//! An [`Object`] is a shared, ordered map from keys to field slots. A slot
//! starts out *plain*. [`Observer`] walks an object and turns every plain
//! slot into a reactive field, recursing into nested objects, so that reads
//! collect dependencies and writes notify.
//!
//! # Limitations
//!
//! Interception happens once, over the fields present at that moment.
//! Fields inserted afterwards stay plain: reading them registers nothing and
//! writing them notifies nobody. A nested object only becomes reactive when
//! it is reached by [`Observer::observe`] or assigned through a reactive
//! field.
//!
//! Interception is irreversible and happens in place: every handle to the
//! object sees the reactive fields.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

use super::field::ReactiveField;
use super::hook::{AccessHook, NoopHook};
use super::value::Value;
use crate::error::Result;

enum Slot {
    Plain(Value),
    Reactive(Rc<ReactiveField>),
}

type Slots = IndexMap<Rc<str>, Slot>;

/// A shared handle to a data object.
///
/// Cloning the handle does not copy the fields.
#[derive(Clone, Default)]
pub struct Object {
    slots: Rc<RefCell<Slots>>,
}

/// A non-owning handle to an [`Object`].
#[derive(Clone, Default)]
pub struct WeakObject {
    slots: Weak<RefCell<Slots>>,
}

impl WeakObject {
    pub fn upgrade(&self) -> Option<Object> {
        self.slots.upgrade().map(|slots| Object { slots })
    }
}

impl Object {
    /// Create an empty object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an object from JSON text.
    ///
    /// The result is plain; run it through an [`Observer`] to make it
    /// reactive.
    pub fn from_json(json: &str) -> Result<Self> {
        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        Ok(Self::from(map))
    }

    /// Read a field. Missing keys read as [`Value::Null`].
    ///
    /// Reading a reactive field while a watcher is being constructed
    /// subscribes that watcher to the field.
    pub fn get(&self, key: &str) -> Value {
        let field = match self.slots.borrow().get(key) {
            Some(Slot::Reactive(field)) => Rc::clone(field),
            Some(Slot::Plain(value)) => return value.clone(),
            None => return Value::Null,
        };
        field.get()
    }

    /// Read a field without registering any dependency.
    pub fn peek(&self, key: &str) -> Value {
        match self.slots.borrow().get(key) {
            Some(Slot::Reactive(field)) => field.peek(),
            Some(Slot::Plain(value)) => value.clone(),
            None => Value::Null,
        }
    }

    /// Write a field.
    ///
    /// Reactive fields notify their watchers before this returns. Plain and
    /// missing fields are simply stored; a missing key becomes a new plain
    /// field.
    pub fn set(&self, key: &str, value: impl Into<Value>) {
        let value = value.into();
        let mut slots = self.slots.borrow_mut();

        if let Some(Slot::Reactive(field)) = slots.get(key) {
            let field = Rc::clone(field);
            drop(slots);
            field.set(value);
            return;
        }

        slots.insert(Rc::from(key), Slot::Plain(value));
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.slots.borrow().contains_key(key)
    }

    /// Whether `key` has been intercepted.
    pub fn is_reactive(&self, key: &str) -> bool {
        matches!(self.slots.borrow().get(key), Some(Slot::Reactive(_)))
    }

    /// Number of watchers subscribed to `key`. Zero for plain or missing
    /// fields.
    pub fn subscriber_count(&self, key: &str) -> usize {
        match self.slots.borrow().get(key) {
            Some(Slot::Reactive(field)) => field.subscriber_count(),
            _ => 0,
        }
    }

    /// Field names in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.slots.borrow().keys().map(|k| k.to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }

    /// Whether both handles point at the same object.
    pub fn ptr_eq(&self, other: &Object) -> bool {
        Rc::ptr_eq(&self.slots, &other.slots)
    }

    pub fn downgrade(&self) -> WeakObject {
        WeakObject {
            slots: Rc::downgrade(&self.slots),
        }
    }

    /// Snapshot the object as JSON without registering any dependency.
    ///
    /// See [`Value::to_json`] for how self-containing objects render.
    pub fn to_json(&self) -> serde_json::Value {
        self.to_json_within(&mut Vec::new())
    }

    pub(crate) fn to_json_within(&self, path: &mut Vec<*const ()>) -> serde_json::Value {
        let id = Rc::as_ptr(&self.slots) as *const ();
        if path.contains(&id) {
            return serde_json::Value::String("[Circular]".to_string());
        }

        let values: Vec<(String, Value)> = self
            .slots
            .borrow()
            .iter()
            .map(|(key, slot)| {
                let value = match slot {
                    Slot::Reactive(field) => field.peek(),
                    Slot::Plain(value) => value.clone(),
                };
                (key.to_string(), value)
            })
            .collect();

        path.push(id);
        let map = values
            .into_iter()
            .map(|(key, value)| (key, value.to_json_within(path)))
            .collect();
        path.pop();

        serde_json::Value::Object(map)
    }

    /// Turn every plain field into a reactive one, then recurse into the
    /// values that were converted.
    ///
    /// Slots are converted before recursing, so an object that contains
    /// itself is visited once.
    fn intercept(&self, hook: &Rc<dyn AccessHook>) {
        let converted: Vec<Value> = {
            let mut slots = self.slots.borrow_mut();
            let mut converted = Vec::new();
            for (key, slot) in slots.iter_mut() {
                if let Slot::Plain(value) = slot {
                    let value = std::mem::take(value);
                    converted.push(value.clone());
                    *slot = Slot::Reactive(Rc::new(ReactiveField::new(
                        Rc::clone(key),
                        value,
                        Rc::clone(hook),
                    )));
                }
            }
            converted
        };

        for value in &converted {
            observe(value, hook);
        }
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Object {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        let slots = map
            .into_iter()
            .map(|(key, value)| (Rc::from(key), Slot::Plain(Value::from(value))))
            .collect();
        Self {
            slots: Rc::new(RefCell::new(slots)),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Object
where
    K: AsRef<str>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let object = Object::new();
        for (key, value) in iter {
            object.set(key.as_ref(), value);
        }
        object
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Guard against self-referencing objects.
        match self.slots.try_borrow() {
            Ok(slots) => f
                .debug_map()
                .entries(slots.iter().map(|(key, slot)| {
                    let kind = match slot {
                        Slot::Plain(_) => "plain",
                        Slot::Reactive(_) => "reactive",
                    };
                    (key, kind)
                }))
                .finish(),
            Err(_) => f.write_str("Object { .. }"),
        }
    }
}

/// Recursively intercept `value` if it is an object.
pub(crate) fn observe(value: &Value, hook: &Rc<dyn AccessHook>) {
    if let Value::Object(object) = value {
        object.intercept(hook);
    }
}

/// Makes data objects reactive.
///
/// # Example
///
/// ```rust,ignore
/// let data = Object::from_json(r#"{ "msg": "hello" }"#)?;
/// Observer::new().observe_object(&data);
///
/// let w = Watcher::new("msg", &data, |v| println!("msg is now {v}"));
/// data.set("msg", "bye"); // prints "msg is now bye"
/// ```
#[derive(Clone)]
pub struct Observer {
    hook: Rc<dyn AccessHook>,
}

impl Observer {
    /// An observer whose fields report to [`NoopHook`].
    pub fn new() -> Self {
        Self {
            hook: Rc::new(NoopHook),
        }
    }

    /// An observer whose fields report every access to `hook`.
    pub fn with_hook(hook: Rc<dyn AccessHook>) -> Self {
        Self { hook }
    }

    /// Recursively intercept `value`. Non-objects are left alone.
    pub fn observe(&self, value: &Value) {
        observe(value, &self.hook);
    }

    /// Recursively intercept every field of `object`.
    pub fn observe_object(&self, object: &Object) {
        object.intercept(&self.hook);
    }
}

impl Default for Observer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Observer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::Watcher;
    use serde_json::json;

    fn observed(json: serde_json::Value) -> Object {
        let Value::Object(object) = Value::from(json) else {
            panic!("expected an object");
        };
        Observer::new().observe_object(&object);
        object
    }

    #[derive(Default)]
    struct Recording {
        events: RefCell<Vec<String>>,
    }

    impl AccessHook for Recording {
        fn on_get(&self, key: &str, value: &Value) {
            self.events.borrow_mut().push(format!("get {key}={value}"));
        }

        fn on_set(&self, key: &str, value: &Value) {
            self.events.borrow_mut().push(format!("set {key}={value}"));
        }
    }

    #[test]
    fn missing_keys_read_null() {
        let data = observed(json!({}));
        assert!(data.get("nope").is_null());
    }

    #[test]
    fn observe_converts_nested_objects() {
        let data = observed(json!({ "user": { "age": 1, "pet": { "name": "rex" } } }));

        let user = data.peek("user");
        let user = user.as_object().unwrap();
        assert!(data.is_reactive("user"));
        assert!(user.is_reactive("age"));
        assert!(user.peek("pet").as_object().unwrap().is_reactive("name"));
    }

    #[test]
    fn fields_added_later_are_not_reactive() {
        let data = observed(json!({ "a": 1 }));
        data.set("b", 2);
        assert!(!data.is_reactive("b"));

        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        let _w = Watcher::new("b", &data, move |_| *counter.borrow_mut() += 1);

        data.set("b", 3);
        assert_eq!(data.get("b"), Value::from(3));
        assert_eq!(*calls.borrow(), 0);
        assert_eq!(data.subscriber_count("b"), 0);
    }

    #[test]
    fn observing_twice_keeps_subscriptions() {
        let data = observed(json!({ "a": 1 }));
        let _w = Watcher::new("a", &data, |_| {});

        Observer::new().observe_object(&data);
        assert_eq!(data.subscriber_count("a"), 1);
    }

    #[test]
    fn self_reference_terminates() {
        let data = Object::new();
        data.set("me", data.clone());
        Observer::new().observe_object(&data);
        assert!(data.is_reactive("me"));
        // Break the cycle so the test does not leak.
        data.set("me", Value::Null);
    }

    #[test]
    fn hook_sees_accesses() {
        let hook = Rc::new(Recording::default());
        let data = Object::from_iter([("n", 1)]);
        Observer::with_hook(hook.clone()).observe_object(&data);

        data.get("n");
        data.set("n", 2);
        data.set("n", 2);
        data.peek("n");

        assert_eq!(*hook.events.borrow(), vec!["get n=1", "set n=2"]);
    }

    #[test]
    fn from_json_and_back() {
        let data = Object::from_json(r#"{ "b": true, "a": "x" }"#).unwrap();
        assert_eq!(data.keys(), vec!["b", "a"]);
        assert_eq!(data.to_json(), json!({ "b": true, "a": "x" }));
        assert!(Object::from_json("[1, 2]").is_err());
    }
}
