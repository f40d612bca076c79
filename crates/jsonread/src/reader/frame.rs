use crate::value::{Array, Map, Value};

#[derive(Debug)]
enum Container {
    Array(Array),
    Object {
        map: Map,
        pending_key: Option<String>, // key waiting for its value
    },
}

/// One open array or object awaiting more elements.
#[derive(Debug)]
pub(crate) struct Frame {
    container: Container,
    first: bool,
}

impl Frame {
    pub(crate) fn array() -> Self {
        Self {
            container: Container::Array(Array::new()),
            first: true,
        }
    }

    pub(crate) fn object() -> Self {
        Self {
            container: Container::Object {
                map: Map::new(),
                pending_key: None,
            },
            first: true,
        }
    }

    pub(crate) fn is_object(&self) -> bool {
        matches!(self.container, Container::Object { .. })
    }

    /// The character that closes this container.
    pub(crate) fn closer(&self) -> char {
        match self.container {
            Container::Array(_) => ']',
            Container::Object { .. } => '}',
        }
    }

    /// Returns whether no element has been started yet, and clears the flag.
    pub(crate) fn take_first(&mut self) -> bool {
        core::mem::replace(&mut self.first, false)
    }

    /// Remembers the key the next inserted value is stored under.
    pub(crate) fn set_key(&mut self, key: String) {
        if let Container::Object { pending_key, .. } = &mut self.container {
            *pending_key = Some(key);
        }
    }

    /// Appends to an array, or stores under the pending key of an object.
    /// A repeated key keeps its position and takes the new value.
    pub(crate) fn insert(&mut self, value: Value) {
        match &mut self.container {
            Container::Array(items) => items.push(value),
            Container::Object { map, pending_key } => {
                if let Some(key) = pending_key.take() {
                    map.insert(key, value);
                }
            }
        }
    }

    pub(crate) fn into_value(self) -> Value {
        match self.container {
            Container::Array(items) => Value::Array(items),
            Container::Object { map, .. } => Value::Object(map),
        }
    }
}
