use std::sync::{Arc, PoisonError, RwLock};

/// The text box the user types into. Clones share the same buffer so
/// the front end and the handler see one value.
#[derive(Clone, Debug, Default)]
pub struct InputField(Arc<RwLock<String>>);

impl InputField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> String {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set(&self, value: &str) {
        let mut buf = self.0.write().unwrap_or_else(PoisonError::into_inner);
        buf.clear();
        buf.push_str(value);
    }

    pub fn clear(&self) {
        self.0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
