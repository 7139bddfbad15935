use attrmap_types::FieldMapping;

/// Explicit hidden/visible lists of one mapped object.
///
/// A field is left out of serialized output only when it is hidden (by its
/// own flag or by the hidden list) and not named in the visible list.
/// Entries may name a field, an attribute or an alias.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Visibility {
    hidden: Vec<String>,
    visible: Vec<String>,
}

impl Visibility {
    pub fn new(hidden: &[&str], visible: &[&str]) -> Self {
        Self {
            hidden: hidden.iter().map(|s| s.to_string()).collect(),
            visible: visible.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn hidden(&self) -> &[String] {
        &self.hidden
    }

    pub fn visible(&self) -> &[String] {
        &self.visible
    }

    pub fn set_hidden(&mut self, keys: Vec<String>) {
        self.hidden = keys;
    }

    pub fn set_visible(&mut self, keys: Vec<String>) {
        self.visible = keys;
    }

    /// Adds keys to the visible list and drops them from the hidden list.
    pub fn make_visible(&mut self, keys: &[&str]) {
        self.hidden.retain(|h| !keys.contains(&h.as_str()));
        for key in keys {
            if !self.visible.iter().any(|v| v == key) {
                self.visible.push(key.to_string());
            }
        }
    }

    /// Adds keys to the hidden list and drops them from the visible list.
    pub fn make_hidden(&mut self, keys: &[&str]) {
        self.visible.retain(|v| !keys.contains(&v.as_str()));
        for key in keys {
            if !self.hidden.iter().any(|h| h == key) {
                self.hidden.push(key.to_string());
            }
        }
    }

    pub fn is_hidden(&self, mapping: &FieldMapping) -> bool {
        mapping.hidden || self.hidden.iter().any(|key| mapping.answers_to(key))
    }

    pub fn is_visible(&self, mapping: &FieldMapping) -> bool {
        self.visible.iter().any(|key| mapping.answers_to(key))
    }

    pub fn includes(&self, mapping: &FieldMapping) -> bool {
        !self.is_hidden(mapping) || self.is_visible(mapping)
    }
}
