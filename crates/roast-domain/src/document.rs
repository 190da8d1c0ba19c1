//! Structured company documents

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Name of the reserved default action
pub const TEXT_ACTION: &str = "text";

/// One named action entry of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// Action name (`text` for the default action)
    pub name: String,

    /// Action body
    pub text: String,
}

/// Introduction / Purpose / Action bundle generated per company
///
/// Actions keep the order in which they were discovered in the rule section.
/// Serializes as `{"Introduction": .., "Purpose": .., "Action": {name: text}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Free-text introduction
    pub introduction: String,

    /// Free-text purpose
    pub purpose: String,

    actions: Vec<Action>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an action, overwriting the text of an existing action with the same name
    ///
    /// An overwritten action keeps its original position.
    pub fn set_action(&mut self, name: impl Into<String>, text: impl Into<String>) {
        let name = name.into();
        let text = text.into();
        match self.actions.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.text = text,
            None => self.actions.push(Action { name, text }),
        }
    }

    /// Look up an action's text by name
    pub fn action(&self, name: &str) -> Option<&str> {
        self.actions
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.text.as_str())
    }

    /// All actions in discovery order
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Apply `f` to every text field of the document
    pub fn map_text<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> String,
    {
        self.introduction = f(&self.introduction);
        self.purpose = f(&self.purpose);
        for action in &mut self.actions {
            action.text = f(&action.text);
        }
        self
    }
}

struct ActionMap<'a>(&'a [Action]);

impl Serialize for ActionMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for action in self.0 {
            map.serialize_entry(&action.name, &action.text)?;
        }
        map.end()
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("Introduction", &self.introduction)?;
        map.serialize_entry("Purpose", &self.purpose)?;
        map.serialize_entry("Action", &ActionMap(&self.actions))?;
        map.end()
    }
}
