use crate::error::ViewError;
use crate::view::{Element, Placement, View};

/// Appended to a name that already appears in the acknowledgements.
pub const REPEAT_SUFFIX: &str = " (¡por participar nuevamente!)";

/// Names already thanked on this page, in the order they were first seen.
#[derive(Debug, Clone, Default)]
pub struct AcknowledgementList {
    names: Vec<String>,
}

impl AcknowledgementList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact, case-sensitive match.
    pub fn has_been_acknowledged(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Display text for `name`, registering it if this is its first mention.
    fn register(&mut self, name: &str) -> String {
        if self.has_been_acknowledged(name) {
            format!("{}{}", name, REPEAT_SUFFIX)
        } else {
            self.names.push(name.to_string());
            name.to_string()
        }
    }

    /// Thank `name` in the acknowledgements area.
    ///
    /// Every entry but the first written into an empty area gets a trailing
    /// `", "`.
    pub fn acknowledge<V: View + ?Sized>(
        &mut self,
        view: &mut V,
        name: &str,
        placement: Placement,
    ) -> Result<(), ViewError> {
        // Look the area up before touching the list so a missing element
        // leaves it unchanged.
        let area_is_empty = view.text(Element::Acknowledgements)?.is_empty();
        let mut text = self.register(name);
        if !area_is_empty {
            text.push_str(", ");
        }
        view.insert_text(Element::Acknowledgements, &text, placement)
    }
}
