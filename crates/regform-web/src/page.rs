#![forbid(unsafe_code)]

//! In-memory page implementing [`Surface`].
//!
//! Used by hosts without a real DOM, by the replay harness and by tests.
//! [`Page::registration`] builds the standard markup: four inputs, each in
//! its own input group, a strength bar, the submit control and the form.

use std::collections::BTreeMap;

use regform_core::FieldId;

use crate::surface::{
    ElementId, PageError, STRENGTH_BAR_CLASS, SUBMIT_BUTTON_CLASS, Surface,
};

/// One element of the in-memory page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    value: String,
    classes: Vec<String>,
    width: Option<String>,
    disabled: bool,
    group: Option<usize>,
}

impl Element {
    /// An element with the given space-separated class list.
    #[must_use]
    pub fn with_classes(class_name: &str) -> Self {
        Self {
            classes: split_classes(class_name),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct InputGroup {
    error_nodes: Vec<String>,
}

/// An in-memory registration page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    elements: BTreeMap<ElementId, Element>,
    groups: Vec<InputGroup>,
}

impl Page {
    /// An empty page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard registration markup.
    #[must_use]
    pub fn registration() -> Self {
        let mut page = Self::new();
        page.insert(ElementId::Form, Element::default());
        for field in FieldId::ALL {
            page.insert_field(field);
        }
        page.insert(ElementId::StrengthBar, Element::with_classes(STRENGTH_BAR_CLASS));
        page.insert(
            ElementId::SubmitButton,
            Element::with_classes(SUBMIT_BUTTON_CLASS),
        );
        page
    }

    /// Insert or replace an element.
    pub fn insert(&mut self, id: ElementId, element: Element) {
        self.elements.insert(id, element);
    }

    /// Insert a field input wrapped in a fresh input group.
    pub fn insert_field(&mut self, field: FieldId) {
        self.groups.push(InputGroup::default());
        let element = Element {
            group: Some(self.groups.len() - 1),
            ..Element::default()
        };
        self.insert(ElementId::Field(field), element);
    }

    /// Remove an element, returning it if it was present.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        self.elements.remove(&id)
    }

    /// Remove an element, returning the page (for building broken markup).
    #[must_use]
    pub fn without(mut self, id: ElementId) -> Self {
        self.remove(id);
        self
    }

    /// Detach a field from its input group, returning the page.
    #[must_use]
    pub fn without_input_group(mut self, field: FieldId) -> Self {
        if let Some(element) = self.elements.get_mut(&ElementId::Field(field)) {
            element.group = None;
        }
        self
    }

    /// A serializable view of the whole page.
    ///
    /// Password values are reported by length only.
    #[must_use]
    pub fn snapshot(&self) -> PageSnapshot {
        let fields = FieldId::ALL
            .into_iter()
            .filter_map(|field| {
                let element = self.elements.get(&ElementId::Field(field))?;
                let value = if field.trims_input() {
                    element.value.clone()
                } else {
                    "*".repeat(element.value.chars().count())
                };
                Some(FieldSnapshot {
                    id: field.element_id().to_string(),
                    value,
                    classes: element.classes.clone(),
                    errors: self.group(field).map(|g| g.error_nodes.clone()).unwrap_or_default(),
                })
            })
            .collect();
        let strength_bar = self
            .elements
            .get(&ElementId::StrengthBar)
            .map(|e| IndicatorSnapshot {
                classes: e.classes.clone(),
                width: e.width.clone(),
            })
            .unwrap_or_default();
        let submit = self
            .elements
            .get(&ElementId::SubmitButton)
            .map(|e| ControlSnapshot {
                classes: e.classes.clone(),
                disabled: e.disabled,
            })
            .unwrap_or_default();
        PageSnapshot {
            fields,
            strength_bar,
            submit,
        }
    }

    fn element(&self, id: ElementId) -> Result<&Element, PageError> {
        self.elements.get(&id).ok_or(PageError::MissingElement(id))
    }

    fn element_mut(&mut self, id: ElementId) -> Result<&mut Element, PageError> {
        self.elements.get_mut(&id).ok_or(PageError::MissingElement(id))
    }

    fn group_index(&self, field: FieldId) -> Result<usize, PageError> {
        self.element(ElementId::Field(field))?
            .group
            .ok_or(PageError::MissingInputGroup(field))
    }

    fn group(&self, field: FieldId) -> Option<&InputGroup> {
        let index = self.group_index(field).ok()?;
        self.groups.get(index)
    }

    fn group_mut(&mut self, field: FieldId) -> Result<&mut InputGroup, PageError> {
        let index = self.group_index(field)?;
        self.groups
            .get_mut(index)
            .ok_or(PageError::MissingInputGroup(field))
    }
}

fn split_classes(class_name: &str) -> Vec<String> {
    let mut classes: Vec<String> = Vec::new();
    for class in class_name.split_whitespace() {
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }
    classes
}

impl Surface for Page {
    fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    fn has_input_group(&self, field: FieldId) -> bool {
        self.group(field).is_some()
    }

    fn value(&self, id: ElementId) -> Result<String, PageError> {
        Ok(self.element(id)?.value.clone())
    }

    fn set_value(&mut self, id: ElementId, value: &str) -> Result<(), PageError> {
        value.clone_into(&mut self.element_mut(id)?.value);
        Ok(())
    }

    fn add_class(&mut self, id: ElementId, class: &str) -> Result<(), PageError> {
        let classes = &mut self.element_mut(id)?.classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
        Ok(())
    }

    fn remove_class(&mut self, id: ElementId, class: &str) -> Result<(), PageError> {
        self.element_mut(id)?.classes.retain(|c| c != class);
        Ok(())
    }

    fn set_class_name(&mut self, id: ElementId, class_name: &str) -> Result<(), PageError> {
        self.element_mut(id)?.classes = split_classes(class_name);
        Ok(())
    }

    fn classes(&self, id: ElementId) -> Result<Vec<String>, PageError> {
        Ok(self.element(id)?.classes.clone())
    }

    fn set_width(&mut self, id: ElementId, width: Option<&str>) -> Result<(), PageError> {
        self.element_mut(id)?.width = width.map(str::to_string);
        Ok(())
    }

    fn width(&self, id: ElementId) -> Result<Option<String>, PageError> {
        Ok(self.element(id)?.width.clone())
    }

    fn set_disabled(&mut self, id: ElementId, disabled: bool) -> Result<(), PageError> {
        self.element_mut(id)?.disabled = disabled;
        Ok(())
    }

    fn is_disabled(&self, id: ElementId) -> Result<bool, PageError> {
        Ok(self.element(id)?.disabled)
    }

    fn error_messages(&self, field: FieldId) -> Result<Vec<String>, PageError> {
        let index = self.group_index(field)?;
        Ok(self
            .groups
            .get(index)
            .map(|g| g.error_nodes.clone())
            .unwrap_or_default())
    }

    fn append_error_message(&mut self, field: FieldId, text: &str) -> Result<(), PageError> {
        self.group_mut(field)?.error_nodes.push(text.to_string());
        Ok(())
    }

    fn remove_error_message(&mut self, field: FieldId) -> Result<bool, PageError> {
        let nodes = &mut self.group_mut(field)?.error_nodes;
        if nodes.is_empty() {
            Ok(false)
        } else {
            nodes.remove(0);
            Ok(true)
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

/// Serializable view of a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageSnapshot {
    pub fields: Vec<FieldSnapshot>,
    pub strength_bar: IndicatorSnapshot,
    pub submit: ControlSnapshot,
}

impl PageSnapshot {
    /// Snapshot of one field, by element id.
    #[must_use]
    pub fn field(&self, field: FieldId) -> Option<&FieldSnapshot> {
        self.fields.iter().find(|f| f.id == field.element_id())
    }
}

/// One input control and its input group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldSnapshot {
    pub id: String,
    pub value: String,
    pub classes: Vec<String>,
    pub errors: Vec<String>,
}

/// The strength indicator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndicatorSnapshot {
    pub classes: Vec<String>,
    pub width: Option<String>,
}

/// The submit control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlSnapshot {
    pub classes: Vec<String>,
    pub disabled: bool,
}
