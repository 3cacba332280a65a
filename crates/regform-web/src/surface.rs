#![forbid(unsafe_code)]

//! The DOM-like boundary the form reads values from and renders onto.
//!
//! Elements are addressed by stable identifiers. Every field sits inside an
//! input-group container that holds at most one inline error node when the
//! form is driven through [`RegistrationForm`](crate::RegistrationForm).

use std::fmt;

use regform_core::FieldId;

/// Class of the inline error node inside an input group.
pub const ERROR_MESSAGE_CLASS: &str = "error-message";
/// Base class of the strength indicator.
pub const STRENGTH_BAR_CLASS: &str = "strength-bar";
/// Class of the submit control.
pub const SUBMIT_BUTTON_CLASS: &str = "submit-btn";
/// Class marking the submit control as busy.
pub const LOADING_CLASS: &str = "loading";

/// An addressable element of the registration page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementId {
    /// One of the four input controls.
    Field(FieldId),
    /// The password strength indicator.
    StrengthBar,
    /// The submit control.
    SubmitButton,
    /// The form element itself.
    Form,
}

impl ElementId {
    /// Every element the form needs, in document order.
    pub const REQUIRED: [Self; 7] = [
        Self::Form,
        Self::Field(FieldId::Username),
        Self::Field(FieldId::Nickname),
        Self::Field(FieldId::Password),
        Self::StrengthBar,
        Self::Field(FieldId::ConfirmPassword),
        Self::SubmitButton,
    ];

    /// Stable identifier in the markup.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Field(field) => field.element_id(),
            Self::StrengthBar => "strengthBar",
            Self::SubmitButton => SUBMIT_BUTTON_CLASS,
            Self::Form => "registerForm",
        }
    }

    /// Parse a stable identifier.
    #[must_use]
    pub fn parse(id: &str) -> Option<Self> {
        Self::REQUIRED.into_iter().find(|e| e.as_str() == id)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<FieldId> for ElementId {
    fn from(field: FieldId) -> Self {
        Self::Field(field)
    }
}

/// The page markup lacks something the form needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    /// No element with this identifier.
    MissingElement(ElementId),
    /// The field has no enclosing input-group container.
    MissingInputGroup(FieldId),
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingElement(id) => write!(f, "missing element #{id}"),
            Self::MissingInputGroup(field) => {
                write!(f, "field #{field} has no enclosing input group")
            }
        }
    }
}

impl std::error::Error for PageError {}

/// Primitive operations on the page.
///
/// Implementations only store what they are told; exclusivity of state
/// classes and uniqueness of error nodes are the presenter's job.
pub trait Surface {
    /// Whether the element exists.
    fn contains(&self, id: ElementId) -> bool;

    /// Whether the field has an enclosing input group.
    fn has_input_group(&self, field: FieldId) -> bool;

    /// Current text value of an element.
    fn value(&self, id: ElementId) -> Result<String, PageError>;

    /// Replace the text value of an element (as typing would).
    fn set_value(&mut self, id: ElementId, value: &str) -> Result<(), PageError>;

    /// Add a class unless already present.
    fn add_class(&mut self, id: ElementId, class: &str) -> Result<(), PageError>;

    /// Remove a class if present.
    fn remove_class(&mut self, id: ElementId, class: &str) -> Result<(), PageError>;

    /// Replace the whole class list with `class_name` (space separated).
    fn set_class_name(&mut self, id: ElementId, class_name: &str) -> Result<(), PageError>;

    /// Current classes, in insertion order.
    fn classes(&self, id: ElementId) -> Result<Vec<String>, PageError>;

    /// Set (`Some`) or clear (`None`) the inline width style.
    fn set_width(&mut self, id: ElementId, width: Option<&str>) -> Result<(), PageError>;

    /// Inline width style, if any.
    fn width(&self, id: ElementId) -> Result<Option<String>, PageError>;

    /// Enable or disable a control.
    fn set_disabled(&mut self, id: ElementId, disabled: bool) -> Result<(), PageError>;

    /// Whether a control is disabled.
    fn is_disabled(&self, id: ElementId) -> Result<bool, PageError>;

    /// Texts of all error nodes in the field's input group.
    fn error_messages(&self, field: FieldId) -> Result<Vec<String>, PageError>;

    /// Append an error node to the field's input group.
    fn append_error_message(&mut self, field: FieldId, text: &str) -> Result<(), PageError>;

    /// Remove the first error node of the field's input group, returning
    /// whether one existed.
    fn remove_error_message(&mut self, field: FieldId) -> Result<bool, PageError>;

    /// Check that every element and input group the form needs exists.
    fn verify(&self) -> Result<(), PageError> {
        for id in ElementId::REQUIRED {
            if !self.contains(id) {
                return Err(PageError::MissingElement(id));
            }
        }
        for field in FieldId::ALL {
            if !self.has_input_group(field) {
                return Err(PageError::MissingInputGroup(field));
            }
        }
        Ok(())
    }
}
