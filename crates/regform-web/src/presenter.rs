#![forbid(unsafe_code)]

//! Idempotent rendering of field views, the strength score and the busy
//! submit control onto a [`Surface`].

use regform_core::{FieldId, FieldState, FieldView, StrengthScore};

use crate::surface::{ElementId, LOADING_CLASS, PageError, STRENGTH_BAR_CLASS, Surface};

/// Width of the strength indicator when the score is zero.
pub const EMPTY_STRENGTH_WIDTH: &str = "0%";

const STATE_CLASSES: [&str; 2] = ["success", "error"];

/// Stateless renderer; every call derives the page from the view alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldPresenter;

impl FieldPresenter {
    /// Render a field's view.
    ///
    /// Leaves exactly one state class (none for `normal`) and at most one
    /// error node, which carries the message when the state is `error`.
    pub fn render<S: Surface + ?Sized>(
        surface: &mut S,
        field: FieldId,
        view: &FieldView,
    ) -> Result<(), PageError> {
        let id = ElementId::Field(field);
        for class in STATE_CLASSES {
            surface.remove_class(id, class)?;
        }
        if let Some(class) = view.state.class() {
            surface.add_class(id, class)?;
        }
        surface.remove_error_message(field)?;
        if let (FieldState::Error, Some(message)) = (view.state, view.message.as_deref()) {
            surface.append_error_message(field, message)?;
        }
        tracing::debug!(field = %field, state = ?view.state, "field rendered");
        Ok(())
    }

    /// Render the strength indicator.
    ///
    /// The class list is reset to the base class. A zero score pins the
    /// width to `0%`; any other score clears the inline width and adds the
    /// band class.
    pub fn render_strength<S: Surface + ?Sized>(
        surface: &mut S,
        score: StrengthScore,
    ) -> Result<(), PageError> {
        let id = ElementId::StrengthBar;
        surface.set_class_name(id, STRENGTH_BAR_CLASS)?;
        match score.band().class() {
            None => surface.set_width(id, Some(EMPTY_STRENGTH_WIDTH))?,
            Some(class) => {
                surface.set_width(id, None)?;
                surface.add_class(id, class)?;
            }
        }
        tracing::debug!(score = %score, "strength rendered");
        Ok(())
    }

    /// Mark the submit control busy and disable it.
    pub fn render_submitting<S: Surface + ?Sized>(surface: &mut S) -> Result<(), PageError> {
        surface.add_class(ElementId::SubmitButton, LOADING_CLASS)?;
        surface.set_disabled(ElementId::SubmitButton, true)
    }
}
