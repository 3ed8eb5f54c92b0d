//! User confirmation and error notification.

use crate::geometry::Rect;

/// Answer to the keep/discard question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Keep,
    Discard,
}

/// Asks the user whether a freshly drawn rectangle should be kept.
///
/// Implementations block until the user has answered.
pub trait ConfirmPrompt {
    fn confirm_rectangle(&mut self, rect: &Rect) -> Decision;
}

impl<F> ConfirmPrompt for F
where
    F: FnMut(&Rect) -> Decision,
{
    fn confirm_rectangle(&mut self, rect: &Rect) -> Decision {
        self(rect)
    }
}

/// Modal yes/no dialog shown through the platform's native dialogs.
#[derive(Debug, Clone)]
pub struct DialogPrompt {
    title: String,
    message: String,
}

impl DialogPrompt {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

impl Default for DialogPrompt {
    fn default() -> Self {
        Self::new("Confirm", "Keep the rectangle?")
    }
}

impl ConfirmPrompt for DialogPrompt {
    fn confirm_rectangle(&mut self, rect: &Rect) -> Decision {
        log::debug!(
            "Asking to keep rectangle at ({:.1}, {:.1}) size {:.1}x{:.1}",
            rect.x,
            rect.y,
            rect.width,
            rect.height
        );

        let answer = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Info)
            .set_title(&self.title)
            .set_description(&self.message)
            .set_buttons(rfd::MessageButtons::YesNo)
            .show();

        match answer {
            rfd::MessageDialogResult::Yes => Decision::Keep,
            _ => Decision::Discard,
        }
    }
}

/// Show a blocking error dialog.
pub fn show_error(title: &str, message: &str) {
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title(title)
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}
