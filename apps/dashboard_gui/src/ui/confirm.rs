use client_core::ConfirmPrompt;

/// Blocking yes/no dialog from the platform.
pub struct NativeConfirm;

impl ConfirmPrompt for NativeConfirm {
    fn confirm(&mut self, message: &str) -> bool {
        let answer = rfd::MessageDialog::new()
            .set_title("Confirm")
            .set_description(message)
            .set_level(rfd::MessageLevel::Warning)
            .set_buttons(rfd::MessageButtons::YesNo)
            .show();
        matches!(answer, rfd::MessageDialogResult::Yes)
    }
}
