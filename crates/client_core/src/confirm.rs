/// Blocking yes/no gate in front of destructive actions.
pub trait ConfirmPrompt {
    fn confirm(&mut self, message: &str) -> bool;
}

pub struct AlwaysConfirm;

impl ConfirmPrompt for AlwaysConfirm {
    fn confirm(&mut self, _message: &str) -> bool {
        true
    }
}

pub struct NeverConfirm;

impl ConfirmPrompt for NeverConfirm {
    fn confirm(&mut self, _message: &str) -> bool {
        false
    }
}
