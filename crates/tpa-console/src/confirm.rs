//! Yes/no confirmation before destructive actions

/// Asked before a program is deleted
pub trait Confirmation {
    /// Ask `prompt`; `true` means go ahead
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirmation for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Fixed answer, for non-interactive use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoConfirm(bool);

impl AutoConfirm {
    /// Always agree
    #[inline]
    #[must_use]
    pub fn yes() -> Self {
        Self(true)
    }

    /// Always refuse
    #[inline]
    #[must_use]
    pub fn no() -> Self {
        Self(false)
    }
}

impl Confirmation for AutoConfirm {
    fn confirm(&mut self, _prompt: &str) -> bool {
        self.0
    }
}
