/// What the user has typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub problem_text: String,
    pub answer_text: String,
}

impl FormState {
    pub fn is_complete(&self) -> bool {
        !self.problem_text.trim().is_empty() && !self.answer_text.trim().is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.problem_text.is_empty() && self.answer_text.is_empty()
    }
}

/// Everything a renderer shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub form: FormState,
    /// Overwritten on every transition. Empty means nothing to show.
    pub status: String,
    /// `None` until a solve call succeeds.
    pub solution: Option<String>,
}
