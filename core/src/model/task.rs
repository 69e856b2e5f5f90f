/// One to-do item: a single line of text plus a completion flag.
///
/// Tasks carry no id; identity is positional within the list that owns
/// them (see `TaskStore`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub text: String,
    pub completed: bool,
}

impl Task {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: false,
        }
    }
}
