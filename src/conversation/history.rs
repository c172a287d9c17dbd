use std::fmt;

/// Who spoke a recorded turn. The system preamble is injected by the prompt
/// compiler and is never stored here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Assistant => "Assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub role: Role,
    pub text: String,
}

impl Utterance {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    /// `"{Role}: {Text}"`, the only place a role becomes a string prefix.
    pub fn render(&self) -> String {
        format!("{}: {}", self.role, self.text)
    }
}

/// Append-only record of one session's conversation.
///
/// Alternation between user and assistant is expected but not enforced; a
/// failed backend call leaves the user turn in place with no reply after it.
#[derive(Debug, Clone, Default)]
pub struct History {
    utterances: Vec<Utterance>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callers reject blank text before it gets here.
    pub fn append(&mut self, role: Role, text: impl Into<String>) {
        let text = text.into();
        debug_assert!(!text.trim().is_empty(), "blank utterance appended");
        self.utterances.push(Utterance { role, text });
    }

    /// One `"{Role}: {Text}"` line per utterance, in insertion order.
    /// Calling it again starts over from the first utterance.
    pub fn render(&self) -> impl Iterator<Item = String> + '_ {
        self.utterances.iter().map(Utterance::render)
    }

    pub fn utterances(&self) -> &[Utterance] {
        &self.utterances
    }

    pub fn last(&self) -> Option<&Utterance> {
        self.utterances.last()
    }

    pub fn len(&self) -> usize {
        self.utterances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utterances.is_empty()
    }
}
