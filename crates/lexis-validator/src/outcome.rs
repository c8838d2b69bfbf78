//! Result of a check: the violation messages it produced.

/// Messages collected by one or more checks. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    messages: Vec<String>,
}

impl Outcome {
    /// A passing outcome.
    pub fn valid() -> Self {
        Self::default()
    }

    /// A failing outcome with one message.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// Append another outcome's messages, returning whether it passed.
    pub fn merge(&mut self, other: Outcome) -> bool {
        let passed = other.is_valid();
        self.messages.extend(other.messages);
        passed
    }

    pub fn is_valid(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}

impl FromIterator<String> for Outcome {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            messages: iter.into_iter().collect(),
        }
    }
}

impl Extend<String> for Outcome {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        self.messages.extend(iter);
    }
}
