/// Single-line text buffer for forms and prompts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    max_len: Option<usize>,
}

impl TextInput {
    pub fn with_limit(max_len: usize) -> Self {
        Self {
            value: String::new(),
            max_len: Some(max_len),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }

    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }

    pub fn push(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        if let Some(max) = self.max_len {
            if self.value.chars().count() >= max {
                return;
            }
        }
        self.value.push(c);
    }

    pub fn pop(&mut self) {
        self.value.pop();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop() {
        let mut input = TextInput::default();
        for c in "hey".chars() {
            input.push(c);
        }
        input.pop();
        assert_eq!(input.value(), "he");
    }

    #[test]
    fn test_limit_and_control_chars() {
        let mut input = TextInput::with_limit(2);
        input.push('\n');
        input.push('a');
        input.push('b');
        input.push('c');
        assert_eq!(input.value(), "ab");
    }

    #[test]
    fn test_blank() {
        let mut input = TextInput::default();
        input.set("   ");
        assert!(input.is_blank());
    }
}
