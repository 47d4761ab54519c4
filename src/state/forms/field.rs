//! Form field value objects

use crate::state::Country;

/// A single-line text input with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: String,
    pub value: String,
    pub placeholder: String,
    /// Maximum number of characters accepted from typing (input maxlength)
    pub max_len: Option<usize>,
    pub required: bool,
}

impl FormField {
    /// Create a new text field
    pub fn text(label: &str) -> Self {
        Self {
            label: label.to_string(),
            value: String::new(),
            placeholder: String::new(),
            max_len: None,
            required: false,
        }
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Get the text value
    pub fn as_text(&self) -> &str {
        &self.value
    }

    /// Replace the value as-is
    pub fn set_text(&mut self, value: String) {
        self.value = value;
    }

    /// Push a character to the field value.
    ///
    /// Returns false when the input is already at its maximum length.
    pub fn push_char(&mut self, c: char) -> bool {
        if self
            .max_len
            .is_some_and(|max| self.value.chars().count() >= max)
        {
            return false;
        }
        self.value.push(c);
        true
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        self.value.pop();
    }

    /// Required and empty. Whitespace counts as a value.
    pub fn is_missing(&self) -> bool {
        self.required && self.value.is_empty()
    }

    /// Label with a required marker
    pub fn display_label(&self) -> String {
        if self.required {
            format!("{} *", self.label)
        } else {
            self.label.clone()
        }
    }
}

/// A select input over the available countries.
///
/// The value is the selected country id. It is kept as a plain string so a
/// programmatic write sticks even if no option carries that id.
#[derive(Debug, Clone)]
pub struct CountrySelect {
    pub label: String,
    pub options: Vec<Country>,
    pub value: String,
    pub required: bool,
}

impl CountrySelect {
    pub fn new(label: &str, options: Vec<Country>) -> Self {
        Self {
            label: label.to_string(),
            options,
            value: String::new(),
            required: true,
        }
    }

    /// Index of the option matching the current value
    pub fn selected_index(&self) -> Option<usize> {
        self.options.iter().position(|c| c.id == self.value)
    }

    pub fn selected(&self) -> Option<&Country> {
        self.selected_index().map(|i| &self.options[i])
    }

    pub fn set_value(&mut self, value: String) {
        self.value = value;
    }

    /// Option a down move lands on (stops at the last one)
    pub fn next_option(&self) -> Option<&Country> {
        let next = match self.selected_index() {
            None => 0,
            Some(i) => i + 1,
        };
        self.options.get(next).or(self.options.last())
    }

    /// Option an up move lands on (stops at the first one)
    pub fn prev_option(&self) -> Option<&Country> {
        let prev = self.selected_index().map_or(0, |i| i.saturating_sub(1));
        self.options.get(prev)
    }

    pub fn is_missing(&self) -> bool {
        self.required && self.value.is_empty()
    }

    pub fn display_label(&self) -> String {
        if self.required {
            format!("{} *", self.label)
        } else {
            self.label.clone()
        }
    }

    /// Text shown inside the select box
    pub fn display_value(&self) -> String {
        if self.options.is_empty() {
            return "No countries available".to_string();
        }
        match self.selected() {
            Some(country) => format!("{} ({})", country.name, country.code),
            None => "Select a country".to_string(),
        }
    }
}
