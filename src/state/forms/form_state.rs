//! Province create form state

use super::field::{CountrySelect, FormField};
use crate::state::Country;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maximum length of a province code
pub const CODE_MAX_LEN: usize = 10;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// Fields submitted to the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    CountryId,
    Code,
    Name,
}

impl FieldName {
    pub const ALL: [FieldName; 3] = [FieldName::CountryId, FieldName::Code, FieldName::Name];

    /// Wire name of the field, also the key of its error message
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CountryId => "country_id",
            Self::Code => "code",
            Self::Name => "name",
        }
    }
}

/// The flat record sent when storing a province
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvinceForm {
    pub country_id: String,
    pub code: String,
    pub name: String,
}

/// Field-level error messages keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(HashMap<String, String>);

impl FieldErrors {
    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.0.get(field.as_str()).map(String::as_str)
    }

    #[cfg(test)]
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<(String, String)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// What has keyboard focus on the create page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Back,
    Field(FieldName),
    Actions,
}

/// Buttons in the actions row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormButton {
    Cancel,
    #[default]
    Save,
}

impl FormButton {
    pub fn toggle(&mut self) {
        *self = match self {
            Self::Cancel => Self::Save,
            Self::Save => Self::Cancel,
        };
    }
}

/// Message shown next to a required field left empty on submit
pub const REQUIRED_HINT: &str = "Please fill out this field.";

/// Editable province record plus focus bookkeeping
#[derive(Debug, Clone)]
pub struct ProvinceCreateForm {
    pub country: CountrySelect,
    pub code: FormField,
    pub name: FormField,
    /// 0=Back, 1=Country, 2=Code, 3=Name, 4=Actions
    pub active_field_index: usize,
    pub selected_button: FormButton,
    /// Required-field hint from the last blocked submit
    pub required_hint: Option<FieldName>,
}

impl ProvinceCreateForm {
    pub fn new(countries: Vec<Country>) -> Self {
        Self {
            country: CountrySelect::new("Country", countries),
            code: FormField::text("Code")
                .with_placeholder("e.g. CA")
                .with_max_len(CODE_MAX_LEN)
                .required(),
            name: FormField::text("Name")
                .with_placeholder("e.g. California")
                .required(),
            active_field_index: 1,
            selected_button: FormButton::default(),
            required_hint: None,
        }
    }

    pub fn focus(&self) -> Focus {
        match self.active_field_index {
            0 => Focus::Back,
            1 => Focus::Field(FieldName::CountryId),
            2 => Focus::Field(FieldName::Code),
            3 => Focus::Field(FieldName::Name),
            _ => Focus::Actions,
        }
    }

    pub fn focus_field(&mut self, field: FieldName) {
        self.active_field_index = match field {
            FieldName::CountryId => 1,
            FieldName::Code => 2,
            FieldName::Name => 3,
        };
    }

    /// Snapshot of the current values
    pub fn data(&self) -> ProvinceForm {
        ProvinceForm {
            country_id: self.country.value.clone(),
            code: self.code.as_text().to_string(),
            name: self.name.as_text().to_string(),
        }
    }

    pub fn value(&self, field: FieldName) -> &str {
        match field {
            FieldName::CountryId => &self.country.value,
            FieldName::Code => self.code.as_text(),
            FieldName::Name => self.name.as_text(),
        }
    }

    /// Replace one field's value as-is
    pub fn set_field(&mut self, field: FieldName, value: String) {
        match field {
            FieldName::CountryId => self.country.set_value(value),
            FieldName::Code => self.code.set_text(value),
            FieldName::Name => self.name.set_text(value),
        }
        self.clear_hint_for(field);
    }

    /// Type a character into the focused text input
    pub fn input_char(&mut self, c: char) {
        let field = match self.focus() {
            Focus::Field(FieldName::Code) => FieldName::Code,
            Focus::Field(FieldName::Name) => FieldName::Name,
            _ => return,
        };
        let changed = match field {
            FieldName::Code => self.code.push_char(c),
            _ => self.name.push_char(c),
        };
        if changed {
            self.clear_hint_for(field);
        }
    }

    /// Delete the last character of the focused text input
    pub fn backspace(&mut self) {
        match self.focus() {
            Focus::Field(FieldName::Code) => self.code.pop_char(),
            Focus::Field(FieldName::Name) => self.name.pop_char(),
            _ => {}
        }
    }

    pub fn select_next_country(&mut self) {
        if let Some(id) = self.country.next_option().map(|c| c.id.clone()) {
            self.set_field(FieldName::CountryId, id);
        }
    }

    pub fn select_prev_country(&mut self) {
        if let Some(id) = self.country.prev_option().map(|c| c.id.clone()) {
            self.set_field(FieldName::CountryId, id);
        }
    }

    /// First required field without a value, in display order
    pub fn first_missing_required(&self) -> Option<FieldName> {
        FieldName::ALL.into_iter().find(|field| match field {
            FieldName::CountryId => self.country.is_missing(),
            FieldName::Code => self.code.is_missing(),
            FieldName::Name => self.name.is_missing(),
        })
    }

    /// Block submission on the first empty required field.
    ///
    /// Focuses that field and raises the hint. Returns true when the form may
    /// be sent.
    pub fn check_required(&mut self) -> bool {
        match self.first_missing_required() {
            Some(field) => {
                self.focus_field(field);
                self.required_hint = Some(field);
                false
            }
            None => {
                self.required_hint = None;
                true
            }
        }
    }

    fn clear_hint_for(&mut self, field: FieldName) {
        if self.required_hint == Some(field) {
            self.required_hint = None;
        }
    }
}

impl Form for ProvinceCreateForm {
    fn field_count(&self) -> usize {
        5 // back, country, code, name, actions
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(4);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    fn california() -> Vec<Country> {
        vec![Country::new("1", "California", "CA")]
    }

    mod province_form {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_serializes_to_flat_record() {
            let form = ProvinceForm {
                country_id: "1".to_string(),
                code: "CA".to_string(),
                name: "California".to_string(),
            };
            assert_eq!(
                serde_json::to_value(&form).unwrap(),
                serde_json::json!({"country_id": "1", "code": "CA", "name": "California"})
            );
        }

        #[test]
        fn test_default_is_empty() {
            let form = ProvinceForm::default();
            assert_eq!(form.country_id, "");
            assert_eq!(form.code, "");
            assert_eq!(form.name, "");
        }
    }

    mod field_errors {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_absent_key_means_no_error() {
            let errors = FieldErrors::default();
            assert!(errors.is_empty());
            assert!(errors.get(FieldName::Code).is_none());
        }

        #[test]
        fn test_get_by_field_name() {
            let errors: FieldErrors = [("code".to_string(), "already taken".to_string())]
                .into_iter()
                .collect();
            assert_eq!(errors.get(FieldName::Code), Some("already taken"));
            assert!(errors.get(FieldName::Name).is_none());
            assert_eq!(errors.len(), 1);
        }
    }

    mod province_create_form {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_new_has_correct_defaults() {
            let form = ProvinceCreateForm::new(california());
            assert_eq!(form.data(), ProvinceForm::default());
            assert_eq!(form.focus(), Focus::Field(FieldName::CountryId));
            assert_eq!(form.selected_button, FormButton::Save);
            assert_eq!(form.code.max_len, Some(CODE_MAX_LEN));
            assert!(form.required_hint.is_none());
        }

        #[test]
        fn test_next_field_cycles() {
            let mut form = ProvinceCreateForm::new(california());
            for _ in 0..5 {
                form.next_field();
            }
            assert_eq!(form.active_field_index, 1); // Wrapped back
        }

        #[test]
        fn test_prev_field_wraps_from_back_to_actions() {
            let mut form = ProvinceCreateForm::new(california());
            form.prev_field();
            assert_eq!(form.focus(), Focus::Back);
            form.prev_field();
            assert_eq!(form.focus(), Focus::Actions);
        }

        #[test]
        fn test_set_active_field_clamps() {
            let mut form = ProvinceCreateForm::new(california());
            form.set_active_field(100);
            assert_eq!(form.active_field_index, 4);
        }

        #[test]
        fn test_input_goes_to_focused_field() {
            let mut form = ProvinceCreateForm::new(california());
            form.focus_field(FieldName::Code);
            form.input_char('C');
            form.input_char('A');
            form.focus_field(FieldName::Name);
            for c in "Cal".chars() {
                form.input_char(c);
            }
            form.backspace();
            assert_eq!(form.code.as_text(), "CA");
            assert_eq!(form.name.as_text(), "Ca");
        }

        #[test]
        fn test_input_on_select_is_ignored() {
            let mut form = ProvinceCreateForm::new(california());
            form.input_char('x');
            assert_eq!(form.data(), ProvinceForm::default());
        }

        #[test]
        fn test_code_stops_at_ten_chars() {
            let mut form = ProvinceCreateForm::new(california());
            form.focus_field(FieldName::Code);
            for c in "ABCDEFGHIJKL".chars() {
                form.input_char(c);
            }
            assert_eq!(form.code.as_text(), "ABCDEFGHIJ");
        }

        #[test]
        fn test_values_are_kept_verbatim() {
            let mut form = ProvinceCreateForm::new(california());
            form.set_field(FieldName::Name, "  lower case  ".to_string());
            assert_eq!(form.value(FieldName::Name), "  lower case  ");
        }

        #[test]
        fn test_check_required_focuses_first_missing() {
            let mut form = ProvinceCreateForm::new(california());
            form.set_field(FieldName::CountryId, "1".to_string());
            form.set_field(FieldName::Name, "California".to_string());
            form.active_field_index = 4;

            assert!(!form.check_required());
            assert_eq!(form.focus(), Focus::Field(FieldName::Code));
            assert_eq!(form.required_hint, Some(FieldName::Code));
        }

        #[test]
        fn test_editing_clears_required_hint() {
            let mut form = ProvinceCreateForm::new(california());
            assert!(!form.check_required());
            assert_eq!(form.required_hint, Some(FieldName::CountryId));
            form.select_next_country();
            assert!(form.required_hint.is_none());
        }

        #[test]
        fn test_check_required_passes_when_filled() {
            let mut form = ProvinceCreateForm::new(california());
            form.select_next_country();
            form.set_field(FieldName::Code, "CA".to_string());
            form.set_field(FieldName::Name, "California".to_string());
            assert!(form.check_required());
            assert_eq!(
                form.data(),
                ProvinceForm {
                    country_id: "1".to_string(),
                    code: "CA".to_string(),
                    name: "California".to_string(),
                }
            );
        }

        #[test]
        fn test_button_toggle() {
            let mut button = FormButton::Save;
            button.toggle();
            assert_eq!(button, FormButton::Cancel);
            button.toggle();
            assert_eq!(button, FormButton::Save);
        }
    }

    fn field_from(n: u8) -> FieldName {
        FieldName::ALL[(n % 3) as usize]
    }

    #[quickcheck]
    fn prop_last_write_wins_per_field(writes: Vec<(u8, String)>) -> bool {
        let mut form = ProvinceCreateForm::new(california());
        let mut expected: HashMap<FieldName, String> = HashMap::new();
        for (n, value) in writes {
            let field = field_from(n);
            form.set_field(field, value.clone());
            expected.insert(field, value);
        }
        FieldName::ALL
            .iter()
            .all(|f| form.value(*f) == expected.get(f).map(String::as_str).unwrap_or(""))
    }
}
