//! Application state definitions

use super::forms::{FormSubmitter, ProvinceCreateForm};
use crate::routes;
use serde::{Deserialize, Deserializer, Serialize};

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    Provinces,
    ProvinceCreate,
}

impl View {
    /// View rendered for a named route
    pub fn for_route(name: &str) -> Option<Self> {
        match name {
            routes::DASHBOARD => Some(Self::Dashboard),
            routes::PROVINCES_INDEX => Some(Self::Provinces),
            routes::PROVINCES_CREATE => Some(Self::ProvinceCreate),
            _ => None,
        }
    }

    /// Breadcrumb trail leading to this view
    pub fn breadcrumbs(&self) -> &'static [&'static str] {
        match self {
            Self::Dashboard => &["Dashboard"],
            Self::Provinces => &["Dashboard", "Provinces"],
            Self::ProvinceCreate => &["Dashboard", "Provinces", "Create"],
        }
    }
}

/// Country offered in the province form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub name: String,
    pub code: String,
}

impl Country {
    pub fn new(id: &str, name: &str, code: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            code: code.to_string(),
        }
    }
}

/// Backends may key countries by integer; the form only ever sees strings
fn id_from_string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(id) => id,
        Id::Number(id) => id.to_string(),
    })
}

/// The mounted province create page: form values plus submission state
#[derive(Debug)]
pub struct ProvinceCreatePage {
    pub form: ProvinceCreateForm,
    pub submitter: FormSubmitter,
}

impl ProvinceCreatePage {
    pub fn new(countries: Vec<Country>) -> Self {
        Self {
            form: ProvinceCreateForm::new(countries),
            submitter: FormSubmitter::new(),
        }
    }

    /// The save control is enabled exactly when nothing is in flight
    pub fn save_enabled(&self) -> bool {
        !self.submitter.processing()
    }

    pub fn save_label(&self) -> &'static str {
        if self.submitter.processing() {
            "Saving..."
        } else {
            "Save"
        }
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    pub current_view: View,
    /// Path of the current view, as resolved from the route table
    pub current_path: String,
    /// Present only while the create view is mounted
    pub create_page: Option<ProvinceCreatePage>,
    /// Outcome of the last backend request, None before the first one
    pub backend_reachable: Option<bool>,
    /// One-shot message shown in the status bar
    pub flash: Option<String>,
}
