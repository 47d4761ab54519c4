//! Application state and core logic

use crate::backend::{BackendClientTrait, BackendError, CreateProvinceProps, SubmitOutcome};
use crate::routes::{self, RouteTable};
use crate::state::{AppState, FieldName, Focus, Form, FormButton, ProvinceCreatePage, View};
use anyhow::{anyhow, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::Arc;
use tokio::sync::oneshot::{self, error::TryRecvError};

/// Flash shown after a successful create redirect
const CREATED_FLASH: &str = "Province created.";

type PendingProps = oneshot::Receiver<Result<CreateProvinceProps, BackendError>>;

/// What a key press on the create form asks the app to do
enum FormAction {
    None,
    Submit,
    Leave,
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Backend client used for page visits and submissions
    client: Arc<dyn BackendClientTrait>,
    /// Named routes resolved at startup
    routes: RouteTable,
    /// Create page props still in flight
    page_load: Option<PendingProps>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(client: Arc<dyn BackendClientTrait>, routes: RouteTable) -> Self {
        Self {
            state: AppState::default(),
            client,
            routes,
            page_load: None,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Navigate to a named route.
    ///
    /// The view switches immediately. Leaving the create view drops its page,
    /// including any pending submission or props load. Visiting it starts the
    /// country list fetch in the background; [`App::tick`] mounts the page
    /// once the props arrive.
    pub fn visit(&mut self, route_name: &str) -> Result<()> {
        let path = self.routes.resolve(route_name)?.to_string();
        let view = View::for_route(route_name)
            .ok_or_else(|| anyhow!("Route [{route_name}] has no view"))?;

        self.state.create_page = None;
        self.page_load = None;

        if view == View::ProvinceCreate {
            let (tx, rx) = oneshot::channel();
            let client = self.client.clone();
            let props_path = path.clone();
            tokio::spawn(async move {
                let result = client.visit_create(&props_path).await;
                // Receiver is gone if the page was left while loading
                let _ = tx.send(result);
            });
            self.page_load = Some(rx);
        }

        tracing::debug!("Navigated to {route_name} ({path})");
        self.state.current_view = view;
        self.state.current_path = path;
        Ok(())
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        // Global quit: Ctrl+C
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return Ok(());
        }

        // Clear any status messages on key press
        self.state.flash = None;

        match self.state.current_view {
            View::Dashboard => self.handle_dashboard_key(key)?,
            View::Provinces => self.handle_provinces_key(key)?,
            View::ProvinceCreate => self.handle_province_create_key(key)?,
        }
        Ok(())
    }

    /// Pick up finished background work. Called once per event loop tick.
    pub fn tick(&mut self) -> Result<()> {
        self.poll_page_load();

        let outcome = match self.state.create_page.as_mut() {
            Some(page) => page.submitter.poll(),
            None => None,
        };

        match outcome {
            Some(SubmitOutcome::Redirect { location }) => {
                self.state.backend_reachable = Some(true);
                let route = location
                    .as_deref()
                    .and_then(|l| self.routes.name_for_location(l))
                    .unwrap_or(routes::PROVINCES_INDEX);
                self.visit(route)?;
                self.state.flash = Some(CREATED_FLASH.to_string());
            }
            Some(SubmitOutcome::Invalid(_)) => {
                self.state.backend_reachable = Some(true);
            }
            None => {}
        }
        Ok(())
    }

    /// Mount the create page once its props have arrived.
    ///
    /// A failed load still mounts the form, with no countries to pick.
    fn poll_page_load(&mut self) {
        let Some(rx) = self.page_load.as_mut() else {
            return;
        };
        let countries = match rx.try_recv() {
            Err(TryRecvError::Empty) => return,
            Ok(Ok(props)) => {
                self.state.backend_reachable = Some(true);
                props.countries
            }
            Ok(Err(e)) => {
                tracing::warn!("Failed to load create page props: {e}");
                self.state.backend_reachable = Some(false);
                Vec::new()
            }
            Err(TryRecvError::Closed) => {
                tracing::warn!("Create page load ended without a response");
                Vec::new()
            }
        };
        self.page_load = None;
        self.state.create_page = Some(ProvinceCreatePage::new(countries));
    }

    /// Submit handler of the create form.
    ///
    /// Ignored while the save control is disabled. Empty required fields
    /// block the request the way a browser would.
    pub fn submit(&mut self) -> Result<()> {
        let Some(page) = self.state.create_page.as_mut() else {
            return Ok(());
        };
        if !page.save_enabled() {
            tracing::debug!("Save control disabled, ignoring submit");
            return Ok(());
        }
        if !page.form.check_required() {
            return Ok(());
        }

        let path = self.routes.resolve(routes::PROVINCES_STORE)?.to_string();
        page.submitter
            .post(self.client.clone(), path, page.form.data());
        Ok(())
    }

    /// Handle keys in Dashboard view
    fn handle_dashboard_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('p') | KeyCode::Enter => self.visit(routes::PROVINCES_INDEX)?,
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
        Ok(())
    }

    /// Handle keys in Provinces list view
    fn handle_provinces_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('n') => self.visit(routes::PROVINCES_CREATE)?,
            KeyCode::Esc => self.visit(routes::DASHBOARD)?,
            _ => {}
        }
        Ok(())
    }

    /// Handle keys in Province Create view
    fn handle_province_create_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(page) = self.state.create_page.as_mut() else {
            if key.code == KeyCode::Esc {
                self.visit(routes::PROVINCES_INDEX)?;
            }
            return Ok(());
        };
        let form = &mut page.form;
        let focus = form.focus();
        let on_country = focus == Focus::Field(FieldName::CountryId);
        let on_actions = focus == Focus::Actions;

        let action = match key.code {
            // Keyboard shortcuts (work from anywhere)
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                FormAction::Submit
            }
            KeyCode::Char('w') if key.modifiers.contains(crate::platform::SAVE_MODIFIER) => {
                FormAction::Submit
            }
            KeyCode::Esc => FormAction::Leave,
            KeyCode::Tab => {
                form.next_field();
                FormAction::None
            }
            KeyCode::BackTab => {
                form.prev_field();
                FormAction::None
            }
            KeyCode::Enter => match focus {
                Focus::Back => FormAction::Leave,
                Focus::Actions => match form.selected_button {
                    FormButton::Save => FormAction::Submit,
                    FormButton::Cancel => FormAction::Leave,
                },
                // Enter inside a text input submits its form
                Focus::Field(FieldName::Code) | Focus::Field(FieldName::Name) => {
                    FormAction::Submit
                }
                Focus::Field(FieldName::CountryId) => FormAction::None,
            },
            KeyCode::Up | KeyCode::Left if on_country => {
                form.select_prev_country();
                FormAction::None
            }
            KeyCode::Down | KeyCode::Right if on_country => {
                form.select_next_country();
                FormAction::None
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down if on_actions => {
                form.selected_button.toggle();
                FormAction::None
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                form.input_char(c);
                FormAction::None
            }
            KeyCode::Backspace => {
                form.backspace();
                FormAction::None
            }
            _ => FormAction::None,
        };

        match action {
            FormAction::Submit => self.submit()?,
            FormAction::Leave => self.visit(routes::PROVINCES_INDEX)?,
            FormAction::None => {}
        }
        Ok(())
    }
}
