use crate::forms::resolve_form_id;
use crate::widget::WidgetState;
use common::model::settings::DEFAULT_API_BASE;
use common::requests::{ReadyPayload, SettingsUpdate};
use log::info;

impl WidgetState {
    /// Stores the author's credentials. A manual form id replaces the resolved
    /// one straight away.
    pub fn apply_settings(&mut self, update: SettingsUpdate) {
        if let Some(api_key) = update.api_key {
            self.settings.api_key = api_key.trim().to_string();
        }
        if let Some(api_base) = update.api_base {
            let api_base = api_base.trim().trim_end_matches('/');
            self.settings.api_base = if api_base.is_empty() {
                DEFAULT_API_BASE.to_string()
            } else {
                api_base.to_string()
            };
        }
        if let Some(manual) = update.manual_form_id {
            self.settings.manual_form_id = manual.trim().to_string();
            if !self.settings.manual_form_id.is_empty() {
                self.settings.form_id = Some(self.settings.manual_form_id.clone());
            }
        }
    }

    /// Resolves the form id once the host announces it is ready.
    pub fn apply_ready(&mut self, payload: &ReadyPayload) -> Option<&str> {
        self.settings.form_id = resolve_form_id(
            payload.form_id.as_ref(),
            payload.referrer.as_deref(),
            &self.settings.manual_form_id,
        );
        match &self.settings.form_id {
            Some(id) => info!("host ready for form {}", id),
            None => info!("host ready, form id not available"),
        }
        self.settings.form_id.as_deref()
    }
}
