//! The admin settings form.
//!
//! One handler serves both sides of the form. A plain request renders the
//! current settings next to the installation's order statuses; a request
//! carrying the `save` field persists the submission and redirects back to
//! the module list.
//!
//! Submitted values are persisted as-is under the module's namespace; only
//! the `status` flag is coerced to a real boolean, with an absent field
//! counting as off (unchecked radio buttons are simply not submitted). The
//! `module_edit` permission is checked at the moment of persistence, not at
//! render time.

use std::collections::BTreeMap;

use serde_json::Value;

use cartkit_lib::{Notice, OrderStatusOption, PageRequest, Result};

use crate::settings::{truthy, TwocheckoutSettings};
use crate::Twocheckout;

/// Everything the settings template needs to render.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SettingsPage {
    /// Statuses offered in the success-status selector.
    pub statuses: Vec<OrderStatusOption>,
    /// Current stored settings, raw.
    pub settings: BTreeMap<String, Value>,
}

/// Outcome of a settings request.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub enum SettingsOutcome {
    /// Render the form.
    Page(SettingsPage),
    /// Submission persisted; redirect with a confirmation notice.
    Saved {
        /// Admin path to redirect to.
        path: String,
        /// Confirmation flashed after the redirect.
        notice: Notice,
    },
}

impl Twocheckout {
    /// Serves the admin settings route.
    pub async fn handle_settings(&self, request: &PageRequest) -> Result<SettingsOutcome> {
        if request.is_posted(Self::SAVE_ACTION) {
            return self.save_settings(request).await;
        }
        Ok(SettingsOutcome::Page(SettingsPage {
            statuses: self.orders.statuses().await?,
            settings: self.settings.all(TwocheckoutSettings::NAMESPACE).await?,
        }))
    }

    async fn save_settings(&self, request: &PageRequest) -> Result<SettingsOutcome> {
        // Persist the submission as-is, minus the submit field itself. Only
        // the status flag is coerced; an absent field means switched off.
        let mut fields = request.posted_fields().clone();
        fields.remove(Self::SAVE_ACTION);
        let enabled = truthy(fields.get(TwocheckoutSettings::KEY_STATUS));
        fields.insert(
            TwocheckoutSettings::KEY_STATUS.to_string(),
            Value::Bool(enabled),
        );

        // Permission is checked at the moment of persistence.
        self.access.ensure(Self::EDIT_PERMISSION)?;

        for (key, value) in fields {
            self.settings
                .set(TwocheckoutSettings::NAMESPACE, &key, value)
                .await?;
        }
        tracing::info!(module = Self::MODULE_NAME, enabled, "settings updated");

        Ok(SettingsOutcome::Saved {
            path: Self::MODULE_LIST_PATH.to_string(),
            notice: Notice::success("Settings have been updated"),
        })
    }
}
