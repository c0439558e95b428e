//! Settings commands - drive the admin settings handler

use anyhow::Result;
use cartkit_lib::{PageRequest, SettingsStore};
use cartkit_twocheckout::{SettingsOutcome, Twocheckout, TwocheckoutSettings};
use serde_json::json;

use crate::ui;

pub async fn show(_verbose: bool) -> Result<()> {
    let host = super::build_host(true).await?;

    match host.module.handle_settings(&PageRequest::new()).await? {
        SettingsOutcome::Page(page) => {
            ui::header("Order statuses");
            for status in &page.statuses {
                ui::key_value(status.id.as_str(), &status.name);
            }

            ui::header("Stored settings");
            ui::json(&serde_json::to_value(&page.settings)?);
        }
        SettingsOutcome::Saved { .. } => {
            anyhow::bail!("a plain render should not save anything");
        }
    }

    Ok(())
}

pub async fn set(
    enabled: bool,
    test: bool,
    success_status: &str,
    account: Option<&str>,
    secret: Option<&str>,
    _verbose: bool,
) -> Result<()> {
    let host = super::build_host(false).await?;

    // Build the form submission the way the admin template posts it: the
    // save field, checked flags as "1", and unchecked flags simply absent.
    let mut request = PageRequest::new()
        .with_posted(Twocheckout::SAVE_ACTION, json!("1"))
        .with_posted(
            TwocheckoutSettings::KEY_ORDER_STATUS_SUCCESS,
            json!(success_status),
        );
    if enabled {
        request = request.with_posted(TwocheckoutSettings::KEY_STATUS, json!("1"));
    }
    if test {
        request = request.with_posted(TwocheckoutSettings::KEY_TEST, json!("1"));
    }
    if let Some(account) = account {
        request = request.with_posted(TwocheckoutSettings::KEY_ACCOUNT_NUMBER, json!(account));
    }
    if let Some(secret) = secret {
        request = request.with_posted(TwocheckoutSettings::KEY_SECRET_WORD, json!(secret));
    }

    match host.module.handle_settings(&request).await? {
        SettingsOutcome::Saved { path, notice } => {
            ui::success(&notice.message);
            ui::key_value("Redirect", &path);
        }
        SettingsOutcome::Page(_) => {
            anyhow::bail!("the submission was not recognized as a save");
        }
    }

    ui::header("Stored settings");
    let stored = host.settings.all(TwocheckoutSettings::NAMESPACE).await?;
    ui::json(&serde_json::to_value(stored)?);

    let settings = TwocheckoutSettings::load(host.settings.as_ref()).await?;
    if settings.is_ready() {
        ui::success("The payment method is now available at checkout");
    } else {
        ui::warning("The payment method stays unavailable until status, account number and secret word are all set");
    }

    Ok(())
}
