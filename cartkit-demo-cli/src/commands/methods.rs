//! Methods command - show the checkout payment-method listing

use anyhow::Result;

use crate::ui;

pub async fn run(unconfigured: bool, _verbose: bool) -> Result<()> {
    let host = super::build_host(!unconfigured).await?;

    let methods = host.modules.payment_methods().await?;

    ui::header("Payment methods");
    if methods.is_empty() {
        ui::info("No module contributes a payment method");
        return Ok(());
    }

    for entry in &methods {
        let availability = if entry.enabled {
            "available"
        } else {
            "unavailable"
        };
        ui::key_value(
            entry.id.as_str(),
            &format!(
                "{} [{}] template={} icon={}",
                entry.title, availability, entry.complete_template, entry.image
            ),
        );
    }

    if unconfigured {
        ui::info("The entry is listed but unavailable until status, account number and secret word are all set");
    }

    Ok(())
}
