//! Typed view over the module's persisted settings.
//!
//! Settings live in the host's settings store under the `twocheckout`
//! namespace. The admin form persists submitted values as-is, so the values
//! read back here can be booleans, numbers or strings depending on how the
//! host serializes form input. [`TwocheckoutSettings::load`] normalizes all
//! of that into one struct the rest of the module works with.

use cartkit_lib::{GatewayConfig, OrderStatusId, Result, SettingsStore};
use serde_json::Value;

/// Snapshot of the module configuration at one point in time.
///
/// Loaded fresh for every request that needs it, never cached, so settings
/// edits take effect on the next checkout without a restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwocheckoutSettings {
    /// Whether the method is switched on in the admin panel.
    pub enabled: bool,
    /// Run gateway calls against the sandbox endpoint.
    pub test_mode: bool,
    /// Status an order moves to once payment succeeds.
    pub order_status_success: OrderStatusId,
    /// 2Checkout merchant account number.
    pub account_number: String,
    /// 2Checkout secret word used to verify notifications.
    pub secret_word: String,
}

impl TwocheckoutSettings {
    /// Namespace all of this module's settings are stored under.
    pub const NAMESPACE: &'static str = "twocheckout";

    pub const KEY_STATUS: &'static str = "status";
    pub const KEY_TEST: &'static str = "test";
    pub const KEY_ORDER_STATUS_SUCCESS: &'static str = "order_status_success";
    pub const KEY_ACCOUNT_NUMBER: &'static str = "accountNumber";
    pub const KEY_SECRET_WORD: &'static str = "secretWord";

    /// Reads the current settings from the store.
    ///
    /// Missing keys fall back to disabled / empty rather than erroring, so a
    /// freshly installed module loads cleanly before it is configured.
    pub async fn load(store: &dyn SettingsStore) -> Result<Self> {
        let values = store.all(Self::NAMESPACE).await?;
        Ok(Self {
            enabled: truthy(values.get(Self::KEY_STATUS)),
            test_mode: truthy(values.get(Self::KEY_TEST)),
            order_status_success: OrderStatusId::new(text(values.get(Self::KEY_ORDER_STATUS_SUCCESS))),
            account_number: text(values.get(Self::KEY_ACCOUNT_NUMBER)),
            secret_word: text(values.get(Self::KEY_SECRET_WORD)),
        })
    }

    /// Writes the typed settings back to the store.
    pub async fn save(&self, store: &dyn SettingsStore) -> Result<()> {
        store
            .set(Self::NAMESPACE, Self::KEY_STATUS, Value::Bool(self.enabled))
            .await?;
        store
            .set(Self::NAMESPACE, Self::KEY_TEST, Value::Bool(self.test_mode))
            .await?;
        store
            .set(
                Self::NAMESPACE,
                Self::KEY_ORDER_STATUS_SUCCESS,
                Value::String(self.order_status_success.to_string()),
            )
            .await?;
        store
            .set(
                Self::NAMESPACE,
                Self::KEY_ACCOUNT_NUMBER,
                Value::String(self.account_number.clone()),
            )
            .await?;
        store
            .set(
                Self::NAMESPACE,
                Self::KEY_SECRET_WORD,
                Value::String(self.secret_word.clone()),
            )
            .await?;
        Ok(())
    }

    /// The method is offered at checkout only when it is enabled and both
    /// gateway credentials are present.
    pub fn is_ready(&self) -> bool {
        self.enabled && !self.account_number.is_empty() && !self.secret_word.is_empty()
    }

    /// Gateway configuration for one request against `currency`.
    pub fn gateway_config(&self, currency: &str) -> GatewayConfig {
        GatewayConfig {
            test_mode: self.test_mode,
            currency: currency.to_string(),
            account_number: self.account_number.clone(),
            secret_word: self.secret_word.clone(),
        }
    }
}

impl Default for TwocheckoutSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            test_mode: false,
            order_status_success: OrderStatusId::new(""),
            account_number: String::new(),
            secret_word: String::new(),
        }
    }
}

/// Loose boolean coercion for stored flag values.
///
/// Accepts the shapes the admin form and older data can produce: real
/// booleans, numbers (non-zero is true) and strings, where only the empty
/// string and `"0"` count as false.
pub(crate) fn truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(text)) => !text.is_empty() && text != "0",
        _ => false,
    }
}

/// String coercion for stored text values.
fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartkit_lib::memory::MemorySettings;
    use serde_json::json;

    #[test]
    fn test_truthy_accepts_form_shapes() {
        assert!(truthy(Some(&json!(true))));
        assert!(truthy(Some(&json!(1))));
        assert!(truthy(Some(&json!("1"))));
        assert!(truthy(Some(&json!("yes"))));

        assert!(!truthy(Some(&json!(false))));
        assert!(!truthy(Some(&json!(0))));
        assert!(!truthy(Some(&json!("0"))));
        assert!(!truthy(Some(&json!(""))));
        assert!(!truthy(Some(&json!(null))));
        assert!(!truthy(None));
    }

    #[tokio::test]
    async fn test_load_defaults_when_unconfigured() {
        let store = MemorySettings::new();
        let settings = TwocheckoutSettings::load(&store)
            .await
            .unwrap();

        assert_eq!(settings, TwocheckoutSettings::default());
        assert!(!settings.is_ready());
    }

    #[tokio::test]
    async fn test_load_coerces_stored_values() {
        let store = MemorySettings::new();
        store
            .set(TwocheckoutSettings::NAMESPACE, "status", json!("1"))
            .await
            .unwrap();
        store
            .set(TwocheckoutSettings::NAMESPACE, "test", json!(true))
            .await
            .unwrap();
        store
            .set(TwocheckoutSettings::NAMESPACE, "order_status_success", json!(5))
            .await
            .unwrap();
        store
            .set(TwocheckoutSettings::NAMESPACE, "accountNumber", json!("801234"))
            .await
            .unwrap();
        store
            .set(TwocheckoutSettings::NAMESPACE, "secretWord", json!("hunter2"))
            .await
            .unwrap();

        let settings = TwocheckoutSettings::load(&store).await.unwrap();
        assert!(settings.enabled);
        assert!(settings.test_mode);
        assert_eq!(settings.order_status_success.as_str(), "5");
        assert_eq!(settings.account_number, "801234");
        assert_eq!(settings.secret_word, "hunter2");
        assert!(settings.is_ready());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let store = MemorySettings::new();
        let settings = TwocheckoutSettings {
            enabled: true,
            test_mode: true,
            order_status_success: OrderStatusId::new("5"),
            account_number: "801234".into(),
            secret_word: "hunter2".into(),
        };
        settings.save(&store).await.unwrap();

        let loaded = TwocheckoutSettings::load(&store).await.unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_is_ready_needs_all_three() {
        let ready = TwocheckoutSettings {
            enabled: true,
            account_number: "801234".into(),
            secret_word: "hunter2".into(),
            ..TwocheckoutSettings::default()
        };
        assert!(ready.is_ready());

        let disabled = TwocheckoutSettings {
            enabled: false,
            ..ready.clone()
        };
        assert!(!disabled.is_ready());

        let no_account = TwocheckoutSettings {
            account_number: String::new(),
            ..ready.clone()
        };
        assert!(!no_account.is_ready());

        let no_secret = TwocheckoutSettings {
            secret_word: String::new(),
            ..ready
        };
        assert!(!no_secret.is_ready());
    }

    #[test]
    fn test_gateway_config_takes_request_currency() {
        let settings = TwocheckoutSettings {
            enabled: true,
            test_mode: true,
            order_status_success: OrderStatusId::new("5"),
            account_number: "801234".into(),
            secret_word: "hunter2".into(),
        };

        let config = settings.gateway_config("EUR");
        assert!(config.test_mode);
        assert_eq!(config.currency, "EUR");
        assert_eq!(config.account_number, "801234");
        assert_eq!(config.secret_word, "hunter2");
    }
}
