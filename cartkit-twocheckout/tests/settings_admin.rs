//! Tests of the admin settings form: rendering, submission coercion,
//! permission enforcement and the post-save redirect.

mod harness;

use cartkit_lib::memory::StaticAccess;
use cartkit_lib::{CartkitError, NoticeLevel, PageRequest, SettingsStore, StoreModule};
use cartkit_twocheckout::{SettingsOutcome, Twocheckout, TwocheckoutSettings};
use harness::Harness;
use serde_json::json;

fn save_request() -> PageRequest {
    PageRequest::new()
        .with_posted(Twocheckout::SAVE_ACTION, json!("1"))
        .with_posted("status", json!("1"))
        .with_posted("test", json!("1"))
        .with_posted("order_status_success", json!("5"))
        .with_posted("accountNumber", json!("801234"))
        .with_posted("secretWord", json!("hunter2"))
}

#[tokio::test]
async fn test_render_lists_statuses_and_current_values() {
    let harness = Harness::new();
    harness.configure().await;

    let outcome = harness
        .module
        .handle_settings(&PageRequest::new())
        .await
        .unwrap();

    let page = match outcome {
        SettingsOutcome::Page(page) => page,
        other => panic!("expected the form, got {:?}", other),
    };

    // Every installation status is offered for the success selector.
    let ids: Vec<&str> = page.statuses.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["awaiting-payment", "processing", "canceled", "5"]);

    assert_eq!(page.settings.get("accountNumber"), Some(&json!("801234")));
    assert_eq!(page.settings.get("status"), Some(&json!(true)));
}

#[tokio::test]
async fn test_save_persists_submission_and_redirects() {
    let harness = Harness::new();

    let outcome = harness.module.handle_settings(&save_request()).await.unwrap();

    match outcome {
        SettingsOutcome::Saved { path, notice } => {
            assert_eq!(path, "admin/module/list");
            assert_eq!(notice.level, NoticeLevel::Success);
            assert_eq!(notice.message, "Settings have been updated");
        }
        other => panic!("expected a save redirect, got {:?}", other),
    }

    let stored = harness.settings.all("twocheckout").await.unwrap();
    assert_eq!(stored.get("status"), Some(&json!(true)));
    assert_eq!(stored.get("test"), Some(&json!("1")));
    assert_eq!(stored.get("order_status_success"), Some(&json!("5")));
    assert_eq!(stored.get("accountNumber"), Some(&json!("801234")));
    assert_eq!(stored.get("secretWord"), Some(&json!("hunter2")));

    // The submit field itself is not a setting.
    assert!(!stored.contains_key("save"));
}

#[tokio::test]
async fn test_save_coerces_absent_status_to_false() {
    let harness = Harness::new();
    harness.configure().await;

    // A submission without the status field switches the module off.
    let request = PageRequest::new()
        .with_posted(Twocheckout::SAVE_ACTION, json!("1"))
        .with_posted("accountNumber", json!("801234"));
    harness.module.handle_settings(&request).await.unwrap();

    let stored = harness.settings.all("twocheckout").await.unwrap();
    assert_eq!(stored.get("status"), Some(&json!(false)));

    let settings = TwocheckoutSettings::load(harness.settings.as_ref())
        .await
        .unwrap();
    assert!(!settings.enabled);
}

#[tokio::test]
async fn test_save_coerces_truthy_status_values() {
    for (value, expected) in [
        (json!("1"), true),
        (json!(true), true),
        (json!(1), true),
        (json!("0"), false),
        (json!(""), false),
        (json!(false), false),
    ] {
        let harness = Harness::new();
        let request = PageRequest::new()
            .with_posted(Twocheckout::SAVE_ACTION, json!("1"))
            .with_posted("status", value.clone());
        harness.module.handle_settings(&request).await.unwrap();

        let stored = harness.settings.all("twocheckout").await.unwrap();
        assert_eq!(
            stored.get("status"),
            Some(&json!(expected)),
            "posted status {:?}",
            value
        );
    }
}

#[tokio::test]
async fn test_save_keeps_unknown_fields_verbatim() {
    let harness = Harness::new();

    let request = save_request().with_posted("instructions", json!("Pay promptly"));
    harness.module.handle_settings(&request).await.unwrap();

    let stored = harness.settings.all("twocheckout").await.unwrap();
    assert_eq!(stored.get("instructions"), Some(&json!("Pay promptly")));
}

#[tokio::test]
async fn test_save_without_permission_persists_nothing() {
    let harness = Harness::with_access(StaticAccess::none());

    let error = harness
        .module
        .handle_settings(&save_request())
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        CartkitError::AccessDenied { ref permission } if permission == "module_edit"
    ));
    assert!(harness.settings.all("twocheckout").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_render_does_not_need_edit_permission() {
    // The route guard belongs to the host; the module itself only checks
    // the permission when persisting.
    let harness = Harness::with_access(StaticAccess::none());

    let outcome = harness
        .module
        .handle_settings(&PageRequest::new())
        .await
        .unwrap();
    assert!(matches!(outcome, SettingsOutcome::Page(_)));
}

#[tokio::test]
async fn test_saved_settings_enable_the_method() {
    let harness = Harness::new();

    harness.module.handle_settings(&save_request()).await.unwrap();

    let mut methods = Vec::new();
    harness.module.payment_methods(&mut methods).await.unwrap();
    assert!(methods[0].enabled);
}
