//! Checkout page outcomes and payment-method listing entries.

use crate::PaymentMethodId;

/// Severity of a flash notice attached to a redirect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Warning,
}

/// A flash message shown to the shopper after a redirect.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Notice {
    /// Message text, already formatted for display.
    pub message: String,
    /// Display severity.
    pub level: NoticeLevel,
}

impl Notice {
    /// A success-level notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NoticeLevel::Success,
        }
    }

    /// A warning-level notice.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NoticeLevel::Warning,
        }
    }
}

/// What a checkout-page handler asks the host to do next.
///
/// Handlers return exactly one action (or none, to let the page render);
/// they never perform redirects themselves.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CheckoutAction {
    /// Send the browser off-site, typically to a gateway's hosted page.
    Redirect { url: String },
    /// Redirect to a local path and flash a notice. An empty path means the
    /// current page; `/` is the storefront root.
    RedirectWithNotice { path: String, notice: Notice },
}

impl CheckoutAction {
    /// Off-site redirect to the given URL.
    pub fn redirect(url: impl Into<String>) -> Self {
        CheckoutAction::Redirect { url: url.into() }
    }

    /// Local redirect with a success notice.
    pub fn success(path: impl Into<String>, message: impl Into<String>) -> Self {
        CheckoutAction::RedirectWithNotice {
            path: path.into(),
            notice: Notice::success(message),
        }
    }

    /// Local redirect with a warning notice.
    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        CheckoutAction::RedirectWithNotice {
            path: path.into(),
            notice: Notice::warning(message),
        }
    }

    /// The off-site redirect URL, if this is one.
    pub fn redirect_url(&self) -> Option<&str> {
        match self {
            CheckoutAction::Redirect { url } => Some(url),
            CheckoutAction::RedirectWithNotice { .. } => None,
        }
    }

    /// The flash notice, if this action carries one.
    pub fn notice(&self) -> Option<&Notice> {
        match self {
            CheckoutAction::Redirect { .. } => None,
            CheckoutAction::RedirectWithNotice { notice, .. } => Some(notice),
        }
    }
}

/// One entry in the checkout payment-method listing.
///
/// Modules append their entry from the payment-methods hook; the host
/// renders enabled entries as selectable options.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PaymentMethodEntry {
    /// Payment method identifier, e.g. `twocheckout`.
    pub id: PaymentMethodId,
    /// Name of the module providing the method.
    pub module: String,
    /// Display title shown to the shopper.
    pub title: String,
    /// Icon asset path, relative to the module.
    pub image: String,
    /// Whether the method is currently offered.
    pub enabled: bool,
    /// Template the host binds to the checkout "complete" step.
    pub complete_template: String,
}
