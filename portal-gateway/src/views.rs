//! Server-rendered pages.
//!
//! Templates are embedded at compile time and rendered with Tera. Marketing
//! pages extend `marketing/layout.html`, which wraps their content in the
//! full-height dark shell. Authentication pages mount the hosted widget.

use packing_core::RedirectTarget;
use serde::{Deserialize, Serialize};
use tera::{Context, Tera};

use crate::{config::AuthConfig, error::PortalError};

const TPL_BASE: &str = include_str!("templates/base.html");
const TPL_MARKETING_LAYOUT: &str = include_str!("templates/marketing/layout.html");
const TPL_MARKETING_HOME: &str = include_str!("templates/marketing/home.html");
const TPL_AUTH_PAGE: &str = include_str!("templates/auth/page.html");

/// Which hosted widget an authentication page mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFlow {
    SignUp,
    SignIn,
}

impl AuthFlow {
    /// Widget mount function exposed by the provider's browser bundle.
    #[must_use]
    pub fn mount_fn(self) -> &'static str {
        match self {
            AuthFlow::SignUp => "mountSignUp",
            AuthFlow::SignIn => "mountSignIn",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            AuthFlow::SignUp => "Sign up",
            AuthFlow::SignIn => "Sign in",
        }
    }
}

/// Props handed to the hosted widget.
///
/// Both redirects always point at the same resolved target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthWidgetProps {
    pub force_redirect_url: String,
    pub fallback_redirect_url: String,
}

impl AuthWidgetProps {
    #[must_use]
    pub fn for_target(target: &RedirectTarget) -> Self {
        Self {
            force_redirect_url: target.as_str().to_owned(),
            fallback_redirect_url: target.as_str().to_owned(),
        }
    }
}

/// Serialize `value` as JSON that is safe to place inside a `<script>` element.
///
/// `<`, `>` and `&` only ever occur inside JSON strings, where their `\uXXXX`
/// escapes decode to the same characters.
///
/// # Errors
/// Returns the underlying [`serde_json::Error`] if `value` cannot be serialized.
pub fn script_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let raw = serde_json::to_string(value)?;
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            other => out.push(other),
        }
    }
    Ok(out)
}

/// Compiled page templates plus the settings they need.
#[derive(Debug)]
pub struct Views {
    tera: Tera,
    auth: AuthConfig,
}

impl Views {
    /// Compile the embedded templates.
    ///
    /// # Errors
    /// Returns a [`tera::Error`] if a template fails to parse.
    pub fn new(auth: AuthConfig) -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", TPL_BASE),
            ("marketing/layout.html", TPL_MARKETING_LAYOUT),
            ("marketing/home.html", TPL_MARKETING_HOME),
            ("auth/page.html", TPL_AUTH_PAGE),
        ])?;
        Ok(Self { tera, auth })
    }

    /// The marketing landing page.
    ///
    /// # Errors
    /// Returns [`PortalError::Render`] if rendering fails.
    pub fn home(&self) -> Result<String, PortalError> {
        Ok(self.tera.render("marketing/home.html", &Context::new())?)
    }

    /// An authentication page mounting the widget for `flow`.
    ///
    /// # Errors
    /// Returns [`PortalError::Encode`] or [`PortalError::Render`] if the page
    /// cannot be produced.
    pub fn auth_page(&self, flow: AuthFlow, target: &RedirectTarget) -> Result<String, PortalError> {
        let props = AuthWidgetProps::for_target(target);

        let mut context = Context::new();
        context.insert("title", flow.title());
        context.insert("mount_fn", flow.mount_fn());
        context.insert("widget_props", &script_json(&props)?);
        context.insert("publishable_key", &self.auth.publishable_key);
        context.insert("script_url", &self.auth.script_url);

        Ok(self.tera.render("auth/page.html", &context)?)
    }
}
