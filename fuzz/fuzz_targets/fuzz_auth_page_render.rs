//! Fuzz target: auth page rendering with arbitrary redirect targets.
//!
//! The rendered page must carry the target verbatim in both widget props,
//! and the target must never break out of the props script element.

#![no_main]

use std::sync::OnceLock;

use libfuzzer_sys::fuzz_target;
use packing_core::RedirectTarget;
use portal_gateway::config::AuthConfig;
use portal_gateway::views::{AuthFlow, AuthWidgetProps, Views};

const PROPS_OPEN: &str = r#"<script id="auth-widget-props" type="application/json">"#;

fn views() -> &'static Views {
    static VIEWS: OnceLock<Views> = OnceLock::new();
    VIEWS.get_or_init(|| Views::new(AuthConfig::new("pk_fuzz")).expect("templates compile"))
}

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };
    let target = RedirectTarget::from_query(Some(raw));
    let html = views()
        .auth_page(AuthFlow::SignUp, &target)
        .expect("auth page must render for any target");

    let start = html.find(PROPS_OPEN).expect("props script present") + PROPS_OPEN.len();
    let len = html[start..].find("</script>").expect("props script closed");
    let props: AuthWidgetProps =
        serde_json::from_str(&html[start..start + len]).expect("props are valid JSON");

    assert_eq!(props, AuthWidgetProps::for_target(&target));
});
