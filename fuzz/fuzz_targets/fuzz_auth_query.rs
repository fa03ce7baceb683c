//! Fuzz target: query-string extraction for the authentication pages.
//!
//! Arbitrary query strings must either be rejected or resolve to a redirect
//! target, never panic.

#![no_main]

use axum::extract::Query;
use axum::http::Uri;
use libfuzzer_sys::fuzz_target;
use packing_core::RedirectTarget;
use portal_gateway::routes::AuthQuery;

fuzz_target!(|data: &[u8]| {
    let Ok(query) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(uri) = format!("/sign-up?{query}").parse::<Uri>() else {
        return;
    };
    if let Ok(Query(params)) = Query::<AuthQuery>::try_from_uri(&uri) {
        let target = RedirectTarget::from_params(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        assert!(!target.as_str().is_empty(), "resolved target must never be empty");
    }
});
