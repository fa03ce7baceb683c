use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a user lands after completing an authentication flow.
///
/// Taken verbatim from the `redirect_url` query parameter. No same-origin
/// check happens here; the hosted widget owns that decision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RedirectTarget(String);

impl RedirectTarget {
    /// Target used when the request carries none.
    pub const ROOT: &'static str = "/";

    /// Query parameter the target is read from.
    pub const PARAM: &'static str = "redirect_url";

    /// Resolves the optional query value. Absent or empty means [`Self::ROOT`].
    #[must_use]
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => Self(v.to_owned()),
            _ => Self::root(),
        }
    }

    /// Resolves from decoded query pairs.
    ///
    /// Takes the first non-empty `redirect_url`; repeated keys are not an
    /// error and unrelated keys are ignored.
    #[must_use]
    pub fn from_params<'a, I>(params: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let value = params
            .into_iter()
            .find(|(key, value)| *key == Self::PARAM && !value.is_empty())
            .map(|(_, value)| value);
        Self::from_query(value)
    }

    #[must_use]
    pub fn root() -> Self {
        Self(Self::ROOT.to_owned())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RedirectTarget {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for RedirectTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
