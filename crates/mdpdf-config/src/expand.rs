//! `${VAR}` expansion for `server.host` and `render.default_title`.
//!
//! Lets one `mdpdf.toml` serve several deployments, e.g.
//! `host = "${MDPDF_HOST:-0.0.0.0}"` or `default_title = "${TENANT}-documento"`.
//! Only the braced form is expanded; a bare `$` in a title stays literal.

use crate::ConfigError;

/// Expand `${VAR}` / `${VAR:-default}` against the process environment.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    expand_with(value, field, |var| std::env::var(var).ok())
}

/// Expand references using `lookup` to resolve variable names.
///
/// An unresolved `${VAR}` without a default fails with
/// [`ConfigError::EnvVar`] naming `field`.
fn expand_with<F>(value: &str, field: &str, lookup: F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| {
        lookup(var).map(Some).ok_or_else(|| Unset(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Name of a variable that has no value.
struct Unset(String);
