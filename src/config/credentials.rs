use tracing::debug;

/// `$NAME` values are read from the environment; an unset variable yields an
/// empty string so the gateway reports the provider as unconfigured.
pub fn resolve_credential(value: &str) -> String {
    let Some(var_name) = value.strip_prefix('$') else {
        return value.to_string();
    };
    let resolved = std::env::var(var_name).unwrap_or_default();
    debug!(var = %var_name, found = !resolved.is_empty(), "Resolved config reference");
    resolved
}

/// Mask known secrets in text bound for logs or clients. Secrets shorter
/// than four characters are left alone.
pub fn redact_credentials(text: &str, secrets: &[&str]) -> String {
    secrets
        .iter()
        .filter(|s| s.len() >= 4)
        .fold(text.to_string(), |acc, secret| acc.replace(secret, "[REDACTED]"))
}
