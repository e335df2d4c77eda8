/// Reads an environment variable, falling back to a development default.
///
/// This is a thin wrapper around `std::env::var` for connection parameters
/// that must always resolve to something usable on a local setup.
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
/// * `default` - The value to use when the variable is unset.
pub fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Reads an optional environment variable.
///
/// An unset or empty variable yields `None`.
pub fn env_opt(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}
