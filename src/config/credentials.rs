use tracing::debug;

/// Resolve a secret from the config. A value starting with '$' names an
/// environment variable; an unset or empty variable resolves to `None`.
pub fn resolve_credential(value: &str) -> Option<String> {
    let resolved = if let Some(var_name) = value.strip_prefix('$') {
        match std::env::var(var_name) {
            Ok(resolved) => {
                debug!(var = %var_name, "Resolved credential from environment");
                resolved
            }
            Err(_) => {
                debug!(var = %var_name, "Environment variable not set, credential left empty");
                return None;
            }
        }
    } else {
        value.to_string()
    };
    Some(resolved).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_credential_literal() {
        assert_eq!(resolve_credential("s3cret-token").as_deref(), Some("s3cret-token"));
    }

    #[test]
    fn test_resolve_credential_env_var() {
        std::env::set_var("TEST_ISM_ASSESS_CRED", "secret123");
        assert_eq!(resolve_credential("$TEST_ISM_ASSESS_CRED").as_deref(), Some("secret123"));
        std::env::remove_var("TEST_ISM_ASSESS_CRED");
    }

    #[test]
    fn test_resolve_credential_missing_env_var() {
        assert_eq!(resolve_credential("$NONEXISTENT_ISM_ASSESS_VAR"), None);
    }

    #[test]
    fn test_resolve_credential_empty() {
        assert_eq!(resolve_credential(""), None);
    }
}
