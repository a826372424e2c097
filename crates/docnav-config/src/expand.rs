//! `${VAR}` references in declared strings.
//!
//! Only `title`, `base` and `nav[].link` are expanded. A reference may carry a
//! fallback (`${DOCS_HOST:-localhost}`). Strings without `${` are never passed
//! to the expander, so `$` inside a literal URL is left alone.

use std::env::{self, VarError};

use shellexpand::LookupError;

use crate::ConfigError;

/// Expand references in `value`, replacing it only when something changed.
pub(crate) fn expand_in_place(value: &mut String, field: &str) -> Result<(), ConfigError> {
    if !value.contains("${") {
        return Ok(());
    }

    let expanded = shellexpand::env_with_context(value.as_str(), lookup)
        .map_err(|err| unresolved(field, &err))?;
    if expanded != value.as_str() {
        *value = expanded.into_owned();
    }
    Ok(())
}

fn lookup(name: &str) -> Result<Option<String>, VarError> {
    env::var(name).map(Some)
}

fn unresolved(field: &str, err: &LookupError<VarError>) -> ConfigError {
    let message = match err.cause {
        VarError::NotPresent => format!("${{{}}} not set", err.var_name),
        VarError::NotUnicode(_) => format!("${{{}}} is not valid UTF-8", err.var_name),
    };
    ConfigError::EnvVar {
        field: field.to_owned(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn expanded(raw: &str, field: &str) -> Result<String, ConfigError> {
        let mut value = raw.to_owned();
        expand_in_place(&mut value, field)?;
        Ok(value)
    }

    #[test]
    fn test_base_from_env() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            env::set_var("DOCNAV_TEST_BASE", "/anno-docs/");
        }
        assert_eq!(expanded("${DOCNAV_TEST_BASE}", "base").unwrap(), "/anno-docs/");
        unsafe {
            env::remove_var("DOCNAV_TEST_BASE");
        }
    }

    #[test]
    fn test_fallback_used_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            env::remove_var("DOCNAV_TEST_UNSET_TITLE");
        }
        let title = expanded("${DOCNAV_TEST_UNSET_TITLE:-anno documentation}", "title").unwrap();
        assert_eq!(title, "anno documentation");
    }

    #[test]
    fn test_reference_inside_url() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            env::set_var("DOCNAV_TEST_HOST", "allel.es");
        }
        let link = expanded("http://${DOCNAV_TEST_HOST}/docs", "nav[3].link").unwrap();
        assert_eq!(link, "http://allel.es/docs");
        unsafe {
            env::remove_var("DOCNAV_TEST_HOST");
        }
    }

    #[test]
    fn test_unset_reference_names_field_and_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            env::remove_var("DOCNAV_TEST_MISSING");
        }
        let err = expanded("${DOCNAV_TEST_MISSING}", "nav[0].link").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Environment variable error in nav[0].link: ${DOCNAV_TEST_MISSING} not set"
        );
    }

    #[test]
    fn test_strings_without_braced_reference_untouched() {
        assert_eq!(expanded("/technical/", "nav[1].link").unwrap(), "/technical/");
        assert_eq!(expanded("$VAR", "title").unwrap(), "$VAR");
    }
}
