//! Manifest package names.
//!
//! A [`PackageName`] is always a usable manifest `name`: non-empty, at most
//! [`PackageName::MAX_LEN`] bytes, drawn from `[a-z0-9-_~.]`, never starting
//! with `.` or `_`, optionally prefixed by a single `@scope/`.
//!
//! Two constructors exist because the two inputs deserve different
//! treatment. Names *derived* from a project directory are sanitized and can
//! never fail. Names given *explicitly* are validated and rejected as-is.

use std::fmt;

use serde::Serialize;

use crate::domain::error::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PackageName(String);

impl PackageName {
    pub const MAX_LEN: usize = 214;

    /// Used when sanitizing leaves nothing behind.
    pub const FALLBACK: &'static str = "pupstart-project";

    /// Derive a package name from a project directory name.
    ///
    /// Lowercases, then replaces every character outside `[a-z0-9-_~.]`
    /// with `-`. A leading `.` or `_` becomes `-`.
    pub fn derive(project_name: &str) -> Self {
        let mut name: String = project_name
            .to_lowercase()
            .chars()
            .map(|c| if is_name_char(c) { c } else { '-' })
            .collect();

        if name.starts_with(['.', '_']) {
            name.replace_range(..1, "-");
        }
        if name.len() > Self::MAX_LEN {
            // Every char is ASCII at this point so any byte index is a boundary.
            name.truncate(Self::MAX_LEN);
        }
        if name.is_empty() {
            name = Self::FALLBACK.to_string();
        }

        Self(name)
    }

    /// Validate an explicitly supplied package name.
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        let invalid = |reason: &str| DomainError::InvalidPackageName {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        if name.is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        if name.len() > Self::MAX_LEN {
            return Err(invalid("name is longer than 214 characters"));
        }

        let bare = match name.strip_prefix('@') {
            Some(scoped) => {
                let (scope, rest) = scoped
                    .split_once('/')
                    .ok_or_else(|| invalid("scoped names must look like @scope/name"))?;
                validate_segment(scope).map_err(|r| invalid(&format!("scope {r}")))?;
                rest
            }
            None => name,
        };
        validate_segment(bare).map_err(|r| invalid(&r))?;

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PackageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

const fn is_name_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '-' | '_' | '~' | '.')
}

fn validate_segment(segment: &str) -> Result<(), String> {
    if segment.is_empty() {
        return Err("cannot be empty".into());
    }
    if segment.starts_with(['.', '_']) {
        return Err("cannot start with '.' or '_'".into());
    }
    if let Some(c) = segment.chars().find(|c| !is_name_char(*c)) {
        return Err(format!("contains invalid character '{c}'"));
    }
    Ok(())
}
