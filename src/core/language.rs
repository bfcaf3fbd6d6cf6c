//! C language standards and preprocessor definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// C standard version, serialized the way compilers spell it (`c99`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CStandard {
    C99,
    C11,
    C17,
}

impl CStandard {
    /// Get the standard as a compiler flag value (e.g., "c99").
    pub fn as_flag_value(&self) -> &'static str {
        match self {
            CStandard::C99 => "c99",
            CStandard::C11 => "c11",
            CStandard::C17 => "c17",
        }
    }

    /// The next stricter revision, if any.
    pub fn successor(&self) -> Option<CStandard> {
        match self {
            CStandard::C99 => Some(CStandard::C11),
            CStandard::C11 => Some(CStandard::C17),
            CStandard::C17 => None,
        }
    }
}

impl fmt::Display for CStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "C{}",
            match self {
                CStandard::C99 => "99",
                CStandard::C11 => "11",
                CStandard::C17 => "17",
            }
        )
    }
}

/// A preprocessor macro definition: a name with an optional value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Define {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Define {
    /// A bare `-DNAME` definition.
    pub fn flag(name: impl Into<String>) -> Self {
        Define {
            name: name.into(),
            value: None,
        }
    }

    /// A `-DNAME=VALUE` definition.
    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Define {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}

impl fmt::Display for Define {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(v) => write!(f, "{}={}", self.name, v),
            None => write!(f, "{}", self.name),
        }
    }
}
