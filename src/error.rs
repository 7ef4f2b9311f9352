use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfbindError {
    #[error("{format} '{path}' is not set")]
    NotSet { format: &'static str, path: String },

    #[error("{format} '{path}' is invalid: {reason}")]
    Invalid {
        format: &'static str,
        path: String,
        reason: String,
    },

    #[error("{format} '{path}' has no value to emit")]
    NotEmitted { format: &'static str, path: String },

    #[error("{format} failed to emit '{path}': {reason}")]
    Serialize {
        format: &'static str,
        path: String,
        reason: String,
    },

    #[error("Value is not set")]
    Unset,

    #[error("Failed to parse JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse TOML document: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ConfbindError {
    /// Raised while reading a tree from a source.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::NotSet { .. } | Self::Invalid { .. } | Self::Json(_) | Self::Toml(_)
        )
    }

    /// Raised while writing a tree into a destination.
    pub fn is_emit_error(&self) -> bool {
        matches!(self, Self::NotEmitted { .. } | Self::Serialize { .. })
    }

    /// The value was simply absent, as opposed to present but rejected.
    pub fn is_not_set(&self) -> bool {
        matches!(self, Self::NotSet { .. })
    }

    /// Path the error refers to, when it has one.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::NotSet { path, .. }
            | Self::Invalid { path, .. }
            | Self::NotEmitted { path, .. }
            | Self::Serialize { path, .. } => Some(path),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_set_formats_correctly() {
        let err = ConfbindError::NotSet {
            format: "[ENV]",
            path: "APP_PORT".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("[ENV]"));
        assert!(msg.contains("APP_PORT"));
        assert!(msg.contains("not set"));
    }

    #[test]
    fn invalid_includes_reason() {
        let err = ConfbindError::Invalid {
            format: "[JSON]",
            path: "/port".into(),
            reason: "must be positive".into(),
        };
        assert!(err.to_string().contains("must be positive"));
        assert_eq!(err.path(), Some("/port"));
    }

    #[test]
    fn classification() {
        let parse = ConfbindError::NotSet {
            format: "[ENV]",
            path: "X".into(),
        };
        let emit = ConfbindError::NotEmitted {
            format: "[ENV]",
            path: "X".into(),
        };
        assert!(parse.is_parse_error());
        assert!(!parse.is_emit_error());
        assert!(parse.is_not_set());
        assert!(emit.is_emit_error());
        assert!(!emit.is_parse_error());
        assert!(!ConfbindError::Unset.is_parse_error());
        assert_eq!(ConfbindError::Unset.path(), None);
    }
}
