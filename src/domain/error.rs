use thiserror::Error;

use super::posts::Origin;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("malformed {origin} record{}: {reason}", display_identifier(.identifier))]
    MalformedRecord {
        origin: Origin,
        identifier: Option<String>,
        reason: String,
    },
}

impl DomainError {
    pub fn malformed(
        origin: Origin,
        identifier: Option<&str>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedRecord {
            origin,
            identifier: identifier.map(str::to_string),
            reason: reason.into(),
        }
    }

    pub fn origin(&self) -> Origin {
        match self {
            Self::MalformedRecord { origin, .. } => *origin,
        }
    }
}

fn display_identifier(identifier: &Option<String>) -> String {
    match identifier {
        Some(value) => format!(" `{value}`"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_origin_and_identifier() {
        let err = DomainError::malformed(Origin::Local, Some("hello"), "missing title");
        assert_eq!(
            err.to_string(),
            "malformed local record `hello`: missing title"
        );
    }

    #[test]
    fn message_without_identifier() {
        let err = DomainError::malformed(Origin::Remote, None, "missing url");
        assert_eq!(err.to_string(), "malformed remote record: missing url");
    }
}
