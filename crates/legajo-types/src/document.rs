//! Document kinds accepted by the analysis pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// MIME types the pipeline accepts for upload.
pub const ACCEPTED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "image/png",
    "image/jpeg",
];

/// Kind of cadastral document, selecting which field set extraction targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Property deed / title documents.
    Propiedad,
    /// Lien and encumbrance certificates.
    Gravamen,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Propiedad => write!(f, "propiedad"),
            DocumentKind::Gravamen => write!(f, "gravamen"),
        }
    }
}

impl FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "propiedad" => Ok(DocumentKind::Propiedad),
            "gravamen" => Ok(DocumentKind::Gravamen),
            other => Err(format!("invalid document kind: '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_kind_round_trip() {
        for kind in [DocumentKind::Propiedad, DocumentKind::Gravamen] {
            assert_eq!(kind.to_string().parse::<DocumentKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_document_kind_case_insensitive() {
        assert_eq!(
            "Propiedad".parse::<DocumentKind>().unwrap(),
            DocumentKind::Propiedad
        );
    }

    #[test]
    fn test_accepted_mime_types() {
        assert!(ACCEPTED_MIME_TYPES.contains(&"application/pdf"));
        assert!(!ACCEPTED_MIME_TYPES.contains(&"image/gif"));
    }
}
