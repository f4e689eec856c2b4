use bytes::Bytes;
use serde::{Deserialize, Serialize};

pub const NAME_NOT_FOUND: &str = "Not found";
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// Structured fields extracted from an uploaded resume.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedResume {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    pub education: Vec<String>,
    pub confidence: f64,
}

/// Parser output as it arrives over the wire. Every field may be absent.
#[derive(Debug, Default, Deserialize)]
pub struct ParsedResumeWire {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub experience: Option<Vec<String>>,
    #[serde(default)]
    pub education: Option<Vec<String>>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl From<ParsedResumeWire> for ParsedResume {
    fn from(wire: ParsedResumeWire) -> Self {
        let non_blank = |items: Option<Vec<String>>| -> Vec<String> {
            items
                .unwrap_or_default()
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        };

        ParsedResume {
            name: wire
                .name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| NAME_NOT_FOUND.to_string()),
            email: wire.email.map(|e| e.trim().to_string()).unwrap_or_default(),
            phone: wire.phone.map(|p| p.trim().to_string()).unwrap_or_default(),
            skills: non_blank(wire.skills),
            experience: non_blank(wire.experience),
            education: non_blank(wire.education),
            confidence: wire
                .confidence
                .filter(|c| c.is_finite())
                .map(|c| c.clamp(0.0, 1.0))
                .unwrap_or(DEFAULT_CONFIDENCE),
        }
    }
}

/// An uploaded resume file plus the user it belongs to.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
    pub user_id: String,
}

impl ResumeUpload {
    pub fn is_pdf(&self) -> bool {
        self.content_type.as_deref() == Some("application/pdf")
            || self.file_name.to_ascii_lowercase().ends_with(".pdf")
            || self.bytes.starts_with(b"%PDF")
    }
}
