use std::{
    collections::HashMap,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::RefscanError;

pub const MAX_UPLOAD_MB: u64 = 50;
pub const MAX_UPLOAD_BYTES: u64 = MAX_UPLOAD_MB * 1024 * 1024;

/// One allowed upload format. Doubles as the preview dispatcher: the result
/// page branches on this to decide how to render the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceFileType {
    Pdf,
    Jpg,
    Jpeg,
    Png,
    Txt,
    Docx,
    Doc,
}

impl SourceFileType {
    pub fn from_extension(path: &str) -> Option<Self> {
        let ext = Path::new(path).extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "pdf" => Some(SourceFileType::Pdf),
            "jpg" => Some(SourceFileType::Jpg),
            "jpeg" => Some(SourceFileType::Jpeg),
            "png" => Some(SourceFileType::Png),
            "txt" => Some(SourceFileType::Txt),
            "docx" => Some(SourceFileType::Docx),
            "doc" => Some(SourceFileType::Doc),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            SourceFileType::Pdf => "pdf",
            SourceFileType::Jpg => "jpg",
            SourceFileType::Jpeg => "jpeg",
            SourceFileType::Png => "png",
            SourceFileType::Txt => "txt",
            SourceFileType::Docx => "docx",
            SourceFileType::Doc => "doc",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            SourceFileType::Pdf => "application/pdf",
            SourceFileType::Jpg | SourceFileType::Jpeg => "image/jpeg",
            SourceFileType::Png => "image/png",
            SourceFileType::Txt => "text/plain",
            SourceFileType::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            SourceFileType::Doc => "application/msword",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            SourceFileType::Pdf => "📄",
            SourceFileType::Jpg | SourceFileType::Jpeg | SourceFileType::Png => "🖼",
            SourceFileType::Txt => "📝",
            SourceFileType::Docx | SourceFileType::Doc => "📘",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SourceFileType::Pdf => "Portable Document Format (OCR)",
            SourceFileType::Jpg | SourceFileType::Jpeg => "JPEG Image (OCR)",
            SourceFileType::Png => "PNG Image (OCR)",
            SourceFileType::Txt => "Plain Text",
            SourceFileType::Docx => "Microsoft Word Document",
            SourceFileType::Doc => "Legacy Microsoft Word Document",
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, SourceFileType::Jpg | SourceFileType::Jpeg | SourceFileType::Png)
    }
}

/// A file the user picked for upload, validated before any network call.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub file_type: SourceFileType,
}

impl SelectedFile {
    pub fn from_path(path: &Path) -> Result<Self, RefscanError> {
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("Unknown")
            .to_string();

        let file_type = SourceFileType::from_extension(&name)
            .ok_or_else(|| RefscanError::UnsupportedFileType(name.clone()))?;

        let size = std::fs::metadata(path)?.len();
        if size > MAX_UPLOAD_BYTES {
            return Err(RefscanError::FileTooLarge);
        }

        Ok(Self { path: path.to_path_buf(), name, size, file_type })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferralInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral_focal_point: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referring_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referring_focal_point: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referring_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referring_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referring_email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accompanied_by_care_provider: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnoses {
    #[serde(default)]
    pub primary_diagnoses: Vec<String>,
    #[serde(default)]
    pub other_diagnoses: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionalStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobility: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precautions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_care: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cognitive_impairment: Option<String>,
    #[serde(default)]
    pub assistive_devices_provided: Vec<String>,
    #[serde(default)]
    pub assistive_devices_required: Vec<String>,
}

/// The structured payload the backend extracts from a referral document.
/// Every field is optional so partial extractions still render; the viewer
/// enumerates these groups exhaustively instead of shape-checking at runtime.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferralExtraction {
    #[serde(default)]
    pub document_meta: DocumentMeta,
    #[serde(default)]
    pub referral: ReferralInfo,
    #[serde(default)]
    pub patient: PatientInfo,
    #[serde(default)]
    pub diagnoses: Diagnoses,
    #[serde(default)]
    pub treatments: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_for_referral: Option<String>,
    #[serde(default)]
    pub transportation_needs: Vec<String>,
    #[serde(default)]
    pub follow_up_requirements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub functional_status: Option<FunctionalStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compiled_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_number: Option<String>,
}

/// Keyword-based referral classification computed by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    #[serde(default)]
    pub is_referral: bool,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub details: HashMap<String, i64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
    #[serde(default)]
    pub character_count: u64,
    #[serde(default)]
    pub word_count: u64,
}

/// Success body of `POST /upload`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub job_id: String,
    #[serde(default)]
    pub file_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    #[serde(default)]
    pub extracted: ReferralExtraction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_stats: Option<TextStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_warning: Option<String>,
}

/// Body of `GET /supported-formats`. The default matches the backend's
/// advertised list so the upload page still has a hint when the call fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportedFormats {
    #[serde(default)]
    pub supported_formats: Vec<String>,
    #[serde(default)]
    pub descriptions: HashMap<String, String>,
}

impl Default for SupportedFormats {
    fn default() -> Self {
        let formats = [
            SourceFileType::Pdf,
            SourceFileType::Jpg,
            SourceFileType::Jpeg,
            SourceFileType::Png,
            SourceFileType::Txt,
            SourceFileType::Docx,
            SourceFileType::Doc,
        ];

        Self {
            supported_formats: formats.iter().map(|f| format!(".{}", f.extension())).collect(),
            descriptions: formats
                .iter()
                .map(|f| (format!(".{}", f.extension()), f.description().to_string()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_file_type_from_extension() {
        assert_eq!(SourceFileType::from_extension("scan.PDF"), Some(SourceFileType::Pdf));
        assert_eq!(SourceFileType::from_extension("photo.jpeg"), Some(SourceFileType::Jpeg));
        assert_eq!(
            SourceFileType::from_extension("/tmp/referral.final.docx"),
            Some(SourceFileType::Docx)
        );
        assert_eq!(SourceFileType::from_extension("notes.md"), None);
        assert_eq!(SourceFileType::from_extension("no_extension"), None);
    }

    #[test]
    fn test_selected_file_rejects_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("referral.xlsx");
        std::fs::File::create(&path).unwrap().write_all(b"data").unwrap();

        match SelectedFile::from_path(&path) {
            Err(RefscanError::UnsupportedFileType(name)) => assert_eq!(name, "referral.xlsx"),
            other => panic!("Expected UnsupportedFileType, got {:?}", other.map(|f| f.name)),
        }
    }

    #[test]
    fn test_selected_file_accepts_supported_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("referral.pdf");
        std::fs::File::create(&path).unwrap().write_all(b"%PDF-1.4").unwrap();

        let selected = SelectedFile::from_path(&path).unwrap();
        assert_eq!(selected.name, "referral.pdf");
        assert_eq!(selected.file_type, SourceFileType::Pdf);
        assert_eq!(selected.size, 8);
    }

    #[test]
    fn test_extraction_result_decodes_backend_response() {
        let body = r#"{
            "job_id": "a1b2c3",
            "file_type": "pdf",
            "source_file": "referral.pdf",
            "classification": {
                "is_referral": true,
                "confidence": 0.82,
                "score": 41,
                "reason": "Document contains 3 strong referral indicators and meets classification thresholds",
                "details": {"strong_keywords": 3, "medical_keywords": 11, "admin_keywords": 4, "pattern_matches": 1, "total_score": 41}
            },
            "text_stats": {"character_count": 2048, "word_count": 350},
            "extracted": {
                "document_meta": {"title": "Referral Letter", "pages": 2},
                "referral": {"referral_to": "City Rehab Center"},
                "patient": {"full_name": "Jane Doe", "date_of_birth": "1961-04-02"},
                "diagnoses": {"primary_diagnoses": ["CVA"], "other_diagnoses": []},
                "treatments": ["Physiotherapy"],
                "reason_for_referral": "Post-stroke rehabilitation"
            }
        }"#;

        let result: ExtractionResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.job_id, "a1b2c3");
        assert_eq!(result.extracted.patient.full_name.as_deref(), Some("Jane Doe"));
        assert_eq!(result.extracted.diagnoses.primary_diagnoses, vec!["CVA".to_string()]);
        assert_eq!(result.text_stats.unwrap().word_count, 350);

        let classification = result.classification.unwrap();
        assert!(classification.is_referral);
        assert_eq!(classification.details.get("strong_keywords"), Some(&3));
    }

    #[test]
    fn test_extraction_result_tolerates_minimal_response() {
        // Partial extraction: backend may return only job_id and extracted.
        let result: ExtractionResult =
            serde_json::from_str(r#"{"job_id": "x", "extracted": {}}"#).unwrap();
        assert_eq!(result.job_id, "x");
        assert!(result.classification.is_none());
        assert!(result.extracted.treatments.is_empty());
    }
}
