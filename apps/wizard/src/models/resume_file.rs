use std::path::Path;

use bytes::Bytes;

use crate::errors::WizardError;

pub const PDF: &str = "application/pdf";
pub const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// A resume held in memory for parsing or attaching.
///
/// Only PDF and DOCX files can be constructed, so anything that reaches the
/// network layer has already passed the type check.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeFile {
    name: String,
    content_type: String,
    bytes: Bytes,
}

impl ResumeFile {
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Result<Self, WizardError> {
        let name = name.into();
        let content_type = content_type.into();
        if content_type != PDF && content_type != DOCX {
            return Err(WizardError::UnsupportedFileType { name, content_type });
        }
        Ok(Self {
            name,
            content_type,
            bytes: bytes.into(),
        })
    }

    /// Reads a file from disk, taking its type from the extension. The
    /// extension is checked before the file is opened.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, WizardError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        let content_type = match extension.as_str() {
            "pdf" => PDF,
            "docx" => DOCX,
            _ => {
                return Err(WizardError::UnsupportedFileType {
                    name,
                    content_type: format!(".{extension}"),
                })
            }
        };
        let bytes = tokio::fs::read(path).await?;
        Self::new(name, content_type, bytes)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_accepts_pdf_and_docx() {
        assert!(ResumeFile::new("cv.pdf", PDF, vec![1u8, 2]).is_ok());
        assert!(ResumeFile::new("cv.docx", DOCX, Vec::<u8>::new()).is_ok());
    }

    #[test]
    fn test_rejects_other_types() {
        let err = ResumeFile::new("cv.doc", "application/msword", vec![0u8]).unwrap_err();
        assert!(matches!(
            err,
            WizardError::UnsupportedFileType { ref content_type, .. } if content_type == "application/msword"
        ));
        assert!(ResumeFile::new("cv.png", "image/png", vec![0u8]).is_err());
    }

    #[tokio::test]
    async fn test_from_path_reads_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Jane_CV.PDF");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"%PDF-1.7")
            .unwrap();

        let file = ResumeFile::from_path(&path).await.unwrap();
        assert_eq!(file.name(), "Jane_CV.PDF");
        assert_eq!(file.content_type(), PDF);
        assert_eq!(file.bytes().as_ref(), b"%PDF-1.7");
    }

    #[tokio::test]
    async fn test_from_path_rejects_before_reading() {
        // the file does not exist, so reaching the read would give Io instead
        let err = ResumeFile::from_path("/nonexistent/resume.txt").await.unwrap_err();
        assert!(matches!(err, WizardError::UnsupportedFileType { .. }));
    }

    #[tokio::test]
    async fn test_from_path_missing_file_is_io() {
        let err = ResumeFile::from_path("/nonexistent/resume.pdf").await.unwrap_err();
        assert!(matches!(err, WizardError::Io(_)));
    }
}
