//! Upstream text extraction: turns files into plain text for the analyzer.
//!
//! Plain text and `.eml` files are read directly. PDF parsing and OCR are
//! delegated to pluggable backends; `PdfExtractBackend` covers PDFs, OCR has
//! no bundled backend. Formats without a backend are reported as unsupported.

use crate::config::ExtractionConfig;
use std::fs;
use std::path::Path;

pub type BackendError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("File {name} exceeds the {limit} byte limit ({size} bytes)")]
    FileTooLarge { name: String, size: u64, limit: u64 },
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("Failed to extract text from {name}: {reason}")]
    Extraction { name: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    PlainText,
    Pdf,
    Image,
}

impl DocumentFormat {
    /// Detect format from the file extension
    pub fn detect(name: &str) -> Option<Self> {
        let ext = Path::new(name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "txt" | "text" | "eml" => Some(DocumentFormat::PlainText),
            "pdf" => Some(DocumentFormat::Pdf),
            "jpg" | "jpeg" | "png" | "webp" => Some(DocumentFormat::Image),
            _ => None,
        }
    }
}

pub trait PdfBackend: Send + Sync {
    /// Text of every page, one page per line
    fn extract_pdf(&self, data: &[u8]) -> Result<String, BackendError>;
}

/// PDF text layer extraction in pure Rust, no external tools
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractBackend;

impl PdfBackend for PdfExtractBackend {
    fn extract_pdf(&self, data: &[u8]) -> Result<String, BackendError> {
        let text = pdf_extract::extract_text_from_mem(data).map_err(|e| e.to_string())?;
        log::debug!("Extracted {} chars from PDF", text.len());
        Ok(text)
    }
}

pub trait OcrBackend: Send + Sync {
    /// Recognize text using a `+`-joined language set such as `spa+eng`
    fn recognize(&self, image: &[u8], languages: &str) -> Result<String, BackendError>;
}

pub struct TextExtractor {
    config: ExtractionConfig,
    pdf: Option<Box<dyn PdfBackend>>,
    ocr: Option<Box<dyn OcrBackend>>,
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new(ExtractionConfig::default())
    }
}

impl TextExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self {
            config,
            pdf: None,
            ocr: None,
        }
    }

    /// Extractor with every bundled backend installed
    pub fn with_bundled_backends(config: ExtractionConfig) -> Self {
        Self::new(config).with_pdf_backend(Box::new(PdfExtractBackend))
    }

    pub fn with_pdf_backend(mut self, backend: Box<dyn PdfBackend>) -> Self {
        self.pdf = Some(backend);
        self
    }

    pub fn with_ocr_backend(mut self, backend: Box<dyn OcrBackend>) -> Self {
        self.ocr = Some(backend);
        self
    }

    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<String, ExtractionError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let io_error = |e: std::io::Error| ExtractionError::Extraction {
            name: name.clone(),
            reason: e.to_string(),
        };

        let size = fs::metadata(path).map_err(io_error)?.len();
        self.check_size(&name, size)?;

        let data = fs::read(path).map_err(io_error)?;
        self.extract_bytes(&name, &data)
    }

    pub fn extract_bytes(&self, name: &str, data: &[u8]) -> Result<String, ExtractionError> {
        self.check_size(name, data.len() as u64)?;

        let format = DocumentFormat::detect(name)
            .ok_or_else(|| ExtractionError::UnsupportedFormat(name.to_string()))?;
        log::debug!("Extracting {} as {:?} ({} bytes)", name, format, data.len());

        match format {
            DocumentFormat::PlainText => Ok(String::from_utf8_lossy(data).into_owned()),
            DocumentFormat::Pdf => {
                let backend = self.pdf.as_ref().ok_or_else(|| {
                    ExtractionError::UnsupportedFormat(format!("{} (no PDF backend configured)", name))
                })?;
                backend
                    .extract_pdf(data)
                    .map_err(|e| ExtractionError::Extraction {
                        name: name.to_string(),
                        reason: e.to_string(),
                    })
            }
            DocumentFormat::Image => {
                let backend = self.ocr.as_ref().ok_or_else(|| {
                    ExtractionError::UnsupportedFormat(format!("{} (no OCR backend configured)", name))
                })?;
                self.recognize_with_fallback(backend.as_ref(), name, data)
            }
        }
    }

    fn check_size(&self, name: &str, size: u64) -> Result<(), ExtractionError> {
        if size > self.config.max_file_bytes {
            return Err(ExtractionError::FileTooLarge {
                name: name.to_string(),
                size,
                limit: self.config.max_file_bytes,
            });
        }
        Ok(())
    }

    /// Bilingual pass first, single-language pass if that fails
    fn recognize_with_fallback(
        &self,
        backend: &dyn OcrBackend,
        name: &str,
        data: &[u8],
    ) -> Result<String, ExtractionError> {
        let primary = &self.config.ocr_primary_languages;
        let fallback = &self.config.ocr_fallback_languages;

        log::info!("OCR in progress: {}", name);
        match backend.recognize(data, primary) {
            Ok(text) => Ok(text),
            Err(e) => {
                log::warn!(
                    "OCR with {} failed for {}, retrying with {}: {}",
                    primary,
                    name,
                    fallback,
                    e
                );
                backend
                    .recognize(data, fallback)
                    .map_err(|e| ExtractionError::Extraction {
                        name: name.to_string(),
                        reason: e.to_string(),
                    })
            }
        }
    }
}

/// One piece of analyzer input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File { name: String, text: String },
    Pasted(String),
}

/// Join all sources into one labelled document. Blank pasted text is
/// ignored; the result is trimmed and may be empty.
pub fn compose_input(sources: &[InputSource]) -> String {
    let parts: Vec<String> = sources
        .iter()
        .filter_map(|source| match source {
            InputSource::File { name, text } => Some(format!("\n\n[File: {}]\n{}", name, text)),
            InputSource::Pasted(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| format!("\n\n[Pasted text]\n{}", trimmed))
            }
        })
        .collect();

    parts.join("\n").trim().to_string()
}
