use crate::types::{DocError, Result};

/// An upload as received from the form: raw bytes plus the original
/// filename. Decoding happens later so a corrupt file can be reported by
/// name.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }
}

/// One generation call's inputs. Each request owns its images for its
/// lifetime; `sequence` distinguishes repeated generations in the same
/// session and replaces the old process-wide counter.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub title: String,
    pub contractor: String,
    pub images: Vec<UploadedImage>,
    pub sequence: usize,
}

impl GenerationRequest {
    pub fn new(title: impl Into<String>, contractor: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            contractor: contractor.into(),
            images: Vec::new(),
            sequence: 0,
        }
    }

    /// Check the blocking preconditions before any rendering starts.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(DocError::MissingRequiredField("project title"));
        }
        if self.contractor.trim().is_empty() {
            return Err(DocError::MissingRequiredField("contractor name"));
        }
        if self.images.is_empty() {
            return Err(DocError::MissingRequiredField("images"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload() -> UploadedImage {
        UploadedImage::new("a.png", vec![1, 2, 3])
    }

    #[test]
    fn complete_request_passes() {
        let mut request = GenerationRequest::new("Refit", "Acme Builders");
        request.images.push(upload());
        request.validate().unwrap();
    }

    #[test]
    fn blank_title_is_missing() {
        let mut request = GenerationRequest::new("   ", "Acme Builders");
        request.images.push(upload());
        assert!(matches!(
            request.validate(),
            Err(DocError::MissingRequiredField("project title"))
        ));
    }

    #[test]
    fn blank_contractor_is_missing() {
        let mut request = GenerationRequest::new("Refit", "");
        request.images.push(upload());
        assert!(matches!(
            request.validate(),
            Err(DocError::MissingRequiredField("contractor name"))
        ));
    }

    #[test]
    fn empty_image_set_is_missing() {
        let request = GenerationRequest::new("Refit", "Acme Builders");
        assert!(matches!(
            request.validate(),
            Err(DocError::MissingRequiredField("images"))
        ));
    }
}
