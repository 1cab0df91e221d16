//! Multipart form accepted by the generate and analyze endpoints.

use axum::extract::Multipart;
use bytes::Bytes;
use url::Url;

use crate::assessment::link::require_fetchable_url;
use crate::errors::AppError;
use crate::extraction::CvFormat;

pub const DEFAULT_LANGUAGE: &str = "english";

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Fields as sent by the client, before validation.
#[derive(Debug, Default)]
pub struct GenerationForm {
    pub language: Option<String>,
    pub job_input_type: Option<String>,
    pub job_poster: Option<UploadedFile>,
    pub job_link: Option<String>,
    pub cv: Option<UploadedFile>,
}

#[derive(Debug, Clone)]
pub enum JobSource {
    Poster(UploadedFile),
    Link(Url),
}

#[derive(Debug, Clone)]
pub struct ValidatedForm {
    pub language: String,
    pub job: JobSource,
    pub cv: UploadedFile,
    pub cv_format: CvFormat,
}

impl GenerationForm {
    /// Reads every part of the body. Unknown fields are skipped.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = GenerationForm::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match name.as_str() {
                "language" => form.language = Some(field.text().await?),
                "jobInputType" => form.job_input_type = Some(field.text().await?),
                "jobLink" => form.job_link = Some(field.text().await?),
                "jobPoster" | "cv" => {
                    let file_name = field.file_name().map(str::to_string);
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await?;
                    let file = UploadedFile {
                        file_name,
                        content_type,
                        bytes,
                    };
                    if name == "cv" {
                        form.cv = Some(file);
                    } else {
                        form.job_poster = Some(file);
                    }
                }
                _ => {}
            }
        }

        Ok(form)
    }

    /// Rejects requests that cannot reach the assessment at all: no job
    /// source, no CV, an unknown input type, an unusable link or a CV that
    /// is neither PDF nor DOCX.
    pub fn validate(self) -> Result<ValidatedForm, AppError> {
        let language = self
            .language
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

        let input_type = self
            .job_input_type
            .map(|t| t.trim().to_ascii_lowercase())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "image".to_string());

        let job = match input_type.as_str() {
            "image" => match self.job_poster.filter(|f| !f.bytes.is_empty()) {
                Some(poster) => JobSource::Poster(poster),
                None => return Err(missing_inputs()),
            },
            "link" => {
                let link = self.job_link.unwrap_or_default();
                if link.trim().is_empty() {
                    return Err(missing_inputs());
                }
                let url = require_fetchable_url(&link).ok_or_else(|| {
                    AppError::Validation(
                        "Failed to process job link. Please check if the URL is valid.".to_string(),
                    )
                })?;
                JobSource::Link(url)
            }
            other => {
                return Err(AppError::Validation(format!(
                    "Unknown jobInputType '{other}'. Expected 'image' or 'link'."
                )))
            }
        };

        let cv = self
            .cv
            .filter(|f| !f.bytes.is_empty())
            .ok_or_else(missing_inputs)?;
        let cv_format = CvFormat::detect(cv.content_type.as_deref(), cv.file_name.as_deref())
            .ok_or_else(|| {
                AppError::Validation(
                    "Unsupported CV file format. Please upload a PDF or DOCX file.".to_string(),
                )
            })?;

        Ok(ValidatedForm {
            language,
            job,
            cv,
            cv_format,
        })
    }
}

fn missing_inputs() -> AppError {
    AppError::Validation(
        "Please provide job information (image or link) and a CV file".to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::PDF_MIME;

    fn file(content_type: &str, name: &str) -> UploadedFile {
        UploadedFile {
            file_name: Some(name.to_string()),
            content_type: Some(content_type.to_string()),
            bytes: Bytes::from_static(b"data"),
        }
    }

    fn poster_form() -> GenerationForm {
        GenerationForm {
            job_poster: Some(file("image/png", "poster.png")),
            cv: Some(file(PDF_MIME, "cv.pdf")),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_to_image_and_english() {
        let form = poster_form().validate().unwrap();
        assert_eq!(form.language, "english");
        assert!(matches!(form.job, JobSource::Poster(_)));
        assert_eq!(form.cv_format, CvFormat::Pdf);
    }

    #[test]
    fn test_language_is_kept_verbatim() {
        let form = GenerationForm {
            language: Some(" Deutsch ".to_string()),
            ..poster_form()
        };
        assert_eq!(form.validate().unwrap().language, "Deutsch");
    }

    #[test]
    fn test_missing_cv_is_rejected() {
        let form = GenerationForm {
            cv: None,
            ..poster_form()
        };
        assert!(matches!(form.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_empty_poster_is_rejected() {
        let form = GenerationForm {
            job_poster: Some(UploadedFile {
                bytes: Bytes::new(),
                ..file("image/png", "poster.png")
            }),
            ..poster_form()
        };
        assert!(matches!(form.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_link_source() {
        let form = GenerationForm {
            job_input_type: Some("link".to_string()),
            job_link: Some("careers.acme.example/jobs/42".to_string()),
            job_poster: None,
            ..poster_form()
        };
        match form.validate().unwrap().job {
            JobSource::Link(url) => assert_eq!(url.as_str(), "https://careers.acme.example/jobs/42"),
            other => panic!("unexpected job source {other:?}"),
        }
    }

    #[test]
    fn test_link_type_without_link_is_rejected() {
        let form = GenerationForm {
            job_input_type: Some("link".to_string()),
            ..poster_form()
        };
        assert!(matches!(form.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_unknown_input_type_is_rejected() {
        let form = GenerationForm {
            job_input_type: Some("fax".to_string()),
            ..poster_form()
        };
        assert!(matches!(form.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_unsupported_cv_type_is_rejected() {
        let form = GenerationForm {
            cv: Some(file("text/plain", "cv.txt")),
            ..poster_form()
        };
        assert!(matches!(form.validate(), Err(AppError::Validation(_))));
    }
}
