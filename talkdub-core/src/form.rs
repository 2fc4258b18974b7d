//! Job submission form

use crate::dto::job::CreateJob;
use crate::validation::{
    ValidationError, validate_email, validate_language_pair, validate_video_url,
};

/// User-entered fields of a job submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionForm {
    pub video_url: String,
    pub src_lang: String,
    pub tgt_lang: String,
    pub email: String,
    pub webhook_url: Option<String>,
}

impl SubmissionForm {
    /// Validate the form and build the request body
    ///
    /// Picking the same source and target language blocks submission and
    /// clears the target selection, whatever else is wrong with the form.
    pub fn validate(&mut self) -> Result<CreateJob, ValidationError> {
        if !self.src_lang.is_empty() && self.src_lang == self.tgt_lang {
            self.tgt_lang.clear();
            return Err(ValidationError::SameLanguage);
        }
        validate_video_url(&self.video_url)?;
        validate_language_pair(&self.src_lang, &self.tgt_lang)?;
        validate_email(&self.email)?;

        Ok(CreateJob {
            video_url: self.video_url.trim().to_string(),
            src_lang: self.src_lang.clone(),
            tgt_lang: self.tgt_lang.clone(),
            email: self.email.trim().to_string(),
            webhook_url: self
                .webhook_url
                .as_deref()
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(String::from),
        })
    }
}
