use thiserror::Error;
use url::Url;

use crate::{JobDraft, JobPatch};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },
    #[error("invalid URL format: {value}")]
    InvalidUrl { value: String },
    #[error("invalid color format: {value}")]
    InvalidColor { value: String },
}

pub(crate) fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required { field })
    } else {
        Ok(())
    }
}

/// Empty means "no link"; anything else must be an absolute http(s) URL.
fn check_url(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(()),
        _ => Err(ValidationError::InvalidUrl {
            value: value.to_string(),
        }),
    }
}

impl JobDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)?;
        require("company", &self.company)?;
        if let Some(url) = &self.url {
            check_url(url)?;
        }
        Ok(())
    }
}

impl JobPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            require("title", title)?;
        }
        if let Some(company) = &self.company {
            require("company", company)?;
        }
        if let Some(url) = &self.url {
            check_url(url)?;
        }
        Ok(())
    }
}

pub fn validate_note_content(content: &str) -> Result<(), ValidationError> {
    require("note content", content)
}

/// Tag names must be non-empty and colors `#RRGGBB`.
pub fn validate_tag(name: &str, color: &str) -> Result<(), ValidationError> {
    require("tag name", name)?;
    let hex = color.strip_prefix('#').unwrap_or("");
    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidColor {
            value: color.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_requires_title_and_company() {
        assert_eq!(
            JobDraft::new("  ", "Acme").validate(),
            Err(ValidationError::Required { field: "title" })
        );
        assert_eq!(
            JobDraft::new("Engineer", "").validate(),
            Err(ValidationError::Required { field: "company" })
        );
        assert!(JobDraft::new("Engineer", "Acme").validate().is_ok());
    }

    #[test]
    fn url_must_be_http_or_empty() {
        let mut draft = JobDraft::new("Engineer", "Acme");
        draft.url = Some(String::new());
        assert!(draft.validate().is_ok());
        draft.url = Some("https://jobs.example.com/42".to_string());
        assert!(draft.validate().is_ok());
        draft.url = Some("ftp://jobs.example.com".to_string());
        assert!(matches!(
            draft.validate(),
            Err(ValidationError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn patch_rejects_blanking_required_fields() {
        let patch = JobPatch {
            company: Some(String::new()),
            ..JobPatch::default()
        };
        assert_eq!(
            patch.validate(),
            Err(ValidationError::Required { field: "company" })
        );
        assert!(JobPatch::default().validate().is_ok());
    }

    #[test]
    fn tag_color_is_six_digit_hex() {
        assert!(validate_tag("remote", "#00ff7A").is_ok());
        assert!(validate_tag("remote", "#00ff7").is_err());
        assert!(validate_tag("remote", "00ff7A").is_err());
        assert!(validate_tag("", "#000000").is_err());
        assert!(validate_note_content("").is_err());
    }
}
