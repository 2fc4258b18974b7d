//! Local validation
//!
//! Checks that run before any request is sent. A failure here never
//! reaches the network and is fully recoverable by correcting the input.

use thiserror::Error;
use url::Url;

/// Number of digits in a download PIN
pub const PIN_LENGTH: usize = 6;

/// Language codes accepted by the service, with display names
pub const SUPPORTED_LANGUAGES: [(&str, &str); 10] = [
    ("ja", "日本語"),
    ("zh", "中文"),
    ("en", "English"),
    ("de", "Deutsch"),
    ("fr", "Français"),
    ("it", "Italiano"),
    ("es", "Español"),
    ("pt", "Português"),
    ("ru", "Русский"),
    ("ko", "한국어"),
];

/// Errors raised by local validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("YouTube URLの形式が正しくありません")]
    InvalidVideoUrl,

    #[error("言語を選択してください")]
    MissingLanguage,

    #[error("言語コード '{0}' は対応していません")]
    UnsupportedLanguage(String),

    #[error("元言語と翻訳先言語は異なる必要があります")]
    SameLanguage,

    #[error("メールアドレスの形式が正しくありません")]
    InvalidEmail,

    #[error("6桁のPINを入力してください")]
    InvalidPin,

    #[error("ジョブIDが指定されていません")]
    MissingJobId,
}

/// Hosts that serve `watch` and `embed` pages
const YOUTUBE_HOSTS: [&str; 3] = ["youtube.com", "www.youtube.com", "m.youtube.com"];

/// Host of the short-link form
const SHORT_LINK_HOST: &str = "youtu.be";

/// Extract the 11-character video id from a YouTube URL
///
/// Accepts `youtube.com/watch?v=<id>` (`v` anywhere in the query),
/// `youtube.com/embed/<id>` and `youtu.be/<id>`. Other hosts are rejected.
pub fn extract_video_id(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    let host = parsed.host_str()?.to_ascii_lowercase();
    let mut segments = parsed.path_segments()?.filter(|s| !s.is_empty());

    let id = if host == SHORT_LINK_HOST {
        segments.next().map(String::from)
    } else if YOUTUBE_HOSTS.contains(&host.as_str()) {
        match segments.next() {
            Some("watch") => parsed
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned()),
            Some("embed") => segments.next().map(String::from),
            _ => None,
        }
    } else {
        None
    };

    id.filter(|id| is_video_id(id))
}

fn is_video_id(id: &str) -> bool {
    id.len() == 11
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Check that a string is a YouTube video URL
pub fn validate_video_url(url: &str) -> Result<(), ValidationError> {
    extract_video_id(url)
        .map(|_| ())
        .ok_or(ValidationError::InvalidVideoUrl)
}

/// Display name of a supported language code
pub fn language_name(code: &str) -> Option<&'static str> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// Check that both languages are supported and differ
pub fn validate_language_pair(src: &str, tgt: &str) -> Result<(), ValidationError> {
    if src.is_empty() || tgt.is_empty() {
        return Err(ValidationError::MissingLanguage);
    }
    for code in [src, tgt] {
        if language_name(code).is_none() {
            return Err(ValidationError::UnsupportedLanguage(code.to_string()));
        }
    }
    if src == tgt {
        return Err(ValidationError::SameLanguage);
    }
    Ok(())
}

/// Shallow e-mail check; the service performs the strict one
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let (local, domain) = email
        .trim()
        .split_once('@')
        .ok_or(ValidationError::InvalidEmail)?;

    let domain_ok = !domain.contains('@')
        && domain
            .split('.')
            .filter(|part| !part.is_empty())
            .count()
            >= 2
        && !domain.starts_with('.')
        && !domain.ends_with('.');

    if local.is_empty() || !domain_ok || email.contains(char::is_whitespace) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// A six-digit download PIN
///
/// Exists only for the duration of a download attempt and is never stored.
#[derive(Clone, PartialEq, Eq)]
pub struct PinCode(String);

impl PinCode {
    /// Parse a PIN typed as one string
    ///
    /// The input is taken as is: surrounding whitespace counts toward the
    /// length and makes the PIN invalid.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if input.len() != PIN_LENGTH || !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidPin);
        }
        Ok(Self(input.to_string()))
    }

    /// Assemble a PIN from six single-digit input cells, in order
    ///
    /// Every cell must hold exactly one digit.
    pub fn from_cells(cells: [&str; PIN_LENGTH]) -> Result<Self, ValidationError> {
        let mut pin = String::with_capacity(PIN_LENGTH);
        for cell in cells {
            let cell = cell.trim();
            if cell.len() != 1 || !cell.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ValidationError::InvalidPin);
            }
            pin.push_str(cell);
        }
        Ok(Self(pin))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for PinCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PinCode(******)")
    }
}

/// Job id addressed by a status page path such as `/status/{job_id}`
///
/// Takes the trailing non-empty path segment. Full URLs, trailing slashes,
/// query strings and fragments are tolerated.
pub fn job_id_from_path(path: &str) -> Option<String> {
    let path = path.trim();
    let parsed = match Url::parse(path) {
        Ok(url) => url,
        Err(_) => Url::parse("http://localhost/").ok()?.join(path).ok()?,
    };
    parsed
        .path_segments()?
        .rev()
        .find(|segment| !segment.is_empty())
        .map(String::from)
}
