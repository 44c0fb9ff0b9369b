//! Pipeline tuning.

use std::time::Duration;

/// Thresholds and timeouts for [`crate::ExtractionPipeline`].
///
/// PDF and Office thresholds are kept separate so each can be tuned against
/// real short documents of that format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionConfig {
    /// Minimum characters of PDF text accepted as real content (default: 50).
    pub pdf_min_chars: usize,
    /// Minimum characters of DOCX/PPTX text accepted as real content (default: 50).
    pub office_min_chars: usize,
    /// Recognizer output shorter than this falls back to the byte scan (default: 100).
    pub enhancement_min_chars: usize,
    /// Upper bound on a single recognizer call (default: 60s).
    pub enhancement_timeout: Duration,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            pdf_min_chars: 50,
            office_min_chars: 50,
            enhancement_min_chars: 100,
            enhancement_timeout: Duration::from_secs(60),
        }
    }
}

impl ExtractionConfig {
    /// Create config from environment variables, keeping defaults for unset
    /// or unparsable values.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(value) = env_usize("SMARTCAMPUS_PDF_MIN_CHARS") {
            config.pdf_min_chars = value;
        }

        if let Some(value) = env_usize("SMARTCAMPUS_OFFICE_MIN_CHARS") {
            config.office_min_chars = value;
        }

        if let Some(value) = env_usize("SMARTCAMPUS_ENHANCEMENT_MIN_CHARS") {
            config.enhancement_min_chars = value;
        }

        if let Some(secs) = env_usize("SMARTCAMPUS_ENHANCEMENT_TIMEOUT_SECS") {
            config.enhancement_timeout = Duration::from_secs(secs as u64);
        }

        config
    }

    /// Set both content thresholds at once.
    pub fn with_min_chars(mut self, min_chars: usize) -> Self {
        self.pdf_min_chars = min_chars;
        self.office_min_chars = min_chars;
        self
    }

    /// Set the recognizer timeout.
    pub fn with_enhancement_timeout(mut self, timeout: Duration) -> Self {
        self.enhancement_timeout = timeout;
        self
    }
}

fn env_usize(key: &str) -> Option<usize> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExtractionConfig::default();
        assert_eq!(config.pdf_min_chars, 50);
        assert_eq!(config.office_min_chars, 50);
        assert_eq!(config.enhancement_min_chars, 100);
        assert_eq!(config.enhancement_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_builders() {
        let config = ExtractionConfig::default()
            .with_min_chars(10)
            .with_enhancement_timeout(Duration::from_millis(5));
        assert_eq!(config.pdf_min_chars, 10);
        assert_eq!(config.office_min_chars, 10);
        assert_eq!(config.enhancement_timeout, Duration::from_millis(5));
    }
}
