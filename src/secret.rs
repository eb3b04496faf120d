//! Credential strings that must not leak into logs.

use std::fmt;

use zeroize::Zeroize;

/// Certificate thumbprint, private key or bearer token.
///
/// Formatting never shows the value, and the buffer is wiped on drop.
#[derive(Clone)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Drop for Secret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_redacts_debug() {
        let token = Secret::new("eyJ0eXAiOiJKV1Qi");
        assert_eq!(format!("{:?}", token), "[REDACTED]");
        assert_eq!(format!("{:?}", Some(token)), "Some([REDACTED])");
    }

    #[test]
    fn test_secret_as_str() {
        let thumbprint = Secret::new(String::from("0A1B"));
        assert_eq!(thumbprint.as_str(), "0A1B");
        assert_eq!(thumbprint.clone().as_str(), "0A1B");
        assert!(!thumbprint.is_empty());
        assert!(Secret::new("").is_empty());
    }
}
