use secrecy::{ExposeSecret, Secret};

/// Opaque bearer credential issued by the backend.
///
/// The client never looks inside it; expiry is discovered when a request comes back 401.
#[derive(Debug, Clone)]
pub struct BearerToken(Secret<String>);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Secret::new(token.into()))
    }

    /// Value of the `Authorization` header carrying this token.
    pub fn authorization_value(&self) -> String {
        format!("Bearer {}", self.0.expose_secret())
    }
}

impl AsRef<Secret<String>> for BearerToken {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for BearerToken {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for BearerToken {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_does_not_leak_the_token() {
        let token = BearerToken::new("abc");
        assert!(!format!("{token:?}").contains("abc"));
    }

    #[test]
    fn authorization_value_uses_bearer_scheme() {
        assert_eq!(BearerToken::new("abc").authorization_value(), "Bearer abc");
    }
}
