//! Credential sources
//!
//! The two proofs of identity a caller can present: the cookie pair of an
//! established session, or the login/password form fields.

/// A caller-supplied proof of identity
#[derive(Debug, Clone)]
pub enum CredentialSource {
    /// `login` and `secret` cookies from an established session
    Cookies { login: String, secret: String },
    /// `login` and `password` form fields
    FormFields { login: String, password: String },
}

impl CredentialSource {
    pub fn login(&self) -> &str {
        match self {
            CredentialSource::Cookies { login, .. } => login,
            CredentialSource::FormFields { login, .. } => login,
        }
    }
}
