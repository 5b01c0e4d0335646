use vodca::{AsRefln, Fromln};

/// Opaque credential hash produced outside this system. The plaintext never
/// reaches the core and the hash is never serialized back out.
#[derive(Clone, PartialEq, Eq, Fromln, AsRefln)]
pub struct CredentialHash(String);

impl CredentialHash {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }
}

impl std::fmt::Debug for CredentialHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CredentialHash(..)")
    }
}
