use std::fmt;

#[derive(Clone, PartialEq, Eq)]
pub struct ProfileKey {
    bytes: [u8; 32],
}

impl ProfileKey {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }
}

impl fmt::Debug for ProfileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProfileKey(..)")
    }
}

pub trait ProfileKeyProvider: Send + Sync {
    fn profile_key(&self) -> Option<ProfileKey>;
}

#[derive(Clone, Default)]
pub struct StaticKeyProvider {
    key: Option<ProfileKey>,
}

impl StaticKeyProvider {
    pub fn new(key: Option<ProfileKey>) -> Self {
        Self { key }
    }

    pub fn with_key(bytes: [u8; 32]) -> Self {
        Self {
            key: Some(ProfileKey::from_bytes(bytes)),
        }
    }

    pub fn empty() -> Self {
        Self { key: None }
    }
}

impl ProfileKeyProvider for StaticKeyProvider {
    fn profile_key(&self) -> Option<ProfileKey> {
        self.key.clone()
    }
}
