//! Ownership authorization: a resource may only be mutated by the identity
//! that created it, recorded as an email on the record at creation time.

/// Verdict of an ownership check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
}

impl Access {
    pub fn is_allowed(self) -> bool {
        matches!(self, Access::Allow)
    }
}

/// Compare the authenticated identity against the owner recorded on a
/// resource. Case-sensitive exact match; anything else is a deny and the
/// caller must not touch storage.
pub fn authorize(identity_email: &str, owner_email: &str) -> Access {
    if identity_email == owner_email {
        Access::Allow
    } else {
        Access::Deny
    }
}
