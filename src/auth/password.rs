//! Password Comparator
//! Mission: Accept both bcrypt-hashed and legacy plaintext credential records

/// A stored credential record, classified once so the comparison is
/// exhaustive instead of sniffing prefixes at every call site.
///
/// Stores may contain either bcrypt hashes or administratively-seeded
/// plaintext secrets; both must authenticate. Plaintext support is a
/// documented trade-off for seeded accounts, not an oversight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredPassword {
    /// Record carrying the bcrypt marker (`$2a$` / `$2b$` / `$2y$`).
    Hashed(String),
    /// Anything else non-empty: compared by exact equality.
    Plain(String),
    /// Empty or absent record; never authenticates.
    Empty,
}

impl StoredPassword {
    /// Classify a raw stored record by its bcrypt marker.
    pub fn classify(record: &str) -> Self {
        if record.is_empty() {
            StoredPassword::Empty
        } else if record.starts_with("$2") {
            StoredPassword::Hashed(record.to_string())
        } else {
            StoredPassword::Plain(record.to_string())
        }
    }

    /// Pure predicate: does `candidate` authenticate against this record?
    ///
    /// Internal bcrypt errors (malformed hash payload) are normalized to
    /// `false`, never surfaced to the caller.
    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            StoredPassword::Empty => false,
            StoredPassword::Hashed(hash) => bcrypt::verify(candidate, hash).unwrap_or(false),
            StoredPassword::Plain(plain) => plain == candidate,
        }
    }
}

/// Compare a raw stored record against a candidate password.
pub fn match_password(record: &str, candidate: &str) -> bool {
    StoredPassword::classify(record).matches(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bcrypt::{hash, DEFAULT_COST};

    #[test]
    fn test_plaintext_record_exact_match_only() {
        assert!(match_password("password123", "password123"));
        assert!(!match_password("password123", "password124"));
        assert!(!match_password("password123", "Password123"));
        assert!(!match_password("password123", ""));
    }

    #[test]
    fn test_hashed_record_accepts_original_candidate() {
        let hashed = hash("hunter2", DEFAULT_COST).unwrap();
        assert_eq!(
            StoredPassword::classify(&hashed),
            StoredPassword::Hashed(hashed.clone())
        );

        assert!(match_password(&hashed, "hunter2"));
        assert!(!match_password(&hashed, "hunter3"));
    }

    #[test]
    fn test_hash_string_as_candidate_rejected() {
        // The hash is not equal to itself under bcrypt comparison, and the
        // record is not on the plaintext path.
        let hashed = hash("hunter2", DEFAULT_COST).unwrap();
        assert!(!match_password(&hashed, &hashed));
    }

    #[test]
    fn test_empty_record_never_authenticates() {
        assert!(!match_password("", ""));
        assert!(!match_password("", "anything"));
        assert_eq!(StoredPassword::classify(""), StoredPassword::Empty);
    }

    #[test]
    fn test_malformed_bcrypt_marker_returns_false() {
        // Starts with the marker but is not a valid hash; bcrypt errors
        // must normalize to a rejection, not a panic or an Err.
        assert!(!match_password("$2b$garbage", "anything"));
        assert!(!match_password("$2b$garbage", "$2b$garbage"));
    }

    #[test]
    fn test_comparator_does_not_mutate_record() {
        let record = "plain-secret".to_string();
        let classified = StoredPassword::classify(&record);
        classified.matches("x");
        classified.matches("plain-secret");
        assert_eq!(record, "plain-secret");
        assert_eq!(classified, StoredPassword::Plain("plain-secret".into()));
    }
}
