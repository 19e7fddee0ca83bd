//! Cache key construction for knowledge-base answers.
//!
//! Keys have the shape `<namespace>:<session>:<sha256-hex>`. The digest is
//! taken over the normalized question, so questions differing only in case,
//! punctuation or spacing share an entry. The session is part of the key,
//! so two sessions never share one.

use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};

use crate::domain::foundation::SessionId;

/// Default key namespace for cached answers.
pub const DEFAULT_NAMESPACE: &str = "rag:answer";

static SEPARATOR_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[？?！!。，,.\s]+").expect("separator pattern is valid"));

/// Normalizes a question for cache lookup.
///
/// Trims, lowercases, and collapses runs of whitespace and common
/// punctuation into a single space.
pub fn normalize_question(question: &str) -> String {
    let lowered = question.trim().to_lowercase();
    SEPARATOR_RUN.replace_all(&lowered, " ").trim().to_string()
}

/// Builds namespaced, session-scoped cache keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKeyBuilder {
    namespace: String,
}

impl CacheKeyBuilder {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Computes the cache key for a question asked in a session.
    pub fn key(&self, session: &SessionId, question: &str) -> String {
        let digest = Sha256::digest(normalize_question(question).as_bytes());
        format!("{}:{}:{}", self.namespace, session, to_hex(&digest))
    }
}

impl Default for CacheKeyBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn session(id: &str) -> SessionId {
        SessionId::new(id).unwrap()
    }

    #[test]
    fn normalize_lowercases_and_strips_trailing_punctuation() {
        assert_eq!(normalize_question("  Hi?  "), "hi");
        assert_eq!(normalize_question("What is   the POLICY?!"), "what is the policy");
    }

    #[test]
    fn normalize_collapses_full_width_punctuation() {
        assert_eq!(normalize_question("年假，多少天？"), "年假 多少天");
    }

    #[test]
    fn key_ignores_case_and_punctuation() {
        let builder = CacheKeyBuilder::default();
        let s = session("s1");
        assert_eq!(builder.key(&s, "Hi?"), builder.key(&s, "hi"));
    }

    #[test]
    fn key_has_namespace_session_and_hex_digest() {
        let key = CacheKeyBuilder::default().key(&session("chat-7"), "hello");
        let parts: Vec<&str> = key.rsplitn(2, ':').collect();
        assert!(parts[1].starts_with("rag:answer:chat-7"));
        assert_eq!(parts[0].len(), 64);
        assert!(parts[0].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn key_digest_is_stable_across_runs() {
        let key = CacheKeyBuilder::default().key(&session("s"), "hello");
        assert_eq!(
            key,
            "rag:answer:s:2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn custom_namespace_is_used() {
        let key = CacheKeyBuilder::new("kb").key(&session("s"), "q");
        assert!(key.starts_with("kb:s:"));
    }

    proptest! {
        #[test]
        fn key_is_insensitive_to_case_and_spacing(words in prop::collection::vec("[a-z]{1,8}", 1..6)) {
            let builder = CacheKeyBuilder::default();
            let s = session("prop");
            let plain = words.join(" ");
            let noisy = format!("  {}?? ", words.join("   ").to_uppercase());
            prop_assert_eq!(builder.key(&s, &plain), builder.key(&s, &noisy));
        }

        #[test]
        fn different_sessions_never_share_a_key(a in "[a-z0-9]{1,12}", b in "[a-z0-9]{1,12}", q in ".{0,40}") {
            prop_assume!(a != b);
            let builder = CacheKeyBuilder::default();
            prop_assert_ne!(builder.key(&session(&a), &q), builder.key(&session(&b), &q));
        }

        #[test]
        fn normalization_is_idempotent(q in "[a-zA-Z0-9 ?!.,，。？！\t]{0,60}") {
            let once = normalize_question(&q);
            prop_assert_eq!(normalize_question(&once), once.clone());
        }
    }
}
