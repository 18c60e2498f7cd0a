//! Signed-token authentication for the Ghost Admin API.
//!
//! An admin key has the form `<kid>:<hex secret>`. Tokens are HS256 JWTs
//! signed with the decoded secret, carrying the key id in the header so the
//! server can pick the matching secret. They are computed locally; obtaining
//! one never touches the network.

use crate::config::TokenConfig;
use crate::error::{GhostError, Result};
use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, OnceLock, PoisonError};
use tracing::debug;

/// Minimum run of hex characters an admin key must contain.
const SECRET_HEX_PATTERN: &str = "[0-9a-f]{26}";

/// A signed credential ready to be presented to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminToken {
    /// Compact JWT sent on the wire
    pub access_token: String,
    /// Client-side expiry used for cache bookkeeping
    pub expiry: DateTime<Utc>,
    /// Authentication scheme, "Ghost" by default
    pub token_type: String,
}

impl AdminToken {
    /// Value of the `Authorization` header for this token.
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }

    /// Whether the token is still usable, renewing `leeway` early.
    pub fn is_valid(&self, leeway: chrono::Duration) -> bool {
        Utc::now() + leeway < self.expiry
    }
}

/// Claims carried by an admin token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

/// Anything that can hand out a current admin token.
#[cfg_attr(test, mockall::automock)]
pub trait TokenProvider: Send + Sync {
    fn token(&self) -> Result<AdminToken>;
}

fn secret_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(SECRET_HEX_PATTERN).expect("secret pattern is valid"))
}

/// Check that a key looks like `<kid>:<hex secret>` before it is used.
pub fn validate_key(key: &str) -> Result<()> {
    if !secret_pattern().is_match(key) {
        return Err(GhostError::Validation(
            "key must contain 26 hexadecimal characters".to_string(),
        ));
    }

    if key.matches(':').count() != 1 {
        return Err(GhostError::Validation(
            "key must be split between id and secret, separated by ':'".to_string(),
        ));
    }

    Ok(())
}

/// Generates a freshly signed token from an admin key on every call.
///
/// The key is re-checked each time a token is produced. Wrap it in a
/// [`CachingTokenProvider`] (see [`new_admin_token_source`]) to avoid
/// re-signing on every request.
#[derive(Clone)]
pub struct AdminTokenSource {
    key: String,
    config: TokenConfig,
}

impl AdminTokenSource {
    pub fn new(key: impl Into<String>, config: TokenConfig) -> Self {
        Self {
            key: key.into(),
            config,
        }
    }
}

impl std::fmt::Debug for AdminTokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kid = self.key.split(':').next().unwrap_or_default();
        f.debug_struct("AdminTokenSource")
            .field("kid", &kid)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TokenProvider for AdminTokenSource {
    fn token(&self) -> Result<AdminToken> {
        let parts: Vec<&str> = self.key.split(':').collect();
        let [kid, secret] = parts.as_slice() else {
            return Err(GhostError::Format(format!(
                "expected 2 ':'-separated parts, found {}",
                parts.len()
            )));
        };

        let secret_bytes = hex::decode(secret).map_err(|e| {
            GhostError::Encoding(format!("secret portion of key not valid hex: {}", e))
        })?;

        let lifetime = self.config.lifetime();
        let claims = Claims {
            aud: self.config.audience.clone(),
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + lifetime.num_seconds(),
        };

        let mut header = Header::new(Algorithm::HS256);
        header.kid = Some(kid.to_string());

        let signed = encode(&header, &claims, &EncodingKey::from_secret(&secret_bytes))?;

        debug!(kid = %kid, exp = claims.exp, "Signed admin token");

        Ok(AdminToken {
            access_token: signed,
            expiry: Utc::now() + lifetime,
            token_type: self.config.scheme.clone(),
        })
    }
}

/// Shares one token between callers until it expires, then asks the inner
/// provider for a new one.
///
/// Checking the cache and replacing the token happen under one lock, so
/// concurrent callers never observe a token mid-replacement.
pub struct CachingTokenProvider<P> {
    inner: P,
    leeway: chrono::Duration,
    cached: Mutex<Option<AdminToken>>,
}

impl<P: TokenProvider> CachingTokenProvider<P> {
    pub fn new(inner: P, leeway: chrono::Duration) -> Self {
        Self {
            inner,
            leeway,
            cached: Mutex::new(None),
        }
    }
}

impl<P: TokenProvider> TokenProvider for CachingTokenProvider<P> {
    fn token(&self) -> Result<AdminToken> {
        let mut cached = self.cached.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(token) = cached.as_ref() {
            if token.is_valid(self.leeway) {
                return Ok(token.clone());
            }
            debug!(expiry = %token.expiry, "Cached admin token expired, renewing");
        }

        let token = self.inner.token()?;
        *cached = Some(token.clone());
        Ok(token)
    }
}

impl<P> std::fmt::Debug for CachingTokenProvider<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachingTokenProvider")
            .field("leeway", &self.leeway)
            .finish_non_exhaustive()
    }
}

/// Validate `key` and return a reusable, self-renewing token provider for it.
pub fn new_admin_token_source(
    key: &str,
    config: TokenConfig,
) -> Result<CachingTokenProvider<AdminTokenSource>> {
    validate_key(key)?;
    let leeway = config.expiry_leeway();
    Ok(CachingTokenProvider::new(
        AdminTokenSource::new(key, config),
        leeway,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use jsonwebtoken::{decode, decode_header, DecodingKey, Validation};

    const EXAMPLE_ADMIN_KEY: &str = "5ea1aeb17edc2650468b6554:0f1103f5af0395a73041457eb6928f9e0d143a8dcba187915342e65687e2a589";

    fn token_at(access_token: &str, expiry: DateTime<Utc>) -> AdminToken {
        AdminToken {
            access_token: access_token.to_string(),
            expiry,
            token_type: "Ghost".to_string(),
        }
    }

    #[test]
    fn test_admin_token_source() {
        let source = AdminTokenSource::new(EXAMPLE_ADMIN_KEY, TokenConfig::default());

        let before = Utc::now();
        let token = source.token().unwrap();
        let after = Utc::now();

        assert_eq!(token.token_type, "Ghost");
        assert!(token.expiry > before + Duration::seconds(299));
        assert!(token.expiry <= after + Duration::minutes(5));
    }

    #[test]
    fn test_token_claims_and_header() {
        let source = AdminTokenSource::new(EXAMPLE_ADMIN_KEY, TokenConfig::default());
        let token = source.token().unwrap();

        let header = decode_header(&token.access_token).unwrap();
        assert_eq!(header.alg, Algorithm::HS256);
        assert_eq!(header.kid.as_deref(), Some("5ea1aeb17edc2650468b6554"));

        let secret =
            hex::decode("0f1103f5af0395a73041457eb6928f9e0d143a8dcba187915342e65687e2a589")
                .unwrap();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&["/v3/admin/"]);
        let data = decode::<Claims>(
            &token.access_token,
            &DecodingKey::from_secret(&secret),
            &validation,
        )
        .unwrap();

        assert_eq!(data.claims.aud, "/v3/admin/");
        // separate clock reads may straddle a second boundary
        assert!((300..=301).contains(&(data.claims.exp - data.claims.iat)));
    }

    #[test]
    fn test_authorization_value() {
        let token = token_at("abc.def.ghi", Utc::now());
        assert_eq!(token.authorization(), "Ghost abc.def.ghi");
    }

    #[test]
    fn test_custom_scheme_and_audience() {
        let config = TokenConfig {
            audience: "/v4/admin/".to_string(),
            scheme: "Custom".to_string(),
            ..TokenConfig::default()
        };
        let token = AdminTokenSource::new(EXAMPLE_ADMIN_KEY, config)
            .token()
            .unwrap();
        assert_eq!(token.token_type, "Custom");
    }

    #[test]
    fn test_invalid_hex_secret() {
        let source = AdminTokenSource::new("5ea1aeb17edc2650468b6554:zz", TokenConfig::default());
        match source.token().unwrap_err() {
            GhostError::Encoding(msg) => assert!(msg.contains("hex")),
            e => panic!("Expected Encoding error, got: {:?}", e),
        }
    }

    #[test]
    fn test_too_many_parts() {
        let source = AdminTokenSource::new("a:b:c", TokenConfig::default());
        assert!(matches!(source.token(), Err(GhostError::Format(_))));
    }

    #[test]
    fn test_missing_separator() {
        let source = AdminTokenSource::new("0f1103f5af0395a73041457eb6928f9e", TokenConfig::default());
        assert!(matches!(source.token(), Err(GhostError::Format(_))));
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key(EXAMPLE_ADMIN_KEY).is_ok());
        assert!(matches!(validate_key("blah"), Err(GhostError::Validation(_))));
        // hex run present but no separator
        assert!(matches!(
            validate_key("0f1103f5af0395a73041457eb6928f9e"),
            Err(GhostError::Validation(_))
        ));
        // two separators
        assert!(matches!(
            validate_key("a:0f1103f5af0395a73041457eb6928f9e:b"),
            Err(GhostError::Validation(_))
        ));
        // too few hex characters
        assert!(matches!(
            validate_key("5ea1aeb1:0f1103f5"),
            Err(GhostError::Validation(_))
        ));
    }

    #[test]
    fn test_new_admin_token_source() {
        let source = new_admin_token_source(EXAMPLE_ADMIN_KEY, TokenConfig::default()).unwrap();
        let token = source.token().unwrap();
        assert_eq!(token.token_type, "Ghost");

        assert!(matches!(
            new_admin_token_source("blah", TokenConfig::default()),
            Err(GhostError::Validation(_))
        ));
    }

    #[test]
    fn test_validated_key_with_bad_secret_fails_at_use() {
        let key = "0f1103f5af0395a73041457eb6928f9e:zz";
        let source = new_admin_token_source(key, TokenConfig::default()).unwrap();
        assert!(matches!(source.token(), Err(GhostError::Encoding(_))));
    }

    #[test]
    fn test_cache_reuses_token() {
        let source = new_admin_token_source(EXAMPLE_ADMIN_KEY, TokenConfig::default()).unwrap();

        let first = source.token().unwrap();
        let second = source.token().unwrap();
        assert_eq!(first.access_token, second.access_token);
    }

    #[test]
    fn test_cache_renews_expired_token() {
        let source = new_admin_token_source(EXAMPLE_ADMIN_KEY, TokenConfig::default()).unwrap();
        let first = source.token().unwrap();

        // iat/exp have second resolution; make sure the re-signed claims differ
        std::thread::sleep(std::time::Duration::from_millis(1100));
        source
            .cached
            .lock()
            .unwrap()
            .as_mut()
            .unwrap()
            .expiry = Utc::now() - Duration::seconds(1);

        let second = source.token().unwrap();
        assert_ne!(first.access_token, second.access_token);
        assert!(second.expiry > Utc::now());
    }

    #[test]
    fn test_cache_calls_inner_once_while_valid() {
        let mut inner = MockTokenProvider::new();
        inner
            .expect_token()
            .times(1)
            .returning(|| Ok(token_at("cached", Utc::now() + Duration::minutes(5))));

        let cache = CachingTokenProvider::new(inner, Duration::seconds(10));
        for _ in 0..3 {
            assert_eq!(cache.token().unwrap().access_token, "cached");
        }
    }

    #[test]
    fn test_cache_renews_within_leeway() {
        let mut inner = MockTokenProvider::new();
        let mut seq = mockall::Sequence::new();
        inner
            .expect_token()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(token_at("nearly-expired", Utc::now() + Duration::seconds(5))));
        inner
            .expect_token()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(token_at("fresh", Utc::now() + Duration::minutes(5))));

        let cache = CachingTokenProvider::new(inner, Duration::seconds(10));
        assert_eq!(cache.token().unwrap().access_token, "nearly-expired");
        assert_eq!(cache.token().unwrap().access_token, "fresh");
        assert_eq!(cache.token().unwrap().access_token, "fresh");
    }

    #[test]
    fn test_cache_does_not_store_failures() {
        let mut inner = MockTokenProvider::new();
        let mut seq = mockall::Sequence::new();
        inner
            .expect_token()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Err(GhostError::Format("broken".to_string())));
        inner
            .expect_token()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(token_at("recovered", Utc::now() + Duration::minutes(5))));

        let cache = CachingTokenProvider::new(inner, Duration::seconds(10));
        assert!(cache.token().is_err());
        assert_eq!(cache.token().unwrap().access_token, "recovered");
    }

    #[test]
    fn test_cache_shared_across_threads() {
        let mut inner = MockTokenProvider::new();
        inner
            .expect_token()
            .times(1)
            .returning(|| Ok(token_at("shared", Utc::now() + Duration::minutes(5))));

        let cache = CachingTokenProvider::new(inner, Duration::seconds(10));
        let tokens: Vec<AdminToken> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8).map(|_| s.spawn(|| cache.token().unwrap())).collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(tokens.len(), 8);
        assert!(tokens.iter().all(|t| t.access_token == "shared"));
    }

    #[test]
    fn test_secret_pattern_compiled_once() {
        assert!(std::ptr::eq(secret_pattern(), secret_pattern()));
        assert!(validate_key(EXAMPLE_ADMIN_KEY).is_ok());
        assert!(validate_key("blah").is_err());
    }

    #[test]
    fn test_debug_hides_secret() {
        let source = AdminTokenSource::new(EXAMPLE_ADMIN_KEY, TokenConfig::default());
        let debug = format!("{:?}", source);
        assert!(debug.contains("5ea1aeb17edc2650468b6554"));
        assert!(!debug.contains("0f1103f5"));
    }
}
