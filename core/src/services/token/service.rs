//! Main token service implementation

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, error, info, warn};

use crate::domain::entities::token::{
    revocation_key, token_preview, AuthUser, Claims, REVOCATION_MARKER_VALUE,
};
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::RevocationStore;

use super::config::{TokenServiceConfig, MAX_TOKEN_TTL_SECONDS};

/// Service for issuing, validating, refreshing and revoking session tokens
///
/// A token is usable until the earlier of its embedded expiry and an explicit
/// revocation. Revocation writes a marker under `auth:revoked:<token>` whose
/// store TTL equals the token's remaining validity, so markers never outlive
/// the tokens they describe.
pub struct TokenService<S: RevocationStore> {
    store: S,
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    /// Used by `revoke`, which only needs the embedded expiry
    unverified: Validation,
}

impl<S: RevocationStore> TokenService<S> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `store` - Key-value store holding revocation markers
    /// * `config` - Token service configuration
    ///
    /// # Returns
    ///
    /// A new `TokenService`, `TokenError::UnsupportedAlgorithm` when the
    /// configured algorithm is not a shared-secret (HMAC) algorithm, or
    /// `TokenError::InvalidTokenTtl` unless the lifetime is in 1..=one year
    pub fn new(store: S, config: TokenServiceConfig) -> Result<Self, DomainError> {
        if !(1..=MAX_TOKEN_TTL_SECONDS).contains(&config.token_ttl_seconds) {
            return Err(TokenError::InvalidTokenTtl {
                seconds: config.token_ttl_seconds,
            }
            .into());
        }

        if !matches!(
            config.algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(TokenError::UnsupportedAlgorithm {
                algorithm: format!("{:?}", config.algorithm),
            }
            .into());
        }

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.leeway = 0;
        validation.validate_exp = true;

        let mut unverified = Validation::new(config.algorithm);
        unverified.insecure_disable_signature_validation();
        unverified.validate_exp = false;
        unverified.required_spec_claims.clear();

        Ok(Self {
            store,
            config,
            encoding_key,
            decoding_key,
            validation,
            unverified,
        })
    }

    /// Validity window of minted tokens, in seconds
    pub fn token_ttl_seconds(&self) -> i64 {
        self.config.token_ttl_seconds
    }

    /// The revocation store backing this service
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Signs a new token for `identity`
    ///
    /// Issued-at is now and expiry is now plus the configured TTL. Does not
    /// touch the revocation store.
    pub fn generate(&self, identity: &AuthUser) -> Result<String, DomainError> {
        let claims = Claims::for_identity(identity, self.config.token_ttl_seconds);
        self.encode_jwt(&claims)
    }

    /// Encodes claims into a JWT
    pub(crate) fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        let header = Header::new(self.config.algorithm);
        encode(&header, claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "Failed to sign session token");
            DomainError::Token(TokenError::TokenGenerationFailed {
                reason: e.to_string(),
            })
        })
    }

    /// Validates a token and reports why it was rejected
    ///
    /// The signature and expiry are checked first; a token failing that check
    /// never reaches the store. A store failure is treated as an invalid
    /// credential so that an outage cannot admit revoked tokens.
    pub async fn authenticate(&self, token: &str) -> Result<AuthUser, AuthError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::CredentialExpired,
                _ => AuthError::CredentialInvalidSignature,
            })?;

        // exp == now counts as expired
        if claims.is_expired() {
            return Err(AuthError::CredentialExpired);
        }

        match self.store.get(&revocation_key(token)).await {
            Ok(Some(_)) => {
                debug!(token = %token_preview(token), "Rejected revoked token");
                Err(AuthError::CredentialRevoked)
            }
            Ok(None) => Ok(claims.identity()),
            Err(e) => {
                error!(error = %e, "Revocation lookup failed, denying token");
                Err(AuthError::CredentialInvalidSignature)
            }
        }
    }

    /// Returns the identity carried by a valid, unrevoked token
    pub async fn validate(&self, token: &str) -> Option<AuthUser> {
        self.authenticate(token).await.ok()
    }

    /// Exchanges a valid token for a freshly minted one
    ///
    /// The new token is issued before the old one is revoked. The two steps
    /// are not atomic: if the revocation write fails, both tokens stay valid
    /// until the old one expires.
    ///
    /// Rotation is not guaranteed within the issuing second: claims carry
    /// whole seconds, so a refresh in the same second as issuance returns the
    /// presented token itself, still unrevoked.
    pub async fn refresh(&self, token: &str) -> Option<String> {
        let identity = self.validate(token).await?;

        let new_token = match self.generate(&identity) {
            Ok(new_token) => new_token,
            Err(e) => {
                error!(error = %e, user_id = identity.user_id, "Token refresh failed");
                return None;
            }
        };

        // Same identity in the same second signs to the same string; revoking
        // the old token would then revoke the new one too.
        if new_token == token {
            debug!(user_id = identity.user_id, "Refresh within issuing second, token unchanged");
            return Some(new_token);
        }

        self.revoke(token).await;
        info!(user_id = identity.user_id, "Session token refreshed");
        Some(new_token)
    }

    /// Revokes a token for the remainder of its lifetime
    ///
    /// The signature is not re-checked; only the embedded expiry is needed.
    /// Undecodable or already-expired tokens are ignored. Calling this twice
    /// for the same token has the same effect as calling it once.
    pub async fn revoke(&self, token: &str) {
        let claims = match decode::<Claims>(token, &self.decoding_key, &self.unverified) {
            Ok(data) => data.claims,
            Err(e) => {
                debug!(error = %e, "Ignoring revoke for undecodable token");
                return;
            }
        };

        let ttl = claims.remaining_seconds();
        if ttl <= 0 {
            debug!(token = %token_preview(token), "Token already expired, nothing to revoke");
            return;
        }

        match self
            .store
            .set_with_expiry(&revocation_key(token), REVOCATION_MARKER_VALUE, ttl as u64)
            .await
        {
            Ok(()) => info!(token = %token_preview(token), ttl, "Token revoked"),
            Err(e) => warn!(
                error = %e,
                token = %token_preview(token),
                "Failed to write revocation marker"
            ),
        }
    }
}
