/*
 * Responsibility
 * - Typed view of the identity claims carried in an access token payload
 * - Mapping from the decoded JSON object onto that view (serde + non-empty checks)
 *
 * Notes
 * - Claims is built once per request and only handed out by reference afterwards
 * - `resource_access` is an open map: unknown client ids are kept as-is
 * - `aud` keeps whatever shape the issuer used (string or array)
 */
use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::{AuthError, AuthResult, DecodeFailure, SchemaViolation};

/// Claims understood by this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimField {
    Expiration,
    IssuedAt,
    TokenId,
    Issuer,
    Audience,
    Subject,
    TokenType,
    AuthorizedParty,
    SessionId,
    AuthContextClass,
    AllowedOrigins,
    RealmAccess,
    ResourceAccess,
    Scope,
    EmailVerified,
    Name,
    PreferredUsername,
    GivenName,
    FamilyName,
    Email,
}

impl ClaimField {
    pub const ALL: [ClaimField; 20] = [
        Self::Expiration,
        Self::IssuedAt,
        Self::TokenId,
        Self::Issuer,
        Self::Audience,
        Self::Subject,
        Self::TokenType,
        Self::AuthorizedParty,
        Self::SessionId,
        Self::AuthContextClass,
        Self::AllowedOrigins,
        Self::RealmAccess,
        Self::ResourceAccess,
        Self::Scope,
        Self::EmailVerified,
        Self::Name,
        Self::PreferredUsername,
        Self::GivenName,
        Self::FamilyName,
        Self::Email,
    ];

    pub const REQUIRED: [ClaimField; 6] = [
        Self::Expiration,
        Self::IssuedAt,
        Self::TokenId,
        Self::Issuer,
        Self::Audience,
        Self::Subject,
    ];

    /// `(model name, wire name)`; the wire name matches the serde rename on `Claims`.
    const fn names(self) -> (&'static str, &'static str) {
        match self {
            Self::Expiration => ("expiration", "exp"),
            Self::IssuedAt => ("issued_at", "iat"),
            Self::TokenId => ("token_id", "jti"),
            Self::Issuer => ("issuer", "iss"),
            Self::Audience => ("audience", "aud"),
            Self::Subject => ("subject", "sub"),
            Self::TokenType => ("token_type", "typ"),
            Self::AuthorizedParty => ("authorized_party", "azp"),
            Self::SessionId => ("session_id", "sid"),
            Self::AuthContextClass => ("auth_context_class", "acr"),
            Self::AllowedOrigins => ("allowed_origins", "allowed-origins"),
            Self::RealmAccess => ("realm_access", "realm_access"),
            Self::ResourceAccess => ("resource_access", "resource_access"),
            Self::Scope => ("scope", "scope"),
            Self::EmailVerified => ("email_verified", "email_verified"),
            Self::Name => ("name", "name"),
            Self::PreferredUsername => ("preferred_username", "preferred_username"),
            Self::GivenName => ("given_name", "given_name"),
            Self::FamilyName => ("family_name", "family_name"),
            Self::Email => ("email", "email"),
        }
    }

    pub const fn name(self) -> &'static str {
        self.names().0
    }

    /// Key used in the token payload.
    pub const fn wire_name(self) -> &'static str {
        self.names().1
    }

    pub fn from_wire_name(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.wire_name() == key)
    }

    fn expected_shape(self) -> &'static str {
        match self {
            Self::Expiration | Self::IssuedAt => "an integer",
            Self::Audience => "a string or an array of strings",
            Self::AllowedOrigins => "an array of strings",
            Self::RealmAccess => "an object with a 'roles' array of strings",
            Self::ResourceAccess => "an object",
            Self::EmailVerified => "a boolean",
            _ => "a string",
        }
    }
}

impl fmt::Display for ClaimField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.wire_name())
    }
}

/// `aud` may be a single string or an ordered list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Many(Vec<String>),
}

impl Audience {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let values = match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Many(values) => values.as_slice(),
        };
        values.iter().map(String::as_str)
    }

    pub fn contains(&self, audience: &str) -> bool {
        self.iter().any(|value| value == audience)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealmAccess {
    roles: Vec<String>,
}

impl RealmAccess {
    pub fn roles(&self) -> &[String] {
        &self.roles
    }
}

/// Per-client role entries, keyed by client/resource id.
///
/// Entries are kept as raw JSON so clients can carry fields beyond `roles`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceAccess(BTreeMap<String, Value>);

impl ResourceAccess {
    pub fn get(&self, client: &str) -> Option<&Value> {
        self.0.get(client)
    }

    pub fn clients(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Role names listed under `<client>.roles`; empty when absent or not a string array.
    pub fn roles(&self, client: &str) -> Vec<&str> {
        self.get(client)
            .and_then(|entry| entry.get("roles"))
            .and_then(Value::as_array)
            .map(|roles| roles.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "exp")]
    expiration: i64,
    #[serde(rename = "iat")]
    issued_at: i64,
    #[serde(rename = "jti")]
    token_id: String,
    #[serde(rename = "iss")]
    issuer: String,
    #[serde(rename = "aud")]
    audience: Audience,
    #[serde(rename = "sub")]
    subject: String,

    #[serde(rename = "typ")]
    token_type: Option<String>,
    #[serde(rename = "azp")]
    authorized_party: Option<String>,
    #[serde(rename = "sid")]
    session_id: Option<String>,
    #[serde(rename = "acr")]
    auth_context_class: Option<String>,
    #[serde(rename = "allowed-origins")]
    allowed_origins: Option<Vec<String>>,
    realm_access: Option<RealmAccess>,
    resource_access: Option<ResourceAccess>,
    scope: Option<String>,
    email_verified: Option<bool>,
    name: Option<String>,
    preferred_username: Option<String>,
    given_name: Option<String>,
    family_name: Option<String>,
    email: Option<String>,
}

impl Claims {
    /// Map a decoded token payload onto `Claims`.
    ///
    /// Required claims must be present with the right shape; identifiers and
    /// the audience must not be empty. Optional claims that are absent or
    /// `null` become `None`. Unknown claims are ignored.
    pub fn from_payload(mut payload: Map<String, Value>) -> AuthResult<Self> {
        // JSON null counts as absent.
        payload.retain(|_, value| !value.is_null());

        if let Some(field) = ClaimField::REQUIRED
            .into_iter()
            .find(|field| !payload.contains_key(field.wire_name()))
        {
            return Err(AuthError::schema(field, SchemaViolation::Missing));
        }

        let claims: Self =
            serde_path_to_error::deserialize(Value::Object(payload)).map_err(shape_error)?;
        claims.check_non_empty()?;
        Ok(claims)
    }

    fn check_non_empty(&self) -> AuthResult<()> {
        for (field, value) in [
            (ClaimField::TokenId, &self.token_id),
            (ClaimField::Issuer, &self.issuer),
            (ClaimField::Subject, &self.subject),
        ] {
            if value.trim().is_empty() {
                return Err(AuthError::schema(field, SchemaViolation::Empty));
            }
        }

        let mut audience = self.audience.iter().peekable();
        if audience.peek().is_none() || audience.any(str::is_empty) {
            return Err(AuthError::schema(ClaimField::Audience, SchemaViolation::Empty));
        }
        Ok(())
    }

    pub fn expiration(&self) -> i64 {
        self.expiration
    }

    pub fn issued_at(&self) -> i64 {
        self.issued_at
    }

    pub fn token_id(&self) -> &str {
        &self.token_id
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn audience(&self) -> &Audience {
        &self.audience
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn token_type(&self) -> Option<&str> {
        self.token_type.as_deref()
    }

    pub fn authorized_party(&self) -> Option<&str> {
        self.authorized_party.as_deref()
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn auth_context_class(&self) -> Option<&str> {
        self.auth_context_class.as_deref()
    }

    pub fn allowed_origins(&self) -> Option<&[String]> {
        self.allowed_origins.as_deref()
    }

    pub fn realm_access(&self) -> Option<&RealmAccess> {
        self.realm_access.as_ref()
    }

    pub fn resource_access(&self) -> Option<&ResourceAccess> {
        self.resource_access.as_ref()
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn email_verified(&self) -> Option<bool> {
        self.email_verified
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn preferred_username(&self) -> Option<&str> {
        self.preferred_username.as_deref()
    }

    pub fn given_name(&self) -> Option<&str> {
        self.given_name.as_deref()
    }

    pub fn family_name(&self) -> Option<&str> {
        self.family_name.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// `exp` as a timestamp; `None` if it is outside chrono's range.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.expiration, 0).single()
    }

    pub fn issued_at_time(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.issued_at, 0).single()
    }

    /// Individual entries of the space-separated `scope` claim.
    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.scope.as_deref().unwrap_or_default().split_whitespace()
    }

    pub fn has_realm_role(&self, role: &str) -> bool {
        self.realm_access
            .as_ref()
            .is_some_and(|access| access.roles.iter().any(|value| value == role))
    }

    pub fn resource_roles(&self, client: &str) -> Vec<&str> {
        self.resource_access
            .as_ref()
            .map(|access| access.roles(client))
            .unwrap_or_default()
    }
}

// serde reports where it failed as a path; its first key names the claim.
fn shape_error(err: serde_path_to_error::Error<serde_json::Error>) -> AuthError {
    let field = err.path().iter().next().and_then(|segment| match segment {
        serde_path_to_error::Segment::Map { key } => ClaimField::from_wire_name(key),
        _ => None,
    });

    match field {
        Some(field) => AuthError::schema(
            field,
            SchemaViolation::WrongType {
                expected: field.expected_shape(),
            },
        ),
        None => DecodeFailure::Json {
            segment: "payload",
            source: err.into_inner(),
        }
        .into(),
    }
}
