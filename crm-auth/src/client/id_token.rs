use crate::common::UserProfile;
use crate::error::AuthError;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

/// Decode the claims segment of a compact-form identity token into a
/// profile, without any network call or signature verification.
///
/// Kept as a pure function so session code can swap it for a
/// backend-verified `/users/me` fetch without touching state machinery.
pub fn decode(id_token: &str) -> Result<UserProfile, AuthError> {
    let mut segments = id_token.split('.');
    let claims = segments
        .nth(1)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AuthError::Decode("token is not in compact form".to_string()))?;

    let bytes = URL_SAFE_NO_PAD
        .decode(claims.trim_end_matches('='))
        .map_err(|e| AuthError::Decode(format!("claims segment is not base64url: {}", e)))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| AuthError::Decode(format!("claims are not valid JSON: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_token(claims: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
        format!("{}.{}.signature", header, payload)
    }

    #[test]
    fn decodes_profile_claims() {
        let token = make_token(serde_json::json!({
            "sub": "user-123",
            "email": "ada@example.com",
            "name": "Ada",
            "custom:tenant": "acme",
        }));

        let profile = decode(&token).unwrap();
        assert_eq!(profile.sub.as_deref(), Some("user-123"));
        assert_eq!(profile.email.as_deref(), Some("ada@example.com"));
        assert_eq!(profile.name.as_deref(), Some("Ada"));
        assert_eq!(
            profile.claims.get("custom:tenant").and_then(|v| v.as_str()),
            Some("acme")
        );
    }

    #[test]
    fn rejects_opaque_token() {
        assert!(matches!(decode("not-a-jwt"), Err(AuthError::Decode(_))));
    }

    #[test]
    fn rejects_garbage_claims() {
        let token = format!("header.{}.sig", URL_SAFE_NO_PAD.encode(b"garbage"));
        assert!(matches!(decode(&token), Err(AuthError::Decode(_))));
    }
}
