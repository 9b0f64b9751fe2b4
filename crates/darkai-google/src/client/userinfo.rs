//! OAuth2 userinfo lookup for Google sign-in.

use darkai_core::SocialIdentity;

use super::GoogleClient;
use crate::error::{GoogleApiError, GoogleResult};
use crate::http::HttpBackend;
use crate::models::UserInfo;

impl<B: HttpBackend> GoogleClient<B> {
    /// Resolve an access token to the Google account behind it.
    pub async fn user_identity(&self, access_token: &str) -> GoogleResult<SocialIdentity> {
        let info: UserInfo = self
            .backend()
            .get_json(&self.userinfo_url, Some(access_token))
            .await?;

        let email = info
            .email
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .ok_or_else(|| GoogleApiError::invalid("userinfo response has no email"))?;

        Ok(SocialIdentity {
            email,
            email_verified: info.email_verified,
            name: info.name.filter(|n| !n.trim().is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::keyless_client;
    use crate::http::testing::{CannedResponse, FakeBackend};
    use serde_json::json;

    #[tokio::test]
    async fn identity_is_normalized() {
        let backend = FakeBackend::new().with_response(
            "userinfo",
            CannedResponse::Json(json!({
                "sub": "1234",
                "email": " Ana@Example.COM ",
                "email_verified": true,
                "name": "Ana"
            })),
        );
        let client = keyless_client(backend);

        let identity = client.user_identity("ya29.token").await.unwrap();
        assert_eq!(identity.email, "ana@example.com");
        assert!(identity.email_verified);
        assert_eq!(identity.name.as_deref(), Some("Ana"));
        assert_eq!(
            client.backend().requests()[0].bearer.as_deref(),
            Some("ya29.token")
        );
    }

    #[tokio::test]
    async fn missing_email_is_invalid() {
        let backend =
            FakeBackend::new().with_response("userinfo", CannedResponse::Json(json!({"sub": "1"})));
        let err = keyless_client(backend).user_identity("t").await.unwrap_err();
        assert!(matches!(err, GoogleApiError::InvalidResponse { .. }));
    }
}
