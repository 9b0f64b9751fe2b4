//! Auth service - signup with emailed OTP, signin, Google login and sessions.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::auth::{
    OTP_MAX_ATTEMPTS, generate_otp, hash_password, normalize_email, username_seed,
    validate_signup, verify_password,
};
use crate::domain::{AuthAction, AuthOutcome, NewUser, OtpRecord, Session, User};
use crate::ports::{
    CoreError, IdentityPort, MailerPort, OtpRepository, OutgoingEmail, RepositoryError,
    SessionRepository, UserRepository,
};

const INVALID_CREDENTIALS: &str = "Invalid email or password.";
const NO_PENDING_OTP: &str = "No pending verification for this email.";
const INVALID_TOKEN: &str = "Invalid token.";

/// Service for the account lifecycle.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    otps: Arc<dyn OtpRepository>,
    sessions: Arc<dyn SessionRepository>,
    mailer: Arc<dyn MailerPort>,
    identity: Arc<dyn IdentityPort>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        otps: Arc<dyn OtpRepository>,
        sessions: Arc<dyn SessionRepository>,
        mailer: Arc<dyn MailerPort>,
        identity: Arc<dyn IdentityPort>,
    ) -> Self {
        Self {
            users,
            otps,
            sessions,
            mailer,
            identity,
        }
    }

    /// Dispatch a wire-level auth action.
    pub async fn handle(&self, action: AuthAction) -> Result<AuthOutcome, CoreError> {
        match action {
            AuthAction::Signup {
                username,
                email,
                password,
            } => self.signup(&username, &email, &password).await,
            AuthAction::Verify { email, otp } => self.verify(&email, &otp).await,
            AuthAction::Signin { email, password } => self.signin(&email, &password).await,
            AuthAction::Resend { email } => self.resend(&email).await,
        }
    }

    /// Register (or refresh) an unverified account and email it a code.
    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthOutcome, CoreError> {
        validate_signup(username, email, password).map_err(CoreError::Validation)?;
        let username = username.trim();
        let email = normalize_email(email);

        let existing = self.users.find_by_email(&email).await?;
        if existing.as_ref().is_some_and(|u| u.is_verified) {
            return Err(CoreError::Conflict("Email already registered.".to_string()));
        }
        if let Some(holder) = self.users.find_by_username(username).await? {
            if holder.email != email {
                return Err(CoreError::Conflict("Username already taken.".to_string()));
            }
        }

        let password_hash = hash_password(password).map_err(CoreError::Internal)?;
        match existing {
            Some(user) => {
                self.users
                    .update_credentials(user.id, username, Some(&password_hash))
                    .await?;
            }
            None => {
                self.users
                    .insert(&NewUser {
                        username: username.to_string(),
                        email: email.clone(),
                        password_hash: Some(password_hash),
                        is_verified: false,
                    })
                    .await
                    .map_err(|e| match e {
                        RepositoryError::AlreadyExists(_) => {
                            CoreError::Conflict("Email or username already registered.".to_string())
                        }
                        other => CoreError::from(other),
                    })?;
            }
        }

        self.send_otp(&email).await?;
        tracing::info!(target: "darkai.auth", %username, "signup pending verification");
        Ok(AuthOutcome::message("OTP has been sent to your email."))
    }

    /// Check an emailed code and, on success, verify the account and sign in.
    pub async fn verify(&self, email: &str, otp: &str) -> Result<AuthOutcome, CoreError> {
        let email = normalize_email(email);
        if email.is_empty() || otp.trim().is_empty() {
            return Err(CoreError::Validation("Email and OTP are required.".to_string()));
        }

        let record = self
            .otps
            .get(&email)
            .await?
            .ok_or_else(|| CoreError::Validation(NO_PENDING_OTP.to_string()))?;

        if record.is_expired(Utc::now()) {
            self.otps.delete(&email).await?;
            return Err(CoreError::Validation(
                "OTP has expired. Request a new one.".to_string(),
            ));
        }
        if record.attempts > OTP_MAX_ATTEMPTS {
            self.otps.delete(&email).await?;
            return Err(CoreError::Validation(
                "Too many attempts. Request a new OTP.".to_string(),
            ));
        }
        if !record.matches(otp) {
            let attempts = self.otps.record_failed_attempt(&email).await?;
            tracing::debug!(target: "darkai.auth", attempts, "wrong OTP");
            return Err(CoreError::Validation("Invalid OTP.".to_string()));
        }

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| CoreError::Validation(NO_PENDING_OTP.to_string()))?;
        self.users.mark_verified(user.id).await?;
        self.otps.delete(&email).await?;

        let session = self.issue_session(user.id).await?;
        tracing::info!(target: "darkai.auth", username = %user.username, "email verified");
        Ok(AuthOutcome::signed_in(
            "Email verified successfully.",
            &user.username,
            &session,
        ))
    }

    /// Email + password sign in.
    pub async fn signin(&self, email: &str, password: &str) -> Result<AuthOutcome, CoreError> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(CoreError::Validation(
                "Email and password are required.".to_string(),
            ));
        }

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| CoreError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;
        let password_ok = user
            .password_hash
            .as_deref()
            .is_some_and(|hash| verify_password(password, hash));
        if !password_ok {
            return Err(CoreError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }
        if !user.is_verified {
            return Err(CoreError::Forbidden("Email not verified.".to_string()));
        }

        let session = self.issue_session(user.id).await?;
        tracing::info!(target: "darkai.auth", username = %user.username, "signed in");
        Ok(AuthOutcome::signed_in(
            "Signed in successfully.",
            &user.username,
            &session,
        ))
    }

    /// Send a fresh code to an account still awaiting verification.
    pub async fn resend(&self, email: &str) -> Result<AuthOutcome, CoreError> {
        let email = normalize_email(email);
        let pending = self
            .users
            .find_by_email(&email)
            .await?
            .is_some_and(|u| !u.is_verified);
        if !pending {
            return Err(CoreError::Validation(
                "No unverified account for this email.".to_string(),
            ));
        }

        self.send_otp(&email).await?;
        Ok(AuthOutcome::message("A new OTP has been sent to your email."))
    }

    /// Sign in with a Google OAuth access token, creating the account on first use.
    pub async fn google_login(&self, access_token: &str) -> Result<AuthOutcome, CoreError> {
        let access_token = access_token.trim();
        if access_token.is_empty() {
            return Err(CoreError::Validation("Access token is required.".to_string()));
        }

        let identity = self.identity.fetch_google_identity(access_token).await?;
        if !identity.email_verified {
            return Err(CoreError::Forbidden(
                "Google account email is not verified.".to_string(),
            ));
        }
        let email = normalize_email(&identity.email);

        let user = match self.users.find_by_email(&email).await? {
            Some(user) => {
                if !user.is_verified {
                    self.users.mark_verified(user.id).await?;
                }
                user
            }
            None => {
                let username = self.unique_username(&username_seed(&email)).await?;
                tracing::info!(target: "darkai.auth", %username, "creating account from Google login");
                self.users
                    .insert(&NewUser {
                        username,
                        email,
                        password_hash: None,
                        is_verified: true,
                    })
                    .await?
            }
        };

        let session = self.issue_session(user.id).await?;
        Ok(AuthOutcome::signed_in(
            "Signed in with Google.",
            &user.username,
            &session,
        ))
    }

    /// Resolve a bearer token to its user.
    pub async fn authenticate(&self, token: &str) -> Result<User, CoreError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(CoreError::Unauthorized(
                "Authentication credentials were not provided.".to_string(),
            ));
        }

        let session = self
            .sessions
            .get(token)
            .await?
            .ok_or_else(|| CoreError::Unauthorized(INVALID_TOKEN.to_string()))?;
        if session.is_expired(Utc::now()) {
            self.sessions.delete(token).await?;
            return Err(CoreError::Unauthorized("Session expired.".to_string()));
        }

        self.users
            .find_by_id(session.user_id)
            .await?
            .ok_or_else(|| CoreError::Unauthorized(INVALID_TOKEN.to_string()))
    }

    /// End a session. Unknown tokens are ignored.
    pub async fn logout(&self, token: &str) -> Result<AuthOutcome, CoreError> {
        self.sessions.delete(token.trim()).await?;
        Ok(AuthOutcome::message("Logged out successfully."))
    }

    async fn send_otp(&self, email: &str) -> Result<(), CoreError> {
        let code = generate_otp();
        self.otps
            .upsert(&OtpRecord::issue(email, &code, Utc::now()))
            .await?;
        self.mailer.send(OutgoingEmail::otp(email, &code)).await?;
        Ok(())
    }

    async fn issue_session(&self, user_id: i64) -> Result<Session, CoreError> {
        let now = Utc::now();
        let purged = self.sessions.delete_expired(now).await?;
        if purged > 0 {
            tracing::debug!(target: "darkai.auth", purged, "removed expired sessions");
        }
        let session = Session::issue(user_id, now);
        self.sessions.insert(&session).await?;
        Ok(session)
    }

    async fn unique_username(&self, seed: &str) -> Result<String, CoreError> {
        if self.users.find_by_username(seed).await?.is_none() {
            return Ok(seed.to_string());
        }
        for n in 1..1000 {
            let candidate = format!("{seed}{n}");
            if self.users.find_by_username(&candidate).await?.is_none() {
                return Ok(candidate);
            }
        }
        Err(CoreError::Conflict(format!(
            "Could not find a free username for '{seed}'."
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SocialIdentity;
    use crate::domain::auth::OTP_TTL_MINUTES;
    use crate::ports::IdentityError;
    use crate::testing::{
        FakeMailer, InMemoryOtpRepository, InMemorySessionRepository, InMemoryUserRepository,
    };
    use async_trait::async_trait;
    use chrono::Duration;
    use mockall::mock;

    mock! {
        Identity {}

        #[async_trait]
        impl IdentityPort for Identity {
            async fn fetch_google_identity(
                &self,
                access_token: &str,
            ) -> Result<SocialIdentity, IdentityError>;
        }
    }

    struct Harness {
        auth: AuthService,
        users: Arc<InMemoryUserRepository>,
        otps: Arc<InMemoryOtpRepository>,
        sessions: Arc<InMemorySessionRepository>,
        mailer: Arc<FakeMailer>,
    }

    fn harness_with(identity: MockIdentity) -> Harness {
        let users = Arc::new(InMemoryUserRepository::default());
        let otps = Arc::new(InMemoryOtpRepository::default());
        let sessions = Arc::new(InMemorySessionRepository::default());
        let mailer = Arc::new(FakeMailer::default());
        let auth = AuthService::new(
            users.clone(),
            otps.clone(),
            sessions.clone(),
            mailer.clone(),
            Arc::new(identity),
        );
        Harness {
            auth,
            users,
            otps,
            sessions,
            mailer,
        }
    }

    fn harness() -> Harness {
        harness_with(MockIdentity::new())
    }

    async fn signed_up(h: &Harness) -> String {
        h.auth
            .signup("bhavya", "Bhavya@Dark.ai", "secret1")
            .await
            .unwrap();
        h.mailer.last_code_for("bhavya@dark.ai").unwrap()
    }

    #[tokio::test]
    async fn signup_emails_a_code() {
        let h = harness();
        let outcome = h
            .auth
            .signup("bhavya", "Bhavya@Dark.ai", "secret1")
            .await
            .unwrap();
        assert_eq!(outcome.message, "OTP has been sent to your email.");
        assert!(outcome.token.is_none());

        let user = h.users.find_by_email("bhavya@dark.ai").await.unwrap().unwrap();
        assert!(!user.is_verified);
        assert_ne!(user.password_hash.as_deref(), Some("secret1"));

        let sent = h.mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Your OTP Code");
        let code = h.mailer.last_code_for("bhavya@dark.ai").unwrap();
        let stored = h.otps.get("bhavya@dark.ai").await.unwrap().unwrap();
        assert_ne!(stored.code_hash, code);
        assert!(stored.matches(&code));
    }

    #[tokio::test]
    async fn signup_rejects_bad_input() {
        let h = harness();
        let err = h.auth.signup("bhavya", "nope", "secret1").await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(h.mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn signup_refreshes_unverified_account() {
        let h = harness();
        signed_up(&h).await;
        h.auth
            .signup("bhavya2", "bhavya@dark.ai", "another1")
            .await
            .unwrap();

        let user = h.users.find_by_email("bhavya@dark.ai").await.unwrap().unwrap();
        assert_eq!(user.username, "bhavya2");
        assert_eq!(h.mailer.sent().len(), 2);
    }

    #[tokio::test]
    async fn signup_conflicts_with_verified_email_and_taken_username() {
        let h = harness();
        let code = signed_up(&h).await;
        h.auth.verify("bhavya@dark.ai", &code).await.unwrap();

        let err = h
            .auth
            .signup("someone", "bhavya@dark.ai", "secret1")
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));

        let err = h
            .auth
            .signup("bhavya", "other@dark.ai", "secret1")
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Conflict(ref m) if m == "Username already taken."));
    }

    #[tokio::test]
    async fn verify_signs_in_and_consumes_code() {
        let h = harness();
        let code = signed_up(&h).await;

        let outcome = h.auth.verify("bhavya@dark.ai", &code).await.unwrap();
        assert_eq!(outcome.username.as_deref(), Some("bhavya"));
        let token = outcome.token.unwrap();

        let user = h.auth.authenticate(&token).await.unwrap();
        assert!(user.is_verified);
        assert!(h.otps.get("bhavya@dark.ai").await.unwrap().is_none());

        let err = h.auth.verify("bhavya@dark.ai", &code).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(ref m) if m == NO_PENDING_OTP));
    }

    async fn miss_times(h: &Harness, code: &str, times: u32) {
        let wrong = if code == "000000" { "111111" } else { "000000" };
        for _ in 0..times {
            let err = h.auth.verify("bhavya@dark.ai", wrong).await.unwrap_err();
            assert!(matches!(err, CoreError::Validation(ref m) if m == "Invalid OTP."));
        }
    }

    #[tokio::test]
    async fn code_still_accepted_after_max_wrong_attempts() {
        let h = harness();
        let code = signed_up(&h).await;
        miss_times(&h, &code, OTP_MAX_ATTEMPTS).await;

        let outcome = h.auth.verify("bhavya@dark.ai", &code).await.unwrap();
        assert!(outcome.token.is_some());
    }

    #[tokio::test]
    async fn code_discarded_after_more_than_max_wrong_attempts() {
        let h = harness();
        let code = signed_up(&h).await;
        miss_times(&h, &code, OTP_MAX_ATTEMPTS + 1).await;

        let err = h.auth.verify("bhavya@dark.ai", &code).await.unwrap_err();
        assert!(
            matches!(err, CoreError::Validation(ref m) if m == "Too many attempts. Request a new OTP.")
        );
        assert!(h.otps.get("bhavya@dark.ai").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn expired_code_is_discarded() {
        let h = harness();
        signed_up(&h).await;
        let issued = Utc::now() - Duration::minutes(OTP_TTL_MINUTES + 1);
        h.otps
            .upsert(&OtpRecord::issue("bhavya@dark.ai", "123456", issued))
            .await
            .unwrap();

        let err = h.auth.verify("bhavya@dark.ai", "123456").await.unwrap_err();
        assert!(
            matches!(err, CoreError::Validation(ref m) if m == "OTP has expired. Request a new one.")
        );
        assert!(h.otps.get("bhavya@dark.ai").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn signin_requires_verification_and_password() {
        let h = harness();
        let code = signed_up(&h).await;

        let err = h.auth.signin("bhavya@dark.ai", "secret1").await.unwrap_err();
        assert!(matches!(err, CoreError::Forbidden(ref m) if m == "Email not verified."));

        h.auth.verify("bhavya@dark.ai", &code).await.unwrap();

        let err = h.auth.signin("bhavya@dark.ai", "wrong-pass").await.unwrap_err();
        assert!(matches!(err, CoreError::Unauthorized(ref m) if m == INVALID_CREDENTIALS));
        let err = h.auth.signin("ghost@dark.ai", "secret1").await.unwrap_err();
        assert!(matches!(err, CoreError::Unauthorized(ref m) if m == INVALID_CREDENTIALS));

        let outcome = h.auth.signin(" BHAVYA@dark.ai ", "secret1").await.unwrap();
        assert!(outcome.token.is_some());
    }

    #[tokio::test]
    async fn resend_only_for_pending_accounts() {
        let h = harness();
        let err = h.auth.resend("ghost@dark.ai").await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        let first = signed_up(&h).await;
        h.auth.resend("bhavya@dark.ai").await.unwrap();
        assert_eq!(h.mailer.sent().len(), 2);

        let second = h.mailer.last_code_for("bhavya@dark.ai").unwrap();
        let stored = h.otps.get("bhavya@dark.ai").await.unwrap().unwrap();
        assert!(stored.matches(&second));
        if first != second {
            assert!(!stored.matches(&first));
        }

        h.auth.verify("bhavya@dark.ai", &second).await.unwrap();
        assert!(h.auth.resend("bhavya@dark.ai").await.is_err());
    }

    #[tokio::test]
    async fn google_login_creates_unique_username() {
        let mut identity = MockIdentity::new();
        identity
            .expect_fetch_google_identity()
            .returning(|_| {
                Ok(SocialIdentity {
                    email: "Bhavya@gmail.com".into(),
                    email_verified: true,
                    name: Some("Bhavya".into()),
                })
            });
        let h = harness_with(identity);
        h.users
            .insert(&NewUser {
                username: "bhavya".into(),
                email: "someone-else@dark.ai".into(),
                password_hash: None,
                is_verified: true,
            })
            .await
            .unwrap();

        let outcome = h.auth.google_login("ya29.token").await.unwrap();
        assert_eq!(outcome.username.as_deref(), Some("bhavya1"));

        let user = h.users.find_by_email("bhavya@gmail.com").await.unwrap().unwrap();
        assert!(user.is_verified);
        assert!(user.password_hash.is_none());

        let again = h.auth.google_login("ya29.token").await.unwrap();
        assert_eq!(again.username.as_deref(), Some("bhavya1"));
    }

    #[tokio::test]
    async fn google_login_links_and_verifies_existing_account() {
        let mut identity = MockIdentity::new();
        identity
            .expect_fetch_google_identity()
            .withf(|token| token.to_string() == "ya29.token")
            .times(1)
            .returning(|_| {
                Ok(SocialIdentity {
                    email: "bhavya@dark.ai".into(),
                    email_verified: true,
                    name: None,
                })
            });
        let h = harness_with(identity);
        signed_up(&h).await;

        let outcome = h.auth.google_login(" ya29.token ").await.unwrap();
        assert_eq!(outcome.username.as_deref(), Some("bhavya"));
        let user = h.users.find_by_email("bhavya@dark.ai").await.unwrap().unwrap();
        assert!(user.is_verified);
    }

    #[tokio::test]
    async fn google_login_rejects_unverified_email() {
        let mut identity = MockIdentity::new();
        identity.expect_fetch_google_identity().returning(|_| {
            Ok(SocialIdentity {
                email: "x@gmail.com".into(),
                email_verified: false,
                name: None,
            })
        });
        let h = harness_with(identity);
        let err = h.auth.google_login("ya29.token").await.unwrap_err();
        assert!(matches!(err, CoreError::Forbidden(_)));
    }

    #[tokio::test]
    async fn google_login_maps_rejected_token() {
        let mut identity = MockIdentity::new();
        identity
            .expect_fetch_google_identity()
            .returning(|_| Err(IdentityError::InvalidToken));
        let h = harness_with(identity);
        let err = h.auth.google_login("bogus").await.unwrap_err();
        assert!(matches!(err, CoreError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn expired_session_is_rejected_and_removed() {
        let h = harness();
        let code = signed_up(&h).await;
        let token = h
            .auth
            .verify("bhavya@dark.ai", &code)
            .await
            .unwrap()
            .token
            .unwrap();
        let user = h.auth.authenticate(&token).await.unwrap();

        let stale = Session {
            token: "stale".into(),
            user_id: user.id,
            expires_at: Utc::now() - Duration::seconds(1),
        };
        h.sessions.insert(&stale).await.unwrap();

        let err = h.auth.authenticate("stale").await.unwrap_err();
        assert!(matches!(err, CoreError::Unauthorized(ref m) if m == "Session expired."));
        assert!(h.sessions.get("stale").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let h = harness();
        let code = signed_up(&h).await;
        let token = h
            .auth
            .verify("bhavya@dark.ai", &code)
            .await
            .unwrap()
            .token
            .unwrap();

        h.auth.logout(&token).await.unwrap();
        h.auth.logout(&token).await.unwrap();
        assert!(matches!(
            h.auth.authenticate(&token).await,
            Err(CoreError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn handle_dispatches_tagged_actions() {
        let h = harness();
        let action: AuthAction = serde_json::from_str(
            r#"{"action":"signup","username":"neo","email":"neo@dark.ai","password":"matrix1"}"#,
        )
        .unwrap();
        let outcome = h.auth.handle(action).await.unwrap();
        assert_eq!(outcome.message, "OTP has been sent to your email.");
    }
}
