use fleetdesk_domain::EmailAddress;

use super::*;

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("invalid email or password".to_owned())
}

impl UserService {
    /// Authenticates with email and password and issues a bearer token.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginSession> {
        let user = match EmailAddress::new(email) {
            Ok(email) => self.user_repository.find_by_email(email.as_str()).await?,
            Err(_) => None,
        };

        let Some(user) = user else {
            // Hash anyway so unknown emails cost the same as wrong passwords.
            let _ = self.password_hasher.hash_password(password);
            return Err(invalid_credentials());
        };

        if !self
            .password_hasher
            .verify_password(password, user.password_hash.as_str())?
        {
            return Err(invalid_credentials());
        }

        if !user.can_sign_in() {
            return Err(invalid_credentials());
        }

        let token = self.access_token_service.issue(user.id).await?;

        Ok(LoginSession {
            token,
            user: user.identity(),
        })
    }

    /// Revokes the presented bearer token.
    pub async fn logout(&self, raw_token: &str) -> AppResult<()> {
        self.access_token_service.revoke(raw_token).await
    }

    /// Resolves a bearer token to the identity of an enabled account.
    ///
    /// A valid token of a disabled account (or of a user whose company is
    /// disabled) revokes every token of that account and fails with
    /// `AccountDisabled`.
    pub async fn authenticate(&self, raw_token: &str) -> AppResult<UserIdentity> {
        let token = self.access_token_service.resolve(raw_token).await?;

        let user = self
            .user_repository
            .find_by_id(token.user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("access token owner no longer exists".to_owned()))?;

        if !user.can_sign_in() {
            self.access_token_service.revoke_all(user.id).await?;
            return Err(AppError::AccountDisabled(format!(
                "account '{}' is disabled",
                user.id
            )));
        }

        self.access_token_service.mark_used(token.id).await?;

        Ok(user.identity())
    }
}
