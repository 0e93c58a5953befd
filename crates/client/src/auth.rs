//! Registration, login and logout.

use api_types::auth::{LoginResponse, NextRoute, RegisterResponse, UserLogin, UserRegister, UserType};
use engine::{OrganizerRole, UserRank, validation};

use crate::{Client, Identity, Result, Scope};

/// What the caller should do after a successful registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NextStep {
    /// An organizer without an organization: organization registration must
    /// follow before the dashboard opens.
    RegisterOrganization,
    /// Straight to the dashboard.
    Done,
}

impl Client {
    /// Registers a new user and opens a session for them.
    ///
    /// All field checks run locally first, so the backend only sees
    /// well-formed requests.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        phone: &str,
        password: &str,
        user_type: UserType,
    ) -> Result<NextStep> {
        let name = validation::normalize_required_text(name, "name")?;
        validation::validate_email(email)?;
        validation::validate_phone(phone)?;
        validation::validate_password(password)?;

        let body = UserRegister {
            name: name.clone(),
            email: email.to_string(),
            phone: phone.to_string(),
            password: password.to_string(),
            user_type,
        };
        let resp: RegisterResponse = self
            .execute(
                self.http.post(self.url("/auth/register")).json(&body),
                Scope::Register,
            )
            .await?;

        // A fresh account is always unaffiliated; organizers get admin rank
        // once they register their organization, employees keep theirs.
        let rank = match user_type {
            UserType::Organizer => UserRank::Admin,
            UserType::Employee => UserRank::Employee,
        };
        self.install_session(
            resp.access_token,
            Identity {
                name,
                email: email.to_string(),
                organizer_role: OrganizerRole::NotHaveOrganizer,
                rank,
                organization_id: None,
            },
        )?;

        Ok(match resp.next_route {
            NextRoute::OrganizerRegister => NextStep::RegisterOrganization,
            NextRoute::Dashboard => NextStep::Done,
        })
    }

    /// Signs in and caches the returned role pair.
    ///
    /// A wrong password and an unknown email both surface as
    /// [`crate::ApiError::UserNotFound`].
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity> {
        let body = UserLogin {
            email: email.to_string(),
            password: password.to_string(),
        };
        let resp: LoginResponse = self
            .execute(
                self.http.post(self.url("/auth/login")).json(&body),
                Scope::Login,
            )
            .await?;

        let identity = Identity {
            // The backend does not echo the profile back on login; the
            // local part of the email stands in until it does.
            name: email.split('@').next().unwrap_or(email).to_string(),
            email: email.to_string(),
            organizer_role: resp.role_organizer,
            rank: resp.user_type,
            organization_id: None,
        };
        self.install_session(resp.access_token, identity.clone())?;
        tracing::debug!(email = %identity.email, "signed in");
        Ok(identity)
    }

    /// Drops the session on both sides. Idempotent, never fails.
    pub fn logout(&self) {
        self.clear_session();
        tracing::debug!("signed out");
    }
}
