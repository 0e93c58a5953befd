//! Organization registration.

use api_types::organizer::{Organizer, OrganizerKind, OrganizerRegister};
use engine::{OrganizerRole, UserRank, validation};

use crate::{ApiError, Client, Identity, Result};

impl Client {
    /// Registers an organization and promotes the current user to its
    /// admin.
    ///
    /// One-time transition: a user already attached to an organization is
    /// refused locally. There is no way back afterwards.
    pub async fn register_organization(
        &self,
        name: &str,
        kind: OrganizerKind,
        address: &str,
        inn: &str,
        bank_details: &str,
    ) -> Result<Organizer> {
        let identity = self.identity()?;
        if identity.organizer_role != OrganizerRole::NotHaveOrganizer {
            return Err(ApiError::Forbidden(
                "already attached to an organization".to_string(),
            ));
        }

        let name = validation::normalize_required_text(name, "organization name")?;
        let address = validation::normalize_required_text(address, "address")?;
        validation::validate_inn(inn)?;
        let bank_details = validation::normalize_required_text(bank_details, "bank details")?;

        let organizer: Organizer = self
            .post_json(
                "/organizers/register",
                &OrganizerRegister {
                    name,
                    role: kind,
                    address,
                    inn: inn.to_string(),
                    bank_details,
                },
            )
            .await?;

        self.update_identity(Identity {
            organizer_role: organizer.role.into(),
            rank: UserRank::Admin,
            organization_id: Some(organizer.id),
            ..identity
        })?;

        Ok(organizer)
    }
}
