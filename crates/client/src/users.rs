//! Employee membership: link codes, invites, removal.

use api_types::user::{AddUserByLinkCode, CompanyUser, CompanyUsers, InviteRank, LinkCode};
use engine::Capability;

use crate::{Client, Result};

impl Client {
    /// The current organization's stable invite code.
    ///
    /// This is the one dashboard operation open to a signed-in user even
    /// before they have an organization.
    pub async fn link_code(&self) -> Result<i64> {
        self.identity()?;
        let resp: LinkCode = self.get_json("/linkcode").await?;
        Ok(resp.linkcode)
    }

    /// Attaches the current user to the organization owning `code`.
    ///
    /// The caller's cached role pair is not touched here: the backend
    /// assigns the organization's role and reports it on the next login.
    pub async fn join_by_link_code(&self, code: i64, rank: InviteRank) -> Result<()> {
        self.identity()?;
        self.post_json_unit(
            "/users/company",
            &AddUserByLinkCode {
                link_code: code,
                role: rank,
            },
        )
        .await
    }

    /// Admin-side invite: attach another user with a code they shared
    /// out-of-band.
    pub async fn invite_employee(&self, code: i64, rank: InviteRank) -> Result<()> {
        self.role()?.ensure_capability(Capability::AddEmployees)?;
        self.post_json_unit(
            "/users/company",
            &AddUserByLinkCode {
                link_code: code,
                role: rank,
            },
        )
        .await
    }

    /// Lists the organization's members.
    pub async fn company_users(&self) -> Result<Vec<CompanyUser>> {
        self.role()?.ensure_capability(Capability::ViewEmployees)?;
        let resp: CompanyUsers = self.get_json("/users/company").await?;
        Ok(resp.users)
    }

    /// Detaches a user from the organization. Irreversible; callers are
    /// expected to confirm with the operator first.
    pub async fn remove_employee(&self, user_id: i64) -> Result<()> {
        self.role()?.ensure_capability(Capability::AddEmployees)?;
        self.delete_unit_query("/users/company", &[("user_id", user_id.to_string())])
            .await
    }
}
