//! Supplier directory and contracts.

use api_types::{
    organizer::Organizer,
    supplier::{Supplier, Suppliers},
};
use engine::{Capability, validation};

use crate::{ApiError, Client, Result};

impl Client {
    /// Lists the company's contracted suppliers.
    pub async fn suppliers(&self) -> Result<Vec<Supplier>> {
        self.role()?.ensure_capability(Capability::ViewSuppliers)?;
        let resp: Suppliers = self.get_json("/suppliers").await?;
        Ok(resp.organizers)
    }

    /// Looks a supplier up by tax id before contracting them.
    pub async fn find_supplier_by_inn(&self, inn: &str) -> Result<Supplier> {
        self.role()?.ensure_capability(Capability::ViewSuppliers)?;
        validation::validate_inn(inn)?;
        self.get_json(&format!("/suppliers/{inn}")).await
    }

    /// Adds the supplier to the company's contacts.
    ///
    /// Idempotent: contracting an already-contracted supplier is a success,
    /// not a duplicate edge.
    pub async fn add_contract(&self, supplier_id: i64) -> Result<()> {
        self.role()?.ensure_capability(Capability::ManageSuppliers)?;
        match self.post_unit(&format!("/suppliers/{supplier_id}")).await {
            Ok(()) => Ok(()),
            Err(ApiError::Conflict(_)) => Ok(()),
            Err(err) => Err(err),
        }
    }

    /// Terminates the contract.
    ///
    /// Historical supplies between the pair survive; only the directory
    /// edge goes away.
    pub async fn remove_contract(&self, supplier_id: i64) -> Result<Organizer> {
        self.role()?.ensure_capability(Capability::ManageSuppliers)?;
        self.delete_json(&format!("/suppliers/{supplier_id}")).await
    }
}
