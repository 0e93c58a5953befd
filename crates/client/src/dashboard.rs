//! Dashboard statistics.

use api_types::stats::{CompanyStats, SupplierStats};

use crate::{Client, Result};

impl Client {
    pub async fn company_stats(&self) -> Result<CompanyStats> {
        self.role()?.ensure_company("the company dashboard")?;
        self.get_json("/dashboard/company").await
    }

    pub async fn supplier_stats(&self) -> Result<SupplierStats> {
        self.role()?.ensure_supplier("the supplier dashboard")?;
        self.get_json("/dashboard/supplier").await
    }
}
