//! Company-side inventory ledger.

use api_types::expense::{Expense, ExpenseQuantity, Expenses};

use crate::{Client, Result};

impl Client {
    pub async fn expenses(&self) -> Result<Vec<Expense>> {
        self.role()?.ensure_company("the expense ledger")?;
        let resp: Expenses = self.get_json("/expenses/").await?;
        Ok(resp.expenses)
    }

    /// Sets the held quantity of a ledger row to an absolute value.
    ///
    /// Independent of the source product's own stock counter.
    pub async fn set_expense_quantity(&self, id: i64, quantity: u32) -> Result<Expense> {
        self.role()?.ensure_company("the expense ledger")?;
        self.patch_json(&format!("/expenses/{id}/"), &ExpenseQuantity { quantity })
            .await
    }

    /// Removes the ledger row only; the product and historical supplies
    /// stay.
    pub async fn delete_expense(&self, id: i64) -> Result<()> {
        self.role()?.ensure_company("the expense ledger")?;
        self.delete_unit(&format!("/expenses/{id}/")).await
    }
}
