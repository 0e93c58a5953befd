//! Catalog operations.

use api_types::product::{Product, ProductNew, ProductUpdate, Products};
use engine::{Money, validation};

use crate::{ApiError, Client, Result};

impl Client {
    /// Catalog browse, optionally scoped to one supplier.
    ///
    /// With `with_quantity` the rows carry the supplier's live on-hand
    /// count, which callers use as the selection limit when composing an
    /// order.
    pub async fn products(
        &self,
        supplier_id: Option<i64>,
        with_quantity: bool,
    ) -> Result<Vec<Product>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(id) = supplier_id {
            query.push(("supplier_id", id.to_string()));
        }
        if with_quantity {
            query.push(("add_quantity", "true".to_string()));
        }
        let resp: Products = self.get_json_query("/products", &query).await?;
        Ok(resp.products)
    }

    pub async fn product(&self, id: i64) -> Result<Product> {
        self.get_json(&format!("/products/{id}")).await
    }

    /// Adds a product to the caller's own catalog.
    pub async fn add_product(&self, new: ProductNew) -> Result<()> {
        self.role()?.ensure_supplier("adding products")?;
        validation::normalize_required_text(&new.name, "product name")?;
        if !Money::from_decimal(new.price)?.is_positive() {
            return Err(ApiError::Validation(
                "price must be greater than zero".to_string(),
            ));
        }
        self.post_json_unit("/products", &new).await
    }

    /// Edits name, category, price and description of an owned product.
    ///
    /// On-hand quantity is not editable here; stock only moves through the
    /// expense ledger.
    pub async fn update_product(&self, id: i64, update: ProductUpdate) -> Result<Product> {
        self.role()?.ensure_supplier("editing products")?;
        validation::normalize_required_text(&update.name, "product name")?;
        if !Money::from_decimal(update.price)?.is_positive() {
            return Err(ApiError::Validation(
                "price must be greater than zero".to_string(),
            ));
        }
        self.put_json(&format!("/products/{id}"), &update).await
    }
}
