//! Supply orders: creation, listing, decisions and fulfillment.
//!
//! Every status change re-reads the supply first and runs the pure
//! transition check before the PATCH goes out. The backend stays
//! authoritative: its response is what callers get back, and a stale local
//! view simply surfaces `InvalidTransition` one request earlier.

use api_types::supply::{
    Supplies, Supply, SupplyDecision, SupplyNew, SupplyProductRef, SupplyStatusPatch,
};
use engine::{Decision, SupplyDraft, SupplyStatus};

use crate::{Client, Result};

impl Client {
    /// Lists supplies as the backend scopes them for the caller.
    ///
    /// `wait_confirm` filters on the confirmation queue: suppliers pass
    /// `Some(true)` for incoming requests and `Some(false)` for accepted
    /// deliveries; companies pass `None` and see everything.
    pub async fn supplies(
        &self,
        wait_confirm: Option<bool>,
        limit: Option<u32>,
    ) -> Result<Vec<Supply>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(wait) = wait_confirm {
            query.push(("is_wait_confirm", wait.to_string()));
        }
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        let resp: Supplies = self.get_json_query("/supplies", &query).await?;
        Ok(resp.supplies)
    }

    /// Supplier view: accepted orders in fulfillment.
    pub async fn active_deliveries(&self) -> Result<Vec<Supply>> {
        self.supplies(Some(false), None).await
    }

    /// Supplier view: requests still waiting for accept/reject.
    pub async fn delivery_requests(&self) -> Result<Vec<Supply>> {
        self.supplies(Some(true), None).await
    }

    pub async fn supply(&self, id: i64) -> Result<Supply> {
        self.get_json(&format!("/supplies/{id}")).await
    }

    /// Submits a new order. Company-only.
    ///
    /// The draft is validated and priced locally; the frozen total travels
    /// with the request and is never recomputed, whatever happens to the
    /// catalog afterwards.
    pub async fn create_supply(&self, draft: SupplyDraft) -> Result<Supply> {
        self.role()?.ensure_company("creating supplies")?;
        let order = draft.build()?;

        let body = SupplyNew {
            supplier_id: order.supplier_id,
            delivery_address: order.delivery_address,
            total_price: order.total_price.to_decimal(),
            supply_products: order
                .items
                .iter()
                .map(|item| SupplyProductRef {
                    product_id: item.product_id,
                    quantity: item.quantity,
                })
                .collect(),
        };
        self.post_json("/supplies", &body).await
    }

    /// Accepts or rejects a pending request. Supplier-only.
    pub async fn respond_to_request(&self, id: i64, decision: Decision) -> Result<Supply> {
        self.role()?.ensure_supplier("answering supply requests")?;
        let current = self.supply(id).await?;
        let target = engine::decide(current.status, decision)?;
        self.patch_json(&format!("/supplies/{id}"), &SupplyDecision { status: target })
            .await
    }

    /// Moves an accepted order one fulfillment step forward. Supplier-only.
    ///
    /// `to` must be the immediate next status; skipping is refused locally
    /// with `InvalidTransition`.
    pub async fn advance_supply(&self, id: i64, to: SupplyStatus) -> Result<Supply> {
        self.role()?.ensure_supplier("advancing deliveries")?;
        let current = self.supply(id).await?;
        let target = engine::advance(current.status, to)?;
        self.patch_json(
            &format!("/supplies/{id}/status"),
            &SupplyStatusPatch { status: target },
        )
        .await
    }
}
