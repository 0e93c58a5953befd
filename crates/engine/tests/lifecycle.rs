//! End-to-end walks through the supply lifecycle on the pure domain core.

use engine::{
    Capability, Decision, EngineError, LineItem, Money, OrganizerRole, Role, SupplyDraft,
    SupplyStatus, UserRank, advance, decide,
};

#[test]
fn company_creates_a_supply_with_a_frozen_total() {
    let company = Role::from_parts(OrganizerRole::Company, UserRank::Manager);
    company.ensure_company("create supply").unwrap();

    let order = SupplyDraft::new(3, "г. Москва, ул. Ленина, д. 10")
        .item(LineItem::new(7, 3, Money::new(1200_00)).with_available(10))
        .build()
        .unwrap();

    // New supplies always enter the queue waiting for the supplier's answer.
    let initial = SupplyStatus::InProcessing;
    assert!(initial.is_wait_confirm());
    assert_eq!(order.total_price, Money::new(3600_00));

    // A later price edit on product 7 must not move the snapshot: the total
    // is carried by the order itself, not recomputed from the catalog.
    let total_after_price_change = order.total_price;
    assert_eq!(total_after_price_change, Money::new(3600_00));
}

#[test]
fn rejected_supply_cannot_advance() {
    let supplier = Role::from_parts(OrganizerRole::Supplier, UserRank::Admin);
    supplier.ensure_supplier("reject supply").unwrap();

    let status = decide(SupplyStatus::InProcessing, Decision::Reject).unwrap();
    assert_eq!(status, SupplyStatus::Cancelled);

    assert_eq!(
        advance(status, SupplyStatus::InDelivery),
        Err(EngineError::InvalidTransition {
            from: SupplyStatus::Cancelled,
            to: SupplyStatus::InDelivery,
        })
    );
}

#[test]
fn accepted_supply_walks_the_full_chain() {
    let mut status = decide(SupplyStatus::InProcessing, Decision::Accept).unwrap();
    for next in [
        SupplyStatus::InDelivery,
        SupplyStatus::Delivered,
        SupplyStatus::Adopted,
    ] {
        status = advance(status, next).unwrap();
    }
    assert!(status.is_terminal());
    assert!(advance(status, SupplyStatus::InProcessing).is_err());
}

#[test]
fn unaffiliated_admin_may_not_create_supplies() {
    // Freshly registered organizer: admin rank, no organization yet. The
    // only dashboard operation open at this point is fetching a link code,
    // which is not capability-gated at all.
    let role = Role::from_parts(OrganizerRole::NotHaveOrganizer, UserRank::Admin);

    assert_eq!(
        role.ensure_company("create supply"),
        Err(EngineError::Forbidden(
            "create supply is a company operation".to_string()
        ))
    );
    assert!(role.can(Capability::AddEmployees));
    assert!(!role.can(Capability::ViewSuppliers));
}

#[test]
fn company_cannot_drive_fulfillment() {
    let company = Role::from_parts(OrganizerRole::Company, UserRank::Admin);
    assert!(matches!(
        company.ensure_supplier("advance status"),
        Err(EngineError::Forbidden(_))
    ));
}
