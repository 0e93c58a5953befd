//! Request and response bodies for the dashboard backend.
//!
//! Field names and enum strings match the backend JSON exactly; the domain
//! enums (`SupplyStatus`, `OrganizerRole`, `UserRank`) are shared with the
//! `engine` crate so the wire and the state machine cannot drift apart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use engine::{OrganizerRole, SupplyStatus, UserRank};

/// Product category, one of the backend's fixed list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    HairColoring,
    HairCare,
    HairStyling,
    Consumables,
    Perming,
    /// The expense endpoints historically spell this one differently.
    #[serde(alias = "eyebrows_and_eyelashes")]
    Eyebrows,
    ManicureAndPedicure,
    ToolsAndEquipment,
}

impl ProductCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HairColoring => "hair_coloring",
            Self::HairCare => "hair_care",
            Self::HairStyling => "hair_styling",
            Self::Consumables => "consumables",
            Self::Perming => "perming",
            Self::Eyebrows => "eyebrows",
            Self::ManicureAndPedicure => "manicure_and_pedicure",
            Self::ToolsAndEquipment => "tools_and_equipment",
        }
    }
}

/// Error payload carried by every non-2xx response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub details: ErrorDetails,
}

/// The backend reports either a single message or a list of field messages.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetails {
    One(String),
    Many(Vec<String>),
}

impl ErrorDetails {
    /// Flattens the details into one display string.
    pub fn join(&self) -> String {
        match self {
            Self::One(message) => message.clone(),
            Self::Many(messages) => messages.join(", "),
        }
    }
}

pub mod auth {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum UserType {
        Organizer,
        Employee,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserRegister {
        pub name: String,
        pub email: String,
        pub phone: String,
        pub password: String,
        pub user_type: UserType,
    }

    /// Route hint returned after registration: organizers without an
    /// organization are sent to organization registration first.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub enum NextRoute {
        #[serde(rename = "organizers/register")]
        OrganizerRegister,
        #[serde(rename = "/")]
        Dashboard,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RegisterResponse {
        pub access_token: String,
        pub type_token: String,
        pub next_route: NextRoute,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserLogin {
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginResponse {
        pub access_token: String,
        pub type_token: String,
        pub role_organizer: OrganizerRole,
        pub user_type: UserRank,
    }
}

pub mod organizer {
    use super::*;

    /// Kind of a registered organization. Unlike [`OrganizerRole`] there is
    /// no unaffiliated variant here: an organization is always one or the
    /// other.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum OrganizerKind {
        Company,
        Supplier,
    }

    impl OrganizerKind {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Company => "company",
                Self::Supplier => "supplier",
            }
        }
    }

    impl From<OrganizerKind> for OrganizerRole {
        fn from(kind: OrganizerKind) -> Self {
            match kind {
                OrganizerKind::Company => OrganizerRole::Company,
                OrganizerKind::Supplier => OrganizerRole::Supplier,
            }
        }
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct OrganizerRegister {
        pub name: String,
        pub role: OrganizerKind,
        pub address: String,
        pub inn: String,
        pub bank_details: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Organizer {
        pub id: i64,
        pub name: String,
        pub role: OrganizerKind,
        pub address: String,
        pub inn: String,
        pub bank_details: String,
    }
}

pub mod user {
    use super::*;

    /// Rank assigned when joining via link code. Admins are only created by
    /// organization registration, never by invite.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum InviteRank {
        Manager,
        Employee,
    }

    impl From<InviteRank> for UserRank {
        fn from(rank: InviteRank) -> Self {
            match rank {
                InviteRank::Manager => UserRank::Manager,
                InviteRank::Employee => UserRank::Employee,
            }
        }
    }

    /// Request body for attaching a user to the organization owning the
    /// code.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AddUserByLinkCode {
        pub link_code: i64,
        pub role: InviteRank,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CompanyUser {
        pub name: String,
        pub email: String,
        pub phone: String,
        pub role: UserRank,
        pub user_id: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CompanyUsers {
        pub users: Vec<CompanyUser>,
    }

    /// The organization's stable invite code.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct LinkCode {
        pub linkcode: i64,
    }
}

pub mod product {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProductNew {
        pub name: String,
        pub category: ProductCategory,
        pub price: Decimal,
        pub description: String,
        pub quantity: u32,
    }

    /// Update body; on-hand quantity is deliberately absent, stock moves
    /// only through the expense ledger.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProductUpdate {
        pub name: String,
        pub category: ProductCategory,
        pub price: Decimal,
        pub description: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Product {
        pub id: i64,
        pub article: i64,
        pub name: String,
        pub category: ProductCategory,
        pub description: String,
        pub price: Decimal,
        /// Present only when the listing was requested with quantities.
        pub quantity: Option<u32>,
        pub organizer_name: String,
    }

    /// Compact product view embedded in supply line items.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SupplyProduct {
        pub id: i64,
        pub article: i64,
        pub name: String,
        pub category: ProductCategory,
        pub price: Decimal,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Products {
        pub products: Vec<Product>,
    }
}

pub mod supply {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SupplyProductRef {
        pub product_id: i64,
        pub quantity: u32,
    }

    /// Creation body. `total_price` is the frozen snapshot computed on the
    /// company side.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SupplyNew {
        pub supplier_id: i64,
        pub delivery_address: String,
        pub total_price: Decimal,
        pub supply_products: Vec<SupplyProductRef>,
    }

    /// Accept/reject answer to a pending request
    /// (`PATCH /supplies/{id}`); only `assembled` or `cancelled` are ever
    /// sent here.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SupplyDecision {
        pub status: SupplyStatus,
    }

    /// Fulfillment step (`PATCH /supplies/{id}/status`).
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SupplyStatusPatch {
        pub status: SupplyStatus,
    }

    /// One side of the contract as embedded in a supply view.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct PartyRef {
        pub id: i64,
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SupplyItem {
        pub product: product::SupplyProduct,
        pub quantity: u32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Supply {
        pub id: i64,
        pub supplier: PartyRef,
        pub company: PartyRef,
        pub supply_products: Vec<SupplyItem>,
        pub article: i64,
        pub delivery_address: String,
        pub total_price: Decimal,
        pub status: SupplyStatus,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Supplies {
        pub supplies: Vec<Supply>,
    }
}

pub mod supplier {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Supplier {
        pub id: i64,
        pub name: String,
        pub address: String,
        pub inn: String,
        pub role: organizer::OrganizerKind,
        pub bank_details: String,
    }

    /// Response body for listing contracted suppliers.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Suppliers {
        pub organizers: Vec<Supplier>,
    }
}

pub mod expense {
    use super::*;

    /// A company-side inventory ledger row: received stock of a supplier's
    /// product.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Expense {
        pub id: i64,
        pub product_id: i64,
        pub supplier_name: String,
        pub article: i64,
        pub product_name: String,
        pub category: ProductCategory,
        pub description: String,
        pub quantity: u32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Expenses {
        pub expenses: Vec<Expense>,
    }

    /// Absolute quantity set, not a delta.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseQuantity {
        pub quantity: u32,
    }
}

pub mod stats {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CompanyStats {
        pub all_supplies_count: u64,
        pub is_wait_confirm_supplies_count: u64,
        pub organizers_contract_count: u64,
        pub count_adopted_products: u64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SupplierStats {
        pub all_supplies_count: u64,
        pub is_wait_confirm_supplies_count: u64,
        pub products_count: u64,
        pub delivered_supplies_count: u64,
    }
}
