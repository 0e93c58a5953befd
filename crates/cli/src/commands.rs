//! Subcommand handlers. Presentation only: every decision is delegated to
//! the client SDK and the domain engine.

use std::io::{BufRead, Write};

use api_types::{
    ProductCategory,
    auth::UserType,
    organizer::OrganizerKind,
    product::{ProductNew, ProductUpdate},
    supply::Supply,
    user::InviteRank,
};
use clap::Subcommand;
use client::{ApiError, Client, NextStep, Result};
use engine::{Capability, Decision, LineItem, Money, Role, SupplyDraft, SupplyStatus};

use crate::Command;

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum KindArg {
    Company,
    Supplier,
}

impl From<KindArg> for OrganizerKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Company => OrganizerKind::Company,
            KindArg::Supplier => OrganizerKind::Supplier,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum RankArg {
    Manager,
    Employee,
}

impl From<RankArg> for InviteRank {
    fn from(rank: RankArg) -> Self {
        match rank {
            RankArg::Manager => InviteRank::Manager,
            RankArg::Employee => InviteRank::Employee,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum CategoryArg {
    HairColoring,
    HairCare,
    HairStyling,
    Consumables,
    Perming,
    Eyebrows,
    ManicureAndPedicure,
    ToolsAndEquipment,
}

impl From<CategoryArg> for ProductCategory {
    fn from(category: CategoryArg) -> Self {
        match category {
            CategoryArg::HairColoring => ProductCategory::HairColoring,
            CategoryArg::HairCare => ProductCategory::HairCare,
            CategoryArg::HairStyling => ProductCategory::HairStyling,
            CategoryArg::Consumables => ProductCategory::Consumables,
            CategoryArg::Perming => ProductCategory::Perming,
            CategoryArg::Eyebrows => ProductCategory::Eyebrows,
            CategoryArg::ManicureAndPedicure => ProductCategory::ManicureAndPedicure,
            CategoryArg::ToolsAndEquipment => ProductCategory::ToolsAndEquipment,
        }
    }
}

/// Fulfillment targets reachable from the CLI.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum StatusArg {
    InDelivery,
    Delivered,
    Adopted,
}

impl From<StatusArg> for SupplyStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::InDelivery => SupplyStatus::InDelivery,
            StatusArg::Delivered => SupplyStatus::Delivered,
            StatusArg::Adopted => SupplyStatus::Adopted,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum EmployeesCmd {
    /// List the organization's members.
    List,
    /// Attach another user with a code they shared out-of-band.
    Invite {
        code: i64,
        #[arg(value_enum)]
        rank: RankArg,
    },
    /// Detach a user from the organization (asks for confirmation).
    Remove { user_id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum ProductsCmd {
    /// Browse the catalog.
    List {
        #[arg(long)]
        supplier: Option<i64>,
        /// Include live on-hand quantities.
        #[arg(long)]
        quantities: bool,
    },
    Show {
        id: i64,
    },
    /// Add a product to your own catalog (suppliers only).
    Add {
        name: String,
        #[arg(value_enum)]
        category: CategoryArg,
        /// Price in rubles, e.g. 1200 or 1200.50.
        price: String,
        quantity: u32,
        #[arg(default_value = "")]
        description: String,
    },
    /// Edit an owned product; stock is not editable here.
    Update {
        id: i64,
        name: String,
        #[arg(value_enum)]
        category: CategoryArg,
        price: String,
        #[arg(default_value = "")]
        description: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum SuppliesCmd {
    /// List deliveries (suppliers see confirmed orders only).
    List,
    /// List requests waiting for accept/reject (suppliers).
    Requests,
    Show {
        id: i64,
    },
    /// Compose and submit an order (companies only).
    Create {
        #[arg(long)]
        supplier: i64,
        #[arg(long)]
        address: String,
        /// Line items as product_id:quantity, repeatable.
        #[arg(long = "item", required = true)]
        items: Vec<String>,
    },
    /// Accept a pending request (suppliers).
    Accept { id: i64 },
    /// Reject a pending request (suppliers).
    Reject { id: i64 },
    /// Advance fulfillment one step (suppliers).
    Advance {
        id: i64,
        #[arg(value_enum)]
        to: StatusArg,
    },
}

#[derive(Debug, Subcommand)]
pub enum SuppliersCmd {
    List,
    /// Look a supplier up by tax id.
    Find { inn: String },
    /// Contract the supplier (idempotent).
    Add { id: i64 },
    /// Terminate the contract; history is kept.
    Remove { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum ExpensesCmd {
    List,
    /// Set the held quantity of a ledger row (absolute value).
    SetQuantity { id: i64, quantity: u32 },
    /// Delete a ledger row (asks for confirmation).
    Delete { id: i64 },
}

pub async fn run(client: &Client, command: Command) -> Result<()> {
    match command {
        Command::Login { email } => {
            let password = prompt_password()?;
            let identity = client.login(&email, &password).await?;
            println!(
                "signed in as {} ({} / {})",
                identity.email,
                identity.organizer_role.as_str(),
                identity.rank.as_str()
            );
        }
        Command::Logout => {
            client.logout();
            println!("signed out");
        }
        Command::Whoami => match client.current_identity() {
            Some(identity) => {
                println!("{} <{}>", identity.name, identity.email);
                println!(
                    "organization: {}  rank: {}",
                    identity.organizer_role.as_str(),
                    identity.rank.as_str()
                );
                let capabilities: Vec<&str> = identity
                    .role()
                    .permissions()
                    .into_iter()
                    .map(Capability::as_str)
                    .collect();
                println!("capabilities: {}", capabilities.join(", "));
            }
            None => println!("not signed in"),
        },
        Command::Register {
            name,
            email,
            phone,
            employee,
        } => {
            let password = prompt_password()?;
            let user_type = if employee {
                UserType::Employee
            } else {
                UserType::Organizer
            };
            match client
                .register(&name, &email, &phone, &password, user_type)
                .await?
            {
                NextStep::RegisterOrganization => {
                    println!("registered; now run `postavka register-organization ...`");
                }
                NextStep::Done => println!("registered"),
            }
        }
        Command::RegisterOrganization {
            name,
            kind,
            address,
            inn,
            bank_details,
        } => {
            let organizer = client
                .register_organization(&name, kind.into(), &address, &inn, &bank_details)
                .await?;
            println!(
                "registered {} #{} ({})",
                organizer.name,
                organizer.id,
                organizer.role.as_str()
            );
        }
        Command::Linkcode => {
            println!("{}", client.link_code().await?);
        }
        Command::Join { code, rank } => {
            client.join_by_link_code(code, rank.into()).await?;
            println!("joined; sign in again to pick up the new role");
        }
        Command::Employees(cmd) => run_employees(client, cmd).await?,
        Command::Products(cmd) => run_products(client, cmd).await?,
        Command::Supplies(cmd) => run_supplies(client, cmd).await?,
        Command::Suppliers(cmd) => run_suppliers(client, cmd).await?,
        Command::Expenses(cmd) => run_expenses(client, cmd).await?,
        Command::Dashboard => match client.role()? {
            Role::Company(_) => {
                let stats = client.company_stats().await?;
                println!("supplies:            {}", stats.all_supplies_count);
                println!("waiting confirm:     {}", stats.is_wait_confirm_supplies_count);
                println!("contracts:           {}", stats.organizers_contract_count);
                println!("products adopted:    {}", stats.count_adopted_products);
            }
            Role::Supplier(_) => {
                let stats = client.supplier_stats().await?;
                println!("supplies:            {}", stats.all_supplies_count);
                println!("waiting confirm:     {}", stats.is_wait_confirm_supplies_count);
                println!("products:            {}", stats.products_count);
                println!("delivered:           {}", stats.delivered_supplies_count);
            }
            Role::Unaffiliated(_) => {
                println!("no organization yet; register or join one first");
            }
        },
    }
    Ok(())
}

async fn run_employees(client: &Client, cmd: EmployeesCmd) -> Result<()> {
    match cmd {
        EmployeesCmd::List => {
            for user in client.company_users().await? {
                println!(
                    "#{}  {}  <{}>  {}  {}",
                    user.user_id,
                    user.name,
                    user.email,
                    user.phone,
                    user.role.as_str()
                );
            }
        }
        EmployeesCmd::Invite { code, rank } => {
            client.invite_employee(code, rank.into()).await?;
            println!("invited");
        }
        EmployeesCmd::Remove { user_id } => {
            confirm(&format!("remove user #{user_id} from the organization"))?;
            client.remove_employee(user_id).await?;
            println!("removed");
        }
    }
    Ok(())
}

async fn run_products(client: &Client, cmd: ProductsCmd) -> Result<()> {
    match cmd {
        ProductsCmd::List {
            supplier,
            quantities,
        } => {
            for product in client.products(supplier, quantities).await? {
                let quantity = product
                    .quantity
                    .map(|q| format!("  x{q}"))
                    .unwrap_or_default();
                println!(
                    "#{} [{}] {}  {} ₽  {}{}",
                    product.id,
                    product.article,
                    product.name,
                    product.price,
                    product.organizer_name,
                    quantity
                );
            }
        }
        ProductsCmd::Show { id } => {
            let product = client.product(id).await?;
            println!("#{} [{}] {}", product.id, product.article, product.name);
            println!("category: {}", product.category.as_str());
            println!("price:    {} ₽", product.price);
            if let Some(quantity) = product.quantity {
                println!("on hand:  {quantity}");
            }
            println!("supplier: {}", product.organizer_name);
            if !product.description.is_empty() {
                println!("{}", product.description);
            }
        }
        ProductsCmd::Add {
            name,
            category,
            price,
            quantity,
            description,
        } => {
            let price = price.parse::<Money>()?.to_decimal();
            client
                .add_product(ProductNew {
                    name,
                    category: category.into(),
                    price,
                    description,
                    quantity,
                })
                .await?;
            println!("added");
        }
        ProductsCmd::Update {
            id,
            name,
            category,
            price,
            description,
        } => {
            let price = price.parse::<Money>()?.to_decimal();
            let product = client
                .update_product(
                    id,
                    ProductUpdate {
                        name,
                        category: category.into(),
                        price,
                        description,
                    },
                )
                .await?;
            println!("updated #{}", product.id);
        }
    }
    Ok(())
}

async fn run_supplies(client: &Client, cmd: SuppliesCmd) -> Result<()> {
    match cmd {
        SuppliesCmd::List => {
            let supplies = match client.role()? {
                Role::Supplier(_) => client.active_deliveries().await?,
                _ => client.supplies(None, None).await?,
            };
            for supply in &supplies {
                print_supply_row(supply);
            }
        }
        SuppliesCmd::Requests => {
            for supply in client.delivery_requests().await? {
                print_supply_row(&supply);
            }
        }
        SuppliesCmd::Show { id } => {
            let supply = client.supply(id).await?;
            println!("supply #{} [{}]  {}", supply.id, supply.article, supply.status);
            println!("supplier: {}  company: {}", supply.supplier.name, supply.company.name);
            println!("address:  {}", supply.delivery_address);
            for item in &supply.supply_products {
                println!(
                    "  {} x{}  ({} ₽ each)",
                    item.product.name, item.quantity, item.product.price
                );
            }
            println!("total:    {} ₽", supply.total_price);
        }
        SuppliesCmd::Create {
            supplier,
            address,
            items,
        } => {
            // Prices and stock limits come from the live catalog, the same
            // listing a dashboard user would pick from.
            let catalog = client.products(Some(supplier), true).await?;
            let mut draft = SupplyDraft::new(supplier, address);
            for spec in &items {
                let (product_id, quantity) = parse_item_spec(spec)?;
                let product = catalog
                    .iter()
                    .find(|p| p.id == product_id)
                    .ok_or_else(|| {
                        ApiError::Validation(format!(
                            "product {product_id} is not offered by supplier {supplier}"
                        ))
                    })?;
                let mut item =
                    LineItem::new(product_id, quantity, Money::from_decimal(product.price)?);
                if let Some(available) = product.quantity {
                    item = item.with_available(available);
                }
                draft = draft.item(item);
            }
            let supply = client.create_supply(draft).await?;
            println!(
                "created supply #{} ({} ₽), waiting for the supplier",
                supply.id, supply.total_price
            );
        }
        SuppliesCmd::Accept { id } => {
            let supply = client.respond_to_request(id, Decision::Accept).await?;
            println!("request #{} accepted, now {}", supply.id, supply.status);
        }
        SuppliesCmd::Reject { id } => {
            let supply = client.respond_to_request(id, Decision::Reject).await?;
            println!("request #{} rejected", supply.id);
        }
        SuppliesCmd::Advance { id, to } => {
            let supply = client.advance_supply(id, to.into()).await?;
            println!("supply #{} is now {}", supply.id, supply.status);
        }
    }
    Ok(())
}

async fn run_suppliers(client: &Client, cmd: SuppliersCmd) -> Result<()> {
    match cmd {
        SuppliersCmd::List => {
            for supplier in client.suppliers().await? {
                println!(
                    "#{}  {}  inn {}  {}",
                    supplier.id, supplier.name, supplier.inn, supplier.address
                );
            }
        }
        SuppliersCmd::Find { inn } => {
            let supplier = client.find_supplier_by_inn(&inn).await?;
            println!("#{}  {}  inn {}", supplier.id, supplier.name, supplier.inn);
            println!("{}", supplier.address);
            println!("{}", supplier.bank_details);
        }
        SuppliersCmd::Add { id } => {
            client.add_contract(id).await?;
            println!("contracted");
        }
        SuppliersCmd::Remove { id } => {
            client.remove_contract(id).await?;
            println!("contract terminated; past supplies are kept");
        }
    }
    Ok(())
}

async fn run_expenses(client: &Client, cmd: ExpensesCmd) -> Result<()> {
    match cmd {
        ExpensesCmd::List => {
            for expense in client.expenses().await? {
                println!(
                    "#{} [{}] {}  x{}  from {}",
                    expense.id,
                    expense.article,
                    expense.product_name,
                    expense.quantity,
                    expense.supplier_name
                );
            }
        }
        ExpensesCmd::SetQuantity { id, quantity } => {
            let expense = client.set_expense_quantity(id, quantity).await?;
            println!("#{} now holds x{}", expense.id, expense.quantity);
        }
        ExpensesCmd::Delete { id } => {
            confirm(&format!("delete expense row #{id}"))?;
            client.delete_expense(id).await?;
            println!("deleted");
        }
    }
    Ok(())
}

fn print_supply_row(supply: &Supply) {
    println!(
        "#{} [{}]  {} -> {}  {} ₽  {}",
        supply.id,
        supply.article,
        supply.supplier.name,
        supply.company.name,
        supply.total_price,
        supply.status
    );
}

/// Parses a `product_id:quantity` pair.
fn parse_item_spec(spec: &str) -> Result<(i64, u32)> {
    let invalid = || ApiError::Validation(format!("invalid item spec `{spec}`, expected id:qty"));
    let (id, qty) = spec.split_once(':').ok_or_else(invalid)?;
    Ok((
        id.trim().parse().map_err(|_| invalid())?,
        qty.trim().parse().map_err(|_| invalid())?,
    ))
}

fn prompt_password() -> Result<String> {
    eprint!("password: ");
    std::io::stderr().flush()?;
    let mut password = String::new();
    std::io::stdin().lock().read_line(&mut password)?;
    Ok(password.trim_end_matches(['\r', '\n']).to_string())
}

/// Asks the operator to type `yes` before a destructive operation.
fn confirm(action: &str) -> Result<()> {
    eprint!("{action}? type `yes` to continue: ");
    std::io::stderr().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    if answer.trim() != "yes" {
        return Err(ApiError::Validation("aborted".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_specs_parse() {
        assert_eq!(parse_item_spec("7:3").unwrap(), (7, 3));
        assert_eq!(parse_item_spec(" 12 : 1 ").unwrap(), (12, 1));
        assert!(parse_item_spec("7").is_err());
        assert!(parse_item_spec("7:").is_err());
        assert!(parse_item_spec("a:b").is_err());
    }
}
