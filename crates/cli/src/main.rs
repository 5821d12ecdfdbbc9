//! Career Closet CLI - a terminal storefront client.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! closet-cli products --category Medicine --sort low-high --page 2
//! closet-cli product 64f1c0ffee
//!
//! # Account
//! closet-cli signup -n "Thandi Nkosi" -e thandi@example.com -p <password> -c <password>
//! closet-cli login -e thandi@example.com -p <password>
//! closet-cli logout
//!
//! # Cart and checkout
//! closet-cli cart add 64f1c0ffee --size M
//! closet-cli cart set 64f1c0ffee --size M --quantity 3
//! closet-cli cart show
//! closet-cli order --first-name Thandi --last-name Nkosi --address "1 Long St" \
//!     --city "Cape Town" --postal-code 8001 --country ZA --payment credit-card
//! ```
//!
//! Configuration comes from the environment (`SHOP_API_URL` etc., see the
//! library's `config` module). The login token persists between runs at
//! `SHOP_AUTH_STATE`, so each invocation picks up the prior session.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand, ValueEnum};
use secrecy::SecretString;

use career_closet_shop::stores::SortOrder;
use career_closet_shop::{Shop, ShopConfig};

mod commands;

#[derive(Parser)]
#[command(name = "closet-cli")]
#[command(author, version, about = "Career Closet storefront client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products with filters, sorting, and paging
    Products {
        /// Free-text name search (case-insensitive substring)
        #[arg(short, long)]
        search: Option<String>,

        /// Restrict to these categories (repeatable)
        #[arg(short, long)]
        category: Vec<String>,

        /// Restrict to these subcategories (repeatable)
        #[arg(short = 't', long = "type")]
        sub_category: Vec<String>,

        /// Sort order
        #[arg(long, value_enum, default_value_t = Sort::Relevant)]
        sort: Sort,

        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Show one product (falls back to a direct fetch on a cache miss)
    Product {
        /// Product ID
        id: String,
    },
    /// Register a new account
    Signup {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (at least 8 characters)
        #[arg(short, long)]
        password: String,

        /// Password confirmation
        #[arg(short, long)]
        confirm: String,
    },
    /// Log in and persist the session token
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Log out and clear the persisted token
    Logout,
    /// Cart operations
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order from the current cart
    Order {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        postal_code: String,
        #[arg(long)]
        country: String,
        /// Payment method
        #[arg(long, value_enum, default_value_t = Payment::CreditCard)]
        payment: Payment,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show,
    /// Add one unit of a product
    Add {
        /// Product ID
        id: String,

        /// Size label
        #[arg(short, long, default_value = "M")]
        size: String,
    },
    /// Set an exact quantity (0 removes the line)
    Set {
        /// Product ID
        id: String,

        /// Size label
        #[arg(short, long, default_value = "M")]
        size: String,

        /// New quantity
        #[arg(short, long)]
        quantity: u32,
    },
    /// Remove a line
    Remove {
        /// Product ID
        id: String,

        /// Size label
        #[arg(short, long, default_value = "M")]
        size: String,
    },
}

/// Sort order flag.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Sort {
    Relevant,
    LowHigh,
    HighLow,
}

impl From<Sort> for SortOrder {
    fn from(sort: Sort) -> Self {
        match sort {
            Sort::Relevant => Self::Relevant,
            Sort::LowHigh => Self::PriceAscending,
            Sort::HighLow => Self::PriceDescending,
        }
    }
}

/// Payment method flag.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Payment {
    CreditCard,
    Paypal,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "closet_cli=info,career_closet_shop=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ShopConfig::from_env()?;
    let mut shop = Shop::new(config)?;
    shop.start().await;

    match cli.command {
        Commands::Products {
            search,
            category,
            sub_category,
            sort,
            page,
        } => {
            commands::catalog::list(&shop, search, &category, &sub_category, sort.into(), page);
        }
        Commands::Product { id } => commands::catalog::show(&shop, &id).await?,
        Commands::Signup {
            name,
            email,
            password,
            confirm,
        } => {
            commands::account::sign_up(
                &shop,
                &name,
                &email,
                &SecretString::from(password),
                &SecretString::from(confirm),
            )
            .await?;
        }
        Commands::Login { email, password } => {
            commands::account::login(&mut shop, &email, &SecretString::from(password)).await?;
        }
        Commands::Logout => commands::account::logout(&mut shop),
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&shop),
            CartAction::Add { id, size } => commands::cart::add(&mut shop, &id, &size).await,
            CartAction::Set { id, size, quantity } => {
                commands::cart::set(&mut shop, &id, &size, quantity).await;
            }
            CartAction::Remove { id, size } => commands::cart::set(&mut shop, &id, &size, 0).await,
        },
        Commands::Order {
            first_name,
            last_name,
            address,
            city,
            postal_code,
            country,
            payment,
        } => {
            let shipping = career_closet_shop::models::ShippingInfo {
                first_name,
                last_name,
                address,
                city,
                postal_code,
                country,
            };
            let method = match payment {
                Payment::CreditCard => career_closet_shop::models::PaymentMethod::CreditCard,
                Payment::Paypal => career_closet_shop::models::PaymentMethod::Paypal,
            };
            commands::order::place(&mut shop, &shipping, method).await?;
        }
    }
    Ok(())
}
