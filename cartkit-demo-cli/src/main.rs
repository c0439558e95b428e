//! Cartkit Demo CLI
//!
//! Command-line demo storefront for the 2Checkout payment module.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod gateway;
mod ui;

#[derive(Parser)]
#[command(name = "cartkit-demo")]
#[command(about = "Cartkit demo storefront - walk the 2Checkout hosted payment flow", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk an order through the hosted payment flow
    Checkout {
        /// Order total, exactly as displayed to the shopper
        #[arg(long, default_value = "19.99")]
        total: String,

        /// ISO currency code
        #[arg(long, default_value = "USD")]
        currency: String,
    },

    /// Show the checkout payment-method listing
    Methods {
        /// Leave the module unconfigured to see the entry unavailable
        #[arg(long)]
        unconfigured: bool,
    },

    /// Inspect or edit the module settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Run the module's enable precondition
    Enable {
        /// Drop the gateway registration first
        #[arg(long)]
        without_gateway: bool,

        /// Register a gateway that cannot confirm return legs
        #[arg(long)]
        without_completion: bool,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Render the settings form data
    Show,

    /// Submit the settings form
    Set {
        /// Switch the payment method on
        #[arg(long)]
        enabled: bool,

        /// Run gateway calls against the provider sandbox
        #[arg(long)]
        test: bool,

        /// Status a paid order moves to
        #[arg(long, default_value = "complete")]
        success_status: String,

        /// 2Checkout account number
        #[arg(long)]
        account: Option<String>,

        /// 2Checkout secret word
        #[arg(long)]
        secret: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG overrides the defaults.
    let default_filter = if cli.verbose {
        "cartkit_demo_cli=debug,cartkit_lib=debug,cartkit_twocheckout=debug"
    } else {
        "cartkit_demo_cli=info,cartkit_lib=warn,cartkit_twocheckout=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    match cli.command {
        Commands::Checkout { total, currency } => {
            commands::checkout::run(&total, &currency, cli.verbose).await?;
        }
        Commands::Methods { unconfigured } => {
            commands::methods::run(unconfigured, cli.verbose).await?;
        }
        Commands::Settings { action } => match action {
            SettingsAction::Show => {
                commands::settings::show(cli.verbose).await?;
            }
            SettingsAction::Set {
                enabled,
                test,
                success_status,
                account,
                secret,
            } => {
                commands::settings::set(
                    enabled,
                    test,
                    &success_status,
                    account.as_deref(),
                    secret.as_deref(),
                    cli.verbose,
                )
                .await?;
            }
        },
        Commands::Enable {
            without_gateway,
            without_completion,
        } => {
            commands::enable::run(without_gateway, without_completion, cli.verbose).await?;
        }
    }

    Ok(())
}
