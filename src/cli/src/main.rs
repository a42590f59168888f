//! Operator CLI for the proof-gated token ledger.

use anyhow::Result;
use colored::Colorize;
use meow_cli::{deploy, new_account, query, submit, Account, CliConfig, LedgerStore};
use meow_core::{AccountId, Amount, Call};
use std::path::PathBuf;
use structopt::StructOpt;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Command line arguments for the ledger CLI.
#[derive(Debug, StructOpt)]
#[structopt(name = "meow", about = "Proof-gated token ledger")]
struct Opt {
    /// Path to the configuration file
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Path to the ledger state file
    #[structopt(short, long, parse(from_os_str))]
    state: Option<PathBuf>,

    /// Path to the account key file
    #[structopt(short, long, parse(from_os_str))]
    account: Option<PathBuf>,

    /// Subcommand to run
    #[structopt(subcommand)]
    cmd: Command,
}

/// Subcommands for the ledger CLI.
#[derive(Debug, StructOpt)]
enum Command {
    /// Create a new account key
    #[structopt(name = "new-account")]
    NewAccount,

    /// Print the account id of the account key
    #[structopt(name = "address")]
    Address,

    /// Deploy the ledger with the account as owner
    #[structopt(name = "deploy")]
    Deploy,

    /// Pause transfers and burns (owner only)
    #[structopt(name = "pause")]
    Pause,

    /// Resume transfers and burns (owner only)
    #[structopt(name = "unpause")]
    Unpause,

    /// Transfer tokens to another account
    #[structopt(name = "transfer")]
    Transfer {
        /// Recipient account id
        #[structopt(long)]
        to: AccountId,

        /// Amount to transfer
        #[structopt(long)]
        amount: Amount,
    },

    /// Burn tokens
    #[structopt(name = "burn")]
    Burn {
        /// Amount to burn
        #[structopt(long)]
        amount: Amount,
    },

    /// Get the balance of an account
    #[structopt(name = "balance")]
    Balance {
        /// Account id, defaults to the account key
        #[structopt(long)]
        address: Option<AccountId>,
    },

    /// Print the ledger record
    #[structopt(name = "state")]
    State,

    /// Print every emitted event
    #[structopt(name = "events")]
    Events,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let opt = Opt::from_args();

    // Load configuration
    let mut config = match &opt.config {
        Some(path) => CliConfig::from_file(path)?,
        None => CliConfig::default(),
    };

    // Override paths if specified
    if let Some(state) = opt.state {
        config.state_file = state;
    }
    if let Some(account) = opt.account {
        config.account_file = account;
    }

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let store = LedgerStore::new(&config.state_file);

    // Run the appropriate command
    match opt.cmd {
        Command::NewAccount => {
            let id = new_account::run(&config.account_file)?;
            println!("{} {}", "Account created:".green(), id);
        }
        Command::Address => {
            let account = Account::load(&config.account_file)?;
            println!("{} {}", "Account:".green(), account.id()?);
        }
        Command::Deploy => {
            let account = Account::load(&config.account_file)?;
            let state = deploy::run(&store, &account)?;
            println!("{} {}", "Ledger deployed:".green(), state);
        }
        Command::Pause => {
            let account = Account::load(&config.account_file)?;
            submit::run(&store, &account, Call::Pause)?;
            println!("{}", "Ledger paused".yellow());
        }
        Command::Unpause => {
            let account = Account::load(&config.account_file)?;
            submit::run(&store, &account, Call::Unpause)?;
            println!("{}", "Ledger unpaused".green());
        }
        Command::Transfer { to, amount } => {
            let account = Account::load(&config.account_file)?;
            let events = submit::run(&store, &account, Call::Transfer { to, amount })?;
            for event in events {
                println!("{} {}", "Event:".green(), event);
            }
        }
        Command::Burn { amount } => {
            let account = Account::load(&config.account_file)?;
            let events = submit::run(&store, &account, Call::Burn { amount })?;
            for event in events {
                println!("{} {}", "Event:".green(), event);
            }
        }
        Command::Balance { address } => {
            let address = match address {
                Some(address) => address,
                None => Account::load(&config.account_file)?.id()?,
            };
            let balance = query::balance(&store, &address)?;
            println!("{} {}", "Balance:".green(), balance);
        }
        Command::State => {
            let state = query::state(&store)?;
            println!("{}", serde_json::to_string_pretty(&state)?);
            println!("{} 0x{}", "Commitment:".green(), hex::encode(state.commitment()));
        }
        Command::Events => {
            for event in query::events(&store)? {
                println!("{}", event);
            }
        }
    }

    Ok(())
}
