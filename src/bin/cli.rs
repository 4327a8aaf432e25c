use passbook::{AppConfig, Bank, JsonStore, LedgerError, DEFAULT_LEDGER_FILE,
    amount::Amount};

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;

#[derive(Parser, Debug)]
#[clap(version, about, propagate_version = true)]
struct Cli {
    /// Path to the ledger file to operate on
    #[clap(short, long, value_parser)]
    file: Option<PathBuf>,

    /// Path to a TOML config naming the ledger file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Action to perform
    #[clap(subcommand)]
    action: Subcommands,
}

#[derive(Debug, Subcommand)]
enum Subcommands {
    /// List all accounts and their balances
    Accounts,
    /// Open a new account
    Create(Create),
    /// Deposit into an account
    Deposit(Movement),
    /// Withdraw from an account
    Withdraw(Movement),
    /// Show one account's balance
    Balance(Lookup),
    /// Show one account's transaction history
    History(Lookup),
}

#[derive(Args, Debug)]
struct Create {
    /// Identifier for the new account
    #[clap(value_parser)]
    id: String,

    /// Account holder's name
    #[clap(value_parser)]
    holder: String,

    /// Opening balance
    #[clap(value_parser, default_value = "0")]
    amount: Amount,
}

#[derive(Args, Debug)]
struct Movement {
    /// Account identifier
    #[clap(value_parser)]
    id: String,

    /// Amount to move
    #[clap(value_parser)]
    amount: Amount,
}

#[derive(Args, Debug)]
struct Lookup {
    /// Account identifier
    #[clap(value_parser)]
    id: String,
}

fn ledger_path(args: &Cli) -> PathBuf {
    if let Some(file) = &args.file {
        return file.clone();
    }
    if let Some(config_path) = &args.config {
        match AppConfig::read(config_path) {
            Ok(config) => return config.ledger_file,
            Err(err) => fail(&format!("{:#}", err)),
        }
    }
    return PathBuf::from(DEFAULT_LEDGER_FILE);
}

fn fail(message: &str) -> ! {
    eprintln!("{} {}", "error:".red().bold(), message);
    process::exit(1);
}

fn print_balance(amount: Amount) {
    let formatted = amount.to_string();
    let rendered = if amount.is_positive() {
        formatted.green()
    } else {
        formatted.normal()
    };
    println!("{}", rendered);
}

fn run(bank: &mut Bank<JsonStore>, action: Subcommands) -> Result<(), LedgerError> {
    match action {
        Subcommands::Accounts => {
            for (id, account) in bank.accounts() {
                println!("{} ({}): {}", id.bold(), account.holder_name(), account.balance());
            }
        }
        Subcommands::Create(create) => {
            bank.create_account(&create.id, &create.holder, create.amount)?;
            println!("Account {} created", create.id.bold());
        }
        Subcommands::Deposit(movement) => {
            let new_balance = bank.deposit(&movement.id, movement.amount)?;
            print_balance(new_balance);
        }
        Subcommands::Withdraw(movement) => {
            let new_balance = bank.withdraw(&movement.id, movement.amount)?;
            print_balance(new_balance);
        }
        Subcommands::Balance(lookup) => {
            print_balance(bank.balance(&lookup.id)?);
        }
        Subcommands::History(lookup) => {
            for record in bank.history(&lookup.id)? {
                println!("- {}", record);
            }
        }
    }
    return Ok(());
}

fn main() {
    let args = Cli::parse();
    let path = ledger_path(&args);

    let store = JsonStore::new(&path);
    let mut bank = match Bank::open(store) {
        Ok(bank) => bank,
        Err(err) => fail(&err.to_string()),
    };

    if let Err(err) = run(&mut bank, args.action) {
        fail(&err.to_string());
    }
}
