use std::fs::File;
use std::io::{Write, stdout};

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};

use crate::application::{AppError, HouseholdService};
use crate::domain::{
    CASH_SOURCES, Cash, CashDraft, CashPatch, Cents, CreditCard, CreditCardDraft,
    CreditCardPatch, DebitCard, DebitCardDraft, DebitCardPatch, Direction, Expense,
    ExpenseCategory, ExpenseDraft, ExpensePatch, Income, IncomeDraft, IncomePatch, RecordId,
    RecordKind, UserId, format_cents, mask_card_number, parse_amount, parse_date,
};
use crate::io::Exporter;
use crate::settings::{DEFAULT_CONFIG_FILE, Settings};
use crate::storage::SnapshotProvider;

/// Household Ledger - shared finances for couples and families
#[derive(Parser)]
#[command(name = "household")]
#[command(about = "Track household income, expenses, cash and card spending")]
#[command(version)]
pub struct Cli {
    /// Settings file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: String,

    /// JSON snapshot to load (defaults to the bundled sample household)
    #[arg(short, long)]
    pub snapshot: Option<String>,

    /// Currency code shown next to amounts
    #[arg(long)]
    pub currency: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// log4rs YAML configuration (overrides --verbose)
    #[arg(long, global = true)]
    pub log_config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show totals, balance and expense breakdown
    Summary {
        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// List transactions, newest first
    Transactions {
        /// Only show one kind: income, expense, credit_card, cash, debit_card
        #[arg(short, long)]
        kind: Option<String>,

        /// Maximum number of transactions to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// List household members
    Users,

    /// Record a new transaction
    #[command(subcommand)]
    Add(AddCommands),

    /// Change fields of an existing transaction
    Update {
        /// Record kind: income, expense, credit_card, cash, debit_card
        kind: String,

        /// Record ID
        id: RecordId,

        /// New amount (payable amount for credit cards)
        #[arg(short, long)]
        amount: Option<String>,

        /// New date (due date for credit cards), YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,

        /// New owner
        #[arg(short, long)]
        user: Option<UserId>,

        /// New description (expense, cash, debit_card)
        #[arg(short, long)]
        description: Option<String>,

        /// New category (expense)
        #[arg(short, long)]
        category: Option<String>,

        /// New source (income, cash)
        #[arg(short, long)]
        source: Option<String>,

        /// New issuing bank (credit_card, debit_card)
        #[arg(short, long)]
        bank: Option<String>,

        /// New card number, masked to the last four digits (credit_card, debit_card)
        #[arg(long)]
        card_number: Option<String>,

        /// New swipe date (credit_card), YYYY-MM-DD
        #[arg(long)]
        swipe_date: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Record kind: income, expense, credit_card, cash, debit_card
        kind: String,

        /// Record ID
        id: RecordId,
    },

    /// Export data to CSV or JSON
    Export {
        /// What to export: transactions, summary, snapshot
        export_type: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum AddCommands {
    /// Money received
    Income {
        /// Amount (e.g., "50000" or "50,000.00")
        amount: String,

        /// Recipient user ID
        #[arg(short, long)]
        user: UserId,

        /// Where the money came from (e.g., "Salary")
        #[arg(short, long)]
        source: String,

        /// Date received (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Money spent
    Expense {
        /// Amount (e.g., "1500" or "1,500.00")
        amount: String,

        /// User ID
        #[arg(short, long)]
        user: UserId,

        /// Category: groceries, bills, credit_card, misc
        #[arg(short, long)]
        category: String,

        /// Description
        #[arg(short, long)]
        description: Option<String>,

        /// Expense date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Credit card charge to be paid
    CreditCard {
        /// Payable amount
        amount: String,

        /// Card holder user ID
        #[arg(short, long)]
        user: UserId,

        /// Issuing bank
        #[arg(short, long)]
        bank: String,

        /// Card number (masked to the last four digits)
        #[arg(long)]
        card_number: String,

        /// Swipe date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        swipe_date: Option<String>,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due_date: String,
    },

    /// Cash on hand
    Cash {
        /// Amount
        amount: String,

        /// User ID
        #[arg(short, long)]
        user: UserId,

        /// Where the cash came from
        #[arg(
            short,
            long,
            default_value = "other",
            value_parser = PossibleValuesParser::new(CASH_SOURCES)
        )]
        source: String,

        /// Description
        #[arg(short, long)]
        description: Option<String>,

        /// Transaction date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Debit card purchase
    DebitCard {
        /// Amount
        amount: String,

        /// Card holder user ID
        #[arg(short, long)]
        user: UserId,

        /// Issuing bank
        #[arg(short, long)]
        bank: String,

        /// Card number (masked to the last four digits)
        #[arg(long)]
        card_number: String,

        /// Description
        #[arg(short, long)]
        description: Option<String>,

        /// Transaction date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
}

type Service = HouseholdService<SnapshotProvider>;

impl Cli {
    pub async fn run(self) -> Result<()> {
        let Cli {
            config,
            snapshot,
            currency,
            command,
            ..
        } = self;

        let settings = Settings::load(&config)
            .with_context(|| format!("Failed to load settings from {}", config))?;
        let currency = currency.unwrap_or(settings.currency);

        let provider = match snapshot.or(settings.snapshot) {
            Some(path) => SnapshotProvider::load(&path).await?,
            None => SnapshotProvider::fixture()?,
        };
        let mut service = HouseholdService::bootstrap(provider).await?;
        let today = Utc::now().date_naive();

        match command {
            Commands::Summary { format } => run_summary_command(&service, &currency, &format)?,

            Commands::Transactions { kind, limit } => {
                let kind = kind
                    .map(|k| k.parse::<RecordKind>())
                    .transpose()
                    .map_err(AppError::from)?;
                run_transactions_command(&service, &currency, kind, limit, today);
            }

            Commands::Users => {
                let ledger = service.ledger();
                if ledger.users().is_empty() {
                    println!("No users found.");
                } else {
                    println!("{:<6} {:<20} {:<30}", "ID", "NAME", "EMAIL");
                    println!("{}", "-".repeat(58));
                    for user in ledger.users() {
                        println!("{:<6} {:<20} {:<30}", user.id, user.name, user.email);
                    }
                }
            }

            Commands::Add(add_cmd) => {
                run_add_command(&mut service, add_cmd, &currency, today).await?;
                print_balance(&service, &currency);
            }

            Commands::Update {
                kind,
                id,
                amount,
                date,
                user,
                description,
                category,
                source,
                bank,
                card_number,
                swipe_date,
            } => {
                let kind: RecordKind = kind.parse().map_err(AppError::from)?;
                let changes = FieldChanges {
                    amount: amount.as_deref().map(parse_amount_arg).transpose()?,
                    date: date.as_deref().map(parse_date_arg).transpose()?,
                    user,
                    description,
                    category: category
                        .map(|c| c.parse::<ExpenseCategory>())
                        .transpose()
                        .map_err(AppError::from)?,
                    source,
                    bank,
                    card_number: card_number.as_deref().map(mask_card_number),
                    swipe_date: swipe_date.as_deref().map(parse_date_arg).transpose()?,
                };
                run_update_command(&mut service, kind, id, changes, &currency).await?;
                print_balance(&service, &currency);
            }

            Commands::Delete { kind, id } => {
                let kind: RecordKind = kind.parse().map_err(AppError::from)?;
                let removed = match kind {
                    RecordKind::Income => service.delete::<Income>(id).await?.is_some(),
                    RecordKind::Expense => service.delete::<Expense>(id).await?.is_some(),
                    RecordKind::CreditCard => service.delete::<CreditCard>(id).await?.is_some(),
                    RecordKind::Cash => service.delete::<Cash>(id).await?.is_some(),
                    RecordKind::DebitCard => service.delete::<DebitCard>(id).await?.is_some(),
                };
                if removed {
                    println!("Deleted {} #{}", kind, id);
                } else {
                    println!("No {} #{} to delete", kind, id);
                }
                print_balance(&service, &currency);
            }

            Commands::Export {
                export_type,
                output,
            } => run_export_command(&service, &export_type, output.as_deref(), today)?,
        }

        Ok(())
    }
}

fn run_summary_command(service: &Service, currency: &str, format: &str) -> Result<()> {
    let summary = service.summary();

    match format {
        "table" => {}
        "json" => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            return Ok(());
        }
        _ => anyhow::bail!("Invalid format '{}'. Valid formats: table, json", format),
    }

    println!("Household Summary ({})", currency);
    println!();
    println!("Total Income:        {:>15}", format_cents(summary.total_income));
    println!("Total Expenses:      {:>15}", format_cents(summary.total_expenses));
    println!(
        "Credit Card Debt:    {:>15}",
        format_cents(summary.total_credit_card_debt)
    );
    println!(
        "Debit Card Spending: {:>15}",
        format_cents(summary.total_debit_spending)
    );
    println!("{}", "-".repeat(37));
    println!("Balance:             {:>15}", format_cents(summary.balance));
    println!();
    println!("Cash on Hand:        {:>15}", format_cents(summary.total_cash));

    if !summary.expense_categories.is_empty() {
        println!();
        println!("Expense Breakdown:");
        for cat in &summary.expense_categories {
            println!(
                "  {:<16} {:>15} ({:.1}%)",
                cat.label,
                format_cents(cat.total),
                cat.percentage
            );
        }
    }

    Ok(())
}

fn run_transactions_command(
    service: &Service,
    currency: &str,
    kind: Option<RecordKind>,
    limit: Option<usize>,
    today: NaiveDate,
) {
    let rows = service.transactions(kind, today);
    if rows.is_empty() {
        println!("No transactions found.");
        return;
    }

    println!(
        "{:<12} {:<5} {:<12} {:<16} {:<30} {:>16}",
        "KIND", "ID", "DATE", "USER", "TITLE", "AMOUNT"
    );
    println!("{}", "-".repeat(96));

    for row in rows.iter().take(limit.unwrap_or(usize::MAX)) {
        let sign = match row.direction {
            Direction::Inflow => "+",
            Direction::Outflow => "-",
            Direction::Owed => "",
        };
        let flag = if row.overdue { "  OVERDUE" } else { "" };
        println!(
            "{:<12} {:<5} {:<12} {:<16} {:<30} {:>16}{}",
            row.kind.as_str(),
            row.id,
            row.date.format("%Y-%m-%d"),
            truncate(&row.user, 16),
            truncate(&row.title, 30),
            format!("{}{}", sign, format_cents(row.amount_cents)),
            flag
        );
        if let Some(desc) = &row.description {
            println!("{:<31} {}", "", truncate(desc, 64));
        }
    }

    println!();
    println!("Amounts in {}", currency);
}

async fn run_add_command(
    service: &mut Service,
    cmd: AddCommands,
    currency: &str,
    today: NaiveDate,
) -> Result<()> {
    match cmd {
        AddCommands::Income {
            amount,
            user,
            source,
            date,
        } => {
            let draft = IncomeDraft {
                user_id: user,
                amount: parse_amount_arg(&amount)?,
                source,
                received_at: date_or_today(date, today)?,
            };
            let income = service.add::<Income>(draft).await?;
            println!(
                "Added income #{}: {} {} ({})",
                income.id,
                currency,
                format_cents(income.amount),
                income.source
            );
        }

        AddCommands::Expense {
            amount,
            user,
            category,
            description,
            date,
        } => {
            let category: ExpenseCategory = category.parse().map_err(AppError::from)?;
            let draft = ExpenseDraft {
                user_id: user,
                category,
                description,
                amount: parse_amount_arg(&amount)?,
                expense_date: date_or_today(date, today)?,
            };
            let expense = service.add::<Expense>(draft).await?;
            println!(
                "Added expense #{}: {} {} ({})",
                expense.id,
                currency,
                format_cents(expense.amount),
                expense.category.label()
            );
        }

        AddCommands::CreditCard {
            amount,
            user,
            bank,
            card_number,
            swipe_date,
            due_date,
        } => {
            let draft = CreditCardDraft {
                user_id: user,
                bank,
                card_number: mask_card_number(&card_number),
                swipe_date: date_or_today(swipe_date, today)?,
                due_date: parse_date_arg(&due_date)?,
                payable_amount: parse_amount_arg(&amount)?,
            };
            let card = service.add::<CreditCard>(draft).await?;
            if !card.has_valid_dates() {
                eprintln!("Warning: due date is before the swipe date");
            }
            println!(
                "Added credit card charge #{}: {} {} on {} {} (due {})",
                card.id,
                currency,
                format_cents(card.payable_amount),
                card.bank,
                card.card_number,
                card.due_date.format("%Y-%m-%d")
            );
        }

        AddCommands::Cash {
            amount,
            user,
            source,
            description,
            date,
        } => {
            let draft = CashDraft {
                user_id: user,
                amount: parse_amount_arg(&amount)?,
                source,
                description,
                transaction_date: date_or_today(date, today)?,
            };
            let cash = service.add::<Cash>(draft).await?;
            println!(
                "Added cash #{}: {} {} ({})",
                cash.id,
                currency,
                format_cents(cash.amount),
                cash.source
            );
        }

        AddCommands::DebitCard {
            amount,
            user,
            bank,
            card_number,
            description,
            date,
        } => {
            let draft = DebitCardDraft {
                user_id: user,
                bank,
                card_number: mask_card_number(&card_number),
                amount: parse_amount_arg(&amount)?,
                description,
                transaction_date: date_or_today(date, today)?,
            };
            let card = service.add::<DebitCard>(draft).await?;
            println!(
                "Added debit card transaction #{}: {} {} on {} {}",
                card.id,
                currency,
                format_cents(card.amount),
                card.bank,
                card.card_number
            );
        }
    }

    Ok(())
}

/// Field changes given on the command line, mapped onto each kind's patch.
#[derive(Default)]
struct FieldChanges {
    amount: Option<Cents>,
    date: Option<NaiveDate>,
    user: Option<UserId>,
    description: Option<String>,
    category: Option<ExpenseCategory>,
    source: Option<String>,
    bank: Option<String>,
    card_number: Option<String>,
    swipe_date: Option<NaiveDate>,
}

impl FieldChanges {
    /// Flags that were given but have no matching field on `kind`.
    fn unsupported_flags(&self, kind: RecordKind) -> Vec<&'static str> {
        let is_card = matches!(kind, RecordKind::CreditCard | RecordKind::DebitCard);
        let checks = [
            (
                "--description",
                self.description.is_some(),
                matches!(
                    kind,
                    RecordKind::Expense | RecordKind::Cash | RecordKind::DebitCard
                ),
            ),
            (
                "--category",
                self.category.is_some(),
                kind == RecordKind::Expense,
            ),
            (
                "--source",
                self.source.is_some(),
                matches!(kind, RecordKind::Income | RecordKind::Cash),
            ),
            ("--bank", self.bank.is_some(), is_card),
            ("--card-number", self.card_number.is_some(), is_card),
            (
                "--swipe-date",
                self.swipe_date.is_some(),
                kind == RecordKind::CreditCard,
            ),
        ];

        checks
            .into_iter()
            .filter(|(_, given, applies)| *given && !applies)
            .map(|(flag, _, _)| flag)
            .collect()
    }

    fn income_patch(self) -> IncomePatch {
        IncomePatch {
            user_id: self.user,
            amount: self.amount,
            source: self.source,
            received_at: self.date,
        }
    }

    fn expense_patch(self) -> ExpensePatch {
        ExpensePatch {
            user_id: self.user,
            category: self.category,
            description: self.description.map(Some),
            amount: self.amount,
            expense_date: self.date,
        }
    }

    fn credit_card_patch(self) -> CreditCardPatch {
        CreditCardPatch {
            user_id: self.user,
            bank: self.bank,
            card_number: self.card_number,
            swipe_date: self.swipe_date,
            due_date: self.date,
            payable_amount: self.amount,
        }
    }

    fn cash_patch(self) -> CashPatch {
        CashPatch {
            user_id: self.user,
            amount: self.amount,
            source: self.source,
            description: self.description.map(Some),
            transaction_date: self.date,
        }
    }

    fn debit_card_patch(self) -> DebitCardPatch {
        DebitCardPatch {
            user_id: self.user,
            bank: self.bank,
            card_number: self.card_number,
            amount: self.amount,
            description: self.description.map(Some),
            transaction_date: self.date,
        }
    }
}

async fn run_update_command(
    service: &mut Service,
    kind: RecordKind,
    id: RecordId,
    changes: FieldChanges,
    currency: &str,
) -> Result<()> {
    let unsupported = changes.unsupported_flags(kind);
    if !unsupported.is_empty() {
        anyhow::bail!("{} records do not take {}", kind, unsupported.join(", "));
    }
    let invalid_cash_source = changes
        .source
        .as_deref()
        .filter(|source| kind == RecordKind::Cash && !CASH_SOURCES.contains(source));
    if let Some(source) = invalid_cash_source {
        anyhow::bail!(
            "Invalid cash source '{}'. Valid sources: {}",
            source,
            CASH_SOURCES.join(", ")
        );
    }

    let amount = match kind {
        RecordKind::Income => {
            service.update::<Income>(id, changes.income_patch()).await?.amount
        }
        RecordKind::Expense => {
            service.update::<Expense>(id, changes.expense_patch()).await?.amount
        }
        RecordKind::CreditCard => {
            service
                .update::<CreditCard>(id, changes.credit_card_patch())
                .await?
                .payable_amount
        }
        RecordKind::Cash => service.update::<Cash>(id, changes.cash_patch()).await?.amount,
        RecordKind::DebitCard => {
            service
                .update::<DebitCard>(id, changes.debit_card_patch())
                .await?
                .amount
        }
    };

    println!(
        "Updated {} #{}: {} {}",
        kind,
        id,
        currency,
        format_cents(amount)
    );
    Ok(())
}

fn run_export_command(
    service: &Service,
    export_type: &str,
    output: Option<&str>,
    today: NaiveDate,
) -> Result<()> {
    let exporter = Exporter::new(service.ledger());

    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };

    match export_type {
        "transactions" => {
            let count = exporter.export_transactions_csv(writer, None, today)?;
            if output.is_some() {
                eprintln!("Exported {} transactions", count);
            }
        }
        "summary" => {
            exporter.export_summary_json(writer)?;
            if output.is_some() {
                eprintln!("Exported summary");
            }
        }
        "snapshot" => {
            let snapshot = exporter.export_snapshot_json(writer)?;
            if output.is_some() {
                eprintln!(
                    "Exported snapshot: {} users, {} incomes, {} expenses, {} credit cards, {} cash, {} debit cards",
                    snapshot.users.len(),
                    snapshot.incomes.len(),
                    snapshot.expenses.len(),
                    snapshot.credit_cards.len(),
                    snapshot.cash.len(),
                    snapshot.debit_cards.len()
                );
            }
        }
        _ => {
            anyhow::bail!(
                "Invalid export type '{}'. Valid types: transactions, summary, snapshot",
                export_type
            );
        }
    }

    Ok(())
}

fn print_balance(service: &Service, currency: &str) {
    println!(
        "Balance: {} {}",
        currency,
        format_cents(service.ledger().balance())
    );
}

fn parse_amount_arg(input: &str) -> Result<Cents, AppError> {
    Ok(parse_amount(input)?)
}

fn parse_date_arg(input: &str) -> Result<NaiveDate, AppError> {
    parse_date(input).map_err(|_| AppError::InvalidDate(input.to_string()))
}

fn date_or_today(input: Option<String>, today: NaiveDate) -> Result<NaiveDate, AppError> {
    match input {
        Some(s) => parse_date_arg(&s),
        None => Ok(today),
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
