use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::application::LedgerService;
use crate::domain::{format_amount, Category, ExportScope, MemberId};
use crate::io::{ExportFormat, Exporter};

/// Michango - Member Contribution Ledger
#[derive(Parser)]
#[command(name = "michango")]
#[command(about = "Track member contributions by month and year, with yearly totals and export")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, env = "MICHANGO_DB", default_value = "michango.db")]
    pub database: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Member management commands
    #[command(subcommand)]
    Member(MemberCommands),

    /// Record a contribution for a member, stamped with the current month
    Contribute {
        /// Member name
        #[arg(short, long)]
        member: Option<String>,

        /// Attendance amount
        #[arg(long)]
        attendance: Option<String>,

        /// Society amount
        #[arg(long)]
        society: Option<String>,

        /// Uwaka amount
        #[arg(long)]
        uwaka: Option<String>,

        /// Wawata amount
        #[arg(long)]
        wawata: Option<String>,

        /// Construction amount
        #[arg(long)]
        construction: Option<String>,
    },

    /// Show a member's total for a year
    Total {
        /// Member name
        #[arg(short, long)]
        member: Option<String>,

        /// Year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Export contributions to CSV or JSON
    Export {
        /// Only export this member (omit for all members)
        #[arg(short, long)]
        member: Option<String>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Format: csv, json
        #[arg(short, long, default_value = "csv")]
        format: String,
    },
}

#[derive(Subcommand)]
pub enum MemberCommands {
    /// Add a new member
    Add {
        /// Member name (must be unique)
        name: String,
    },

    /// List all members
    List,

    /// Show a member's contributions and totals
    Show {
        /// Member name
        #[arg(short, long)]
        member: Option<String>,
    },
}

impl Cli {
    /// Install the tracing subscriber. `RUST_LOG` wins over `--verbose`.
    pub fn init_tracing(&self) {
        let default_level = if self.verbose { "debug" } else { "warn" };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("michango={}", default_level)));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Init => {
                LedgerService::init(&self.database).await?;
                println!("Database initialized: {}", self.database);
            }

            Commands::Member(member_cmd) => {
                let service = LedgerService::connect(&self.database).await?;
                run_member_command(&service, member_cmd).await?;
            }

            Commands::Contribute {
                member,
                attendance,
                society,
                uwaka,
                wawata,
                construction,
            } => {
                let service = LedgerService::connect(&self.database).await?;
                let selected = select_member(&service, member.as_deref()).await?;

                let entries: Vec<(Category, String)> = [
                    (Category::Attendance, attendance),
                    (Category::Society, society),
                    (Category::Uwaka, uwaka),
                    (Category::Wawata, wawata),
                    (Category::Construction, construction),
                ]
                .into_iter()
                .filter_map(|(category, value)| value.map(|v| (category, v)))
                .collect();

                let record = service
                    .record_contribution(
                        selected,
                        entries.iter().map(|(c, v)| (c.as_str(), v.as_str())),
                    )
                    .await?;

                println!(
                    "Contribution recorded: {} {} {} (total {})",
                    member.as_deref().unwrap_or_default(),
                    record.month,
                    record.year,
                    format_amount(record.total())
                );
            }

            Commands::Total { member, year } => {
                let service = LedgerService::connect(&self.database).await?;
                let selected = select_member(&service, member.as_deref()).await?;
                let total = service.get_year_total(selected, year).await?;

                match year {
                    Some(year) => println!(
                        "{} ({}): {}",
                        member.as_deref().unwrap_or_default(),
                        year,
                        format_amount(total)
                    ),
                    None => println!(
                        "{}: {}",
                        member.as_deref().unwrap_or_default(),
                        format_amount(total)
                    ),
                }
            }

            Commands::Export {
                member,
                output,
                format,
            } => {
                let service = LedgerService::connect(&self.database).await?;
                run_export_command(&service, member.as_deref(), output.as_deref(), &format)
                    .await?;
            }
        }

        Ok(())
    }
}

/// Resolve an optional member name into the selection passed to the ledger.
/// No name means no selection; the ledger decides whether that is an error.
async fn select_member(service: &LedgerService, name: Option<&str>) -> Result<Option<MemberId>> {
    match name {
        Some(name) => Ok(Some(service.find_member(name).await?.id)),
        None => Ok(None),
    }
}

async fn run_member_command(service: &LedgerService, cmd: MemberCommands) -> Result<()> {
    match cmd {
        MemberCommands::Add { name } => {
            let member = service.add_member(&name).await?;
            println!("Added member: {}", member.name);
        }

        MemberCommands::List => {
            let members = service.list_members().await?;
            if members.is_empty() {
                println!("No members found.");
            } else {
                println!("{:<6} NAME", "ID");
                println!("{}", "-".repeat(32));
                for member in members {
                    println!("{:<6} {}", member.id, member.name);
                }
            }
        }

        MemberCommands::Show { member } => {
            let selected = select_member(service, member.as_deref()).await?;
            let statement = service.get_member_statement(selected).await?;

            println!("Member: {}", statement.member.name);
            println!();

            if statement.lines.is_empty() {
                println!("No contributions recorded.");
                return Ok(());
            }

            print!("{:<10} {:>6}", "MONTH", "YEAR");
            for category in Category::ALL {
                print!(" {:>12}", category.as_str().to_uppercase());
            }
            println!(" {:>12}", "TOTAL");
            println!("{}", "-".repeat(17 + 13 * (Category::ALL.len() + 1)));

            for line in &statement.lines {
                print!("{:<10} {:>6}", line.record.month, line.record.year);
                for (_, amount) in line.record.values.iter() {
                    print!(" {:>12}", format_amount(amount));
                }
                println!(" {:>12}", format_amount(line.total));
            }

            println!();
            println!(
                "All-time total:  {:>12}",
                format_amount(statement.all_time_total())
            );
            println!(
                "{} total:      {:>12}",
                statement.year,
                format_amount(statement.year_total)
            );
        }
    }
    Ok(())
}

async fn run_export_command(
    service: &LedgerService,
    member: Option<&str>,
    output: Option<&str>,
    format: &str,
) -> Result<()> {
    use std::fs::File;
    use std::io::{stdout, Write};

    let format = ExportFormat::from_str(format)
        .with_context(|| format!("Unknown export format '{}'. Use csv or json", format))?;

    let scope = match member {
        Some(name) => ExportScope::Member(service.find_member(name).await?.id),
        None => ExportScope::All,
    };

    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file '{}'", path))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };

    let exporter = Exporter::new(service);
    let count = exporter.export(scope, format, writer).await?;

    if let Some(path) = output {
        eprintln!("Exported {} row(s) to {}", count, path);
    }
    Ok(())
}
