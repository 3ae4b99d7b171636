use clap::{Parser, Subcommand};
use seatplan_cli::{run_balance, write_templates, BalanceOpts};
use std::path::PathBuf;
use types::{BalanceParams, Columns};

#[derive(Parser)]
#[command(
    name = "seatplan",
    about = "Seat students into exam rooms from xlsx sheets",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Balance students across rooms and write the seating reports.
    ///
    /// The rooms workbook needs a room column; the students workbook needs
    /// identifier, class, family name and given name columns.
    Balance {
        /// Rooms workbook (.xlsx)
        #[arg(long)]
        rooms: PathBuf,
        /// Students workbook (.xlsx)
        #[arg(long)]
        students: PathBuf,
        /// Directory for the generated reports
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
        #[arg(long, default_value_t = types::DEFAULT_MAX_PER_ROOM)]
        max_per_room: u32,
        #[arg(long, default_value_t = types::DEFAULT_MAX_PER_CLASS_IN_ROOM)]
        max_per_class: u32,
        /// Randomized attempts before settling for the best one
        #[arg(long, default_value_t = types::DEFAULT_ATTEMPTS)]
        attempts: u32,
        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Write sample rooms and students workbooks.
    Templates {
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Balance {
            rooms,
            students,
            out,
            max_per_room,
            max_per_class,
            attempts,
            seed,
        } => {
            let opts = BalanceOpts {
                rooms,
                students,
                out,
                params: BalanceParams {
                    max_per_room,
                    max_per_class_in_room: max_per_class,
                    attempts,
                    seed,
                },
                columns: Columns::default(),
                names: Default::default(),
            };
            let written = run_balance(&opts, chrono::Local::now().naive_local())?;
            let c = written.counts;
            println!(
                "total: {}, assigned: {}, unassigned: {} (seed {})",
                c.total, c.assigned, c.unassigned, written.seed
            );
            for f in &written.files {
                println!("{}", f.display());
            }
            Ok(())
        }
        Commands::Templates { out } => {
            for f in write_templates(&out, &Columns::default())? {
                println!("{}", f.display());
            }
            Ok(())
        }
    }
}
