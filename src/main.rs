use anyhow::Result;
use clap::{Parser, Subcommand};
use reef::commands::{
    add, alerts, backup, dashboard, demo, export, import, list, payment, update,
};
use reef::commands::{list::ListFilters, update::UpdateArgs};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "reef")]
#[command(about = "Lead pipeline tracking CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new lead to the pipeline
    Add {
        /// Lead or organization name
        name: String,

        /// Phone number or other contact handle
        contact: String,

        /// Client type (center, private-teacher)
        #[arg(short = 't', long)]
        client_type: String,

        /// Campaign or channel the lead came from
        #[arg(short, long, default_value = "Direct")]
        source: String,

        #[arg(short, long)]
        email: Option<String>,

        #[arg(short, long)]
        notes: Option<String>,

        /// Starting stage; transition rules run as if moved there
        #[arg(long)]
        stage: Option<String>,
    },

    /// Show the pipeline board, optionally filtered
    List {
        /// Only this pipeline stage
        #[arg(short = 'S', long)]
        stage: Option<String>,

        /// Only this client type
        #[arg(short = 't', long)]
        client_type: Option<String>,

        /// Only this campaign source
        #[arg(long)]
        source: Option<String>,

        /// Case-insensitive match on name, contact or email
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one lead in full
    Show {
        /// Lead id
        id: String,
    },

    /// Edit a lead; omitted flags leave fields unchanged
    Update {
        /// Lead id
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        contact: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(short = 't', long)]
        client_type: Option<String>,

        /// Target stage; moving stages runs the transition rules
        #[arg(short = 'S', long)]
        stage: Option<String>,

        #[arg(long)]
        source: Option<String>,

        #[arg(long)]
        notes: Option<String>,

        /// Why the lead was lost or delayed
        #[arg(long)]
        reason: Option<String>,

        /// Re-contact date (YYYY-MM-DD)
        #[arg(long)]
        recontact: Option<String>,

        /// Demo window start (YYYY-MM-DD)
        #[arg(long)]
        demo_start: Option<String>,

        /// Demo window end (YYYY-MM-DD)
        #[arg(long)]
        demo_end: Option<String>,

        /// Payment date (YYYY-MM-DD)
        #[arg(long)]
        payment_date: Option<String>,

        /// RIB document type for closed sales
        #[arg(long)]
        rib_type: Option<String>,

        /// Installment plan size (1-5)
        #[arg(long)]
        installments: Option<u8>,

        /// Invoice count (never exceeds the installment count)
        #[arg(long)]
        invoices: Option<u8>,
    },

    /// Delete a lead
    Delete {
        /// Lead id
        id: String,
    },

    /// Bulk operations over several leads at once
    Bulk {
        #[command(subcommand)]
        command: BulkCommands,
    },

    /// Manage a closed sale's payment plan
    Payment {
        #[command(subcommand)]
        command: PaymentCommands,
    },

    /// Show active demos grouped by demo day
    Demo,

    /// List leads that need attention
    Alerts {
        /// Only one category (pipeline, demo, payments)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// KPIs, breakdowns and all current alerts
    Dashboard,

    /// Write the collection to a file
    Export {
        #[command(subcommand)]
        command: ExportCommands,
    },

    /// Replace the collection from a JSON export
    Import {
        /// Path to the export file
        file: String,
    },

    /// Inspect snapshots or roll the store back
    Backup {
        #[command(subcommand)]
        command: BackupCommands,
    },
}

#[derive(Subcommand)]
enum BulkCommands {
    /// Move several leads to one stage
    Stage {
        /// Target stage
        stage: String,

        /// Lead ids
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Delete several leads
    Delete {
        /// Lead ids
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

#[derive(Subcommand)]
enum PaymentCommands {
    /// Move to the next payment stage
    Advance {
        /// Lead id
        id: String,
    },

    /// Set the payment stage directly
    Set {
        /// Lead id
        id: String,

        /// Target payment stage (upfront, second, third, fourth, done)
        stage: String,
    },

    /// Resize the installment plan (1-5)
    Installments {
        /// Lead id
        id: String,

        /// New plan size
        count: u8,
    },

    /// Record an installment payment
    Record {
        /// Lead id
        id: String,

        /// Installment position, 1-based
        position: usize,

        /// Payment date (YYYY-MM-DD)
        date: String,

        /// Path to a proof document to attach
        #[arg(short, long)]
        document: Option<String>,
    },
}

#[derive(Subcommand)]
enum ExportCommands {
    /// Comma-separated values, one row per lead
    Csv {
        /// Output path (defaults to reef-leads.csv)
        #[arg(short, long)]
        out: Option<String>,

        /// Restrict to these lead ids
        ids: Vec<String>,
    },

    /// The storage JSON, indented
    Json {
        /// Output path (defaults to reef-leads.json)
        #[arg(short, long)]
        out: Option<String>,

        /// Restrict to these lead ids
        ids: Vec<String>,
    },
}

#[derive(Subcommand)]
enum BackupCommands {
    /// List snapshots, newest first
    List,

    /// Replace the collection with snapshot INDEX (0 = newest)
    Restore {
        /// Snapshot index from `reef backup list`
        index: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Add {
            name,
            contact,
            client_type,
            source,
            email,
            notes,
            stage,
        } => add::run(name, contact, client_type, source, email, notes, stage),
        Commands::List {
            stage,
            client_type,
            source,
            search,
        } => list::run(ListFilters {
            stage,
            client_type,
            source,
            search,
        }),
        Commands::Show { id } => list::show(id),
        Commands::Update {
            id,
            name,
            contact,
            email,
            client_type,
            stage,
            source,
            notes,
            reason,
            recontact,
            demo_start,
            demo_end,
            payment_date,
            rib_type,
            installments,
            invoices,
        } => update::run(
            id,
            UpdateArgs {
                name,
                contact,
                email,
                client_type,
                stage,
                source,
                notes,
                reason,
                recontact,
                demo_start,
                demo_end,
                payment_date,
                rib_type,
                installments,
                invoices,
            },
        ),
        Commands::Delete { id } => update::delete(id),
        Commands::Bulk { command } => match command {
            BulkCommands::Stage { stage, ids } => update::bulk_stage(ids, stage),
            BulkCommands::Delete { ids } => update::bulk_delete(ids),
        },
        Commands::Payment { command } => match command {
            PaymentCommands::Advance { id } => payment::advance(id),
            PaymentCommands::Set { id, stage } => payment::set(id, stage),
            PaymentCommands::Installments { id, count } => payment::installments(id, count),
            PaymentCommands::Record {
                id,
                position,
                date,
                document,
            } => payment::record(id, position, date, document),
        },
        Commands::Demo => demo::run(),
        Commands::Alerts { category } => alerts::run(category),
        Commands::Dashboard => dashboard::run(),
        Commands::Export { command } => match command {
            ExportCommands::Csv { out, ids } => export::csv(out, ids),
            ExportCommands::Json { out, ids } => export::json(out, ids),
        },
        Commands::Import { file } => import::run(&file),
        Commands::Backup { command } => match command {
            BackupCommands::List => backup::list(),
            BackupCommands::Restore { index } => backup::restore(index),
        },
    }
}
