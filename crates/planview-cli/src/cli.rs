use clap::{Parser, Subcommand};
use planview_domain::{ObjectiveId, PlanId, Selection};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "planview")]
#[command(about = "Browse large objective plans from the terminal", long_about = None)]
#[command(
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("PLANVIEW_COMMIT"), ")")
)]
pub struct Cli {
    /// Config file to use instead of the per-user one (or set PLANVIEW_CONFIG)
    #[arg(long, global = true, value_name = "FILE", env = "PLANVIEW_CONFIG")]
    pub config: Option<PathBuf>,

    /// Plan to open in the browser
    #[arg(long, default_value_t = 1)]
    pub plan: PlanId,

    /// Initial selection: `live` or an objective id
    #[arg(long, value_name = "SELECTION")]
    pub select: Option<Selection>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List plans
    Plans,
    /// List a plan's objectives, optionally filtered
    Objectives {
        #[arg(long)]
        plan: PlanId,
        /// Title or number substring; case-insensitive
        #[arg(long)]
        query: Option<String>,
    },
    /// Show one objective with its markdown sections
    Objective {
        #[arg(long)]
        plan: PlanId,
        #[arg(long)]
        id: ObjectiveId,
    },
    /// Show the live objective of a plan, if any
    Live {
        #[arg(long)]
        plan: PlanId,
    },
    /// Show one page of an objective's execution log
    Steps {
        #[arg(long)]
        objective: ObjectiveId,
        /// Zero-based page index
        #[arg(long, default_value_t = 0)]
        page: usize,
        /// Overrides the configured page size
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// Compute the realized window for a list geometry
    Window {
        #[arg(long)]
        count: usize,
        #[arg(long, default_value_t = 0)]
        offset: u64,
        #[arg(long)]
        height: u64,
        #[arg(long)]
        row_size: Option<u32>,
        #[arg(long)]
        overscan: Option<usize>,
    },
    /// Print the effective configuration
    Config,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
