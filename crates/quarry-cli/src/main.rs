#![forbid(unsafe_code)]

mod cmd;
mod context;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use context::{CliContext, GlobalFlags};
use output::resolve_output_mode;
use quarry_client::config::{self, UserConfig};
use std::env;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    name = "qy",
    author,
    version,
    about = "quarry: command-line client for remote artifact trackers",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Tracker service URL.
    #[arg(long, global = true)]
    url: Option<String>,

    /// Login name for the session.
    #[arg(long, global = true)]
    login: Option<String>,

    /// Password for the session. Prefer the QUARRY_PASSWORD variable.
    #[arg(long, global = true)]
    password: Option<String>,

    /// Group id to operate in.
    #[arg(long, global = true)]
    group: Option<i32>,

    /// Tracker id to operate in.
    #[arg(long, global = true)]
    tracker: Option<i32>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Collect the connection flags for context resolution.
    fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            url: self.url.clone(),
            login: self.login.clone(),
            password: self.password.clone(),
            group: self.group,
            tracker: self.tracker,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Discovery",
        about = "List groups you belong to",
        long_about = "List every group the logged-in account belongs to.",
        after_help = "EXAMPLES:\n    # List your groups\n    qy groups\n\n    # Emit machine-readable output\n    qy groups --json"
    )]
    Groups,

    #[command(
        next_help_heading = "Discovery",
        about = "List trackers in a group",
        long_about = "List the trackers hosted by the selected group.",
        after_help = "EXAMPLES:\n    # List trackers in group 101\n    qy --group 101 trackers\n\n    # Emit machine-readable output\n    qy --group 101 trackers --json"
    )]
    Trackers,

    #[command(
        next_help_heading = "Discovery",
        about = "Show a tracker's field schema",
        long_about = "Show the field schema for the selected tracker, with display types and option counts.",
        after_help = "EXAMPLES:\n    # Show the schema for tracker 102 in group 101\n    qy --group 101 --tracker 102 fields\n\n    # Emit machine-readable output\n    qy --group 101 --tracker 102 fields --json"
    )]
    Fields,

    #[command(
        next_help_heading = "Discovery",
        about = "List a tracker's saved reports",
        long_about = "List the saved reports defined for the selected tracker.",
        after_help = "EXAMPLES:\n    # List reports for tracker 102 in group 101\n    qy --group 101 --tracker 102 reports\n\n    # Emit machine-readable output\n    qy --group 101 --tracker 102 reports --json"
    )]
    Reports,

    #[command(
        next_help_heading = "Artifacts",
        about = "List artifacts in a tracker",
        long_about = "List artifacts using a saved report's result column layout.",
        after_help = "EXAMPLES:\n    # List with the default report\n    qy --group 101 --tracker 102 list\n\n    # Pick a report and cap the row count\n    qy --group 101 --tracker 102 list --report 100 -n 20\n\n    # Emit machine-readable output\n    qy --group 101 --tracker 102 list --json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        next_help_heading = "Artifacts",
        about = "Show one artifact",
        long_about = "Show full details for one artifact: record fields, follow-ups, attached files, CC entries, dependencies, and change history.",
        after_help = "EXAMPLES:\n    # Show an artifact\n    qy --group 101 --tracker 102 show 1807\n\n    # Emit machine-readable output\n    qy --group 101 --tracker 102 show 1807 --json"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        next_help_heading = "Mutation",
        about = "Update an artifact's record",
        long_about = "Fetch the artifact, apply the given overrides, and send the full record back.",
        after_help = "EXAMPLES:\n    # Change status and severity\n    qy update 1807 --status 2 --severity 5\n\n    # Close with a final summary\n    qy update 1807 --close --summary \"Fixed in r1024\"\n\n    # Set a non-standard field\n    qy update 1807 --field platform=3"
    )]
    Update(cmd::update::UpdateArgs),

    #[command(
        next_help_heading = "Mutation",
        about = "Add a follow-up comment",
        long_about = "Append a follow-up comment to an artifact's discussion.",
        after_help = "EXAMPLES:\n    # Comment on an artifact\n    qy comment 1807 \"Reproduced on the 2.4 branch\"\n\n    # Use a service-defined comment type\n    qy comment 1807 \"Triaged\" --comment-type 3"
    )]
    Comment(cmd::comment::CommentArgs),

    #[command(
        next_help_heading = "Mutation",
        about = "Upload a file attachment",
        long_about = "Upload a local file and attach it to an artifact.",
        after_help = "EXAMPLES:\n    # Attach a log file\n    qy attach 1807 trace.log\n\n    # Attach with a description and MIME type\n    qy attach 1807 shot.png --description \"crash dialog\" --filetype image/png"
    )]
    Attach(cmd::attach::AttachArgs),

    #[command(
        next_help_heading = "Mutation",
        about = "Delete a file attachment",
        long_about = "Delete an attached file from an artifact by file id.",
        after_help = "EXAMPLES:\n    # Detach file 801\n    qy detach 1807 801"
    )]
    Detach(cmd::attach::DetachArgs),

    #[command(
        next_help_heading = "Mutation",
        about = "Manage the CC list",
        long_about = "Add or remove email addresses on an artifact's notification list.",
        after_help = "EXAMPLES:\n    # Add two addresses\n    qy cc add 1807 a@example.net b@example.net\n\n    # Remove entry 77\n    qy cc remove 1807 77"
    )]
    Cc(cmd::cc::CcArgs),

    #[command(
        next_help_heading = "Mutation",
        about = "Manage artifact dependencies",
        long_about = "Declare or drop dependencies between artifacts.",
        after_help = "EXAMPLES:\n    # 1807 depends on 1650 and 1651\n    qy dep add 1807 1650 1651\n\n    # Drop the dependency on 1650\n    qy dep remove 1807 1650"
    )]
    Dep(cmd::dep::DepArgs),

    #[command(
        next_help_heading = "Shell Integration",
        about = "Generate shell completion scripts",
        long_about = "Generate shell completion scripts for supported shells.",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    qy completions bash\n\n    # Generate zsh completions\n    qy completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("QUARRY_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "quarry=debug,info"
        } else {
            "quarry=info,warn"
        })
    });

    let format = env::var("QUARRY_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false)).init();
        }
        _ => {
            registry.with(fmt::layer().compact()).init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let config = config::load_user_config().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "user config unreadable, ignoring");
        UserConfig::default()
    });
    let output = resolve_output_mode(cli.json);
    let ctx = CliContext::gather(cli.global_flags(), &config, output);

    match cli.command {
        Commands::Groups => cmd::groups::run_groups(&ctx),
        Commands::Trackers => cmd::trackers::run_trackers(&ctx),
        Commands::Fields => cmd::fields::run_fields(&ctx),
        Commands::Reports => cmd::reports::run_reports(&ctx),
        Commands::List(ref args) => cmd::list::run_list(args, &ctx),
        Commands::Show(ref args) => cmd::show::run_show(args, &ctx),
        Commands::Update(ref args) => cmd::update::run_update(args, &ctx),
        Commands::Comment(ref args) => cmd::comment::run_comment(args, &ctx),
        Commands::Attach(ref args) => cmd::attach::run_attach(args, &ctx),
        Commands::Detach(ref args) => cmd::attach::run_detach(args, &ctx),
        Commands::Cc(ref args) => cmd::cc::run_cc(args, &ctx),
        Commands::Dep(ref args) => cmd::dep::run_dep(args, &ctx),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}
