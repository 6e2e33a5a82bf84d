//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use sensai_core::config;
use sensai_core::forms::Branch;

mod commands;

#[derive(Parser)]
#[command(name = "sensai")]
#[command(version)]
#[command(about = "Create lesson plans and assessments with SensAI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Run the interactive course creation wizard (default)
    Wizard,

    /// Register a signed-in user with the backend and print the record
    Login(commands::login::LoginArgs),

    /// Submit one form without the wizard
    Generate {
        #[command(subcommand)]
        form: GenerateCommands,
    },

    /// Follow up on an assessment session
    Assessment {
        #[command(subcommand)]
        command: AssessmentCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum GenerateCommands {
    /// Chapter-based lesson plan (teachers)
    Chapter(commands::generate::FieldArgs),
    /// Topic-based lesson plan (teachers)
    Topic(commands::generate::FieldArgs),
    /// Assessment session (students)
    Assessment(commands::generate::FieldArgs),
}

impl GenerateCommands {
    fn into_parts(self) -> (Branch, commands::generate::FieldArgs) {
        match self {
            GenerateCommands::Chapter(args) => (Branch::ChapterLessonPlan, args),
            GenerateCommands::Topic(args) => (Branch::TopicLessonPlan, args),
            GenerateCommands::Assessment(args) => (Branch::Assessment, args),
        }
    }
}

#[derive(clap::Subcommand)]
enum AssessmentCommands {
    /// Send a message to an assessment session
    Continue {
        /// Session thread ID
        #[arg(long, value_name = "ID")]
        thread_id: String,
        /// Message to send
        #[arg(short, long)]
        message: String,
    },
    /// Show the status of an assessment session
    Status {
        /// Session thread ID
        #[arg(value_name = "THREAD_ID")]
        thread_id: String,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = config::Config::load().context("load config")?;

    // default to the wizard
    let Some(command) = cli.command else {
        return commands::wizard::run(&config).await;
    };

    match command {
        Commands::Wizard => commands::wizard::run(&config).await,
        Commands::Login(args) => commands::login::run(&config, args).await,
        Commands::Generate { form } => {
            let (branch, args) = form.into_parts();
            commands::generate::run(&config, branch, args).await
        }
        Commands::Assessment { command } => match command {
            AssessmentCommands::Continue { thread_id, message } => {
                commands::assessment::continue_session(&config, &thread_id, &message).await
            }
            AssessmentCommands::Status { thread_id } => {
                commands::assessment::status(&config, &thread_id).await
            }
        },
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
