mod clipboard;
mod command;
mod feedback;
mod render;
mod session;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use workprompt_common::{logger, AppConfig, WorkPromptError};
use workprompt_prompt::{RoleCatalog, RoleKey, SelectionStore};

use crate::clipboard::Clipboard;
use crate::feedback::CopyFeedback;
use crate::render::RenderRequest;
use crate::session::Session;

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    if let Some(root) = find_project_root() {
        let env_path = root.join(".env");
        if env_path.exists() {
            dotenv::from_path(&env_path).ok();
        }
    } else {
        dotenv::dotenv().ok();
    }
}

#[derive(Parser)]
#[command(name = "workprompt")]
#[command(about = "workprompt - role-based work prompt builder", long_about = None)]
struct Cli {
    /// JSON catalog replacing the built-in roles
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a prompt interactively
    Interactive {
        /// Role to start with
        #[arg(long)]
        role: Option<RoleKey>,

        /// Print the prompt after every change
        #[arg(long)]
        echo: bool,
    },

    /// Print a prompt built from flags
    Render {
        #[arg(long)]
        role: Option<RoleKey>,

        /// Task text (blank uses the role's example)
        #[arg(long, default_value = "")]
        task: String,

        /// Select a point (repeatable)
        #[arg(long = "point", value_name = "ID")]
        points: Vec<String>,

        /// Start with no points selected instead of the recommended ones
        #[arg(long)]
        no_defaults: bool,

        /// Select every point
        #[arg(long)]
        all: bool,

        /// Attach a detail to a point (repeatable)
        #[arg(long = "detail", value_name = "ID=VALUE")]
        details: Vec<String>,

        /// Replace a point's instruction text (repeatable)
        #[arg(long = "instruction", value_name = "ID=TEXT")]
        instructions: Vec<String>,

        /// Also copy the prompt to the clipboard
        #[arg(long)]
        copy: bool,

        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List roles and their points
    Roles {
        /// Only this role
        #[arg(long)]
        role: Option<RoleKey>,

        /// Dump the catalog as JSON (loadable with --catalog)
        #[arg(long)]
        json: bool,
    },
}

fn load_catalog(config: &AppConfig) -> Result<RoleCatalog> {
    Ok(match &config.catalog_path {
        Some(path) => RoleCatalog::from_json_file(path)?,
        None => RoleCatalog::builtin(),
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        let code = e
            .downcast_ref::<WorkPromptError>()
            .map_or(1, WorkPromptError::exit_code);
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> Result<()> {
    load_dotenv_from_project_root();

    let mut config = AppConfig::from_env()?;
    if let Some(path) = cli.catalog {
        config.catalog_path = Some(path);
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    config.validate()?;

    match &config.log_dir {
        Some(dir) => logger::setup_logging(dir, &config.log_level)?,
        None => logger::setup_console_logging(&config.log_level)?,
    }

    let catalog = load_catalog(&config)?;
    let default_role: RoleKey = config.default_role.parse()?;
    let clipboard = || Clipboard::system(config.clipboard_program());

    match cli.command.unwrap_or(Commands::Interactive { role: None, echo: false }) {
        Commands::Interactive { role, echo } => {
            let store = SelectionStore::new(catalog, role.unwrap_or(default_role));
            tracing::info!("Interactive session starting: role={}", store.active_key());

            let mut session = Session::new(
                store,
                clipboard(),
                CopyFeedback::new(config.copy_feedback()),
                echo,
            );
            session.run(tokio::io::stdin(), tokio::io::stdout()).await?;
            tracing::info!("Session closed: role={}", session.store().active_key());
        }
        Commands::Render {
            role,
            task,
            points,
            no_defaults,
            all,
            details,
            instructions,
            copy,
            format,
        } => {
            let request = RenderRequest {
                role: role.unwrap_or(default_role),
                task,
                points,
                no_defaults,
                all,
                details: render::parse_pairs(&details)?,
                instructions: render::parse_pairs(&instructions)?,
            };
            let store = request.build(catalog);
            let prompt = store.compose();

            let output = match format {
                OutputFormat::Text => prompt.clone(),
                OutputFormat::Json => render::to_json(&store, &prompt)?,
            };
            let clipboard = copy.then(clipboard);
            let outcome = render::emit(
                &output,
                &prompt,
                clipboard.as_ref(),
                &mut std::io::stdout().lock(),
                &mut std::io::stderr(),
            )?;
            if let Some(outcome) = outcome {
                tracing::info!(?outcome, "render copy");
            }
        }
        Commands::Roles { role, json } => {
            if json {
                println!("{}", catalog.to_json_pretty()?);
            } else {
                println!("{}", render::roles_listing(&catalog, role));
            }
        }
    }

    Ok(())
}
