use std::time::Duration;

use activity_board::app::{TerminalSurface, TokioTimer};
use activity_board::client::NoWasmClient;
use activity_board::config::DEFAULT_BASE_URL;
use activity_board::interface::HttpClient;
use activity_board::{App, ClientConfig, RenderOutcome, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Browse activities, sign up, and manage rosters from the terminal.
#[derive(Debug, Parser)]
#[command(name = "activity-board", version)]
struct Cli {
    /// Origin serving the activities API
    #[arg(long, env = "ACTIVITY_BOARD_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Seconds a notice lingers before the command exits
    #[arg(long, default_value_t = 0)]
    notice_timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every activity with its roster
    List,
    /// Sign up an email for an activity
    Signup {
        #[arg(long)]
        activity: String,
        #[arg(long)]
        email: String,
    },
    /// Remove a participant from an activity
    Unregister {
        #[arg(long)]
        activity: String,
        #[arg(long)]
        email: String,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = ClientConfig::new(&cli.base_url)?
        .with_notice_timeout(Duration::from_secs(cli.notice_timeout_secs));
    let client = NoWasmClient::new(&config).await?;
    let app = App::new(client, TerminalSurface::stdout(), TokioTimer, config);

    let succeeded = match cli.command {
        Command::List => !matches!(app.load_and_render().await, RenderOutcome::Failed),
        Command::Signup { activity, email } => {
            let notice = app.signup(&activity, &email).await;
            notice.kind == activity_board::notice::NoticeKind::Success
        }
        Command::Unregister { activity, email } => app.unregister(&activity, &email).await,
    };

    if !succeeded {
        std::process::exit(1);
    }

    Ok(())
}
