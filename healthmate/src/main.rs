//! Interactive health and fitness assistant.

use clap::Parser;
use healthmate::repl::{self, HELP, ReplCommand};
use healthmate::{AssistantBuilder, FitnessConfig, Session};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "healthmate", version, about = "Health and fitness assistant")]
struct Cli {
    /// Chat model; overrides HEALTHMATE_MODEL
    #[arg(long)]
    model: Option<String>,

    /// Function-call rounds per question; overrides HEALTHMATE_MAX_TOOL_ROUNDS
    #[arg(long)]
    max_tool_rounds: Option<u32>,

    /// OpenAI-compatible endpoint; overrides OPENAI_BASE_URL
    #[arg(long)]
    base_url: Option<String>,

    /// Ask a single question and exit
    #[arg(long, short)]
    query: Option<String>,
}

#[tokio::main]
async fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = FitnessConfig::from_env()?;
    if let Some(model) = cli.model {
        config = config.with_model(model);
    }
    if let Some(rounds) = cli.max_tool_rounds {
        config = config.with_max_tool_rounds(rounds);
    }
    if let Some(base_url) = cli.base_url {
        config.openai_base_url = Some(base_url);
    }

    let mut session = AssistantBuilder::new(config).build()?;

    if let Some(query) = cli.query {
        let outcome = session.ask(query).await?;
        println!("{}", outcome.text());
        return Ok(());
    }

    repl_loop(&mut session).await
}

async fn repl_loop(session: &mut Session) -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout.write_all(format!("{HELP}\n").as_bytes()).await?;
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let output = match ReplCommand::parse(&line) {
            ReplCommand::Empty => continue,
            ReplCommand::Quit => break,
            ReplCommand::Help => HELP.to_string(),
            ReplCommand::History => repl::render_history(session.history()),
            ReplCommand::Tools => repl::render_tool_schemas(session.tool_schemas())?,
            ReplCommand::Unknown(command) => format!("unknown command {command}; try :help"),
            ReplCommand::Ask(query) => match session.ask(query).await {
                Ok(outcome) => outcome.text().to_string(),
                Err(err) => format!("error: {err}"),
            },
        };

        stdout.write_all(format!("{output}\n").as_bytes()).await?;
    }

    Ok(())
}
