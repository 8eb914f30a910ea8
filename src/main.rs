//! resposta CLI: question-answering assistant.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use resposta::classify::classify;
use resposta::config::AssistantConfig;
use resposta::fetch::HttpFetcher;
use resposta::paths::AppPaths;
use resposta::record::{QuestionForms, Record};
use resposta::resolver::{Assistant, Resolution};
use resposta::session::{ChatSession, Speaker};
use resposta::store::{AnswerStore, open_store};

#[derive(Parser)]
#[command(name = "resposta", version, about = "Question-answering assistant")]
struct Cli {
    /// Config file (defaults to $XDG_CONFIG_HOME/resposta/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Answer database file. Overrides the config.
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Remote answer database URL (GET to read, PUT to write). Overrides the config.
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a single question.
    Ask {
        /// The question.
        #[arg(required = true)]
        question: Vec<String>,

        /// Answer to store if the assistant does not know.
        #[arg(long)]
        teach: Option<String>,
    },

    /// Interactive chat. `/limpar` clears the history, `/sair` quits.
    Chat,

    /// Show which intent a question is routed to.
    Classify {
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Inspect or extend the answer database.
    Records {
        #[command(subcommand)]
        action: RecordAction,
    },

    /// Manage the config file.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum RecordAction {
    /// List all stored records.
    List,
    /// Append a record.
    Add {
        /// A phrasing of the question (repeatable).
        #[arg(long = "question", required = true)]
        questions: Vec<String>,
        /// The answer.
        #[arg(long)]
        answer: String,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a config file with all defaults.
    Init,
    /// Print the effective config.
    Show,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let paths = AppPaths::resolve()?;
    let config_path = cli.config.clone().unwrap_or_else(|| paths.config_file());
    let mut config = AssistantConfig::load_or_default(&config_path)?;
    if let Some(path) = cli.database {
        config.store.path = Some(path);
        config.store.url = None;
    }
    if let Some(url) = cli.database_url {
        config.store.url = Some(url);
    }

    match cli.command {
        Commands::Ask { question, teach } => {
            let assistant = build_assistant(config, &paths);
            let question = question.join(" ");
            let question = question.trim();
            if question.is_empty() {
                miette::bail!("empty question");
            }
            let answer = match assistant.resolve(question) {
                Resolution::Answered(answer) => answer,
                Resolution::Unresolved(pending) => assistant.complete(pending, teach.as_deref()),
            };
            println!("{}", answer.text);
        }

        Commands::Chat => {
            let assistant = build_assistant(config, &paths);
            run_chat(&assistant).into_diagnostic()?;
        }

        Commands::Classify { text } => {
            println!("{}", classify(&text.join(" ")));
        }

        Commands::Records { action } => {
            let store = open_store(&config.store, &paths.database_file(), config.http.timeout());
            match action {
                RecordAction::List => {
                    let records = store.fetch_all()?;
                    if records.is_empty() {
                        println!("No records in {}.", store.describe());
                    } else {
                        println!("Records ({}) in {}:", records.len(), store.describe());
                        for (i, record) in records.iter().enumerate() {
                            println!("  {}. {}", i + 1, format_questions(&record.questions));
                            println!("     -> {}", record.answer);
                        }
                    }
                }
                RecordAction::Add { questions, answer } => {
                    store.append_and_persist(Record::new(questions, answer))?;
                    println!("Added record to {}.", store.describe());
                }
            }
        }

        Commands::Config { action } => match action {
            ConfigAction::Init => {
                if config_path.exists() {
                    miette::bail!("config already exists at {}", config_path.display());
                }
                paths.ensure_dirs()?;
                AssistantConfig::default().save(&config_path)?;
                println!("Wrote default config to {}", config_path.display());
            }
            ConfigAction::Show => {
                let toml = toml::to_string_pretty(&config).into_diagnostic()?;
                println!("# {}", config_path.display());
                print!("{toml}");
            }
        },
    }

    Ok(())
}

fn build_assistant(config: AssistantConfig, paths: &AppPaths) -> Assistant {
    let store = open_store(&config.store, &paths.database_file(), config.http.timeout());
    let fetcher = HttpFetcher::new(&config.http);
    Assistant::new(config, store, Box::new(fetcher))
}

/// Slash commands understood by `chat`, at any prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChatCommand {
    Quit,
    Clear,
}

fn chat_command(line: &str) -> Option<ChatCommand> {
    match line.trim() {
        "/sair" => Some(ChatCommand::Quit),
        "/limpar" => Some(ChatCommand::Clear),
        _ => None,
    }
}

/// Split the line typed at the correction prompt into the taught answer and
/// a command. A command declines the correction.
fn read_correction(line: Option<&str>) -> (Option<&str>, Option<ChatCommand>) {
    match line {
        Some(line) => match chat_command(line) {
            Some(command) => (None, Some(command)),
            None => (Some(line.trim()), None),
        },
        None => (None, None),
    }
}

fn run_chat(assistant: &Assistant) -> std::io::Result<()> {
    let mut session = ChatSession::new(assistant);
    session.warm_up();

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = std::io::stdout();

    println!("Assistente pronto. /limpar limpa o histórico, /sair encerra.");
    loop {
        print!("{}: ", Speaker::User.label());
        stdout.flush()?;

        let Some(line) = lines.next().transpose()? else {
            break;
        };

        let mut command = chat_command(&line);
        if command.is_none() {
            let answer = match session.send(&line) {
                None => continue,
                Some(Resolution::Answered(answer)) => answer,
                Some(Resolution::Unresolved(pending)) => {
                    println!("{}: {}", Speaker::Assistant.label(), pending.prompt());
                    print!("{}: ", Speaker::User.label());
                    stdout.flush()?;
                    let reply = lines.next().transpose()?;
                    let (correction, after) = read_correction(reply.as_deref());
                    command = after;
                    session.correct(pending, correction)
                }
            };
            println!("{}: {}", Speaker::Assistant.label(), answer.text);
        }

        match command {
            Some(ChatCommand::Quit) => break,
            Some(ChatCommand::Clear) => {
                session.clear();
                println!("Histórico limpo.");
            }
            None => {}
        }
    }
    Ok(())
}

fn format_questions(questions: &QuestionForms) -> String {
    questions
        .iter()
        .map(|q| format!("\"{q}\""))
        .collect::<Vec<_>>()
        .join(" | ")
}
