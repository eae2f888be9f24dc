use anyhow::Context;
use mimalloc_rust::GlobalMiMalloc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::Config,
    console::{Console, HttpTransport, Notifier, StderrNotifier, Transport},
    prompt::{Command, LineBuffer},
};

pub mod catalog;
pub mod config;
pub mod console;
pub mod prompt;

#[global_allocator]
static GLOBAL_MIMALLOC: GlobalMiMalloc = GlobalMiMalloc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movix_console=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env().context("load configuration")?;
    let transport = HttpTransport::new().context("build HTTP client")?;
    let console = Console::new(config.endpoint.clone(), transport, StderrNotifier);
    tracing::info!(endpoint = %config.endpoint, "query console ready");

    println!("{}", catalog::render_all());
    println!("SQL Query Runner ({})", config.endpoint);
    println!("{}", prompt::HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut buffer = LineBuffer::default();

    loop {
        let command = match lines.next_line().await.context("read stdin")? {
            Some(line) => buffer.feed(&line),
            None => {
                if let Some(command) = buffer.finish() {
                    handle(&console, command).await;
                }
                break;
            }
        };

        if let Some(command) = command {
            if !handle(&console, command).await {
                break;
            }
        }
    }

    Ok(())
}

/// Run one command; returns false once the user asked to quit.
async fn handle<T: Transport, N: Notifier>(console: &Console<T, N>, command: Command) -> bool {
    match command {
        Command::Submit(query) => {
            console.set_query(query);
            execute(console).await;
        }
        Command::Example => {
            console.set_query(catalog::SAMPLE_QUERY);
            println!("{}", catalog::SAMPLE_QUERY);
            execute(console).await;
        }
        Command::Overview => println!("{}", catalog::render_overview()),
        Command::Schema(None) => println!("{}", catalog::render_schema()),
        Command::Schema(Some(name)) => match catalog::table(&name) {
            Some(table) => println!("{}", catalog::render_table(table)),
            None => eprintln!("no table named {name}"),
        },
        Command::PlSql => println!("{}", catalog::render_plsql()),
        Command::Help => println!("{}", prompt::HELP),
        Command::Quit => return false,
        Command::Unknown(name) => eprintln!("unknown command {name}, try \\help"),
    }

    true
}

async fn execute<T: Transport, N: Notifier>(console: &Console<T, N>) {
    let (outcome, _) = tokio::join!(console.run(), async {
        if console.is_in_flight() {
            eprintln!("{}", console.label());
        }
    });

    // validation and busy errors leave the result untouched
    if matches!(outcome, Ok(_) | Err(crate::console::Error::Transport(_))) {
        println!("{}", console.result());
    }
}
