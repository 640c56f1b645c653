use std::io::{self, Write};
use std::sync::{Arc, Weak};

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use yesno::alert::AlertPresenter;
use yesno::alert::terminal::TerminalAlertPresenter;
use yesno::banner::{SessionStats, print_banner, print_session_summary};
use yesno::commands::{CommandContext, CommandRegistry, CommandResult};
use yesno::config::Config;
use yesno::events::{Event, EventBus};
use yesno::loader::http::HttpLoader;
use yesno::presenter::LoadController;
use yesno::ui;
use yesno::view::View;
use yesno::view::terminal::TerminalView;

#[derive(Parser)]
#[command(name = "yesno", version, about = "Ask, and the oracle will nod.")]
struct Cli {
    /// Oracle API endpoint (overrides YESNO_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Request timeout in seconds (overrides YESNO_TIMEOUT_SECS)
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Open each answer's GIF in the system viewer
    #[arg(long, default_value_t = false)]
    open: bool,

    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    /// Ask once, print the answer and exit (non-interactive)
    #[arg(long, default_value_t = false)]
    once: bool,
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "yesno=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn prompt(view: &TerminalView) -> io::Result<()> {
    print!("\n{}", view.prompt());
    io::stdout().flush()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::from_env()?.with_overrides(cli.api_url, cli.timeout, cli.open)?;
    if !cli.once {
        print_banner(&config);
    }

    let view = Arc::new(TerminalView::new(config.open_content));
    // Without stdin there is nobody to dismiss an alert; don't ask them to.
    let alerts = Arc::new(if cli.once {
        TerminalAlertPresenter::non_interactive()
    } else {
        TerminalAlertPresenter::new()
    });
    let loader = Arc::new(HttpLoader::new(config.api_url.clone(), config.timeout)?);
    let events = Arc::new(EventBus::default());
    let mut bus = events.subscribe();
    let (ui, mut ui_loop) = ui::channel();

    let weak_view: Weak<dyn View> = Arc::downgrade(&view) as Weak<dyn View>;
    let presenter: Arc<dyn AlertPresenter> = alerts.clone();
    let controller = LoadController::with_events(weak_view, loader, presenter, ui, events);

    let commands = CommandRegistry::new();
    let mut stats = SessionStats::default();

    controller.on_appear_load();

    // The main task is the UI context: stdin, UI jobs and events are all
    // handled here, one at a time.
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        tokio::select! {
            _ = ui_loop.run_next() => {}
            event = bus.recv() => match event {
                Ok(Event::LoadStarted) => stats.loads += 1,
                Ok(Event::AnswerChanged { forced, .. }) => {
                    stats.answers += 1;
                    if let Some(answer) = controller.formatted_answer() {
                        view.print_answer(&answer, forced);
                    }
                    if cli.once {
                        break;
                    }
                    prompt(&view)?;
                }
                Ok(Event::LoadFailed { .. }) => {
                    stats.failures += 1;
                    if cli.once {
                        break;
                    }
                }
                Err(RecvError::Lagged(missed)) => warn!(missed, "event listener fell behind"),
                Err(RecvError::Closed) => break,
            },
            line = lines.next_line(), if !cli.once => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        // Ctrl+D (EOF)
                        println!();
                        break;
                    }
                    Err(e) => {
                        eprintln!("input error: {e}");
                        break;
                    }
                };

                if commands.is_quit(&line) {
                    break;
                }

                // Any other input dismisses an open alert, which retries the load.
                if alerts.dismiss_pending() {
                    continue;
                }

                let ctx = CommandContext {
                    controller: &controller,
                    api_url: &config.api_url,
                };
                match commands.dispatch(&line, &ctx).await {
                    CommandResult::Quit => break,
                    CommandResult::Handled => prompt(&view)?,
                    CommandResult::Ask | CommandResult::NotACommand => {
                        if view.action_enabled() {
                            controller.on_user_action();
                        } else {
                            println!("  the oracle is still thinking, hold on");
                        }
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        }
    }

    // Stops the spinner if a load is still running.
    view.set_loading_indicator(false);
    if !cli.once {
        print_session_summary(stats);
    }
    if cli.once && stats.answers == 0 {
        anyhow::bail!("the oracle did not answer");
    }
    Ok(())
}
