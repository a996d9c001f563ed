use nftuklas::build_info;
use nftuklas::core::config::EngineConfig;
use nftuklas::core::constants::{LOG_DIR_NAME, LOG_FILE_NAME, TICK_INTERVAL_MS};
use nftuklas::error::SessionError;
use nftuklas::loot::{RngSource, Variant};
use nftuklas::persistence::{save_dir, JsonFileStore};
use nftuklas::session::Session;
use nftuklas::shell::{self, Command};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

struct Options {
    variant: Option<Variant>,
    config_path: Option<PathBuf>,
    fast: bool,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args);

    let _log_guard = init_tracing();

    if let Err(e) = run(options) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn parse_args(args: &[String]) -> Options {
    let mut options = Options {
        variant: None,
        config_path: None,
        fast: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--version" | "-v" => {
                println!("nftuklas {}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("NFTuklas - Prospect for coins and NFTs\n");
                println!("Usage: nftuklas [options]\n");
                println!("Options:");
                println!("  --variant <V>   basic, collector or prospect (default: prospect)");
                println!("  --config <FILE> Load engine settings from a JSON file");
                println!("  --fast          Resolve draws without the prospecting delay");
                println!("  --version       Show version information");
                println!("  --help          Show this help message");
                std::process::exit(0);
            }
            "--variant" => {
                let Some(name) = args.get(i + 1) else {
                    eprintln!("--variant needs a value");
                    std::process::exit(2);
                };
                match Variant::parse(name) {
                    Some(variant) => options.variant = Some(variant),
                    None => {
                        eprintln!("Unknown variant: {}", name);
                        std::process::exit(2);
                    }
                }
                i += 1;
            }
            "--config" => {
                let Some(path) = args.get(i + 1) else {
                    eprintln!("--config needs a file path");
                    std::process::exit(2);
                };
                options.config_path = Some(PathBuf::from(path));
                i += 1;
            }
            "--fast" => options.fast = true,
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Run 'nftuklas --help' for usage.");
                std::process::exit(1);
            }
        }
        i += 1;
    }
    options
}

/// Log to ~/.nftuklas/logs so log lines never interleave with the prompt.
fn init_tracing() -> Option<WorkerGuard> {
    let log_dir = save_dir().ok()?.join(LOG_DIR_NAME);
    std::fs::create_dir_all(&log_dir).ok()?;

    let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter =
        EnvFilter::try_from_env("NFTUKLAS_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok()?;
    Some(guard)
}

fn run(options: Options) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &options.config_path {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(variant) = options.variant {
        config.variant = variant;
    }
    if options.fast {
        config.draw_delay_secs = 0.0;
    }

    let store = JsonFileStore::open_default()?;
    let mut session = Session::open(config, store)?;
    let mut rng = RngSource::thread();

    println!(
        "NFTuklas ({} variant). Type 'help' for commands.",
        session.config().variant.name()
    );
    println!("{}", shell::render_status(&session.snapshot()));
    prompt();

    // Stdin is read on its own thread so the session keeps ticking.
    let (tx, rx) = mpsc::channel::<String>();
    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    let tick_interval = Duration::from_millis(TICK_INTERVAL_MS);
    let mut last_tick = Instant::now();

    loop {
        match rx.recv_timeout(tick_interval) {
            Ok(line) => match shell::parse_command(&line) {
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => {
                    handle_command(&mut session, command);
                    prompt();
                }
                Ok(None) => prompt(),
                Err(message) => {
                    println!("{}", message);
                    prompt();
                }
            },
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        if last_tick.elapsed() >= tick_interval {
            let dt = last_tick.elapsed().as_secs_f64();
            last_tick = Instant::now();

            let tick = session.tick(dt, &mut rng);
            if let Some((result, report)) = &tick.draw {
                println!();
                println!("{}", shell::describe_draw(result, report));
                println!("{}", shell::render_status(&session.snapshot()));
                prompt();
            } else if tick.lives_regenerated > 0 {
                println!();
                println!(
                    "+{} life regenerated ({}/{})",
                    tick.lives_regenerated,
                    session.state().lives,
                    session.state().max_lives
                );
                prompt();
            }
        }
    }

    tracing::info!(session = %session.state().session_id, "shell exited");
    Ok(())
}

fn handle_command(session: &mut Session<JsonFileStore>, command: Command) {
    match command {
        Command::Connect => {
            if session.is_connected() {
                println!("Wallet already connected.");
            } else {
                session.connect();
                println!("Wallet connected. Happy prospecting!");
            }
        }
        Command::Prospect => match session.start_draw() {
            Ok(()) => {
                if session.is_draw_pending() && session.config().draw_delay_secs > 0.0 {
                    println!("Prospecting...");
                }
            }
            Err(e) => println!("{}", e),
        },
        Command::Cashout => match session.cashout() {
            Ok(0) => println!("Nothing to cash out."),
            Ok(amount) => println!(
                "Banked {} coins. Total: {}",
                amount,
                session.state().banked_currency
            ),
            Err(SessionError::RunMechanicDisabled) => {
                println!("Coins go straight to your balance in this variant.")
            }
            Err(e) => println!("{}", e),
        },
        Command::Buy(amount) => {
            let was_unlimited = session.state().unlimited_lives;
            let added = session.buy_lives(amount);
            if session.state().unlimited_lives && !was_unlimited {
                println!("Unlimited lives unlocked!");
            } else if added == 0 {
                println!("Lives are already full.");
            } else {
                println!(
                    "+{} lives ({}/{})",
                    added,
                    session.state().lives,
                    session.state().max_lives
                );
            }
        }
        Command::Status => println!("{}", shell::render_status(&session.snapshot())),
        Command::Collection => println!("{}", shell::render_collection(&session.snapshot())),
        Command::History => println!("{}", shell::render_history(&session.snapshot())),
        Command::Reset => {
            session.reset();
            println!("Progress wiped.");
            println!("{}", shell::render_status(&session.snapshot()));
        }
        Command::Help => println!("{}", shell::HELP_TEXT),
        Command::Quit => {}
    }
}

fn prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}
