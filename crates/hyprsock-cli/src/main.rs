//! hyprsock CLI
//!
//! Sends commands, dispatchers and queries to Hyprland and streams its
//! events as JSON lines.

use std::future::Future;
use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use hyprsock::events::EventReceiver;
use hyprsock::{CommandChannel, CommandOptions, Dispatch, EventKind, EventListener, SocketConfig};
use hyprsock_config::{Config, SocketSettings};
use miette::IntoDiagnostic;
use serde_json::Value;
use tokio_stream::{StreamExt, StreamMap};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hyprsock")]
#[command(about = "Talk to Hyprland over its IPC sockets")]
#[command(version)]
struct Cli {
    /// Path to configuration file [default: ~/.config/hyprsock/config.kdl]
    #[arg(short, long, value_name = "PATH")]
    config: Option<String>,

    /// Instance signature to use instead of $HYPRLAND_INSTANCE_SIGNATURE
    #[arg(long, global = true)]
    instance: Option<String>,

    /// Directory holding the per-instance socket directories
    #[arg(long, global = true)]
    runtime_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate the configuration file
    Validate,

    /// Send a raw command and print the reply
    Send {
        /// Command text, e.g. "dispatch workspace 2"
        command: String,

        /// Request JSON output (implies --skip-ok)
        #[arg(long)]
        json: bool,

        /// Print any reply instead of requiring "ok"
        #[arg(long)]
        skip_ok: bool,

        /// Write the command exactly as given, without the "/" prefix
        #[arg(long, conflicts_with_all = ["json", "skip_ok"])]
        raw: bool,
    },

    /// Run a dispatcher
    Dispatch {
        /// Dispatcher name, e.g. "workspace"
        name: String,

        /// Dispatcher argument, joined with spaces
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Print a query result as JSON
    Query {
        what: QueryKind,

        /// Option name for `query option`, e.g. general:border_size
        #[arg(long)]
        option: Option<String>,
    },

    /// Print events as JSON lines until interrupted
    Listen {
        /// Only print these event kinds (repeatable); default is all
        #[arg(short, long = "kind", value_name = "KIND")]
        kinds: Vec<EventKind>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum QueryKind {
    Version,
    Monitors,
    Workspaces,
    ActiveWorkspace,
    Clients,
    ActiveWindow,
    Binds,
    Layers,
    Splash,
    #[value(name = "option")]
    GetOption,
    CursorPos,
    Animations,
    Instances,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    let config_path = config_path(&cli);

    // Config warnings are printed before the configured level is known
    let config = tracing::subscriber::with_default(
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::WARN)
            .finish(),
        || hyprsock_config::load_or_default(&config_path),
    )?;

    // Initialize tracing; RUST_LOG wins over the config file
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.global.log_level.as_str())),
        )
        .init();

    let socket = socket_config(&cli, &config.socket);
    tracing::debug!(?socket, "Resolved socket configuration");

    match cli.command {
        Commands::Validate => cmd_validate(&config_path, &config),
        Commands::Send {
            command,
            json,
            skip_ok,
            raw,
        } => cmd_send(socket, &command, json, skip_ok, raw).await,
        Commands::Dispatch { name, args } => cmd_dispatch(socket, name, args).await,
        Commands::Query { what, option } => cmd_query(socket, what, option).await,
        Commands::Listen { kinds } => cmd_listen(socket, kinds).await,
    }
}

/// `--config` with the tilde expanded, or the default location
fn config_path(cli: &Cli) -> PathBuf {
    match &cli.config {
        Some(path) => shellexpand::tilde(path).into_owned().into(),
        None => hyprsock_config::default_config_path(),
    }
}

/// Command-line flags override the config file
fn socket_config(cli: &Cli, settings: &SocketSettings) -> SocketConfig {
    let runtime_dir = cli
        .runtime_dir
        .clone()
        .unwrap_or_else(|| settings.runtime_dir.clone());
    let config = SocketConfig::default().with_runtime_dir(runtime_dir);

    match cli.instance.as_ref().or(settings.instance_signature.as_ref()) {
        Some(signature) => config.with_signature(signature.as_str()),
        None => config,
    }
}

fn cmd_validate(config_path: &PathBuf, config: &Config) -> miette::Result<()> {
    if !config_path.exists() {
        println!("No configuration at {}, defaults apply", config_path.display());
        return Ok(());
    }

    println!("Configuration is valid!");
    println!("  Log level: {}", config.global.log_level);
    println!("  Runtime dir: {}", config.socket.runtime_dir.display());
    println!(
        "  Instance: {}",
        config
            .socket
            .instance_signature
            .as_deref()
            .unwrap_or("<from environment>")
    );
    Ok(())
}

async fn cmd_send(
    socket: SocketConfig,
    command: &str,
    json: bool,
    skip_ok: bool,
    raw: bool,
) -> miette::Result<()> {
    let channel = CommandChannel::new(socket);
    if raw {
        let reply = channel.send_raw(command).await.into_diagnostic()?;
        println!("{}", reply);
        return Ok(());
    }

    let options = if json {
        CommandOptions::json()
    } else {
        CommandOptions {
            flag: None,
            skip_ok,
        }
    };

    let reply = channel.send_command(command, options).await.into_diagnostic()?;
    println!("{}", reply);
    Ok(())
}

async fn cmd_dispatch(socket: SocketConfig, name: String, args: Vec<String>) -> miette::Result<()> {
    let dispatch = Dispatch::Custom {
        name,
        arg: (!args.is_empty()).then(|| args.join(" ")),
    };

    let channel = CommandChannel::new(socket);
    channel.dispatch(&dispatch).await.into_diagnostic()?;
    tracing::info!("{}", dispatch);
    Ok(())
}

async fn cmd_query(socket: SocketConfig, what: QueryKind, option: Option<String>) -> miette::Result<()> {
    let channel = CommandChannel::new(socket);

    let value = match what {
        QueryKind::Version => to_json(channel.get_version().await),
        QueryKind::Monitors => to_json(channel.get_monitors().await),
        QueryKind::Workspaces => to_json(channel.get_workspaces().await),
        QueryKind::ActiveWorkspace => to_json(channel.get_active_workspace().await),
        QueryKind::Clients => to_json(channel.get_clients().await),
        QueryKind::ActiveWindow => to_json(channel.get_active_window().await),
        QueryKind::Binds => to_json(channel.get_binds().await),
        QueryKind::Layers => to_json(channel.get_layers().await),
        QueryKind::Splash => {
            let splash = channel.get_splash().await.into_diagnostic()?;
            println!("{}", splash);
            return Ok(());
        }
        QueryKind::GetOption => {
            let name = option
                .ok_or_else(|| miette::miette!("`query option` needs --option <NAME>"))?;
            to_json(channel.get_option(&name).await)
        }
        QueryKind::CursorPos => to_json(channel.get_cursor_pos().await),
        QueryKind::Animations => to_json(channel.get_animations().await),
        QueryKind::Instances => to_json(channel.get_instances().await),
    }?;

    println!("{}", serde_json::to_string_pretty(&value).into_diagnostic()?);
    Ok(())
}

fn to_json<T: serde::Serialize>(result: Result<T, hyprsock::HyprError>) -> miette::Result<Value> {
    let value = result.into_diagnostic()?;
    serde_json::to_value(value).into_diagnostic()
}

/// Per-kind buffer for `listen`; bursts larger than this are dropped
const LISTEN_BUFFER: usize = 1024;

async fn cmd_listen(socket: SocketConfig, kinds: Vec<EventKind>) -> miette::Result<()> {
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Cannot watch for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::debug!("Interrupted");
    };

    let printed = print_events(socket, kinds, &mut std::io::stdout(), shutdown).await?;
    tracing::debug!(printed, "Stopped listening");
    Ok(())
}

/// Write each event as a JSON line to `out` until the stream ends or
/// `shutdown` resolves. Returns the number of events written.
async fn print_events<W, S>(
    socket: SocketConfig,
    kinds: Vec<EventKind>,
    out: &mut W,
    shutdown: S,
) -> miette::Result<usize>
where
    W: Write,
    S: Future<Output = ()>,
{
    let kinds = if kinds.is_empty() {
        EventKind::ALL.to_vec()
    } else {
        kinds
    };

    let mut listener = EventListener::new(socket);
    let mut events: StreamMap<EventKind, EventReceiver> = StreamMap::new();
    for kind in kinds {
        let (_id, stream) = listener.registry().channel(kind, LISTEN_BUFFER);
        events.insert(kind, stream);
    }

    listener
        .listen_with(|| tracing::info!("Listening for Hyprland events"))
        .await
        .into_diagnostic()?;

    tokio::pin!(shutdown);
    let mut printed = 0;

    loop {
        tokio::select! {
            biased;

            Some((_kind, event)) = events.next() => {
                write_event(out, &event)?;
                printed += 1;
            }
            result = listener.wait() => {
                result.into_diagnostic()?;
                tracing::info!("Hyprland closed the event stream");

                // The reader is done, so every frame is already queued.
                // Dropping the callbacks drops the senders and ends each
                // stream once its backlog is read.
                listener.registry().clear();
                while let Some((_kind, event)) = events.next().await {
                    write_event(out, &event)?;
                    printed += 1;
                }
                break;
            }
            _ = &mut shutdown => break,
        }
    }

    listener.close();
    Ok(printed)
}

fn write_event<W: Write>(out: &mut W, event: &hyprsock::Event) -> miette::Result<()> {
    let line = serde_json::to_string(event).into_diagnostic()?;
    writeln!(out, "{}", line).into_diagnostic()?;
    out.flush().into_diagnostic()
}
