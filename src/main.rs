use anyhow::{Context, Result};
use autotyper::config::parse_duration;
use autotyper::{Config, Engine, ExecutorKind, Shell, input};
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const EXAMPLES: &str = "\
Examples:
  autotyper -i commands.txt
  autotyper -i commands.txt --char-delay 25
  autotyper -i commands.txt --shell cmd
  autotyper -i commands.txt --no-cls
  autotyper -i commands.txt --pre-delay 250ms --post-delay 2s
  autotyper -i commands.txt -u demo -H laptop -p /home/demo -s bash
  autotyper ping one.one.one.one
  cat commands.txt | autotyper";

#[derive(Parser, Debug)]
#[command(
    name = "autotyper",
    about = "Simulate a person typing commands into a terminal",
    long_about = "Simulate a person typing commands into a terminal.\n\n\
        Each command is typed character by character after a simulated shell \
        prompt, then executed, which makes for reproducible recorded demos of \
        command-line tools.",
    after_help = EXAMPLES,
    version
)]
struct Cli {
    /// File with one command per line
    #[arg(short, long)]
    input_file: Option<PathBuf>,

    /// Delay between typed characters (`75`, `75ms`, `0.1s`) [default: 75ms]
    #[arg(short, long, value_parser = parse_duration)]
    char_delay: Option<Duration>,

    /// Random extra delay per character, up to this much [default: 0]
    #[arg(long, value_parser = parse_duration)]
    char_jitter: Option<Duration>,

    /// Delay before typing each command [default: 500ms]
    #[arg(short = 'd', long, value_parser = parse_duration)]
    pre_delay: Option<Duration>,

    /// Delay after each command [default: 3500ms]
    #[arg(short = 'D', long, value_parser = parse_duration)]
    post_delay: Option<Duration>,

    /// Prompt to simulate: bash, cmd or ps [default: ps]
    #[arg(short, long)]
    shell: Option<Shell>,

    /// Username shown in the bash prompt
    #[arg(short, long)]
    username: Option<String>,

    /// Hostname shown in the bash prompt
    #[arg(short = 'H', long)]
    hostname: Option<String>,

    /// Path shown in the prompt [default: C:\ for ps/cmd, ~ for bash]
    #[arg(short, long)]
    path: Option<String>,

    /// Do not clear the screen between commands
    #[arg(short, long)]
    no_cls: bool,

    /// How to run commands: pty or pipe [default: pty]
    #[arg(long)]
    executor: Option<ExecutorKind>,

    /// Config file [default: ~/.autotyper.yaml]
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Command to type and run, when no input file or piped input is given
    #[arg(trailing_var_arg = true, value_name = "COMMAND")]
    args: Vec<String>,
}

impl Cli {
    /// Flags win over the config file and environment.
    fn apply_to(&self, config: &mut Config) {
        if let Some(delay) = self.char_delay {
            config.char_delay = delay;
        }
        if let Some(jitter) = self.char_jitter {
            config.char_jitter = jitter;
        }
        if let Some(delay) = self.pre_delay {
            config.pre_delay = delay;
        }
        if let Some(delay) = self.post_delay {
            config.post_delay = delay;
        }
        if let Some(shell) = self.shell {
            config.shell = shell;
        }
        if let Some(username) = &self.username {
            config.username = username.clone();
        }
        if let Some(hostname) = &self.hostname {
            config.hostname = hostname.clone();
        }
        if let Some(path) = &self.path {
            config.path = path.clone();
        }
        if self.no_cls {
            config.no_cls = true;
        }
        if let Some(executor) = self.executor {
            config.executor = executor;
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (mut config, source) = Config::load(cli.config.as_deref())?;
    if let Some(path) = source {
        warn!(path = %path.display(), "using config file");
    }
    config
        .apply_env()
        .context("Invalid AUTOTYPER_* environment variable")?;
    cli.apply_to(&mut config);
    debug!(?config, "resolved configuration");

    let Some(text) = input::acquire(cli.input_file.as_deref(), &cli.args)? else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let commands = input::split_commands(&text);
    let steps = config.playback().plan(&commands);
    debug!(commands = commands.len(), steps = steps.len(), "starting playback");

    let mut engine = Engine::new(config.executor.build());
    engine.execute(steps).await;

    Ok(())
}
