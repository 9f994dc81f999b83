use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use contactform::{
    commands::{
        interactive,
        submit::{submit, SubmitArgs},
    },
    environment,
};
use contactform_utils::contactform_version;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Command::Completion { shell } = cli.command {
        clap_complete::generate(
            shell,
            &mut Cli::command(),
            env!("CARGO_BIN_NAME"),
            &mut std::io::stdout(),
        );
        return Ok(());
    }

    init_tracing();

    let config = contactform_config::load().context("Failed to load config")?;

    match cli.command {
        Command::Submit(args) => {
            let mut form = environment::contact_form(&config, cli.access_key)?;
            submit(&mut form, args.into()).await?;
        }
        Command::Interactive => {
            let mut form = environment::contact_form(&config, cli.access_key)?;
            interactive::run(
                &mut form,
                tokio::io::BufReader::new(tokio::io::stdin()),
                &mut tokio::io::stdout(),
            )
            .await?;
        }
        Command::CheckConfig { verbose } => {
            verbose.then(|| println!("{config:#?}"));
        }
        Command::Completion { .. } => unreachable!(),
    }

    Ok(())
}

#[derive(Debug, Parser)]
#[command(version = contactform_version())]
struct Cli {
    /// Access key for the form relay, overrides the one from the config file
    #[arg(long, global = true, env = "CONTACTFORM_ACCESS_KEY", hide_env_values = true)]
    access_key: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Send a single message
    #[command(aliases(["send", "s"]))]
    Submit(SubmitArgs),
    /// Fill in the contact form step by step
    #[command(aliases(["i"]))]
    Interactive,
    /// Validate configuration
    CheckConfig {
        /// Print a debug representation of the config
        #[arg(short, long)]
        verbose: bool,
    },
    /// Generate shell completions
    Completion {
        /// The shell to generate completions for
        #[clap(value_enum)]
        shell: Shell,
    },
}

fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    #[cfg(tracing_pretty)]
    let fmt_layer = fmt_layer.pretty();

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(EnvFilter::from_default_env()))
        .init();
}
