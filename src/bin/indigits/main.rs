mod args;
mod check;
mod debug;
mod error;
mod init;

use clap::Parser as _;

fn main() {
    human_panic::setup_panic!();
    let result = run();
    proc_exit::exit(result);
}

fn run() -> proc_exit::ExitResult {
    let cli = Cli::parse();

    cli.color.write_global();
    let colored = anstream::AutoStream::choice(&std::io::stderr()) != anstream::ColorChoice::Never;
    args::init_logging(cli.logging.log_level(), colored);

    match cli.command.run() {
        Ok(()) => proc_exit::Code::SUCCESS.ok(),
        Err(err) => {
            log::error!("{err:#}");
            proc_exit::Code::FAILURE.ok()
        }
    }
}

/// Load, check and inspect the In Digits site configuration
#[derive(Debug, clap::Parser)]
#[command(name = "indigits", about, version, propagate_version = true)]
struct Cli {
    #[command(flatten)]
    logging: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,

    #[command(flatten)]
    color: colorchoice_clap::Color,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, PartialEq, Eq, clap::Subcommand)]
enum Command {
    Check(check::CheckArgs),

    Init(init::InitArgs),

    #[command(subcommand)]
    Debug(debug::DebugCommands),
}

impl Command {
    fn run(&self) -> error::Result<()> {
        match self {
            Self::Check(cmd) => cmd.run(),
            Self::Init(cmd) => cmd.run(),
            Self::Debug(cmd) => cmd.run(),
        }
    }
}

#[test]
fn verify_cli() {
    use clap::CommandFactory as _;
    Cli::command().debug_assert();
}
