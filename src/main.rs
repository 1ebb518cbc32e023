use clap::Parser;
use timestamper::cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    timestamper::logging::init_tracing(cli.global_args.debug)?;
    cli.invoke()
}
