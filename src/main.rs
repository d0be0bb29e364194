use clap::Parser;
use homeval::cli::{self, Cli};
use homeval::HOMEVAL_LOG;

fn main() -> anyhow::Result<()> {
    let env = env_logger::Env::new().filter_or(HOMEVAL_LOG, "info");
    let mut builder = env_logger::Builder::from_env(env);
    builder.target(env_logger::Target::Stdout).init();

    let args = Cli::parse();
    let report = cli::run(&args)?;
    print!("{report}");
    Ok(())
}
