use clap::Parser;
use std::process::ExitCode;
use tfnz_install::tracing_err;
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = tfnz_install::Args::parse();

    tfnz_install::init_logging();

    let report = match try_main(args).await {
        Ok(report) => report,
        Err(err) => {
            error!(err = tracing_err(&err), "Exiting with an error...");
            return ExitCode::FAILURE;
        }
    };

    if report.is_success() {
        return ExitCode::SUCCESS;
    }

    error!("{report}");

    ExitCode::FAILURE
}

async fn try_main(args: tfnz_install::Args) -> tfnz_install::Result<tfnz_install::InstallReport> {
    let mut config = tfnz_install::Config::from_env()?;
    args.apply(&mut config);
    tfnz_install::run(config).await
}
