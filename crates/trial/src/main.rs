use std::io;
use std::process::ExitCode;

use trial::{logging, run, PrintEngine};
use trial_args::CliConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    logging::init();

    let args: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    let config = CliConfig::default();
    let engine = PrintEngine::stdout();

    let status = run(
        &config,
        &args,
        &engine,
        &mut io::stdout(),
        &mut io::stderr(),
    )
    .await;
    ExitCode::from(status)
}
