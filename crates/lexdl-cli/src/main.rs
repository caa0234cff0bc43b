use lexdl_core::logging;

mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible.
    if let Err(err) = logging::init_logging() {
        eprintln!("lex-dl: logging unavailable: {err}");
    }

    if let Err(err) = Cli::run_from_args().await {
        let code = cli::exit_code(&err);
        // An interrupt exits quietly.
        if code != 130 {
            eprintln!("{err}");
        }
        std::process::exit(code);
    }
}
