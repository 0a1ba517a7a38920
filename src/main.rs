use clap::Parser;

use realitycheck::cli::{Cli, Command, run_calculate};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    realitycheck::logging::init_logger(cli.verbose);

    match cli.command {
        Command::Serve { port, narrative } => {
            if let Err(e) = realitycheck::api::run_http_server(port, narrative.app_state()).await {
                eprintln!("Server error: {e}");
                std::process::exit(1);
            }
        }
        Command::Calculate(args) => {
            let outcome = match run_calculate(&args).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            };
            match serde_json::to_string_pretty(&outcome) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            }
        }
    }
}
