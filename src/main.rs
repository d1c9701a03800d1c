use clap::Parser;
use todo::cli::commands::Cli;
use todo::cli::handlers;

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("todo=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
