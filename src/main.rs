use benchmark_to_sheet::cli;
use clap::Parser;

fn main() {
    let args = cli::Args::parse();
    // dispatch has already reported the error through the log
    if cli::dispatch(args).is_err() {
        std::process::exit(1);
    }
}
