//! Binary entrypoint for fuzzyfont

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(fuzzyfont_cli::LOG_ENV, "warn"),
    )
    .init();

    if let Err(err) = fuzzyfont_cli::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
