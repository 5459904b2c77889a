use rav_core::logging;

mod cli;

fn main() {
    // Initialize logging as early as possible.
    logging::init();

    match cli::run_from_args() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("rav error: {:#}", err);
            std::process::exit(1);
        }
    }
}
