use std::process;

fn main() {
    finance_tracker::init();
    if let Err(err) = finance_tracker::cli::run_cli() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
