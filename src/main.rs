fn main() {
    if let Err(e) = casino_ledger::app::run(std::env::args()) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
