fn main() {
    if let Err(e) = fqcn_cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
