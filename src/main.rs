use clap::Parser;

fn main() {
    let cli = envlint::cli::Cli::parse();
    match envlint::cli::run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    }
}
