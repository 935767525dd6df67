use holidaze::command;
use holidaze::core::cli::CliPaths;
use std::io;

fn main() {
    let paths = match CliPaths::from_env() {
        Ok(paths) => paths,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    if let Err(err) = command::run(&paths, &mut input) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
