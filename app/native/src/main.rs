//! Bento - command-line driver for the grid layout engine.

fn main() {
    if let Err(err) = bento_lib::cli::run() {
        eprintln!("bento: {err}");
        std::process::exit(1);
    }
}
