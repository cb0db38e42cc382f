use clap::Parser;
use std::process;

use csvclip::commands::{self, Cli};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    match commands::clip::run(cli) {
        Ok(created) => println!("Done! Created {} clip(s).", created),
        Err(err) => {
            eprintln!("{:#}", err);
            process::exit(1);
        }
    }
}
