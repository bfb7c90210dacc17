use clap::Parser;
use colored::Colorize;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

use cidr_merge::cli::{self, Cli};

/// Initialize log4rs from `log4rs.yml`, falling back to a quiet stderr
/// appender when the file is absent.
fn init_logging() {
    if log4rs::init_file("log4rs.yml", Default::default()).is_ok() {
        return;
    }
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} {h({l})} {t} - {m}{n}",
        )))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn));
    if let Ok(config) = config {
        let _ = log4rs::init_config(config);
    }
}

fn main() {
    // Do as little as possible in main.rs as it can't contain any tests
    init_logging();
    let cli = Cli::parse();
    log::info!("#Start main()");

    match cli::run(cli) {
        Ok(rendered) => {
            if !rendered.is_empty() {
                println!("{rendered}");
            }
        }
        Err(err) => {
            eprintln!("#{}# {}", "ERROR".on_red(), err);
            std::process::exit(1);
        }
    }
}
