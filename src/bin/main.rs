use chatter_core::{Chatter, ChatterConfig};
use crossterm::style::Stylize;
use env_logger::Env;
use log::error;
use std::io::{self, stdin, stdout, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;

fn init_logging() {
    let mut builder = env_logger::Builder::from_env(Env::new().filter_or("CHATTER_LOG", "info"));
    builder.format_timestamp_millis();
    let _ = builder.try_init();
}

fn prompt(out: &mut impl Write) -> io::Result<()> {
    out.write_all(b"> ")?;
    out.flush()
}

fn main() -> ExitCode {
    init_logging();

    let config = match std::env::args().nth(1) {
        Some(path) => match ChatterConfig::load(Path::new(&path)) {
            Ok(config) => config,
            Err(e) => {
                error!("Could not read config {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => ChatterConfig::default(),
    };

    let mut chatter = match Chatter::open(config) {
        Ok(chatter) => chatter,
        Err(e) => {
            error!("Could not open brain: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Chatter. Say '{}: ...' to get a reply.", chatter.config().nickname);
    println!("Commands: :train <file>, :stats [json], :save, :clear, :quit");
    println!("---------------------------------------------------------------");

    let stdin = stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if let Err(e) = prompt(&mut stdout()) {
            error!("Could not write prompt: {}", e);
        }

        let input = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                error!("Could not read input: {}", e);
                break;
            }
            None => break,
        };
        let cmd = input.trim();

        match cmd {
            ":quit" | ":exit" => break,
            ":stats" => {
                for line in chatter.stats_report() {
                    println!("{}", line.cyan());
                }
            }
            ":stats json" => report(chatter.stats_json()),
            ":save" => report(chatter.save().map(|_| "Brain saved.".to_string())),
            ":clear" => {
                chatter.clear();
                println!("{}", "Forgot everything.".yellow());
            }
            s if s.starts_with(":train ") => {
                let file = s[":train ".len()..].trim();
                report(chatter.train(file).map(|n| format!("OM NOM NOM! ({} lines)", n)));
            }
            s => match chatter.hear(s) {
                Ok(Some(reply)) => println!("{}", reply.green()),
                Ok(None) => {}
                Err(e) => println!("{}", format!("[ERROR] {}", e).red()),
            },
        }
    }

    println!("\nSaving brain...");
    match chatter.save() {
        Ok(()) => {
            println!("Brain saved to '{}'", chatter.config().brain_file.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Could not save brain: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn report(result: chatter_core::Result<String>) {
    match result {
        Ok(message) => println!("{}", message.green()),
        Err(e) => println!("{}", format!("[ERROR] {}", e).red()),
    }
}
