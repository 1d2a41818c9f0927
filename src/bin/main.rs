use cipher_core::config::EngineConfig;
use cipher_core::logging::init_logging;
use cipher_core::{CipherEngine, Direction, TransformChain};
use crossterm::execute;
use crossterm::cursor::MoveTo;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use std::io::{stdin, stdout, Write};

const DEFAULT_CHAIN: &str = "shifter";

struct Session {
    chain: TransformChain,
    mode: Direction,
    input: String,
    output: String,
    status: Vec<String>,
}

fn main() -> std::io::Result<()> {
    init_logging("warn");

    let config = EngineConfig::load(None).unwrap_or_else(|e| {
        eprintln!("[WARN] Ignoring configuration: {}", e);
        EngineConfig::default()
    });
    let mut engine = CipherEngine::with_config(&config);

    let mut session = Session {
        chain: TransformChain::new([DEFAULT_CHAIN]).map_err(std::io::Error::other)?,
        mode: Direction::Encode,
        input: String::new(),
        output: String::new(),
        status: Vec::new(),
    };

    loop {
        print_ui(&session, &engine)?;
        session.status.clear();

        let mut line = String::new();
        if stdin().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\r', '\n']);

        match split_command(line) {
            ("exit", "") => break,
            (":encode", "") => session.mode = Direction::Encode,
            (":decode", "") => session.mode = Direction::Decode,
            (":list", "") => {
                for id in engine.available() {
                    let description = engine.describe(&id).unwrap_or_default();
                    session.status.push(format!("{:<12} {}", id, description));
                }
            }
            (":chain", ids) => match TransformChain::parse(ids) {
                Ok(chain) => session.chain = chain,
                Err(e) => session.status.push(format!("error: {}", e)),
            },
            (":learn", args) => {
                let parts: Vec<&str> = args.split_whitespace().collect();
                if let [name, original, encoded] = parts.as_slice() {
                    match engine.learn_cipher(name, original, encoded, None) {
                        Ok(cipher) => session
                            .status
                            .push(format!("learned '{}' ({} letters)", cipher.name, cipher.forward().len())),
                        Err(e) => session.status.push(format!("error: {}", e)),
                    }
                    save(&engine, &mut session.status);
                } else {
                    session.status.push("usage: :learn <name> <original> <encoded>".to_string());
                }
            }
            (":forget", name) => {
                if engine.remove_cipher(name).is_some() {
                    session.status.push(format!("forgot '{}'", name));
                    save(&engine, &mut session.status);
                } else {
                    session.status.push(format!("no learned cipher named '{}'", name));
                }
            }
            _ => session.input = line.to_string(),
        }

        session.output = process(&engine, &session).unwrap_or_else(|e| {
            session.status.push(format!("error: {}", e));
            String::new()
        });
    }

    println!("\nSaving learned ciphers...");
    if let Err(e) = engine.save() {
        eprintln!("[ERROR] Could not save ciphers: {}", e);
    } else if let Some(path) = engine.store_path() {
        println!("Ciphers saved to '{}'", path.display());
    }
    Ok(())
}

/// Splits a line into its first word and the trimmed remainder.
fn split_command(line: &str) -> (&str, &str) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    }
}

fn process(engine: &CipherEngine, session: &Session) -> Result<String, cipher_core::CipherError> {
    match session.mode {
        Direction::Encode => engine.encode(&session.input, session.chain.ids()),
        Direction::Decode => engine.decode(&session.input, session.chain.ids()),
    }
}

fn save(engine: &CipherEngine, status: &mut Vec<String>) {
    if let Err(e) = engine.save() {
        status.push(format!("error: could not save ciphers: {}", e));
    }
}

fn print_ui(session: &Session, engine: &CipherEngine) -> std::io::Result<()> {
    let mut out = stdout();
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;

    println!("{}", "decoder - minimal text cipher tool".bold());
    println!("---------------------------------------------------------------");
    println!("Type text to process it. ':encode' / ':decode' switch mode.");
    println!("':chain caesar,reverse' picks ciphers, ':learn <name> <original> <encoded>'");
    println!("teaches one, ':forget <name>' drops it, ':list' describes all. 'exit' saves and quits.\n");

    let ciphers: Vec<String> = engine
        .available()
        .into_iter()
        .map(|id| {
            if session.chain.ids().contains(&id) {
                id.cyan().bold().to_string()
            } else {
                id.dark_grey().to_string()
            }
        })
        .collect();
    println!("Ciphers: {}", ciphers.join(" "));

    let mode = match session.mode {
        Direction::Encode => "encode".green(),
        Direction::Decode => "decode".yellow(),
    };
    println!("Mode:    {}   Chain: {}", mode, session.chain);

    println!("\nInput:  [{}]", session.input);
    println!("Output: [{}]", session.output.clone().bold());

    for line in &session.status {
        println!("  {}", line);
    }
    print!("\n> ");
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_match_whole_words() {
        assert_eq!(split_command(":chain caesar, reverse"), (":chain", "caesar, reverse"));
        assert_eq!(split_command("  :forget   my cipher "), (":forget", "my cipher"));
        assert_eq!(split_command(":chainsaw").0, ":chainsaw");
        assert_eq!(split_command(":forgetful velo"), (":forgetful", "velo"));
        assert_eq!(split_command("exit"), ("exit", ""));
    }
}
