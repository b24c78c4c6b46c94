//! REPL input parsing.

use kipi_common::OutputMode;

pub const HELP: &str = "\
Commands:
  /model <name>          switch model
  /temperature <0-2>     set creativity
  /max-tokens <100-2000> set reply length limit
  /mode <incremental|batch>
  /key <api key>         use a key for this session
  /stats                 show conversation statistics
  /clear                 reset the conversation
  /export [name]         save the transcript
  /config                show the active settings
  /help                  show this help
  /quit                  exit
Anything else is sent to the model.";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Chat(String),
    Model(String),
    Temperature(f64),
    MaxTokens(u32),
    Mode(OutputMode),
    Key(String),
    Stats,
    Clear,
    Export(Option<String>),
    Config,
    Help,
    Quit,
    Empty,
}

/// Parse one line of REPL input.
pub fn parse(line: &str) -> Result<Command, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(Command::Empty);
    }

    let Some(rest) = trimmed.strip_prefix('/') else {
        return Ok(Command::Chat(trimmed.to_string()));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match name.to_ascii_lowercase().as_str() {
        "model" => required(arg, "/model <name>").map(|a| Command::Model(a.to_string())),
        "temperature" | "temp" => required(arg, "/temperature <0-2>")?
            .parse::<f64>()
            .map(Command::Temperature)
            .map_err(|e| format!("invalid temperature {arg:?}: {e}")),
        "max-tokens" | "max_tokens" => required(arg, "/max-tokens <100-2000>")?
            .parse::<u32>()
            .map(Command::MaxTokens)
            .map_err(|e| format!("invalid token count {arg:?}: {e}")),
        "mode" => required(arg, "/mode <incremental|batch>")?
            .parse::<OutputMode>()
            .map(Command::Mode),
        "key" => required(arg, "/key <api key>").map(|a| Command::Key(a.to_string())),
        "stats" => Ok(Command::Stats),
        "clear" => Ok(Command::Clear),
        "export" | "save" => Ok(Command::Export(
            (!arg.is_empty()).then(|| arg.to_string()),
        )),
        "config" => Ok(Command::Config),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command /{other} (try /help)")),
    }
}

fn required<'a>(arg: &'a str, usage: &str) -> Result<&'a str, String> {
    if arg.is_empty() {
        Err(format!("usage: {usage}"))
    } else {
        Ok(arg)
    }
}
