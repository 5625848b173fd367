use std::path::PathBuf;

/// One line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Query(String),
    Upload(PathBuf),
    ListDocuments,
    Stop,
    Reset,
    Help,
    Quit,
    Unknown(String),
}

pub const HELP: &str = "\
commands:
  <text>           ask a question about your documents
  /upload <path>   index a .pdf, .txt or .md file
  /docs            list indexed files
  /stop            stop the current answer
  /reset           start a new conversation
  /quit            exit";

pub fn parse_line(line: &str) -> Command {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix('/') else {
        // Queries go out as typed; blank ones are rejected by the controller.
        return Command::Query(line.to_string());
    };
    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };
    match name {
        "upload" if !arg.is_empty() => Command::Upload(PathBuf::from(arg)),
        "docs" => Command::ListDocuments,
        "stop" => Command::Stop,
        "reset" => Command::Reset,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(trimmed.to_string()),
    }
}
