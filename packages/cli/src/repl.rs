//! Line commands of the interactive session.
//!
//! Every input line starting with `:` is a command. Anything else is an
//! error, except while pasting, where lines are collected until a line
//! holding a single `.`.

use std::path::PathBuf;
use thiserror::Error;
use wiredit_preview::RenderFormat;

pub const PASTE_TERMINATOR: &str = ".";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Show,
    Status,
    Open(PathBuf),
    Save,
    Rename(String),
    New,
    Undo,
    Redo,
    Format(RenderFormat),
    Refresh,
    Ask(String),
    Copy,
    Bom,
    Export,
    Edit(LineEdit),
    Paste,
    Quit,
}

/// Direct edits to the document, addressed by 1-based line number
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEdit {
    Append(String),
    Insert { line: usize, text: String },
    Replace { line: usize, text: String },
    Delete { line: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplError {
    #[error("Commands start with ':' (try :help)")]
    NotACommand,

    #[error("Unknown command :{0} (try :help)")]
    Unknown(String),

    #[error(":{command} expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("Invalid line number: {0}")]
    InvalidLine(String),

    #[error("Line {line} is out of range (document has {count} lines)")]
    LineOutOfRange { line: usize, count: usize },

    #[error("{0}")]
    Format(String),
}

pub const HELP: &str = "\
:show                 print the document with line numbers
:status               file, dirty flag, history and preview state
:open <path>          load a .yml/.yaml file
:save                 write the document next to the opened file,
                      or into the working directory for a new one
:rename <name>        set the file name used by :save
:new                  start over from the template
:undo / :redo         step through the edit history
:format <svg|png|html> switch the preview format
:refresh              render now
:ask <instruction>    ask the assistant to change the diagram
:copy                 print the document for piping
:bom                  show the bill of materials
:export               write document, diagram and parts list downloads
:append <text>        add a line at the end
:insert <n> <text>    insert a line before line n
:replace <n> <text>   replace line n
:delete <n>           delete line n
:paste                replace the whole document; end with a line holding '.'
:quit                 leave";

pub fn parse(line: &str) -> Result<ReplCommand, ReplError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let rest = line
        .trim_start()
        .strip_prefix(':')
        .ok_or(ReplError::NotACommand)?;

    let (name, raw) = match rest.split_once(char::is_whitespace) {
        Some((name, raw)) => (name, raw.trim_end()),
        None => (rest, ""),
    };
    let arg = raw.trim();

    let command = match name {
        "help" | "h" | "?" => ReplCommand::Help,
        "show" | "p" => ReplCommand::Show,
        "status" => ReplCommand::Status,
        "open" | "o" => ReplCommand::Open(PathBuf::from(required(arg, "open", "a path")?)),
        "save" | "w" => ReplCommand::Save,
        "rename" => ReplCommand::Rename(arg.to_string()),
        "new" => ReplCommand::New,
        "undo" | "u" => ReplCommand::Undo,
        "redo" | "r" => ReplCommand::Redo,
        "format" | "f" => {
            let format = required(arg, "format", "svg, png or html")?
                .parse::<RenderFormat>()
                .map_err(|e| ReplError::Format(e.to_string()))?;
            ReplCommand::Format(format)
        }
        "refresh" => ReplCommand::Refresh,
        "ask" | "a" => ReplCommand::Ask(required(arg, "ask", "an instruction")?.to_string()),
        "copy" => ReplCommand::Copy,
        "bom" => ReplCommand::Bom,
        "export" => ReplCommand::Export,
        "append" => ReplCommand::Edit(LineEdit::Append(raw.to_string())),
        "insert" => {
            let (line, text) = numbered(raw, "insert")?;
            ReplCommand::Edit(LineEdit::Insert { line, text })
        }
        "replace" => {
            let (line, text) = numbered(raw, "replace")?;
            ReplCommand::Edit(LineEdit::Replace { line, text })
        }
        "delete" | "d" => {
            let line = line_number(required(arg, "delete", "a line number")?)?;
            ReplCommand::Edit(LineEdit::Delete { line })
        }
        "paste" => ReplCommand::Paste,
        "quit" | "q" | "exit" => ReplCommand::Quit,
        other => return Err(ReplError::Unknown(other.to_string())),
    };

    Ok(command)
}

fn required<'a>(
    arg: &'a str,
    command: &'static str,
    expected: &'static str,
) -> Result<&'a str, ReplError> {
    if arg.is_empty() {
        Err(ReplError::MissingArgument { command, expected })
    } else {
        Ok(arg)
    }
}

fn line_number(arg: &str) -> Result<usize, ReplError> {
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ReplError::InvalidLine(arg.to_string())),
    }
}

/// `<n> <text>`; the text keeps its inner indentation
fn numbered(raw: &str, command: &'static str) -> Result<(usize, String), ReplError> {
    let arg = required(raw.trim_start(), command, "a line number and text")?;
    let (number, text) = match arg.split_once(' ') {
        Some((number, text)) => (number, text),
        None => (arg, ""),
    };
    Ok((line_number(number)?, text.to_string()))
}

impl LineEdit {
    /// Apply the edit to `text`, returning the new document
    ///
    /// Lines are counted like [`str::lines`] and the document keeps its line
    /// ending, so a CRLF file stays CRLF.
    pub fn apply(&self, text: &str) -> Result<String, ReplError> {
        let ending = if text.contains("\r\n") { "\r\n" } else { "\n" };
        let body = text.strip_suffix(ending).unwrap_or(text);
        let mut lines: Vec<&str> = if body.is_empty() {
            Vec::new()
        } else {
            body.split(ending).collect()
        };
        let count = lines.len();
        let out_of_range = |line: usize| ReplError::LineOutOfRange { line, count };

        match self {
            LineEdit::Append(new) => lines.push(new.as_str()),
            LineEdit::Insert { line, text: new } => {
                if *line > count + 1 {
                    return Err(out_of_range(*line));
                }
                lines.insert(line - 1, new.as_str());
            }
            LineEdit::Replace { line, text: new } => {
                let slot = lines.get_mut(line - 1).ok_or_else(|| out_of_range(*line))?;
                *slot = new.as_str();
            }
            LineEdit::Delete { line } => {
                if *line > count {
                    return Err(out_of_range(*line));
                }
                lines.remove(line - 1);
            }
        }

        let mut result = lines.join(ending);
        if text.ends_with(ending) {
            result.push_str(ending);
        }
        Ok(result)
    }
}
