use std::path::PathBuf;

use gsclog_core::Column;

/// A line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Cancel,
    Dedup(bool),
    Sort(Column),
    /// Open the row with this sequence number in the editor.
    Open(usize),
    Rows,
    Load(LoadTarget),
    Recent,
    SetProgram(String),
    SetArgs(String),
    Settings,
    Status,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadTarget {
    Path(PathBuf),
    /// 1-based index into the recent list as printed by `recent`.
    Recent(usize),
}

pub const HELP: &str = "\
commands:
  start                 import the loaded batch
  cancel                stop the running import
  dedup on|off          show only the first message per text on the next start
  sort <column>         sort by column (index or title); again to reverse
  open <#>              open message # in the editor
  rows                  print the message table
  load <path>|#<n>      load a batch file or entry n of the recent list
  recent                list recently loaded batches
  set program <path>    editor executable
  set args <template>   editor arguments: {0} module, {1} line, {2} column
  settings              show editor settings
  status                show import progress
  quit                  exit";

pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "start" | "s" => Command::Start,
        "cancel" | "c" => Command::Cancel,
        "dedup" => match rest.to_ascii_lowercase().as_str() {
            "on" | "yes" | "true" => Command::Dedup(true),
            "off" | "no" | "false" => Command::Dedup(false),
            _ => return Err("usage: dedup on|off".to_string()),
        },
        "sort" => Column::parse(rest)
            .map(Command::Sort)
            .ok_or_else(|| format!("unknown column {rest:?}; try 0-6 or a title"))?,
        "open" | "o" => rest
            .trim_start_matches('#')
            .parse()
            .map(Command::Open)
            .map_err(|_| "usage: open <#>".to_string())?,
        "rows" | "r" => Command::Rows,
        "load" | "l" => parse_load(rest)?,
        "recent" => Command::Recent,
        "set" => parse_set(rest)?,
        "settings" => Command::Settings,
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        "" => return Err(String::new()),
        other => return Err(format!("unknown command {other:?}; type help")),
    };
    Ok(command)
}

fn parse_load(rest: &str) -> Result<Command, String> {
    if rest.is_empty() {
        return Err("usage: load <path>|#<n>".to_string());
    }
    if let Some(index) = rest.strip_prefix('#') {
        return index
            .parse()
            .ok()
            .filter(|&n| n > 0)
            .map(|n| Command::Load(LoadTarget::Recent(n)))
            .ok_or_else(|| "usage: load #<n>".to_string());
    }
    let path = rest.trim_matches('"');
    Ok(Command::Load(LoadTarget::Path(PathBuf::from(path))))
}

fn parse_set(rest: &str) -> Result<Command, String> {
    let (key, value) = rest
        .split_once(char::is_whitespace)
        .map(|(key, value)| (key, value.trim()))
        .unwrap_or((rest, ""));
    match key.to_ascii_lowercase().as_str() {
        "program" if !value.is_empty() => Ok(Command::SetProgram(value.to_string())),
        "args" if !value.is_empty() => Ok(Command::SetArgs(value.to_string())),
        _ => Err("usage: set program <path> | set args <template>".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_basic_commands() {
        assert_eq!(parse("start"), Ok(Command::Start));
        assert_eq!(parse("  C "), Ok(Command::Cancel));
        assert_eq!(parse("dedup on"), Ok(Command::Dedup(true)));
        assert_eq!(parse("dedup OFF"), Ok(Command::Dedup(false)));
        assert_eq!(parse("sort message"), Ok(Command::Sort(Column::Text)));
        assert_eq!(parse("sort 4"), Ok(Command::Sort(Column::Line)));
        assert_eq!(parse("open #12"), Ok(Command::Open(12)));
        assert_eq!(parse("quit"), Ok(Command::Quit));
    }

    #[test]
    fn load_accepts_paths_and_recent_indexes() {
        assert_eq!(
            parse(r#"load "C:\logs\my build.xml""#),
            Ok(Command::Load(LoadTarget::Path(PathBuf::from(
                r"C:\logs\my build.xml"
            ))))
        );
        assert_eq!(parse("load #2"), Ok(Command::Load(LoadTarget::Recent(2))));
        assert!(parse("load #0").is_err());
        assert!(parse("load").is_err());
    }

    #[test]
    fn set_keeps_the_whole_template() {
        assert_eq!(
            parse(r#"set args "{0}" -n{1} -c{2}"#),
            Ok(Command::SetArgs(r#""{0}" -n{1} -c{2}"#.to_string()))
        );
        assert_eq!(
            parse("set program gvim"),
            Ok(Command::SetProgram("gvim".to_string()))
        );
        assert!(parse("set args").is_err());
        assert!(parse("set colour red").is_err());
    }

    #[test]
    fn rejects_unknown_input() {
        assert!(parse("sort severity").is_err());
        assert!(parse("dedup maybe").is_err());
        assert!(parse("open x").is_err());
        assert!(parse("frobnicate").is_err());
        assert_eq!(parse("   "), Err(String::new()));
    }
}
