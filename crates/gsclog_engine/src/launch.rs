use std::fmt::{self, Display, Write};
use std::io;
use std::process::Command;
use std::thread;

use gsclog_logging::{gsclog_debug, gsclog_error, gsclog_info, gsclog_warn};
use thiserror::Error;

use crate::LaunchSettings;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("template references argument {index} but only {supplied} are supplied")]
    MissingArgument { index: usize, supplied: usize },
    #[error("malformed template at byte {position}: {reason}")]
    Malformed { position: usize, reason: &'static str },
}

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("no editor program configured")]
    EmptyProgram,
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Substitutes `module`, `line` and `column` for `{0}`, `{1}` and `{2}`.
pub fn format_launch(
    template: &str,
    module: &str,
    line: u32,
    column: u32,
) -> Result<String, FormatError> {
    let args: [&dyn Display; 3] = [&module, &line, &column];
    format_positional(template, &args)
}

/// Composite formatting over positional arguments.
///
/// Placeholders are `{index[,alignment][:format]}`; the format part is
/// accepted and ignored. `{{` and `}}` produce literal braces.
fn format_positional(template: &str, args: &[&dyn Display]) -> Result<String, FormatError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((position, ch)) = chars.next() {
        match ch {
            '{' if chars.peek().map(|&(_, c)| c) == Some('{') => {
                chars.next();
                out.push('{');
            }
            '{' => {
                let mut spec = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    spec.push(c);
                }
                if !closed {
                    return Err(FormatError::Malformed {
                        position,
                        reason: "unterminated placeholder",
                    });
                }
                let placeholder = Placeholder::parse(&spec, position)?;
                let arg = args.get(placeholder.index).ok_or(FormatError::MissingArgument {
                    index: placeholder.index,
                    supplied: args.len(),
                })?;
                placeholder.write(&mut out, arg);
            }
            '}' if chars.peek().map(|&(_, c)| c) == Some('}') => {
                chars.next();
                out.push('}');
            }
            '}' => {
                return Err(FormatError::Malformed {
                    position,
                    reason: "unmatched closing brace",
                });
            }
            other => out.push(other),
        }
    }

    Ok(out)
}

/// Widest padding a placeholder may request.
const MAX_ALIGNMENT: usize = u16::MAX as usize;

struct Placeholder {
    index: usize,
    alignment: isize,
}

impl Placeholder {
    fn parse(spec: &str, position: usize) -> Result<Self, FormatError> {
        let head = spec.split(':').next().unwrap_or_default();
        let (index, alignment) = match head.split_once(',') {
            Some((index, alignment)) => (index, Some(alignment)),
            None => (head, None),
        };
        let index = index.trim().parse().map_err(|_| FormatError::Malformed {
            position,
            reason: "placeholder index is not a number",
        })?;
        let alignment: isize = match alignment {
            Some(raw) => raw.trim().parse().map_err(|_| FormatError::Malformed {
                position,
                reason: "placeholder alignment is not a number",
            })?,
            None => 0,
        };
        if alignment.unsigned_abs() > MAX_ALIGNMENT {
            return Err(FormatError::Malformed {
                position,
                reason: "placeholder alignment out of range",
            });
        }
        Ok(Self { index, alignment })
    }

    fn write(&self, out: &mut String, arg: &dyn Display) {
        let width = self.alignment.unsigned_abs();
        // Writing into a String cannot fail.
        let _ = if self.alignment < 0 {
            write!(out, "{arg:<width$}")
        } else {
            write!(out, "{arg:>width$}")
        };
    }
}

/// A ready-to-spawn editor invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl fmt::Display for LaunchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

impl LaunchSettings {
    /// Builds the editor invocation for a source location.
    pub fn command(&self, module: &str, line: u32, column: u32) -> Result<LaunchCommand, LaunchError> {
        let program = self.program.trim();
        if program.is_empty() {
            return Err(LaunchError::EmptyProgram);
        }
        let formatted = format_launch(&self.args_template, module, line, column)?;
        Ok(LaunchCommand {
            program: program.to_string(),
            args: split_args(&formatted),
        })
    }
}

/// Starts the editor without waiting for it. A detached thread reaps the
/// child when the editor exits.
pub fn launch(command: &LaunchCommand) -> Result<(), LaunchError> {
    gsclog_info!("launching editor: {}", command);
    match Command::new(&command.program).args(&command.args).spawn() {
        Ok(mut child) => {
            let program = command.program.clone();
            let reaper = thread::Builder::new()
                .name("gsclog-editor-reaper".to_string())
                .spawn(move || match child.wait() {
                    Ok(status) => gsclog_debug!("{} exited with {}", program, status),
                    Err(err) => gsclog_warn!("could not wait for {}: {}", program, err),
                });
            if let Err(err) = reaper {
                gsclog_warn!("editor started but will not be reaped: {}", err);
            }
            Ok(())
        }
        Err(source) => {
            gsclog_error!("failed to launch {}: {}", command.program, source);
            Err(LaunchError::Spawn {
                program: command.program.clone(),
                source,
            })
        }
    }
}

/// Splits on whitespace; double quotes group words and are removed.
pub fn split_args(raw: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quoted = false;

    for ch in raw.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                in_token = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_token {
                    args.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }
    if in_token {
        args.push(current);
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_args_groups_quoted_words() {
        assert_eq!(
            split_args(r#""C:\My Scripts\a.gsc" -n10  -c3"#),
            vec![r"C:\My Scripts\a.gsc", "-n10", "-c3"]
        );
    }

    #[test]
    fn split_args_keeps_empty_quoted_argument() {
        assert_eq!(split_args(r#"a "" b"#), vec!["a", "", "b"]);
        assert!(split_args("   ").is_empty());
    }

    #[test]
    fn alignment_pads_values() {
        let out = format_positional("[{0,4}][{1,-3}]", &[&7, &"x"]).unwrap();
        assert_eq!(out, "[   7][x  ]");
    }
}
