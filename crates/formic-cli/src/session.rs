//! Interactive Form Session
//!
//! Line-driven command loop over a profile form.

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;
use std::str::FromStr;

use formic_core::{FieldPath, ListPath, ProfileForm};
use formic_devtools::FormInspector;

const HELP: &str = "\
commands:
  set <path> <value>   set a field (e.g. set social.twitter @bat)
  add                  append a phone number entry
  rm <index>           remove the phone number entry at <index>
  show                 print the record with errors beside fields
  submit               validate and submit
  reset                restore defaults
  log                  dump the inspector event log
  help                 this text
  quit                 leave the session";

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set { path: String, value: String },
    Add,
    Remove(usize),
    Show,
    Submit,
    Reset,
    Log,
    Help,
    Quit,
}

impl Command {
    /// Parse a trimmed, non-empty input line
    pub fn parse(line: &str) -> Result<Command, String> {
        let mut words = line.splitn(3, ' ');
        let head = words.next().unwrap_or_default();
        match head {
            "set" => {
                let path = words.next().ok_or("usage: set <path> <value>")?;
                let value = words.next().unwrap_or_default();
                Ok(Command::Set {
                    path: path.to_string(),
                    value: value.to_string(),
                })
            }
            "add" => Ok(Command::Add),
            "rm" => {
                let index = words.next().ok_or("usage: rm <index>")?;
                index
                    .parse::<usize>()
                    .map(Command::Remove)
                    .map_err(|_| format!("not an index: {}", index))
            }
            "show" => Ok(Command::Show),
            "submit" => Ok(Command::Submit),
            "reset" => Ok(Command::Reset),
            "log" => Ok(Command::Log),
            "help" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(format!("unknown command: {} (try 'help')", other)),
        }
    }
}

/// One interactive session over a profile form with an inspector attached
pub struct Session {
    form: ProfileForm,
    inspector: Rc<RefCell<FormInspector>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        let mut form = ProfileForm::new();
        let inspector = FormInspector::shared();
        form.attach_observer(Box::new(inspector.clone()));
        Self { form, inspector }
    }

    /// Drive the command loop until `quit` or end of input
    pub fn run(&mut self, input: impl BufRead, mut out: impl Write) -> io::Result<()> {
        writeln!(out, "formic interactive session ('help' lists commands)")?;
        for line in input.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match Command::parse(trimmed) {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command, &mut out)?,
                Err(message) => writeln!(out, "error: {}", message)?,
            }
        }
        Ok(())
    }

    fn execute(&mut self, command: Command, out: &mut impl Write) -> io::Result<()> {
        match command {
            Command::Set { path, value } => match FieldPath::from_str(&path) {
                Ok(path) => match self.form.set_value(path, value) {
                    Ok(()) => {
                        if let Some(message) = self.form.errors().message(path) {
                            writeln!(out, "{}: {}", path, message)?;
                        }
                    }
                    Err(error) => writeln!(out, "error: {}", error)?,
                },
                Err(error) => writeln!(out, "error: {}", error)?,
            },
            Command::Add => {
                let index = self.form.append_entry(ListPath::ExtraPhones);
                writeln!(out, "entry {} added", index)?;
            }
            Command::Remove(index) => {
                if self.form.remove_entry(ListPath::ExtraPhones, index) {
                    writeln!(out, "entry {} removed", index)?;
                } else {
                    writeln!(out, "entry {} cannot be removed", index)?;
                }
            }
            Command::Show => self.render(out)?,
            Command::Submit => match self.form.submit() {
                Ok(record) => {
                    let json = serde_json::to_string_pretty(&record)
                        .unwrap_or_else(|_| "<unserializable>".to_string());
                    writeln!(out, "submitted:\n{}", json)?;
                }
                Err(map) => {
                    writeln!(out, "submit blocked, {} error(s):", map.len())?;
                    for (path, error) in map.iter() {
                        writeln!(out, "  {}: {}", path, error.message)?;
                    }
                }
            },
            Command::Reset => {
                self.form.reset();
                writeln!(out, "form reset")?;
            }
            Command::Log => {
                for entry in self.inspector.borrow().entries() {
                    writeln!(out, "{}", entry)?;
                }
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => {}
        }
        Ok(())
    }

    /// Print every registered field with its value, error alongside.
    /// Required fields are marked with `*`.
    fn render(&self, out: &mut impl Write) -> io::Result<()> {
        let paths: Vec<FieldPath> = self.form.registered_paths().collect();
        for path in paths {
            let required = self.form.rule(path).is_some_and(|rule| rule.is_required());
            let label = format!("{}{}", path, if required { "*" } else { "" });
            let value = self.form.value(path).unwrap_or("");
            match self.form.errors().message(path) {
                Some(message) => writeln!(out, "  {:<24} {:?}  <- {}", label, value, message)?,
                None => writeln!(out, "  {:<24} {:?}", label, value)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_session(script: &str) -> String {
        let mut session = Session::new();
        let mut out = Vec::new();
        session.run(Cursor::new(script), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            Command::parse("set social.twitter @bat"),
            Ok(Command::Set {
                path: "social.twitter".to_string(),
                value: "@bat".to_string(),
            })
        );
        assert_eq!(Command::parse("rm 2"), Ok(Command::Remove(2)));
        assert_eq!(Command::parse("add"), Ok(Command::Add));
        assert!(Command::parse("rm x").is_err());
        assert!(Command::parse("frobnicate").is_err());
    }

    #[test]
    fn test_set_preserves_spaces_in_value() {
        assert_eq!(
            Command::parse("set username Bruce Wayne"),
            Ok(Command::Set {
                path: "username".to_string(),
                value: "Bruce Wayne".to_string(),
            })
        );
    }

    #[test]
    fn test_blocked_submit_lists_errors() {
        let output = run_session("set username \nsubmit\nquit\n");
        assert!(output.contains("submit blocked"));
        assert!(output.contains("channel: Channel is required"));
    }

    #[test]
    fn test_successful_submit_prints_record() {
        let script = "\
set username Bruce
set channel Batcave
set social.twitter @bat
set social.facebook bat.fb
set phoneNumbers.0 555-1111
set phoneNumbers.1 555-2222
set phnNumbers.0.number 555-3333
submit
quit
";
        let output = run_session(script);
        assert!(output.contains("submitted:"));
        assert!(output.contains("\"username\": \"Bruce\""));
    }

    #[test]
    fn test_bad_path_reports_and_continues() {
        let output = run_session("set nope x\nadd\nquit\n");
        assert!(output.contains("unknown field path `nope`"));
        assert!(output.contains("entry 1 added"));
    }

    #[test]
    fn test_show_marks_required_fields() {
        let output = run_session("show\nquit\n");
        assert!(output.contains("username*"));
        assert!(output.contains("phnNumbers.0.number*"));
        assert!(!output.contains("email*"));
    }

    #[test]
    fn test_protected_row_removal_reported() {
        let output = run_session("rm 0\nquit\n");
        assert!(output.contains("entry 0 cannot be removed"));
    }
}
