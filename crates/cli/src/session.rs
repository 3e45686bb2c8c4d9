//! Interactive chat session: routes each input line to a command, the
//! engine, or a pending lesson, and collects what should be printed.

use std::path::{Path, PathBuf};

use learnbot_core::engine::{Engine, Lesson, Reply, TeachOutcome};
use storage::StoreError;
use tracing::warn;

use crate::commands::{self, Command, Mode};

pub const BANNER: &str = "Chatbot started. Type /help for commands.";
pub const PROMPT: &str = "You: ";
pub const TEACH_PROMPT: &str = "Type answer or 'skip': ";

/// Result of handling one line.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Step {
    pub lines: Vec<String>,
    pub quit: bool,
}

impl Step {
    fn say(mut self, text: impl AsRef<str>) -> Self {
        self.lines.push(format!("Bot: {}", text.as_ref()));
        self
    }
}

pub struct Session {
    engine: Engine,
    mode: Mode,
    backup_path: PathBuf,
    pending: Option<Lesson>,
}

impl Session {
    pub fn new(engine: Engine, backup_path: impl Into<PathBuf>) -> Self {
        Self {
            engine,
            mode: Mode::Chat,
            backup_path: backup_path.into(),
            pending: None,
        }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Prompt to show before reading the next line.
    pub fn prompt(&self) -> &'static str {
        if self.pending.is_some() {
            TEACH_PROMPT
        } else {
            PROMPT
        }
    }

    pub fn handle(&mut self, line: &str) -> Step {
        let line = line.trim();
        if let Some(lesson) = self.pending.take() {
            return match self.engine.teach(lesson, line) {
                TeachOutcome::Learned => Step::default().say("Learned"),
                TeachOutcome::Skipped => Step::default(),
            };
        }
        if line.is_empty() {
            return Step::default();
        }
        if line.starts_with('/') {
            return self.run(commands::parse(line));
        }
        if self.mode == Mode::Command {
            return Step::default().say("Command mode active. Use /help");
        }
        match self.engine.ask(line) {
            Reply::Answer(answer) => Step::default().say(answer),
            Reply::Unknown(lesson) => {
                self.pending = Some(lesson);
                Step::default().say("I don't know that. Teach me?")
            }
        }
    }

    fn run(&mut self, command: Command) -> Step {
        let step = Step::default();
        match command {
            Command::Help => Step {
                lines: commands::HELP.iter().map(|l| l.to_string()).collect(),
                quit: false,
            },
            Command::Exit => Step {
                quit: true,
                ..step.say("Goodbye")
            },
            Command::Stats => step.say(self.stats()),
            Command::List => {
                let kb = self.engine.knowledge();
                if kb.is_empty() {
                    return step.say("Knowledge base empty");
                }
                Step {
                    lines: kb
                        .questions()
                        .enumerate()
                        .map(|(i, q)| format!("[{i}] {q}"))
                        .collect(),
                    quit: false,
                }
            }
            Command::Delete(index) => {
                let step = match self.engine.delete(index) {
                    Ok(removed) => step.say(format!("Deleted '{}'", removed.question)),
                    Err(_) => step.say("Invalid index"),
                };
                step.say(self.stats())
            }
            Command::Clear => {
                self.engine.clear();
                step.say("Knowledge base cleared")
            }
            Command::Export(file) => self.snapshot(step, Path::new(&file), "Exported to"),
            Command::SaveAs(file) => self.snapshot(step, Path::new(&file), "Saved as"),
            Command::Backup => {
                let path = self.backup_path.clone();
                match self.engine.snapshot_to(&path) {
                    Ok(()) => step.say(format!("Backup created ({})", path.display())),
                    Err(e) => step.say(format!("Backup failed: {e}")),
                }
            }
            Command::Import(file) => match storage::try_load(Path::new(&file)) {
                Ok(kb) => {
                    self.engine.replace(kb);
                    step.say(format!("Imported from {file}"))
                }
                Err(e) => {
                    log_load_failure(&e);
                    step.say("Import failed")
                }
            },
            Command::Load(file) => match storage::try_load(Path::new(&file)) {
                Ok(kb) => {
                    self.engine.replace(kb);
                    step.say(format!("Loaded {file}"))
                }
                Err(e) => {
                    log_load_failure(&e);
                    step.say("Load failed")
                }
            },
            Command::About => step.say("Learning Chatbot | CLI | fuzzy question matching"),
            Command::Version => step.say(format!("Version {}", env!("CARGO_PKG_VERSION"))),
            Command::Mode(name) => match name.parse::<Mode>() {
                Ok(mode) => {
                    self.mode = mode;
                    step.say(format!("Mode set to {}", mode.as_str()))
                }
                Err(()) => step.say("Invalid mode"),
            },
            Command::Unknown => step.say("Unknown command"),
        }
    }

    fn stats(&self) -> String {
        format!("Learned Q&A pairs: {}", self.engine.knowledge().len())
    }

    fn snapshot(&self, step: Step, path: &Path, done: &str) -> Step {
        match self.engine.snapshot_to(path) {
            Ok(()) => step.say(format!("{done} {}", path.display())),
            Err(e) => step.say(format!("Could not write {}: {e}", path.display())),
        }
    }
}

fn log_load_failure(err: &StoreError) {
    warn!("{err}");
}
