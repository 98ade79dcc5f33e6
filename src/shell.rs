use std::io::{BufRead, Write};
use std::path::Path;

use colored::{ColoredString, Colorize};
use log::debug;

use crate::store::{validate_json_path, Store};
use crate::{KvError, Result};

/// A menu entry of the interactive shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Load a JSON file.
    Load,
    /// Forget the loaded file.
    Clear,
    /// Search the values.
    Search,
    /// List values shared by several keys.
    Duplicates,
    /// Add a key.
    Add,
    /// Remove a key.
    Remove,
    /// Leave the shell.
    Exit,
}

impl Action {
    /// Every action, in menu order.
    pub const ALL: [Action; 7] = [
        Action::Load,
        Action::Clear,
        Action::Search,
        Action::Duplicates,
        Action::Add,
        Action::Remove,
        Action::Exit,
    ];

    /// The menu label.
    pub fn label(self) -> &'static str {
        match self {
            Action::Load => "📂 Load JSON file",
            Action::Clear => "🧹 Clear JSON path",
            Action::Search => "🔍 Search values",
            Action::Duplicates => "📊 Find duplicate values",
            Action::Add => "➕ Add new key",
            Action::Remove => "➖ Remove key",
            Action::Exit => "🚪 Exit",
        }
    }

    /// Parses a menu choice: the option number or a keyword.
    pub fn parse(choice: &str) -> Option<Action> {
        let choice = choice.trim().to_lowercase();
        if let Ok(n) = choice.parse::<usize>() {
            return n.checked_sub(1).and_then(|i| Self::ALL.get(i)).copied();
        }
        match choice.as_str() {
            "load" => Some(Action::Load),
            "clear" => Some(Action::Clear),
            "search" => Some(Action::Search),
            "duplicates" | "dups" => Some(Action::Duplicates),
            "add" => Some(Action::Add),
            "remove" | "rm" => Some(Action::Remove),
            "exit" | "quit" | "q" => Some(Action::Exit),
            _ => None,
        }
    }

    fn needs_document(self) -> bool {
        matches!(
            self,
            Action::Search | Action::Duplicates | Action::Add | Action::Remove
        )
    }
}

enum Flow {
    Continue,
    Exit,
}

/// The interactive menu loop.
///
/// Generic over its input and output so the whole session can be driven
/// from memory. The shell owns the [`Store`] for the lifetime of the
/// session.
pub struct Shell<R: BufRead, W: Write> {
    store: Store,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Creates a shell around an existing store.
    pub fn new(store: Store, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
        }
    }

    /// The store being edited.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Validates `path` and loads it, reporting the outcome to the user.
    ///
    /// Recoverable failures are printed and leave the store unchanged;
    /// only output failures are returned.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<()> {
        match self.load(path.as_ref()) {
            Ok(()) => Ok(()),
            Err(e) if e.is_recoverable() => self.report(&e),
            Err(e) => Err(e),
        }
    }

    /// Runs the menu loop until the user exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("Choose an option")? else {
                return self.farewell();
            };
            let Some(action) = Action::parse(&choice) else {
                self.say(format!("⚠️ Unknown option: {}", choice.trim()).yellow())?;
                continue;
            };
            debug!("Selected {:?}", action);

            match self.dispatch(action) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => return Ok(()),
                Err(e) if e.is_recoverable() => self.report(&e)?,
                Err(e) => return Err(e),
            }
        }
    }

    fn dispatch(&mut self, action: Action) -> Result<Flow> {
        if action.needs_document() && !self.store.is_loaded() {
            self.say("⚠️ Load a JSON file first!".yellow())?;
            return Ok(Flow::Continue);
        }

        match action {
            Action::Load => self.load_action(),
            Action::Clear => {
                self.store.clear();
                self.say("🧹 JSON path cleared!".yellow())?;
                Ok(Flow::Continue)
            }
            Action::Search => self.search_action(),
            Action::Duplicates => self.duplicates_action(),
            Action::Add => self.add_action(),
            Action::Remove => self.remove_action(),
            Action::Exit => {
                self.farewell()?;
                Ok(Flow::Exit)
            }
        }
    }

    fn load_action(&mut self) -> Result<Flow> {
        let Some(path) = self.prompt("Enter the path of the JSON file")? else {
            return self.end_of_input();
        };
        self.load(Path::new(path.trim()))?;
        Ok(Flow::Continue)
    }

    fn load(&mut self, path: &Path) -> Result<()> {
        validate_json_path(path)?;
        self.store.load(path)?;
        let count = self.store.document().len();
        self.say(format!("✅ Loaded {} keys from {}", count, path.display()).green())
    }

    fn search_action(&mut self) -> Result<Flow> {
        let Some(query) = self.prompt("Enter your search")? else {
            return self.end_of_input();
        };
        let results = self.store.search(&query)?;
        if results.is_empty() {
            self.say("🔎 No results found.".yellow())?;
        } else {
            self.say("🔍 Search results:".cyan())?;
            for (key, value) in &results {
                writeln!(self.output, "🔑 {}: {}", key.green(), value.yellow())?;
            }
        }
        Ok(Flow::Continue)
    }

    fn duplicates_action(&mut self) -> Result<Flow> {
        let duplicates = self.store.duplicates()?;
        if duplicates.is_empty() {
            self.say("🔍 No duplicate values found.".yellow())?;
        } else {
            self.say("📊 Duplicate values:".cyan())?;
            for (value, keys) in &duplicates {
                writeln!(
                    self.output,
                    "{}: {}",
                    format!("Duplicate value: {}", value).red(),
                    format!("Keys: [{}]", keys.join(", ")).green()
                )?;
            }
        }
        Ok(Flow::Continue)
    }

    fn add_action(&mut self) -> Result<Flow> {
        let Some(key) = self.prompt("Enter the new key")? else {
            return self.end_of_input();
        };
        self.store.check_new_key(&key)?;
        let Some(value) = self.prompt("Enter the value for the key")? else {
            return self.end_of_input();
        };
        self.store.add(key, value)?;
        self.say("✅ Key added successfully!".green())?;
        Ok(Flow::Continue)
    }

    fn remove_action(&mut self) -> Result<Flow> {
        let Some(key) = self.prompt("Enter the key to remove")? else {
            return self.end_of_input();
        };
        self.store.remove(&key)?;
        self.say("✅ Key removed successfully!".green())?;
        Ok(Flow::Continue)
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", "🌐 JSON Data Manager 🌐".bold())?;
        match self.store.path() {
            Some(path) => writeln!(
                self.output,
                "{}",
                format!("Current file: {}", path.display()).dimmed()
            )?,
            None => writeln!(self.output, "{}", "No file loaded".dimmed())?,
        }
        for (i, action) in Action::ALL.iter().enumerate() {
            writeln!(self.output, "  {}) {}", i + 1, action.label())?;
        }
        Ok(())
    }

    /// Prints `label` and reads one line, without its line ending.
    ///
    /// Invalid UTF-8 is replaced rather than rejected. Returns `None` once
    /// the input is exhausted.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;

        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_owned()))
    }

    fn end_of_input(&mut self) -> Result<Flow> {
        self.farewell()?;
        Ok(Flow::Exit)
    }

    fn farewell(&mut self) -> Result<()> {
        self.say("👋 Goodbye!".yellow())
    }

    fn report(&mut self, error: &KvError) -> Result<()> {
        debug!("Recovered from {:?}", error);
        self.say(format!("❌ {}", error).red())
    }

    fn say(&mut self, message: ColoredString) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }
}
