//! REPL (Read-Eval-Print Loop) for interactive chat

use super::renderer::ChatRenderer;
use crate::config::ReplConfig;
use crate::output::console::ConsoleFormatter;
use crate::progress::reporter::ProgressReporter;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::path::Path;
use tracing::{debug, warn};
use wizard_application::{
    CycleError, CycleResult, LoadDatasetUseCase, NoProgress, RunCycleUseCase, SessionContext,
};

const HISTORY_CAPACITY: usize = 1000;

/// A parsed slash command
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Load(&'a str),
    Preview,
    Columns,
    History,
    Help,
    Quit,
    Unknown(&'a str),
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Self {
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };
        match name {
            "/load" | "/l" if !arg.is_empty() => Command::Load(arg),
            "/preview" => Command::Preview,
            "/columns" | "/cols" => Command::Columns,
            "/history" => Command::History,
            "/help" | "/h" | "/?" => Command::Help,
            "/quit" | "/exit" | "/q" => Command::Quit,
            _ => Command::Unknown(line),
        }
    }
}

/// Interactive chat REPL
///
/// Owns the one session of this process and drives both use cases.
pub struct ChatRepl {
    run_cycle: RunCycleUseCase,
    load_dataset: LoadDatasetUseCase,
    session: SessionContext,
    config: ReplConfig,
}

impl ChatRepl {
    pub fn new(run_cycle: RunCycleUseCase, load_dataset: LoadDatasetUseCase) -> Self {
        Self {
            run_cycle,
            load_dataset,
            session: SessionContext::new(),
            config: ReplConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Load a CSV file and print its preview.
    pub fn load(&mut self, path: &Path) -> Result<(), CycleError> {
        let dataset = self.load_dataset.execute(&mut self.session, path)?;
        println!(
            "{}",
            ConsoleFormatter::preview(&dataset, self.config.preview_rows)
        );
        Ok(())
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> std::io::Result<()> {
        let mut line_editor = Reedline::create();

        if let Some(history) = self
            .config
            .resolved_history_file()
            .and_then(|path| open_history(&path))
        {
            line_editor = line_editor.with_history(Box::new(history));
        }

        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("datawizard".to_string()),
            DefaultPromptSegment::Empty,
        );

        println!("{}", ConsoleFormatter::welcome());
        if self.session.dataset().is_none() {
            println!("Load a CSV file with /load <path> to get started.\n");
        }

        loop {
            match line_editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    if !self.handle_line(&line).await {
                        break;
                    }
                }
                Signal::CtrlC => {
                    println!("^C");
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
            }
        }

        Ok(())
    }

    /// Handle one input line. Returns false when the REPL should exit.
    async fn handle_line(&mut self, line: &str) -> bool {
        let trimmed = line.trim();
        if trimmed.starts_with('/') {
            return self.handle_command(trimmed);
        }
        self.submit(line).await;
        true
    }

    /// Handle slash commands. Returns false when the REPL should exit.
    fn handle_command(&mut self, line: &str) -> bool {
        match Command::parse(line) {
            Command::Quit => {
                println!("Bye!");
                return false;
            }
            Command::Help => println!("{}", ConsoleFormatter::help()),
            Command::Load(path) => {
                if let Err(e) = self.load(Path::new(path)) {
                    eprintln!("{}", ConsoleFormatter::error(&e));
                }
            }
            Command::Preview => match self.session.dataset() {
                Some(dataset) => println!(
                    "{}",
                    ConsoleFormatter::preview(dataset, self.config.preview_rows)
                ),
                None => eprintln!("{}", ConsoleFormatter::error(&CycleError::NoDataset)),
            },
            Command::Columns => match self.session.dataset() {
                Some(dataset) => println!("{}", ConsoleFormatter::columns(dataset)),
                None => eprintln!("{}", ConsoleFormatter::error(&CycleError::NoDataset)),
            },
            Command::History => {
                let transcript = self.session.chat().transcript();
                if transcript.is_empty() {
                    println!("(no messages yet)");
                } else {
                    println!("{}\n", ChatRenderer::render(transcript));
                }
            }
            Command::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }
        true
    }

    async fn submit(&mut self, line: &str) -> CycleResult {
        self.session.chat_mut().set_input(line);

        let result = if self.config.show_progress {
            let progress = ProgressReporter::new();
            self.run_cycle
                .submit_pending(&mut self.session, &progress)
                .await
        } else {
            self.run_cycle
                .submit_pending(&mut self.session, &NoProgress)
                .await
        };

        match &result {
            CycleResult::Failed(e) => eprintln!("{}\n", ConsoleFormatter::error(e)),
            _ => {
                if let Some(output) = self.cycle_output(&result) {
                    println!("{}\n", output);
                }
            }
        }
        result
    }

    /// What to print after a recorded cycle: the whole transcript, newest
    /// first, or just the newest message when full redraws are off.
    fn cycle_output(&self, result: &CycleResult) -> Option<String> {
        match result {
            CycleResult::Rejected | CycleResult::Answered => {
                let transcript = self.session.chat().transcript();
                if self.config.full_transcript {
                    Some(ChatRenderer::render(transcript))
                } else {
                    transcript.first().map(ChatRenderer::render_message)
                }
            }
            CycleResult::Ignored | CycleResult::Failed(_) => None,
        }
    }
}

/// Open the line history file, creating its directory first.
/// Returns `None` when the history cannot be used; the REPL then runs
/// without persistent history.
fn open_history(path: &Path) -> Option<FileBackedHistory> {
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            warn!(
                "Could not create history directory {}: {}",
                parent.display(),
                e
            );
        }
    }
    match FileBackedHistory::with_file(HISTORY_CAPACITY, path.to_path_buf()) {
        Ok(history) => {
            debug!("Line history at {}", path.display());
            Some(history)
        }
        Err(e) => {
            warn!("History disabled ({}): {}", path.display(), e);
            None
        }
    }
}
