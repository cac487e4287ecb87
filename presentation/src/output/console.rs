//! Console output formatter for the REPL

use colored::Colorize;
use wizard_application::CycleError;
use wizard_domain::DatasetHandle;

/// Formats banners, previews and notifications for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    pub fn welcome() -> String {
        let mut output = String::new();
        output.push('\n');
        output.push_str("╭─────────────────────────────────────────────╮\n");
        output.push_str("│     DataWizard: Your DataScience Assistant  │\n");
        output.push_str("╰─────────────────────────────────────────────╯\n");
        output.push('\n');
        output.push_str(&Self::help());
        output
    }

    pub fn help() -> String {
        let mut output = format!("{}\n", "Commands:".cyan().bold());
        output.push_str("  /load <path>      - Load a CSV file\n");
        output.push_str("  /preview          - Show the first rows again\n");
        output.push_str("  /columns          - List the columns\n");
        output.push_str("  /history          - Show the whole conversation\n");
        output.push_str("  /help, /h, /?     - Show this help\n");
        output.push_str("  /quit, /exit, /q  - Exit\n");
        output
    }

    /// Summary line plus the first `rows` rows as a table
    pub fn preview(dataset: &DatasetHandle, rows: usize) -> String {
        let mut output = format!(
            "{} {} ({} rows, {} columns)\n",
            "Loaded".green().bold(),
            dataset.name(),
            dataset.row_count(),
            dataset.columns().len()
        );
        if rows > 0 {
            output.push('\n');
            output.push_str(&dataset.head(rows).to_string());
            output.push('\n');
        }
        output
    }

    pub fn columns(dataset: &DatasetHandle) -> String {
        let mut output = format!("{}\n", "Columns:".cyan().bold());
        for (index, column) in dataset.columns().iter().enumerate() {
            output.push_str(&format!(
                "  - {} ({})\n",
                column,
                dataset.column_kind(index).as_str()
            ));
        }
        output
    }

    /// One inline notification for a failed cycle or upload
    pub fn error(error: &CycleError) -> String {
        let text = match error {
            CycleError::NoDataset | CycleError::UploadParseFailure(_) => error.to_string(),
            _ => format!("Failed to generate response: {}", error),
        };
        format!("{} {}", "Error:".red().bold(), text)
    }
}
