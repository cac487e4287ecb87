//! Instruction text for the relevance classifier.
//!
//! The greeting exception lives only in this wording: nothing in code can
//! force the model to honour it, so callers must treat it as best effort.

use crate::dataset::entities::DatasetHandle;

/// Fixed instruction prefix; the dataset's column list is appended to it.
pub const RELEVANCE_INSTRUCTION: &str = "You are an AI query analyzer. Decide whether the \
given user query is related to CSV files, data analysis or charts. If it is, return \
{\"status\": true}. If it is not, write a polite and helpful reply to the query that also \
states \"I am a Data Wizard and I can only help you with Data Science task\", and return it \
as {\"status\": false, \"message\": \"<your reply>\"}. If the user query is a greeting such \
as \"Hi\" or \"Hello\", never return status false for it. Respond with a single JSON object \
and nothing else. The data contains the following columns ";

/// Build the classifier's system prompt for a dataset.
pub fn relevance_system_prompt(dataset: &DatasetHandle) -> String {
    format!("{}{}", RELEVANCE_INSTRUCTION, dataset.column_list())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_ends_with_columns() {
        let ds = DatasetHandle::new("t.csv", vec!["age".into(), "city".into()], vec![]).unwrap();
        let prompt = relevance_system_prompt(&ds);
        assert!(prompt.starts_with(RELEVANCE_INSTRUCTION));
        assert!(prompt.ends_with("['age', 'city']"));
    }

    #[test]
    fn test_instruction_keeps_greeting_rule() {
        assert!(RELEVANCE_INSTRUCTION.contains("greeting"));
        assert!(RELEVANCE_INSTRUCTION.contains("I am a Data Wizard"));
    }
}
