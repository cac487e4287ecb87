//! Prompt for the answer model that proposes analysis plans

use crate::dataset::entities::DatasetHandle;

const PLAN_VOCABULARY: &str = r#"Reply with exactly one JSON object describing how to answer the question. Allowed shapes:

{"kind": "answer", "text": "<prose reply, for greetings or questions that need no computation>"}
{"kind": "count_rows", "filters": [<filter>...]}
{"kind": "aggregate", "op": "sum|mean|min|max|count|median", "column": "<column>", "group_by": "<column or null>", "filters": [<filter>...]}
{"kind": "describe", "columns": ["<column>", ...]}
{"kind": "value_counts", "column": "<column>", "limit": 10}
{"kind": "top", "column": "<numeric column>", "n": 5, "descending": true, "filters": [<filter>...]}
{"kind": "chart", "chart": "bar|line|scatter|histogram", "x": "<column>", "y": "<column or null>", "agg": "sum|mean|min|max|count|median", "title": "<title>", "filters": [<filter>...]}

A <filter> is {"column": "<column>", "op": "eq|ne|gt|ge|lt|le|contains", "value": <value>}.
Use a chart only when the user asks for a plot, chart or graph. Use column names exactly as listed."#;

/// Describe the dataframe and the plan vocabulary to the answer model.
pub fn analysis_system_prompt(dataset: &DatasetHandle, sample_rows: usize) -> String {
    let mut prompt = format!(
        "You are a data analyst working on the table '{}' with {} rows.\n\nColumns:\n",
        dataset.name(),
        dataset.row_count()
    );
    for (index, column) in dataset.columns().iter().enumerate() {
        prompt.push_str(&format!(
            "- {} ({})\n",
            column,
            dataset.column_kind(index).as_str()
        ));
    }
    if sample_rows > 0 && dataset.row_count() > 0 {
        prompt.push_str("\nFirst rows:\n");
        prompt.push_str(&dataset.head(sample_rows).to_string());
        prompt.push('\n');
    }
    prompt.push('\n');
    prompt.push_str(PLAN_VOCABULARY);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_lists_typed_columns_and_sample() {
        let ds = DatasetHandle::new(
            "people.csv",
            vec!["name".into(), "age".into()],
            vec![
                vec!["Ana".into(), "31".into()],
                vec!["Bo".into(), "45".into()],
            ],
        )
        .unwrap();

        let prompt = analysis_system_prompt(&ds, 1);
        assert!(prompt.contains("'people.csv' with 2 rows"));
        assert!(prompt.contains("- name (text)"));
        assert!(prompt.contains("- age (integer)"));
        assert!(prompt.contains("Ana"));
        assert!(prompt.contains("shape: (1, 2)"));
        assert!(!prompt.contains("Bo"));
        assert!(prompt.contains("\"kind\": \"chart\""));
    }
}
