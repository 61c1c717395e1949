//! LLM prompt for interpreting correction commands

use crate::error::CorrectorError;
use tally_domain::Transaction;

/// Builds the interpretation prompt for one command
pub struct PromptBuilder<'a> {
    transactions: &'a [Transaction],
    command: &'a str,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(transactions: &'a [Transaction], command: &'a str) -> Self {
        Self {
            transactions,
            command,
        }
    }

    /// Build the complete interpretation prompt
    pub fn build(&self) -> Result<String, CorrectorError> {
        let current = serde_json::to_string_pretty(self.transactions)
            .map_err(|e| CorrectorError::Serialization(e.to_string()))?;

        let mut prompt = String::new();

        prompt.push_str(TASK);
        prompt.push_str("\n\n");

        prompt.push_str("<current_transactions>\n");
        prompt.push_str(&current);
        prompt.push_str("\n</current_transactions>\n\n");

        prompt.push_str("<user_request>\n");
        prompt.push_str(self.command.trim());
        prompt.push_str("\n</user_request>\n\n");

        prompt.push_str(INSTRUCTIONS);
        prompt.push_str("\n\n");
        prompt.push_str(OUTPUT_FORMAT);

        Ok(prompt)
    }
}

const TASK: &str = r#"<task>
You are a transaction management assistant. Your task is to interpret user input and update a list of financial transactions accordingly.
</task>"#;

const INSTRUCTIONS: &str = r#"<instructions>
Based on the user's request, update the list of transactions by doing ONE of the following:
- If the user wants to modify a specific transaction, update only that transaction
- If the user wants to add a new transaction, add it to the list
- If the user wants to delete a transaction, remove it from the list

Keep every other transaction exactly as it is, in the same order.

Each transaction must have exactly these three properties:
- date: The date in YYYY-MM-DD format (string)
- description: A brief description of the transaction (string)
- amount: The transaction amount as a number (negative for debits, positive for credits)
</instructions>"#;

const OUTPUT_FORMAT: &str = r#"<output_format>
Return the COMPLETE updated list as a JSON array of transaction objects. Each object must have exactly the three properties listed above.

Example output format:
[
  {
    "date": "2024-01-15",
    "description": "Grocery shopping",
    "amount": -45.67
  },
  {
    "date": "2024-01-16",
    "description": "Salary deposit",
    "amount": 2500.00
  }
]

Return ONLY the JSON array. Do not include any explanations, comments, or additional text.
</output_format>"#;
