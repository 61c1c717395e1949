//! LLM prompt for transaction extraction

/// Builds the extraction prompt for one window of statement text
pub struct PromptBuilder<'a> {
    text: &'a str,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::with_capacity(
            EXTRACTION_INSTRUCTIONS.len() + OUTPUT_FORMAT_REMINDER.len() + self.text.len() + 64,
        );

        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push_str("\n\n");

        prompt.push_str("Here's the text from the financial statement:\n");
        prompt.push_str("---\n");
        prompt.push_str(self.text);
        prompt.push_str("\n---\n\n");

        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }
}

const EXTRACTION_INSTRUCTIONS: &str = r#"You are an assistant trained to extract transaction information from financial statements.
Given the following text from a financial statement, extract all transactions and format them as a list of JSON objects.
Each transaction must have exactly these properties:
- date: The date of the transaction in the format YYYY-MM-DD
- description: A brief description of the transaction
- amount: The transaction amount as a number (negative for debits, positive for credits)

The text was recovered by OCR and may be cut off at the start or end. Skip any
transaction whose date, description or amount is not visible."#;

const OUTPUT_FORMAT_REMINDER: &str = r#"Output format (JSON array only, no additional text):
[
  {
    "date": "2024-01-15",
    "description": "Grocery shopping",
    "amount": -45.67
  }
]

Remember: Return ONLY the JSON array, no markdown code blocks, no explanations.
If there are no transactions, return []."#;
