//! Parse LLM output into validated transactions

use crate::error::ExtractorError;
use serde_json::{Map, Value};
use tally_domain::{Transaction, TransactionList};
use tracing::warn;

/// Outcome of parsing one raw model response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseReport {
    /// Records that passed validation, in response order
    pub transactions: TransactionList,

    /// `MalformedResponse` or one `IncompleteRecord` per dropped record
    pub issues: Vec<ExtractorError>,
}

impl ParseReport {
    /// Whether the response failed structural parsing
    pub fn is_malformed(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| matches!(issue, ExtractorError::MalformedResponse(_)))
    }

    /// Number of records dropped during validation
    pub fn dropped(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| matches!(issue, ExtractorError::IncompleteRecord { .. }))
            .count()
    }

    /// Whether every record in a well-formed response was kept
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    fn malformed(reason: String) -> Self {
        Self {
            transactions: Vec::new(),
            issues: vec![ExtractorError::MalformedResponse(reason)],
        }
    }
}

/// Parse a raw model response into transactions
///
/// Never fails: a malformed response yields an empty list with a
/// `MalformedResponse` issue, and each record missing `date`, `description`
/// or a numeric `amount` is dropped with an `IncompleteRecord` issue.
///
/// # Examples
///
/// ```
/// use tally_extractor::parse_and_validate;
///
/// let report = parse_and_validate(r#"[
///     {"date": "2024-01-15", "description": "Coffee", "amount": "-3.50"},
///     {"date": "2024-01-16", "description": "No amount"}
/// ]"#);
/// assert_eq!(report.transactions.len(), 1);
/// assert_eq!(report.transactions[0].amount, -3.5);
/// assert_eq!(report.dropped(), 1);
///
/// assert!(parse_and_validate("I could not find any transactions.").is_malformed());
/// ```
pub fn parse_and_validate(response: &str) -> ParseReport {
    let json_str = match extract_json(response) {
        Ok(s) => s,
        Err(reason) => {
            warn!("Malformed model response: {}", reason);
            return ParseReport::malformed(reason);
        }
    };

    // Only the leading value counts; a trailing remark is ignored
    let json: Value = match serde_json::Deserializer::from_str(json_str)
        .into_iter::<Value>()
        .next()
    {
        Some(Ok(v)) => v,
        Some(Err(e)) => {
            warn!("Malformed model response: {}", e);
            return ParseReport::malformed(format!("JSON parse error: {}", e));
        }
        None => return ParseReport::malformed("Empty response".to_string()),
    };

    let records = match records_of(json) {
        Some(records) => records,
        None => {
            warn!("Malformed model response: not a JSON array");
            return ParseReport::malformed("Expected JSON array".to_string());
        }
    };

    let mut report = ParseReport::default();
    for (index, record) in records.iter().enumerate() {
        match parse_record(record) {
            Ok(transaction) => report.transactions.push(transaction),
            Err(reason) => {
                warn!("Dropping record {}: {}", index, reason);
                report
                    .issues
                    .push(ExtractorError::IncompleteRecord { index, reason });
            }
        }
    }

    report
}

/// Locate the start of the JSON payload, handling markdown code blocks and chatter
///
/// The returned slice begins at the payload and may carry trailing text.
fn extract_json(response: &str) -> Result<&str, String> {
    let trimmed = response.trim();
    if trimmed.is_empty() {
        return Err("Empty response".to_string());
    }

    let body = match trimmed.strip_prefix("```") {
        Some(rest) => {
            // Skip the info string line (```json)
            let content = match rest.find('\n') {
                Some(newline) => &rest[newline + 1..],
                None => return Err("Empty code block".to_string()),
            };
            let content = content.trim_end();
            content.strip_suffix("```").unwrap_or(content).trim()
        }
        None => trimmed,
    };

    if body.starts_with('[') || body.starts_with('{') {
        return Ok(body);
    }

    // Prose before the array
    match body.find('[') {
        Some(open) => Ok(&body[open..]),
        None => Err("No JSON array found in response".to_string()),
    }
}

/// The record array: a bare array, or an object's `transactions` array
fn records_of(json: Value) -> Option<Vec<Value>> {
    match json {
        Value::Array(records) => Some(records),
        Value::Object(mut obj) => match obj.remove("transactions") {
            Some(Value::Array(records)) => Some(records),
            _ => None,
        },
        _ => None,
    }
}

/// Parse a single transaction from JSON
fn parse_record(json: &Value) -> Result<Transaction, String> {
    let obj = json
        .as_object()
        .ok_or_else(|| "Record is not a JSON object".to_string())?;

    let date = required_str(obj, "date")?;
    let description = required_str(obj, "description")?;
    if description.trim().is_empty() {
        return Err("Empty 'description'".to_string());
    }

    let amount = present(obj, "amount").ok_or_else(|| "Missing 'amount'".to_string())?;
    let amount = coerce_amount(amount)
        .ok_or_else(|| format!("Non-numeric 'amount': {}", amount))?;

    Ok(Transaction {
        date: date.to_string(),
        description: description.to_string(),
        amount,
    })
}

fn present<'v>(obj: &'v Map<String, Value>, key: &str) -> Option<&'v Value> {
    obj.get(key).filter(|v| !v.is_null())
}

fn required_str<'v>(obj: &'v Map<String, Value>, key: &str) -> Result<&'v str, String> {
    present(obj, key)
        .ok_or_else(|| format!("Missing '{}'", key))?
        .as_str()
        .ok_or_else(|| format!("'{}' is not a string", key))
}

/// Coerce a JSON number or numeric string to a finite float
fn coerce_amount(value: &Value) -> Option<f64> {
    let amount = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    amount.is_finite().then_some(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_json() {
        let response = r#"[
            {"date": "2024-01-15", "description": "Grocery shopping", "amount": -45.67},
            {"date": "2024-01-16", "description": "Salary deposit", "amount": 2500.00}
        ]"#;

        let report = parse_and_validate(response);
        assert!(report.is_clean());
        assert_eq!(
            report.transactions,
            vec![
                Transaction::new("2024-01-15", "Grocery shopping", -45.67),
                Transaction::new("2024-01-16", "Salary deposit", 2500.0),
            ]
        );
    }

    #[test]
    fn test_parse_json_with_markdown_wrapper() {
        let response = "```json\n[{\"date\": \"2024-02-01\", \"description\": \"Rent\", \"amount\": -1200}]\n```";

        let report = parse_and_validate(response);
        assert_eq!(report.transactions.len(), 1);
        assert_eq!(report.transactions[0].description, "Rent");
    }

    #[test]
    fn test_parse_json_surrounded_by_prose() {
        let response = "Here are the transactions:\n[{\"date\": \"2024-02-01\", \"description\": \"Rent\", \"amount\": -1200}]\nLet me know if you need more.";

        let report = parse_and_validate(response);
        assert_eq!(report.transactions.len(), 1);
    }

    #[test]
    fn test_parse_transactions_object() {
        let response = r#"{"transactions": [{"date": "2024-03-01", "description": "Fee", "amount": -2}]}"#;

        let report = parse_and_validate(response);
        assert_eq!(report.transactions.len(), 1);
        assert_eq!(report.transactions[0].amount, -2.0);
    }

    #[test]
    fn test_parse_invalid_json() {
        let report = parse_and_validate("This is not JSON");
        assert!(report.transactions.is_empty());
        assert!(report.is_malformed());
    }

    #[test]
    fn test_parse_truncated_json() {
        let report = parse_and_validate(r#"[{"date": "2024-01-15", "description": "Cof"#);
        assert!(report.transactions.is_empty());
        assert!(report.is_malformed());
    }

    #[test]
    fn test_parse_empty_response() {
        assert!(parse_and_validate("   ").is_malformed());
        assert!(parse_and_validate("```").is_malformed());
    }

    #[test]
    fn test_parse_json_not_array() {
        let report = parse_and_validate(r#"{"date": "2024-01-15"}"#);
        assert!(report.is_malformed());
    }

    #[test]
    fn test_empty_array_is_clean() {
        let report = parse_and_validate("[]");
        assert!(report.transactions.is_empty());
        assert!(report.is_clean());
    }

    #[test]
    fn test_parse_partial_success() {
        let response = r#"[
            {"date": "2024-01-15", "description": "Coffee", "amount": -3.5},
            {"date": "2024-01-16", "amount": -10},
            {"date": "2024-01-17", "description": "Refund", "amount": "12.00"},
            {"date": "2024-01-18", "description": "Mystery", "amount": "twelve"},
            "not a record",
            {"date": null, "description": "Null date", "amount": 1}
        ]"#;

        let report = parse_and_validate(response);
        assert_eq!(report.transactions.len(), 2);
        assert_eq!(report.transactions[0].description, "Coffee");
        assert_eq!(report.transactions[1].description, "Refund");
        assert_eq!(report.transactions[1].amount, 12.0);
        assert_eq!(report.dropped(), 4);

        let dropped: Vec<usize> = report
            .issues
            .iter()
            .filter_map(|issue| match issue {
                ExtractorError::IncompleteRecord { index, .. } => Some(*index),
                _ => None,
            })
            .collect();
        assert_eq!(dropped, vec![1, 3, 4, 5]);
    }

    #[test]
    fn test_empty_description_dropped() {
        let report = parse_and_validate(r#"[{"date": "2024-01-15", "description": "  ", "amount": 1}]"#);
        assert!(report.transactions.is_empty());
        assert_eq!(report.dropped(), 1);
    }

    #[test]
    fn test_non_finite_amount_dropped() {
        let report = parse_and_validate(r#"[{"date": "2024-01-15", "description": "x", "amount": "NaN"}]"#);
        assert!(report.transactions.is_empty());
    }

    #[test]
    fn test_extra_fields_ignored() {
        let response = r#"[{"date": "2024-01-15", "description": "Coffee", "amount": -3.5, "currency": "USD"}]"#;
        let report = parse_and_validate(response);
        assert_eq!(report.transactions, vec![Transaction::new("2024-01-15", "Coffee", -3.5)]);
    }

    #[test]
    fn test_parse_array_followed_by_note() {
        let response = "[{\"date\": \"2024-02-01\", \"description\": \"Rent\", \"amount\": -1200}]\nNote: amounts are in USD.";

        let report = parse_and_validate(response);
        assert!(report.is_clean());
        assert_eq!(report.transactions, vec![Transaction::new("2024-02-01", "Rent", -1200.0)]);
    }

    #[test]
    fn test_parse_fenced_array_followed_by_note() {
        let response = "```json\n[{\"date\": \"2024-02-01\", \"description\": \"Rent\", \"amount\": -1200}]\n```\nI skipped the opening balance.";

        let report = parse_and_validate(response);
        assert!(report.is_clean());
        assert_eq!(report.transactions.len(), 1);
    }

    #[test]
    fn test_parse_trailing_note_with_brackets() {
        let response = "Found these: [{\"date\": \"2024-02-01\", \"description\": \"Rent\", \"amount\": -1200}] (see line [3])";

        let report = parse_and_validate(response);
        assert_eq!(report.transactions.len(), 1);
    }

    #[test]
    fn test_extract_json_from_markdown_without_language() {
        let response = "```\n[1, 2]\n```";
        assert_eq!(extract_json(response).unwrap(), "[1, 2]");
    }

    #[test]
    fn test_extract_json_unterminated_fence() {
        let response = "```json\n[1, 2]";
        assert_eq!(extract_json(response).unwrap(), "[1, 2]");
    }
}
