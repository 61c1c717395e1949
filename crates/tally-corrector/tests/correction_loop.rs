//! End-to-end tests for the correction loop

use tally_corrector::{
    CorrectionLoop, CorrectorConfig, CorrectorError, Interpreter, ScriptedSurface,
    CorrectionSession, SessionState, StepOutcome,
};
use tally_domain::Transaction;
use tally_llm::MockProvider;

fn statement() -> Vec<Transaction> {
    vec![
        Transaction::new("2024-08-01", "Rent", -1200.0),
        Transaction::new("2024-08-03", "Coffee", -3.5),
    ]
}

#[test]
fn add_then_ok_makes_exactly_one_call() {
    let llm = MockProvider::default();
    llm.push_response(
        r#"```json
[
  {"date": "2024-08-01", "description": "Rent", "amount": -1200.0},
  {"date": "2024-08-03", "description": "Coffee", "amount": -3.5},
  {"date": "2024-08-11", "description": "test", "amount": 100.0}
]
```"#,
    );

    let correction = CorrectionLoop::new(&llm, CorrectorConfig::default());
    let mut surface = ScriptedSurface::new([
        "add a transaction on 2024-08-11 for 100.00 described as test",
        "ok",
    ]);

    let summary = correction.run(statement(), &mut surface);

    assert_eq!(llm.call_count(), 1);
    assert_eq!(summary.edits_applied, 1);
    assert_eq!(summary.transactions.len(), 3);
    assert_eq!(
        summary.transactions[2],
        Transaction::new("2024-08-11", "test", 100.0)
    );

    let prompt = &llm.prompts()[0];
    assert!(prompt.contains("add a transaction on 2024-08-11 for 100.00 described as test"));
    assert!(prompt.contains("\"description\": \"Rent\""));
}

#[test]
fn sentinel_variants_make_no_calls() {
    for sentinel in ["ok", "OK", "  Ok "] {
        let llm = MockProvider::new("[]");
        let correction = CorrectionLoop::new(&llm, CorrectorConfig::default());
        let mut surface = ScriptedSurface::new([sentinel]);

        let summary = correction.run(statement(), &mut surface);

        assert_eq!(llm.call_count(), 0, "sentinel {sentinel:?}");
        assert_eq!(summary.transactions, statement());
    }
}

#[test]
fn failed_interpretation_keeps_list_and_awaits_input() {
    let llm = MockProvider::default();
    llm.push_error("connection reset");
    let interpreter = Interpreter::new(&llm);
    let mut session = CorrectionSession::new(statement(), CorrectorConfig::default());

    let outcome = session.submit("delete the coffee", &interpreter);

    assert!(matches!(
        outcome,
        StepOutcome::Rejected(CorrectorError::InvocationFailure(_))
    ));
    assert_eq!(session.current(), statement().as_slice());
    assert_eq!(session.state(), SessionState::AwaitingInput);
}

#[test]
fn loop_survives_failures_and_applies_later_edits() {
    let llm = MockProvider::default();
    llm.push_response("Sure! I removed it.");
    llm.push_response(r#"[{"date": "2024-08-01", "description": "Rent"}]"#);
    llm.push_response(r#"[{"date": "2024-08-01", "description": "Rent", "amount": -1200}]"#);

    let correction = CorrectionLoop::new(&llm, CorrectorConfig::default());
    let mut surface = ScriptedSurface::new([
        "delete the coffee",
        "delete the coffee please",
        "",
        "remove the coffee purchase",
        "ok",
    ]);

    let summary = correction.run(statement(), &mut surface);

    assert_eq!(llm.call_count(), 3);
    assert_eq!(summary.edits_rejected, 2);
    assert_eq!(summary.edits_applied, 1);
    assert_eq!(
        summary.transactions,
        vec![Transaction::new("2024-08-01", "Rent", -1200.0)]
    );
    assert!(matches!(
        surface.rejections()[0].1,
        CorrectorError::MalformedResponse(_)
    ));
    assert!(matches!(
        surface.rejections()[1].1,
        CorrectorError::IncompleteRecord { index: 0, .. }
    ));
}

#[test]
fn extraction_and_correction_share_one_provider() {
    use tally_extractor::{Extractor, ExtractorConfig};

    let llm = MockProvider::default();
    llm.push_response(r#"[{"date": "2024-08-03", "description": "Coffee", "amount": -3.5}]"#);
    llm.push_response("[]");

    let extractor = Extractor::new(&llm, ExtractorConfig::default()).unwrap();
    let extracted = extractor.extract("08/03 COFFEE -3.50").unwrap();

    let correction = CorrectionLoop::new(&llm, CorrectorConfig::default());
    let mut surface = ScriptedSurface::new(["delete the coffee", "ok"]);
    let summary = correction.run(extracted.transactions, &mut surface);

    assert!(summary.transactions.is_empty());
    assert_eq!(llm.call_count(), 2);
}
