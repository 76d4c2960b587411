//! Property-based tests for the row grammar and the halting policy.

use coa_validator::core::pdf_parser::TextPages;
use coa_validator::core::validator::FieldValidator;
use coa_validator::utils::document_processor::DocumentProcessor;
use coa_validator::{ProcessingResult, ReasonCode};
use proptest::prelude::*;

fn code() -> impl Strategy<Value = String> {
    prop::collection::vec("[0-9]{1,3}", 1..4).prop_map(|groups| groups.join("."))
}

fn word() -> impl Strategy<Value = String> {
    "[A-Za-z]{1,8}"
}

fn valid_row() -> impl Strategy<Value = String> {
    (code(), code(), "[SN]", prop::collection::vec(word(), 1..5), "[A-Z0-9]{1,3}").prop_map(
        |(code, class, flag, description, last)| {
            format!("{} {} {} {} {}", code, class, flag, description.join(" "), last)
        },
    )
}

proptest! {
    #[test]
    fn rows_with_fewer_than_five_tokens_are_rejected(tokens in prop::collection::vec("[0-9A-Za-z.]{1,10}", 0..5)) {
        let outcome = FieldValidator::default().validate_row(&tokens.join(" "));
        prop_assert_eq!(outcome.reason(), Some(ReasonCode::TooFewTokens));
    }

    #[test]
    fn generated_rows_are_valid(row in valid_row()) {
        prop_assert!(FieldValidator::default().validate_row(&row).is_valid());
    }

    #[test]
    fn non_numeric_code_is_rejected_regardless_of_rest(
        bad in "[0-9]{0,2}[A-Za-z,;-][0-9A-Za-z]{0,3}",
        row in valid_row(),
    ) {
        let rest: Vec<&str> = row.split(' ').skip(1).collect();
        let outcome = FieldValidator::default().validate_row(&format!("{} {}", bad, rest.join(" ")));
        prop_assert_eq!(outcome.reason(), Some(ReasonCode::InvalidCode));
    }

    #[test]
    fn non_numeric_classification_is_rejected(bad in "[A-Za-z]{1,4}", row in valid_row()) {
        let mut tokens: Vec<&str> = row.split(' ').collect();
        tokens[1] = bad.as_str();
        let outcome = FieldValidator::default().validate_row(&tokens.join(" "));
        prop_assert_eq!(outcome.reason(), Some(ReasonCode::InvalidClassification));
    }

    #[test]
    fn letterless_description_is_rejected(description in prop::collection::vec("[0-9.,/-]{1,6}", 1..4)) {
        let row = format!("1 1 S {} X", description.join(" "));
        let outcome = FieldValidator::default().validate_row(&row);
        prop_assert_eq!(outcome.reason(), Some(ReasonCode::NoLetterInDescription));
    }

    #[test]
    fn long_mixed_token_is_glued(letters in "[A-Za-z]{1,6}", digits in "[0-9]{8,12}") {
        let token = format!("{}{}", letters, digits);
        let row = format!("1 1 S Conta {} X", token);
        match FieldValidator::default().validate_row(&row) {
            coa_validator::ValidationOutcome::Invalid { reason, message } => {
                prop_assert_eq!(reason, ReasonCode::GluedToken);
                prop_assert!(message.contains(&token));
            }
            coa_validator::ValidationOutcome::Valid => prop_assert!(false, "expected a glued token"),
        }
    }

    #[test]
    fn lines_not_starting_with_a_digit_are_skipped(lines in prop::collection::vec("[A-Za-z][ -~]{0,20}", 0..10)) {
        let report = DocumentProcessor::default().process(&TextPages::from_text(&lines.join("\n")));
        prop_assert_eq!(report.result, ProcessingResult::Success);
        prop_assert_eq!(report.summary.rows_validated, 0);
    }

    #[test]
    fn nothing_after_a_fatal_row_is_evaluated(before in prop::collection::vec(valid_row(), 0..5), after in prop::collection::vec(valid_row(), 0..5)) {
        let mut lines = before.clone();
        lines.push("1 1 S X".to_string());
        lines.extend(after.iter().map(|_| "1 1 S Loc123456789 X".to_string()));

        let report = DocumentProcessor::default().process(&TextPages::from_text(&lines.join("\n")));
        let record = report.result.fatal_record().expect("fatal record");
        prop_assert_eq!(record.line, Some(before.len() + 1));
        prop_assert!(report.result.non_fatal_records().is_empty());
        prop_assert_eq!(report.summary.rows_validated, before.len() + 1);
    }
}
