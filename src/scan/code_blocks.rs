//! Implicit API claims from documentation code examples.

use lazy_static::lazy_static;
use regex::Regex;

use crate::claims::{ClaimType, ExtractedClaim, CODE_EXAMPLE_CONFIDENCE};

lazy_static! {
    static ref FUNCTION_CALL: Regex = Regex::new(r"(\w+)\s*\([^)]*\)").unwrap();
    static ref METHOD_CALL: Regex = Regex::new(r"(\w+)\.(\w+)\s*\([^)]*\)").unwrap();
}

/// Context label for the `index`-th code example of a document.
pub fn example_context(index: usize) -> String {
    format!("code_example_{}", index)
}

/// Every call in `code` claims that the callee exists. Function claims come
/// first, then method claims.
pub fn analyze_example(code: &str, source_file: &str, index: usize) -> Vec<ExtractedClaim> {
    let context = example_context(index);
    let claim = |text: String| ExtractedClaim {
        text,
        source_file: source_file.to_string(),
        line_number: 0,
        claim_type: ClaimType::Api,
        confidence: CODE_EXAMPLE_CONFIDENCE,
        context: context.clone(),
    };

    let functions = FUNCTION_CALL
        .captures_iter(code)
        .map(|caps| format!("Function '{}' exists and can be called", &caps[1]));
    let methods = METHOD_CALL
        .captures_iter(code)
        .map(|caps| format!("Object '{}' has method '{}'", &caps[1], &caps[2]));

    functions.chain(methods).map(claim).collect()
}
