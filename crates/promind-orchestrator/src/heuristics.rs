//! Local output-weakness heuristics
//!
//! Cheap signals computed without an LLM call: degenerate outputs are short
//! or dominated by repeated lines. Recorded as run metadata alongside the
//! evaluator's score.

use std::collections::HashSet;

/// Minimum significant length for a non-weak output
const MIN_OUTPUT_LEN: usize = 50;

/// Minimum ratio of unique lines for a non-weak output
const MIN_UNIQUE_RATIO: f64 = 0.5;

/// Whether an output looks degenerate: too short or too repetitive
pub fn is_output_weak(output: &str) -> bool {
    let trimmed = output.trim();
    if trimmed.len() < MIN_OUTPUT_LEN {
        return true;
    }
    unique_line_ratio(trimmed) < MIN_UNIQUE_RATIO
}

/// Line-uniqueness ratio in [0, 1]; empty or near-empty output scores 0
pub fn heuristic_effectiveness(output: &str) -> f64 {
    let trimmed = output.trim();
    if trimmed.len() < 30 {
        return 0.0;
    }
    (unique_line_ratio(trimmed) * 1000.0).round() / 1000.0
}

fn unique_line_ratio(text: &str) -> f64 {
    let lines: Vec<&str> = text.lines().collect();
    let unique: HashSet<&str> = lines.iter().copied().collect();
    unique.len() as f64 / lines.len().max(1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_output_is_weak() {
        assert!(is_output_weak(""));
        assert!(is_output_weak("ok"));
        assert!(is_output_weak("   short answer   "));
    }

    #[test]
    fn test_repetitive_output_is_weak() {
        let repeated = "same line of generated text\n".repeat(10);
        assert!(is_output_weak(&repeated));
        assert!(heuristic_effectiveness(&repeated) < 0.5);
    }

    #[test]
    fn test_varied_output_is_not_weak() {
        let varied = "1. Define the data model for rentals\n\
                      2. Create the database schema\n\
                      3. Develop the backend API\n\
                      4. Build the frontend UI\n\
                      5. Implement login and roles";
        assert!(!is_output_weak(varied));
        assert_eq!(heuristic_effectiveness(varied), 1.0);
    }

    #[test]
    fn test_heuristic_effectiveness_zero_on_empty() {
        assert_eq!(heuristic_effectiveness(""), 0.0);
        assert_eq!(heuristic_effectiveness("tiny"), 0.0);
    }
}
