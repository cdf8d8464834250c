//! "Did you mean?" suggestions using fuzzy string matching
//!
//! Uses Jaro-Winkler similarity to point at near-miss tool names.

use strsim::jaro_winkler;

/// Default similarity threshold for suggestions (0.0 to 1.0)
const DEFAULT_THRESHOLD: f64 = 0.6;

/// Find the most similar string from a list of candidates
///
/// Returns the best match if it exceeds the threshold, or None otherwise.
pub fn find_similar<'a>(input: &str, candidates: &[&'a str], threshold: f64) -> Option<&'a str> {
    candidates
        .iter()
        .map(|c| (jaro_winkler(input, c), *c))
        .filter(|(score, _)| *score > threshold)
        .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(_, name)| name)
}

/// Generate a suggestion for a tool with no golden snapshot
pub fn suggest_tool(unknown: &str, known_tools: &[String]) -> String {
    let candidates: Vec<_> = known_tools.iter().map(|s| s.as_str()).collect();

    if let Some(suggestion) = find_similar(unknown, &candidates, DEFAULT_THRESHOLD) {
        format!(
            "Did you mean '{}'?\n\nList captured snapshots with: mcpdrift golden list",
            suggestion
        )
    } else if known_tools.is_empty() {
        "No golden snapshots captured yet.\n\n\
         Capture one with: mcpdrift golden capture --tool <name> --output <file>"
            .to_string()
    } else {
        let tool_list = if known_tools.len() <= 5 {
            known_tools.join(", ")
        } else {
            format!(
                "{}, ... ({} more)",
                known_tools[..3].join(", "),
                known_tools.len() - 3
            )
        };
        format!(
            "Unknown tool '{}'.\n\n\
             Tools with snapshots: {}",
            unknown, tool_list
        )
    }
}
