use serde_json::Value;

use super::{cell, result_of};

/// Headline figure of each command, in priority order.
const HEADLINE_KEYS: [&str; 5] = ["winner_name", "annuity_payment", "final_balance", "base", "total"];

/// Print just the headline answer.
///
/// Comparisons print the winner and the spread over the worst strategy;
/// engine commands print their first headline figure.
pub fn print_minimal(value: &Value) {
    let result = result_of(value);
    let Value::Object(map) = result else {
        println!("{}", cell(result));
        return;
    };

    if let (Some(winner), Some(spread)) = (map.get("winner_name"), map.get("difference_best_vs_worst")) {
        println!("{} (+{})", cell(winner), cell(spread));
        return;
    }

    let headline = HEADLINE_KEYS
        .iter()
        .find_map(|key| map.get(*key).filter(|v| !v.is_null()));
    match headline {
        Some(val) => println!("{}", cell(val)),
        None => match map.iter().next() {
            Some((key, val)) => println!("{key}: {}", cell(val)),
            None => println!("{}", cell(result)),
        },
    }
}
