//! Keeps the general rule list consistent with the destination list.
//!
//! Policy: every enabled destination gets an auto-created single-destination
//! rule, and a single-destination rule is dropped when its destination is
//! removed. The reserved default rule is handled separately (see
//! `default_rule`); its destination list mirrors the full destination set and
//! is rewritten by the assembler on every save.

use super::models::{Destination, MatchSpec, NotifySpec, Rule, TextGate};

pub const AUTO_RULE_PREPROMPT: &str = "Summarize logs.";

/// Reconciles `rules` against `destinations` and returns the updated list.
/// Idempotent: a second pass with unchanged destinations returns identical
/// output. No rule other than single-destination rules is touched.
pub fn sync(destinations: &[Destination], rules: &[Rule]) -> Vec<Rule> {
    let names: Vec<&str> = destinations.iter().map(|d| d.name()).collect();

    // Drop single-destination rules whose destination no longer exists.
    let mut synced: Vec<Rule> = rules
        .iter()
        .filter(|rule| match single_destination(rule) {
            Some(target) => names.contains(&target),
            None => true,
        })
        .cloned()
        .collect();

    // Auto-create a rule for every enabled destination that lacks one.
    for destination in destinations.iter().filter(|d| d.enabled) {
        let name = destination.name();
        if synced
            .iter()
            .any(|rule| single_destination(rule) == Some(name))
        {
            continue;
        }
        let rule_name = free_rule_name(&synced, name);
        synced.push(auto_rule(rule_name, name));
    }

    synced
}

/// The names of all destinations, in document order. Used to mirror the full
/// destination set into the default rule.
pub fn destination_names(destinations: &[Destination]) -> Vec<String> {
    destinations.iter().map(|d| d.name().to_string()).collect()
}

/// The destination a single-destination rule was generated for, if any.
fn single_destination(rule: &Rule) -> Option<&str> {
    match rule.notify.destinations.as_slice() {
        [only] => Some(only.as_str()),
        _ => None,
    }
}

/// Deterministic generated-rule name: `NotifyTo` plus the destination name
/// with whitespace stripped, suffixed on collision with an unrelated rule.
fn free_rule_name(rules: &[Rule], destination_name: &str) -> String {
    let base = format!(
        "NotifyTo{}",
        destination_name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("")
    );
    if !rules.iter().any(|rule| rule.name == base) {
        return base;
    }
    let mut suffix = 1;
    loop {
        let candidate = format!("{base}-{suffix}");
        if !rules.iter().any(|rule| rule.name == candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

fn auto_rule(name: String, destination_name: &str) -> Rule {
    Rule {
        name,
        enabled: true,
        preprompt: AUTO_RULE_PREPROMPT.to_string(),
        r#match: MatchSpec::default(),
        notify: NotifySpec {
            destinations: vec![destination_name.to_string()],
            send_og_text: TextGate {
                enabled: true,
                ..TextGate::default()
            },
            send_ai_text: TextGate::default(),
            original_message: None,
            ai_processed: None,
        },
    }
}
