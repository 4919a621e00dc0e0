//! State machine for the reserved `default-rule`, the fallback applied when no
//! other rule matches.
//!
//! Two toggles drive it: "AI Processing" and "Include Original Message". The
//! rule must always deliver at least the original message while AI is off, so
//! disabling AI forces original-message inclusion and the include-original
//! control is ignored until AI is turned back on. The operator's explicit
//! include-original choice is remembered separately so turning AI back on
//! restores it instead of resetting to a default.

use super::models::{MatchSpec, NotifySpec, Rule, TextGate, Toggle, DEFAULT_RULE_NAME};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultRule {
    /// The backing rule, kept normalized. Fields the state machine does not
    /// govern (preprompt, match regexes, gate regexes) pass through untouched.
    rule: Rule,
    /// Last explicitly chosen include-original value. Survives an AI off/on
    /// cycle within the session even while the persisted value is forced true.
    include_original: bool,
}

impl DefaultRule {
    /// The safe initial state synthesized when a document has no default rule:
    /// AI off, original-message delivery on.
    pub fn new() -> Self {
        DefaultRule::from_rule(Rule {
            name: DEFAULT_RULE_NAME.to_string(),
            enabled: true,
            preprompt: String::new(),
            r#match: MatchSpec::default(),
            notify: NotifySpec {
                destinations: Vec::new(),
                send_og_text: TextGate {
                    enabled: true,
                    ..TextGate::default()
                },
                send_ai_text: TextGate::default(),
                original_message: Some(Toggle { enabled: true }),
                ai_processed: Some(Toggle { enabled: false }),
            },
        })
    }

    /// Adopts a loaded `default-rule`, normalizing it through the state
    /// machine so a document written by another tool cannot leave both notify
    /// channels off.
    pub fn from_rule(mut rule: Rule) -> Self {
        rule.name = DEFAULT_RULE_NAME.to_string();
        let ai_enabled = rule
            .notify
            .ai_processed
            .as_ref()
            .is_some_and(|t| t.enabled);
        let include_original = rule
            .notify
            .original_message
            .as_ref()
            .is_some_and(|t| t.enabled);

        let mut default_rule = DefaultRule {
            rule,
            include_original,
        };
        default_rule.apply(ai_enabled);
        default_rule
    }

    pub fn set_ai_enabled(&mut self, enabled: bool) {
        self.apply(enabled);
    }

    /// Records the operator's include-original choice. Ignored while AI is
    /// off: the control is presented checked-and-disabled and the effective
    /// value stays true.
    pub fn set_include_original(&mut self, enabled: bool) {
        if !self.ai_enabled() {
            return;
        }
        self.include_original = enabled;
        self.apply(true);
    }

    pub fn set_preprompt(&mut self, preprompt: impl Into<String>) {
        self.rule.preprompt = preprompt.into();
    }

    pub fn ai_enabled(&self) -> bool {
        self.rule
            .notify
            .ai_processed
            .as_ref()
            .is_some_and(|t| t.enabled)
    }

    /// The effective include-original value: always true while AI is off.
    pub fn include_original(&self) -> bool {
        self.rule
            .notify
            .original_message
            .as_ref()
            .is_some_and(|t| t.enabled)
    }

    /// Whether at least one of the two notify channels is active.
    pub fn is_enabled(&self) -> bool {
        self.rule.enabled
    }

    pub fn preprompt(&self) -> &str {
        &self.rule.preprompt
    }

    /// Renders the state back into a persistable rule, with its destination
    /// list replaced by the full current destination-name set.
    pub fn to_rule(&self, destination_names: Vec<String>) -> Rule {
        let mut rule = self.rule.clone();
        rule.notify.destinations = destination_names;
        rule
    }

    /// Re-derives every governed field from the AI toggle and the remembered
    /// include-original choice.
    fn apply(&mut self, ai_enabled: bool) {
        let original = !ai_enabled || self.include_original;
        let notify = &mut self.rule.notify;

        notify.ai_processed.get_or_insert_with(Toggle::default).enabled = ai_enabled;
        notify.send_ai_text.enabled = ai_enabled;
        notify
            .original_message
            .get_or_insert_with(Toggle::default)
            .enabled = original;
        notify.send_og_text.enabled = original;

        // Enabled exactly while at least one channel is active.
        self.rule.enabled = ai_enabled || original;
    }
}

impl Default for DefaultRule {
    fn default() -> Self {
        DefaultRule::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesized_state_is_ai_off_original_on() {
        let rule = DefaultRule::new();
        assert!(!rule.ai_enabled());
        assert!(rule.include_original());
        assert!(rule.is_enabled());
    }

    #[test]
    fn turning_ai_off_forces_original_message_on() {
        let mut rule = DefaultRule::new();
        rule.set_ai_enabled(true);
        rule.set_include_original(false);

        rule.set_ai_enabled(false);

        assert!(rule.include_original());
        let persisted = rule.to_rule(Vec::new());
        assert!(persisted.notify.send_og_text.enabled);
        assert!(!persisted.notify.send_ai_text.enabled);
        assert!(persisted.notify.original_message.unwrap().enabled);
        assert!(!persisted.notify.ai_processed.unwrap().enabled);
    }

    #[test]
    fn turning_ai_on_restores_the_explicit_include_original_choice() {
        let mut rule = DefaultRule::new();
        rule.set_ai_enabled(true);
        rule.set_include_original(false);
        rule.set_ai_enabled(false);

        rule.set_ai_enabled(true);

        assert!(!rule.include_original());
        let persisted = rule.to_rule(Vec::new());
        assert!(!persisted.notify.send_og_text.enabled);
        assert!(persisted.notify.send_ai_text.enabled);
    }

    #[test]
    fn include_original_toggle_is_ignored_while_ai_is_off() {
        let mut rule = DefaultRule::new();
        rule.set_include_original(false);

        assert!(rule.include_original());
        assert!(rule.is_enabled());
    }

    #[test]
    fn enabled_tracks_channel_activity() {
        let mut rule = DefaultRule::new();
        rule.set_ai_enabled(true);
        rule.set_include_original(false);
        assert!(rule.is_enabled());

        // AI on and original off, then AI off: original is forced back on, so
        // the rule can never end up enabled with both channels dark.
        rule.set_ai_enabled(false);
        assert!(rule.is_enabled());
        assert!(rule.include_original());
    }

    #[test]
    fn loading_a_rule_with_both_channels_off_is_repaired() {
        let raw = Rule {
            name: DEFAULT_RULE_NAME.to_string(),
            enabled: false,
            preprompt: "Summarize.".to_string(),
            r#match: MatchSpec::default(),
            notify: NotifySpec {
                original_message: Some(Toggle { enabled: false }),
                ai_processed: Some(Toggle { enabled: false }),
                ..NotifySpec::default()
            },
        };

        let rule = DefaultRule::from_rule(raw);

        assert!(!rule.ai_enabled());
        assert!(rule.include_original());
        assert!(rule.is_enabled());
        assert_eq!(rule.preprompt(), "Summarize.");
    }

    #[test]
    fn ungoverned_fields_survive_the_round_trip() {
        let mut raw_match = MatchSpec::default();
        raw_match.og_text_regex = "ERROR.*".to_string();
        let raw = Rule {
            name: DEFAULT_RULE_NAME.to_string(),
            enabled: true,
            preprompt: "Be terse.".to_string(),
            r#match: raw_match.clone(),
            notify: NotifySpec {
                ai_processed: Some(Toggle { enabled: true }),
                original_message: Some(Toggle { enabled: true }),
                ..NotifySpec::default()
            },
        };

        let rule = DefaultRule::from_rule(raw);
        let persisted = rule.to_rule(vec!["Webhook".to_string()]);

        assert_eq!(persisted.preprompt, "Be terse.");
        assert_eq!(persisted.r#match, raw_match);
        assert_eq!(persisted.notify.destinations, vec!["Webhook"]);
    }
}
