use serde::{Deserialize, Serialize};

use super::default_rule::DefaultRule;

/// Reserved name of the fallback rule applied when no other rule matches.
pub const DEFAULT_RULE_NAME: &str = "default-rule";

/// Port used when an `smtp://` URI carries none, and in the blank Email template.
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// The notification channel types an operator can configure.
/// Serialized as the display labels the rest of LogForge uses on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelType {
    Email,
    #[serde(rename = "SMS")]
    Sms,
    Pushover,
    Slack,
    Telegram,
    #[serde(rename = "Microsoft Teams")]
    MicrosoftTeams,
    Discord,
    Webhook,
}

impl ChannelType {
    /// The wire/display label, identical to the serde representation.
    pub fn label(&self) -> &'static str {
        match self {
            ChannelType::Email => "Email",
            ChannelType::Sms => "SMS",
            ChannelType::Pushover => "Pushover",
            ChannelType::Slack => "Slack",
            ChannelType::Telegram => "Telegram",
            ChannelType::MicrosoftTeams => "Microsoft Teams",
            ChannelType::Discord => "Discord",
            ChannelType::Webhook => "Webhook",
        }
    }
}

impl std::fmt::Display for ChannelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Comma-separated recipient addresses.
    pub recipients: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        EmailConfig {
            host: String::new(),
            port: DEFAULT_SMTP_PORT,
            username: String::new(),
            password: String::new(),
            recipients: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SmsConfig {
    pub sid: String,
    pub token: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PushoverConfig {
    pub user_key: String,
    pub api_token: String,
}

/// Structured, type-specific configuration for one destination.
///
/// Channel types without a structured decomposition carry their webhook URL
/// or credential string verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelConfig {
    Email(EmailConfig),
    Sms(SmsConfig),
    Pushover(PushoverConfig),
    Slack { url: String },
    Telegram { url: String },
    MicrosoftTeams { url: String },
    Discord { url: String },
    Webhook { url: String },
}

impl ChannelConfig {
    /// The blank template for a channel type, used when a destination is
    /// created or its type is switched.
    pub fn blank(channel_type: ChannelType) -> Self {
        match channel_type {
            ChannelType::Email => ChannelConfig::Email(EmailConfig::default()),
            ChannelType::Sms => ChannelConfig::Sms(SmsConfig::default()),
            ChannelType::Pushover => ChannelConfig::Pushover(PushoverConfig::default()),
            ChannelType::Slack => ChannelConfig::Slack { url: String::new() },
            ChannelType::Telegram => ChannelConfig::Telegram { url: String::new() },
            ChannelType::MicrosoftTeams => ChannelConfig::MicrosoftTeams { url: String::new() },
            ChannelType::Discord => ChannelConfig::Discord { url: String::new() },
            ChannelType::Webhook => ChannelConfig::Webhook { url: String::new() },
        }
    }

    pub fn channel_type(&self) -> ChannelType {
        match self {
            ChannelConfig::Email(_) => ChannelType::Email,
            ChannelConfig::Sms(_) => ChannelType::Sms,
            ChannelConfig::Pushover(_) => ChannelType::Pushover,
            ChannelConfig::Slack { .. } => ChannelType::Slack,
            ChannelConfig::Telegram { .. } => ChannelType::Telegram,
            ChannelConfig::MicrosoftTeams { .. } => ChannelType::MicrosoftTeams,
            ChannelConfig::Discord { .. } => ChannelType::Discord,
            ChannelConfig::Webhook { .. } => ChannelType::Webhook,
        }
    }
}

/// One configured notification channel instance, in structured (decoded) form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub enabled: bool,
    pub config: ChannelConfig,
}

impl Destination {
    pub fn new(channel_type: ChannelType) -> Self {
        Destination {
            enabled: true,
            config: ChannelConfig::blank(channel_type),
        }
    }

    pub fn channel_type(&self) -> ChannelType {
        self.config.channel_type()
    }

    /// The destination's wire name (the channel type label).
    pub fn name(&self) -> &'static str {
        self.channel_type().label()
    }

    /// Switches the destination to a different channel type. All structured
    /// fields reset to the new type's blank template so stale, type-mismatched
    /// values cannot survive the change; `enabled` is preserved.
    pub fn switch_type(&mut self, channel_type: ChannelType) {
        if self.channel_type() != channel_type {
            self.config = ChannelConfig::blank(channel_type);
        }
    }
}

/// A destination as persisted: the structured fields collapsed into the
/// canonical URI string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDestination {
    pub name: ChannelType,
    pub enabled: bool,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Toggle {
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TextGate {
    pub enabled: bool,
    #[serde(default)]
    pub og_text_regex: String,
    #[serde(default)]
    pub ai_text_regex: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MatchSpec {
    /// Empty means "match all sources".
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub og_text_regex: String,
    #[serde(default)]
    pub ai_text_regex: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NotifySpec {
    #[serde(default)]
    pub destinations: Vec<String>,
    #[serde(default)]
    pub send_og_text: TextGate,
    #[serde(default)]
    pub send_ai_text: TextGate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_message: Option<Toggle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_processed: Option<Toggle>,
}

/// A notification policy mapping matched log events to destinations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
    pub enabled: bool,
    #[serde(default)]
    pub preprompt: String,
    #[serde(default)]
    pub r#match: MatchSpec,
    #[serde(default)]
    pub notify: NotifySpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OllamaSettings {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiSettings {
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ollama: Option<OllamaSettings>,
}

impl Default for AiSettings {
    fn default() -> Self {
        AiSettings {
            provider: "openai".to_string(),
            ollama: None,
        }
    }
}

/// The configuration document exactly as it crosses the store boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RawDocument {
    #[serde(default)]
    pub destinations: Vec<RawDestination>,
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(default)]
    pub ai: AiSettings,
}

/// The in-memory form of the configuration document during an edit session.
///
/// Destinations are decoded into structured fields and the reserved
/// `default-rule` is held apart from the general rule list, so no mutation
/// site has to search for it by name.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub destinations: Vec<Destination>,
    pub rules: Vec<Rule>,
    pub default_rule: DefaultRule,
    pub ai: AiSettings,
}

impl Default for Document {
    fn default() -> Self {
        Document {
            destinations: Vec::new(),
            rules: Vec::new(),
            default_rule: DefaultRule::default(),
            ai: AiSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_type_labels_round_trip_through_serde() {
        for (channel_type, label) in [
            (ChannelType::Sms, "\"SMS\""),
            (ChannelType::MicrosoftTeams, "\"Microsoft Teams\""),
            (ChannelType::Email, "\"Email\""),
        ] {
            let json = serde_json::to_string(&channel_type).unwrap();
            assert_eq!(json, label);
            let parsed: ChannelType = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, channel_type);
        }
    }

    #[test]
    fn switching_type_resets_fields_and_preserves_enabled() {
        let mut dest = Destination {
            enabled: false,
            config: ChannelConfig::Email(EmailConfig {
                host: "smtp.example.com".to_string(),
                port: 2525,
                username: "ops".to_string(),
                password: "hunter2".to_string(),
                recipients: "alerts@example.com".to_string(),
            }),
        };

        dest.switch_type(ChannelType::Sms);

        assert!(!dest.enabled);
        assert_eq!(dest.config, ChannelConfig::Sms(SmsConfig::default()));
    }

    #[test]
    fn switching_to_the_same_type_keeps_fields() {
        let config = ChannelConfig::Slack {
            url: "https://hooks.slack.com/services/T000/B000/XXX".to_string(),
        };
        let mut dest = Destination {
            enabled: true,
            config: config.clone(),
        };

        dest.switch_type(ChannelType::Slack);

        assert_eq!(dest.config, config);
    }

    #[test]
    fn rule_match_field_uses_the_wire_name() {
        let rule = Rule {
            name: "r1".to_string(),
            enabled: true,
            preprompt: String::new(),
            r#match: MatchSpec::default(),
            notify: NotifySpec::default(),
        };
        let value = serde_json::to_value(&rule).unwrap();
        assert!(value.get("match").is_some());
    }
}
