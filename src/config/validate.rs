//! Required-field validation for destinations, run once over the whole list
//! immediately before save. Errors are aggregated, never fail-fast.

use std::collections::HashSet;

use thiserror::Error;

use super::models::{ChannelConfig, ChannelType, Destination};

/// The aggregated list of reasons a save was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Configuration is invalid: {}", .0.join("; "))]
pub struct ValidationErrors(pub Vec<String>);

/// Returns one human-readable message per missing required field of a single
/// destination. `index` is the zero-based position in the destination list;
/// messages report it one-based.
pub fn validate(index: usize, destination: &Destination) -> Vec<String> {
    let mut errors = Vec::new();
    let row = index + 1;
    let channel = destination.channel_type();

    let mut require = |label: &str, value: &str| {
        if value.trim().is_empty() {
            errors.push(format!("Destination {row} ({channel}): {label} is required"));
        }
    };

    match &destination.config {
        ChannelConfig::Email(email) => {
            let port = if email.port == 0 {
                String::new()
            } else {
                email.port.to_string()
            };
            require("SMTP Host", &email.host);
            require("Port", &port);
            require("Username", &email.username);
            require("Password", &email.password);
            require("Recipients", &email.recipients);
        }
        ChannelConfig::Sms(sms) => {
            require("Account SID", &sms.sid);
            require("Auth Token", &sms.token);
            require("From Number", &sms.from);
            require("To Number", &sms.to);
        }
        ChannelConfig::Pushover(pushover) => {
            require("User Key", &pushover.user_key);
            require("API Token", &pushover.api_token);
        }
        ChannelConfig::Slack { url }
        | ChannelConfig::Telegram { url }
        | ChannelConfig::MicrosoftTeams { url }
        | ChannelConfig::Discord { url }
        | ChannelConfig::Webhook { url } => {
            require("URL", url);
        }
    }

    errors
}

/// Validates every destination and the single-instance constraint. On any
/// error the caller must refuse the save; nothing is persisted partially.
pub fn validate_all(destinations: &[Destination]) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();
    let mut seen: HashSet<ChannelType> = HashSet::new();

    for (index, destination) in destinations.iter().enumerate() {
        errors.extend(validate(index, destination));
        let channel = destination.channel_type();
        if !seen.insert(channel) {
            errors.push(format!(
                "Destination {} ({channel}): only one {channel} destination is allowed",
                index + 1
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}
