//! Environment-driven defaults.
//!
//! Parsing is split from the environment lookup so the accepted spellings can
//! be tested without mutating process state.

use serde::{Deserialize, Serialize};

use crate::transport::Transport;

/// Selects how trigger generators treat out-of-range parameters.
pub const TRIGGER_POLICY_ENV: &str = "DUALSENSE_TRIGGER_POLICY";
/// Forces the transport when it cannot be inferred from report length.
pub const TRANSPORT_ENV: &str = "DUALSENSE_TRANSPORT";

/// Out-of-range handling for trigger effect parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TriggerPolicy {
    /// Clamp every parameter into its valid range; generation never fails.
    #[default]
    Clamp,
    /// Reject out-of-range parameters and produce no effect.
    Strict,
}

pub fn parse_trigger_policy(value: &str) -> Option<TriggerPolicy> {
    match value.trim().to_ascii_lowercase().as_str() {
        "clamp" | "clamped" | "lenient" => Some(TriggerPolicy::Clamp),
        "strict" | "reject" => Some(TriggerPolicy::Strict),
        _ => None,
    }
}

pub fn parse_transport(value: &str) -> Option<Transport> {
    match value.trim().to_ascii_lowercase().as_str() {
        "usb" => Some(Transport::Usb),
        "bluetooth" | "bt" => Some(Transport::Bluetooth),
        _ => None,
    }
}

/// Policy from `DUALSENSE_TRIGGER_POLICY`, falling back to [`TriggerPolicy::Clamp`].
pub fn default_trigger_policy() -> TriggerPolicy {
    std::env::var(TRIGGER_POLICY_ENV)
        .ok()
        .and_then(|value| parse_trigger_policy(&value))
        .unwrap_or_default()
}

pub fn transport_override() -> Option<Transport> {
    std::env::var(TRANSPORT_ENV)
        .ok()
        .and_then(|value| parse_transport(&value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trigger_policy() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(parse_trigger_policy("clamp"), Some(TriggerPolicy::Clamp));
        assert_eq!(parse_trigger_policy(" STRICT "), Some(TriggerPolicy::Strict));
        assert_eq!(parse_trigger_policy("reject"), Some(TriggerPolicy::Strict));
        assert_eq!(parse_trigger_policy("maybe"), None);
        assert_eq!(parse_trigger_policy(""), None);
        Ok(())
    }

    #[test]
    fn test_parse_transport() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(parse_transport("usb"), Some(Transport::Usb));
        assert_eq!(parse_transport("BT"), Some(Transport::Bluetooth));
        assert_eq!(parse_transport("bluetooth\n"), Some(Transport::Bluetooth));
        assert_eq!(parse_transport("serial"), None);
        Ok(())
    }

    #[test]
    fn test_policy_default_is_clamp() {
        assert_eq!(TriggerPolicy::default(), TriggerPolicy::Clamp);
    }
}
