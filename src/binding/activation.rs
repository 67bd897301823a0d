//! Activation events and their outcomes.

use crate::config::ENTER_KEY_CODE;
use crate::navigation::NavigationOutcome;

/// An activation delivered to a bound element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationEvent {
    /// A pointer click.
    Click,
    /// A keydown carrying the given key code.
    Keydown {
        /// Key code of the pressed key. Only Enter (13) activates.
        key_code: u16,
    },
}

impl ActivationEvent {
    /// Whether this event activates a binding.
    ///
    /// Clicks always do; keydowns only for Enter.
    pub fn activates(&self) -> bool {
        match self {
            ActivationEvent::Click => true,
            ActivationEvent::Keydown { key_code } => *key_code == ENTER_KEY_CODE,
        }
    }
}

/// What routing an activation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// No descriptor is bound for the addressed element; nothing happened.
    NotBound,
    /// The binding does not intercept (plain GET hyperlink); native
    /// navigation is left alone.
    Passthrough,
    /// A keydown with a non-Enter key; dropped without touching the
    /// transport.
    Ignored,
    /// The request was sent, the default action was prevented, and
    /// propagation was stopped.
    Intercepted {
        /// What the response handler decided.
        navigation: NavigationOutcome,
    },
}

impl ActivationOutcome {
    /// Whether the browser-native default action was prevented.
    pub fn default_prevented(&self) -> bool {
        matches!(self, ActivationOutcome::Intercepted { .. })
    }

    /// Whether event propagation was stopped.
    pub fn propagation_stopped(&self) -> bool {
        matches!(self, ActivationOutcome::Intercepted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_activates() {
        assert!(ActivationEvent::Click.activates());
    }

    #[test]
    fn test_enter_keydown_activates() {
        assert!(ActivationEvent::Keydown { key_code: 13 }.activates());
    }

    #[test]
    fn test_other_keydowns_do_not_activate() {
        for key_code in [9, 27, 32, 65] {
            assert!(
                !ActivationEvent::Keydown { key_code }.activates(),
                "key code {key_code} must not activate"
            );
        }
    }

    #[test]
    fn test_only_interception_prevents_default() {
        let intercepted = ActivationOutcome::Intercepted {
            navigation: NavigationOutcome::Stay,
        };
        assert!(intercepted.default_prevented());
        assert!(intercepted.propagation_stopped());

        for outcome in [
            ActivationOutcome::NotBound,
            ActivationOutcome::Passthrough,
            ActivationOutcome::Ignored,
        ] {
            assert!(!outcome.default_prevented());
            assert!(!outcome.propagation_stopped());
        }
    }
}
