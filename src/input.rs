// input.rs — Key code → action table.
//
// One lookup per loop iteration. Keys are case-sensitive: 'q' quits,
// 'Q' does nothing.

use crate::mode::Mode;

/// Something the operator asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    SetMode(Mode),
    IncreaseSkip,
    DecreaseSkip,
}

/// Every bound key. `+`/`=` and `-`/`_` share a physical key on most
/// layouts, so both characters are bound.
pub const KEY_BINDINGS: [(char, Action); 9] = [
    ('q', Action::Quit),
    ('1', Action::SetMode(Mode::EdgeDetection)),
    ('2', Action::SetMode(Mode::MotionDetection)),
    ('3', Action::SetMode(Mode::RegionOfInterest)),
    ('4', Action::SetMode(Mode::Original)),
    ('+', Action::IncreaseSkip),
    ('=', Action::IncreaseSkip),
    ('-', Action::DecreaseSkip),
    ('_', Action::DecreaseSkip),
];

/// Look up the action bound to `key`, if any.
pub fn action_for_key(key: char) -> Option<Action> {
    KEY_BINDINGS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|&(_, action)| action)
}

/// Controls banner printed before the loop starts.
pub fn controls_help() -> &'static str {
    "Controls:\n  \
     1 - Edge detection\n  \
     2 - Motion detection\n  \
     3 - ROI processing\n  \
     4 - Normal view\n  \
     + - Skip more frames\n  \
     - - Skip fewer frames\n  \
     q - Quit"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_keys() {
        assert_eq!(action_for_key('q'), Some(Action::Quit));
        assert_eq!(action_for_key('1'), Some(Action::SetMode(Mode::EdgeDetection)));
        assert_eq!(action_for_key('2'), Some(Action::SetMode(Mode::MotionDetection)));
        assert_eq!(action_for_key('3'), Some(Action::SetMode(Mode::RegionOfInterest)));
        assert_eq!(action_for_key('4'), Some(Action::SetMode(Mode::Original)));
        assert_eq!(action_for_key('+'), Some(Action::IncreaseSkip));
        assert_eq!(action_for_key('='), Some(Action::IncreaseSkip));
        assert_eq!(action_for_key('-'), Some(Action::DecreaseSkip));
        assert_eq!(action_for_key('_'), Some(Action::DecreaseSkip));
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(action_for_key('Q'), None);
    }

    #[test]
    fn test_unbound_keys() {
        for k in ['a', '5', '0', ' ', '\n', 'x'] {
            assert_eq!(action_for_key(k), None, "{k:?}");
        }
    }

    #[test]
    fn test_help_mentions_every_mode_key() {
        let help = controls_help();
        for k in ["1 -", "2 -", "3 -", "4 -", "q -"] {
            assert!(help.contains(k), "missing {k}");
        }
    }
}
