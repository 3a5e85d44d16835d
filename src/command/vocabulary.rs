//! The closed command vocabulary and its synonym table
//!
//! Every command a poller can ever receive is listed here. The model's reply
//! is free text, so each command carries a set of surface forms ("variants")
//! that count as a mention of it. Variants are stored lowercase because the
//! extractor lowercases the reply before matching.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A canonical action understood by the downstream game client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Command {
    /// Walk the avatar to the left
    MoveLeft,
    /// Walk the avatar to the right
    MoveRight,
    /// Spin counterclockwise
    RotateLeft,
    /// Spin clockwise
    RotateRight,
    /// Grow in size
    Enlarge,
    /// Shrink in size
    Shrink,
    /// Single jump
    Jump,
    /// Squash down to half height
    Crouch,
    /// Return to the normal pose
    Stretch,
}

impl Command {
    /// All commands in definition order. Extraction results follow this order.
    pub const ALL: [Command; 9] = [
        Command::MoveLeft,
        Command::MoveRight,
        Command::RotateLeft,
        Command::RotateRight,
        Command::Enlarge,
        Command::Shrink,
        Command::Jump,
        Command::Crouch,
        Command::Stretch,
    ];

    /// Wire identifier sent to pollers
    pub fn as_str(self) -> &'static str {
        match self {
            Command::MoveLeft => "move-left",
            Command::MoveRight => "move-right",
            Command::RotateLeft => "rotate-left",
            Command::RotateRight => "rotate-right",
            Command::Enlarge => "enlarge",
            Command::Shrink => "shrink",
            Command::Jump => "jump",
            Command::Crouch => "crouch",
            Command::Stretch => "stretch",
        }
    }

    /// Surface forms that imply this command.
    ///
    /// The wire identifier is always the first entry. No variant contains a
    /// variant of a different command as a substring.
    pub fn variants(self) -> &'static [&'static str] {
        match self {
            Command::MoveLeft => &[
                "move-left",
                "move left",
                "go left",
                "walk left",
                "step left",
                "向左移動",
                "往左移動",
                "左移",
                "向左走",
                "往左走",
            ],
            Command::MoveRight => &[
                "move-right",
                "move right",
                "go right",
                "walk right",
                "step right",
                "向右移動",
                "往右移動",
                "右移",
                "向右走",
                "往右走",
            ],
            Command::RotateLeft => &[
                "rotate-left",
                "rotate left",
                "turn left",
                "spin left",
                "counterclockwise",
                "向左旋轉",
                "往左轉",
                "左轉",
                "逆時針轉",
            ],
            Command::RotateRight => &[
                "rotate-right",
                "rotate right",
                "turn right",
                "spin right",
                "向右旋轉",
                "往右轉",
                "右轉",
                "順時針轉",
            ],
            Command::Enlarge => &[
                "enlarge",
                "grow bigger",
                "get bigger",
                "scale up",
                "放大",
                "變大",
                "身體變大",
            ],
            Command::Shrink => &[
                "shrink",
                "get smaller",
                "scale down",
                "縮小",
                "變小",
                "身體變小",
            ],
            Command::Jump => &[
                "jump",
                "leap",
                "跳躍",
                "跳起來",
                "跳上去",
                "往上跳",
                "跳",
                "跳高",
            ],
            Command::Crouch => &[
                "crouch",
                "squat",
                "duck down",
                "lie down",
                "蹲下",
                "下蹲",
                "蹲低",
                "趴下",
            ],
            Command::Stretch => &[
                "stretch",
                "stand up",
                "straighten",
                "reset pose",
                "伸展",
                "伸直",
                "站起來",
                "回復原狀",
            ],
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Join commands for display, e.g. `jump, crouch`
pub fn join_commands(commands: &[Command]) -> String {
    commands
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_command_has_variants() {
        for command in Command::ALL {
            let variants = command.variants();
            assert!(!variants.is_empty(), "{} has no variants", command);
            assert_eq!(variants[0], command.as_str());
        }
    }

    #[test]
    fn test_variants_unique_and_lowercase() {
        let mut seen = HashSet::new();
        for command in Command::ALL {
            for variant in command.variants() {
                assert!(!variant.is_empty());
                assert_eq!(variant.to_lowercase(), *variant);
                assert!(seen.insert(*variant), "duplicate variant {}", variant);
            }
        }
    }

    #[test]
    fn test_no_cross_command_substrings() {
        for a in Command::ALL {
            for b in Command::ALL.into_iter().filter(|b| *b != a) {
                for va in a.variants() {
                    for vb in b.variants() {
                        assert!(
                            !va.contains(vb),
                            "{} variant '{}' contains {} variant '{}'",
                            a,
                            va,
                            b,
                            vb
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_serde_uses_wire_identifier() {
        let json = serde_json::to_string(&Command::MoveLeft).unwrap();
        assert_eq!(json, "\"move-left\"");

        let command: Command = serde_json::from_str("\"rotate-right\"").unwrap();
        assert_eq!(command, Command::RotateRight);
    }

    #[test]
    fn test_join_commands() {
        assert_eq!(join_commands(&[]), "");
        assert_eq!(join_commands(&[Command::Jump, Command::Crouch]), "jump, crouch");
    }
}
