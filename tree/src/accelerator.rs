use std::fmt::{self, Formatter};
use std::str::FromStr;

use displaydoc::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Modifier {
    /// Cmd on macOS, Ctrl elsewhere.
    CmdOrCtrl,
    /// Option on macOS, Alt elsewhere.
    OptionOrAlt,
    Shift,
    /// Cmd on macOS, the Windows key elsewhere.
    Super,
    Control,
}

impl Modifier {
    fn parse(segment: &str) -> Option<Self> {
        match segment.to_ascii_lowercase().as_str() {
            "cmdorctrl" | "cmd" | "command" | "ctrl" => Some(Modifier::CmdOrCtrl),
            "optionoralt" | "option" | "alt" => Some(Modifier::OptionOrAlt),
            "shift" => Some(Modifier::Shift),
            "super" => Some(Modifier::Super),
            "control" => Some(Modifier::Control),
            _ => None,
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Modifier::CmdOrCtrl => "CmdOrCtrl",
            Modifier::OptionOrAlt => "OptionOrAlt",
            Modifier::Shift => "Shift",
            Modifier::Super => "Super",
            Modifier::Control => "Control",
        };
        f.write_str(name)
    }
}

/// A key binding attached to a menu item.
///
/// The binding is opaque to the menu tree; it is carried so that a platform
/// layer can register it. The textual form is `Modifier+...+Key`, e.g.
/// `CmdOrCtrl+Shift+S`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Accelerator {
    pub key: String,
    pub modifiers: Vec<Modifier>,
}

impl Accelerator {
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Vec::new(),
        }
    }

    pub fn cmd_or_ctrl(key: impl Into<String>) -> Self {
        Self::combo(key, Modifier::CmdOrCtrl, [])
    }

    pub fn option_or_alt(key: impl Into<String>) -> Self {
        Self::combo(key, Modifier::OptionOrAlt, [])
    }

    pub fn shift(key: impl Into<String>) -> Self {
        Self::combo(key, Modifier::Shift, [])
    }

    pub fn super_key(key: impl Into<String>) -> Self {
        Self::combo(key, Modifier::Super, [])
    }

    pub fn control(key: impl Into<String>) -> Self {
        Self::combo(key, Modifier::Control, [])
    }

    /// Key plus at least one modifier. Repeated modifiers are kept once.
    pub fn combo<I>(key: impl Into<String>, modifier: Modifier, extra: I) -> Self
    where
        I: IntoIterator<Item = Modifier>,
    {
        let mut modifiers = vec![modifier];
        for modifier in extra {
            if !modifiers.contains(&modifier) {
                modifiers.push(modifier);
            }
        }
        Self {
            key: key.into(),
            modifiers,
        }
    }
}

impl fmt::Display for Accelerator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for modifier in &self.modifiers {
            write!(f, "{modifier}+")?;
        }
        f.write_str(&self.key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Display)]
pub enum AcceleratorParseError {
    /// Accelerator is empty
    Empty,
    /// Accelerator "{0}" contains an empty segment
    EmptySegment(String),
    /// Accelerator "{0}" has modifiers but no key
    MissingKey(String),
    /// Accelerator "{input}" has more than one key: "{first}" and "{second}"
    MultipleKeys {
        input: String,
        first: String,
        second: String,
    },
}

impl FromStr for Accelerator {
    type Err = AcceleratorParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(AcceleratorParseError::Empty);
        }

        // "+" on its own, or after the last separator, is the plus key.
        if trimmed == "+" {
            return Ok(Accelerator::key("+"));
        }
        let (body, mut key) = match trimmed.strip_suffix("++") {
            Some(body) => (body, Some("+".to_owned())),
            None => (trimmed, None),
        };

        let mut modifiers = Vec::new();
        let segments = body.split('+').filter(|_| !body.is_empty());
        for segment in segments {
            let segment = segment.trim();
            if segment.is_empty() {
                return Err(AcceleratorParseError::EmptySegment(input.to_owned()));
            }
            if let Some(modifier) = Modifier::parse(segment) {
                if !modifiers.contains(&modifier) {
                    modifiers.push(modifier);
                }
                continue;
            }
            if let Some(first) = key.take() {
                return Err(AcceleratorParseError::MultipleKeys {
                    input: input.to_owned(),
                    first,
                    second: segment.to_owned(),
                });
            }
            key = Some(segment.to_owned());
        }

        let key = key.ok_or_else(|| AcceleratorParseError::MissingKey(input.to_owned()))?;
        Ok(Accelerator { key, modifiers })
    }
}

impl TryFrom<String> for Accelerator {
    type Error = AcceleratorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Accelerator> for String {
    fn from(value: Accelerator) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_combo() {
        let accelerator: Accelerator = "CmdOrCtrl+Shift+S".parse().unwrap();
        assert_eq!(
            accelerator,
            Accelerator::combo("S", Modifier::CmdOrCtrl, [Modifier::Shift])
        );
        assert_eq!(accelerator.to_string(), "CmdOrCtrl+Shift+S");
    }

    #[test]
    fn parse_aliases_and_duplicates() {
        let accelerator: Accelerator = "ctrl+alt+CMD+Delete".parse().unwrap();
        assert_eq!(accelerator.key, "Delete");
        assert_eq!(
            accelerator.modifiers,
            vec![Modifier::CmdOrCtrl, Modifier::OptionOrAlt]
        );
        assert_eq!(accelerator.to_string(), "CmdOrCtrl+OptionOrAlt+Delete");
    }

    #[test]
    fn parse_bare_key() {
        assert_eq!("F5".parse::<Accelerator>().unwrap(), Accelerator::key("F5"));
        assert_eq!("+".parse::<Accelerator>().unwrap(), Accelerator::key("+"));
        assert_eq!("++".parse::<Accelerator>().unwrap(), Accelerator::key("+"));
    }

    #[test]
    fn plus_key_with_modifiers() {
        let zoom_in = Accelerator::cmd_or_ctrl("+");
        assert_eq!(zoom_in.to_string(), "CmdOrCtrl++");
        assert_eq!("CmdOrCtrl++".parse::<Accelerator>().unwrap(), zoom_in);

        for accelerator in [
            Accelerator::shift("+"),
            Accelerator::super_key("+"),
            Accelerator::control("+"),
            Accelerator::combo("+", Modifier::Control, [Modifier::OptionOrAlt]),
        ] {
            let text = accelerator.to_string();
            assert_eq!(text.parse::<Accelerator>().unwrap(), accelerator, "{text}");
        }

        assert!(matches!(
            "Shift+++".parse::<Accelerator>().unwrap_err(),
            AcceleratorParseError::EmptySegment(_)
        ));
        assert!(matches!(
            "A++".parse::<Accelerator>().unwrap_err(),
            AcceleratorParseError::MultipleKeys { .. }
        ));
    }

    #[test]
    fn single_modifier_helpers() {
        assert_eq!(Accelerator::shift("Tab").to_string(), "Shift+Tab");
        assert_eq!(Accelerator::super_key("Q").to_string(), "Super+Q");
        assert_eq!(Accelerator::control("F2").to_string(), "Control+F2");
        assert_eq!(
            "super+q".parse::<Accelerator>().unwrap(),
            Accelerator::super_key("q")
        );
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            "  ".parse::<Accelerator>().unwrap_err(),
            AcceleratorParseError::Empty
        );
        assert!(matches!(
            "Shift+".parse::<Accelerator>().unwrap_err(),
            AcceleratorParseError::EmptySegment(_)
        ));
        assert!(matches!(
            "Shift+Super".parse::<Accelerator>().unwrap_err(),
            AcceleratorParseError::MissingKey(_)
        ));
        let err = "A+B".parse::<Accelerator>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Accelerator \"A+B\" has more than one key: \"A\" and \"B\""
        );
    }

    #[test]
    fn serde_as_string() {
        let accelerator = Accelerator::option_or_alt("F4");
        let json = serde_json::to_string(&accelerator).unwrap();
        assert_eq!(json, "\"OptionOrAlt+F4\"");
        let back: Accelerator = serde_json::from_str(&json).unwrap();
        assert_eq!(back, accelerator);
        assert!(serde_json::from_str::<Accelerator>("\"Shift\"").is_err());
    }

    #[test]
    fn plus_key_survives_serde() {
        let item = crate::MenuItem::text("Zoom In", "view.zoom_in", Some(Accelerator::cmd_or_ctrl("+")));

        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"CmdOrCtrl++\""), "{json}");
        assert_eq!(serde_json::from_str::<crate::MenuItem>(&json).unwrap(), item);

        let toml = toml::to_string(&item).unwrap();
        assert_eq!(toml::from_str::<crate::MenuItem>(&toml).unwrap(), item);
    }
}
