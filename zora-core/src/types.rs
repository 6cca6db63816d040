//! Regions, titles and companions, each with an explicit text form.

use std::fmt;
use std::str::FromStr;

/// Release region. PAL releases share the US tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Region {
    #[default]
    Us,
    Japan,
}

/// The two linked titles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Game {
    #[default]
    Seasons,
    Ages,
}

/// Named companion animals. The 4-bit companion field may hold other values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Animal {
    Ricky = 0x0b,
    Dimitri = 0x0c,
    Moosh = 0x0d,
}

/// Failure to parse one of the enums above from text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl FromStr for Region {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "us" | "usa" | "pal" | "eu" => Ok(Region::Us),
            "jp" | "japan" => Ok(Region::Japan),
            _ => Err(ParseEnumError::new("region", s)),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Region::Us => "us",
            Region::Japan => "japan",
        })
    }
}

impl FromStr for Game {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "seasons" => Ok(Game::Seasons),
            "ages" => Ok(Game::Ages),
            _ => Err(ParseEnumError::new("game", s)),
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Game::Seasons => "seasons",
            Game::Ages => "ages",
        })
    }
}

impl Animal {
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            0x0b => Some(Animal::Ricky),
            0x0c => Some(Animal::Dimitri),
            0x0d => Some(Animal::Moosh),
            _ => None,
        }
    }
}

impl FromStr for Animal {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ricky" => Ok(Animal::Ricky),
            "dimitri" => Ok(Animal::Dimitri),
            "moosh" => Ok(Animal::Moosh),
            _ => Err(ParseEnumError::new("animal", s)),
        }
    }
}

impl fmt::Display for Animal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Animal::Ricky => "ricky",
            Animal::Dimitri => "dimitri",
            Animal::Moosh => "moosh",
        })
    }
}
