//! core functionality for encoding and decoding the game secrets
//! exchanged between the two linked Oracle titles
//!
//! # Modules
//!
//! - `bits`: bit sequences over 6-bit symbols, reversed field access
//! - `codec`: checksum, frame sealing and opening
//! - `crypto`: keyed XOR scrambling of the secret frame
//! - `text`: region name codecs
//! - `symbols`: secret glyphs for display and typing
//! - `secret`: the `Secret` trait and `GameSecret`
//! - `info`: the `GameInfo` player profile and change observers

pub mod bits;
pub mod codec;
pub mod crypto;
pub mod error;
pub mod info;
pub mod secret;
pub mod symbols;
pub mod text;
pub mod types;

// Re-export commonly used items
pub use bits::{BitSequence, SYMBOL_BITS};
pub use codec::{calc_checksum, checksum_matches, open, seal};
pub use crypto::{CIPHER, FRAME_LEN, cipher_key, scramble, unscramble};
pub use error::{Result, SecretError};
pub use info::{GameInfo, InfoField, InfoObserver, ObservedGameInfo};
pub use secret::{GameSecret, MAX_ANIMAL, MAX_BEHAVIOR, MAX_GAME_ID, Secret};
pub use text::{NAME_LEN, TextCodec};
pub use types::{Animal, Game, ParseEnumError, Region};
