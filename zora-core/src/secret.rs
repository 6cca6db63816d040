//! Game secrets: the record carried from one title to the other.
//!
//! A game secret packs 114 bits of fields into 20 six-bit symbols. The
//! field order inside the frame interleaves the two names with the numeric
//! fields, and every multi-bit field is stored least-significant bit first.

use crate::bits::BitSequence;
use crate::codec::{open, seal};
use crate::crypto::{FRAME_LEN, cipher_key};
use crate::error::{Result, SecretError, check_range};
use crate::info::GameInfo;
use crate::symbols;
use crate::text::{NAME_LEN, TextCodec, null_pad, trim_name};
use crate::types::{Animal, Game, Region};

pub const MAX_GAME_ID: u16 = 0x7fff;
pub const MAX_BEHAVIOR: u8 = 0x3f;
pub const MAX_ANIMAL: u8 = 0x0f;

/// Offset and width of one field inside the unscrambled frame
#[derive(Debug, Clone, Copy)]
struct Field {
    offset: usize,
    width: usize,
}

const fn field(offset: usize, width: usize) -> Field {
    Field { offset, width }
}

const CIPHER_KEY: Field = field(0, 3);
const KIND: Field = field(3, 2);
const GAME_ID: Field = field(5, 15);
const HERO_QUEST: Field = field(20, 1);
const TARGET_GAME: Field = field(21, 1);
const BEHAVIOR: Field = field(54, 6);
const FREE_RING: Field = field(76, 1);
const ANIMAL: Field = field(85, 4);
const LINKED_GAME: Field = field(105, 1);

const HERO: [Field; NAME_LEN] = [
    field(22, 8),
    field(38, 8),
    field(60, 8),
    field(77, 8),
    field(89, 8),
];
const CHILD: [Field; NAME_LEN] = [
    field(30, 8),
    field(46, 8),
    field(68, 8),
    field(97, 8),
    field(106, 8),
];

/// Bits used by the fields; the rest of the frame is padding and checksum
const PAYLOAD_BITS: usize = 114;

/// Record kind tag for game secrets
const GAME_KIND: u32 = 0;

/// Name bytes accepted by the PAL releases
const PAL_CHARACTERS: [u8; 122] = [
    0x41, 0x42, 0x43, 0x44, 0x45, 0x46, 0x47, 0x48, //
    0x49, 0x4a, 0x4b, 0x4c, 0x4d, 0x4e, 0x4f, 0x50, //
    0x51, 0x52, 0x53, 0x54, 0x55, 0x56, 0x57, 0x58, //
    0x59, 0x5a, 0x20, 0x2e, 0x2c, 0x5f, 0x80, 0x81, //
    0x82, 0x83, 0x84, 0x20, 0x85, 0x86, 0x87, 0x88, //
    0x89, 0x8a, 0x8b, 0x8c, 0x8d, 0x8e, 0x8f, 0x90, //
    0x21, 0x27, 0x2d, 0x3a, 0x3b, 0x3d, 0x11, 0x12, //
    0xbd, 0x13, 0x28, 0x29, 0x00, 0x61, 0x62, 0x63, //
    0x64, 0x65, 0x66, 0x67, 0x68, 0x69, 0x6a, 0x6b, //
    0x6c, 0x6d, 0x6e, 0x6f, 0x70, 0x71, 0x72, 0x73, //
    0x74, 0x75, 0x76, 0x77, 0x78, 0x79, 0x7a, 0x20, //
    0x2e, 0x2c, 0x5f, 0xa0, 0xa1, 0xa2, 0xa3, 0xa4, //
    0x20, 0xa5, 0xa6, 0xa7, 0xa8, 0xa9, 0xaa, 0xab, //
    0xac, 0xad, 0xae, 0xaf, 0xb0, 0x21, 0x27, 0x2d, //
    0x3a, 0x3b, 0x3d, 0x11, 0x12, 0xbd, 0x13, 0x28, //
    0x29, 0x00,
];

/// Companions accepted by the PAL releases
const PAL_ANIMALS: [Animal; 3] = [Animal::Ricky, Animal::Dimitri, Animal::Moosh];

/// Common surface of every secret kind
pub trait Secret: Sized {
    /// Number of symbols in the encoded secret
    const LENGTH: usize;

    fn region(&self) -> Region;

    fn game_id(&self) -> u16;

    /// Decode raw symbol values
    fn load(secret: &[u8], region: Region) -> Result<Self>;

    /// Encode to raw symbol values
    fn to_bytes(&self) -> Result<Vec<u8>>;

    /// Decode a typed secret such as `H~2:@ ←2♦yq GB3●( 6♥?↑6`
    fn parse(text: &str, region: Region) -> Result<Self> {
        let raw = symbols::parse(text)?;
        Self::load(&raw, region)
    }

    /// Encode and render as glyphs
    fn to_symbol_string(&self) -> Result<String> {
        symbols::render(&self.to_bytes()?)
    }
}

/// A secret used to start a linked game.
///
/// Names are stored null-padded to five characters and read back trimmed.
/// Numeric setters reject values that do not fit their bit width and leave
/// the record unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSecret {
    region: Region,
    game_id: u16,
    target_game: Game,
    hero: String,
    child: String,
    behavior: u8,
    animal: u8,
    is_hero_quest: bool,
    is_linked_game: bool,
    was_given_free_ring: bool,
}

impl Default for GameSecret {
    fn default() -> Self {
        Self {
            region: Region::Us,
            game_id: 0,
            target_game: Game::Seasons,
            hero: null_pad(""),
            child: null_pad(""),
            behavior: 0,
            animal: 0,
            is_hero_quest: false,
            is_linked_game: false,
            was_given_free_ring: false,
        }
    }
}

impl GameSecret {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a secret from a player profile. Names must be encodable in the
    /// profile's region.
    pub fn from_info(info: &GameInfo) -> Result<Self> {
        let mut secret = Self::new();
        secret.set_region(info.region());
        secret.set_game_id(info.game_id())?;
        secret.set_target_game(info.game());
        secret.set_hero(&info.hero)?;
        secret.set_child(&info.child)?;
        secret.set_animal(info.animal())?;
        secret.set_behavior(info.behavior())?;
        secret.set_linked_game(info.is_linked_game());
        secret.set_hero_quest(info.is_hero_quest());
        secret.set_given_free_ring(info.was_given_free_ring());
        Ok(secret)
    }

    /// Copy every field into a player profile. Rings are left untouched.
    pub fn update_game_info(&self, info: &mut GameInfo) {
        info.region = self.region;
        info.game_id = self.game_id;
        info.game = self.target_game;
        info.hero = self.hero.clone();
        info.child = self.child.clone();
        info.animal = self.animal;
        info.behavior = self.behavior;
        info.is_linked_game = self.is_linked_game;
        info.is_hero_quest = self.is_hero_quest;
        info.was_given_free_ring = self.was_given_free_ring;
    }

    pub fn set_region(&mut self, region: Region) {
        self.region = region;
    }

    pub fn set_game_id(&mut self, game_id: u16) -> Result<()> {
        check_range("game id", game_id.into(), MAX_GAME_ID.into())?;
        self.game_id = game_id;
        Ok(())
    }

    pub fn target_game(&self) -> Game {
        self.target_game
    }

    pub fn set_target_game(&mut self, game: Game) {
        self.target_game = game;
    }

    pub fn hero(&self) -> &str {
        trim_name(&self.hero)
    }

    pub fn set_hero(&mut self, hero: &str) -> Result<()> {
        self.hero = self.checked_name(hero)?;
        Ok(())
    }

    pub fn child(&self) -> &str {
        trim_name(&self.child)
    }

    pub fn set_child(&mut self, child: &str) -> Result<()> {
        self.child = self.checked_name(child)?;
        Ok(())
    }

    fn checked_name(&self, name: &str) -> Result<String> {
        let padded = null_pad(name);
        TextCodec::for_region(self.region).encode_name(&padded)?;
        Ok(padded)
    }

    pub fn behavior(&self) -> u8 {
        self.behavior
    }

    pub fn set_behavior(&mut self, behavior: u8) -> Result<()> {
        check_range("behavior", behavior.into(), MAX_BEHAVIOR.into())?;
        self.behavior = behavior;
        Ok(())
    }

    /// Raw 4-bit companion value
    pub fn animal(&self) -> u8 {
        self.animal
    }

    pub fn companion(&self) -> Option<Animal> {
        Animal::from_value(self.animal)
    }

    pub fn set_animal(&mut self, animal: u8) -> Result<()> {
        check_range("animal", animal.into(), MAX_ANIMAL.into())?;
        self.animal = animal;
        Ok(())
    }

    pub fn set_companion(&mut self, animal: Animal) {
        self.animal = animal.value();
    }

    pub fn is_hero_quest(&self) -> bool {
        self.is_hero_quest
    }

    pub fn set_hero_quest(&mut self, value: bool) {
        self.is_hero_quest = value;
    }

    pub fn is_linked_game(&self) -> bool {
        self.is_linked_game
    }

    pub fn set_linked_game(&mut self, value: bool) {
        self.is_linked_game = value;
    }

    pub fn was_given_free_ring(&self) -> bool {
        self.was_given_free_ring
    }

    pub fn set_given_free_ring(&mut self, value: bool) {
        self.was_given_free_ring = value;
    }

    /// Decode like [`Secret::load`], but show name bytes with no glyph in
    /// `region` as `?` instead of failing. The result is for display and may
    /// not encode back to the same secret.
    pub fn load_lossy(secret: &[u8], region: Region) -> Result<Self> {
        Self::decode(secret, region, |codec, bytes| {
            Ok(codec.decode_field_lossy(bytes))
        })
    }

    fn decode(
        secret: &[u8],
        region: Region,
        decode_name: impl Fn(&TextCodec, &[u8; NAME_LEN]) -> Result<String>,
    ) -> Result<Self> {
        let bits = open(secret)?;

        if read(&bits, KIND)? != GAME_KIND {
            return Err(SecretError::format("not a game secret"));
        }

        let game_id = read(&bits, GAME_ID)? as u16;
        if read(&bits, CIPHER_KEY)? != cipher_key(game_id) as u32 {
            return Err(SecretError::format("cipher key does not match game id"));
        }

        let codec = TextCodec::for_region(region);
        let hero = decode_name(&codec, &read_name(&bits, &HERO)?)?;
        let child = decode_name(&codec, &read_name(&bits, &CHILD)?)?;

        Ok(Self {
            region,
            game_id,
            target_game: if read_flag(&bits, TARGET_GAME)? {
                Game::Seasons
            } else {
                Game::Ages
            },
            hero: null_pad(&hero),
            child: null_pad(&child),
            behavior: read(&bits, BEHAVIOR)? as u8,
            animal: read(&bits, ANIMAL)? as u8,
            is_hero_quest: read_flag(&bits, HERO_QUEST)?,
            is_linked_game: read_flag(&bits, LINKED_GAME)?,
            was_given_free_ring: read_flag(&bits, FREE_RING)?,
        })
    }

    /// PAL releases additionally require a named companion and names drawn
    /// from a restricted character set.
    pub fn is_valid_for_pal(&self) -> bool {
        if !PAL_ANIMALS.iter().any(|a| a.value() == self.animal) {
            return false;
        }

        let codec = TextCodec::for_region(Region::Us);
        [&self.hero, &self.child].into_iter().all(|name| {
            codec
                .encode_name(name)
                .is_ok_and(|bytes| bytes.iter().all(|b| PAL_CHARACTERS.contains(b)))
        })
    }
}

fn read(bits: &BitSequence, f: Field) -> Result<u32> {
    bits.read_reversed(f.offset, f.width)
}

fn read_flag(bits: &BitSequence, f: Field) -> Result<bool> {
    bits.bit(f.offset)
}

fn read_name(bits: &BitSequence, fields: &[Field; NAME_LEN]) -> Result<[u8; NAME_LEN]> {
    let mut out = [0u8; NAME_LEN];
    for (byte, &f) in out.iter_mut().zip(fields) {
        *byte = read(bits, f)? as u8;
    }
    Ok(out)
}

fn write(bits: &mut BitSequence, f: Field, value: u32) -> Result<()> {
    bits.write_reversed(f.offset, f.width, value)
}

fn write_name(
    bits: &mut BitSequence,
    fields: &[Field; NAME_LEN],
    name: &[u8; NAME_LEN],
) -> Result<()> {
    for (&f, &byte) in fields.iter().zip(name) {
        write(bits, f, byte.into())?;
    }
    Ok(())
}

impl Secret for GameSecret {
    const LENGTH: usize = FRAME_LEN;

    fn region(&self) -> Region {
        self.region
    }

    fn game_id(&self) -> u16 {
        self.game_id
    }

    fn load(secret: &[u8], region: Region) -> Result<Self> {
        Self::decode(secret, region, TextCodec::decode_field)
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        let codec = TextCodec::for_region(self.region);
        let hero = codec.encode_name(&self.hero)?;
        let child = codec.encode_name(&self.child)?;

        let mut bits = BitSequence::zeroed(PAYLOAD_BITS);
        write(&mut bits, CIPHER_KEY, cipher_key(self.game_id).into())?;
        write(&mut bits, KIND, GAME_KIND)?;
        write(&mut bits, GAME_ID, self.game_id.into())?;
        write(&mut bits, HERO_QUEST, self.is_hero_quest.into())?;
        write(&mut bits, TARGET_GAME, (self.target_game == Game::Seasons).into())?;
        write_name(&mut bits, &HERO, &hero)?;
        write_name(&mut bits, &CHILD, &child)?;
        write(&mut bits, BEHAVIOR, self.behavior.into())?;
        write(&mut bits, FREE_RING, self.was_given_free_ring.into())?;
        write(&mut bits, ANIMAL, self.animal.into())?;
        write(&mut bits, LINKED_GAME, self.is_linked_game.into())?;

        Ok(seal(bits)?.to_vec())
    }
}
