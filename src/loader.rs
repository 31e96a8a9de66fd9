//! Program images: a DATA region and a CODE region of pre-encoded words plus
//! an entry address, usually read from JSON.
//!
//! ```json
//! {
//!   "name": "product",
//!   "data": { "begin": "0x0100", "words": [7, "0x8005", 0] },
//!   "code": { "begin": "0x0200", "words": ["0x1100", "0x7102", "0x8000"] },
//!   "entry": "0x0200",
//!   "inputs": [ { "addr": "0x0100", "label": "A", "default": 7 } ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{MachineConfig, WORD_SIZE};
use crate::errors::{Error, Result};
use crate::machine::Machine;
use crate::utils::parse_number;

/// A word in an image, written as a JSON number or as a string such as
/// `"0x1100"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum WordRepr {
    Num(i64),
    Text(String),
}

fn word_from_repr(repr:WordRepr) -> Result<u16> {
    let value = match repr {
        WordRepr::Num(n) => Some(n),
        WordRepr::Text(ref text) => parse_number(text),
    };
    match value {
        Some(v) if (0..=0xFFFF).contains(&v) => Ok(v as u16),
        _ => Err(Error::BadWord(match repr {
            WordRepr::Num(n) => n.to_string(),
            WordRepr::Text(text) => text,
        })),
    }
}

fn de_word<'de, D:Deserializer<'de>>(d:D) -> std::result::Result<u16, D::Error> {
    let repr = WordRepr::deserialize(d)?;
    word_from_repr(repr).map_err(serde::de::Error::custom)
}

fn de_words<'de, D:Deserializer<'de>>(d:D) -> std::result::Result<Vec<u16>, D::Error> {
    let reprs = Vec::<WordRepr>::deserialize(d)?;
    reprs.into_iter()
        .map(|r| word_from_repr(r).map_err(serde::de::Error::custom))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(deserialize_with = "de_word")]
    pub begin: u16,
    #[serde(deserialize_with = "de_words")]
    pub words: Vec<u16>,
}

impl Segment {
    pub fn new(begin:u16, words:&[u16]) -> Segment {
        Segment { begin, words: words.to_vec() }
    }

    pub fn end(&self) -> usize {
        self.begin as usize + self.words.len() * WORD_SIZE as usize
    }
}

/// A cell the program expects the user to fill before it runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputCell {
    #[serde(deserialize_with = "de_word")]
    pub addr: u16,
    pub label: String,
    #[serde(default)]
    pub default: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramImage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub data: Segment,
    pub code: Segment,
    #[serde(deserialize_with = "de_word")]
    pub entry: u16,
    #[serde(default)]
    pub inputs: Vec<InputCell>,
    #[serde(default)]
    pub config: Option<MachineConfig>,
}

/// `(begin, end)` of a loaded region, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub begin: usize,
    pub end: usize,
}

impl Region {
    fn is_empty(&self) -> bool {
        self.begin >= self.end
    }

    fn overlaps(&self, other:&Region) -> bool {
        !self.is_empty() && !other.is_empty() && self.begin < other.end && other.begin < self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedProgram {
    pub entry: u16,
    pub data: Region,
    pub code: Region,
}

impl ProgramImage {
    pub fn from_json(text:&str) -> Result<ProgramImage> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path<P:AsRef<Path>>(path:P) -> Result<ProgramImage> {
        let text = fs::read_to_string(path)?;
        ProgramImage::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builds a machine using the image's embedded config, or the default one.
    pub fn machine(&self) -> Result<Machine> {
        Machine::with_config(self.config.clone().unwrap_or_default())
    }

    /// Clears memory and writes both regions, then seeds every declared input
    /// with its default value.
    pub fn load_into(&self, m0:&mut Machine) -> Result<LoadedProgram> {
        let data = self.check_segment("DATA", &self.data, m0)?;
        let code = self.check_segment("CODE", &self.code, m0)?;
        if data.overlaps(&code) {
            return Err(Error::Region { name: "CODE", begin: code.begin, end: code.end, reason: "overlaps the DATA region" });
        }

        m0.mem.clear();
        for segment in [&self.data, &self.code].iter() {
            m0.mem.load_words(segment.begin as usize, &segment.words)
                .map_err(|fault| Error::Machine { fault, pc: 0, ir: 0 })?;
        }
        for input in self.inputs.iter() {
            m0.seed_number(input.addr, input.default)
                .map_err(|fault| Error::Machine { fault, pc: 0, ir: 0 })?;
        }

        Ok(LoadedProgram { entry: self.entry, data, code })
    }

    fn check_segment(&self, name:&'static str, segment:&Segment, m0:&Machine) -> Result<Region> {
        let region = Region { begin: segment.begin as usize, end: segment.end() };
        if region.begin % WORD_SIZE as usize != 0 {
            return Err(Error::Region { name, begin: region.begin, end: region.end, reason: "begins at an odd address" });
        }
        if region.end > m0.mem.len() {
            return Err(Error::Region { name, begin: region.begin, end: region.end, reason: "does not fit in memory" });
        }
        let (begin, end) = m0.stack.bounds();
        if region.overlaps(&Region { begin, end }) {
            return Err(Error::Region { name, begin: region.begin, end: region.end, reason: "overlaps the call stack" });
        }
        Ok(region)
    }
}

/// Parses `ADDR=VALUE`, e.g. `0x0100=-5`.
pub fn parse_assignment(text:&str) -> Result<(u16, i32)> {
    let bad = || Error::BadAssignment(text.to_string());
    let mut parts = text.splitn(2, '=');
    let addr = parts.next().and_then(parse_number).ok_or_else(bad)?;
    let value = parts.next().and_then(parse_number).ok_or_else(bad)?;
    if !(0..=0xFFFF).contains(&addr) || value < i32::MIN as i64 || value > i32::MAX as i64 {
        return Err(bad());
    }
    Ok((addr as u16, value as i32))
}
