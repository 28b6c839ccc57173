use crate::{Cursor, ParserError};
use std::{convert::Infallible, fmt, str::FromStr};

const POINTER_TAG: u8 = 0b1100_0000;
const POINTER_MASK: u16 = 0x3fff;

// Chains longer than this are treated as a pointer loop.
const MAX_JUMPS: usize = 64;

/// A domain name as it appears on the wire.
///
/// A name is either a run of labels closed by the zero-length label, or a
/// compression pointer to a name that starts earlier in the same message.
/// Parsing keeps the pointer as it is; [`DomainName::resolve`] follows it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DomainName {
    Labels(Vec<Vec<u8>>),
    PointerTo(u16),
}

impl DomainName {
    pub fn parse(cursor: &mut Cursor) -> Result<Self, ParserError> {
        let mut labels = vec![];

        loop {
            match cursor.read_u8()? {
                0 => return Ok(Self::Labels(labels)),

                v if v >= POINTER_TAG => {
                    let low = cursor.read_u8()?;
                    let offset = u16::from_be_bytes([v, low]) & POINTER_MASK;

                    return Ok(Self::PointerTo(offset));
                }

                len => {
                    labels.push(cursor.read_bytes(len as usize)?.to_vec());
                }
            }
        }
    }

    /// Label length bytes and offsets are written unchecked: labels must be at
    /// most 63 bytes long and offsets must fit in 14 bits.
    pub fn write_to(&self, buf: &mut Vec<u8>) {
        match self {
            Self::PointerTo(offset) => {
                buf.extend((0xc000 | *offset).to_be_bytes());
            }

            Self::Labels(labels) => {
                for label in labels {
                    buf.push(label.len() as u8);
                    buf.extend(label);
                }
                buf.push(0);
            }
        }
    }

    /// Full label list of this name, following compression pointers into
    /// `original`, the message the name was parsed from.
    pub fn resolve(&self, original: &[u8]) -> Result<Vec<Vec<u8>>, ParserError> {
        match self {
            Self::Labels(labels) => Ok(labels.clone()),
            Self::PointerTo(offset) => labels_at(original, *offset),
        }
    }
}

fn labels_at(original: &[u8], mut offset: u16) -> Result<Vec<Vec<u8>>, ParserError> {
    let mut out = vec![];
    let mut jumps = 0;
    let mut cursor = seek(original, offset)?;

    loop {
        match cursor.read_u8()? {
            0 => return Ok(out),

            v if v >= POINTER_TAG => {
                let low = cursor.read_u8()?;
                offset = u16::from_be_bytes([v, low]) & POINTER_MASK;

                jumps += 1;
                if jumps > MAX_JUMPS {
                    return Err(ParserError::InvalidPointer(offset));
                }

                cursor = seek(original, offset)?;
            }

            len => {
                out.push(cursor.read_bytes(len as usize)?.to_vec());
            }
        }
    }
}

fn seek(original: &[u8], offset: u16) -> Result<Cursor<'_>, ParserError> {
    let rest = original
        .get(offset as usize..)
        .filter(|rest| !rest.is_empty())
        .ok_or(ParserError::InvalidPointer(offset))?;

    Ok(Cursor::new(rest))
}

impl Default for DomainName {
    fn default() -> Self {
        Self::Labels(vec![])
    }
}

impl FromStr for DomainName {
    type Err = Infallible;

    /// Splits a dotted name into labels. Empty labels are dropped, so `""` and
    /// `"."` are the root name and a trailing dot is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::Labels(
            s.split('.')
                .filter(|label| !label.is_empty())
                .map(|label| label.as_bytes().to_vec())
                .collect(),
        ))
    }
}

impl From<&str> for DomainName {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(name) => name,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Labels(labels) => {
                for (i, label) in labels.iter().enumerate() {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(&String::from_utf8_lossy(label))?;
                }
                Ok(())
            }
            Self::PointerTo(offset) => write!(f, "@{}", offset),
        }
    }
}
