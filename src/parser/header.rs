use crate::{Cursor, ParserError};

// Bit positions inside the flags word, MSB first:
// QR(1) OPCODE(4) AA(1) TC(1) RD(1) RA(1) Z(1) AD(1) CD(1) RCODE(4)
const QR_SHIFT: u16 = 15;
const OPCODE_SHIFT: u16 = 11;
const AA_SHIFT: u16 = 10;
const TC_SHIFT: u16 = 9;
const RD_SHIFT: u16 = 8;
const RA_SHIFT: u16 = 7;
const Z_SHIFT: u16 = 6;
const AD_SHIFT: u16 = 5;
const CD_SHIFT: u16 = 4;
const RCODE_SHIFT: u16 = 0;

const NIBBLE: u16 = 0b1111;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Header {
    pub id: u16,
    pub qr: bool,
    pub opcode: u8,
    pub aa: bool,
    pub tc: bool,
    pub rd: bool,
    pub ra: bool,
    pub z: bool,
    pub ad: bool,
    pub cd: bool,
    pub rcode: u8,
    pub qd_count: u16,
    pub an_count: u16,
    pub ns_count: u16,
    pub ar_count: u16,
}

impl Header {
    pub fn parse(cursor: &mut Cursor) -> Result<Self, ParserError> {
        if cursor.remaining() < Self::size() {
            return Err(ParserError::TruncatedInput);
        }

        let id = cursor.read_u16()?;
        let fields = cursor.read_u16()?;

        let mut header = Self::from_fields(fields);
        header.id = id;
        header.qd_count = cursor.read_u16()?;
        header.an_count = cursor.read_u16()?;
        header.ns_count = cursor.read_u16()?;
        header.ar_count = cursor.read_u16()?;

        Ok(header)
    }

    pub fn write_to(&self, buf: &mut Vec<u8>) {
        buf.reserve(Self::size());

        buf.extend(self.id.to_be_bytes());
        buf.extend(self.fields().to_be_bytes());
        buf.extend(self.qd_count.to_be_bytes());
        buf.extend(self.an_count.to_be_bytes());
        buf.extend(self.ns_count.to_be_bytes());
        buf.extend(self.ar_count.to_be_bytes());
    }

    /// Packs the ten flag sub-fields into the second header word.
    ///
    /// `opcode` and `rcode` are masked to their four bits, so wider values can
    /// not spill into the neighbouring flags.
    pub fn fields(&self) -> u16 {
        (self.qr as u16) << QR_SHIFT
            | (self.opcode as u16 & NIBBLE) << OPCODE_SHIFT
            | (self.aa as u16) << AA_SHIFT
            | (self.tc as u16) << TC_SHIFT
            | (self.rd as u16) << RD_SHIFT
            | (self.ra as u16) << RA_SHIFT
            | (self.z as u16) << Z_SHIFT
            | (self.ad as u16) << AD_SHIFT
            | (self.cd as u16) << CD_SHIFT
            | (self.rcode as u16 & NIBBLE) << RCODE_SHIFT
    }

    /// Header with only the flag sub-fields set from `fields`.
    pub fn from_fields(fields: u16) -> Self {
        let bit = |shift: u16| ((fields >> shift) & 1) == 1;

        Self {
            qr: bit(QR_SHIFT),
            opcode: ((fields >> OPCODE_SHIFT) & NIBBLE) as u8,
            aa: bit(AA_SHIFT),
            tc: bit(TC_SHIFT),
            rd: bit(RD_SHIFT),
            ra: bit(RA_SHIFT),
            z: bit(Z_SHIFT),
            ad: bit(AD_SHIFT),
            cd: bit(CD_SHIFT),
            rcode: ((fields >> RCODE_SHIFT) & NIBBLE) as u8,
            ..Default::default()
        }
    }

    pub fn size() -> usize {
        12
    }
}
