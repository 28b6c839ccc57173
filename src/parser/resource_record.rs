use crate::{Cursor, DomainName, ParserError};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: DomainName,
    pub rtype: u16,
    pub class: u16,
    pub ttl: u32,
    /// Length as read from the wire. Ignored when writing, the length of
    /// `rdata` is used instead.
    pub rdlength: u16,
    pub rdata: Vec<u8>,
}

impl ResourceRecord {
    pub fn new(name: DomainName, rtype: u16, class: u16, ttl: u32, rdata: Vec<u8>) -> Self {
        Self {
            name,
            rtype,
            class,
            ttl,
            rdlength: rdata_len(&rdata),
            rdata,
        }
    }

    /// Returns `None` when the cursor has nothing left to read.
    pub fn parse(cursor: &mut Cursor) -> Result<Option<Self>, ParserError> {
        if cursor.is_empty() {
            return Ok(None);
        }

        let name = DomainName::parse(cursor)?;
        let rtype = cursor.read_u16()?;
        let class = cursor.read_u16()?;
        let ttl = cursor.read_u32()?;
        let rdlength = cursor.read_u16()?;
        let rdata = cursor.read_bytes(rdlength as usize)?.to_vec();

        Ok(Some(Self {
            name,
            rtype,
            class,
            ttl,
            rdlength,
            rdata,
        }))
    }

    pub fn write_to(&self, buf: &mut Vec<u8>) {
        let rdlength = rdata_len(&self.rdata);

        self.name.write_to(buf);
        buf.extend(self.rtype.to_be_bytes());
        buf.extend(self.class.to_be_bytes());
        buf.extend(self.ttl.to_be_bytes());
        buf.extend(rdlength.to_be_bytes());
        buf.extend(&self.rdata);
    }

    /// mDNS cache-flush bit, the top bit of the class.
    pub fn cache_flush(&self) -> bool {
        ((self.class >> 15) & 1) == 1
    }
}

/// RDATA must fit the 16-bit RDLENGTH; longer payloads are a caller bug.
fn rdata_len(rdata: &[u8]) -> u16 {
    debug_assert!(
        rdata.len() <= u16::MAX as usize,
        "{} bytes of RDATA do not fit in RDLENGTH",
        rdata.len()
    );

    u16::try_from(rdata.len()).unwrap_or(u16::MAX)
}
