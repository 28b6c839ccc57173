use crate::{Cursor, DomainName, ParserError};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Question {
    pub qname: DomainName,
    pub qtype: u16,
    pub qclass: u16,
}

impl Question {
    /// Returns `None` when the cursor has nothing left to read.
    pub fn parse(cursor: &mut Cursor) -> Result<Option<Self>, ParserError> {
        if cursor.is_empty() {
            return Ok(None);
        }

        let qname = DomainName::parse(cursor)?;
        let qtype = cursor.read_u16()?;
        let qclass = cursor.read_u16()?;

        Ok(Some(Self {
            qname,
            qtype,
            qclass,
        }))
    }

    pub fn write_to(&self, buf: &mut Vec<u8>) {
        self.qname.write_to(buf);
        buf.extend(self.qtype.to_be_bytes());
        buf.extend(self.qclass.to_be_bytes());
    }

    /// mDNS "QU" bit: the top bit of the class asks for a unicast reply.
    pub fn unicast_response(&self) -> bool {
        (self.qclass & (1 << 15)) == 1 << 15
    }
}
