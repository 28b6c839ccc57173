use crate::ParserError;

/// Read position over an immutable packet buffer.
///
/// Every read advances the position past the bytes it returned and fails with
/// [`ParserError::TruncatedInput`] when not enough bytes are left. The full
/// buffer stays reachable through [`Cursor::original`] so that compression
/// pointers can be followed later.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn original(&self) -> &'a [u8] {
        self.data
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], ParserError> {
        if len > self.remaining() {
            return Err(ParserError::TruncatedInput);
        }

        let out = &self.data[self.pos..self.pos + len];
        self.pos += len;

        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, ParserError> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, ParserError> {
        let b = self.read_bytes(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32, ParserError> {
        let b = self.read_bytes(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_advance_position() {
        let data = [0x12, 0x34, 0xde, 0xad, 0xbe, 0xef, 0x01];
        let mut cursor = Cursor::new(&data);

        assert_eq!(cursor.read_u16(), Ok(0x1234));
        assert_eq!(cursor.read_u32(), Ok(0xdeadbeef));
        assert_eq!(cursor.position(), 6);
        assert_eq!(cursor.read_u8(), Ok(0x01));
        assert!(cursor.is_empty());
    }

    #[test]
    fn short_read_leaves_position_untouched() {
        let data = [0xff, 0xee, 0xdd];
        let mut cursor = Cursor::new(&data);
        cursor.read_u8().unwrap();

        assert_eq!(cursor.read_u32(), Err(ParserError::TruncatedInput));
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.read_bytes(2), Ok(&data[1..]));
        assert_eq!(cursor.read_u8(), Err(ParserError::TruncatedInput));
    }

    #[test]
    fn original_is_whole_buffer() {
        let data = [1, 2, 3];
        let mut cursor = Cursor::new(&data);
        cursor.read_bytes(2).unwrap();

        assert_eq!(cursor.original(), &data);
        assert_eq!(cursor.remaining(), 1);
    }
}
