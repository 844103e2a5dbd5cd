//! Cursor over a borrowed frame.

/// Reads big-endian fields from a frame, advancing past each one.
///
/// Reads past the end return `None` and leave the cursor where it was.
#[derive(Debug, Clone)]
pub struct FrameReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> FrameReader<'a> {
    /// Create a reader positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        FrameReader { data, pos: 0 }
    }

    /// Current offset into the frame.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Read one unsigned byte.
    pub fn read_u8(&mut self) -> Option<u8> {
        let byte = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }

    /// Read one byte as a two's-complement signed value.
    pub fn read_i8(&mut self) -> Option<i8> {
        self.read_u8().map(|b| b as i8)
    }

    /// Read a big-endian unsigned 16-bit value.
    pub fn read_u16_be(&mut self) -> Option<u16> {
        let bytes = self.data.get(self.pos..self.pos + 2)?;
        let value = u16::from_be_bytes([bytes[0], bytes[1]]);
        self.pos += 2;
        Some(value)
    }

    /// Read a big-endian 16-bit value, taking bytes past the end as zero.
    ///
    /// Advances over whatever part of the field the frame holds.
    pub fn read_u16_be_zero_filled(&mut self) -> u16 {
        let high = self.data.get(self.pos).copied().unwrap_or(0);
        let low = self.data.get(self.pos + 1).copied().unwrap_or(0);
        self.pos = (self.pos + 2).min(self.data.len());
        u16::from_be_bytes([high, low])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_reads() {
        let mut reader = FrameReader::new(&[0x01, 0xC8, 0x0A, 0x28]);
        assert_eq!(reader.read_u8(), Some(1));
        assert_eq!(reader.read_i8(), Some(-56));
        assert_eq!(reader.read_u16_be(), Some(0x0A28));
        assert_eq!(reader.position(), 4);
        assert_eq!(reader.remaining(), 0);
        assert_eq!(reader.read_u8(), None);
    }

    #[test]
    fn test_i8_boundaries() {
        let mut reader = FrameReader::new(&[127, 128, 255, 100]);
        assert_eq!(reader.read_i8(), Some(127));
        assert_eq!(reader.read_i8(), Some(-128));
        assert_eq!(reader.read_i8(), Some(-1));
        assert_eq!(reader.read_i8(), Some(100));
    }

    #[test]
    fn test_short_u16_does_not_advance() {
        let mut reader = FrameReader::new(&[0x80]);
        assert_eq!(reader.read_u16_be(), None);
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.read_u8(), Some(0x80));
    }

    #[test]
    fn test_zero_filled_u16() {
        let mut reader = FrameReader::new(&[0x12, 0x34, 0x01]);
        assert_eq!(reader.read_u16_be_zero_filled(), 0x1234);
        assert_eq!(reader.read_u16_be_zero_filled(), 0x0100);
        assert_eq!(reader.position(), 3);
        assert_eq!(reader.read_u16_be_zero_filled(), 0);
        assert_eq!(reader.position(), 3);
        assert_eq!(reader.read_u8(), None);
    }
}
