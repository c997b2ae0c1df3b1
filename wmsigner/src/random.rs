/*!
    Random byte sources for signing.

    Signing takes any [`TryRngCore`]. Infallible generators such as
    `rand::rng()` work as they are; fallible ones surface their error as
    [`SignerError::RandomSourceError`](crate::SignerError::RandomSourceError).
*/

use std::io::{self, Read};

use rand::TryRngCore;

/**
    Adapts a byte stream into a fallible random source.

    Every request is served with `read_exact`, so a stream that runs dry
    before the requested number of bytes is an error rather than a short
    fill.
*/
#[derive(Debug)]
pub struct ReaderRng<R> {
    reader: R,
}

impl<R: Read> ReaderRng<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> TryRngCore for ReaderRng<R> {
    type Error = io::Error;

    fn try_next_u32(&mut self) -> Result<u32, Self::Error> {
        let mut buf = [0u8; 4];
        self.try_fill_bytes(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    fn try_next_u64(&mut self) -> Result<u64, Self::Error> {
        let mut buf = [0u8; 8];
        self.try_fill_bytes(&mut buf)?;
        Ok(u64::from_le_bytes(buf))
    }

    fn try_fill_bytes(&mut self, dst: &mut [u8]) -> Result<(), Self::Error> {
        self.reader.read_exact(dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_from_stream() {
        let mut rng = ReaderRng::new(&[1u8, 2, 3, 4, 5, 6][..]);
        let mut buf = [0u8; 4];
        rng.try_fill_bytes(&mut buf).unwrap();
        assert_eq!(buf, [1, 2, 3, 4]);
        assert_eq!(rng.into_inner(), &[5, 6]);
    }

    #[test]
    fn short_stream_is_an_error() {
        let mut rng = ReaderRng::new(&[0u8; 39][..]);
        let mut buf = [0u8; 40];
        let err = rng.try_fill_bytes(&mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn next_words_are_little_endian() {
        let mut rng = ReaderRng::new(&[1u8, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0][..]);
        assert_eq!(rng.try_next_u32().unwrap(), 1);
        assert_eq!(rng.try_next_u64().unwrap(), 2);
    }
}
