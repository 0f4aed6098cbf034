//! In-memory backend for owned resource fork buffers.
//!
//! [`Memory`] owns a `Vec<u8>`. It backs forks created from a vector handed over by the
//! caller as well as forks that copy their input on construction.

use super::Backend;

/// An owned byte buffer holding a complete resource fork.
#[derive(Debug)]
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    /// Take ownership of `data`.
    pub fn new(data: Vec<u8>) -> Memory {
        Memory { data }
    }

    /// Copy `data` into a new private buffer.
    pub fn copy_of(data: &[u8]) -> Memory {
        Memory {
            data: data.to_vec(),
        }
    }
}

impl Backend for Memory {
    fn data(&self) -> &[u8] {
        self.data.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn slices_payload() {
        // file header followed by a pascal string payload
        let mut data = vec![0u8; 16];
        data.extend_from_slice(b"\x05Hello");
        let memory = Memory::new(data);

        assert_eq!(memory.len(), 22);
        assert!(!memory.is_empty());
        assert_eq!(memory.data_slice(17, 5).unwrap(), b"Hello");
        assert_eq!(memory.data_slice(16, 6).unwrap()[0], 5);
        assert!(memory.data_slice(17, 6).is_err());
        assert!(memory
            .data_slice(u32::MAX as usize, u32::MAX as usize)
            .is_err());
    }

    #[test]
    fn copy_is_independent() {
        let mut source = vec![1u8, 2, 3];
        let memory = Memory::copy_of(&source);
        source[0] = 0xFF;

        assert_eq!(memory.data(), &[1, 2, 3]);
    }

    #[test]
    fn bounds() {
        let memory = Memory::copy_of(&[0xAA; 64]);

        assert!(matches!(
            memory.data_slice(usize::MAX, 1),
            Err(Error::OutOfBounds)
        ));
        assert!(matches!(memory.data_slice(64, 1), Err(Error::OutOfBounds)));
        assert!(matches!(memory.data_slice(60, 5), Err(Error::OutOfBounds)));
        assert!(memory.data_slice(64, 0).unwrap().is_empty());
        assert!(Memory::new(Vec::new()).is_empty());
    }
}
