//! Cartridge image packing

use std::io::Write;

use crate::error::{GenError, ensure_equal, ensure_in_range};
use crate::node::{Address, ByteMap};
use crate::program::Assembly;

/// Reset and IRQ vectors occupy the last four bytes of the image.
pub const VECTOR_BYTES: u32 = 4;

const ADDRESS_SPACE: u32 = 0x1_0000;

/// Output container: `capacity` bytes mapped at the top of the 64 KiB
/// address space.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Target {
    pub capacity: u32,
    pub bank_size: u32,
}

impl Default for Target {
    /// 4 KiB cartridge at $F000.
    fn default() -> Self {
        Self {
            capacity: 4096,
            bank_size: 256,
        }
    }
}

impl Target {
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    pub fn with_bank_size(mut self, bank_size: u32) -> Self {
        self.bank_size = bank_size;
        self
    }

    /// Load address of the first image byte.
    pub fn origin(&self) -> Result<Address, GenError> {
        ensure_in_range("image capacity", self.capacity, VECTOR_BYTES, ADDRESS_SPACE)?;
        ensure_in_range("bank size", self.bank_size, 1, ADDRESS_SPACE)?;
        let origin = ADDRESS_SPACE - self.capacity;
        ensure_equal("origin alignment", 0, origin % self.bank_size)?;
        Ok(origin)
    }

    /// Program bytes must stay clear of the vectors.
    pub fn ensure_fits(&self, length: u32) -> Result<(), GenError> {
        let room = self.capacity.saturating_sub(VECTOR_BYTES);
        if length > room {
            return Err(GenError::ProgramTooLarge {
                length,
                capacity: room,
            });
        }
        Ok(())
    }

    /// Flattens resolved bytes into a zero-filled image and writes the vectors.
    pub fn pack(&self, length: u32, bytes: &ByteMap) -> Result<Vec<u8>, GenError> {
        let origin = self.origin()?;
        self.ensure_fits(length)?;

        let mut image = vec![0u8; self.capacity as usize];
        for (&address, &byte) in bytes {
            let offset = i64::from(address) - i64::from(origin);
            ensure_in_range("image offset", offset, 0, i64::from(self.capacity) - 1)?;
            image[offset as usize] = byte;
        }

        let vector = [(origin & 0xFF) as u8, (origin >> 8) as u8];
        let tail = image.len() - VECTOR_BYTES as usize;
        image[tail..tail + 2].copy_from_slice(&vector);
        image[tail + 2..].copy_from_slice(&vector);
        Ok(image)
    }
}

impl Assembly {
    pub fn write_image<W: Write>(&self, mut w: W) -> std::io::Result<()> {
        w.write_all(&self.image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_target_is_a_4k_cartridge() {
        assert_eq!(Target::default().origin().unwrap(), 0xF000);
        assert_eq!(Target::new(2048).origin().unwrap(), 0xF800);
    }

    #[test]
    fn misaligned_origin_is_rejected() {
        let err = Target::new(4000).origin().unwrap_err();
        assert!(matches!(err, GenError::NotEqual { .. }));
        assert!(Target::new(4000).with_bank_size(32).origin().is_ok());
    }

    #[test]
    fn gaps_are_zero_and_vectors_point_at_origin() {
        let mut bytes = ByteMap::new();
        bytes.insert(0xF000, 0xEA);
        bytes.insert(0xF003, 0x60);
        let image = Target::default().pack(4, &bytes).unwrap();

        assert_eq!(image.len(), 4096);
        assert_eq!(&image[..4], &[0xEA, 0, 0, 0x60]);
        assert!(image[4..4092].iter().all(|&b| b == 0));
        assert_eq!(&image[4092..], &[0x00, 0xF0, 0x00, 0xF0]);
    }

    #[test]
    fn oversized_program_is_rejected() {
        let target = Target::new(256);
        assert!(target.ensure_fits(252).is_ok());
        assert!(matches!(
            target.pack(253, &ByteMap::new()),
            Err(GenError::ProgramTooLarge { length: 253, capacity: 252 })
        ));
    }
}
