//! Ciphertext handle types
//!
//! A handle is an opaque 32-byte reference to a ciphertext owned by the
//! backend. Handles carry a type tag naming the plaintext domain so the
//! core can enforce bit-width classes without ever decoding anything.

use serde::{Deserialize, Serialize};

/// Plaintext domain class of an encrypted value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FheType {
    /// Encrypted boolean (0 or 1)
    Ebool,
    /// Encrypted 8-bit unsigned integer
    Euint8,
    /// Encrypted 16-bit unsigned integer
    Euint16,
}

impl FheType {
    /// Largest plaintext representable in this class
    pub fn max_value(&self) -> u64 {
        match self {
            FheType::Ebool => 1,
            FheType::Euint8 => u8::MAX as u64,
            FheType::Euint16 => u16::MAX as u64,
        }
    }

    /// Whether arithmetic operations apply to this class
    pub fn is_numeric(&self) -> bool {
        !matches!(self, FheType::Ebool)
    }

    /// Stable tag byte used in handle derivation
    pub fn tag(&self) -> u8 {
        match self {
            FheType::Ebool => 0,
            FheType::Euint8 => 1,
            FheType::Euint16 => 2,
        }
    }
}

/// Opaque reference to a ciphertext managed by the backend
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Handle([u8; 32]);

impl Handle {
    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl std::fmt::Debug for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Handle({}…)", hex::encode(&self.0[..8]))
    }
}

/// An encrypted value: a handle plus its declared type tag
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedValue {
    /// Opaque ciphertext handle
    pub handle: Handle,
    /// Declared plaintext domain class
    pub ty: FheType,
}

impl EncryptedValue {
    /// Create a new encrypted value reference
    pub fn new(handle: Handle, ty: FheType) -> Self {
        Self { handle, ty }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_bounds() {
        assert_eq!(FheType::Ebool.max_value(), 1);
        assert_eq!(FheType::Euint8.max_value(), 255);
        assert_eq!(FheType::Euint16.max_value(), 65535);
        assert!(!FheType::Ebool.is_numeric());
        assert!(FheType::Euint16.is_numeric());
    }

    #[test]
    fn test_handle_hex_roundtrip() {
        let handle = Handle::from_bytes([7u8; 32]);
        assert_eq!(handle.to_hex(), hex::encode([7u8; 32]));
        assert_eq!(handle.as_bytes(), &[7u8; 32]);
    }
}
