//! In-process coprocessor backend
//!
//! Keeps plaintexts in a table sealed behind [`FheBackend`]; the core
//! only ever holds handles. Handle derivation is independent of the
//! plaintext, so a handle reveals nothing about the value it names.
//! Input proofs are keyed MACs over (contract, caller, handles), which
//! makes a bundle replayed against a different contract instance fail
//! verification.

use crate::backend::{FheBackend, InputBundle, InputProof};
use crate::handle::{EncryptedValue, FheType, Handle};
use crate::{FheError, FheResult};
use parking_lot::RwLock;
use rand::rngs::OsRng;
use rand::RngCore;
use std::collections::HashMap;

const HANDLE_DOMAIN: &[u8] = b"cauldron_fhe_handle";
const PROOF_DOMAIN: &[u8] = b"cauldron_fhe_input_proof";

/// A stored ciphertext: the plaintext and its domain class
#[derive(Clone, Copy)]
struct Slot {
    value: u64,
    ty: FheType,
}

struct Inner {
    slots: HashMap<Handle, Slot>,
    counter: u64,
}

/// In-process homomorphic coprocessor
pub struct Coprocessor {
    /// MAC key for input proofs and handle derivation
    secret: [u8; 32],
    inner: RwLock<Inner>,
}

impl Coprocessor {
    /// Create a coprocessor with a random secret
    pub fn new() -> Self {
        let mut secret = [0u8; 32];
        OsRng.fill_bytes(&mut secret);
        Self::with_secret(secret)
    }

    /// Create a coprocessor with a fixed secret (deterministic handles)
    pub fn with_secret(secret: [u8; 32]) -> Self {
        Self {
            secret,
            inner: RwLock::new(Inner {
                slots: HashMap::new(),
                counter: 0,
            }),
        }
    }

    /// Derive a fresh handle. Derivation covers only the secret, a
    /// counter and the type tag, never the plaintext.
    fn fresh_handle(&self, counter: u64, ty: FheType) -> Handle {
        let mut hasher = blake3::Hasher::new();
        hasher.update(HANDLE_DOMAIN);
        hasher.update(&self.secret);
        hasher.update(&counter.to_le_bytes());
        hasher.update(&[ty.tag()]);
        Handle::from_bytes(*hasher.finalize().as_bytes())
    }

    /// Store a plaintext under a fresh handle
    fn store(&self, value: u64, ty: FheType) -> EncryptedValue {
        let mut inner = self.inner.write();
        let counter = inner.counter;
        inner.counter += 1;
        let handle = self.fresh_handle(counter, ty);
        inner.slots.insert(handle, Slot { value, ty });
        EncryptedValue::new(handle, ty)
    }

    /// Look up a slot, checking the declared tag against the stored one
    fn fetch(&self, value: &EncryptedValue) -> FheResult<Slot> {
        let inner = self.inner.read();
        let slot = inner
            .slots
            .get(&value.handle)
            .copied()
            .ok_or_else(|| FheError::UnknownHandle(value.handle.to_hex()))?;
        if slot.ty != value.ty {
            return Err(FheError::TypeMismatch {
                expected: slot.ty,
                got: value.ty,
            });
        }
        Ok(slot)
    }

    /// MAC binding a handle set to (contract, caller)
    fn proof_tag(&self, contract: &[u8; 32], caller: &[u8; 32], inputs: &[EncryptedValue]) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new_keyed(&self.secret);
        hasher.update(PROOF_DOMAIN);
        hasher.update(contract);
        hasher.update(caller);
        for input in inputs {
            hasher.update(input.handle.as_bytes());
            hasher.update(&[input.ty.tag()]);
        }
        *hasher.finalize().as_bytes()
    }
}

impl Default for Coprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl FheBackend for Coprocessor {
    fn create_input(
        &self,
        contract: &[u8; 32],
        caller: &[u8; 32],
        plaintexts: &[u8],
    ) -> FheResult<InputBundle> {
        let inputs: Vec<EncryptedValue> = plaintexts
            .iter()
            .map(|&v| self.store(v as u64, FheType::Euint8))
            .collect();
        let proof = self.proof_tag(contract, caller, &inputs);
        Ok(InputBundle {
            inputs,
            proof: InputProof::from_bytes(proof.to_vec()),
        })
    }

    fn verify_input(
        &self,
        bundle: &InputBundle,
        contract: &[u8; 32],
        caller: &[u8; 32],
    ) -> FheResult<()> {
        let expected = self.proof_tag(contract, caller, &bundle.inputs);
        if bundle.proof.as_bytes() != expected {
            return Err(FheError::InvalidProof(
                "proof does not attest to this (contract, caller) pair".into(),
            ));
        }
        for input in &bundle.inputs {
            self.fetch(input)?;
        }
        Ok(())
    }

    fn trivial_encrypt(&self, value: u64, ty: FheType) -> FheResult<EncryptedValue> {
        if value > ty.max_value() {
            return Err(FheError::ValueOutOfRange { value, ty });
        }
        Ok(self.store(value, ty))
    }

    fn add(&self, a: &EncryptedValue, b: &EncryptedValue) -> FheResult<EncryptedValue> {
        if a.ty != b.ty {
            return Err(FheError::TypeMismatch {
                expected: a.ty,
                got: b.ty,
            });
        }
        if !a.ty.is_numeric() {
            return Err(FheError::TypeMismatch {
                expected: FheType::Euint16,
                got: a.ty,
            });
        }
        let sa = self.fetch(a)?;
        let sb = self.fetch(b)?;
        // Saturate at the class bound, never wrap
        let sum = sa.value.saturating_add(sb.value).min(a.ty.max_value());
        Ok(self.store(sum, a.ty))
    }

    fn eq_scalar(&self, a: &EncryptedValue, scalar: u64) -> FheResult<EncryptedValue> {
        if !a.ty.is_numeric() {
            return Err(FheError::TypeMismatch {
                expected: FheType::Euint8,
                got: a.ty,
            });
        }
        let sa = self.fetch(a)?;
        Ok(self.store((sa.value == scalar) as u64, FheType::Ebool))
    }

    fn gt(&self, a: &EncryptedValue, b: &EncryptedValue) -> FheResult<EncryptedValue> {
        if a.ty != b.ty {
            return Err(FheError::TypeMismatch {
                expected: a.ty,
                got: b.ty,
            });
        }
        if !a.ty.is_numeric() {
            return Err(FheError::TypeMismatch {
                expected: FheType::Euint16,
                got: a.ty,
            });
        }
        let sa = self.fetch(a)?;
        let sb = self.fetch(b)?;
        Ok(self.store((sa.value > sb.value) as u64, FheType::Ebool))
    }

    fn select(
        &self,
        cond: &EncryptedValue,
        if_true: &EncryptedValue,
        if_false: &EncryptedValue,
    ) -> FheResult<EncryptedValue> {
        if cond.ty != FheType::Ebool {
            return Err(FheError::TypeMismatch {
                expected: FheType::Ebool,
                got: cond.ty,
            });
        }
        if if_true.ty != if_false.ty {
            return Err(FheError::TypeMismatch {
                expected: if_true.ty,
                got: if_false.ty,
            });
        }
        let sc = self.fetch(cond)?;
        // Both arms are always resolved; the condition only picks the
        // output value, never the execution path
        let st = self.fetch(if_true)?;
        let sf = self.fetch(if_false)?;
        let mask = sc.value.wrapping_neg();
        let picked = (st.value & mask) | (sf.value & !mask);
        Ok(self.store(picked, if_true.ty))
    }

    fn user_decrypt(&self, handle: &Handle) -> FheResult<u64> {
        let inner = self.inner.read();
        inner
            .slots
            .get(handle)
            .map(|slot| slot.value)
            .ok_or_else(|| FheError::UnknownHandle(handle.to_hex()))
    }

    fn public_decrypt(&self, handles: &[Handle]) -> FheResult<Vec<u64>> {
        let inner = self.inner.read();
        handles
            .iter()
            .map(|handle| {
                inner
                    .slots
                    .get(handle)
                    .map(|slot| slot.value)
                    .ok_or_else(|| FheError::UnknownHandle(handle.to_hex()))
            })
            .collect()
    }
}
