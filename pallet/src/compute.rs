use frame_support::pallet_prelude::*;
use frame_support::PalletError;
use crate::types::{CiphertextHandle, InputContext};

/// Failure reported by the homomorphic compute service.
#[derive(Clone, Copy, Encode, Decode, Eq, PartialEq, RuntimeDebug, TypeInfo, PalletError)]
pub enum ComputeError
{
	/// The service holds no ciphertext for a handle.
	UnknownHandle,

	/// A handle or result did not have the expected shape.
	MalformedHandle,

	/// The service could not complete the operation.
	Unavailable
}

/// The homomorphic compute service the engine delegates all ciphertext work to.
///
/// Handles are threaded through these calls and never interpreted by the engine. Addition is over
/// the unsigned 32-bit ring, so sums wrap modulo 2^32.
pub trait HomomorphicCompute<AccountId>
{
	/// Produce a handle encrypting a public constant.
	fn trivial_encrypt(value: u32) -> Result<CiphertextHandle, ComputeError>;

	/// Check that `proof` attests `ciphertext` was well formed for `context`.
	fn verify_input(
		context: &InputContext<AccountId>,
		ciphertext: &CiphertextHandle,
		proof: &[u8]
	) -> bool;

	/// Add two ciphertexts under encryption, returning a fresh handle.
	fn add(
		lhs: &CiphertextHandle,
		rhs: &CiphertextHandle
	) -> Result<CiphertextHandle, ComputeError>;
}

/// Read-only view of the engine's access control list, consumed by the decryption service.
pub trait AccessControl<AccountId>
{
	/// The principal the engine itself acts as.
	fn engine_account() -> AccountId;

	/// Returns true iff `who` may request decryption of `handle`.
	fn is_granted(handle: &CiphertextHandle, who: &AccountId) -> bool;
}
