use frame_support::pallet_prelude::*;
use serde::{Deserialize, Serialize};

/// Index of a tally option, in `[0, N)`.
pub type OptionIndex = u32;

/// A bounded correctness proof accompanying an encrypted ballot.
pub type ProofOf<T> = BoundedVec<u8, <T as crate::Config>::MaxProofLength>;

/// Opaque reference to an encrypted 32-bit unsigned value held by the compute service.
///
/// Handles are never decoded locally and never mutated; combining two handles yields a new one.
#[derive(
	Clone, Copy, Encode, Decode, Eq, PartialEq, Ord, PartialOrd, RuntimeDebug, TypeInfo, MaxEncodedLen,
	Serialize, Deserialize
)]
pub struct CiphertextHandle([u8; 32]);

impl From<[u8; 32]> for CiphertextHandle
{
	fn from(raw: [u8; 32]) -> Self
	{
		CiphertextHandle(raw)
	}
}

/// An encrypted ballot: a ciphertext claimed to encode 0 or 1, bound to a proof.
#[derive(Clone, Encode, Decode, Eq, PartialEq, RuntimeDebug, TypeInfo)]
pub struct EncryptedBallot<Proof>
{
	/// The encrypted vote weight.
	pub ciphertext: CiphertextHandle,

	/// Proof that `ciphertext` was produced for this engine and this voter.
	pub proof: Proof
}

/// The identities a ballot proof is bound to.
#[derive(Clone, Encode, Decode, Eq, PartialEq, RuntimeDebug, TypeInfo)]
pub struct InputContext<AccountId>
{
	/// The engine principal the ballot was encrypted for.
	pub engine: AccountId,

	/// The voter who produced the ballot.
	pub voter: AccountId
}
