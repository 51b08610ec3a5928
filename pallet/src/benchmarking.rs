use super::*;
use frame_benchmarking::{benchmarks, whitelisted_caller};
use frame_system::RawOrigin;
use sp_std::vec::Vec;

use crate::Pallet as ConfidentialTally;

/// Produces ballots the configured compute service accepts.
pub trait BenchmarkHelper<AccountId>
{
	/// An encrypted `1` and its proof, bound to `engine` and `voter`.
	fn encrypted_ballot(engine: &AccountId, voter: &AccountId) -> (CiphertextHandle, Vec<u8>);
}

benchmarks!
{
	vote {
		let caller: T::AccountId = whitelisted_caller();
		let engine = ConfidentialTally::<T>::engine_account();
		let (ciphertext, proof) = T::BenchmarkHelper::encrypted_ballot(&engine, &caller);
		let proof: ProofOf<T> = proof.try_into().map_err(|_| "proof exceeds `MaxProofLength`")?;
	}: _(RawOrigin::Signed(caller.clone()), 0, ciphertext, proof)
	verify {
		assert!(ConfidentialTally::<T>::has_voted(&caller));
	}

	impl_benchmark_test_suite!(ConfidentialTally, crate::mock::new_test_ext(), crate::mock::Test)
}
