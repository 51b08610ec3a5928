use frame_support::ensure;
use frame_support::storage::with_storage_layer;
use sp_runtime::DispatchError;
use crate::constants::LOG_TARGET;
use crate::{
	CiphertextHandle,
	Config,
	EncryptedBallot,
	Error,
	Event,
	HomomorphicCompute,
	InputContext,
	OptionIndex,
	Pallet,
	ProofOf
};

impl<T: Config> Pallet<T>
{
	/// Validate a ballot and, if it is acceptable, fold it into the tally of `option`.
	///
	/// Checks run in order: option range, single vote, proof. The first failure aborts with no
	/// state change. On success the option's slot is replaced by the new total, the total is
	/// granted to its readers and the voter is recorded, all in one storage layer.
	///
	/// # Returns
	///
	/// The handle now holding the option's total. It is also carried by `VoteCast`, so callers
	/// dispatching through `vote` may ignore it.
	pub fn submit(
		voter: &T::AccountId,
		option: OptionIndex,
		ballot: &EncryptedBallot<ProofOf<T>>
	) -> Result<CiphertextHandle, DispatchError>
	{
		ensure!(option < Self::option_count(), Error::<T>::InvalidOption);
		ensure!(!Self::has_voted(voter), Error::<T>::AlreadyVoted);

		let context = InputContext {
			engine: Self::engine_account(),
			voter: voter.clone()
		};
		if !T::Compute::verify_input(&context, &ballot.ciphertext, &ballot.proof)
		{
			log::warn!(target: LOG_TARGET, "rejected ballot proof from {:?}", voter);
			Err(Error::<T>::InvalidProof)?
		}

		let tally = Self::accumulate(option, &ballot.ciphertext)?;
		Self::commit(voter, option, tally)?;

		log::info!(target: LOG_TARGET, "ballot from {:?} accepted on option {}", voter, option);
		Self::deposit_event(Event::VoteCast {
			voter: voter.clone(),
			option,
			tally
		});

		Ok(tally)
	}

	/// Store `tally` as the total of `option`, grant it to its readers and record `voter`.
	///
	/// Either every write lands or none does.
	pub(crate) fn commit(
		voter: &T::AccountId,
		option: OptionIndex,
		tally: CiphertextHandle
	) -> Result<(), DispatchError>
	{
		with_storage_layer(|| -> Result<(), DispatchError> {
			Self::replace_slot(option, tally)?;
			Self::grant_readers(&tally, voter);
			Self::mark_voted(voter)?;
			Ok(())
		})
	}
}
