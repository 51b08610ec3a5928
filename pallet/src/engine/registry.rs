use frame_support::ensure;
use sp_runtime::DispatchResult;
use crate::{Config, Error, Pallet, Voters};

impl<T: Config> Pallet<T>
{
	/// Returns true iff `voter` has cast a ballot.
	pub fn has_voted(voter: &T::AccountId) -> bool
	{
		Voters::<T>::contains_key(voter)
	}

	/// Record that `voter` has cast a ballot. Entries are never removed.
	pub(crate) fn mark_voted(voter: &T::AccountId) -> DispatchResult
	{
		Voters::<T>::try_mutate_exists(voter, |entry| -> DispatchResult {
			ensure!(entry.is_none(), Error::<T>::AlreadyVoted);
			*entry = Some(());
			Ok(())
		})
	}
}
