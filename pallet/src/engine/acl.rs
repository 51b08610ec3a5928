use frame_support::traits::Get;
use sp_runtime::traits::AccountIdConversion;
use crate::constants::LOG_TARGET;
use crate::{AccessControl, CiphertextHandle, Config, Pallet, Permissions, TallyAuthority};

impl<T: Config> Pallet<T>
{
	/// The principal the engine acts as when holding its own ciphertexts.
	pub fn engine_account() -> T::AccountId
	{
		T::PalletId::get().into_account_truncating()
	}

	/// Returns true iff `who` may request decryption of `handle`.
	pub fn is_granted(handle: &CiphertextHandle, who: &T::AccountId) -> bool
	{
		Permissions::<T>::contains_key(handle, who)
	}

	/// Permit `who` to decrypt `handle`. Granting twice is a no-op.
	pub(crate) fn grant(handle: &CiphertextHandle, who: &T::AccountId)
	{
		if Self::is_granted(handle, who)
		{
			return;
		}

		Permissions::<T>::insert(handle, who, ());
		log::debug!(target: LOG_TARGET, "granted {:?} on {:?}", who, handle);
	}

	/// Grant a freshly derived tally handle to everyone who must keep reading the tally.
	///
	/// New handles inherit nothing from the handle they supersede. A voter is granted only the
	/// total their own ballot produced, not the other options' totals.
	pub(crate) fn grant_readers(handle: &CiphertextHandle, voter: &T::AccountId)
	{
		Self::grant(handle, &Self::engine_account());
		Self::grant(handle, voter);

		if let Some(authority) = TallyAuthority::<T>::get()
		{
			Self::grant(handle, &authority);
		}
	}
}

impl<T: Config> AccessControl<T::AccountId> for Pallet<T>
{
	fn engine_account() -> T::AccountId
	{
		Pallet::<T>::engine_account()
	}

	fn is_granted(handle: &CiphertextHandle, who: &T::AccountId) -> bool
	{
		Pallet::<T>::is_granted(handle, who)
	}
}
