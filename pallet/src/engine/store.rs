use frame_support::ensure;
use sp_runtime::DispatchError;
use sp_std::vec::Vec;
use crate::{CiphertextHandle, Config, Error, OptionCount, OptionIndex, Pallet, Tallies};

impl<T: Config> Pallet<T>
{
	/// The number of options, `N`.
	pub fn option_count() -> u32
	{
		OptionCount::<T>::get()
	}

	/// The handle currently holding the encrypted total of `option`.
	pub fn tally(option: OptionIndex) -> Result<CiphertextHandle, DispatchError>
	{
		let slots = Tallies::<T>::get();
		let handle = slots.get(option as usize).ok_or(Error::<T>::InvalidOption)?;
		Ok(*handle)
	}

	/// Every tally handle, ordered by option.
	pub fn tallies() -> Vec<CiphertextHandle>
	{
		Tallies::<T>::get().into_inner()
	}

	/// Substitute the handle of `option`, returning the superseded one.
	pub(crate) fn replace_slot(
		option: OptionIndex,
		handle: CiphertextHandle
	) -> Result<CiphertextHandle, DispatchError>
	{
		Tallies::<T>::try_mutate(|slots| -> Result<CiphertextHandle, DispatchError> {
			let slot = slots.get_mut(option as usize).ok_or(Error::<T>::InvalidOption)?;
			Ok(sp_std::mem::replace(slot, handle))
		})
	}

	/// Checks that there is exactly one slot per option and that the engine can read each of them.
	pub fn check_invariants() -> Result<(), &'static str>
	{
		let slots = Tallies::<T>::get();
		ensure!(
			slots.len() == Self::option_count() as usize,
			"tally slot count differs from the option count"
		);

		let engine = Self::engine_account();
		ensure!(
			slots.iter().all(|handle| Self::is_granted(handle, &engine)),
			"a live tally handle is not readable by the engine"
		);

		Ok(())
	}
}
