use sp_runtime::DispatchError;
use crate::constants::LOG_TARGET;
use crate::{CiphertextHandle, Config, Error, HomomorphicCompute, OptionIndex, Pallet};

impl<T: Config> Pallet<T>
{
	/// Fold `ciphertext` into the running total of `option`, returning the new total's handle.
	///
	/// The stored slot is left untouched; the caller decides whether to substitute the result.
	pub(crate) fn accumulate(
		option: OptionIndex,
		ciphertext: &CiphertextHandle
	) -> Result<CiphertextHandle, DispatchError>
	{
		let current = Self::tally(option)?;

		let total = T::Compute::add(&current, ciphertext).map_err(|fault| {
			log::warn!(target: LOG_TARGET, "homomorphic add failed on option {}: {:?}", option, fault);
			DispatchError::from(Error::<T>::ComputeError(fault))
		})?;

		log::debug!(target: LOG_TARGET, "option {} accumulated into {:?}", option, total);
		Ok(total)
	}
}
