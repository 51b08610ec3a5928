//! # Confidential Tally Pallet
//!
//! Counts encrypted ballots without ever seeing an individual choice.
//!
//! Each option owns a single ciphertext handle representing the encrypted sum of the ballots cast
//! for it. A voter submits a ciphertext (claimed to encode 0 or 1) together with a correctness
//! proof bound to this engine and to the voter. Accepted ballots are folded into the running total
//! by the homomorphic compute service, the resulting handle replaces the previous slot, and the
//! principals entitled to decrypt it are granted on the new handle. Each account may vote once.
//!
//! The engine never holds plaintext. Key management, ciphertext arithmetic, proof verification and
//! decryption live behind [`HomomorphicCompute`] and [`AccessControl`].

#![cfg_attr(not(feature = "std"), no_std)]

pub use pallet::*;

pub mod compute;
pub mod constants;
pub mod types;
mod engine;

#[cfg(test)]
mod mock;


#[cfg(feature = "runtime-benchmarks")]
pub mod benchmarking;

pub use compute::{AccessControl, ComputeError, HomomorphicCompute};
pub use types::{CiphertextHandle, EncryptedBallot, InputContext, OptionIndex, ProofOf};

#[frame_support::pallet]
pub mod pallet
{
	use super::*;
	use frame_support::pallet_prelude::*;
	use frame_support::PalletId;
	use frame_system::pallet_prelude::*;
	use sp_std::vec::Vec;
	use crate::constants::DEFAULT_OPTION_COUNT;

	const STORAGE_VERSION: StorageVersion = StorageVersion::new(0);

	#[pallet::pallet]
	#[pallet::storage_version(STORAGE_VERSION)]
	pub struct Pallet<T>(_);

	#[pallet::config]
	pub trait Config: frame_system::Config
	{
		/// The overarching event type.
		type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

		/// The homomorphic compute service holding every ciphertext the engine references.
		type Compute: HomomorphicCompute<Self::AccountId>;

		/// Identifier from which the engine's own principal is derived.
		#[pallet::constant]
		type PalletId: Get<PalletId>;

		/// The maximum number of tally options.
		#[pallet::constant]
		type MaxOptions: Get<u32>;

		/// The maximum length of a ballot correctness proof.
		#[pallet::constant]
		type MaxProofLength: Get<u32>;

		/// Produces ballots the configured compute service accepts.
		#[cfg(feature = "runtime-benchmarks")]
		type BenchmarkHelper: crate::benchmarking::BenchmarkHelper<Self::AccountId>;
	}

	/// The encrypted running total of each option, indexed by option.
	#[pallet::storage]
	pub type Tallies<T: Config> = StorageValue<
		_,
		BoundedVec<CiphertextHandle, T::MaxOptions>,
		ValueQuery
	>;

	/// The number of options, fixed at genesis.
	#[pallet::storage]
	pub type OptionCount<T> = StorageValue<_, u32, ValueQuery>;

	/// Accounts which have cast their ballot.
	#[pallet::storage]
	pub type Voters<T: Config> = StorageMap<
		_,
		Blake2_128Concat,
		T::AccountId,
		(),
		OptionQuery
	>;

	/// Map of ciphertext handles to the principals permitted to decrypt them.
	#[pallet::storage]
	pub type Permissions<T: Config> = StorageDoubleMap<
		_,
		Blake2_128Concat,
		CiphertextHandle,
		Blake2_128Concat,
		T::AccountId,
		(),
		OptionQuery
	>;

	/// A principal granted on every tally handle, if configured.
	#[pallet::storage]
	pub type TallyAuthority<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

	#[pallet::genesis_config]
	pub struct GenesisConfig<T: Config>
	{
		/// The fixed number of options.
		pub option_count: u32,

		/// An account entitled to decrypt every tally.
		pub tally_authority: Option<T::AccountId>,

		#[serde(skip)]
		pub _config: sp_std::marker::PhantomData<T>
	}

	impl<T: Config> Default for GenesisConfig<T>
	{
		fn default() -> Self
		{
			GenesisConfig {
				option_count: DEFAULT_OPTION_COUNT,
				tally_authority: None,
				_config: Default::default()
			}
		}
	}

	#[pallet::genesis_build]
	impl<T: Config> BuildGenesisConfig for GenesisConfig<T>
	{
		fn build(&self)
		{
			assert!(self.option_count > 0, "a tally requires at least one option");
			assert!(
				self.option_count <= T::MaxOptions::get(),
				"option count exceeds `MaxOptions`"
			);

			if let Some(ref authority) = self.tally_authority
			{
				TallyAuthority::<T>::put(authority);
			}

			let engine = Pallet::<T>::engine_account();
			let mut slots = Vec::with_capacity(self.option_count as usize);
			for option in 0..self.option_count
			{
				let zero = match T::Compute::trivial_encrypt(0)
				{
					Ok(handle) => handle,
					Err(fault) => panic!("failed to seed tally slot {}: {:?}", option, fault)
				};

				Pallet::<T>::grant(&zero, &engine);
				if let Some(ref authority) = self.tally_authority
				{
					Pallet::<T>::grant(&zero, authority);
				}
				slots.push(zero);
			}

			let slots: BoundedVec<CiphertextHandle, T::MaxOptions> = BoundedVec::truncate_from(slots);
			Tallies::<T>::put(slots);
			OptionCount::<T>::put(self.option_count);
		}
	}

	#[pallet::event]
	#[pallet::generate_deposit(pub(super) fn deposit_event)]
	pub enum Event<T: Config>
	{
		/// A ballot was accepted and folded into a tally.
		VoteCast {
			/// The voter.
			voter: T::AccountId,
			/// The option voted for.
			option: OptionIndex,
			/// The handle now holding the option's encrypted total.
			tally: CiphertextHandle
		}
	}

	#[pallet::error]
	pub enum Error<T>
	{
		/// The option index is outside `[0, N)`.
		InvalidOption,

		/// The voter has already cast a ballot.
		AlreadyVoted,

		/// The ballot's correctness proof was rejected.
		InvalidProof,

		/// The homomorphic compute service failed.
		ComputeError(ComputeError)
	}

	#[pallet::hooks]
	impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T>
	{
		fn integrity_test()
		{
			assert!(T::MaxOptions::get() > 0, "`MaxOptions` must be positive");
		}

		#[cfg(feature = "try-runtime")]
		fn try_state(_n: BlockNumberFor<T>) -> Result<(), sp_runtime::TryRuntimeError>
		{
			Self::check_invariants().map_err(Into::into)
		}
	}

	#[pallet::call]
	impl<T: Config> Pallet<T>
	{
		/// Cast an encrypted ballot for an option.
		///
		/// - `option`: The index of the option voted for.
		/// - `ciphertext`: Handle to the encrypted vote weight.
		/// - `proof`: Proof that `ciphertext` was encrypted for this engine by the caller.
		///
		/// Emits `VoteCast`.
		#[pallet::call_index(0)]
		// Reads: `OptionCount`, `Voters`, `Tallies`, `TallyAuthority`, `Permissions` for the
		// engine, the voter and the authority.
		// Writes: `Tallies`, the same three `Permissions`, `Voters`, `System::Events`.
		#[pallet::weight(T::DbWeight::get().reads_writes(7, 6))]
		pub fn vote(
			origin: OriginFor<T>,
			option: OptionIndex,
			ciphertext: CiphertextHandle,
			proof: ProofOf<T>
		) -> DispatchResult
		{
			// Check that the extrinsic was signed and get the signer.
			let voter = ensure_signed(origin)?;

			Self::submit(&voter, option, &EncryptedBallot { ciphertext, proof })?;

			Ok(())
		}
	}
}
