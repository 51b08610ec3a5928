use crate as pallet_confidential_tally;
use crate::{AccessControl, CiphertextHandle, ComputeError, HomomorphicCompute, InputContext};
use codec::Encode;
use frame_support::{
	derive_impl,
	parameter_types,
	traits::{ConstU32, ConstU64},
	weights::constants::RocksDbWeight,
	PalletId
};
use sp_core::{hashing::blake2_256, H256};
use sp_runtime::{
	traits::{BlakeTwo256, IdentityLookup},
	BuildStorage,
};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

pub const ALICE: u64 = 1;
pub const BOB: u64 = 2;
pub const CHARLIE: u64 = 3;
pub const DAVE: u64 = 4;
pub const AUTHORITY: u64 = 100;

type Block = frame_system::mocking::MockBlock<Test>;

frame_support::construct_runtime!(
	pub enum Test
	{
		System: frame_system::{Pallet, Call, Config<T>, Storage, Event<T>},
		ConfidentialTally: pallet_confidential_tally::{Pallet, Call, Storage, Config<T>, Event<T>},
	}
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig as frame_system::DefaultConfig)]
impl frame_system::Config for Test {
	type BaseCallFilter = frame_support::traits::Everything;
	type BlockWeights = ();
	type BlockLength = ();
	type DbWeight = RocksDbWeight;
	type RuntimeOrigin = RuntimeOrigin;
	type Nonce = u64;
	type Hash = H256;
	type RuntimeCall = RuntimeCall;
	type Hashing = BlakeTwo256;
	type AccountId = u64;
	type Lookup = IdentityLookup<Self::AccountId>;
	type Block = Block;
	type RuntimeEvent = RuntimeEvent;
	type BlockHashCount = ConstU64<250>;
	type Version = ();
	type PalletInfo = PalletInfo;
	type OnNewAccount = ();
	type OnKilledAccount = ();
	type SystemWeightInfo = ();
	type SS58Prefix = ();
	type OnSetCode = ();
	type MaxConsumers = frame_support::traits::ConstU32<16>;
}

parameter_types! {
	pub const TallyPalletId: PalletId = PalletId(*b"py/tally");
}

impl pallet_confidential_tally::Config for Test {
	type RuntimeEvent = RuntimeEvent;
	type Compute = MockCompute;
	type PalletId = TallyPalletId;
	type MaxOptions = ConstU32<8>;
	type MaxProofLength = ConstU32<64>;
	#[cfg(feature = "runtime-benchmarks")]
	type BenchmarkHelper = MockCompute;
}

thread_local! {
	static PLAINTEXTS: RefCell<BTreeMap<CiphertextHandle, u32>> = RefCell::new(BTreeMap::new());
	static NONCE: Cell<u64> = Cell::new(0);
	static FAULT: Cell<Option<ComputeError>> = Cell::new(None);
}

/// Stand-in for the homomorphic compute service.
///
/// Handles are blake2 digests and the plaintext behind each one is kept in a thread-local table,
/// which is what a mock coprocessor does. Proofs are digests of `(engine, voter, handle)`.
pub struct MockCompute;

impl MockCompute
{
	fn store(domain: &[u8], material: &[u8], value: u32) -> CiphertextHandle
	{
		let nonce = NONCE.with(|n| {
			let next = n.get();
			n.set(next + 1);
			next
		});
		let handle = CiphertextHandle::from((domain, material, nonce).using_encoded(blake2_256));
		PLAINTEXTS.with(|p| p.borrow_mut().insert(handle, value));
		handle
	}

	fn input_proof(engine: &u64, voter: &u64, handle: &CiphertextHandle) -> Vec<u8>
	{
		(b"fhe/input-proof", engine, voter, handle).using_encoded(blake2_256).to_vec()
	}

	/// Encrypt `value` client side for `voter`, bound to `engine`.
	pub fn encrypt_input(engine: &u64, voter: &u64, value: u32) -> (CiphertextHandle, Vec<u8>)
	{
		let handle = Self::store(b"fhe/input", &(engine, voter).encode(), value);
		(handle, Self::input_proof(engine, voter, &handle))
	}

	/// The plaintext behind `handle`, bypassing any access control.
	pub fn plaintext(handle: &CiphertextHandle) -> Option<u32>
	{
		PLAINTEXTS.with(|p| p.borrow().get(handle).copied())
	}

	/// Make every subsequent addition fail with `fault`, or succeed again with `None`.
	pub fn set_fault(fault: Option<ComputeError>)
	{
		FAULT.with(|f| f.set(fault));
	}
}

impl HomomorphicCompute<u64> for MockCompute
{
	fn trivial_encrypt(value: u32) -> Result<CiphertextHandle, ComputeError>
	{
		Ok(Self::store(b"fhe/trivial", &value.encode(), value))
	}

	fn verify_input(
		context: &InputContext<u64>,
		ciphertext: &CiphertextHandle,
		proof: &[u8]
	) -> bool
	{
		Self::plaintext(ciphertext).is_some()
			&& proof == Self::input_proof(&context.engine, &context.voter, ciphertext).as_slice()
	}

	fn add(
		lhs: &CiphertextHandle,
		rhs: &CiphertextHandle
	) -> Result<CiphertextHandle, ComputeError>
	{
		if let Some(fault) = FAULT.with(|f| f.get())
		{
			return Err(fault);
		}

		let a = Self::plaintext(lhs).ok_or(ComputeError::UnknownHandle)?;
		let b = Self::plaintext(rhs).ok_or(ComputeError::UnknownHandle)?;
		Ok(Self::store(b"fhe/add", &(lhs, rhs).encode(), a.wrapping_add(b)))
	}
}

#[cfg(feature = "runtime-benchmarks")]
impl crate::benchmarking::BenchmarkHelper<u64> for MockCompute
{
	fn encrypted_ballot(engine: &u64, voter: &u64) -> (CiphertextHandle, Vec<u8>)
	{
		MockCompute::encrypt_input(engine, voter, 1)
	}
}

/// Stand-in for the decryption service.
pub struct MockDecryptor;

impl MockDecryptor
{
	/// Decrypt `handle` for `who`, which requires both the engine and `who` to be granted on it.
	pub fn user_decrypt<A: AccessControl<u64>>(handle: &CiphertextHandle, who: &u64) -> Option<u32>
	{
		let engine = A::engine_account();
		if !A::is_granted(handle, &engine) || !A::is_granted(handle, who)
		{
			return None;
		}

		MockCompute::plaintext(handle)
	}
}

pub fn new_test_ext() -> sp_io::TestExternalities {
	new_test_ext_with(3, Some(AUTHORITY))
}

pub fn new_test_ext_with(option_count: u32, tally_authority: Option<u64>) -> sp_io::TestExternalities {
	let t = RuntimeGenesisConfig {
		system: Default::default(),
		confidential_tally: pallet_confidential_tally::GenesisConfig {
			option_count,
			tally_authority,
			_config: Default::default()
		},
	}
	.build_storage()
	.unwrap();

	let mut ext: sp_io::TestExternalities = t.into();
	ext.execute_with(|| System::set_block_number(1));
	ext
}
