//! The tally engine's components, each an extension of [`Pallet`](crate::Pallet).

mod accumulator;
mod acl;
mod registry;
mod store;
mod validator;
