//! Property test strategies for access-control types
//!
//! Strategies draw either from arbitrary ids or from the resources of
//! [`OrgFixture::standard`](crate::OrgFixture::standard), so properties can be
//! stated both over the whole id space and over a known tree.

use proptest::prelude::*;

// Re-export proptest for convenience
pub use proptest;

use crate::fixtures::{actors, OrgFixture};
use cursus_core::{ResourceKind, ResourceRef, UserId};

/// Strategy for generating resource kinds
pub fn arb_resource_kind() -> impl Strategy<Value = ResourceKind> {
    prop::sample::select(ResourceKind::ALL.to_vec())
}

/// Strategy for generating arbitrary resource references
///
/// Ids are drawn from the whole `u64` range and will almost never exist in
/// any fixture.
pub fn arb_resource_ref() -> impl Strategy<Value = ResourceRef> {
    (arb_resource_kind(), any::<u64>()).prop_map(|(kind, id)| ResourceRef::new(kind, id))
}

/// Strategy for picking a resource that exists in the standard fixture
pub fn arb_fixture_resource() -> impl Strategy<Value = ResourceRef> {
    prop::sample::select(OrgFixture::standard().resources())
}

/// Strategy for picking one of the standard fixture's actors
pub fn arb_fixture_actor() -> impl Strategy<Value = UserId> {
    prop::sample::select(actors::ALL.to_vec())
}
