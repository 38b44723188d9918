//! Proptest strategies for users and dashboards
//!
//! Identifiers are drawn from small pools so generated users and grants collide
//! often enough to exercise every layer.

use crate::fixtures::reference_now;
use chrono::Duration;
use dashgate_core::{
    AccessControl, AccessRestrictions, CompanyCode, CompanyGrant, Dashboard, DirectAccess,
    GroupName, Role, User, UserId,
};
use proptest::collection::{btree_map, btree_set, vec};
use proptest::prelude::*;
use proptest::sample::select;

const UIDS: &[&str] = &["u0", "u1", "u2", "u3", "u4"];
const GROUPS: &[&str] = &["sales", "ops", "finance", "hr"];
const COMPANIES: &[&str] = &["STTH", "STTN", "EXT"];

/// Any role
pub fn arb_role() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::User), Just(Role::Moderator), Just(Role::Admin)]
}

/// Any non-admin role
pub fn arb_non_admin_role() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::User), Just(Role::Moderator)]
}

/// User id from the shared pool
pub fn arb_uid() -> impl Strategy<Value = UserId> {
    select(UIDS).prop_map(UserId::from)
}

/// Group name from the shared pool
pub fn arb_group() -> impl Strategy<Value = GroupName> {
    select(GROUPS).prop_map(GroupName::from)
}

/// Company code from the shared pool
pub fn arb_company() -> impl Strategy<Value = CompanyCode> {
    select(COMPANIES).prop_map(CompanyCode::from)
}

/// User with the given role strategy
pub fn arb_user_with_role(role: impl Strategy<Value = Role>) -> impl Strategy<Value = User> {
    (arb_uid(), role, arb_company(), vec(arb_group(), 0..3)).prop_map(
        |(uid, role, company, groups)| User::new(uid, role, company).with_groups(groups),
    )
}

/// Any user
pub fn arb_user() -> impl Strategy<Value = User> {
    arb_user_with_role(arb_role())
}

/// Any non-admin user
pub fn arb_non_admin_user() -> impl Strategy<Value = User> {
    arb_user_with_role(arb_non_admin_role())
}

/// Layer 1 grants
pub fn arb_direct_access() -> impl Strategy<Value = DirectAccess> {
    (
        btree_set(arb_uid(), 0..3),
        btree_set(arb_role(), 0..2),
        btree_set(arb_group(), 0..3),
    )
        .prop_map(|(users, roles, groups)| DirectAccess {
            users,
            roles,
            groups,
        })
}

/// One layer 2 entry
pub fn arb_company_grant() -> impl Strategy<Value = CompanyGrant> {
    (btree_set(arb_role(), 0..2), btree_set(arb_group(), 0..3))
        .prop_map(|(roles, groups)| CompanyGrant { roles, groups })
}

/// Both grant layers
pub fn arb_access_control() -> impl Strategy<Value = AccessControl> {
    (
        arb_direct_access(),
        btree_map(arb_company(), arb_company_grant(), 0..3),
    )
        .prop_map(|(direct, company)| AccessControl { direct, company })
}

/// Revocations and expiries within a day either side of [`reference_now`]
pub fn arb_restrictions() -> impl Strategy<Value = AccessRestrictions> {
    (
        btree_set(arb_uid(), 0..2),
        btree_map(arb_uid(), -86_400i64..86_400, 0..3),
    )
        .prop_map(|(revoke, offsets)| AccessRestrictions {
            revoke,
            expiry: offsets
                .into_iter()
                .map(|(uid, secs)| (uid, reference_now() + Duration::seconds(secs)))
                .collect(),
        })
}

/// Any dashboard
pub fn arb_dashboard() -> impl Strategy<Value = Dashboard> {
    (
        0u32..1000,
        arb_uid(),
        any::<bool>(),
        arb_access_control(),
        arb_restrictions(),
    )
        .prop_map(|(n, owner, is_archived, access, restrictions)| {
            let mut dashboard = Dashboard::new(format!("d{n}"), "root", owner);
            dashboard.is_archived = is_archived;
            dashboard.access = access;
            dashboard.restrictions = restrictions;
            dashboard
        })
}

/// List of dashboards
pub fn arb_dashboards() -> impl Strategy<Value = Vec<Dashboard>> {
    vec(arb_dashboard(), 0..8)
}

/// User directory
pub fn arb_users() -> impl Strategy<Value = Vec<User>> {
    vec(arb_user(), 0..8)
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn generated_users_draw_from_pools(user in arb_user()) {
            prop_assert!(UIDS.contains(&user.uid.as_str()));
            prop_assert!(COMPANIES.contains(&user.company.as_str()));
            prop_assert!(user.groups.len() <= 2);
        }

        #[test]
        fn generated_expiries_stay_near_reference(restrictions in arb_restrictions()) {
            for expiry in restrictions.expiry.values() {
                prop_assert!((*expiry - reference_now()).num_seconds().abs() < 86_400);
            }
        }
    }
}
