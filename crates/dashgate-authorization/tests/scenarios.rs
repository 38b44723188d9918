//! Reference scenarios for the access evaluator

use chrono::Duration;
use dashgate_authorization::{AccessEvaluator, AccessReason, GrantKind, GrantLayer};
use dashgate_core::Role;
use dashgate_testkit::{init_test_tracing, reference_now, user, DashboardBuilder};

fn evaluator() -> AccessEvaluator {
    init_test_tracing();
    AccessEvaluator::at(reference_now())
}

#[test]
fn company_role_grant_allows_via_layer_two() {
    let u1 = user("u1", Role::User, "STTH", &[]);
    let dashboard = DashboardBuilder::new("d")
        .grant_company_role("STTH", Role::User)
        .build();

    let decision = evaluator().access_reason(&u1, &dashboard);
    assert!(evaluator().can_access(&u1, &dashboard));
    assert!(decision.has_access);
    assert_eq!(decision.reason, AccessReason::Layer2Company);
    let granted_by = decision.granted_by.unwrap();
    assert_eq!(granted_by.layer, GrantLayer::Company);
    assert_eq!(granted_by.kind, GrantKind::Role);
    assert_eq!(granted_by.name, "user");
}

#[test]
fn revocation_overrides_company_grant() {
    let u1 = user("u1", Role::User, "STTH", &[]);
    let dashboard = DashboardBuilder::new("d")
        .grant_company_role("STTH", Role::User)
        .revoke("u1")
        .build();

    let decision = evaluator().access_reason(&u1, &dashboard);
    assert!(!evaluator().can_access(&u1, &dashboard));
    assert!(!decision.has_access);
    assert_eq!(decision.reason, AccessReason::Revoked);
    assert!(decision.granted_by.is_none());
}

#[test]
fn admin_sees_archived_dashboard() {
    let u2 = user("u2", Role::Admin, "STTH", &[]);
    let dashboard = DashboardBuilder::new("d").archived().build();

    assert!(evaluator().can_access(&u2, &dashboard));
    assert_eq!(
        evaluator().access_reason(&u2, &dashboard).reason,
        AccessReason::Admin
    );
}

#[test]
fn direct_group_grant_names_the_group() {
    let u3 = user("u3", Role::User, "STTN", &["sales"]);
    let dashboard = DashboardBuilder::new("d").grant_group("sales").build();

    let decision = evaluator().access_reason(&u3, &dashboard);
    assert!(evaluator().can_access(&u3, &dashboard));
    assert_eq!(decision.reason, AccessReason::Layer1Direct);
    let granted_by = decision.granted_by.unwrap();
    assert_eq!(granted_by.layer, GrantLayer::Direct);
    assert_eq!(granted_by.kind, GrantKind::Group);
    assert_eq!(granted_by.name, "sales");
}

#[test]
fn past_expiry_denies_direct_user_grant() {
    let u4 = user("u4", Role::User, "STTH", &[]);
    let dashboard = DashboardBuilder::new("d")
        .grant_user("u4")
        .expire("u4", reference_now() - Duration::minutes(5))
        .build();

    assert!(!evaluator().can_access(&u4, &dashboard));
    assert_eq!(
        evaluator().access_reason(&u4, &dashboard).reason,
        AccessReason::Expired
    );
}

#[test]
fn no_grant_anywhere_is_no_match() {
    let u5 = user("u5", Role::User, "STTH", &["ops"]);
    let dashboard = DashboardBuilder::new("d")
        .grant_user("someone-else")
        .grant_role(Role::Moderator)
        .grant_group("sales")
        .grant_company_role("STTN", Role::User)
        .build();

    let decision = evaluator().access_reason(&u5, &dashboard);
    assert!(!decision.has_access);
    assert_eq!(decision.reason, AccessReason::NoMatch);
}

#[test]
fn decision_json_for_audit_view() {
    let u3 = user("u3", Role::User, "STTN", &["sales"]);
    let dashboard = DashboardBuilder::new("d").grant_group("sales").build();

    let json = serde_json::to_value(evaluator().access_reason(&u3, &dashboard)).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "hasAccess": true,
            "reason": "layer1_direct",
            "grantedBy": { "layer": 1, "type": "group", "name": "sales" }
        })
    );
}
