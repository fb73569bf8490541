//! Unit tests for JWT claims.

use super::*;
use chrono::{Duration, Utc};
use uuid::Uuid;

#[test]
fn test_claims_new_sets_correct_fields() {
    let user_id = Uuid::new_v4();
    let expires_at = Utc::now() + Duration::hours(1);

    let claims = Claims::new(user_id, "alice", "user", expires_at);

    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.username, "alice");
    assert_eq!(claims.role, "user");
    assert!(claims.iat <= Utc::now().timestamp());
    assert_eq!(claims.exp, expires_at.timestamp());
}

#[test]
fn test_claims_user_id_returns_sub() {
    let user_id = Uuid::new_v4();
    let claims = Claims::new(user_id, "bob", "user", Utc::now() + Duration::hours(1));

    assert_eq!(claims.user_id().into_inner(), user_id);
}

#[test]
fn test_claims_iat_is_current_time() {
    let before = Utc::now().timestamp();
    let claims = Claims::new(
        Uuid::new_v4(),
        "carol",
        "admin",
        Utc::now() + Duration::hours(1),
    );
    let after = Utc::now().timestamp();

    assert!(claims.iat >= before);
    assert!(claims.iat <= after);
}

#[test]
fn test_principal_info_from_claims() {
    let claims = Claims::new(Uuid::new_v4(), "dave", "user", Utc::now() + Duration::hours(1));
    let info = PrincipalInfo::from(&claims);

    assert_eq!(info.id.into_inner(), claims.sub);
    assert_eq!(info.username, "dave");
    assert_eq!(info.role, "user");
    assert_eq!(info.expires_at, claims.exp);
}
