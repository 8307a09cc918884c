use super::*;

// =============================================================================
// Bypass paths
// =============================================================================

#[test]
fn api_paths_always_pass() {
    assert_eq!(guard_decision("/api/search", false), GuardDecision::Allow);
    assert_eq!(guard_decision("/api/auth/login", false), GuardDecision::Allow);
    assert_eq!(guard_decision("/api/auth/me", true), GuardDecision::Allow);
}

#[test]
fn asset_paths_always_pass() {
    assert_eq!(guard_decision("/assets/search.js", false), GuardDecision::Allow);
    assert_eq!(guard_decision("/favicon.ico", false), GuardDecision::Allow);
    assert_eq!(guard_decision("/logo.svg", false), GuardDecision::Allow);
    assert_eq!(guard_decision("/img/panda.png", false), GuardDecision::Allow);
}

#[test]
fn healthz_always_passes() {
    assert_eq!(guard_decision("/healthz", false), GuardDecision::Allow);
}

// =============================================================================
// Unauthenticated requests
// =============================================================================

#[test]
fn public_pages_pass_unauthenticated() {
    assert_eq!(guard_decision("/", false), GuardDecision::Allow);
    assert_eq!(guard_decision("/login", false), GuardDecision::Allow);
    assert_eq!(guard_decision("/register", false), GuardDecision::Allow);
}

#[test]
fn protected_pages_redirect_to_login() {
    assert_eq!(guard_decision("/dashboard", false), GuardDecision::RedirectToLogin);
    assert_eq!(guard_decision("/dashboard/create-service", false), GuardDecision::RedirectToLogin);
    assert_eq!(guard_decision("/settings", false), GuardDecision::RedirectToLogin);
}

// =============================================================================
// Authenticated requests
// =============================================================================

#[test]
fn authenticated_login_and_register_redirect_to_landing() {
    assert_eq!(guard_decision("/login", true), GuardDecision::RedirectToLanding);
    assert_eq!(guard_decision("/register", true), GuardDecision::RedirectToLanding);
}

#[test]
fn authenticated_pages_pass() {
    assert_eq!(guard_decision("/", true), GuardDecision::Allow);
    assert_eq!(guard_decision("/dashboard", true), GuardDecision::Allow);
}

// =============================================================================
// Path normalization
// =============================================================================

#[test]
fn trailing_slash_is_ignored_for_page_paths() {
    assert_eq!(guard_decision("/login/", true), GuardDecision::RedirectToLanding);
    assert_eq!(guard_decision("/dashboard/", false), GuardDecision::RedirectToLogin);
}
