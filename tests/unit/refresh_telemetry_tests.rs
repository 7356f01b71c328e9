use roomlink_client::telemetry::refresh::RefreshTelemetry;

#[test]
fn telemetry_preserves_context_and_id() {
    let telemetry = RefreshTelemetry::new("/auth/refreshToken");
    assert_eq!(telemetry.context(), "/auth/refreshToken");
    let first = telemetry.attempt_id();
    assert_eq!(first, telemetry.attempt_id());
}

#[test]
fn each_refresh_attempt_gets_its_own_id() {
    let a = RefreshTelemetry::new("ctx");
    let b = RefreshTelemetry::new("ctx");
    assert_ne!(a.attempt_id(), b.attempt_id());
}
