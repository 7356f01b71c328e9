mod refresh_telemetry_tests;
mod token_claims;
mod url;
