use httpmock::prelude::*;
use probe_lib::probe::{self, RestOutcome, UserOutcome, COMPLETED, REST_SUCCESS};
use probe_lib::{Database, SupabaseConfig};

#[tokio::test]
async fn probe_against_mock_project() {
    let server = MockServer::start();
    let key = "0123456789abcdefghijabcdefghij9876543210";
    server.mock(|when, then| {
        when.method(GET)
            .path("/rest/v1/")
            .header("apikey", key)
            .header("Authorization", format!("Bearer {}", key));
        then.status(200).body("{}");
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/auth/v1/user")
            .header("Authorization", "Bearer session-jwt");
        then.status(403)
            .json_body(serde_json::json!({ "msg": "User from sub claim in JWT does not exist" }));
    });

    let config = SupabaseConfig::new(server.base_url(), key.into())
        .unwrap()
        .with_access_token(Some("session-jwt".into()));
    let database = Database::new(&config);

    let mut out = Vec::new();
    let report = probe::run(&config, &database, &mut out).await.unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(matches!(report.rest, RestOutcome::Healthy(_)));
    assert!(matches!(report.user, UserOutcome::Failed(_)));
    assert!(text.contains("Supabase Key: 0123456789...9876543210"));
    assert!(text.contains("Response status: 200"));
    assert!(text.contains("Response body: {}"));
    assert!(text.contains(REST_SUCCESS));
    assert!(text.contains("Failed to fetch user: API error 403: User from sub claim in JWT does not exist"));
    assert!(text.contains(COMPLETED));
}

#[tokio::test]
async fn unreachable_project_fails_before_user_fetch() {
    let key = "k".repeat(40);
    let lookup = |name: &str| match name {
        "SUPABASE_URL" => Some("http://127.0.0.1:1".to_string()),
        "SUPABASE_ANON_KEY" => Some(key.clone()),
        _ => None,
    };

    let mut out = Vec::new();
    let err = probe::check(lookup, &mut out).await.unwrap_err();
    let text = String::from_utf8(out).unwrap();

    assert!(matches!(err, probe_lib::ProbeError::Network(_)));
    assert!(text.contains("Supabase Key: kkkkkkkkkk...kkkkkkkkkk"));
    assert!(text.contains("Connection failed: Network error"));
    assert!(!text.contains("Attempting to fetch the current user"));
}
