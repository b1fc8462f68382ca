use httpmock::prelude::*;
use std::process::Command;

fn hook_command() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_dehydrated-cloudflare-hook"));
    for var in [
        "CF_API_EMAIL",
        "CF_API_KEY",
        "CF_API_BASE_URL",
        "CF_PROPAGATION_DELAY",
        "CF_RECORD_TTL",
        "CF_REQUEST_TIMEOUT",
        "CF_HOOK_CONFIG",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_missing_email_is_fatal() {
    let output = hook_command()
        .env("CF_API_KEY", "key")
        .args(["deploy_challenge", "example.com", "f", "t"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("CF_API_EMAIL not set or empty."));
}

#[test]
fn test_unknown_hook_exits_cleanly() {
    let output = hook_command()
        .env("CF_API_EMAIL", "admin@example.com")
        .env("CF_API_KEY", "key")
        .args(["this_hookscript_is_broken__dehydrated_is_working_fine__please_ignore_unknown_hooks_in_your_script"])
        .output()
        .unwrap();

    assert!(output.status.success());
}

#[test]
fn test_zone_not_found_exit_code() {
    let server = MockServer::start();
    let zone_mock = server.mock(|when, then| {
        when.method(GET).path("/zones").query_param("name", "example.org");
        then.status(200).json_body(serde_json::json!({
            "success": true,
            "errors": [],
            "result": []
        }));
    });

    let output = hook_command()
        .env("CF_API_EMAIL", "admin@example.com")
        .env("CF_API_KEY", "key")
        .env("CF_API_BASE_URL", server.base_url())
        .env("CF_PROPAGATION_DELAY", "0")
        .args(["deploy_challenge", "www.example.org", "f", "t"])
        .output()
        .unwrap();

    zone_mock.assert();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to execute deploy_challenge"));
}

#[test]
fn test_logs_never_reach_stdout() {
    let failing = hook_command()
        .env("CF_API_KEY", "key")
        .args(["--verbose", "clean_challenge", "example.com", "f", "t"])
        .output()
        .unwrap();
    assert!(!failing.status.success());
    assert!(failing.stdout.is_empty());
    assert!(!failing.stderr.is_empty());

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/zones");
        then.status(200).json_body(serde_json::json!({
            "success": true,
            "errors": [],
            "result": [{"id": "zone-1", "name": "example.com"}]
        }));
    });
    let create_mock = server.mock(|when, then| {
        when.method(POST).path("/zones/zone-1/dns_records");
        then.status(200).json_body(serde_json::json!({
            "success": true,
            "errors": [],
            "result": {
                "id": "rec-1",
                "type": "TXT",
                "name": "_acme-challenge.www.example.com",
                "content": "t",
                "ttl": 120
            }
        }));
    });

    let succeeding = hook_command()
        .env("CF_API_EMAIL", "admin@example.com")
        .env("CF_API_KEY", "key")
        .env("CF_API_BASE_URL", server.base_url())
        .env("CF_PROPAGATION_DELAY", "0")
        .args(["--verbose", "deploy_challenge", "www.example.com", "f", "t"])
        .output()
        .unwrap();

    create_mock.assert();
    assert!(succeeding.status.success());
    assert!(succeeding.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&succeeding.stderr);
    assert!(stderr.contains("Deployed TXT record _acme-challenge.www.example.com"));
}

#[test]
fn test_json_logs_emit_structured_errors() {
    let output = hook_command()
        .env("CF_API_KEY", "key")
        .args(["--json-logs", "deploy_challenge", "example.com", "f", "t"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    let error_line = stderr
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap())
        .find(|entry| entry["level"] == "ERROR")
        .expect("an ERROR entry on stderr");

    let message = error_line["fields"]["message"].as_str().unwrap();
    assert!(message.contains("CF_API_EMAIL not set or empty."));
}
