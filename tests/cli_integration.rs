//! Integration tests across the sntr crates.

use std::fs;
use tempfile::TempDir;

use sntr_api::Options;
use sntr_cli::resolve::{Resource, classify};
use sntr_cli::{CliError, get};
use sntr_config::Config;

#[test]
fn config_load_save_roundtrip() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.json");

    fs::write(
        &config_path,
        r#"
        {
            "auth_token": "abcd1234efgh5678ijkl",
            "sentry_url": "https://sentry.example.com",
            "user": "dev@example.com",
            "organizations": [{"slug": "acme", "projects": [{"slug": "backend"}]}],
            "active_organization": "acme"
        }
        "#,
    )
    .unwrap();

    let config = Config::load_from(&config_path).unwrap();
    assert_eq!(config.auth_token, "abcd1234efgh5678ijkl");
    assert_eq!(config.api_root(), "https://sentry.example.com/api/0");
    assert_eq!(config.user, "dev@example.com");
    assert_eq!(config.organizations[0].slug, "acme");
    assert_eq!(config.organizations[0].projects[0].slug, "backend");

    let saved_path = dir.path().join("saved.json");
    config.save_to(&saved_path).unwrap();
    let reloaded = Config::load_from(&saved_path).unwrap();
    assert_eq!(config, reloaded);
}

#[test]
fn credential_tracks_token_replacement() {
    let config = Config {
        auth_token: "abcd1234efgh5678ijkl".to_string(),
        ..Default::default()
    };
    let mut credential = config.credential();
    assert_eq!(credential.header(), "Bearer abcd1234efgh5678ijkl");
    assert_eq!(credential.obfuscated(), "abcd***ijkl");

    credential.set_token("wxyz1234efgh5678mnop");
    assert_eq!(credential.header(), "Bearer wxyz1234efgh5678mnop");
    assert_eq!(credential.obfuscated(), "wxyz***mnop");
}

#[test]
fn resolver_covers_the_documented_grammar() {
    assert_eq!(classify("orgs"), Some(Resource::Organizations));
    assert_eq!(classify("projects"), Some(Resource::Projects));
    assert_eq!(
        classify("organizations/acme/projects"),
        Some(Resource::OrganizationProjects {
            organization: "acme".to_string(),
        })
    );
    assert_eq!(
        classify("acme/0123456789abcdef0123456789abcdef"),
        Some(Resource::OrganizationEvent {
            organization: "acme".to_string(),
            event: "0123456789abcdef0123456789abcdef".to_string(),
        })
    );
    assert_eq!(
        classify("acme/backend/0123456789abcdef0123456789abcdef"),
        Some(Resource::ProjectEvent {
            organization: "acme".to_string(),
            project: "backend".to_string(),
            event: "0123456789abcdef0123456789abcdef".to_string(),
        })
    );
    assert_eq!(
        classify("acme/backend"),
        Some(Resource::ProjectIssues {
            organization: "acme".to_string(),
            project: "backend".to_string(),
        })
    );
}

#[tokio::test]
async fn unrecognized_resource_is_a_usage_error_before_any_request() {
    // No token is configured, so reaching the gateway would fail with
    // MissingToken; junk input must fail earlier with a usage error.
    let config = Config::default();

    let err = get::run(&config, Some("???"), None, Options::default())
        .await
        .unwrap_err();

    match err {
        CliError::Usage(message) => assert!(message.contains("???")),
        other => panic!("expected a usage error, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_resource_argument_is_a_usage_error() {
    let config = Config::default();

    let err = get::run(&config, None, None, Options::default())
        .await
        .unwrap_err();

    assert!(err.is_usage());
}

#[tokio::test]
async fn recognized_resource_without_token_fails_fast() {
    let config = Config::default();

    let err = get::run(&config, Some("orgs"), None, Options::default())
        .await
        .unwrap_err();

    assert!(matches!(err, CliError::MissingToken));
}
