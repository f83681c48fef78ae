//! Permission resolution against mock collaborators

use sigowners_authorization::{AccessDecision, DecisionReason, OwnershipVariant, PermissionResolver};
use sigowners_core::{Branch, ChangeRef, OwnershipConfig, RepoRole, SigownersError};
use sigowners_testkit::{
    owners_entry, sig_info_entry, CollaboratorCall, LogCapture, MockOwnershipHandler,
};

const ORG: &str = "openeuler";
const REPO: &str = "community";

fn change() -> ChangeRef {
    ChangeRef::new(42, "master")
}

fn resolver(handler: MockOwnershipHandler) -> PermissionResolver<MockOwnershipHandler> {
    PermissionResolver::new(handler, OwnershipConfig::default()).unwrap()
}

#[tokio::test]
async fn elevated_roles_bypass_directory_checks() {
    for role in [RepoRole::Admin, RepoRole::Write] {
        for requires_directory_check in [false, true] {
            let handler = MockOwnershipHandler::new()
                .with_role("Maintainer", role.clone())
                .with_change(42, &["src/main.rs", "a/b/c/d.txt"]);
            let resolver = resolver(handler.clone());

            let decision = resolver
                .resolve(ORG, REPO, "MAINTAINER", requires_directory_check, &change())
                .await
                .unwrap();

            assert_eq!(
                decision,
                AccessDecision::allow(DecisionReason::ElevatedRole { role: role.clone() })
            );
            assert_eq!(
                handler.calls(),
                vec![CollaboratorCall::GetRole {
                    org: ORG.to_string(),
                    repo: REPO.to_string(),
                    identity: "maintainer".to_string(),
                }]
            );
        }
    }
}

#[tokio::test]
async fn read_role_without_directory_check_is_denied() {
    let handler = MockOwnershipHandler::new()
        .with_change(42, &["sig/group-a/README.md"])
        .with_files(
            "master",
            "OWNERS",
            vec![owners_entry("sig/group-a/OWNERS", &["bob"], &[])],
        );
    let resolver = resolver(handler.clone());

    let allowed = resolver
        .has_permission(ORG, REPO, "bob", false, &change())
        .await
        .unwrap();

    assert!(!allowed);
    assert_eq!(handler.calls().len(), 1);
}

#[tokio::test]
async fn sig_maintainer_is_authorized_through_owners_file() {
    let handler = MockOwnershipHandler::new()
        .with_change(42, &["sig/group-a/OWNERS", "sig/group-a/README.md"])
        .with_files(
            "master",
            "OWNERS",
            vec![owners_entry("sig/group-a/OWNERS", &["Bob"], &[])],
        );
    let resolver = resolver(handler.clone());

    let decision = resolver
        .resolve(ORG, REPO, "bob", true, &change())
        .await
        .unwrap();

    assert_eq!(
        decision,
        AccessDecision::allow(DecisionReason::DirectoryOwner {
            variant: OwnershipVariant::Owners,
            directories: 1,
        })
    );
}

#[tokio::test]
async fn lookups_run_in_order_against_the_base_branch() {
    let handler = MockOwnershipHandler::new().with_change(42, &["sig/group-a/README.md"]);
    let resolver = resolver(handler.clone());

    resolver
        .resolve(ORG, REPO, "bob", true, &change())
        .await
        .unwrap();

    let branch = Branch::new("gitee", ORG, REPO, "master");
    assert_eq!(
        handler.calls(),
        vec![
            CollaboratorCall::GetRole {
                org: ORG.to_string(),
                repo: REPO.to_string(),
                identity: "bob".to_string(),
            },
            CollaboratorCall::GetChangedFiles {
                org: ORG.to_string(),
                repo: REPO.to_string(),
                number: 42,
            },
            CollaboratorCall::GetFiles {
                branch: branch.clone(),
                filename: "OWNERS".to_string(),
                recursive: false,
            },
            CollaboratorCall::GetFiles {
                branch,
                filename: "sig-info.yaml".to_string(),
                recursive: false,
            },
        ]
    );
}

#[tokio::test]
async fn sig_info_files_authorize_when_no_owners_file_exists() {
    let handler = MockOwnershipHandler::new()
        .with_change(42, &["sig/group-a/sig-info.yaml"])
        .with_files(
            "master",
            "sig-info.yaml",
            vec![sig_info_entry("sig/group-a/sig-info.yaml", &["carol"])],
        );

    let allowed = resolver(handler)
        .has_permission(ORG, REPO, "Carol", true, &change())
        .await
        .unwrap();
    assert!(allowed);
}

#[tokio::test]
async fn empty_change_skips_ownership_lookup() {
    let handler = MockOwnershipHandler::new();
    let resolver = resolver(handler.clone());

    let decision = resolver
        .resolve(ORG, REPO, "bob", true, &change())
        .await
        .unwrap();

    assert_eq!(decision, AccessDecision::deny(DecisionReason::NoChangedFiles));
    assert!(handler.requested_files().is_empty());
}

#[tokio::test]
async fn malformed_path_skips_ownership_lookup() {
    let handler = MockOwnershipHandler::new()
        .with_change(42, &["sig/group-a/README.md", "sig/group-a/deep/file.md"])
        .failing_file_lookup("OWNERS", "cache down");
    let resolver = resolver(handler.clone());

    let decision = resolver
        .resolve(ORG, REPO, "bob", true, &change())
        .await
        .unwrap();

    assert!(!decision.allowed);
    assert!(handler.requested_files().is_empty());
}

#[tokio::test]
async fn role_lookup_failure_is_propagated() {
    let handler = MockOwnershipHandler::new().failing_role_lookup("platform unavailable");

    let err = resolver(handler.clone())
        .resolve(ORG, REPO, "bob", true, &change())
        .await
        .unwrap_err();

    assert_eq!(err, SigownersError::role_lookup("platform unavailable"));
    assert!(err.is_collaborator_failure());
    assert_eq!(handler.calls().len(), 1);
}

#[tokio::test]
async fn change_listing_failure_is_propagated() {
    let handler = MockOwnershipHandler::new().failing_change_listing("rate limited");

    let err = resolver(handler.clone())
        .resolve(ORG, REPO, "bob", true, &change())
        .await
        .unwrap_err();

    assert_eq!(err, SigownersError::change_listing("rate limited"));
    assert!(handler.requested_files().is_empty());
}

#[tokio::test]
async fn content_retrieval_failure_is_propagated() {
    let handler = MockOwnershipHandler::new()
        .with_change(42, &["sig/group-a/README.md"])
        .failing_file_lookup("sig-info.yaml", "cache down");

    let err = resolver(handler.clone())
        .resolve(ORG, REPO, "bob", true, &change())
        .await
        .unwrap_err();

    assert_eq!(err, SigownersError::content_retrieval("cache down"));
    assert_eq!(handler.requested_files(), vec!["OWNERS", "sig-info.yaml"]);
}

#[tokio::test]
async fn configured_filenames_and_platform_are_used() {
    let config = OwnershipConfig {
        platform: "github".to_string(),
        owners_file: "MAINTAINERS".to_string(),
        ..OwnershipConfig::default()
    };
    let handler = MockOwnershipHandler::new()
        .with_change(42, &["sig/group-a/README.md"])
        .with_files(
            "master",
            "MAINTAINERS",
            vec![owners_entry("sig/group-a/MAINTAINERS", &["bob"], &[])],
        );
    let resolver = PermissionResolver::new(handler.clone(), config).unwrap();

    assert!(resolver
        .has_permission(ORG, REPO, "bob", true, &change())
        .await
        .unwrap());
    assert!(handler.calls().iter().any(|call| matches!(
        call,
        CollaboratorCall::GetFiles { branch, filename, .. }
            if branch.platform == "github" && filename == "MAINTAINERS"
    )));
}

#[tokio::test]
async fn invalid_pattern_is_rejected_at_construction() {
    let config = OwnershipConfig {
        sig_dir_pattern: "sig/(".to_string(),
        ..OwnershipConfig::default()
    };
    let err = PermissionResolver::new(MockOwnershipHandler::new(), config).unwrap_err();
    assert!(matches!(err, SigownersError::Invalid { .. }));
}

#[test]
fn missing_ownership_file_is_logged_with_its_branch() {
    let handler = MockOwnershipHandler::new()
        .with_change(42, &["sig/group-a/README.md"])
        .with_files(
            "master",
            "sig-info.yaml",
            vec![sig_info_entry("sig/group-a/sig-info.yaml", &["carol"])],
        );
    let resolver = resolver(handler);

    let logs = LogCapture::new();
    let decision = logs.capture(|| {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(resolver.resolve(ORG, REPO, "carol", true, &change()))
            .unwrap()
    });

    assert!(decision.is_allowed());
    let info = logs.lines_at("INFO");
    assert_eq!(info.len(), 1, "{}", logs.contents());
    assert!(info[0].contains("there is no OWNERS file stored in cache"));
    assert!(info[0].contains("org=openeuler"));
    assert!(info[0].contains("repo=community"));
    assert!(info[0].contains("branch=master"));
}
