
use std::time::Duration;

use fixtures::AdminHarness;
use tower::{Service, ServiceBuilder, timeout::TimeoutLayer};

use crate::{
    logging,
    registry::{
        api::types::{AdminRequest, AdminResponse, ListFilters},
        error::RegistryError,
        infrastructure::storage::EntityPatch,
    },
};

#[tokio::test]
async fn integration_registry_lifecycle() {
    logging::init();
    let mut icons = AdminHarness::icons();

    let entity = icons.create("Home").await.unwrap();
    assert_eq!(entity.slug, "home");
    assert!(entity.active);

    let id = entity.id.to_string();
    assert_eq!(icons.get(&id).await.unwrap(), entity);

    // Rename never re-slugifies.
    let renamed = icons
        .update(&id, EntityPatch { pretty_name: Some("New Home".to_string()), ..Default::default() })
        .await
        .unwrap();
    assert_eq!(renamed.pretty_name, "New Home");
    assert_eq!(renamed.slug, "home");

    // Deactivation is a pure field mutation, idempotent on repeat.
    let inactive = icons.toggle(&id, false).await.unwrap();
    assert!(!inactive.active);
    let inactive_again = icons.toggle(&id, false).await.unwrap();
    assert!(!inactive_again.active);
    assert_eq!(inactive_again.slug, "home");

    // Removal is terminal.
    icons.remove(&id).await.unwrap();
    assert_eq!(
        icons.get(&id).await.unwrap_err(),
        RegistryError::NotFound { label: "Icon", id: id.clone() }
    );
    assert_eq!(
        icons.remove(&id).await.unwrap_err(),
        RegistryError::NotFound { label: "Icon", id }
    );
}

#[tokio::test]
async fn integration_registry_duplicate_create() {
    logging::init();
    let mut icons = AdminHarness::icons();

    let original = icons.create("Home").await.unwrap();
    let error = icons.create("Home").await.unwrap_err();
    assert_eq!(error.to_string(), "Icon with slug 'home' already exists");

    // The surviving entity is the first one, unchanged.
    let found = icons.get(&original.id.to_string()).await.unwrap();
    assert_eq!(found, original);
    assert_eq!(icons.list(ListFilters::default()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn integration_registry_concurrent_create_race() {
    logging::init();
    let harness = AdminHarness::icons();

    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..8 {
        let mut admin = harness.service();
        tasks.spawn(async move {
            admin
                .call(AdminRequest::Create {
                    resource: "icons".to_string(),
                    role_kind: String::new(),
                    actor: AdminHarness::actor(),
                    pretty_name: "Home".to_string(),
                })
                .await
        });
    }

    let mut successes = 0;
    let mut conflicts = 0;
    while let Some(result) = tasks.join_next().await {
        match result.unwrap() {
            Ok(AdminResponse::Created { .. }) => successes += 1,
            Err(RegistryError::Conflict { .. }) => conflicts += 1,
            other => panic!("Unexpected outcome: {other:?}"),
        }
    }
    assert_eq!(successes, 1);
    assert_eq!(conflicts, 7);

    let mut icons = AdminHarness::new(harness.service(), "icons", "");
    assert_eq!(icons.list(ListFilters::default()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn integration_registry_scope_partitioning() {
    logging::init();
    let mut icons = AdminHarness::icons();
    let mut admins = icons.scoped("roles", "admin");
    let mut members = icons.scoped("roles", "member");

    // The same display name lands once per scope without conflict.
    icons.create("Moderator").await.unwrap();
    let admin_role = admins.create("Moderator").await.unwrap();
    members.create("Moderator").await.unwrap();

    assert_eq!(admins.create("Moderator").await.unwrap_err().to_string(),
        "Role with slug 'moderator' already exists");

    // Ids resolve only within their own scope.
    let id = admin_role.id.to_string();
    assert_eq!(
        members.get(&id).await.unwrap_err(),
        RegistryError::NotFound { label: "Role", id: id.clone() }
    );
    assert_eq!(
        icons.get(&id).await.unwrap_err(),
        RegistryError::NotFound { label: "Icon", id }
    );

    assert_eq!(icons.list(ListFilters::default()).await.unwrap().len(), 1);
    assert_eq!(admins.list(ListFilters::default()).await.unwrap().len(), 1);
    assert_eq!(members.list(ListFilters::default()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn integration_registry_listing_order_and_filters() {
    logging::init();
    let mut icons = AdminHarness::icons();

    for name in ["Search", "Home", "Archive", "Settings"] {
        icons.create(name).await.unwrap();
    }
    let settings_id =
        icons.list(ListFilters::default()).await.unwrap().last().unwrap().id.to_string();
    icons.toggle(&settings_id, false).await.unwrap();

    let all = icons.list(ListFilters::default()).await.unwrap();
    let names: Vec<_> = all.iter().map(|e| e.pretty_name.as_str()).collect();
    assert_eq!(names, ["Archive", "Home", "Search", "Settings"]);

    let active_only =
        icons.list(ListFilters { active: Some(true), ..Default::default() }).await.unwrap();
    let names: Vec<_> = active_only.iter().map(|e| e.pretty_name.as_str()).collect();
    assert_eq!(names, ["Archive", "Home", "Search"]);

    let fragment = icons
        .list(ListFilters { name_contains: Some("se".to_string()), ..Default::default() })
        .await
        .unwrap();
    let names: Vec<_> = fragment.iter().map(|e| e.pretty_name.as_str()).collect();
    assert_eq!(names, ["Search", "Settings"]);
}

#[tokio::test]
async fn integration_registry_empty_scope_lists_empty() {
    logging::init();
    let mut managers = AdminHarness::roles("manager");
    assert!(managers.list(ListFilters::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn integration_registry_update_has_no_upsert() {
    logging::init();
    let mut icons = AdminHarness::icons();

    let ghost = "00000000000000ff";
    assert_eq!(
        icons.update(ghost, EntityPatch::active(false)).await.unwrap_err(),
        RegistryError::NotFound { label: "Icon", id: ghost.to_string() }
    );
    assert!(icons.list(ListFilters::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn integration_registry_behind_timeout_layer() {
    logging::init();
    let harness = AdminHarness::icons();
    let mut admin = ServiceBuilder::new()
        .layer(TimeoutLayer::new(Duration::from_millis(100)))
        .service(harness.service());

    let response = admin
        .call(AdminRequest::Create {
            resource: "icons".to_string(),
            role_kind: String::new(),
            actor: AdminHarness::actor(),
            pretty_name: "Home".to_string(),
        })
        .await
        .unwrap();
    let AdminResponse::Created { entity, .. } = response else {
        panic!("Expected AdminResponse::Created");
    };
    assert_eq!(entity.slug, "home");
}
