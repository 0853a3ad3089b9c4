mod common;

use common::{admin, approved_store, place_order, register, setup_state, store_request};
use pharmacy_orders_api::{
    dto::stores::UpdateStoreProfileRequest,
    error::{AppError, EntityKind, ValidationReason},
    lifecycle::{EnginePolicy, StoreState},
    middleware::auth::Actor,
    routes::params::{PageWindow, SortOrder},
    services::{
        approval_service, order_service,
        order_service::OrderFilter,
        stats_service,
        store_service::{self, StoreFilter},
    },
};
use uuid::Uuid;

#[tokio::test]
async fn registration_starts_pending_and_is_logged() -> anyhow::Result<()> {
    let state = setup_state(EnginePolicy::default()).await?;
    let store = register(&state, "City Care Pharmacy", "LIC123").await?;

    assert_eq!(store.state, StoreState::Pending);
    assert!(store.approved_at.is_none());

    let activity = stats_service::recent_activity(&state, &admin(), None).await?;
    assert_eq!(activity.len(), 1);
    assert_eq!(activity[0].store_id, store.id);
    assert_eq!(activity[0].from_state, None);
    assert_eq!(activity[0].to_state, StoreState::Pending);
    assert_eq!(activity[0].store_name.as_deref(), Some("City Care Pharmacy"));
    Ok(())
}

#[tokio::test]
async fn registration_validates_fields() -> anyhow::Result<()> {
    let state = setup_state(EnginePolicy::default()).await?;

    let mut bad_phone = store_request("A", "LIC1");
    bad_phone.phone = "12345".into();
    let mut bad_pincode = store_request("B", "LIC2");
    bad_pincode.pincode = "68202".into();
    let mut bad_email = store_request("C", "LIC3");
    bad_email.email = "owner.example.com".into();
    let no_license = store_request("D", "   ");

    for (payload, expected) in [
        (bad_phone, "phone"),
        (bad_pincode, "pincode"),
        (bad_email, "email"),
        (no_license, "license_number"),
    ] {
        let err = store_service::register_store(&state, payload).await.unwrap_err();
        assert!(
            matches!(err, AppError::Validation { field, .. } if field == expected),
            "expected validation error on {expected}, got {err:?}"
        );
    }

    let (stores, total) =
        store_service::list_stores(&state, &StoreFilter::default(), PageWindow::default(), SortOrder::Desc)
            .await?;
    assert!(stores.is_empty());
    assert_eq!(total, 0);
    Ok(())
}

#[tokio::test]
async fn double_approval_is_an_invalid_transition() -> anyhow::Result<()> {
    let state = setup_state(EnginePolicy::default()).await?;
    let store = register(&state, "City Care Pharmacy", "LIC123").await?;

    let approved = approval_service::approve_store(&state, &admin(), store.id).await?;
    assert_eq!(approved.state, StoreState::Approved);
    assert!(approved.approved_at.is_some());

    let err = approval_service::approve_store(&state, &admin(), store.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::InvalidTransition {
            from: "approved",
            to: "approved"
        }
    ));
    Ok(())
}

#[tokio::test]
async fn license_is_reusable_only_after_removal() -> anyhow::Result<()> {
    let state = setup_state(EnginePolicy::default()).await?;
    let first = approved_store(&state, "City Care Pharmacy", "LIC123").await?;

    let err = register(&state, "Copycat Medicals", "LIC123").await.unwrap_err();
    let err = err.downcast::<AppError>()?;
    assert!(matches!(
        err,
        AppError::Validation {
            field: "license_number",
            reason: ValidationReason::AlreadyInUse
        }
    ));

    let removed = approval_service::remove_store(&state, &admin(), first.id).await?;
    assert_eq!(removed.state, StoreState::Removed);
    assert!(removed.removed_at.is_some());

    let second = register(&state, "New City Care", "LIC123").await?;
    assert_eq!(second.state, StoreState::Pending);
    assert_ne!(second.id, first.id);
    Ok(())
}

#[tokio::test]
async fn rejected_store_cannot_be_approved() -> anyhow::Result<()> {
    let state = setup_state(EnginePolicy::default()).await?;
    let store = register(&state, "City Care Pharmacy", "LIC123").await?;

    let rejected =
        approval_service::reject_store(&state, &admin(), store.id, "missing license").await?;
    assert_eq!(rejected.state, StoreState::Rejected);
    assert_eq!(rejected.rejection_reason.as_deref(), Some("missing license"));

    let err = approval_service::approve_store(&state, &admin(), store.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::InvalidTransition {
            from: "rejected",
            to: "approved"
        }
    ));

    let current = store_service::get_store_for_admin(&state, &admin(), store.id).await?;
    assert_eq!(current.state, StoreState::Rejected);
    Ok(())
}

#[tokio::test]
async fn reject_requires_a_reason() -> anyhow::Result<()> {
    let state = setup_state(EnginePolicy::default()).await?;
    let store = register(&state, "City Care Pharmacy", "LIC123").await?;

    let err = approval_service::reject_store(&state, &admin(), store.id, "  ")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Validation {
            field: "reason",
            reason: ValidationReason::Required
        }
    ));

    let current = store_service::get_store(&state, store.id).await?;
    assert_eq!(current.state, StoreState::Pending);
    Ok(())
}

#[tokio::test]
async fn pending_store_cannot_be_removed_and_removed_is_final() -> anyhow::Result<()> {
    let state = setup_state(EnginePolicy::default()).await?;
    let pending = register(&state, "Pending Pharmacy", "LIC-P").await?;

    let err = approval_service::remove_store(&state, &admin(), pending.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition { from: "pending", .. }));

    let rejected = register(&state, "Rejected Pharmacy", "LIC-R").await?;
    approval_service::reject_store(&state, &admin(), rejected.id, "expired license").await?;
    approval_service::remove_store(&state, &admin(), rejected.id).await?;

    for result in [
        approval_service::approve_store(&state, &admin(), rejected.id).await,
        approval_service::remove_store(&state, &admin(), rejected.id).await,
        approval_service::reject_store(&state, &admin(), rejected.id, "again").await,
    ] {
        assert!(matches!(
            result,
            Err(AppError::InvalidTransition { from: "removed", .. })
        ));
    }
    Ok(())
}

#[tokio::test]
async fn unknown_store_is_not_found() -> anyhow::Result<()> {
    let state = setup_state(EnginePolicy::default()).await?;
    let err = approval_service::approve_store(&state, &admin(), Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::NotFound {
            entity: EntityKind::Store
        }
    ));
    Ok(())
}

#[tokio::test]
async fn only_admins_drive_the_approval_workflow() -> anyhow::Result<()> {
    let state = setup_state(EnginePolicy::default()).await?;
    let store = register(&state, "City Care Pharmacy", "LIC123").await?;
    let owner = Actor::owner(store.id);

    assert!(matches!(
        approval_service::approve_store(&state, &owner, store.id).await,
        Err(AppError::Forbidden)
    ));
    assert!(matches!(
        approval_service::reject_store(&state, &owner, store.id, "nope").await,
        Err(AppError::Forbidden)
    ));
    assert!(matches!(
        stats_service::dashboard_stats(&state, &owner).await,
        Err(AppError::Forbidden)
    ));
    assert!(matches!(
        stats_service::recent_activity(&state, &owner, None).await,
        Err(AppError::Forbidden)
    ));

    let current = store_service::get_store(&state, store.id).await?;
    assert_eq!(current.state, StoreState::Pending);
    Ok(())
}

#[tokio::test]
async fn removal_keeps_the_store_orders() -> anyhow::Result<()> {
    let state = setup_state(EnginePolicy::default()).await?;
    let store = approved_store(&state, "City Care Pharmacy", "LIC123").await?;
    let placed = place_order(&state, store.id).await?;

    approval_service::remove_store(&state, &admin(), store.id).await?;

    let (orders, total) = order_service::list_orders_for_store(
        &state,
        store.id,
        &OrderFilter::default(),
        PageWindow::default(),
        SortOrder::Desc,
    )
    .await?;
    assert_eq!(total, 1);
    assert_eq!(orders[0].id, placed.order.id);

    let fetched = order_service::get_order(&state, placed.order.id).await?;
    assert_eq!(fetched.items.len(), 2);

    assert!(matches!(
        store_service::get_store(&state, store.id).await,
        Err(AppError::NotFound { .. })
    ));
    let audit = store_service::get_store_for_admin(&state, &admin(), store.id).await?;
    assert_eq!(audit.state, StoreState::Removed);
    Ok(())
}

#[tokio::test]
async fn activity_is_newest_first_with_reasons() -> anyhow::Result<()> {
    let state = setup_state(EnginePolicy::default()).await?;
    let reviewer = admin();
    let good = register(&state, "Good Pharmacy", "LIC-G").await?;
    let bad = register(&state, "Bad Pharmacy", "LIC-B").await?;

    approval_service::approve_store(&state, &reviewer, good.id).await?;
    approval_service::reject_store(&state, &reviewer, bad.id, "missing license").await?;

    let activity = stats_service::recent_activity(&state, &reviewer, Some(3)).await?;
    assert_eq!(activity.len(), 3);

    assert_eq!(activity[0].store_id, bad.id);
    assert_eq!(activity[0].from_state, Some(StoreState::Pending));
    assert_eq!(activity[0].to_state, StoreState::Rejected);
    assert_eq!(activity[0].reason.as_deref(), Some("missing license"));
    assert_eq!(activity[0].actor_id, Some(reviewer.id));
    assert_eq!(activity[0].store_name.as_deref(), Some("Bad Pharmacy"));

    assert_eq!(activity[1].store_id, good.id);
    assert_eq!(activity[1].to_state, StoreState::Approved);
    assert_eq!(activity[1].reason, None);

    assert_eq!(activity[2].store_id, bad.id);
    assert_eq!(activity[2].to_state, StoreState::Pending);
    Ok(())
}

#[tokio::test]
async fn listings_hide_removed_stores_and_support_search() -> anyhow::Result<()> {
    let state = setup_state(EnginePolicy::default()).await?;
    let reviewer = admin();
    let city = approved_store(&state, "City Care Pharmacy", "LIC-1").await?;
    let green = approved_store(&state, "Green Cross Medicals", "LIC-2").await?;
    let pending = register(&state, "Wellness Drug House", "LIC-3").await?;
    approval_service::remove_store(&state, &reviewer, green.id).await?;

    let window = PageWindow::default();
    let (all, total) =
        store_service::list_stores_for_admin(&state, &reviewer, &StoreFilter::default(), window, SortOrder::Desc)
            .await?;
    assert_eq!(total, 2);
    let ids: Vec<_> = all.iter().map(|s| s.id).collect();
    assert!(ids.contains(&city.id) && ids.contains(&pending.id));

    let removed_filter = StoreFilter {
        state: Some(StoreState::Removed),
        search: None,
    };
    let (_, removed_total) =
        store_service::list_stores_for_admin(&state, &reviewer, &removed_filter, window, SortOrder::Desc)
            .await?;
    assert_eq!(removed_total, 0);

    let search = StoreFilter {
        state: None,
        search: Some("CITY care".into()),
    };
    let (found, _) = store_service::list_stores(&state, &search, window, SortOrder::Asc).await?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, city.id);

    let (public, public_total) = store_service::list_public_stores(&state, None, window).await?;
    assert_eq!(public_total, 1);
    assert_eq!(public[0].id, city.id);
    assert!(matches!(
        store_service::get_public_store(&state, pending.id).await,
        Err(AppError::NotFound { .. })
    ));

    let stats = stats_service::dashboard_stats(&state, &reviewer).await?;
    assert_eq!(stats.total_approved_stores, 1);
    assert_eq!(stats.pending_store_count, 1);
    Ok(())
}

#[tokio::test]
async fn owners_edit_profile_but_not_state_or_license() -> anyhow::Result<()> {
    let state = setup_state(EnginePolicy::default()).await?;
    let store = register(&state, "City Care Pharmacy", "LIC123").await?;
    let owner = Actor::owner(store.id);

    let updated = store_service::update_store_profile(
        &state,
        &owner,
        UpdateStoreProfileRequest {
            phone: Some("9000000001".into()),
            city: Some("Thrissur".into()),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(updated.phone, "9000000001");
    assert_eq!(updated.city, "Thrissur");
    assert_eq!(updated.license_number, "LIC123");
    assert_eq!(updated.state, StoreState::Pending);

    let err = store_service::update_store_profile(
        &state,
        &owner,
        UpdateStoreProfileRequest {
            pincode: Some("12".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation { field: "pincode", .. }));

    assert!(matches!(
        store_service::update_store_profile(&state, &admin(), UpdateStoreProfileRequest::default()).await,
        Err(AppError::Forbidden)
    ));

    let profile = store_service::get_own_store(&state, &owner).await?;
    assert_eq!(profile.city, "Thrissur");
    Ok(())
}

#[tokio::test]
async fn search_folds_non_ascii_names_and_follows_profile_edits() -> anyhow::Result<()> {
    let state = setup_state(EnginePolicy::default()).await?;
    let store = register(&state, "ÜNITY Pharma", "LIC-U").await?;
    register(&state, "City Care Pharmacy", "LIC-C").await?;
    let window = PageWindow::default();

    let by = |text: &str| StoreFilter {
        state: None,
        search: Some(text.into()),
    };

    let (found, _) = store_service::list_stores(&state, &by("ünity"), window, SortOrder::Desc).await?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, store.id);

    store_service::update_store_profile(
        &state,
        &Actor::owner(store.id),
        UpdateStoreProfileRequest {
            store_name: Some("Ōkubo Drugs".into()),
            ..Default::default()
        },
    )
    .await?;

    let (found, _) = store_service::list_stores(&state, &by("ōKUBO"), window, SortOrder::Desc).await?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, store.id);
    let (stale, _) = store_service::list_stores(&state, &by("ünity"), window, SortOrder::Desc).await?;
    assert!(stale.is_empty());

    // The license stays searchable after a rename.
    let (found, _) = store_service::list_stores(&state, &by("lic-u"), window, SortOrder::Desc).await?;
    assert_eq!(found.len(), 1);
    Ok(())
}
