use chrono::{NaiveDate, Utc};
use sea_orm::*;

use client::api::engagement::{self, SaveOptions};
use client::api::profile;
use client::entity::{follow, recipe_like, recipe_save};
use client::error::Error;

use crate::common::TestApp;

#[tokio::test]
async fn like_toggle_round_trip_leaves_no_edge_rows() {
    let app = TestApp::spawn().await;
    let author = app.create_user("chef").await;
    let fan = app.create_user("fan").await;
    let italian = app.category_id("italian").await;
    let recipe = app.create_recipe(author, italian, "Pizza").await;

    assert!(engagement::toggle_like(&app.state, recipe.id, fan).await.unwrap());
    let rows = recipe_like::Entity::find().count(&app.state.db).await.unwrap();
    assert_eq!(rows, 1);

    assert!(!engagement::toggle_like(&app.state, recipe.id, fan).await.unwrap());
    let rows = recipe_like::Entity::find().count(&app.state.db).await.unwrap();
    assert_eq!(rows, 0);
}

#[tokio::test]
async fn likes_from_different_users_are_independent_edges() {
    let app = TestApp::spawn().await;
    let author = app.create_user("chef").await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let italian = app.category_id("italian").await;
    let recipe = app.create_recipe(author, italian, "Pizza").await;

    assert!(engagement::toggle_like(&app.state, recipe.id, alice).await.unwrap());
    assert!(engagement::toggle_like(&app.state, recipe.id, bob).await.unwrap());

    // Alice untoggling leaves Bob's edge alone.
    assert!(!engagement::toggle_like(&app.state, recipe.id, alice).await.unwrap());
    let remaining = recipe_like::Entity::find().all(&app.state.db).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].user_id, bob);
}

#[tokio::test]
async fn save_toggle_carries_schedule_options() {
    let app = TestApp::spawn().await;
    let author = app.create_user("chef").await;
    let fan = app.create_user("planner").await;
    let italian = app.category_id("italian").await;
    let recipe = app.create_recipe(author, italian, "Pizza").await;

    let options = SaveOptions {
        scheduled_date: NaiveDate::from_ymd_opt(2024, 6, 14),
        custom_name: Some("Friday pizza night".into()),
    };
    assert!(
        engagement::toggle_save(&app.state, recipe.id, fan, options)
            .await
            .unwrap()
    );

    let edge = recipe_save::Entity::find_by_id((recipe.id, fan))
        .one(&app.state.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(edge.scheduled_date, NaiveDate::from_ymd_opt(2024, 6, 14));
    assert_eq!(edge.custom_name.as_deref(), Some("Friday pizza night"));

    assert!(
        !engagement::toggle_save(&app.state, recipe.id, fan, Default::default())
            .await
            .unwrap()
    );
    let gone = recipe_save::Entity::find_by_id((recipe.id, fan))
        .one(&app.state.db)
        .await
        .unwrap();
    assert!(gone.is_none());
}

#[tokio::test]
async fn following_then_unfollowing_restores_the_graph() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;

    assert!(engagement::toggle_follow(&app.state, bob, alice).await.unwrap());

    let view = profile::fetch_profile(&app.state, bob, None).await.unwrap();
    assert_eq!(view.followers, 1);
    let followers = profile::get_followers(&app.state, bob).await.unwrap();
    assert!(followers.iter().any(|f| f.id == alice));

    assert!(!engagement::toggle_follow(&app.state, bob, alice).await.unwrap());

    let view = profile::fetch_profile(&app.state, bob, None).await.unwrap();
    assert_eq!(view.followers, 0);
    let followers = profile::get_followers(&app.state, bob).await.unwrap();
    assert!(followers.is_empty());
}

#[tokio::test]
async fn self_follow_is_rejected_before_the_store() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice").await;

    let err = engagement::toggle_follow(&app.state, alice, alice)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let rows = follow::Entity::find().count(&app.state.db).await.unwrap();
    assert_eq!(rows, 0);
}

#[tokio::test]
async fn duplicate_edge_insert_is_rejected_by_the_store() {
    // The toggle's duplicate-collapse relies on the composite key
    // rejecting the loser of a race; prove the constraint holds.
    let app = TestApp::spawn().await;
    let author = app.create_user("chef").await;
    let fan = app.create_user("fan").await;
    let italian = app.category_id("italian").await;
    let recipe = app.create_recipe(author, italian, "Pizza").await;

    let edge = recipe_like::ActiveModel {
        recipe_id: Set(recipe.id),
        user_id: Set(fan),
        created_at: Set(Utc::now()),
    };
    edge.clone().insert(&app.state.db).await.unwrap();

    let err = edge.insert(&app.state.db).await.unwrap_err();
    assert!(matches!(
        err.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(_))
    ));

    let rows = recipe_like::Entity::find().count(&app.state.db).await.unwrap();
    assert_eq!(rows, 1);
}
