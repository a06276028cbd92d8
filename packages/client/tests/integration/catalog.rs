use client::api::{catalog, engagement};

use crate::common::TestApp;

#[tokio::test]
async fn categories_are_seeded_and_ordered_by_title() {
    let app = TestApp::spawn().await;

    let categories = catalog::list_categories(&app.state).await.unwrap();

    let titles: Vec<&str> = categories.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Chinese",
            "Indian",
            "Italian",
            "Japanese",
            "Mediterranean",
            "Mexican"
        ]
    );
}

#[tokio::test]
async fn unknown_slug_is_not_found() {
    let app = TestApp::spawn().await;

    let err = catalog::list_recipes_by_category(&app.state, "klingon")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn empty_category_yields_an_empty_list_not_an_error() {
    let app = TestApp::spawn().await;

    let recipes = catalog::list_recipes_by_category(&app.state, "japanese")
        .await
        .unwrap();
    assert!(recipes.is_empty());
}

#[tokio::test]
async fn category_listing_annotates_derived_counts() {
    let app = TestApp::spawn().await;
    let author = app.create_user("chef_marco").await;
    let fan = app.create_user("pizza_fan").await;
    let italian = app.category_id("italian").await;

    let pizza = app
        .create_recipe(author, italian, "Neapolitan Pizza")
        .await;
    let carbonara = app.create_recipe(author, italian, "Carbonara").await;

    engagement::toggle_like(&app.state, pizza.id, fan).await.unwrap();

    let recipes = catalog::list_recipes_by_category(&app.state, "italian")
        .await
        .unwrap();
    assert_eq!(recipes.len(), 2);

    let first = recipes.iter().find(|r| r.id == pizza.id).unwrap();
    let second = recipes.iter().find(|r| r.id == carbonara.id).unwrap();
    assert_eq!(first.likes, 1);
    assert_eq!(second.likes, 0);
    assert_eq!(first.comments, 0);
    assert_eq!(first.saves, 0);
}

#[tokio::test]
async fn recipes_in_other_categories_are_not_listed() {
    let app = TestApp::spawn().await;
    let author = app.create_user("chef").await;
    let italian = app.category_id("italian").await;
    let mexican = app.category_id("mexican").await;

    app.create_recipe(author, italian, "Lasagna").await;
    let tacos = app.create_recipe(author, mexican, "Street Tacos").await;

    let recipes = catalog::list_recipes_by_category(&app.state, "mexican")
        .await
        .unwrap();
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0].id, tacos.id);
}
