use serde_json::json;
use sqlx::SqlitePool;
use wildseries_core::types::UserRole;
use wildseries_db::repo::{actors, categories, comments, episodes, programs, seasons, users};
use wildseries_db::seed::{self, Fixture};

async fn test_pool() -> SqlitePool {
    let pool = wildseries_db::connect(":memory:").await.unwrap();
    wildseries_db::migrate::run(&pool).await.unwrap();
    pool
}

fn fixture() -> Fixture {
    serde_json::from_value(json!({
        "categories": ["Horreur", "Comedy"],
        "programs": [
            {
                "title": "The Walking Dead",
                "category": "horreur",
                "actors": ["Andrew Lincoln", "Norman Reedus"],
                "seasons": [
                    {
                        "number": 1,
                        "year": 2010,
                        "episodes": [
                            { "number": 1, "title": "Days Gone Bye" },
                            { "number": 2, "title": "Guts" }
                        ]
                    },
                    { "number": 2, "year": 2011 }
                ]
            },
            {
                "title": "Fear The Walking Dead",
                "category": "Horreur",
                "actors": ["Kim Dickens"]
            },
            { "title": "The Office", "category": "Comedy" }
        ],
        "users": [
            { "username": "alice", "password": "correct horse battery" }
        ]
    }))
    .unwrap()
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let pool = wildseries_db::connect(":memory:").await.unwrap();
    assert_eq!(wildseries_db::migrate::run(&pool).await.unwrap(), 1);
    assert_eq!(wildseries_db::migrate::run(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn seeding_twice_creates_nothing_new() {
    let pool = test_pool().await;
    let fixture = fixture();

    let first = seed::apply(&pool, &fixture).await.unwrap();
    assert_eq!(first.categories, 2);
    assert_eq!(first.programs, 3);
    assert_eq!(first.seasons, 2);
    assert_eq!(first.episodes, 2);
    assert_eq!(first.actors, 3);
    assert_eq!(first.users, 1);

    let second = seed::apply(&pool, &fixture).await.unwrap();
    assert_eq!(second, seed::SeedSummary::default());
    assert_eq!(programs::list_programs(&pool).await.unwrap().len(), 3);
}

#[tokio::test]
async fn seeding_rejects_unknown_category() {
    let pool = test_pool().await;
    let fixture: Fixture = serde_json::from_value(json!({
        "programs": [{ "title": "Lost", "category": "Drama" }]
    }))
    .unwrap();

    let err = seed::apply(&pool, &fixture).await.unwrap_err();
    assert!(matches!(err, seed::SeedError::UnknownCategory { .. }));
}

#[tokio::test]
async fn program_title_lookup_ignores_case() {
    let pool = test_pool().await;
    seed::apply(&pool, &fixture()).await.unwrap();

    let program = programs::find_by_title_key(&pool, "the walking dead")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(program.title, "The Walking Dead");
    assert_eq!(program.slug, "the-walking-dead");

    let by_slug = programs::find_by_slug(&pool, "the-walking-dead")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_slug.id, program.id);
}

#[tokio::test]
async fn title_search_is_exact_match() {
    let pool = test_pool().await;
    seed::apply(&pool, &fixture()).await.unwrap();

    assert_eq!(programs::find_by_title(&pool, "The Office").await.unwrap().len(), 1);
    assert!(programs::find_by_title(&pool, "Office").await.unwrap().is_empty());
    assert!(programs::find_by_title(&pool, "the office").await.unwrap().is_empty());
}

#[tokio::test]
async fn category_names_are_unique_ignoring_case() {
    let pool = test_pool().await;
    let id = categories::create_category(&pool, "Éducation").await.unwrap();

    let found = categories::find_by_name_key(&pool, "éducation")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, id);
    assert_eq!(found.name, "Éducation");

    let err = categories::create_category(&pool, "éDUCATION").await.unwrap_err();
    assert!(wildseries_db::is_unique_violation(&err));
    assert_eq!(categories::list_categories(&pool).await.unwrap().len(), 1);
}

#[tokio::test]
async fn recent_programs_by_category_are_newest_first_and_capped() {
    let pool = test_pool().await;
    seed::apply(&pool, &fixture()).await.unwrap();
    let horreur = categories::find_by_name_key(&pool, "horreur")
        .await
        .unwrap()
        .unwrap();
    for title in ["Scream", "Chucky"] {
        programs::create_program(&pool, title, None, None, horreur.id)
            .await
            .unwrap();
    }

    let recent = programs::list_recent_by_category(&pool, horreur.id, 3)
        .await
        .unwrap();
    let titles: Vec<&str> = recent.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["Chucky", "Scream", "Fear The Walking Dead"]);
}

#[tokio::test]
async fn traversal_follows_parent_ids() {
    let pool = test_pool().await;
    seed::apply(&pool, &fixture()).await.unwrap();
    let program = programs::find_by_slug(&pool, "the-walking-dead")
        .await
        .unwrap()
        .unwrap();

    let program_seasons = seasons::list_by_program(&pool, program.id).await.unwrap();
    assert_eq!(program_seasons.len(), 2);
    assert_eq!(program_seasons[0].number, 1);

    let season_episodes = episodes::list_by_season(&pool, program_seasons[0].id)
        .await
        .unwrap();
    let titles: Vec<&str> = season_episodes.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, ["Days Gone Bye", "Guts"]);

    let cast = actors::list_by_program(&pool, program.id).await.unwrap();
    assert_eq!(cast.len(), 2);

    let reedus = actors::find_by_name(&pool, "Norman Reedus").await.unwrap().unwrap();
    let roles = programs::list_by_actor(&pool, reedus.id).await.unwrap();
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].id, program.id);
}

#[tokio::test]
async fn comments_are_listed_with_their_author() {
    let pool = test_pool().await;
    seed::apply(&pool, &fixture()).await.unwrap();
    let alice = users::find_by_username(&pool, "alice").await.unwrap().unwrap();
    let program = programs::find_by_slug(&pool, "the-walking-dead")
        .await
        .unwrap()
        .unwrap();
    let season = &seasons::list_by_program(&pool, program.id).await.unwrap()[0];
    let episode = &episodes::list_by_season(&pool, season.id).await.unwrap()[0];

    comments::create_comment(&pool, episode.id, alice.id, "Great pilot")
        .await
        .unwrap();

    let listed = comments::list_by_episode(&pool, episode.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].author, "alice");
    assert_eq!(listed[0].comment.comment, "Great pilot");
    assert_eq!(listed[0].comment.author_id, alice.id);
}

#[tokio::test]
async fn comment_requires_existing_episode() {
    let pool = test_pool().await;
    let user_id = users::create_user(&pool, "bob", "hunter2hunter2", UserRole::User)
        .await
        .unwrap();
    assert!(comments::create_comment(&pool, 999, user_id, "orphan").await.is_err());
}

#[tokio::test]
async fn passwords_are_verified_against_hash() {
    let pool = test_pool().await;
    users::create_user(&pool, "carol", "s3cret-passphrase", UserRole::Admin)
        .await
        .unwrap();
    let row = users::find_by_username(&pool, "carol").await.unwrap().unwrap();

    assert!(users::verify_password("s3cret-passphrase", &row.password_hash).unwrap());
    assert!(!users::verify_password("wrong", &row.password_hash).unwrap());
    assert_eq!(row.role, UserRole::Admin);
}
