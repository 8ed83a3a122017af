use clap::Parser;
use error_stack::{Result, ResultExt};
use thiserror::Error;
use tracing::info;

use quill::{
    config,
    database::{self, Connection},
    schema::{Post, User},
    util::telemetry,
};

#[derive(Debug, Error)]
#[error("Failed to seed the database")]
pub struct SeedError;

/// Insert the demo users and posts
#[derive(Debug, Parser)]
pub struct SeedCommand {}

pub fn run(_args: SeedCommand) -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let config = config::Server::load().change_context(SeedError)?;
    telemetry::init();

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .change_context(SeedError)
        .attach_printable("could not build tokio runtime")?
        .block_on(async {
            let pool = database::Pool::new(&config.db, &config.db.primary)
                .await
                .change_context(SeedError)?;

            let mut conn = pool.get().await.change_context(SeedError)?;
            seed_demo_data(&mut conn).await
        })
}

/// Demo content matching what the previous deployment shipped with.
/// Users are looked up by e-mail first so re-running the command does
/// not duplicate anything.
async fn seed_demo_data(conn: &mut Connection) -> Result<(), SeedError> {
    if let Some(ahmed) = create_user(conn, "Ahmed", "ahmed@example.com").await? {
        let post = Post::create(
            conn,
            "Hello World",
            "This is my first post about getting started with Rust and actix-web!",
            ahmed.id,
        )
        .await
        .change_context(SeedError)?;

        publish(conn, &post).await?;

        Post::create(
            conn,
            "Draft Post",
            "This is a draft post that hasn't been published yet.",
            ahmed.id,
        )
        .await
        .change_context(SeedError)?;
    }

    if let Some(mona) = create_user(conn, "Mona", "mona@example.com").await? {
        let post = Post::create(
            conn,
            "Learning SQL",
            "Relational databases reward learning their query language properly. \
             Here are some tips and tricks I've picked up.",
            mona.id,
        )
        .await
        .change_context(SeedError)?;

        publish(conn, &post).await?;
    }

    info!("Seed data created successfully");
    Ok(())
}

async fn create_user(
    conn: &mut Connection,
    name: &str,
    email: &str,
) -> Result<Option<User>, SeedError> {
    if User::by_email(conn, email)
        .await
        .change_context(SeedError)?
        .is_some()
    {
        info!("{email} already exists, skipping");
        return Ok(None);
    }

    // No password: the first login against this row backfills one.
    let user = User::create(conn, name, email, None)
        .await
        .change_context(SeedError)?;

    Ok(Some(user))
}

async fn publish(conn: &mut Connection, post: &Post) -> Result<(), SeedError> {
    Post::update(conn, post.id, &post.title, &post.content, true)
        .await
        .change_context(SeedError)?;
    Ok(())
}
