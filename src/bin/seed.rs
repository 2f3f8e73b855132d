//! Seed script for development — populates a fresh database with a sample lab.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires `DATABASE_URL` and `JWT_SECRET` environment variables (reads .env).

use labdash::models::document::Document;
use labdash::store::{PgDocumentStore, EXPERIMENTS, STUDENTS, USERS};
use serde_json::{json, Value};

const FACULTY_UID: &str = "faculty-demo";
const STUDENT_UID: &str = "student-demo";

/// Dev tokens printed at the end are valid for a day.
const TOKEN_EXPIRY_SECS: i64 = 86_400;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL")?;
    let jwt_secret = std::env::var("JWT_SECRET")?;
    let pool = labdash::db::create_pool(&db_url, 5).await?;

    // Run migrations first
    labdash::db::run_migrations(&pool).await?;
    let store = PgDocumentStore::new(pool);

    println!("=== labdash Seed Script ===");

    seed_users(&store).await?;
    seed_experiments(&store).await?;
    seed_students(&store).await?;

    println!("\n=== Seed complete! ===");
    for uid in [FACULTY_UID, STUDENT_UID] {
        let token = labdash::services::auth::issue_token(uid, &jwt_secret, TOKEN_EXPIRY_SECS)?;
        println!("{uid}: Bearer {token}");
    }

    Ok(())
}

async fn put(
    store: &PgDocumentStore,
    collection: &str,
    id: &str,
    value: Value,
) -> anyhow::Result<()> {
    let doc = Document::from_value(id, value)
        .ok_or_else(|| anyhow::anyhow!("seed document {id} is not an object"))?;
    store.upsert(collection, &doc).await?;
    Ok(())
}

async fn seed_users(store: &PgDocumentStore) -> anyhow::Result<()> {
    put(store, USERS, FACULTY_UID, json!({ "role": "faculty", "name": "Dr. Demo" })).await?;
    put(
        store,
        USERS,
        STUDENT_UID,
        json!({
            "role": "student",
            "name": "Student Demo",
            "experimentsCompleted": ["exp-ohms-law", "exp-titration"],
            "vivaScores": { "q-ohms-1": 8, "q-ohms-2": 6, "q-titration-1": 9 }
        }),
    )
    .await?;
    println!("[done] Created faculty and student profiles");
    Ok(())
}

async fn seed_experiments(store: &PgDocumentStore) -> anyhow::Result<()> {
    let experiments = [
        ("exp-ohms-law", "Ohm's Law"),
        ("exp-titration", "Acid-Base Titration"),
        ("exp-pendulum", "Simple Pendulum"),
        ("exp-diffraction", "Diffraction Grating"),
    ];
    for (id, title) in experiments {
        put(store, EXPERIMENTS, id, json!({ "facultyId": FACULTY_UID, "title": title })).await?;
    }
    println!("[done] Created {} experiments", experiments.len());
    Ok(())
}

async fn seed_students(store: &PgDocumentStore) -> anyhow::Result<()> {
    let students = [
        ("stu-001", Some("A"), vec!["exp-ohms-law", "exp-titration"]),
        ("stu-002", Some("A"), vec!["exp-ohms-law"]),
        ("stu-003", Some("B"), vec![]),
        ("stu-004", Some("B"), vec!["exp-ohms-law", "exp-pendulum", "exp-diffraction"]),
        ("stu-005", Some("C"), vec!["exp-titration"]),
        ("stu-006", None, vec![]),
    ];
    for (id, section, completed) in &students {
        let mut value = json!({
            "facultyId": FACULTY_UID,
            "experimentsCompleted": completed,
        });
        if let Some(section) = section {
            value["section"] = json!(section);
        }
        put(store, STUDENTS, id, value).await?;
    }
    println!("[done] Created {} students", students.len());
    Ok(())
}
