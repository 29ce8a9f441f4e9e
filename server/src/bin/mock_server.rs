//! Standalone demo server: three read-only endpoints over a hardcoded
//! intern dataset. This is a separate data path from the main application
//! and never touches the live store.

#[macro_use]
extern crate rocket;

use itertools::Itertools;
use rocket::response::status;
use rocket::serde::json::Json;
use rocket::{Build, Rocket, State};
use serde::Serialize;
use shared::mock_monthly_growth;

const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct MockIntern {
    id: u32,
    name: String,
    email: String,
    referral_code: String,
    donations_raised: f64,
    join_date: String,
    avatar: String,
}

#[derive(Debug, Clone, Serialize)]
struct RankedIntern {
    #[serde(flatten)]
    intern: MockIntern,
    rank: u64,
}

/// `current_rank` is the numeric position here, unlike the main API's tier
/// label; the demo wire shape is served as-is.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct MockInternStats {
    donations_raised: f64,
    current_rank: u64,
    total_interns: usize,
    monthly_growth: u32,
    referral_code: String,
}

#[derive(Debug, Clone, Serialize)]
struct ErrorResponse {
    error: String,
}

type InternNotFound = status::NotFound<Json<ErrorResponse>>;

fn intern_not_found() -> InternNotFound {
    status::NotFound(Json(ErrorResponse {
        error: "Intern not found".to_string(),
    }))
}

fn intern(
    id: u32,
    name: &str,
    email: &str,
    referral_code: &str,
    donations_raised: f64,
    join_date: &str,
    avatar: &str,
) -> MockIntern {
    MockIntern {
        id,
        name: name.to_string(),
        email: email.to_string(),
        referral_code: referral_code.to_string(),
        donations_raised,
        join_date: join_date.to_string(),
        avatar: avatar.to_string(),
    }
}

fn mock_interns() -> Vec<MockIntern> {
    vec![
        intern(
            1,
            "Sarah Johnson",
            "sarah@shecanfoundation.org",
            "sarah2025",
            15420.0,
            "2024-01-15",
            "https://images.pexels.com/photos/774909/pexels-photo-774909.jpeg?auto=compress&cs=tinysrgb&w=150&h=150&fit=crop",
        ),
        intern(
            2,
            "Maria Garcia",
            "maria@shecanfoundation.org",
            "maria2025",
            18750.0,
            "2024-01-20",
            "https://images.pexels.com/photos/415829/pexels-photo-415829.jpeg?auto=compress&cs=tinysrgb&w=150&h=150&fit=crop",
        ),
        intern(
            3,
            "Emily Chen",
            "emily@shecanfoundation.org",
            "emily2025",
            12300.0,
            "2024-02-01",
            "https://images.pexels.com/photos/1130626/pexels-photo-1130626.jpeg?auto=compress&cs=tinysrgb&w=150&h=150&fit=crop",
        ),
        intern(
            4,
            "Aisha Patel",
            "aisha@shecanfoundation.org",
            "aisha2025",
            9850.0,
            "2024-02-10",
            "https://images.pexels.com/photos/1181519/pexels-photo-1181519.jpeg?auto=compress&cs=tinysrgb&w=150&h=150&fit=crop",
        ),
        intern(
            5,
            "Jessica Williams",
            "jessica@shecanfoundation.org",
            "jessica2025",
            21600.0,
            "2024-01-05",
            "https://images.pexels.com/photos/1239291/pexels-photo-1239291.jpeg?auto=compress&cs=tinysrgb&w=150&h=150&fit=crop",
        ),
    ]
}

#[get("/intern/<id>")]
fn get_intern(id: u32, interns: &State<Vec<MockIntern>>) -> Result<Json<MockIntern>, InternNotFound> {
    interns
        .iter()
        .find(|intern| intern.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(intern_not_found)
}

#[get("/leaderboard")]
fn get_leaderboard(interns: &State<Vec<MockIntern>>) -> Json<Vec<RankedIntern>> {
    Json(
        interns
            .iter()
            .sorted_by(|a, b| b.donations_raised.total_cmp(&a.donations_raised))
            .enumerate()
            .map(|(index, intern)| RankedIntern {
                intern: intern.clone(),
                rank: index as u64 + 1,
            })
            .collect(),
    )
}

#[get("/intern/<id>/stats")]
fn get_intern_stats(
    id: u32,
    interns: &State<Vec<MockIntern>>,
) -> Result<Json<MockInternStats>, InternNotFound> {
    let intern = interns
        .iter()
        .find(|intern| intern.id == id)
        .ok_or_else(intern_not_found)?;

    let current_rank = interns
        .iter()
        .sorted_by(|a, b| b.donations_raised.total_cmp(&a.donations_raised))
        .position(|ranked| ranked.id == id)
        .map(|index| index as u64 + 1)
        .unwrap_or_default();

    Ok(Json(MockInternStats {
        donations_raised: intern.donations_raised,
        current_rank,
        total_interns: interns.len(),
        monthly_growth: mock_monthly_growth(&mut rand::thread_rng()),
        referral_code: intern.referral_code.clone(),
    }))
}

fn build_rocket(port: u16) -> Rocket<Build> {
    let figment = rocket::Config::figment().merge(("port", port));
    rocket::custom(figment)
        .manage(mock_interns())
        .mount("/api", routes![get_intern, get_leaderboard, get_intern_stats])
}

#[launch]
fn rocket() -> _ {
    let port = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    build_rocket(port)
}
