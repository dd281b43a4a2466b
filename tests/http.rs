use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordResponse {
    id: String,
    date: String,
    bed_time: String,
    wake_time: String,
    quality: String,
    hours_slept: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TodayResponse {
    date: String,
    record: Option<RecordResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatsResponse {
    streak_days: u32,
    weekly_average_hours: f64,
    average_hours: f64,
    good_nights_pct: u32,
    total_records: usize,
}

#[derive(Debug, Deserialize, PartialEq)]
struct ProfileResponse {
    name: String,
    age: u8,
    goal: String,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_dir() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("sleep_tracker_http_{}_{}", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/today")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_dir = unique_data_dir();
    let child = Command::new(env!("CARGO_BIN_EXE_sleep_tracker"))
        .env("PORT", port.to_string())
        .env("SLEEP_DATA_DIR", data_dir)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn post_record(
    client: &Client,
    base_url: &str,
    bed_time: &str,
    wake_time: &str,
    quality: &str,
) -> reqwest::Response {
    client
        .post(format!("{base_url}/api/records"))
        .json(&serde_json::json!({
            "bedTime": bed_time,
            "wakeTime": wake_time,
            "quality": quality,
        }))
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_saved_record_shows_up_as_today() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = post_record(&client, &server.base_url, "23:30", "07:15", "good").await;
    assert!(response.status().is_success());
    let saved: RecordResponse = response.json().await.unwrap();
    assert!(!saved.id.is_empty());
    assert_eq!(saved.hours_slept, 7.8);

    let today: TodayResponse = client
        .get(format!("{}/api/today", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let record = today.record.expect("today record missing after save");
    assert_eq!(record.date, today.date);
    assert_eq!(record.bed_time, "23:30");
    assert_eq!(record.wake_time, "07:15");
    assert_eq!(record.quality, "good");
    assert_eq!(record.hours_slept, 7.8);
}

#[tokio::test]
async fn http_same_day_record_is_upserted_not_duplicated() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    assert!(post_record(&client, &server.base_url, "22:00", "06:00", "fair")
        .await
        .status()
        .is_success());
    assert!(post_record(&client, &server.base_url, "23:00", "07:00", "good")
        .await
        .status()
        .is_success());

    let today: TodayResponse = client
        .get(format!("{}/api/today", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let records: Vec<RecordResponse> = client
        .get(format!("{}/api/records", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let todays: Vec<&RecordResponse> = records
        .iter()
        .filter(|record| record.date == today.date)
        .collect();
    assert_eq!(todays.len(), 1);
    assert_eq!(todays[0].bed_time, "23:00");
    assert_eq!(todays[0].quality, "good");
    assert_eq!(todays[0].hours_slept, 8.0);
}

#[tokio::test]
async fn http_stats_reflect_saved_records() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    assert!(post_record(&client, &server.base_url, "23:00", "07:00", "good")
        .await
        .status()
        .is_success());

    let stats: StatsResponse = client
        .get(format!("{}/api/stats", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(stats.total_records >= 1);
    assert!(stats.streak_days >= 1);
    assert!(stats.weekly_average_hours > 0.0);
    assert!(stats.average_hours > 0.0);
    assert!(stats.good_nights_pct <= 100);
}

#[tokio::test]
async fn http_rejects_malformed_input() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = post_record(&client, &server.base_url, "late night", "07:00", "good").await;
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    let response = post_record(&client, &server.base_url, "23:00", "7 am", "good").await;
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    let response = post_record(&client, &server.base_url, "23:00", "07:00", "excellent").await;
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn http_profile_round_trips() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .put(format!("{}/api/profile", server.base_url))
        .json(&serde_json::json!({
            "name": "Ana",
            "age": 30,
            "goal": "Sleep more hours",
        }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let profile: ProfileResponse = client
        .get(format!("{}/api/profile", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(
        profile,
        ProfileResponse {
            name: "Ana".to_string(),
            age: 30,
            goal: "Sleep more hours".to_string(),
        }
    );
}

#[tokio::test]
async fn http_profile_rejects_invalid_fields() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .put(format!("{}/api/profile", server.base_url))
        .json(&serde_json::json!({ "name": "  ", "age": 30, "goal": "Sleep more hours" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    let response = client
        .put(format!("{}/api/profile", server.base_url))
        .json(&serde_json::json!({ "name": "Ana", "age": 0, "goal": "Sleep more hours" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    let response = client
        .get(format!("{}/api/goals", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let goals: Vec<String> = response.json().await.unwrap();
    assert!(goals.contains(&"Sleep more hours".to_string()));
}

#[tokio::test]
async fn http_index_serves_dashboard_page() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let body = response.text().await.unwrap();
    assert!(body.contains("Sleep Tracker"));
    assert!(body.contains("record-form"));
}
