#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Cargo builds the binary before integration tests run
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_contact-api"));
        cmd.arg("serve")
            .env("API_HOST", "127.0.0.1")
            .env("API_PORT", port.to_string())
            .env("SECURITY_BCRYPT_COST", "4")
            .env("DATABASE_RUN_MIGRATIONS", "true")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // DATABASE_URL is inherited from the environment (or .env, loaded by the server)
        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Start the shared server, or `None` when no database is configured so
/// the calling test can skip itself
pub async fn ensure_server() -> Result<Option<&'static TestServer>> {
    let _ = dotenvy::dotenv();
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL not set, skipping integration test");
        return Ok(None);
    }

    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(15)).await?;
    Ok(Some(server))
}

/// Unique per test so runs never collide on the username primary key
pub fn unique_username(prefix: &str) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{}_{}", prefix, &suffix[..12])
}

pub async fn register(client: &reqwest::Client, server: &TestServer, username: &str, password: &str) -> Result<Value> {
    let res = client
        .post(server.url("/api/users"))
        .json(&json!({ "username": username, "password": password, "name": "Test User" }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "register failed: {}", res.status());
    Ok(res.json().await?)
}

pub async fn login(client: &reqwest::Client, server: &TestServer, username: &str, password: &str) -> Result<String> {
    let res = client
        .post(server.url("/api/users/login"))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());
    let body: Value = res.json().await?;
    body["data"]["token"]
        .as_str()
        .map(str::to_string)
        .context("login response has no token")
}

/// Register a fresh user and return its username and session token
pub async fn new_session(client: &reqwest::Client, server: &TestServer, prefix: &str) -> Result<(String, String)> {
    let username = unique_username(prefix);
    register(client, server, &username, "rahasia").await?;
    let token = login(client, server, &username, "rahasia").await?;
    Ok((username, token))
}

pub async fn create_contact(client: &reqwest::Client, server: &TestServer, token: &str, body: Value) -> Result<Value> {
    let res = client
        .post(server.url("/api/contacts"))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "create contact failed: {}", res.status());
    let body: Value = res.json().await?;
    Ok(body["data"].clone())
}
