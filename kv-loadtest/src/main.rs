//! Concurrent smoke/perf load generator for `kv-server`, grounded in
//! `original_source/loadtest/main.go`: a fixed pool of clients drives a
//! large number of scripted sessions against the dictionary endpoints and
//! reports the total elapsed time.

use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use tokio::sync::Semaphore;
use tracing::{info, warn};

use kv_client::KVClient;

#[derive(Parser, Debug)]
#[command(name = "kv-loadtest", about = "Load generator for kv-server")]
struct Args {
    /// Base URL of the server under test.
    #[arg(long, default_value = "http://localhost:8080")]
    host: String,

    /// Maximum number of sessions running concurrently.
    #[arg(long, default_value_t = 300)]
    clients: usize,

    /// Total number of scripted sessions to run.
    #[arg(long, default_value_t = 10_000)]
    sessions: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let client = Arc::new(KVClient::connect(args.host)?);
    let guard = Arc::new(Semaphore::new(args.clients));

    info!(
        sessions = args.sessions,
        clients = args.clients,
        "starting load test"
    );
    let start = Instant::now();

    let mut tasks = Vec::with_capacity(args.sessions);
    for index in 0..args.sessions {
        let client = client.clone();
        let guard = guard.clone();
        tasks.push(tokio::spawn(async move {
            let permit = guard.acquire_owned().await.expect("semaphore closed");
            simulate(&client, index).await;
            drop(permit);
        }));
    }
    for task in tasks {
        task.await?;
    }

    let elapsed = start.elapsed();
    info!(?elapsed, "load test finished");
    println!("Total time: {elapsed:?}");
    Ok(())
}

/// One scripted session: create a dictionary, add a value, update a
/// value, delete a value, then delete the whole key. Mirrors the
/// original's `simulate` function.
async fn simulate(client: &KVClient, index: usize) {
    let key = format!("aaa{index}");

    if let Err(error) = client
        .add_dictionary(&key, vec![("key1".to_string(), "val1".to_string())], None)
        .await
    {
        warn!(%key, %error, "failed to create dictionary");
    }

    if let Err(error) = client.get_dictionary(&key).await {
        warn!(%key, %error, "failed to read dictionary after create");
    }

    if let Err(error) = client.add_dictionary_value(&key, "key2", "val2").await {
        warn!(%key, %error, "failed to add dictionary value");
    }

    if let Err(error) = client.update_dictionary_value(&key, "key1", "val3", "val1").await {
        warn!(%key, %error, "failed to update dictionary value");
    }

    if let Err(error) = client.get_dictionary(&key).await {
        warn!(%key, %error, "failed to read dictionary after update");
    }

    if let Err(error) = client.delete_dictionary_value(&key, "key2").await {
        warn!(%key, %error, "failed to delete dictionary value");
    }

    if let Err(error) = client.get_dictionary(&key).await {
        warn!(%key, %error, "failed to read dictionary after value delete");
    }

    if let Err(error) = client.delete_dictionary(&key).await {
        warn!(%key, %error, "failed to delete dictionary");
    }

    if client.get_dictionary(&key).await.is_ok() {
        warn!(%key, "dictionary still readable after delete");
    }
}
