//! # Application State
//!
//! Wires one `ShapeCluster` per value shape plus shared metrics into the
//! object axum routes close over. Grounded in
//! `original_source/api/main.go`, which builds one actor cluster per
//! shape and threads it into the controller layer.

use std::sync::Arc;

use kv_engine::shapes::{DictionaryShape, ListShape, StringShape};
use kv_engine::{ShapeCluster, SnapshotRepository, SystemClock};
use kv_store::{MongoRepository, NoopRepository};

use crate::config::Config;
use crate::metrics::Metrics;

/// Mongo database name every shape's collections live under.
const DATABASE_NAME: &str = "kv_cache";

pub struct AppState {
    pub strings: ShapeCluster<StringShape>,
    pub lists: ShapeCluster<ListShape>,
    pub dictionaries: ShapeCluster<DictionaryShape>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub async fn start(config: &Config) -> anyhow::Result<Self> {
        let clock = Arc::new(SystemClock);
        let shard_count = config.shard_count();

        let strings = ShapeCluster::start(
            shard_count,
            clock.clone(),
            repository_for(config, "string").await?,
            StringShape::new,
        )
        .await?;
        let lists = ShapeCluster::start(
            shard_count,
            clock.clone(),
            repository_for(config, "list").await?,
            ListShape::new,
        )
        .await?;
        let dictionaries = ShapeCluster::start(
            shard_count,
            clock,
            repository_for(config, "dictionary").await?,
            DictionaryShape::new,
        )
        .await?;

        Ok(AppState {
            strings,
            lists,
            dictionaries,
            metrics: Arc::new(Metrics::new()),
        })
    }

    /// Saves every shard, stops every shard task, and waits for them to
    /// exit, in that order for each shape.
    pub async fn shutdown(self) -> anyhow::Result<()> {
        self.strings.shutdown().await?;
        self.lists.shutdown().await?;
        self.dictionaries.shutdown().await?;
        Ok(())
    }
}

async fn repository_for<E>(config: &Config, shape: &'static str) -> anyhow::Result<Arc<dyn SnapshotRepository<E>>>
where
    E: kv_store::mongo::DbEntry,
{
    if config.no_persistence {
        Ok(Arc::new(NoopRepository))
    } else {
        let repository = MongoRepository::connect(&config.mongo_uri, DATABASE_NAME, shape).await?;
        Ok(Arc::new(repository))
    }
}
