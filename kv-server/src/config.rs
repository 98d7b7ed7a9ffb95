//! # CLI Configuration
//!
//! Grounded in `original_source/api/utils/CommandArgs.go`, which parses
//! positional process arguments for port/host/persistence. Replaced here
//! with a derive-based `clap` parser, the idiomatic baseline for a Rust
//! CLI surface.

use clap::Parser;

fn default_shard_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get() * DEFAULT_SHARD_MULTIPLIER)
        .unwrap_or(DEFAULT_SHARD_MULTIPLIER)
}

/// Teacher's shard-count heuristic (`hkv-engine`'s default sharding
/// factor), reused here since spec.md leaves the exact count to the
/// operator.
const DEFAULT_SHARD_MULTIPLIER: usize = 4;

const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017";

/// `kv-server [--port <PORT>] [--shards <N>] [--no-persistence] [--mongo-uri <URI>]`
#[derive(Debug, Parser)]
#[command(name = "kv-server", about = "Sharded in-memory cache engine HTTP server")]
pub struct Config {
    /// TCP port the HTTP surface listens on.
    #[arg(long, default_value_t = 8080)]
    pub port: u16,

    /// Number of shards per value shape.
    #[arg(long)]
    shards: Option<usize>,

    /// Disables snapshot persistence entirely (runs with a `NoopRepository`).
    #[arg(long)]
    pub no_persistence: bool,

    /// MongoDB connection string used when persistence is enabled.
    #[arg(long, default_value = DEFAULT_MONGO_URI)]
    pub mongo_uri: String,
}

impl Config {
    pub fn shard_count(&self) -> usize {
        self.shards.unwrap_or_else(default_shard_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_grammar() {
        let config = Config::parse_from(["kv-server"]);
        assert_eq!(config.port, 8080);
        assert!(!config.no_persistence);
        assert_eq!(config.mongo_uri, DEFAULT_MONGO_URI);
        assert!(config.shard_count() > 0);
    }

    #[test]
    fn explicit_shard_count_overrides_the_heuristic() {
        let config = Config::parse_from(["kv-server", "--shards", "3"]);
        assert_eq!(config.shard_count(), 3);
    }
}
