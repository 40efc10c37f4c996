use anyhow::{Result, bail};
use redis::aio::MultiplexedConnection;
use redis::{Client, ConnectionAddr, ConnectionInfo, RedisConnectionInfo};

use crate::error::ApiError;

const DEFAULT_REDIS_PORT: u16 = 6379;

/// Connection target for the backing Redis server, parsed once at startup
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreTarget {
    pub addr: String,
    pub password: String,
    pub default_db: i64,
}

impl StoreTarget {
    /// Parse a connection string of the form `[password/]address[/db]`.
    ///
    /// The string is split on `/`, each segment trimmed and empty segments
    /// dropped. One segment is a bare address, two are address plus database
    /// index, three are password, address and database index. A database
    /// index that does not parse falls back to 0. Any other segment count is
    /// a configuration error, e.g. `secret/localhost:6388/0`.
    pub fn parse(raw: &str) -> Result<Self> {
        let segments: Vec<&str> = raw
            .split('/')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [addr] => Ok(StoreTarget {
                addr: (*addr).to_string(),
                password: String::new(),
                default_db: 0,
            }),
            [addr, db] => Ok(StoreTarget {
                addr: (*addr).to_string(),
                password: String::new(),
                default_db: db.parse().unwrap_or(0),
            }),
            [password, addr, db] => Ok(StoreTarget {
                addr: (*addr).to_string(),
                password: (*password).to_string(),
                default_db: db.parse().unwrap_or(0),
            }),
            _ => bail!("invalid connection string: {:?}", raw),
        }
    }
}

/// Redis client issuing exactly one command per short-lived connection.
///
/// There is no pooling by design: every operation opens a connection to the
/// configured target, runs a single command against the requested logical
/// database and drops the connection before returning, on success and on
/// failure alike.
#[derive(Clone)]
pub struct StoreClient {
    target: StoreTarget,
}

impl StoreClient {
    pub fn new(target: StoreTarget) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &StoreTarget {
        &self.target
    }

    /// Build a client bound to the target address and the requested logical
    /// database index. The per-call index always wins over the descriptor's
    /// default.
    fn client_for_db(&self, db: i64) -> Result<Client, ApiError> {
        let (host, port) = match self.target.addr.rsplit_once(':') {
            Some((host, port)) => (
                host.to_string(),
                port.parse::<u16>()
                    .map_err(|_| ApiError::BadAddress(self.target.addr.clone()))?,
            ),
            None => (self.target.addr.clone(), DEFAULT_REDIS_PORT),
        };

        let info = ConnectionInfo {
            addr: ConnectionAddr::Tcp(host, port),
            redis: RedisConnectionInfo {
                db,
                password: (!self.target.password.is_empty())
                    .then(|| self.target.password.clone()),
                ..Default::default()
            },
        };

        Ok(Client::open(info)?)
    }

    async fn connect(&self, db: i64) -> Result<MultiplexedConnection, ApiError> {
        let client = self.client_for_db(db)?;
        Ok(client.get_multiplexed_async_connection().await?)
    }

    /// Read a single key.
    ///
    /// * `Ok(Some(value))` - key present
    /// * `Ok(None)` - key absent (redis Nil); never surfaced as an error
    /// * `Err(_)` - any other store failure
    pub async fn fetch(&self, key: &str, db: i64) -> Result<Option<String>, ApiError> {
        let mut conn = self.connect(db).await?;

        let value: Option<String> = redis::cmd("GET").arg(key).query_async(&mut conn).await?;

        tracing::debug!("GET {} (db {}): present={}", key, db, value.is_some());
        Ok(value)
    }

    /// Set a key with an expiry, returning the store's status string.
    ///
    /// The ttl is a human-readable duration such as `10s` or `5m`. A
    /// malformed ttl fails before any connection is made.
    pub async fn store_with_ttl(
        &self,
        key: &str,
        value: &str,
        ttl: &str,
        db: i64,
    ) -> Result<String, ApiError> {
        let duration = humantime::parse_duration(ttl).map_err(ApiError::InvalidTtl)?;

        let mut conn = self.connect(db).await?;

        let status: String = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("PX")
            .arg(duration.as_millis() as u64)
            .query_async(&mut conn)
            .await?;

        tracing::debug!("SET {} PX {:?} (db {}): {}", key, duration, db, status);
        Ok(status)
    }

    /// Add a member to a sorted set, returning the number of newly added
    /// elements (0 when the member already existed and only its score was
    /// updated).
    ///
    /// A score that does not parse as a float fails before any connection is
    /// made.
    pub async fn sorted_set_insert(
        &self,
        key: &str,
        member: &str,
        score: &str,
        db: i64,
    ) -> Result<i64, ApiError> {
        let score: f64 = score.parse().map_err(ApiError::InvalidScore)?;

        let mut conn = self.connect(db).await?;

        let added: i64 = redis::cmd("ZADD")
            .arg(key)
            .arg(score)
            .arg(member)
            .query_async(&mut conn)
            .await?;

        tracing::debug!("ZADD {} {} {} (db {}): {}", key, score, member, db, added);
        Ok(added)
    }

    /// Delete the given keys in one command, returning the number of keys
    /// actually removed. Absent keys are not an error, they just do not
    /// count.
    pub async fn delete_keys(&self, keys: &[String], db: i64) -> Result<i64, ApiError> {
        let mut conn = self.connect(db).await?;

        let removed: i64 = redis::cmd("DEL").arg(keys).query_async(&mut conn).await?;

        tracing::debug!("DEL {:?} (db {}): {}", keys, db, removed);
        Ok(removed)
    }
}
