//! Connection lifecycle for the todo database.
//!
//! A [`Db`] owns the one physical SQLite connection of the process. It is
//! built explicitly at start-up, shared by reference (usually `Arc<Db>`) with
//! the stores that need it, and closed once at shutdown.
//!
//! The connection is created lazily on first use. Every access goes through a
//! `parking_lot::Mutex` (a `rusqlite::Connection` is `Send` but not `Sync`),
//! which also guards creation: concurrent first callers block until one of
//! them has opened the file, then all use that same connection. Before each
//! use the connection answers a `SELECT 1` probe; a connection that fails it,
//! or one released with [`Db::close`], is replaced on the next call.
//!
//! A transaction belongs to the thread that began it. While it is open, other
//! threads wait (up to the busy timeout) before touching the connection, so
//! their statements never become part of it. If the connection goes away under
//! an open transaction, the owner gets [`StoreError::TransactionLost`] from
//! every call until it ends the transaction with `commit` or `rollback`.

use super::schema;
use crate::libs::error::{Result, StoreError};
use crate::libs::messages::Message;
use crate::{msg_debug, msg_error, msg_warning};
use parking_lot::{Condvar, Mutex, MutexGuard};
use rusqlite::Connection;
use std::fmt::Display;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, ThreadId};
use std::time::{Duration, Instant};

/// Where the database lives and how each new connection is tuned.
#[derive(Debug, Clone, PartialEq)]
pub struct DbConfig {
    pub path: PathBuf,
    pub journal_mode: String,
    pub synchronous: String,
    pub busy_timeout: Duration,
    pub foreign_keys: bool,
}

impl DbConfig {
    /// Default tuning (WAL journal, relaxed sync, foreign keys on) for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            path: path.into(),
            journal_mode: "WAL".to_string(),
            synchronous: "NORMAL".to_string(),
            busy_timeout: Duration::from_secs(5),
            foreign_keys: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TxState {
    Idle,
    Open(ThreadId),
    /// The connection was dropped under an open transaction; the owner still has to end it.
    Lost(ThreadId),
}

impl TxState {
    fn owner(self) -> Option<ThreadId> {
        match self {
            TxState::Idle => None,
            TxState::Open(owner) | TxState::Lost(owner) => Some(owner),
        }
    }
}

struct Slot {
    conn: Option<Connection>,
    schema_ready: bool,
    tx: TxState,
}

pub struct Db {
    config: DbConfig,
    slot: Mutex<Slot>,
    tx_ended: Condvar,
    connects: AtomicU64,
}

impl Db {
    /// Creates the manager. Nothing is opened until the first call that needs a connection.
    pub fn new(config: DbConfig) -> Db {
        Db {
            config,
            slot: Mutex::new(Slot {
                conn: None,
                schema_ready: false,
                tx: TxState::Idle,
            }),
            tx_ended: Condvar::new(),
            connects: AtomicU64::new(0),
        }
    }

    /// Creates the manager and opens the connection right away.
    pub fn open(config: DbConfig) -> Result<Db> {
        let db = Db::new(config);
        db.with_connection(|_| Ok(()))?;
        Ok(db)
    }

    /// Number of physical connections opened so far.
    pub fn connect_count(&self) -> u64 {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn is_connected(&self) -> bool {
        self.slot.lock().conn.is_some()
    }

    /// True from `begin_transaction` until the matching `commit` or `rollback`,
    /// including after the transaction was lost with its connection.
    pub fn in_transaction(&self) -> bool {
        self.slot.lock().tx != TxState::Idle
    }

    /// Runs `f` on a live connection, opening or replacing it first when needed.
    ///
    /// Open failures surface as [`StoreError::StoreUnavailable`]; errors returned by
    /// `f` surface as [`StoreError::Query`]. Blocks while another thread's
    /// transaction is open.
    pub fn with_connection<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let mut slot = self.lock_outside_foreign_transaction()?;
        let conn = self.live_connection(&mut slot)?;
        Ok(f(conn)?)
    }

    /// Locks the slot once no other thread owns a transaction.
    fn lock_outside_foreign_transaction(&self) -> Result<MutexGuard<'_, Slot>> {
        let me = thread::current().id();
        let deadline = Instant::now() + self.config.busy_timeout;
        let mut slot = self.slot.lock();

        loop {
            let owner = slot.tx.owner();
            match owner {
                Some(owner) if owner != me => {
                    let timed_out = self.tx_ended.wait_until(&mut slot, deadline).timed_out();
                    if timed_out && slot.tx.owner() == Some(owner) {
                        return Err(self.unavailable("another thread holds an open transaction"));
                    }
                }
                _ => return Ok(slot),
            }
        }
    }

    fn live_connection<'a>(&self, slot: &'a mut Slot) -> Result<&'a Connection> {
        if let TxState::Lost(_) = slot.tx {
            return Err(StoreError::TransactionLost);
        }

        let alive = match slot.conn.as_ref() {
            Some(conn) => match conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0)) {
                Ok(_) => true,
                Err(e) => {
                    msg_warning!(Message::DbConnectionLost(e.to_string()));
                    false
                }
            },
            None => false,
        };

        if !alive {
            slot.conn = None;
            if let TxState::Open(owner) = slot.tx {
                slot.tx = TxState::Lost(owner);
                msg_warning!(Message::TransactionDiscarded);
                return Err(StoreError::TransactionLost);
            }

            let conn = self.connect()?;
            if !slot.schema_ready {
                schema::init_schema(&conn).map_err(|e| self.unavailable(e))?;
                slot.schema_ready = true;
                msg_debug!(Message::SchemaInitialized);
            }
            slot.conn = Some(conn);
        }

        slot.conn.as_ref().ok_or_else(|| self.unavailable("connection was not stored"))
    }

    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.config.path).map_err(|e| {
            msg_error!(Message::DbConnectFailed(e.to_string()));
            self.unavailable(e)
        })?;

        conn.busy_timeout(self.config.busy_timeout).map_err(|e| self.unavailable(e))?;
        let pragmas = format!(
            "PRAGMA journal_mode = {}; PRAGMA synchronous = {}; PRAGMA foreign_keys = {};",
            pragma_value(&self.config.journal_mode)?,
            pragma_value(&self.config.synchronous)?,
            if self.config.foreign_keys { "ON" } else { "OFF" },
        );
        conn.execute_batch(&pragmas).map_err(|e| self.unavailable(e))?;

        self.connects.fetch_add(1, Ordering::SeqCst);
        msg_debug!(Message::DbConnected(self.config.path.display().to_string()));
        Ok(conn)
    }

    fn unavailable(&self, error: impl Display) -> StoreError {
        StoreError::StoreUnavailable(format!("{}: {}", self.config.path.display(), error))
    }

    /// Opens a transaction owned by the calling thread.
    ///
    /// Only one transaction may be open per process; a second call, from any
    /// thread, fails with [`StoreError::TransactionAlreadyOpen`] until the first
    /// is committed or rolled back.
    pub fn begin_transaction(&self) -> Result<()> {
        let mut slot = self.slot.lock();
        if slot.tx != TxState::Idle {
            return Err(StoreError::TransactionAlreadyOpen);
        }

        self.live_connection(&mut slot)?.execute_batch("BEGIN")?;
        slot.tx = TxState::Open(thread::current().id());
        Ok(())
    }

    /// Commits the calling thread's transaction.
    ///
    /// Fails with [`StoreError::TransactionLost`] when the connection went away
    /// since `begin_transaction`; the transaction is over either way.
    pub fn commit(&self) -> Result<()> {
        self.finish_transaction("COMMIT")
    }

    /// Rolls back the calling thread's transaction, including one that was lost.
    pub fn rollback(&self) -> Result<()> {
        self.finish_transaction("ROLLBACK")
    }

    fn finish_transaction(&self, statement: &str) -> Result<()> {
        let me = thread::current().id();
        let rollback = statement == "ROLLBACK";
        let mut slot = self.slot.lock();

        let state = slot.tx;
        let result = match state {
            TxState::Open(owner) if owner == me => match self.live_connection(&mut slot) {
                // SQLite already rolled the transaction back on its own.
                Ok(conn) if conn.is_autocommit() => Err(StoreError::TransactionLost),
                Ok(conn) => conn.execute_batch(statement).map_err(StoreError::from),
                Err(e) => Err(e),
            },
            TxState::Lost(owner) if owner == me => Err(StoreError::TransactionLost),
            _ => return Err(StoreError::NoTransactionOpen),
        };

        // A failed COMMIT leaves the transaction open so the caller can roll it back.
        if rollback || !matches!(result, Err(StoreError::Query(_))) {
            slot.tx = TxState::Idle;
            self.tx_ended.notify_all();
        }

        match result {
            Err(StoreError::TransactionLost) if rollback => Ok(()),
            other => other,
        }
    }

    /// Runs `f` inside a transaction: commits when it returns `Ok`, rolls back otherwise.
    pub fn transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        self.begin_transaction()?;
        match f() {
            Ok(value) => {
                if let Err(e) = self.commit() {
                    self.rollback_quietly();
                    return Err(e);
                }
                Ok(value)
            }
            Err(e) => {
                self.rollback_quietly();
                Err(e)
            }
        }
    }

    fn rollback_quietly(&self) {
        match self.rollback() {
            Ok(()) | Err(StoreError::NoTransactionOpen) => {}
            Err(e) => msg_error!(Message::TransactionRollbackFailed(e.to_string())),
        }
    }

    /// Releases the connection. Calling it again is a no-op.
    ///
    /// An open transaction is rolled back by SQLite and marked as lost for its owner.
    pub fn close(&self) {
        let mut slot = self.slot.lock();
        let Some(conn) = slot.conn.take() else {
            return;
        };
        let state = slot.tx;
        if let TxState::Open(owner) = state {
            slot.tx = TxState::Lost(owner);
            msg_warning!(Message::TransactionDiscarded);
        }
        match conn.close() {
            Ok(()) => msg_debug!(Message::DbClosed),
            Err((_, e)) => msg_error!(Message::DbCloseFailed(e.to_string())),
        }
    }
}

impl Drop for Db {
    fn drop(&mut self) {
        self.close();
    }
}

/// Pragma values are interpolated into SQL, so only bare keywords are accepted.
fn pragma_value(value: &str) -> Result<&str> {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(value)
    } else {
        Err(StoreError::StoreUnavailable(format!("invalid pragma value '{}'", value)))
    }
}
