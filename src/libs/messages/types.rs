/// Every user-facing and logged message of the application.
///
/// Text lives in the `Display` implementation in `display.rs`.
#[derive(Debug, Clone)]
pub enum Message {
    // === CONNECTION MESSAGES ===
    DbConnected(String), // path
    DbConnectFailed(String),
    DbConnectionLost(String),
    DbClosed,
    DbCloseFailed(String),
    SchemaInitialized,
    SchemaColumnAdded(String), // column
    TransactionDiscarded,
    TransactionRollbackFailed(String),

    // === TODO STORE MESSAGES ===
    TodoInsertFailed(String),
    TodoFetchFailed(String),
    TodoUpdateFailed(String),
    TodoDeleteFailed(String),
    TodoCountFailed(String),
    TodoBatchRolledBack(String),

    // === TODO COMMAND MESSAGES ===
    TodoCreated(i64),
    TodoCreateFailed,
    TodoUpdated(i64),
    TodoCompleted(i64),
    TodoReopened(i64),
    TodoDeleted(i64),
    TodoNotFound(i64),
    TodosNotFound,
    NoChangesRequested,
    InvalidDueDate(String),

    // === CONFIGURATION MESSAGES ===
    ConfigLoaded(String), // path
    ConfigParseError(String),
}
