//! Text for every [`Message`] variant.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CONNECTION MESSAGES ===
            Message::DbConnected(path) => format!("Database connection established: {}", path),
            Message::DbConnectFailed(error) => format!("Failed to open database: {}", error),
            Message::DbConnectionLost(error) => format!("Database connection lost, reconnecting: {}", error),
            Message::DbClosed => "Database connection closed".to_string(),
            Message::DbCloseFailed(error) => format!("Error closing database: {}", error),
            Message::SchemaInitialized => "Database schema is ready".to_string(),
            Message::SchemaColumnAdded(column) => format!("Added missing column '{}' to todos", column),
            Message::TransactionDiscarded => "Open transaction was rolled back with the lost connection".to_string(),
            Message::TransactionRollbackFailed(error) => format!("Failed to roll back transaction: {}", error),

            // === TODO STORE MESSAGES ===
            Message::TodoInsertFailed(error) => format!("Error inserting todo: {}", error),
            Message::TodoFetchFailed(error) => format!("Error getting todos: {}", error),
            Message::TodoUpdateFailed(error) => format!("Error updating todo: {}", error),
            Message::TodoDeleteFailed(error) => format!("Error deleting todo: {}", error),
            Message::TodoCountFailed(error) => format!("Error counting todos: {}", error),
            Message::TodoBatchRolledBack(error) => format!("Batch insert rolled back: {}", error),

            // === TODO COMMAND MESSAGES ===
            Message::TodoCreated(id) => format!("Todo #{} created", id),
            Message::TodoCreateFailed => "Failed to create todo".to_string(),
            Message::TodoUpdated(id) => format!("Todo #{} updated", id),
            Message::TodoCompleted(id) => format!("Todo #{} marked as done", id),
            Message::TodoReopened(id) => format!("Todo #{} reopened", id),
            Message::TodoDeleted(id) => format!("Todo #{} deleted", id),
            Message::TodoNotFound(id) => format!("Todo #{} not found", id),
            Message::TodosNotFound => "No todos found".to_string(),
            Message::NoChangesRequested => "Nothing to change".to_string(),
            Message::InvalidDueDate(value) => {
                format!("Invalid due date '{}', expected YYYY-MM-DD or YYYY-MM-DDTHH:MM", value)
            }

            // === CONFIGURATION MESSAGES ===
            Message::ConfigLoaded(path) => format!("Configuration loaded from {}", path),
            Message::ConfigParseError(error) => format!("Failed to parse configuration: {}", error),
        };

        write!(f, "{}", text)
    }
}
