#[cfg(test)]
mod tests {
    use std::time::Duration;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use todolist::libs::config::{Config, DatabaseConfig, CONFIG_FILE_NAME};
    use todolist::libs::data_storage::DataStorage;

    struct ConfigTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            ConfigTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_missing_file_gives_defaults(ctx: &mut ConfigTestContext) {
        let config = Config::read_from(&ctx.temp_dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.database.file, "todos.db");
        assert_eq!(config.database.journal_mode, "WAL");
        assert_eq!(config.database.synchronous, "NORMAL");
        assert!(config.database.foreign_keys);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read(ctx: &mut ConfigTestContext) {
        let path = ctx.temp_dir.path().join(CONFIG_FILE_NAME);
        let config = Config {
            database: DatabaseConfig {
                file: "work.db".to_string(),
                journal_mode: "DELETE".to_string(),
                synchronous: "FULL".to_string(),
                busy_timeout_ms: 250,
                foreign_keys: false,
            },
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::read_from(&path).unwrap(), config);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_partial_file_fills_in_defaults(ctx: &mut ConfigTestContext) {
        let path = ctx.temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, r#"{ "database": { "file": "other.db" } }"#).unwrap();

        let config = Config::read_from(&path).unwrap();
        assert_eq!(config.database.file, "other.db");
        assert_eq!(config.database.journal_mode, "WAL");
        assert_eq!(config.database.busy_timeout_ms, 5000);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_corrupted_file_is_an_error(ctx: &mut ConfigTestContext) {
        let path = ctx.temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "{ not json").unwrap();
        assert!(Config::read_from(&path).is_err());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_db_config_resolves_against_data_directory(ctx: &mut ConfigTestContext) {
        let storage = DataStorage::at(ctx.temp_dir.path().join("data"));
        let db_config = Config::default().db_config_in(&storage).unwrap();

        assert_eq!(db_config.path, ctx.temp_dir.path().join("data").join("todos.db"));
        assert!(storage.base_path().exists());
        assert_eq!(db_config.busy_timeout, Duration::from_millis(5000));

        let absolute = ctx.temp_dir.path().join("elsewhere.db");
        let mut config = Config::default();
        config.database.file = absolute.display().to_string();
        assert_eq!(config.db_config_in(&storage).unwrap().path, absolute);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_explicit_database_path_keeps_tuning_without_touching_data_directory(ctx: &mut ConfigTestContext) {
        let mut config = Config::default();
        config.database.journal_mode = "DELETE".to_string();
        config.database.busy_timeout_ms = 250;

        let explicit = ctx.temp_dir.path().join("override.db");
        let db_config = config.db_config_at(&explicit);

        assert_eq!(db_config.path, explicit);
        assert_eq!(db_config.journal_mode, "DELETE");
        assert_eq!(db_config.busy_timeout, Duration::from_millis(250));
        assert!(!explicit.exists());
        assert_eq!(std::fs::read_dir(ctx.temp_dir.path()).unwrap().count(), 0);
    }
}
