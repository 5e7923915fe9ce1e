//! Shipped migration catalog.
//!
//! # Responsibility
//! - Register the baseline migrations every deployment needs, in one place.
//!
//! # Invariants
//! - IDs are `NNNN_snake_name` and never reused for different SQL.
//! - Each SQL batch is idempotent-by-convention for a fresh database but is
//!   still applied at most once through the history table.

use super::migrate::MigrationRegistry;

/// Builds the registry of baseline migrations.
///
/// This is the registration hook: new migrations are added here (or on the
/// returned registry by the embedding application) before the runner executes.
pub fn baseline_registry() -> MigrationRegistry {
    let mut registry = MigrationRegistry::new();
    registry.register_sql("0001_app_settings", include_str!("0001_app_settings.sql"));
    registry.register_sql(
        "0002_payment_methods",
        include_str!("0002_payment_methods.sql"),
    );
    registry
}

#[cfg(test)]
mod tests {
    use super::baseline_registry;

    #[test]
    fn baseline_ids_are_in_execution_order() {
        let registry = baseline_registry();
        assert_eq!(
            registry.ids(),
            vec!["0001_app_settings", "0002_payment_methods"]
        );
    }
}
