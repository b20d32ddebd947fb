pub use sea_orm_migration::prelude::*;

mod m20250901_000001_initial;
mod m20250903_000001_add_url_categories;
mod m20250906_000001_add_lottery;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250901_000001_initial::Migration),
            Box::new(m20250903_000001_add_url_categories::Migration),
            Box::new(m20250906_000001_add_lottery::Migration),
        ]
    }
}
