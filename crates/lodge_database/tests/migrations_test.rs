use diesel::migration::MigrationSource;
use diesel::pg::Pg;
use lodge_database::{MIGRATIONS, SeedReport};

#[test]
fn content_tables_migration_is_embedded() {
    let migrations = MigrationSource::<Pg>::migrations(&MIGRATIONS).unwrap();
    assert_eq!(migrations.len(), 1);
    assert!(
        migrations[0]
            .name()
            .to_string()
            .contains("create_content_tables")
    );
}

#[test]
fn seed_report_totals_every_table() {
    let report = SeedReport {
        pages: 5,
        blocks: 1,
        suites: 3,
        testimonials: 3,
    };
    assert_eq!(report.total(), 12);
    assert_eq!(SeedReport::default().total(), 0);
}
