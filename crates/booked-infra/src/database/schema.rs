//! Table creation from the SeaORM entities.

use sea_orm::{ConnectionTrait, DbConn, DbErr, EntityTrait, Schema};

use super::entity::{comment, email_follow, follow, post, profile, report, user};

async fn create_table<E: EntityTrait>(
    db: &DbConn,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let table = entity.table_name().to_owned();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();

    db.execute(backend.build(&statement)).await?;
    tracing::debug!(%table, "Table ready");
    Ok(())
}

/// Create every table that does not exist yet, parents before children.
pub async fn create_tables(db: &DbConn) -> Result<(), DbErr> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, user::Entity).await?;
    create_table(db, &schema, profile::Entity).await?;
    create_table(db, &schema, follow::Entity).await?;
    create_table(db, &schema, email_follow::Entity).await?;
    create_table(db, &schema, post::Entity).await?;
    create_table(db, &schema, comment::Entity).await?;
    create_table(db, &schema, report::Entity).await?;

    tracing::info!("Database schema initialized");
    Ok(())
}
