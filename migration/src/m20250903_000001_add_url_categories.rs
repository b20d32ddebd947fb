use sea_orm_migration::prelude::*;

/// 网址分类表
/// urls 列为 jsonb 数组，内嵌该分类下的全部网址条目
#[derive(DeriveIden)]
enum UrlCategories {
    Table,
    Id,
    Name,
    SortOrder,
    CreatedBy,
    CreatedAt,
    Urls,
}

fn url_categories_table() -> TableCreateStatement {
    Table::create()
        .table(UrlCategories::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(UrlCategories::Id)
                .string_len(36)
                .not_null()
                .primary_key(),
        )
        .col(ColumnDef::new(UrlCategories::Name).text().not_null())
        .col(
            ColumnDef::new(UrlCategories::SortOrder)
                .integer()
                .not_null()
                .default(0),
        )
        .col(ColumnDef::new(UrlCategories::CreatedBy).text().not_null())
        .col(
            ColumnDef::new(UrlCategories::CreatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::cust("NOW()")),
        )
        .col(
            ColumnDef::new(UrlCategories::Urls)
                .json_binary()
                .not_null()
                .default(Expr::cust("'[]'::jsonb")),
        )
        .to_owned()
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(url_categories_table())
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_url_categories_sort")
                    .table(UrlCategories::Table)
                    .col(UrlCategories::SortOrder)
                    .col(UrlCategories::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(UrlCategories::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_text_columns_are_unbounded() {
        let sql = url_categories_table().to_string(PostgresQueryBuilder);
        assert!(sql.contains(r#""name" text"#), "{sql}");
        assert!(sql.contains(r#""created_by" text"#), "{sql}");
        assert!(sql.contains(r#""urls" jsonb"#), "{sql}");
    }
}
