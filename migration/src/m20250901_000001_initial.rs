use sea_orm_migration::prelude::*;

/// 用户表（昵称登录，无密码）
#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Nickname,
    CreatedAt,
    UpdatedAt,
}

/// 公告表
#[derive(DeriveIden)]
enum Announcements {
    Table,
    Id,
    Title,
    Content,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

fn users_table() -> TableCreateStatement {
    Table::create()
        .table(Users::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Users::Id)
                .string_len(36)
                .not_null()
                .primary_key(),
        )
        .col(ColumnDef::new(Users::Nickname).string_len(64).not_null())
        .col(
            ColumnDef::new(Users::CreatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::cust("NOW()")),
        )
        .col(
            ColumnDef::new(Users::UpdatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::cust("NOW()")),
        )
        .to_owned()
}

fn announcements_table() -> TableCreateStatement {
    Table::create()
        .table(Announcements::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Announcements::Id)
                .string_len(36)
                .not_null()
                .primary_key(),
        )
        .col(
            ColumnDef::new(Announcements::Title)
                .string_len(255)
                .not_null(),
        )
        .col(ColumnDef::new(Announcements::Content).text().not_null())
        .col(ColumnDef::new(Announcements::CreatedBy).text().not_null())
        .col(
            ColumnDef::new(Announcements::CreatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::cust("NOW()")),
        )
        .col(
            ColumnDef::new(Announcements::UpdatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::cust("NOW()")),
        )
        .to_owned()
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(users_table())
            .await?;

        // 昵称唯一
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_nickname_unique")
                    .table(Users::Table)
                    .col(Users::Nickname)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(announcements_table())
            .await?;

        // 列表按发布时间倒序
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_announcements_created_at")
                    .table(Announcements::Table)
                    .col(Announcements::CreatedAt)
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
                    .table(Announcements::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().if_exists().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_announcement_author_is_unbounded() {
        // 昵称来自请求头，不限制长度
        let sql = announcements_table().to_string(PostgresQueryBuilder);
        assert!(sql.contains(r#""created_by" text"#), "{sql}");
        assert!(sql.contains(r#""content" text"#), "{sql}");
    }
}
