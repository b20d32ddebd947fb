use sea_orm_migration::prelude::*;

/// 轮盘配置表 (options 为 jsonb 字符串数组，2~12 项)
#[derive(DeriveIden)]
enum WheelConfigs {
    Table,
    Id,
    Name,
    Options,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

/// 抽奖历史表
#[derive(DeriveIden)]
enum LotteryHistory {
    Table,
    Id,
    WheelConfigId,
    WheelName,
    #[sea_orm(iden = "result")]
    Outcome,
    OperatedBy,
    CreatedAt,
}

fn wheel_configs_table() -> TableCreateStatement {
    Table::create()
        .table(WheelConfigs::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(WheelConfigs::Id)
                .string_len(36)
                .not_null()
                .primary_key(),
        )
        .col(ColumnDef::new(WheelConfigs::Name).text().not_null())
        .col(ColumnDef::new(WheelConfigs::Options).json_binary().not_null())
        .col(ColumnDef::new(WheelConfigs::CreatedBy).text().not_null())
        .col(
            ColumnDef::new(WheelConfigs::CreatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::cust("NOW()")),
        )
        .col(
            ColumnDef::new(WheelConfigs::UpdatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::cust("NOW()")),
        )
        .to_owned()
}

fn lottery_history_table() -> TableCreateStatement {
    Table::create()
        .table(LotteryHistory::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(LotteryHistory::Id)
                .string_len(36)
                .not_null()
                .primary_key(),
        )
        .col(
            ColumnDef::new(LotteryHistory::WheelConfigId)
                .string_len(36)
                .not_null(),
        )
        .col(ColumnDef::new(LotteryHistory::WheelName).text().not_null())
        .col(ColumnDef::new(LotteryHistory::Outcome).text().not_null())
        .col(ColumnDef::new(LotteryHistory::OperatedBy).text().not_null())
        .col(
            ColumnDef::new(LotteryHistory::CreatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::cust("NOW()")),
        )
        .to_owned()
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 抽奖历史不对轮盘配置建外键：
/// 删除轮盘后历史记录仍需保留（wheel_name 为快照）
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(wheel_configs_table())
            .await?;

        manager
            .create_table(lottery_history_table())
            .await?;

        // 按轮盘筛选历史
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_lottery_history_wheel")
                    .table(LotteryHistory::Table)
                    .col(LotteryHistory::WheelConfigId)
                    .col(LotteryHistory::CreatedAt)
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
                    .table(LotteryHistory::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(WheelConfigs::Table)
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
        let sql = wheel_configs_table().to_string(PostgresQueryBuilder);
        assert!(sql.contains(r#""name" text"#), "{sql}");
        assert!(sql.contains(r#""created_by" text"#), "{sql}");

        let sql = lottery_history_table().to_string(PostgresQueryBuilder);
        assert!(sql.contains(r#""wheel_name" text"#), "{sql}");
        assert!(sql.contains(r#""operated_by" text"#), "{sql}");
        assert!(sql.contains(r#""result" text"#), "{sql}");
        assert!(!sql.contains("varchar(64)"), "{sql}");
    }
}
