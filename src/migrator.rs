use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_users_table::Migration),
            Box::new(m20250101_000002_create_employees_table::Migration),
            Box::new(m20250101_000003_create_inventory_items_table::Migration),
            Box::new(m20250101_000004_create_repair_orders_table::Migration),
            Box::new(m20250101_000005_create_repair_line_items_table::Migration),
            Box::new(m20250101_000006_create_reports_tables::Migration),
        ]
    }
}

mod m20250101_000001_create_users_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000001_create_users_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Users::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Users::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Users::Name).string().not_null())
                        .col(
                            ColumnDef::new(Users::Username)
                                .string_len(64)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                        .col(ColumnDef::new(Users::Role).string_len(20).not_null())
                        .col(
                            ColumnDef::new(Users::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_users_role")
                        .table(Users::Table)
                        .col(Users::Role)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Users::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Users {
        Table,
        Id,
        Name,
        Username,
        PasswordHash,
        Role,
        CreatedAt,
    }
}

mod m20250101_000002_create_employees_table {
    use super::m20250101_000001_create_users_table::Users;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000002_create_employees_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Employees::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Employees::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Employees::UserId)
                                .integer()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Employees::Name).string().not_null())
                        .col(ColumnDef::new(Employees::Position).string_len(20).not_null())
                        .col(ColumnDef::new(Employees::Address).string().null())
                        .col(ColumnDef::new(Employees::Phone).string_len(32).null())
                        .col(ColumnDef::new(Employees::HireDate).date().not_null())
                        .col(
                            ColumnDef::new(Employees::Status)
                                .string_len(20)
                                .not_null()
                                .default("active"),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_employees_user_id")
                                .from(Employees::Table, Employees::UserId)
                                .to(Users::Table, Users::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Employees::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Employees {
        Table,
        Id,
        UserId,
        Name,
        Position,
        Address,
        Phone,
        HireDate,
        Status,
    }
}

mod m20250101_000003_create_inventory_items_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000003_create_inventory_items_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(InventoryItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InventoryItems::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(InventoryItems::Name).string().not_null())
                        .col(
                            ColumnDef::new(InventoryItems::Stock)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(InventoryItems::SalePrice)
                                .decimal_len(15, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(InventoryItems::CostPrice)
                                .decimal_len(15, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(InventoryItems::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryItems::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inventory_items_stock")
                        .table(InventoryItems::Table)
                        .col(InventoryItems::Stock)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(InventoryItems::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum InventoryItems {
        Table,
        Id,
        Name,
        Stock,
        SalePrice,
        CostPrice,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250101_000004_create_repair_orders_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000004_create_repair_orders_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(RepairOrders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(RepairOrders::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(RepairOrders::CustomerName).string().not_null())
                        .col(
                            ColumnDef::new(RepairOrders::ContactNumber)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(ColumnDef::new(RepairOrders::DeviceType).string().not_null())
                        .col(ColumnDef::new(RepairOrders::Complaint).text().not_null())
                        .col(
                            ColumnDef::new(RepairOrders::Status)
                                .string_len(32)
                                .not_null()
                                .default("pending"),
                        )
                        .col(
                            ColumnDef::new(RepairOrders::IntakeDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(RepairOrders::CompletionDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(RepairOrders::ServiceFee)
                                .decimal_len(15, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(RepairOrders::Total)
                                .decimal_len(15, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(RepairOrders::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(RepairOrders::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_repair_orders_status")
                        .table(RepairOrders::Table)
                        .col(RepairOrders::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_repair_orders_intake_date")
                        .table(RepairOrders::Table)
                        .col(RepairOrders::IntakeDate)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(RepairOrders::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum RepairOrders {
        Table,
        Id,
        CustomerName,
        ContactNumber,
        DeviceType,
        Complaint,
        Status,
        IntakeDate,
        CompletionDate,
        ServiceFee,
        Total,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250101_000005_create_repair_line_items_table {
    use super::m20250101_000003_create_inventory_items_table::InventoryItems;
    use super::m20250101_000004_create_repair_orders_table::RepairOrders;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000005_create_repair_line_items_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(RepairLineItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(RepairLineItems::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(RepairLineItems::RepairOrderId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(RepairLineItems::InventoryItemId)
                                .integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(RepairLineItems::Description)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(RepairLineItems::Quantity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(RepairLineItems::UnitPrice)
                                .decimal_len(15, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(RepairLineItems::LineCost)
                                .decimal_len(15, 2)
                                .not_null()
                                .default(0),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_repair_line_items_repair_order_id")
                                .from(RepairLineItems::Table, RepairLineItems::RepairOrderId)
                                .to(RepairOrders::Table, RepairOrders::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_repair_line_items_inventory_item_id")
                                .from(RepairLineItems::Table, RepairLineItems::InventoryItemId)
                                .to(InventoryItems::Table, InventoryItems::Id)
                                .on_delete(ForeignKeyAction::SetNull)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_repair_line_items_repair_order_id")
                        .table(RepairLineItems::Table)
                        .col(RepairLineItems::RepairOrderId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(RepairLineItems::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum RepairLineItems {
        Table,
        Id,
        RepairOrderId,
        InventoryItemId,
        Description,
        Quantity,
        UnitPrice,
        LineCost,
    }
}

mod m20250101_000006_create_reports_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000006_create_reports_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Reports::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Reports::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Reports::Title).string().not_null())
                        .col(ColumnDef::new(Reports::PeriodType).string_len(16).not_null())
                        .col(ColumnDef::new(Reports::StartDate).date().not_null())
                        .col(ColumnDef::new(Reports::EndDate).date().not_null())
                        .col(
                            ColumnDef::new(Reports::TotalOrders)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Reports::TotalRevenue)
                                .decimal_len(15, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Reports::TotalPartsCost)
                                .decimal_len(15, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Reports::NetProfit)
                                .decimal_len(15, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Reports::Notes).text().null())
                        .col(
                            ColumnDef::new(Reports::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ReportLines::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ReportLines::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(ReportLines::ReportId).integer().not_null())
                        .col(
                            ColumnDef::new(ReportLines::RepairOrderId)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ReportLines::CustomerName).string().not_null())
                        .col(ColumnDef::new(ReportLines::DeviceType).string().not_null())
                        .col(
                            ColumnDef::new(ReportLines::OrderTotal)
                                .decimal_len(15, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(ReportLines::PartsCost)
                                .decimal_len(15, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(ReportLines::Profit)
                                .decimal_len(15, 2)
                                .not_null()
                                .default(0),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_report_lines_report_id")
                                .from(ReportLines::Table, ReportLines::ReportId)
                                .to(Reports::Table, Reports::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_report_lines_report_id")
                        .table(ReportLines::Table)
                        .col(ReportLines::ReportId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ReportLines::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Reports::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Reports {
        Table,
        Id,
        Title,
        PeriodType,
        StartDate,
        EndDate,
        TotalOrders,
        TotalRevenue,
        TotalPartsCost,
        NetProfit,
        Notes,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum ReportLines {
        Table,
        Id,
        ReportId,
        RepairOrderId,
        CustomerName,
        DeviceType,
        OrderTotal,
        PartsCost,
        Profit,
    }
}
