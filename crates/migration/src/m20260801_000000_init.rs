//! Initial schema migration - creates all tables from scratch.
//!
//! Complete schema for Tarhal:
//!
//! - `users`: authentication
//! - `vehicles`: fuel-consumption profiles owned by users
//! - `trips`: route aggregates with budgeting assumptions and the latest
//!   results snapshot
//! - `segments`: ordered country legs of a trip
//! - `stays`: ordered lodging instances of a segment
//! - `settings`: per-user defaults (base currency, safety margin, per-night
//!   stay cost table)

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    Username,
    Password,
}

#[derive(Iden)]
enum Vehicles {
    Table,
    Id,
    UserId,
    Name,
    FuelType,
    FuelUnit,
    Consumption,
    TankSizeLiters,
    Notes,
}

#[derive(Iden)]
enum Trips {
    Table,
    Id,
    UserId,
    Name,
    Description,
    VehicleId,
    StartDate,
    IsRoundTrip,
    DailyFoodBudget,
    SafetyMarginPercent,
    ComfortLevel,
    Results,
}

#[derive(Iden)]
enum Segments {
    Table,
    Id,
    TripId,
    Position,
    CountryCode,
    CountryName,
    Km,
    Days,
    FuelPricePerLiter,
    BorderFees,
    TollsAndVignettes,
    OtherFixedCosts,
}

#[derive(Iden)]
enum Stays {
    Table,
    Id,
    SegmentId,
    Position,
    CityOrArea,
    StayType,
    Nights,
    CostPerNight,
    Notes,
}

#[derive(Iden)]
enum Settings {
    Table,
    UserId,
    BaseCurrency,
    DefaultSafetyMarginPercent,
    DefaultComfortLevel,
    HotelPerNight,
    PaidCampPerNight,
    FreeCampPerNight,
    FriendFamilyPerNight,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Vehicles
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Vehicles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vehicles::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Vehicles::UserId).string().not_null())
                    .col(ColumnDef::new(Vehicles::Name).string().not_null())
                    .col(ColumnDef::new(Vehicles::FuelType).string().not_null())
                    .col(ColumnDef::new(Vehicles::FuelUnit).string().not_null())
                    .col(ColumnDef::new(Vehicles::Consumption).double().not_null())
                    .col(ColumnDef::new(Vehicles::TankSizeLiters).double())
                    .col(ColumnDef::new(Vehicles::Notes).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vehicles_user")
                            .from(Vehicles::Table, Vehicles::UserId)
                            .to(Users::Table, Users::Username),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Trips
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Trips::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Trips::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Trips::UserId).string().not_null())
                    .col(ColumnDef::new(Trips::Name).string().not_null())
                    .col(ColumnDef::new(Trips::Description).string())
                    .col(ColumnDef::new(Trips::VehicleId).string().not_null())
                    .col(ColumnDef::new(Trips::StartDate).date())
                    .col(ColumnDef::new(Trips::IsRoundTrip).boolean().not_null())
                    .col(ColumnDef::new(Trips::DailyFoodBudget).double())
                    .col(ColumnDef::new(Trips::SafetyMarginPercent).double())
                    .col(ColumnDef::new(Trips::ComfortLevel).integer().not_null())
                    .col(ColumnDef::new(Trips::Results).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trips_user")
                            .from(Trips::Table, Trips::UserId)
                            .to(Users::Table, Users::Username),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trips_vehicle")
                            .from(Trips::Table, Trips::VehicleId)
                            .to(Vehicles::Table, Vehicles::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Segments
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Segments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Segments::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Segments::TripId).string().not_null())
                    .col(ColumnDef::new(Segments::Position).integer().not_null())
                    .col(ColumnDef::new(Segments::CountryCode).string().not_null())
                    .col(ColumnDef::new(Segments::CountryName).string().not_null())
                    .col(ColumnDef::new(Segments::Km).double().not_null())
                    .col(ColumnDef::new(Segments::Days).integer())
                    .col(ColumnDef::new(Segments::FuelPricePerLiter).double())
                    .col(ColumnDef::new(Segments::BorderFees).double())
                    .col(ColumnDef::new(Segments::TollsAndVignettes).double())
                    .col(ColumnDef::new(Segments::OtherFixedCosts).double())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_segments_trip")
                            .from(Segments::Table, Segments::TripId)
                            .to(Trips::Table, Trips::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Stays
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Stays::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Stays::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Stays::SegmentId).string().not_null())
                    .col(ColumnDef::new(Stays::Position).integer().not_null())
                    .col(ColumnDef::new(Stays::CityOrArea).string().not_null())
                    .col(ColumnDef::new(Stays::StayType).string().not_null())
                    .col(ColumnDef::new(Stays::Nights).integer().not_null())
                    .col(ColumnDef::new(Stays::CostPerNight).double())
                    .col(ColumnDef::new(Stays::Notes).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stays_segment")
                            .from(Stays::Table, Stays::SegmentId)
                            .to(Segments::Table, Segments::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 6. Settings
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Settings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Settings::UserId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Settings::BaseCurrency).string().not_null())
                    .col(
                        ColumnDef::new(Settings::DefaultSafetyMarginPercent)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Settings::DefaultComfortLevel)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Settings::HotelPerNight).double().not_null())
                    .col(
                        ColumnDef::new(Settings::PaidCampPerNight)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Settings::FreeCampPerNight)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Settings::FriendFamilyPerNight)
                            .double()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_settings_user")
                            .from(Settings::Table, Settings::UserId)
                            .to(Users::Table, Users::Username),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Stays::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Segments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Trips::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Settings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Vehicles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
