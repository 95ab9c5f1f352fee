use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, Expr, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Sports {
    Table,
    Id,
    Name,
    Slug,
}

#[derive(Iden)]
enum Teams {
    Table,
    Id,
    Name,
    City,
    Founded,
    Logo,
    Slug,
    SportId,
}

#[derive(Iden)]
enum TeamSports {
    Table,
    TeamId,
    SportId,
}

#[derive(Iden)]
enum Players {
    Table,
    Id,
    FirstName,
    LastName,
    TeamId,
    Position,
    Number,
    DateOfBirth,
    Nationality,
}

#[derive(Iden)]
enum Matches {
    Table,
    Id,
    SportId,
    HomeTeamId,
    AwayTeamId,
    DateTime,
    Location,
    Status,
    HomeScore,
    AwayScore,
    Notes,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // sports
        manager
            .create_table(
                Table::create()
                    .table(Sports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sports::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(Sports::Name)
                            .string_len(80)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Sports::Slug)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        // teams
        manager
            .create_table(
                Table::create()
                    .table(Teams::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Teams::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(Teams::Name)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Teams::City)
                            .string_len(100)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Teams::Founded).integer().null())
                    .col(ColumnDef::new(Teams::Logo).string_len(255).null())
                    .col(
                        ColumnDef::new(Teams::Slug)
                            .string_len(120)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Teams::SportId).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_teams_sport_id")
                            .from(Teams::Table, Teams::SportId)
                            .to(Sports::Table, Sports::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // team_sports (many-to-many)
        manager
            .create_table(
                Table::create()
                    .table(TeamSports::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(TeamSports::TeamId).big_integer().not_null())
                    .col(ColumnDef::new(TeamSports::SportId).big_integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(TeamSports::TeamId)
                            .col(TeamSports::SportId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_team_sports_team_id")
                            .from(TeamSports::Table, TeamSports::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_team_sports_sport_id")
                            .from(TeamSports::Table, TeamSports::SportId)
                            .to(Sports::Table, Sports::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_team_sports_sport_id")
                    .table(TeamSports::Table)
                    .col(TeamSports::SportId)
                    .to_owned(),
            )
            .await?;

        // players
        manager
            .create_table(
                Table::create()
                    .table(Players::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Players::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Players::FirstName).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Players::LastName)
                            .string_len(50)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Players::TeamId).big_integer().null())
                    .col(
                        ColumnDef::new(Players::Position)
                            .string_len(3)
                            .not_null()
                            .default("MF"),
                    )
                    .col(ColumnDef::new(Players::Number).small_integer().null())
                    .col(ColumnDef::new(Players::DateOfBirth).date().null())
                    .col(
                        ColumnDef::new(Players::Nationality)
                            .string_len(50)
                            .not_null()
                            .default(""),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_players_team_id")
                            .from(Players::Table, Players::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // one jersey number per team; NULLs never collide
        manager
            .create_index(
                Index::create()
                    .name("ux_players_team_number")
                    .table(Players::Table)
                    .col(Players::TeamId)
                    .col(Players::Number)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // matches
        manager
            .create_table(
                Table::create()
                    .table(Matches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Matches::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Matches::SportId).big_integer().null())
                    .col(ColumnDef::new(Matches::HomeTeamId).big_integer().not_null())
                    .col(ColumnDef::new(Matches::AwayTeamId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Matches::DateTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Matches::Location)
                            .string_len(200)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Matches::Status)
                            .string_len(10)
                            .not_null()
                            .default("SCHEDULED"),
                    )
                    .col(ColumnDef::new(Matches::HomeScore).small_integer().null())
                    .col(ColumnDef::new(Matches::AwayScore).small_integer().null())
                    .col(ColumnDef::new(Matches::Notes).text().null())
                    .col(
                        ColumnDef::new(Matches::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .check(Expr::col(Matches::HomeTeamId).ne(Expr::col(Matches::AwayTeamId)))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_sport_id")
                            .from(Matches::Table, Matches::SportId)
                            .to(Sports::Table, Sports::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_home_team_id")
                            .from(Matches::Table, Matches::HomeTeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_away_team_id")
                            .from(Matches::Table, Matches::AwayTeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_matches_date_time")
                    .table(Matches::Table)
                    .col(Matches::DateTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_matches_sport_id")
                    .table(Matches::Table)
                    .col(Matches::SportId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Matches::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Players::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TeamSports::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Teams::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sports::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
