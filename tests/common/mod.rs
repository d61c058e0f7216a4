#![allow(dead_code)] // Not every test binary uses every fixture

use showdown::config::{Edition, SetConfig};
use showdown::stats::{Icon, Position, PositionStats, StatLine};

pub fn expanded_set() -> SetConfig {
    SetConfig::for_edition(Edition::Expanded)
}

pub fn position(position: Position, games: f64) -> PositionStats {
    PositionStats::builder().position(position).games(games).build()
}

/// Power-hitting everyday shortstop in the Statcast era.
pub fn shortstop() -> StatLine {
    StatLine::builder()
        .name("Test Shortstop")
        .year(2019)
        .pa(650.0)
        .hits(170.0)
        .doubles(35.0)
        .triples(3.0)
        .home_runs(30.0)
        .walks(70.0)
        .hit_by_pitch(5.0)
        .strikeouts(130.0)
        .stolen_bases(15.0)
        .sprint_speed(28.0)
        .games(155.0)
        .positions(vec![PositionStats::builder()
            .position(Position::Shortstop)
            .games(150.0)
            .oaa(8.0)
            .drs(10.0)
            .build()])
        .icons(vec![Icon::SilverSlugger])
        .build()
}

/// Utility player with games at second and center.
pub fn utility() -> StatLine {
    let mut stats = shortstop();
    stats.name = "Test Utility".into();
    stats.positions = vec![
        PositionStats::builder()
            .position(Position::SecondBase)
            .games(80.0)
            .drs(6.0)
            .build(),
        PositionStats::builder()
            .position(Position::CenterField)
            .games(70.0)
            .drs(4.0)
            .build(),
    ];
    stats
}

/// Workhorse starter. Batting fields are the values allowed.
pub fn ace() -> StatLine {
    StatLine::builder()
        .name("Test Ace")
        .year(2018)
        .pa(800.0)
        .hits(170.0)
        .doubles(35.0)
        .triples(3.0)
        .home_runs(22.0)
        .walks(50.0)
        .hit_by_pitch(6.0)
        .strikeouts(210.0)
        .games(32.0)
        .games_started(32.0)
        .innings_pitched(200.0)
        .positions(vec![position(Position::Pitcher, 32.0)])
        .build()
}

/// Starter who rarely got through the fourth inning.
pub fn short_starter() -> StatLine {
    let mut stats = ace();
    stats.name = "Test Opener".into();
    stats.innings_pitched = 120.0;
    stats
}

pub fn reliever() -> StatLine {
    StatLine::builder()
        .name("Test Reliever")
        .year(2021)
        .pa(280.0)
        .hits(50.0)
        .doubles(10.0)
        .triples(1.0)
        .home_runs(6.0)
        .walks(22.0)
        .hit_by_pitch(2.0)
        .strikeouts(85.0)
        .games(65.0)
        .games_started(0.0)
        .innings_pitched(68.0)
        .build()
}
