use crate::config::StaminaConfig;
use crate::stats::{PlayerSubtype, Position, StatLine};

/// Decides whether a record is a hitter, a starter or a reliever.
///
/// Anyone without innings is a position player, as is a two-way player whose
/// fielding games away from the mound outnumber their pitching games.
pub fn classify(stats: &StatLine, config: &StaminaConfig) -> PlayerSubtype {
    if stats.innings_pitched <= 0.0 {
        return PlayerSubtype::PositionPlayer;
    }
    let fielding_games: f64 = stats
        .positions
        .iter()
        .filter(|p| p.position != Position::Pitcher)
        .map(|p| p.games)
        .sum();
    // Total games only stand in for mound appearances when no P row exists
    let has_pitcher_row = stats.positions.iter().any(|p| p.position == Position::Pitcher);
    let pitching_games = if has_pitcher_row {
        stats.position_games(Position::Pitcher)
    } else {
        stats.games
    };
    if fielding_games > pitching_games {
        return PlayerSubtype::PositionPlayer;
    }

    let start_share = if pitching_games > 0.0 {
        stats.games_started / pitching_games
    } else if stats.games_started > 0.0 {
        1.0
    } else {
        0.0
    };
    if start_share >= config.starter_share {
        PlayerSubtype::StartingPitcher
    } else {
        PlayerSubtype::ReliefPitcher
    }
}

/// Innings per appearance printed on a pitcher card.
pub fn ip_rating(stats: &StatLine, subtype: PlayerSubtype, config: &StaminaConfig) -> Option<u8> {
    let (appearances, min, max) = match subtype {
        PlayerSubtype::PositionPlayer => return None,
        PlayerSubtype::StartingPitcher => (stats.games_started, config.sp_min_ip, config.sp_max_ip),
        PlayerSubtype::ReliefPitcher => (stats.games, config.rp_min_ip, config.rp_max_ip),
    };
    if appearances <= 0.0 {
        return Some(min);
    }
    let per = (stats.innings_pitched / appearances).round();
    Some((per.max(0.0) as u8).clamp(min, max))
}
