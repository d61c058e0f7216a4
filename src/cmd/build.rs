use crate::reports;
use clap::Args;
use showdown::api;
use showdown::card::ChartOverrides;
use showdown::config::{PointsTuning, SetConfig};
use showdown::era::Era;
use showdown::error::SdResult;

#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// JSON file with one stat line or an array of them.
    #[arg(short, long)]
    pub stats: String,

    /// Zero-based rank of the chart to use (1 = second best).
    #[arg(long, default_value_t = 0)]
    pub chart_version: usize,

    /// Forces the command value; needs --outs.
    #[arg(long = "command", requires = "outs")]
    pub command_value: Option<u8>,

    #[arg(long, requires = "command_value")]
    pub outs: Option<u8>,

    #[arg(long = "exclude-command")]
    pub exclude_command: Vec<u8>,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[command(flatten)]
    pub tuning: PointsTuning,
}

pub fn run(args: BuildArgs, set: &SetConfig, era: Option<Era>) -> SdResult<()> {
    let lines = api::load_stats(&args.stats)?;
    let overrides = ChartOverrides {
        command_outs: args.command_value.zip(args.outs),
        excluded_commands: args.exclude_command.clone(),
        chart_version: args.chart_version,
    };

    let mut cards = Vec::with_capacity(lines.len());
    for stats in &lines {
        cards.push(api::build_card(stats, set, era, overrides.clone())?);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&cards)?);
        return Ok(());
    }

    for card in &cards {
        reports::print_card_header(card);
        reports::print_chart(&card.chart);
        reports::print_ratings(card);
        reports::print_points(card);
    }
    Ok(())
}
