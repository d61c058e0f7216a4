use crate::reports;
use clap::Args;
use showdown::api;
use showdown::config::{PointsTuning, SetConfig};
use showdown::error::SdResult;

#[derive(Args, Debug, Clone)]
pub struct ChartsArgs {
    #[arg(short, long)]
    pub stats: String,

    /// Only show the best N candidates.
    #[arg(short = 'n', long)]
    pub top: Option<usize>,

    #[arg(long = "exclude-command")]
    pub exclude_command: Vec<u8>,

    #[command(flatten)]
    pub tuning: PointsTuning,
}

pub fn run(args: ChartsArgs, set: &SetConfig) -> SdResult<()> {
    for stats in api::load_stats(&args.stats)? {
        let mut charts = api::ranked_charts(&stats, set, &args.exclude_command)?;
        if let Some(n) = args.top {
            charts.truncate(n.max(1));
        }
        reports::print_chart_candidates(&stats.name, &charts);
    }
    Ok(())
}
