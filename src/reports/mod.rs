use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use showdown::card::ShowdownCard;
use showdown::chart::{Chart, ChartKind};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right(table: &mut Table, from: usize, to: usize) {
    for i in from..=to {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

pub fn print_card_header(card: &ShowdownCard) {
    let years = match card.last_year {
        Some(last) if last > card.year => format!("{}-{}", card.year, last),
        _ => card.year.to_string(),
    };
    println!(
        "\n🃏 {} ({}) | {} | edition {} | era {}",
        card.name, years, card.subtype, card.edition, card.era
    );
}

pub fn print_chart(chart: &Chart) {
    let label = match chart.kind {
        ChartKind::Pitcher => "Control",
        ChartKind::Hitter => "On-Base",
    };
    println!(
        "\n{} {} | Outs {} (target {:.2}) | accuracy {:.4}",
        label, chart.command, chart.outs, chart.out_target, chart.accuracy
    );

    let ranges = chart.ranges();
    let mut table = new_table();
    table.add_row(
        ranges
            .iter()
            .map(|(cat, _)| {
                Cell::new(cat.to_string())
                    .add_attribute(Attribute::Bold)
                    .set_alignment(CellAlignment::Center)
            })
            .collect::<Vec<_>>(),
    );
    table.add_row(
        ranges
            .iter()
            .map(|(_, r)| Cell::new(r).set_alignment(CellAlignment::Center))
            .collect::<Vec<_>>(),
    );
    println!("{}", table);

    let p = &chart.projected;
    println!(
        "Projected: {:.3} OBP / {:.3} AVG / {:.3} SLG / {:.1} HR per 650 PA (OBP bias {:+.4})",
        p.obp, p.avg, p.slg, p.hr_per_650, chart.obp_bias
    );
}

pub fn print_ratings(card: &ShowdownCard) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Rating").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);
    for (pos, rating) in &card.defense {
        table.add_row(vec![
            Cell::new(format!("Defense {}", pos)),
            Cell::new(format!("{:+}", rating)),
        ]);
    }
    if let Some(speed) = &card.speed {
        table.add_row(vec![
            Cell::new("Speed"),
            Cell::new(format!("{} ({})", speed.letter, speed.speed)),
        ]);
    }
    if let Some(ip) = card.innings_pitched {
        table.add_row(vec![Cell::new("IP"), Cell::new(ip)]);
    }
    if !card.icons.is_empty() {
        let icons: Vec<String> = card.icons.iter().map(|i| i.to_string()).collect();
        table.add_row(vec![Cell::new("Icons"), Cell::new(icons.join(" "))]);
    }
    align_right(&mut table, 1, 1);
    println!("\n{}", table);
}

pub fn print_points(card: &ShowdownCard) {
    let points = &card.points;
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Category").add_attribute(Attribute::Bold),
        Cell::new("Value"),
        Cell::new("Range"),
        Cell::new("Pct"),
        Cell::new("Weight"),
        Cell::new("Base"),
        Cell::new("Adj"),
        Cell::new("Points").fg(Color::Cyan),
    ]);
    align_right(&mut table, 1, 7);

    for b in &points.breakdowns {
        let range = match &b.range {
            Some(r) => format!("{}..{}", r.min, r.max),
            None => "-".to_string(),
        };
        let adj_cell = if b.adjustment < 0.0 {
            Cell::new(format!("{:.1}", b.adjustment)).fg(Color::Red)
        } else if b.adjustment > 0.0 {
            Cell::new(format!("{:+.1}", b.adjustment)).fg(Color::Green)
        } else {
            Cell::new("0")
        };
        table.add_row(vec![
            Cell::new(b.metric.to_string()).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.3}", b.value)),
            Cell::new(range),
            Cell::new(format!("{:.3}", b.percentile)),
            Cell::new(format!("{:.0}", b.weight)),
            Cell::new(format!("{:.1}", b.base_points)),
            adj_cell,
            Cell::new(format!("{:.1}", b.points)).fg(Color::Cyan),
        ]);
    }
    println!("\n{}", table);

    for d in &points.decay {
        println!(
            "📉 Decay above {:.0} at {:.0}%: removed {:.1} from {:.1}",
            d.threshold,
            d.rate * 100.0,
            d.removed,
            d.total_before
        );
    }
    if let Some(m) = points.stamina_multiplier {
        println!("⚾ Stamina multiplier {:.3}", m);
    }
    println!("💰 Points: {} (raw {:.1})", points.total, points.raw_total);
}

pub fn print_chart_candidates(name: &str, charts: &[Chart]) {
    println!("\nCandidate charts for {}", name);
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Command"),
        Cell::new("Outs"),
        Cell::new("Target"),
        Cell::new("Accuracy").fg(Color::Cyan),
        Cell::new("OBP"),
        Cell::new("SLG"),
        Cell::new("HR/650"),
    ]);
    align_right(&mut table, 0, 7);

    for (i, c) in charts.iter().enumerate() {
        let rank = if i == 0 {
            Cell::new(i).fg(Color::Green).add_attribute(Attribute::Bold)
        } else {
            Cell::new(i)
        };
        table.add_row(vec![
            rank,
            Cell::new(c.command),
            Cell::new(c.outs),
            Cell::new(format!("{:.2}", c.out_target)),
            Cell::new(format!("{:.4}", c.accuracy)).fg(Color::Cyan),
            Cell::new(format!("{:.3}", c.projected.obp)),
            Cell::new(format!("{:.3}", c.projected.slg)),
            Cell::new(format!("{:.1}", c.projected.hr_per_650)),
        ]);
    }
    println!("{}", table);
}
