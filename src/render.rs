use analytics::{EmotionDatum, PsychologyReport};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

/// Renders the emotion breakdown and the gauge pair as terminal tables.
pub fn report_tables(report: &PsychologyReport) -> String {
    let mut out = format!(
        "Analyzed {} trades ({} with emotion tags)\n",
        report.trades_analyzed, report.tagged_trades
    );

    if report.emotions.is_empty() {
        out.push_str("No emotion tags found.\n");
    } else {
        out.push_str(&emotion_table(&report.emotions).to_string());
        out.push('\n');
    }

    let mut metrics = Table::new();
    metrics
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Discipline Level", "Tilt Control"])
        .add_row(vec![
            Cell::new(format!("{}%", report.metrics.discipline_level))
                .set_alignment(CellAlignment::Right),
            Cell::new(format!("{}%", report.metrics.tilt_control))
                .set_alignment(CellAlignment::Right),
        ]);
    out.push_str(&metrics.to_string());
    out.push('\n');

    out
}

fn emotion_table(emotions: &[EmotionDatum]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Emotion", "Trades", "Buy", "Sell", "No Side", "Leaning %", "Leaning", "Side",
        ]);

    for datum in emotions {
        let count = |n: usize| Cell::new(n).set_alignment(CellAlignment::Right);
        table.add_row(vec![
            Cell::new(&datum.subject),
            count(datum.total_trades),
            count(datum.buy_count),
            count(datum.sell_count),
            count(datum.null_count),
            Cell::new(datum.leaning_value.round_dp(2)).set_alignment(CellAlignment::Right),
            Cell::new(datum.leaning.label()),
            Cell::new(datum.side.label()),
        ]);
    }

    table
}
