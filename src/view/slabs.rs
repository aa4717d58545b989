//! Slab dashboard render model.

use crate::config::Config;
use crate::fmt::{format_bytes, format_counter, format_ratio};
use crate::model::{ItemStat, Snapshot};

use super::common::{CellStyle, Column, RenderModel};
use super::pager::PageWindow;

/// Row of the column labels.
pub const COLUMN_HEADER_ROW: u16 = 1;
/// First slab row.
pub const FIRST_SLAB_ROW: u16 = 2;

/// Builds the cells for one draw.
///
/// Layout: server header, column labels, one row per visible slab, then
/// the server-wide aggregates.
pub fn build_slab_view(
    snapshot: &Snapshot,
    window: &PageWindow,
    show_rates: bool,
    config: &Config,
) -> RenderModel {
    let mut model = RenderModel::default();
    let g = &snapshot.global;

    model.push(
        0,
        Column::Slab,
        format!(
            "MC SERVER:{} PORT:{} VERSION:({}) MEMORY:{} UPTIME:{} REFRESH RATE:{}s",
            g.server,
            g.port,
            g.version,
            format_bytes(g.memory_limit),
            g.uptime,
            config.refresh_secs()
        ),
        CellStyle::Header,
    );

    for column in Column::ALL {
        model.push(
            COLUMN_HEADER_ROW,
            column,
            column.label(show_rates).to_string(),
            CellStyle::ColumnHeader,
        );
    }

    let mut row = FIRST_SLAB_ROW;
    let no_items = ItemStat::default();
    for &id in &window.slab_ids {
        let Some(slab) = snapshot.slabs.get(id) else {
            continue;
        };
        let item = snapshot.items.get(id).unwrap_or(&no_items);

        model.push(row, Column::Slab, id.to_string(), CellStyle::Normal);
        model.push(row, Column::Size, slab.chunk_size.to_string(), CellStyle::Normal);
        model.push(row, Column::Used, slab.used_chunks.to_string(), CellStyle::Normal);
        model.push(row, Column::Pages, slab.total_pages.to_string(), CellStyle::Normal);
        model.push(
            row,
            Column::Wasted,
            format_bytes(slab.wasted_bytes(config.page_size)),
            CellStyle::Normal,
        );

        let age = item.evicted_age_seconds;
        let age_style = if age > 0 && age < config.evict_age_warn {
            CellStyle::Warning
        } else {
            CellStyle::Normal
        };
        model.push(row, Column::EvictAge, age.to_string(), age_style);

        model.push(
            row,
            Column::Evicted,
            format_counter(item.evicted.value, item.evicted.rate, show_rates),
            CellStyle::Normal,
        );
        model.push(
            row,
            Column::Set,
            format_counter(slab.set.value, slab.set.rate, show_rates),
            CellStyle::Normal,
        );
        model.push(
            row,
            Column::Hit,
            format_counter(slab.get_hits.value, slab.get_hits.rate, show_rates),
            CellStyle::Normal,
        );
        row += 1;
    }

    let suffix = if show_rates { "/s" } else { "" };
    let aggregates = [
        ("EVICTIONS", &g.evictions),
        ("SETS", &g.set),
        ("GETS", &g.get),
    ];
    for (label, metric) in aggregates {
        model.push(
            row,
            Column::Slab,
            format!(
                "{}{}: {}",
                label,
                suffix,
                format_counter(metric.value, metric.rate, show_rates)
            ),
            CellStyle::Normal,
        );
        row += 1;
    }
    model.push(
        row,
        Column::Slab,
        format!("HIT RATIO: {}", format_ratio(g.hit_ratio())),
        CellStyle::Normal,
    );
    row += 1;

    if window.truncated {
        model.push(
            row,
            Column::Slab,
            format!("more slabs: next page in {}s", config.refresh_secs()),
            CellStyle::Dimmed,
        );
    }

    model
}
