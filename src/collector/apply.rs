//! Applies parsed reply lines to the snapshot.

use tracing::debug;

use crate::model::{GlobalField, ItemField, SlabField, Snapshot};

use super::parser::{LineError, StatKey, parse_line, parse_number, split_lines};
use super::traits::StatsCommand;

/// Counts of lines applied and skipped for one reply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyStats {
    /// Lines that updated a snapshot field or activated a slab.
    pub applied: usize,
    /// Lines that were not recognized.
    pub ignored: usize,
    /// Malformed lines.
    pub skipped: usize,
}

/// Outcome of a single well-formed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineOutcome {
    Applied,
    Ignored,
}

/// Applies one reply blob to the snapshot.
///
/// For `stats slabs` and `stats items` every record of the matching table is
/// deactivated first, so only slabs present in `text` stay active.
pub fn apply_reply(snapshot: &mut Snapshot, command: StatsCommand, text: &str) -> ApplyStats {
    match command {
        StatsCommand::Slabs => snapshot.slabs.deactivate_all(),
        StatsCommand::Items => snapshot.items.deactivate_all(),
        StatsCommand::General => {}
    }

    let mut stats = ApplyStats::default();
    for line in split_lines(text) {
        match apply_line(snapshot, command, line) {
            Ok(LineOutcome::Applied) => stats.applied += 1,
            Ok(LineOutcome::Ignored) => stats.ignored += 1,
            Err(LineError::NotStat) => stats.ignored += 1,
            Err(e) => {
                debug!(%command, line, error = %e, "skipping malformed stats line");
                stats.skipped += 1;
            }
        }
    }
    stats
}

fn apply_line(
    snapshot: &mut Snapshot,
    command: StatsCommand,
    line: &str,
) -> Result<LineOutcome, LineError> {
    let stat = parse_line(line)?;
    let key = StatKey::parse(stat.key)?;
    let now_ms = snapshot.global.time;

    match (command, key) {
        (StatsCommand::General, StatKey::Global(name)) => {
            let Some(field) = GlobalField::from_name(name) else {
                return Ok(LineOutcome::Ignored);
            };
            if field == GlobalField::Version {
                snapshot.global.set_version(stat.value);
            } else {
                let value = parse_number(name, stat.value)?;
                snapshot.global.apply(field, value, now_ms);
            }
            Ok(LineOutcome::Applied)
        }
        (StatsCommand::Slabs, StatKey::Slab { id, field: name }) => {
            let field = SlabField::from_name(name);
            let value = field.map(|_| parse_number(name, stat.value)).transpose()?;
            let slab = snapshot.slabs.activate(id)?;
            if let (Some(field), Some(value)) = (field, value) {
                slab.apply(field, value, now_ms);
            }
            Ok(LineOutcome::Applied)
        }
        (StatsCommand::Items, StatKey::Slab { id, field: name }) => {
            let field = ItemField::from_name(name);
            let value = field.map(|_| parse_number(name, stat.value)).transpose()?;
            let item = snapshot.items.activate(id)?;
            if let (Some(field), Some(value)) = (field, value) {
                item.apply(field, value, now_ms);
            }
            Ok(LineOutcome::Applied)
        }
        // Aggregates such as `active_slabs` in a slab reply, or slab keys in
        // the general reply.
        _ => Ok(LineOutcome::Ignored),
    }
}
