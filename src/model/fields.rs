//! Closed sets of recognized stat field names.
//!
//! Each enum has a lookup table from protocol name to variant. Names not in
//! the table are ignored by the collector.

/// Fields of the general `stats` reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalField {
    Uptime,
    Version,
    LimitMaxbytes,
    TotalItems,
    Evictions,
    CmdGet,
    CmdSet,
    GetHits,
}

const GLOBAL_FIELDS: &[(&str, GlobalField)] = &[
    ("uptime", GlobalField::Uptime),
    ("version", GlobalField::Version),
    ("limit_maxbytes", GlobalField::LimitMaxbytes),
    ("total_items", GlobalField::TotalItems),
    ("evictions", GlobalField::Evictions),
    ("cmd_get", GlobalField::CmdGet),
    ("cmd_set", GlobalField::CmdSet),
    ("get_hits", GlobalField::GetHits),
];

impl GlobalField {
    pub fn from_name(name: &str) -> Option<Self> {
        lookup(GLOBAL_FIELDS, name)
    }
}

/// Per-slab fields of the `stats slabs` reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlabField {
    ChunkSize,
    TotalPages,
    UsedChunks,
    FreeChunks,
    MemRequested,
    CmdSet,
    GetHits,
}

const SLAB_FIELDS: &[(&str, SlabField)] = &[
    ("chunk_size", SlabField::ChunkSize),
    ("total_pages", SlabField::TotalPages),
    ("used_chunks", SlabField::UsedChunks),
    ("free_chunks", SlabField::FreeChunks),
    ("mem_requested", SlabField::MemRequested),
    ("cmd_set", SlabField::CmdSet),
    ("get_hits", SlabField::GetHits),
];

impl SlabField {
    pub fn from_name(name: &str) -> Option<Self> {
        lookup(SLAB_FIELDS, name)
    }
}

/// Per-slab fields of the `stats items` reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    Number,
    Evicted,
    EvictedTime,
}

const ITEM_FIELDS: &[(&str, ItemField)] = &[
    ("number", ItemField::Number),
    ("evicted", ItemField::Evicted),
    ("evicted_time", ItemField::EvictedTime),
];

impl ItemField {
    pub fn from_name(name: &str) -> Option<Self> {
        lookup(ITEM_FIELDS, name)
    }
}

fn lookup<T: Copy>(table: &[(&str, T)], name: &str) -> Option<T> {
    table.iter().find(|(n, _)| *n == name).map(|(_, f)| *f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_names() {
        assert_eq!(GlobalField::from_name("cmd_get"), Some(GlobalField::CmdGet));
        assert_eq!(
            SlabField::from_name("mem_requested"),
            Some(SlabField::MemRequested)
        );
        assert_eq!(
            ItemField::from_name("evicted_time"),
            Some(ItemField::EvictedTime)
        );
    }

    #[test]
    fn test_lookup_unknown_names() {
        assert_eq!(GlobalField::from_name("rusage_user"), None);
        assert_eq!(SlabField::from_name("free_chunks_end"), None);
        // Prefix match must not count.
        assert_eq!(ItemField::from_name("evicted_nonzero"), None);
    }
}
