use vampirc_uci::UciSearchControl;

/// Search termination conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Depth limit, the search always goes exactly this deep
    pub depth: u32,
}

impl SearchLimits {
    pub fn depth(depth: u32) -> Self {
        SearchLimits { depth }
    }

    /// Builds the limits from a UCI `go` command.
    /// Only `depth` is honoured, anything else falls back to `default_depth`
    pub fn from_uci(search_control: Option<&UciSearchControl>, default_depth: u32) -> Self {
        let depth = search_control
            .and_then(|control| control.depth)
            .map_or(default_depth, u32::from);

        SearchLimits { depth }
    }
}
