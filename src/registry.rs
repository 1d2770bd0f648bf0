//! Static registry mapping tool aliases to runner variants.

use crate::runner::ToolKind;

/// Built-in ordered tool list used when `--lint` is not given and the
/// configuration provides no `defaults`.
pub const DEFAULT_TOOLS: [&str; 3] = ["cppcheck", "tendra", "splint"];

/// Look up a runner variant by alias. Unknown aliases yield `None`; the
/// orchestrator skips them rather than aborting the batch.
pub fn lookup(alias: &str) -> Option<ToolKind> {
    match alias {
        "splint" => Some(ToolKind::Splint),
        "cppcheck" => Some(ToolKind::CppCheck),
        "tendra" => Some(ToolKind::Tendra),
        _ => None,
    }
}
