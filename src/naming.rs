//! Artifact filename derivation
//!
//! One artifact is written per (target, size) pair. The name is derived from
//! the target by a fixed slug rule, with the size token either appended or
//! prepended depending on the configured order. Derivation is pure; re-running
//! with the same targets overwrites same-named artifacts.

use crate::Viewport;

/// Where the `{width}x{height}` token goes in the artifact filename
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameOrder {
    /// `example.com_page800x600.png`
    #[default]
    TargetFirst,
    /// `800x600example.com_page.png`
    SizeFirst,
}

/// Derive the artifact filename for one (target, size) pair.
///
/// The slug is the target with every `/` replaced by `_`, then every literal
/// `https` substring removed, in that order; the scheme separator residue
/// (`:` and leading underscores) is stripped from the front.
pub fn artifact_filename(target: &str, size: Viewport, order: NameOrder) -> String {
    let slug = target.replace('/', "_").replace("https", "");
    let slug = slug.trim_start_matches([':', '_']);
    let dims = format!("{}x{}", size.width, size.height);
    match order {
        NameOrder::TargetFirst => format!("{slug}{dims}.png"),
        NameOrder::SizeFirst => format!("{dims}{slug}.png"),
    }
}
