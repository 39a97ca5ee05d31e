//! Member ordering strategies for rendered listings.
//!
//! Physical table order changes between compiler runs even when the source
//! does not, which makes raw listings useless for diffing. [`MemberOrder`]
//! is the knob the renderer sorts by; the default sorts lexicographically.

/// Ordering applied to types, fields and methods in a rendered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemberOrder {
    /// Lexicographic by name, ties broken by metadata token.
    ///
    /// This is the deterministic ordering: two compilations of the same
    /// source render identically even when the compiler laid the tables
    /// out differently.
    #[default]
    ByName,

    /// Physical table order, exactly as the rows appear in the image.
    Declaration,
}

impl MemberOrder {
    /// Rearrange `items` according to this strategy.
    ///
    /// `name` and `token` extract the sort keys from one item; the token is
    /// only consulted to break name ties, so overloads keep a stable order.
    /// [`MemberOrder::Declaration`] leaves the slice untouched.
    pub fn apply<T>(self, items: &mut [T], name: impl Fn(&T) -> &str, token: impl Fn(&T) -> u32) {
        if self == MemberOrder::ByName {
            items.sort_by(|a, b| name(a).cmp(name(b)).then_with(|| token(a).cmp(&token(b))));
        }
    }
}
