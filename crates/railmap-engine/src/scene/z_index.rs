/// Paint layer of a draw item; higher layers cover lower ones.
///
/// Map layers use the named constants. Values in between are free for hosts.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ZIndex(pub i32);

impl ZIndex {
    /// World backdrop and grid.
    pub const BACKDROP: ZIndex = ZIndex(-100);
    /// Train overlays.
    pub const OVERLAY: ZIndex = ZIndex(0);
    /// Debug outlines drawn over everything else.
    pub const DEBUG: ZIndex = ZIndex(100);

    #[inline]
    pub const fn new(v: i32) -> Self {
        Self(v)
    }

    /// Layer `n` steps above this one.
    #[inline]
    pub const fn above(self, n: i32) -> Self {
        Self(self.0.saturating_add(n))
    }
}
