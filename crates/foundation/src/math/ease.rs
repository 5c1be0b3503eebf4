/// Animation timing curves over normalized time.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    InQuad,
    OutQuad,
    #[default]
    InOutQuad,
}

impl Easing {
    /// Maps normalized time `u` to eased progress.
    ///
    /// Input is clamped to `[0, 1]`; every curve maps 0 to 0 and 1 to 1 and
    /// is monotonic in between.
    pub fn apply(self, u: f64) -> f64 {
        let u = u.clamp(0.0, 1.0);
        match self {
            Easing::Linear => u,
            Easing::InQuad => u * u,
            Easing::OutQuad => 1.0 - (1.0 - u) * (1.0 - u),
            Easing::InOutQuad => {
                if u < 0.5 {
                    2.0 * u * u
                } else {
                    1.0 - 2.0 * (1.0 - u) * (1.0 - u)
                }
            }
        }
    }
}
